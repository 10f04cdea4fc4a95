//! Static generation of every page.
//!
//! Each slug under the content directory becomes
//! `<output>/<slug>/index.html`; `<output>/404.html` is written last.
//! Pages render in parallel and share no mutable state.

use crate::{
    config::SiteConfig,
    core::is_shutdown,
    log,
    logger::ProgressLine,
    page::PageRenderer,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Render all pages into `build.output`.
///
/// A page that fails to render is reported and skipped; the build still
/// writes the others and then returns an error.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<()> {
    let renderer = PageRenderer::new(config);
    let slugs = renderer.source().enumerate()?;
    let output = config.build.output.as_path();

    prepare_output(output, config.build.clean)?;

    if slugs.is_empty() {
        log!(
            "warn";
            "no pages found in {}",
            config.root_relative(renderer.source().root()).display()
        );
    }

    let progress = (!quiet).then(|| ProgressLine::new(&[("pages", slugs.len())]));

    let failures: Vec<(String, anyhow::Error)> = slugs
        .par_iter()
        .filter(|_| !is_shutdown())
        .filter_map(|slug| {
            let result = write_page(&renderer, slug, output);
            if let Some(p) = &progress {
                p.inc("pages");
            }
            result.err().map(|err| (slug.clone(), err))
        })
        .collect();

    if let Some(p) = progress {
        p.finish();
    }

    write_not_found(&renderer, output)?;

    if !failures.is_empty() {
        for (slug, err) in &failures {
            log!("error"; "{slug}: {err:#}");
        }
        bail!("{} of {} pages failed", failures.len(), slugs.len());
    }

    if !quiet {
        log!("build"; "{} written to {}", plural_pages(slugs.len()), config.root_relative(output).display());
    }
    Ok(())
}

/// Output path for `slug`.
pub fn page_path(output: &Path, slug: &str) -> PathBuf {
    output.join(slug).join("index.html")
}

fn write_page(renderer: &PageRenderer, slug: &str, output: &Path) -> Result<()> {
    let page = renderer.render(slug)?;
    let path = page_path(output, slug);
    write_file(&path, &page.html)
}

fn write_not_found(renderer: &PageRenderer, output: &Path) -> Result<()> {
    write_file(&output.join("404.html"), &renderer.render_not_found(None))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Ensure the output directory exists, clearing it first when asked.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn plural_pages(count: usize) -> String {
    format!("{} page{}", count, if count == 1 { "" } else { "s" })
}
