//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Markdown page renderer with an "On This Page" outline
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: site.toml)
    #[arg(short = 'C', long, default_value = "site.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every page into the output directory
    #[command(visible_alias = "b")]
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,
    },

    /// Serve pages, rendering each on request
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render one page to stdout or a file
    #[command(visible_alias = "r")]
    Render {
        /// Page slug (file stem under the content directory)
        slug: String,

        /// Write the page to this file instead of stdout
        #[arg(short = 'o', long = "output", value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the outline headings of one page as JSON
    #[command(visible_alias = "o")]
    Outline {
        /// Page slug (file stem under the content directory)
        slug: String,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tola-page").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_render_output_flag() {
        let cli = parse(&["render", "intro", "-o", "out.html"]);
        match cli.command {
            Commands::Render { slug, file } => {
                assert_eq!(slug, "intro");
                assert_eq!(file, Some(PathBuf::from("out.html")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["-C", "other.toml", "-c", "docs", "build", "--clean", "--verbose"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert_eq!(cli.content, Some(PathBuf::from("docs")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build { clean: true }));
    }

    #[test]
    fn test_verbose_short_flag_and_version_coexist() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = parse(&["outline", "intro", "-v"]);
        assert!(cli.verbose);

        let err = Cli::try_parse_from(["tola-page", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_serve_defaults_unset() {
        let cli = parse(&["serve"]);
        assert!(matches!(
            cli.command,
            Commands::Serve {
                interface: None,
                port: None
            }
        ));
    }
}
