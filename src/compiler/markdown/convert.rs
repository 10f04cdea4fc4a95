//! Markdown to tree conversion using pulldown-cmark.

use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::dom::{Document, Element, Node};
use crate::utils::html::unescape;

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `## Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    pub fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Markdown to tree converter.
///
/// Open elements live on a stack; closing a tag pops its element into the
/// parent (or the root when the stack is empty).
#[derive(Default)]
struct MarkdownConverter {
    stack: Vec<Element>,
    root_children: Vec<Node>,
    /// Buffer for the lines of one HTML block.
    html_block: Option<String>,
    in_table_head: bool,
}

impl MarkdownConverter {
    fn convert<'a>(mut self, events: impl Iterator<Item = Event<'a>>) -> Document {
        for event in events {
            self.handle_event(event);
        }
        // Unbalanced input still yields a tree.
        while let Some(elem) = self.stack.pop() {
            self.add_node(Node::element(elem));
        }

        let mut body = Element::new("body");
        body.children = self.root_children;
        Document::fragment(body)
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(buf) = self.html_block.as_mut() {
            match event {
                Event::Html(html) | Event::Text(html) => {
                    buf.push_str(&html);
                    return;
                }
                Event::End(TagEnd::HtmlBlock) => {
                    let html = self.html_block.take().unwrap_or_default();
                    self.add_html_block(&html);
                    return;
                }
                _ => {}
            }
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.add_node(Node::element(
                Element::new("code").with_child(Node::text(code.to_string())),
            )),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.add_node(Node::element(
                Element::new("code")
                    .with_attr("class", "language-math")
                    .with_child(Node::text(math.to_string())),
            )),
            Event::Html(html) => self.add_html_block(&html),
            Event::InlineHtml(html) => self.add_node(Node::Raw(html.to_string())),
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => self.add_node(Node::element(Element::new("br"))),
            Event::Rule => self.add_node(Node::element(Element::new("hr"))),
            Event::FootnoteReference(name) => self.add_footnote_ref(&name),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::HtmlBlock => self.html_block = Some(String::new()),
            Tag::MetadataBlock(_) => {}
            Tag::CodeBlock(kind) => {
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind
                    && let Some(lang) = info.split_whitespace().next()
                {
                    code.set_attr("class", format!("language-{lang}"));
                }
                self.stack.push(Element::new("pre"));
                self.stack.push(code);
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.stack.push(Element::new("thead"));
                self.stack.push(Element::new("tr"));
            }
            Tag::TableCell if self.in_table_head => self.stack.push(Element::new("th")),
            tag => self.stack.push(tag_to_element(tag)),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::CodeBlock | TagEnd::TableHead => {
                self.in_table_head = false;
                self.close();
                self.close();
            }
            TagEnd::Image => {
                if let Some(mut img) = self.stack.pop() {
                    let alt = img.text_content();
                    img.children.clear();
                    img.set_attr("alt", alt);
                    self.add_node(Node::element(img));
                }
            }
            _ => self.close(),
        }
    }

    fn close(&mut self) {
        if let Some(elem) = self.stack.pop() {
            self.add_node(Node::element(elem));
        }
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Merge with a preceding text node so code blocks stay one string.
        if let Some(Node::Text(prev)) = self.current_children().last_mut() {
            prev.push_str(text);
            return;
        }
        self.add_node(Node::text(text));
    }

    /// Parse an HTML block with tl and convert it to tree nodes.
    fn add_html_block(&mut self, html: &str) {
        let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
            self.add_node(Node::Raw(html.to_string()));
            return;
        };
        let parser = dom.parser();
        for handle in dom.children() {
            if let Some(node) = tl_node_to_tree(*handle, parser) {
                self.add_node(node);
            }
        }
    }

    fn add_footnote_ref(&mut self, name: &str) {
        let link = Element::new("a")
            .with_attr("href", format!("#fn-{name}"))
            .with_attr("id", format!("fnref-{name}"))
            .with_child(Node::text(format!("[{name}]")));
        let sup = Element::new("sup")
            .with_attr("class", "footnote-ref")
            .with_child(Node::element(link));
        self.add_node(Node::element(sup));
    }

    fn add_task_marker(&mut self, checked: bool) {
        let mut input = Element::new("input")
            .with_attr("type", "checkbox")
            .with_attr("disabled", "");
        if checked {
            input.set_attr("checked", "");
        }
        self.add_node(Node::element(input));
    }

    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(elem) => &mut elem.children,
            None => &mut self.root_children,
        }
    }

    fn add_node(&mut self, node: Node) {
        self.current_children().push(node);
    }
}

/// Convert a tl node handle to a tree node
fn tl_node_to_tree(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    match handle.get(parser)? {
        tl::Node::Tag(tag) => {
            let mut elem = Element::new(tag.name().as_utf8_str().to_lowercase());
            for (key, value) in tag.attributes().iter() {
                let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                elem.set_attr(key.as_ref(), value);
            }
            for child in tag.children().top().iter() {
                if let Some(node) = tl_node_to_tree(*child, parser) {
                    elem.children.push(node);
                }
            }
            Some(Node::element(elem))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            if text.trim().is_empty() {
                None
            } else {
                Some(Node::text(unescape(&text).into_owned()))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

/// Convert a pulldown-cmark Tag to an empty element.
fn tag_to_element(tag: Tag) -> Element {
    match tag {
        Tag::Paragraph => Element::new("p"),
        Tag::Heading {
            level, id, classes, ..
        } => {
            let mut elem = Element::new(heading_level_to_tag(level));
            if let Some(id) = id {
                elem.set_attr("id", id.to_string());
            }
            if !classes.is_empty() {
                let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
                elem.set_attr("class", classes.join(" "));
            }
            elem
        }
        Tag::BlockQuote(_) => Element::new("blockquote"),
        Tag::List(Some(start)) if start != 1 => {
            Element::new("ol").with_attr("start", start.to_string())
        }
        Tag::List(Some(_)) => Element::new("ol"),
        Tag::List(None) => Element::new("ul"),
        Tag::Item => Element::new("li"),
        Tag::FootnoteDefinition(name) => Element::new("div")
            .with_attr("class", "footnote")
            .with_attr("id", format!("fn-{name}")),

        Tag::Table(alignments) => {
            let align: String = alignments
                .iter()
                .map(|a| match a {
                    Alignment::None => 'n',
                    Alignment::Left => 'l',
                    Alignment::Center => 'c',
                    Alignment::Right => 'r',
                })
                .collect();
            Element::new("table").with_attr("data-align", align)
        }
        Tag::TableHead => Element::new("thead"),
        Tag::TableRow => Element::new("tr"),
        Tag::TableCell => Element::new("td"),

        Tag::Emphasis => Element::new("em"),
        Tag::Strong => Element::new("strong"),
        Tag::Strikethrough => Element::new("del"),
        Tag::Superscript => Element::new("sup"),
        Tag::Subscript => Element::new("sub"),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut elem = Element::new("a").with_attr("href", dest_url.to_string());
            if !title.is_empty() {
                elem.set_attr("title", title.to_string());
            }
            elem
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let mut elem = Element::new("img").with_attr("src", dest_url.to_string());
            if !title.is_empty() {
                elem.set_attr("title", title.to_string());
            }
            elem
        }

        Tag::DefinitionList => Element::new("dl"),
        Tag::DefinitionListTitle => Element::new("dt"),
        Tag::DefinitionListDefinition => Element::new("dd"),

        // Handled by the converter before reaching here.
        Tag::CodeBlock(_) => Element::new("pre"),
        Tag::HtmlBlock | Tag::MetadataBlock(_) => Element::new("div"),
    }
}

fn heading_level_to_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Convert a Markdown event stream into a `<body>` fragment.
pub fn from_events<'a>(events: impl Iterator<Item = Event<'a>>) -> Document {
    MarkdownConverter::default().convert(events)
}

/// Convert a Markdown string into a `<body>` fragment.
pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Document {
    from_events(Parser::new_ext(markdown, options.to_pulldown_options()))
}
