//! Tree node types.

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    /// Text content (escaped on output).
    Text(String),
    /// Pre-rendered markup, emitted verbatim (highlighted code).
    Raw(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn element(elem: Element) -> Self {
        Self::Element(Box::new(elem))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(&**elem),
            _ => None,
        }
    }
}

/// An HTML element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder: append a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == key)
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) {
        self.attrs.retain(|(k, _)| k != key);
    }

    /// Heading level for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Visit this element and every descendant element, parents first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(elem) = child {
                elem.walk_mut(f);
            }
        }
    }

    /// First descendant element (depth-first) with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(elem) = child {
                if elem.tag == tag {
                    return Some(&**elem);
                }
                if let Some(found) = elem.find(tag) {
                    return Some(found);
                }
            }
        }
        None
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(elem) => collect_text(&elem.children, out),
            Node::Raw(_) => {}
        }
    }
}

/// A complete document: doctype flag and root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doctype: bool,
    pub root: Element,
}

impl Document {
    /// Fragment document (no doctype) rooted at `root`.
    pub fn fragment(root: Element) -> Self {
        Self {
            doctype: false,
            root,
        }
    }

    /// The `<body>` element, if this document has a shell.
    pub fn body(&self) -> Option<&Element> {
        if self.root.tag == "body" {
            return Some(&self.root);
        }
        self.root.find("body")
    }
}
