//! Card rendering.
//!
//! Cards are built as small owned element trees ([`Element`]) and serialized
//! to HTML only when injected into a page. Building never touches the page.

mod cards;

pub use cards::{contribution_card, plugin_card, TYPES_MARKER};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "link", "meta"];

/// A node in a card tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with classes, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::add_class`].
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Add one or more space-separated classes, skipping duplicates.
    pub fn add_class(&mut self, class: &str) {
        for name in class.split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// First descendant (or self) carrying `class`, depth-first.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.child_elements().find_map(|e| e.find_by_class(class))
    }

    /// All descendants (and self) carrying `class`, in document order.
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_by_class(class, found);
        }
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attribute(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Escape text content.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted attribute value.
pub fn escape_attribute(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_to_html() {
        let mut div = Element::new("div").with_class("section input-section");
        div.set_attribute("data-kind", "input");
        div.append_text("hello");
        assert_eq!(
            div.to_html(),
            r#"<div class="section input-section" data-kind="input">hello</div>"#
        );
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let mut img = Element::new("img").with_class("plugin-icon");
        img.set_attribute("src", "https://example.com/a.png");
        assert_eq!(
            img.to_html(),
            r#"<img class="plugin-icon" src="https://example.com/a.png">"#
        );
    }

    #[test]
    fn test_escaping() {
        let mut a = Element::new("a");
        a.set_attribute("href", "https://x.test/?a=1&b=\"2\"");
        a.append_text("<script>");
        assert_eq!(
            a.to_html(),
            r#"<a href="https://x.test/?a=1&amp;b=&quot;2&quot;">&lt;script&gt;</a>"#
        );
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut a = Element::new("a");
        a.set_attribute("href", "one");
        a.set_attribute("href", "two");
        assert_eq!(a.attribute("href"), Some("two"));
        assert_eq!(a.to_html(), r#"<a href="two"></a>"#);
    }

    #[test]
    fn test_add_class_skips_duplicates() {
        let mut div = Element::new("div");
        div.add_class("section");
        div.add_class("section middle-section");
        assert_eq!(div.to_html(), r#"<div class="section middle-section"></div>"#);
    }

    #[test]
    fn test_find_and_text_content() {
        let mut outer = Element::new("div").with_class("container");
        let mut name = Element::new("div").with_class("plugin-name");
        name.append_text("foo");
        let mut inner = Element::new("a").with_class("section");
        inner.append(name);
        outer.append(inner);
        outer.append(Element::new("div").with_class("section"));

        assert_eq!(outer.find_by_class("plugin-name").unwrap().text_content(), "foo");
        assert_eq!(outer.find_all_by_class("section").len(), 2);
        assert!(outer.find_by_class("missing").is_none());
        assert_eq!(outer.text_content(), "foo");
    }
}
