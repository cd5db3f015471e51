//! Page text extraction
//!
//! The text sent to the summarization service comes either from a content root
//! chosen by a short selector preference list, or from the user's selection.

use crate::dom::{DomNode, DomTree, ElementNode};
use crate::error::{HighlightError, Result};
use crate::highlight::PreconditionFailed;

/// Content roots tried in priority order before falling back to the whole document
pub const CONTENT_SELECTORS: &[&str] = &["article", "main", ".article", ".content"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "summary", "table", "tr", "ul",
];

/// A tag name (`main`) or single class (`.content`) selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
}

impl SimpleSelector {
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        let (name, is_class) = match selector.strip_prefix('.') {
            Some(class) => (class, true),
            None => (selector, false),
        };

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(HighlightError::InvalidSelector(selector.to_string()));
        }

        Ok(if is_class {
            SimpleSelector::Class(name.to_string())
        } else {
            SimpleSelector::Tag(name.to_ascii_lowercase())
        })
    }

    pub fn matches(&self, element: &ElementNode) -> bool {
        match self {
            SimpleSelector::Tag(tag) => element.is_tag(tag),
            SimpleSelector::Class(class) => element.has_class(class),
        }
    }

    /// First descendant of `root` (excluding `root` itself) in document order that matches
    pub fn find_in<'a>(&self, root: &'a ElementNode) -> Option<&'a ElementNode> {
        root.children
            .iter()
            .filter_map(DomNode::as_element)
            .find_map(|child| if self.matches(child) { Some(child) } else { self.find_in(child) })
    }
}

/// Picks the content root of a page and renders its text
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    selectors: Vec<SimpleSelector>,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self {
            selectors: CONTENT_SELECTORS
                .iter()
                .filter_map(|s| SimpleSelector::parse(s).ok())
                .collect(),
        }
    }
}

impl ContentExtractor {
    pub fn new(selectors: &[&str]) -> Result<Self> {
        let selectors = selectors
            .iter()
            .map(|s| SimpleSelector::parse(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// The first element matching a selector, trying selectors in priority order, else `root`
    pub fn content_root<'a>(&self, root: &'a ElementNode) -> &'a ElementNode {
        self.selectors
            .iter()
            .find_map(|selector| selector.find_in(root))
            .unwrap_or(root)
    }

    /// Rendered text of the content root
    pub fn extract(&self, root: &ElementNode) -> String {
        let content = self.content_root(root);
        log::debug!("Extracting text from <{}>", content.tag_name);
        rendered_text(content)
    }
}

/// Approximate the rendered text of an element without layout information.
///
/// Script/style content is dropped, block elements and `<br>` start new lines,
/// whitespace inside a line collapses to single spaces and blank lines are removed.
pub fn rendered_text(element: &ElementNode) -> String {
    let mut writer = LineWriter::default();
    writer.element(element);
    writer.finish()
}

#[derive(Default)]
struct LineWriter {
    lines: Vec<String>,
    current: String,
    pending_space: bool,
}

impl LineWriter {
    fn element(&mut self, element: &ElementNode) {
        if element.is_non_rendering() {
            return;
        }
        if element.is_tag("br") {
            self.break_line();
            return;
        }
        if element.is_tag("td") || element.is_tag("th") {
            self.pending_space = true;
        }

        let block = BLOCK_TAGS.iter().any(|&tag| element.is_tag(tag));
        if block {
            self.break_line();
        }
        for child in &element.children {
            match child {
                DomNode::Text(text) => self.text(&text.value),
                DomNode::Element(child) => self.element(child),
            }
        }
        if block {
            self.break_line();
        }
    }

    fn text(&mut self, value: &str) {
        for c in value.chars() {
            if c.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.current.is_empty() {
                self.current.push(' ');
            }
            self.pending_space = false;
            self.current.push(c);
        }
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
        self.pending_space = false;
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

/// Where the text for a service request comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// The page's content root
    Page,
    /// Every rendered text node of the document, ignoring content roots
    Document,
    /// Text the user selected
    Selection(String),
}

impl TextSource {
    /// Produce the request text; blank text is a precondition failure
    pub fn resolve(&self, tree: &DomTree, extractor: &ContentExtractor) -> std::result::Result<String, PreconditionFailed> {
        let text = match self {
            TextSource::Page => extractor.extract(&tree.root),
            TextSource::Document => rendered_text(&tree.root),
            TextSource::Selection(selection) => selection.clone(),
        };
        if text.trim().is_empty() {
            return Err(PreconditionFailed::EmptyDocument);
        }
        Ok(text)
    }
}
