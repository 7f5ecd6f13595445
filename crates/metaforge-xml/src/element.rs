//! Owned XML element tree.
//!
//! Elements keep their attributes in document order and carry at most one
//! trimmed text run. Whitespace-only text is never stored, so a tree read from
//! a pretty-printed file compares equal to the same tree read from a compact one.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A comment or processing instruction, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Misc {
    /// `<!--...-->` content, unescaped and untrimmed.
    Comment(String),
    /// `<?...?>` content (target and data).
    Instruction(String),
}

/// A single XML element and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Element {
    /// Tag name of the element.
    pub tag: String,
    /// Trimmed text content (empty when the element has none).
    pub text: String,
    /// Attributes as key-value pairs, in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements, in document order.
    pub children: Vec<Element>,
    /// Comments and instructions inside this element, each with the number of
    /// child elements preceding it.
    pub misc: Vec<(usize, Misc)>,
    /// Comments and instructions before the start tag. Only the document root has these.
    pub prolog: Vec<Misc>,
    /// Comments and instructions after the end tag. Only the document root has these.
    pub epilog: Vec<Misc>,
}

impl Element {
    /// Create a new empty element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the text content of this element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute to this element.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add a comment after the current children.
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.misc.push((self.children.len(), Misc::Comment(text.into())));
        self
    }

    /// Add multiple children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this element has any child elements.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this element has any attributes.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Whether this element carries non-empty text.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Mutable access to the first direct child with the given tag.
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Follow a `/`-separated path of child tags, taking the first match at
    /// every step. An empty path resolves to `self`.
    pub fn find_path(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, tag| node.child(tag))
    }

    /// Mutable variant of [`Element::find_path`].
    pub fn find_path_mut(&mut self, path: &str) -> Option<&mut Element> {
        let mut node = self;
        for tag in path.split('/').filter(|s| !s.is_empty()) {
            node = node.child_mut(tag)?;
        }
        Some(node)
    }

    /// Pre-order iterator over this element and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Number of element levels below this one (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Pre-order traversal returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
