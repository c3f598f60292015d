//! Document abstraction used by the extractor
//!
//! The extractor only needs to find nodes by selector, read text and attributes,
//! test a class and step to the next sibling element. [`Document`] and [`Node`] expose
//! exactly that, so the markup engine stays swappable. [`HtmlDocument`] is the
//! `scraper`-backed implementation used for real pages.

use scraper::{ElementRef, Html, Selector};

/// A parsed document that can be queried for nodes
pub trait Document {
    /// Compiled query understood by this engine
    type Selector;

    /// Handle to one element of the document
    type Node<'a>: Node<'a, Selector = Self::Selector>
    where
        Self: 'a;

    /// Compiles a CSS selector, returning None if it does not parse
    fn compile(css: &str) -> Option<Self::Selector>;

    /// Lazily yields every node matching `selector`, in document order
    fn select<'a>(
        &'a self,
        selector: &'a Self::Selector,
    ) -> impl Iterator<Item = Self::Node<'a>> + 'a;
}

/// An element handle borrowed from a [`Document`]
pub trait Node<'a>: Sized + Copy {
    type Selector;

    /// First descendant matching `selector`
    fn select_first(&self, selector: &Self::Selector) -> Option<Self>;

    /// Last descendant matching `selector`
    fn select_last(&self, selector: &Self::Selector) -> Option<Self>;

    /// Concatenated text of the node and its descendants
    fn text(&self) -> String;

    /// Attribute value, if present
    fn attr(&self, name: &str) -> Option<&'a str>;

    /// Returns true if the node carries `class`
    fn has_class(&self, class: &str) -> bool;

    /// The next sibling that is an element, skipping text and comments
    fn next_element(&self) -> Option<Self>;
}

/// HTML document parsed with `scraper`
///
/// Not `Send`: parse, extract and drop it without holding it across an await.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document; malformed markup is recovered, never rejected
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

impl Document for HtmlDocument {
    type Selector = Selector;
    type Node<'a> = ElementRef<'a> where Self: 'a;

    fn compile(css: &str) -> Option<Selector> {
        Selector::parse(css).ok()
    }

    fn select<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = Self::Node<'a>> + 'a {
        self.html.select(selector)
    }
}

impl<'a> Node<'a> for ElementRef<'a> {
    type Selector = Selector;

    fn select_first(&self, selector: &Selector) -> Option<Self> {
        ElementRef::select(self, selector).next()
    }

    fn select_last(&self, selector: &Selector) -> Option<Self> {
        ElementRef::select(self, selector).last()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn next_element(&self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }
}
