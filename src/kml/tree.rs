//! Element tree for KML documents.
//!
//! KML placemarks are shallow but can sit at any depth under `Document` and
//! `Folder` containers, and their geometry can be wrapped in `MultiGeometry`
//! or similar. Extraction therefore works on a parsed tree with descendant
//! queries instead of a streaming state machine.
//!
//! Nodes are stored flat, in document (pre-order) order, and refer to their
//! children by index. [`Element`] is a borrowed view into that storage. No
//! operation on the tree recurses, including dropping it, so nesting depth
//! is bounded only by memory.
//!
//! The tree is built from quick-xml events and rejects input that is not
//! well-formed: mismatched or unclosed tags, several root elements, stray
//! text outside the root, unknown entities and malformed attributes.
//!
//! # Examples
//!
//! ```
//! use beach_kml::kml::Document;
//!
//! let doc = Document::parse(
//!     "<kml><Folder><Placemark><name>A</name></Placemark></Folder></kml>",
//! )?;
//! let placemark = doc.root().find_first("Placemark").unwrap();
//! assert_eq!(placemark.child("name").map(|n| n.text()), Some("A"));
//! # Ok::<(), beach_kml::Error>(())
//! ```

use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;

/// Index of the document element; it is always the first node parsed.
const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    name: String,
    attributes: Vec<(String, String)>,
    /// Character data before the first child element
    text: String,
    children: Vec<usize>,
    /// One past the last descendant; descendants occupy `id + 1..end`
    end: usize,
}

impl Node {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = utf8(attr.key.as_ref())?.to_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::ParseError(format!("attribute '{}' on <{}>: {}", key, name, e)))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
            end: 0,
        })
    }
}

/// A well-formed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse document text into an element tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the text is not well-formed XML.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    let id = insert(&mut nodes, &open, Node::from_start(e)?)?;
                    open.push(id);
                },
                Event::Empty(ref e) => {
                    let id = insert(&mut nodes, &open, Node::from_start(e)?)?;
                    nodes[id].end = id + 1;
                },
                Event::End(ref e) => {
                    let id = open.pop().ok_or_else(|| {
                        Error::ParseError(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ))
                    })?;
                    nodes[id].end = nodes.len();
                },
                Event::Text(ref t) => {
                    let text = t.decode().map_err(|e| Error::ParseError(e.to_string()))?;
                    push_text(&mut nodes, &open, &text)?;
                },
                Event::CData(ref c) => {
                    let text = c.decode().map_err(|e| Error::ParseError(e.to_string()))?;
                    push_text(&mut nodes, &open, &text)?;
                },
                Event::GeneralRef(ref r) => {
                    let resolved = match r.resolve_char_ref().map_err(|e| Error::ParseError(e.to_string()))? {
                        Some(ch) => ch.to_string(),
                        None => {
                            let entity = r.decode().map_err(|e| Error::ParseError(e.to_string()))?;
                            resolve_predefined_entity(&entity)
                                .ok_or_else(|| Error::ParseError(format!("unknown entity &{};", entity)))?
                                .to_owned()
                        },
                    };
                    push_text(&mut nodes, &open, &resolved)?;
                },
                Event::Eof => break,
                // Declarations, comments, processing instructions and DOCTYPE
                _ => {},
            }
        }

        if let Some(&unclosed) = open.last() {
            return Err(Error::ParseError(format!(
                "unexpected end of document: <{}> is not closed",
                nodes[unclosed].name
            )));
        }
        if nodes.is_empty() {
            return Err(Error::ParseError("document has no root element".to_string()));
        }

        Ok(Self { nodes })
    }

    /// The document element.
    #[inline]
    pub fn root(&self) -> Element<'_> {
        self.element(ROOT)
    }

    #[inline]
    fn element(&self, id: usize) -> Element<'_> {
        Element { doc: self, id }
    }
}

/// Append a node under the innermost open element, or as the root.
fn insert(nodes: &mut Vec<Node>, open: &[usize], node: Node) -> Result<usize> {
    let id = nodes.len();
    match open.last() {
        Some(&parent) => nodes[parent].children.push(id),
        None if id != ROOT => {
            return Err(Error::ParseError(format!(
                "multiple root elements: <{}> follows the document element",
                node.name
            )));
        },
        None => {},
    }
    nodes.push(node);
    Ok(id)
}

/// Character data belongs to the open element only until its first child,
/// matching how ElementTree-style `.text` reads mixed content.
fn push_text(nodes: &mut [Node], open: &[usize], text: &str) -> Result<()> {
    match open.last() {
        Some(&id) => {
            let node = &mut nodes[id];
            if node.children.is_empty() {
                node.text.push_str(text);
            }
            Ok(())
        },
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::ParseError("text outside of the root element".to_string())),
    }
}

/// A parsed XML element, borrowed from its [`Document`].
///
/// Names are kept as written (including any namespace prefix); all lookups
/// compare against the local part so prefixed and default-namespace KML read
/// the same way.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: usize,
}

impl<'a> Element<'a> {
    #[inline]
    fn node(self) -> &'a Node {
        &self.doc.nodes[self.id]
    }

    /// Qualified element name as written in the document.
    #[inline]
    pub fn name(self) -> &'a str {
        &self.node().name
    }

    /// Element name without its namespace prefix.
    #[inline]
    pub fn local_name(self) -> &'a str {
        local_part(self.name())
    }

    /// Value of the attribute whose local name is `name`.
    pub fn attribute(self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(key, _)| local_part(key) == name)
            .map(|(_, value)| value.as_str())
    }

    /// The element's leading character data (text and CDATA, entities
    /// resolved), trimmed. Only text before the first child element counts;
    /// text of child elements and any tail after them is not included.
    #[inline]
    pub fn text(self) -> &'a str {
        self.node().text.trim()
    }

    /// Like [`Element::text`], but `None` when there is nothing but
    /// whitespace.
    pub fn non_empty_text(self) -> Option<&'a str> {
        Some(self.text()).filter(|t| !t.is_empty())
    }

    /// Direct children in document order.
    pub fn children(self) -> impl Iterator<Item = Element<'a>> {
        let doc = self.doc;
        self.node().children.iter().map(move |&id| doc.element(id))
    }

    /// First direct child with the given local name.
    pub fn child(self, name: &str) -> Option<Element<'a>> {
        self.children().find(|c| c.local_name() == name)
    }

    /// All direct children with the given local name.
    pub fn children_named(self, name: &'a str) -> impl Iterator<Item = Element<'a>> {
        self.children().filter(move |c| c.local_name() == name)
    }

    /// Every descendant of this element (not the element itself), depth
    /// first in document order.
    pub fn descendants(self) -> Descendants<'a> {
        Descendants {
            doc: self.doc,
            ids: self.id + 1..self.node().end,
        }
    }

    /// First descendant with the given local name, at any depth.
    pub fn find_first(self, name: &str) -> Option<Element<'a>> {
        self.descendants().find(|e| e.local_name() == name)
    }

    /// All descendants with the given local name, at any depth, in document
    /// order.
    pub fn find_all(self, name: &'a str) -> impl Iterator<Item = Element<'a>> {
        self.descendants().filter(move |e| e.local_name() == name)
    }
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("attributes", &self.node().attributes)
            .field("text", &self.text())
            .field("children", &self.node().children.len())
            .finish()
    }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
    doc: &'a Document,
    ids: Range<usize>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| self.doc.element(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

#[inline]
fn local_part(name: &str) -> &str {
    match name.rfind(':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

#[inline]
fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::ParseError(e.to_string()))
}
