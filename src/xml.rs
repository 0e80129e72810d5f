//! XML plumbing shared by the registry readers and writers.
//!
//! Readers build a small element tree from `quick-xml` events and query it by
//! local name, so namespace prefixes never matter. Writers go through
//! [`XmlWriter`], a thin wrapper over `quick_xml::Writer` with two-space
//! indentation.

use crate::Format;
use crate::error::{ParseError, ValueError, WriteError};
use itertools::Itertools;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// An element with its attributes, children and direct text.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct XmlNode {
    /// Local name, without namespace prefix.
    pub(crate) name: String,
    /// Attributes by qualified name, in document order.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<XmlNode>,
    pub(crate) text: String,
    /// Direct text runs, each keyed by how many children precede it.
    runs: Vec<(usize, String)>,
}

impl XmlNode {
    /// Attribute by qualified or local name.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name || local_name(key) == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub(crate) fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follows a chain of child names.
    pub(crate) fn path(&self, names: &[&str]) -> Option<&XmlNode> {
        names.iter().try_fold(self, |node, name| node.child(name))
    }

    /// First element with this name anywhere below this node, depth first.
    pub(crate) fn descendant(&self, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find_map(|c| if c.name == name { Some(c) } else { c.descendant(name) })
    }

    /// Every element with this name below this node, in document order.
    pub(crate) fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Trimmed direct text, `None` when blank.
    pub(crate) fn text(&self) -> Option<String> {
        crate::utils::non_blank(&self.text)
    }

    /// Text of this node and all descendants in document order, with
    /// whitespace collapsed. Empty elements such as `<br/>` count as a space.
    pub(crate) fn deep_text(&self) -> Option<String> {
        let mut text = String::new();
        self.collect_text(&mut text);
        crate::utils::non_blank(&text.split_whitespace().join(" "))
    }

    fn collect_text(&self, out: &mut String) {
        let mut runs = self.runs.iter().peekable();
        for (index, child) in self.children.iter().enumerate() {
            while let Some((_, run)) = runs.next_if(|(at, _)| *at <= index) {
                out.push_str(run);
            }
            if child.children.is_empty() && child.runs.is_empty() {
                out.push(' ');
            } else {
                child.collect_text(out);
            }
        }
        for (_, run) in runs {
            out.push_str(run);
        }
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
        let at = self.children.len();
        match self.runs.last_mut() {
            Some((last, run)) if *last == at => run.push_str(text),
            _ => self.runs.push((at, text.to_string())),
        }
    }

    pub(crate) fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(XmlNode::text)
    }
}

fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

/// 1-based line containing byte offset `pos`.
fn line_at(content: &str, pos: usize) -> usize {
    let end = pos.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn element(e: &BytesStart<'_>) -> Result<XmlNode, String> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        attrs.push((key, value));
    }
    Ok(XmlNode {
        name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
        attrs,
        ..XmlNode::default()
    })
}

/// Parses a document into its root element.
pub(crate) fn parse_document(content: &str, format: Format) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root = None;
    let mut buf = Vec::new();

    loop {
        let pos = reader.buffer_position() as usize;
        let malformed =
            |message: String| ParseError::at_line(line_at(content, pos), format, ValueError::MalformedXml(message));

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(element(e).map_err(malformed)?),
            Ok(Event::Empty(ref e)) => {
                let node = element(e).map_err(malformed)?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| malformed(e.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.push_text(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(node) = stack.last_mut() {
                    node.push_text(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(e.to_string())),
            _ => (),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::at_line(
            line_at(content, content.len()),
            format,
            ValueError::MalformedXml(format!("unclosed element '{}'", open.name)),
        ));
    }

    root.ok_or_else(|| {
        ParseError::without_position(format, ValueError::MalformedXml("no root element".to_string()))
    })
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

/// Local name of the root element plus every namespace it declares.
///
/// Only the prolog and the root start tag are read.
pub(crate) fn root_element(content: &str) -> Option<(String, Vec<String>)> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let node = element(e).ok()?;
                let namespaces = node
                    .attrs
                    .into_iter()
                    .filter(|(key, _)| key == "xmlns" || key.starts_with("xmlns:"))
                    .map(|(_, value)| value)
                    .collect();
                return Some((node.name, namespaces));
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => (),
            Ok(Event::Text(ref e)) if e.iter().all(u8::is_ascii_whitespace) => (),
            _ => return None,
        }
        buf.clear();
    }
}

fn write_err<E: std::fmt::Display>(format: Format) -> impl Fn(E) -> WriteError {
    move |e| WriteError::new(format, e)
}

/// Indenting XML writer that tags its errors with the target format.
pub(crate) struct XmlWriter {
    writer: Writer<Vec<u8>>,
    format: Format,
}

impl XmlWriter {
    /// Starts a document with an XML declaration.
    pub(crate) fn new(format: Format) -> Result<Self, WriteError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_err(format))?;
        Ok(Self { writer, format })
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), WriteError> {
        let mut start = BytesStart::new(name);
        for &attr in attrs {
            start.push_attribute(attr);
        }
        self.writer
            .write_event(Event::Start(start))
            .map_err(write_err(self.format))
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<(), WriteError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_err(self.format))
    }

    /// `<name attrs>text</name>`
    pub(crate) fn element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), WriteError> {
        self.start(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_err(self.format))?;
        self.end(name)
    }

    /// Writes the element only when `text` is present and not blank.
    pub(crate) fn optional(&mut self, name: &str, text: Option<&str>) -> Result<(), WriteError> {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => self.element(name, &[], text),
            None => Ok(()),
        }
    }

    /// An element without content, `<name attrs/>`.
    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), WriteError> {
        let mut start = BytesStart::new(name);
        for &attr in attrs {
            start.push_attribute(attr);
        }
        self.writer
            .write_event(Event::Empty(start))
            .map_err(write_err(self.format))
    }

    pub(crate) fn finish(self) -> Result<String, WriteError> {
        let mut output = String::from_utf8(self.writer.into_inner()).map_err(write_err(self.format))?;
        output.push('\n');
        Ok(output)
    }
}
