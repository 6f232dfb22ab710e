//! Read-only document tree and a lenient markup tokenizer.
//!
//! Dictionary pages are HTML, not XML, so the parser built on `quick-xml`
//! tolerates unclosed void elements, stray end tags, valueless attributes,
//! bare `<` in text and HTML entities. `script` and `style` bodies are cut
//! out before tokenizing, since their raw text is not markup.

use crate::error::Result;
use log::debug;
use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::{Captures, Regex};

const ROOT_NAME: &str = "#document";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// `script`/`style` elements with their raw bodies. An unclosed one runs to
/// the end of the input.
static RAW_TEXT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<(?:script|style)\b[^>]*?/>|<script\b[^>]*>.*?(?:</script\s*>|\z)|<style\b[^>]*>.*?(?:</style\s*>|\z)",
    )
    .unwrap()
});

/// A `<` that cannot open a tag, comment or declaration.
static STRAY_LT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^A-Za-z/!?]|$)").unwrap());

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z][A-Za-z0-9]*);").unwrap());

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == key)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Direct element children, skipping text runs.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of every descendant text run.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, &|_| false);
        out
    }

    /// Like [`Element::text`], but subtrees matching `skip` contribute nothing.
    pub fn text_excluding(&self, skip: impl Fn(&Element) -> bool) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, &skip);
        out
    }

    fn collect_text(&self, out: &mut String, skip: &dyn Fn(&Element) -> bool) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) if !skip(el) => el.collect_text(out, skip),
                Node::Element(_) => {}
            }
        }
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out, &|_| false);
        out
    }

    /// Descendants in document order whose ancestors (below `self`) do not
    /// match `stop`. Elements matching `stop` are themselves still returned.
    pub fn descendants_until(&self, stop: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out, &stop);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>, stop: &dyn Fn(&Element) -> bool) {
        for child in self.children() {
            out.push(child);
            if !stop(child) {
                child.collect_descendants(out, stop);
            }
        }
    }

    /// `self` followed by its descendants.
    pub fn self_and_descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        self.collect_descendants(&mut out, &|_| false);
        out
    }

    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.descendants().into_iter().find(|el| pred(el))
    }

    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.is(name))
            .collect()
    }

    pub fn contains(&self, pred: impl Fn(&Element) -> bool) -> bool {
        self.find(pred).is_some()
    }
}

/// A parsed page. The root is a synthetic element wrapping the top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Tokenizes raw page markup into a document tree.
    pub fn parse(markup: &str) -> Result<Self> {
        let markup = RAW_TEXT_BLOCK.replace_all(markup, "");
        let markup = STRAY_LT.replace_all(&markup, "&lt;$1");
        let mut reader = Reader::from_str(&markup);
        {
            let config = reader.config_mut();
            config.trim_text(false);
            config.check_end_names = false;
            config.allow_unmatched_ends = true;
        }

        let mut stack: Vec<Element> = vec![Element::new(ROOT_NAME)];

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let element = element_from_start(&start);
                    if VOID_ELEMENTS.contains(&element.name()) {
                        append(&mut stack, Node::Element(element));
                    } else {
                        stack.push(element);
                    }
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start);
                    append(&mut stack, Node::Element(element));
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                    close_element(&mut stack, &name);
                }
                Event::Text(text) => {
                    let decoded = decode_entities(&String::from_utf8_lossy(&text));
                    if !decoded.is_empty() {
                        append(&mut stack, Node::Text(decoded));
                    }
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    append(&mut stack, Node::Text(text));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        // Close anything the markup left open.
        while stack.len() > 1 {
            if let Some(open) = stack.pop() {
                append(&mut stack, Node::Element(open));
            }
        }
        let root = stack
            .pop()
            .unwrap_or_else(|| Element::new(ROOT_NAME));
        debug!("Parsed document with {} top-level nodes", root.nodes().len());
        Ok(Document { root })
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    let mut attributes = start.html_attributes();
    attributes.with_checks(false);
    for attr in attributes.flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = decode_entities(&String::from_utf8_lossy(&attr.value));
        element = element.with_attr(key, value);
    }
    element
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Pops up to and including the nearest open element called `name`.
/// End tags with no matching open element are ignored.
fn close_element(stack: &mut Vec<Element>, name: &str) {
    let Some(position) = stack.iter().skip(1).rposition(|el| el.name == name) else {
        return;
    };
    let target = position + 1;
    while stack.len() > target {
        if let Some(open) = stack.pop() {
            append(stack, Node::Element(open));
        }
    }
}

/// Decodes character references one at a time. References that cannot be
/// resolved stay as written.
fn decode_entities(raw: &str) -> String {
    ENTITY
        .replace_all(raw, |caps: &Captures<'_>| {
            resolve_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn resolve_entity(reference: &str) -> Option<String> {
    if let Some(number) = reference.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    named_entity(reference).map(str::to_string)
}

fn named_entity(name: &str) -> Option<&'static str> {
    match name {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "nbsp" => Some("\u{a0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "hellip" => Some("\u{2026}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "laquo" => Some("\u{ab}"),
        "raquo" => Some("\u{bb}"),
        "middot" => Some("\u{b7}"),
        "thinsp" => Some("\u{2009}"),
        "iexcl" => Some("\u{a1}"),
        "iquest" => Some("\u{bf}"),
        "aacute" => Some("\u{e1}"),
        "eacute" => Some("\u{e9}"),
        "iacute" => Some("\u{ed}"),
        "oacute" => Some("\u{f3}"),
        "uacute" => Some("\u{fa}"),
        "ntilde" => Some("\u{f1}"),
        "uuml" => Some("\u{fc}"),
        "Aacute" => Some("\u{c1}"),
        "Eacute" => Some("\u{c9}"),
        "Iacute" => Some("\u{cd}"),
        "Oacute" => Some("\u{d3}"),
        "Uacute" => Some("\u{da}"),
        "Ntilde" => Some("\u{d1}"),
        _ => None,
    }
}
