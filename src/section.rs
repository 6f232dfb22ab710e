//! Heading detection and the language-section isolator.

use crate::document::{Document, Element};
use log::debug;

/// Heading level of language sections (`<h2>`).
pub const LANGUAGE_HEADING_LEVEL: u8 = 2;

/// Returns the heading level of `el`, if it is a heading.
///
/// Both bare `<hN>` elements and the `<div class="mw-heading">` wrapper used
/// by newer page markup are recognized.
pub fn heading_level(el: &Element) -> Option<u8> {
    if let Some(level) = tag_level(el.name()) {
        return Some(level);
    }
    if el.is("div") && el.has_class("mw-heading") {
        return el.children().find_map(|child| tag_level(child.name()));
    }
    None
}

fn tag_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// The visible label of a heading: the `mw-headline` span when present,
/// otherwise the heading text without its edit links. Trimmed.
pub fn heading_label(el: &Element) -> String {
    let heading = if tag_level(el.name()).is_some() {
        el
    } else {
        el.children()
            .find(|child| tag_level(child.name()).is_some())
            .unwrap_or(el)
    };
    if let Some(headline) = heading.find(|e| e.has_class("mw-headline")) {
        return headline.text().trim().to_string();
    }
    heading
        .text_excluding(|e| e.has_class("mw-editsection"))
        .trim()
        .to_string()
}

/// The sibling nodes between a language heading (exclusive) and the next
/// heading of the same or a shallower level (exclusive).
#[derive(Debug, Clone)]
pub struct SectionSpan<'a> {
    level: u8,
    nodes: Vec<&'a Element>,
}

impl<'a> SectionSpan<'a> {
    /// Collects the siblings following `siblings[start]`, which must be a heading.
    fn bounded(siblings: &[&'a Element], start: usize, level: u8) -> Self {
        let nodes = siblings[start + 1..]
            .iter()
            .copied()
            .take_while(|el| heading_level(el).is_none_or(|l| l > level))
            .collect();
        SectionSpan { level, nodes }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn nodes(&self) -> &[&'a Element] {
        &self.nodes
    }
}

/// Finds the language section titled exactly `language_name`.
///
/// The first container (in document order) holding a matching level-2
/// heading among its direct children wins. Returns `None` when the page has
/// no such section.
pub fn isolate_language_section<'a>(
    document: &'a Document,
    language_name: &str,
) -> Option<SectionSpan<'a>> {
    for container in document.root().self_and_descendants() {
        let siblings: Vec<&Element> = container.children().collect();
        let matched = siblings.iter().position(|el| {
            heading_level(el) == Some(LANGUAGE_HEADING_LEVEL) && heading_label(el) == language_name
        });
        if let Some(start) = matched {
            let span = SectionSpan::bounded(&siblings, start, LANGUAGE_HEADING_LEVEL);
            debug!(
                "Isolated '{}' section with {} nodes",
                language_name,
                span.nodes().len()
            );
            return Some(span);
        }
    }
    debug!("No '{}' section found", language_name);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<div class="mw-parser-output">
<h2><span class="mw-headline" id="English">English</span><span class="mw-editsection">[edit]</span></h2>
<p>english paragraph</p>
<h2><span class="mw-headline" id="Spanish">Spanish</span></h2>
<h3><span class="mw-headline">Verb</span></h3>
<p>hablar</p>
<h4><span class="mw-headline">Synonyms</span></h4>
<ul><li>decir</li></ul>
<h2><span class="mw-headline">Portuguese</span></h2>
<p>falar</p>
</div>"#;

    #[test]
    fn test_heading_level_and_label() {
        let doc = Document::parse(
            r#"<h3><span class="mw-headline">Noun</span><span class="mw-editsection">[edit]</span></h3><div class="mw-heading mw-heading2"><h2 id="Spanish">Spanish</h2><span class="mw-editsection">[edit]</span></div><p>x</p>"#,
        )
        .unwrap();
        let nodes: Vec<_> = doc.root().children().collect();
        assert_eq!(heading_level(nodes[0]), Some(3));
        assert_eq!(heading_label(nodes[0]), "Noun");
        assert_eq!(heading_level(nodes[1]), Some(2));
        assert_eq!(heading_label(nodes[1]), "Spanish");
        assert_eq!(heading_level(nodes[2]), None);
    }

    #[test]
    fn test_isolates_span_up_to_next_language() {
        let doc = Document::parse(PAGE).unwrap();
        let span = isolate_language_section(&doc, "Spanish").unwrap();
        assert_eq!(span.level(), 2);
        let names: Vec<_> = span.nodes().iter().map(|el| el.name()).collect();
        assert_eq!(names, vec!["h3", "p", "h4", "ul"]);
        assert!(span.nodes().iter().all(|el| !el.text().contains("falar")));
    }

    #[test]
    fn test_last_language_runs_to_end_of_container() {
        let doc = Document::parse(PAGE).unwrap();
        let span = isolate_language_section(&doc, "Portuguese").unwrap();
        assert_eq!(span.nodes().len(), 1);
        assert_eq!(span.nodes()[0].text(), "falar");
    }

    #[test]
    fn test_match_is_exact_and_case_sensitive() {
        let doc = Document::parse(PAGE).unwrap();
        assert!(isolate_language_section(&doc, "spanish").is_none());
        assert!(isolate_language_section(&doc, "Span").is_none());
        assert!(isolate_language_section(&doc, "French").is_none());
    }

    #[test]
    fn test_language_heading_must_be_level_two() {
        let doc = Document::parse("<h3>Spanish</h3><p>x</p>").unwrap();
        assert!(isolate_language_section(&doc, "Spanish").is_none());
    }
}
