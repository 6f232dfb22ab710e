//! Single-pass section classifier.
//!
//! Walks a language section left to right, carrying the current part of
//! speech and the current subsection kind forward until a heading at the
//! relevant level re-triggers classification. The input tree is never
//! touched; the result is a flat sequence of tagged items borrowing from it.

use crate::document::Element;
use crate::models::WordClass;
use crate::section::{SectionSpan, heading_label, heading_level};
use crate::vocab::word_class_for_heading;

/// The subsection a node sits in, independent of part of speech.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Pronunciation,
    Etymology,
    Translations,
    Synonyms,
    Antonyms,
    DerivedTerms,
    UsageNotes,
    #[default]
    Unclassified,
}

impl SectionKind {
    /// Maps a heading label to a subsection kind.
    pub fn from_label(label: &str) -> SectionKind {
        let lower = label.trim().to_lowercase();
        if lower == "pronunciation" || lower.starts_with("pronunciation ") {
            SectionKind::Pronunciation
        } else if is_etymology_label(&lower) {
            SectionKind::Etymology
        } else if lower == "translations" {
            SectionKind::Translations
        } else if lower == "synonyms" {
            SectionKind::Synonyms
        } else if lower == "antonyms" {
            SectionKind::Antonyms
        } else if lower.contains("derived terms") || lower.contains("related terms") {
            SectionKind::DerivedTerms
        } else if lower == "usage notes" {
            SectionKind::UsageNotes
        } else {
            SectionKind::Unclassified
        }
    }
}

/// The combined classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationTag {
    Pronunciation,
    Etymology,
    PartOfSpeech(WordClass),
    Translations,
    Synonyms,
    Antonyms,
    DerivedTerms,
    UsageNotes,
    Unclassified,
}

/// State carried forward by the classifier and stamped on every item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SectionContext {
    pub pos: Option<WordClass>,
    pub section: SectionKind,
}

impl SectionContext {
    pub fn tag(&self) -> ClassificationTag {
        match (self.section, self.pos) {
            (SectionKind::Pronunciation, _) => ClassificationTag::Pronunciation,
            (SectionKind::Etymology, _) => ClassificationTag::Etymology,
            (SectionKind::Translations, _) => ClassificationTag::Translations,
            (SectionKind::Synonyms, _) => ClassificationTag::Synonyms,
            (SectionKind::Antonyms, _) => ClassificationTag::Antonyms,
            (SectionKind::DerivedTerms, _) => ClassificationTag::DerivedTerms,
            (SectionKind::UsageNotes, _) => ClassificationTag::UsageNotes,
            (SectionKind::Unclassified, Some(pos)) => ClassificationTag::PartOfSpeech(pos),
            (SectionKind::Unclassified, None) => ClassificationTag::Unclassified,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadingItem<'a> {
    pub node: &'a Element,
    pub level: u8,
    pub label: String,
    /// Context in effect after this heading was applied.
    pub context: SectionContext,
}

#[derive(Debug, Clone)]
pub struct ContentItem<'a> {
    pub node: &'a Element,
    pub context: SectionContext,
}

#[derive(Debug, Clone)]
pub enum SpanItem<'a> {
    Heading(HeadingItem<'a>),
    Content(ContentItem<'a>),
}

/// A language section with every node annotated.
#[derive(Debug, Clone)]
pub struct ClassifiedSpan<'a> {
    items: Vec<SpanItem<'a>>,
}

impl<'a> ClassifiedSpan<'a> {
    pub fn content(&self) -> impl Iterator<Item = &ContentItem<'a>> {
        self.items.iter().filter_map(|item| match item {
            SpanItem::Content(c) => Some(c),
            SpanItem::Heading(_) => None,
        })
    }

    /// For every heading accepted by `pred`, the content nodes that follow it
    /// up to the next heading of the same or a shallower level.
    pub fn sections(&self, pred: impl Fn(&HeadingItem<'a>) -> bool) -> Vec<Vec<&'a Element>> {
        let mut out = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            let SpanItem::Heading(heading) = item else {
                continue;
            };
            if !pred(heading) {
                continue;
            }
            let mut nodes = Vec::new();
            for next in &self.items[index + 1..] {
                match next {
                    SpanItem::Heading(h) if h.level <= heading.level => break,
                    SpanItem::Heading(_) => {}
                    SpanItem::Content(c) => nodes.push(c.node),
                }
            }
            out.push(nodes);
        }
        out
    }

    /// Sections opened by a heading that switched classification to `kind`.
    /// Deeper headings that merely inherit `kind` do not open a new one.
    pub fn sections_of(&self, kind: SectionKind) -> Vec<Vec<&'a Element>> {
        self.sections(|h| h.context.section == kind && SectionKind::from_label(&h.label) == kind)
    }
}

fn is_etymology_label(lower: &str) -> bool {
    lower == "etymology" || lower.starts_with("etymology ")
}

fn is_numbered_etymology(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    lower
        .strip_prefix("etymology ")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Annotates every node of `span`.
///
/// Part-of-speech headings sit one level below the language heading, their
/// subsections one level deeper still. Under a numbered "Etymology N" heading
/// both shift one level deeper until the next heading at the first level.
pub fn classify<'a>(span: &SectionSpan<'a>) -> ClassifiedSpan<'a> {
    let base_level = span.level() + 1;
    let mut pos_level = base_level;
    let mut context = SectionContext::default();
    let mut items = Vec::with_capacity(span.nodes().len());

    for &node in span.nodes() {
        let Some(level) = heading_level(node) else {
            items.push(SpanItem::Content(ContentItem { node, context }));
            continue;
        };
        let label = heading_label(node);

        if level == base_level {
            pos_level = if is_numbered_etymology(&label) {
                base_level + 1
            } else {
                base_level
            };
        }

        if level == pos_level {
            context = enter_pos_level(&label);
        } else if level == pos_level + 1 {
            context.section = SectionKind::from_label(&label);
        } else if level < pos_level {
            context = SectionContext {
                pos: None,
                section: SectionKind::from_label(&label),
            };
        }

        items.push(SpanItem::Heading(HeadingItem {
            node,
            level,
            label,
            context,
        }));
    }

    ClassifiedSpan { items }
}

fn enter_pos_level(label: &str) -> SectionContext {
    let section = SectionKind::from_label(label);
    if matches!(section, SectionKind::Pronunciation | SectionKind::Etymology) {
        return SectionContext { pos: None, section };
    }
    match word_class_for_heading(label) {
        Some(pos) => SectionContext {
            pos: Some(pos),
            section: SectionKind::Unclassified,
        },
        None => SectionContext { pos: None, section },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::section::isolate_language_section;

    fn classify_markup(markup: &str) -> Vec<(String, ClassificationTag)> {
        let doc = Document::parse(markup).unwrap();
        let span = isolate_language_section(&doc, "Spanish").unwrap();
        classify(&span)
            .content()
            .map(|c| (c.node.text().trim().to_string(), c.context.tag()))
            .collect()
    }

    #[test]
    fn test_tags_carry_forward_until_next_heading() {
        let tags = classify_markup(
            "<h2>Spanish</h2>\
             <h3>Pronunciation</h3><ul><li>ipa</li></ul>\
             <h3>Noun</h3><p>head</p><ol><li>def</li></ol>\
             <h4>Synonyms</h4><ul><li>syn</li></ul><p>still syn</p>\
             <h4>Declension</h4><table><tr><td>x</td></tr></table>\
             <h3>Verb</h3><ol><li>v</li></ol>",
        );
        assert_eq!(
            tags,
            vec![
                ("ipa".to_string(), ClassificationTag::Pronunciation),
                ("head".to_string(), ClassificationTag::PartOfSpeech(WordClass::Noun)),
                ("def".to_string(), ClassificationTag::PartOfSpeech(WordClass::Noun)),
                ("syn".to_string(), ClassificationTag::Synonyms),
                ("still syn".to_string(), ClassificationTag::Synonyms),
                ("x".to_string(), ClassificationTag::PartOfSpeech(WordClass::Noun)),
                ("v".to_string(), ClassificationTag::PartOfSpeech(WordClass::Verb)),
            ]
        );
    }

    #[test]
    fn test_subsection_vocabulary() {
        assert_eq!(SectionKind::from_label("Translations"), SectionKind::Translations);
        assert_eq!(SectionKind::from_label("Synonyms"), SectionKind::Synonyms);
        assert_eq!(SectionKind::from_label("Antonyms"), SectionKind::Antonyms);
        assert_eq!(SectionKind::from_label("Derived terms"), SectionKind::DerivedTerms);
        assert_eq!(SectionKind::from_label("Related terms"), SectionKind::DerivedTerms);
        assert_eq!(SectionKind::from_label("Usage notes"), SectionKind::UsageNotes);
        assert_eq!(SectionKind::from_label("Conjugation"), SectionKind::Unclassified);
    }

    #[test]
    fn test_non_pos_heading_clears_part_of_speech() {
        let tags = classify_markup(
            "<h2>Spanish</h2><h3>Adjective</h3><ol><li>a</li></ol>\
             <h3>References</h3><ol><li>ref</li></ol>",
        );
        assert_eq!(tags[0].1, ClassificationTag::PartOfSpeech(WordClass::Adjective));
        assert_eq!(tags[1].1, ClassificationTag::Unclassified);
    }

    #[test]
    fn test_numbered_etymologies_shift_levels() {
        let tags = classify_markup(
            "<h2>Spanish</h2>\
             <h3>Etymology 1</h3><p>from Latin</p>\
             <h4>Noun</h4><ol><li>n</li></ol>\
             <h5>Antonyms</h5><ul><li>ant</li></ul>\
             <h3>Etymology 2</h3><p>other</p>\
             <h4>Verb</h4><ol><li>v</li></ol>",
        );
        assert_eq!(tags[0].1, ClassificationTag::Etymology);
        assert_eq!(tags[1].1, ClassificationTag::PartOfSpeech(WordClass::Noun));
        assert_eq!(tags[2].1, ClassificationTag::Antonyms);
        assert_eq!(tags[3].1, ClassificationTag::Etymology);
        assert_eq!(tags[4].1, ClassificationTag::PartOfSpeech(WordClass::Verb));
    }

    #[test]
    fn test_sections_stop_at_same_or_shallower_heading() {
        let doc = Document::parse(
            "<h2>Spanish</h2><h3>Verb</h3><ol><li>v</li></ol>\
             <h4>Translations</h4><div>t1</div><h5>Notes</h5><div>t2</div>\
             <h4>Synonyms</h4><ul><li>s</li></ul>",
        )
        .unwrap();
        let span = isolate_language_section(&doc, "Spanish").unwrap();
        let classified = classify(&span);
        let sections = classified.sections_of(SectionKind::Translations);
        assert_eq!(sections.len(), 1);
        let texts: Vec<_> = sections[0].iter().map(|el| el.text()).collect();
        assert_eq!(texts, vec!["t1", "t2"]);
    }
}
