//! Field extractors.
//!
//! Each extractor is a total function over a classified language section:
//! missing sections, lists or links yield an empty value, never an error.
//! They only read the classified span and can run in any order.

use crate::classify::{ClassifiedSpan, SectionKind};
use crate::document::Element;
use crate::inflection::InflectionStrategy;
use crate::languages::language_code;
use crate::models::{ConjugationTable, WordClass};
use crate::vocab::{THESAURUS_PREFIX, usage_tags_in};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static IPA_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\[\]]").unwrap());

/// Raw extractor output, before deduplication and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub word_class: Option<WordClass>,
    pub ipa_transcriptions: Vec<String>,
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
    pub translations: BTreeMap<String, Vec<String>>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub related_words: Vec<String>,
    pub etymology: Option<String>,
    pub tags: Vec<String>,
    pub word_forms: Option<ConjugationTable>,
}

/// Runs every extractor over `span`. Word forms are only extracted when a
/// strategy is registered for the target language.
pub fn extract_fields(
    span: &ClassifiedSpan<'_>,
    inflection: Option<&dyn InflectionStrategy>,
) -> ExtractedFields {
    ExtractedFields {
        word_class: word_class(span),
        ipa_transcriptions: pronunciations(span),
        definitions: definitions(span),
        examples: examples(span),
        translations: translations(span),
        synonyms: synonyms(span),
        antonyms: antonyms(span),
        related_words: related_words(span),
        etymology: etymology(span),
        tags: tags(span),
        word_forms: inflection.map(|strategy| strategy.extract_forms(span)),
    }
}

/// Collapses runs of whitespace to one space and trims.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn is_list(el: &Element) -> bool {
    el.is("ul") || el.is("ol") || el.is("dl")
}

/// Elements under `li` that are not inside a nested list.
fn own_descendants(li: &Element) -> Vec<&Element> {
    li.descendants_until(is_list)
}

/// `node` itself if it matches, else the outermost matching descendants.
fn outermost<'a>(node: &'a Element, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
    if pred(node) {
        return vec![node];
    }
    node.children()
        .flat_map(|child| outermost(child, pred))
        .collect()
}

/// The part of speech of the first node that has one.
pub fn word_class(span: &ClassifiedSpan<'_>) -> Option<WordClass> {
    span.content().find_map(|item| item.context.pos)
}

/// IPA transcriptions from the first bullet list of each pronunciation
/// section, delimiters stripped, in document order.
pub fn pronunciations(span: &ClassifiedSpan<'_>) -> Vec<String> {
    let mut ipa = Vec::new();
    for section in span.sections_of(SectionKind::Pronunciation) {
        let Some(list) = section.iter().find(|el| el.is("ul")) else {
            continue;
        };
        for li in list.find_all("li") {
            let Some(notation) = own_descendants(li)
                .into_iter()
                .find(|el| el.is("span") && el.has_class("IPA"))
            else {
                continue;
            };
            let raw = notation.text();
            let text = IPA_DELIMITERS.replace_all(raw.trim(), "");
            let text = text.trim();
            if !text.is_empty() {
                ipa.push(text.to_string());
            }
        }
    }
    ipa
}

/// Senses from ordered lists under a part of speech. Items carrying a nested
/// list hold examples rather than a plain sense and are skipped.
pub fn definitions(span: &ClassifiedSpan<'_>) -> Vec<String> {
    let mut definitions = Vec::new();
    for item in span.content() {
        if item.context.pos.is_none() || !item.node.is("ol") {
            continue;
        }
        for li in item.node.children().filter(|el| el.is("li")) {
            if li.contains(is_list) {
                continue;
            }
            let text = PARENTHETICAL.replace_all(&li.text(), "").into_owned();
            let text = collapse_whitespace(&text);
            if !text.is_empty() {
                definitions.push(text);
            }
        }
    }
    definitions
}

/// Example sentences: the `dd` entries nested under sense items, plus the
/// items of citation lists.
pub fn examples(span: &ClassifiedSpan<'_>) -> Vec<String> {
    let mut examples = Vec::new();
    for item in span.content() {
        let node = item.node;
        if node.is("ol") {
            for li in node.children().filter(|el| el.is("li")) {
                let Some(dl) = li.find(|el| el.is("dl")) else {
                    continue;
                };
                for dd in dl.find_all("dd") {
                    let text = collapse_whitespace(&dd.text());
                    if !text.is_empty() {
                        examples.push(text);
                    }
                }
            }
        }
        if node.is("ul") && node.has_class("citations") {
            for li in node.find_all("li") {
                let text = li.text().trim().to_string();
                if !text.is_empty() {
                    examples.push(text);
                }
            }
        }
    }
    examples
}

/// Language name of a translation row, taken from its `a.language` link.
fn translation_language(li: &Element) -> Option<String> {
    own_descendants(li)
        .into_iter()
        .find(|el| el.is("a") && el.has_class("language"))
        .map(|link| link.text().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Surface forms keyed by language code. Rows without a language link or
/// whose language cannot be resolved are dropped; repeated codes accumulate.
pub fn translations(span: &ClassifiedSpan<'_>) -> BTreeMap<String, Vec<String>> {
    let mut translations: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let is_container = |el: &Element| el.has_class("translations");
    for section in span.sections_of(SectionKind::Translations) {
        for node in section {
            for container in outermost(node, &is_container) {
                for li in container.find_all("li") {
                    let Some(name) = translation_language(li) else {
                        continue;
                    };
                    let Some(code) = language_code(&name) else {
                        debug!("Dropping translations for unknown language '{}'", name);
                        continue;
                    };
                    let forms: Vec<String> = own_descendants(li)
                        .into_iter()
                        .filter(|el| el.is("span") && el.has_attr("lang"))
                        .map(|el| el.text().trim().to_string())
                        .filter(|form| !form.is_empty())
                        .collect();
                    if !forms.is_empty() {
                        translations.entry(code.to_string()).or_default().extend(forms);
                    }
                }
            }
        }
    }
    translations
}

/// Link texts from the first bullet list of every section of `kind`.
fn linked_terms(span: &ClassifiedSpan<'_>, kind: SectionKind) -> Vec<String> {
    let mut terms = Vec::new();
    for section in span.sections_of(kind) {
        let Some(list) = section
            .iter()
            .find_map(|el| if el.is("ul") { Some(*el) } else { el.find(|e| e.is("ul")) })
        else {
            continue;
        };
        for li in list.find_all("li") {
            for link in own_descendants(li).into_iter().filter(|el| el.is("a")) {
                let term = link.text().trim().to_string();
                if !term.is_empty() {
                    terms.push(term);
                }
            }
        }
    }
    terms
}

pub fn synonyms(span: &ClassifiedSpan<'_>) -> Vec<String> {
    linked_terms(span, SectionKind::Synonyms)
        .into_iter()
        .filter(|term| !term.starts_with(THESAURUS_PREFIX))
        .collect()
}

pub fn antonyms(span: &ClassifiedSpan<'_>) -> Vec<String> {
    linked_terms(span, SectionKind::Antonyms)
}

/// Derived and related terms.
pub fn related_words(span: &ClassifiedSpan<'_>) -> Vec<String> {
    linked_terms(span, SectionKind::DerivedTerms)
}

/// The first paragraph under an etymology heading.
pub fn etymology(span: &ClassifiedSpan<'_>) -> Option<String> {
    span.sections_of(SectionKind::Etymology)
        .into_iter()
        .find_map(|section| section.into_iter().find(|el| el.is("p")))
        .map(|p| collapse_whitespace(&p.text()))
        .filter(|text| !text.is_empty())
}

/// Usage-register tags from usage-note paragraphs and from parenthesized
/// labels inside ordered-list items.
pub fn tags(span: &ClassifiedSpan<'_>) -> Vec<String> {
    let mut tags = BTreeSet::new();

    for section in span.sections_of(SectionKind::UsageNotes) {
        for paragraph in section.into_iter().filter(|el| el.is("p")) {
            tags.extend(usage_tags_in(&paragraph.text()));
        }
    }

    for item in span.content().filter(|item| item.node.is("ol")) {
        for li in item.node.find_all("li") {
            let text = li.text();
            for label in PARENTHETICAL.find_iter(&text) {
                tags.extend(usage_tags_in(label.as_str()));
            }
        }
    }

    tags.into_iter().map(str::to_string).collect()
}
