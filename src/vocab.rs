//! Frozen vocabularies for heading classification, conjugation axes and usage tags.

use crate::models::{Mood, PersonKey, Tense, WordClass};

/// Part-of-speech heading keywords. A heading matches on substring; when
/// several entries match ("Pronoun" also contains "noun") the longest wins.
pub const WORD_CLASSES: &[(&str, WordClass)] = &[
    ("noun", WordClass::Noun),
    ("verb", WordClass::Verb),
    ("adjective", WordClass::Adjective),
    ("adverb", WordClass::Adverb),
    ("pronoun", WordClass::Pronoun),
    ("preposition", WordClass::Preposition),
    ("conjunction", WordClass::Conjunction),
    ("interjection", WordClass::Interjection),
    ("article", WordClass::Article),
    ("numeral", WordClass::Numeral),
];

/// Header cell keywords that open a mood.
pub const MOODS: &[(&str, Mood)] = &[
    ("indicative", Mood::Indicative),
    ("subjunctive", Mood::Subjunctive),
    ("imperative", Mood::Imperative),
    ("conditional", Mood::Conditional),
];

/// Header cell keywords that open a tense, tried in order.
pub const TENSES: &[(&str, Tense)] = &[
    ("present", Tense::Present),
    ("preterite", Tense::Preterite),
    ("past", Tense::Preterite),
    ("imperfect", Tense::Imperfect),
    ("future", Tense::Future),
    ("conditional", Tense::Conditional),
];

/// Multi-word person labels, matched against the normalized cell text before
/// single tokens so that "you all" is not read as "you".
pub const PERSON_PHRASES: &[(&str, PersonKey)] = &[
    ("first person singular", PersonKey::FirstSingular),
    ("second person singular", PersonKey::SecondSingular),
    ("third person singular", PersonKey::ThirdSingular),
    ("first person plural", PersonKey::FirstPlural),
    ("second person plural", PersonKey::SecondPlural),
    ("third person plural", PersonKey::ThirdPlural),
    ("you all", PersonKey::SecondPlural),
];

/// Single-token person labels: pronouns and abbreviations.
pub const PERSON_TOKENS: &[(&str, PersonKey)] = &[
    ("yo", PersonKey::FirstSingular),
    ("i", PersonKey::FirstSingular),
    ("1s", PersonKey::FirstSingular),
    ("1sg", PersonKey::FirstSingular),
    ("tú", PersonKey::SecondSingular),
    ("tu", PersonKey::SecondSingular),
    ("vos", PersonKey::SecondSingular),
    ("you", PersonKey::SecondSingular),
    ("2s", PersonKey::SecondSingular),
    ("2sg", PersonKey::SecondSingular),
    ("él", PersonKey::ThirdSingular),
    ("ella", PersonKey::ThirdSingular),
    ("ello", PersonKey::ThirdSingular),
    ("usted", PersonKey::ThirdSingular),
    ("he", PersonKey::ThirdSingular),
    ("she", PersonKey::ThirdSingular),
    ("it", PersonKey::ThirdSingular),
    ("3s", PersonKey::ThirdSingular),
    ("3sg", PersonKey::ThirdSingular),
    ("nosotros", PersonKey::FirstPlural),
    ("nosotras", PersonKey::FirstPlural),
    ("we", PersonKey::FirstPlural),
    ("1p", PersonKey::FirstPlural),
    ("1pl", PersonKey::FirstPlural),
    ("vosotros", PersonKey::SecondPlural),
    ("vosotras", PersonKey::SecondPlural),
    ("2p", PersonKey::SecondPlural),
    ("2pl", PersonKey::SecondPlural),
    ("ellos", PersonKey::ThirdPlural),
    ("ellas", PersonKey::ThirdPlural),
    ("ustedes", PersonKey::ThirdPlural),
    ("they", PersonKey::ThirdPlural),
    ("3p", PersonKey::ThirdPlural),
    ("3pl", PersonKey::ThirdPlural),
];

/// Usage-register words collected into a record's tags.
pub const USAGE_TAGS: &[&str] = &[
    "formal",
    "informal",
    "colloquial",
    "slang",
    "archaic",
    "literary",
    "regional",
    "technical",
    "vulgar",
    "offensive",
];

/// Prefix marking a cross-reference link in synonym lists.
pub const THESAURUS_PREFIX: &str = "Thesaurus:";

pub fn word_class_for_heading(label: &str) -> Option<WordClass> {
    let lower = label.to_lowercase();
    WORD_CLASSES
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .max_by_key(|(keyword, _)| keyword.len())
        .map(|&(_, class)| class)
}

pub fn mood_for_header(lower: &str) -> Option<Mood> {
    MOODS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, mood)| mood)
}

pub fn tense_for_header(lower: &str) -> Option<Tense> {
    TENSES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, tense)| tense)
}

pub fn person_for_cell(text: &str) -> Option<PersonKey> {
    let normalized = text
        .to_lowercase()
        .replace(['/', ',', ';', '(', ')', '-'], " ");
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(&(_, person)) = PERSON_PHRASES
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
    {
        return Some(person);
    }
    let tokens: Vec<&str> = normalized.split(' ').collect();
    PERSON_TOKENS
        .iter()
        .find(|(token, _)| tokens.contains(token))
        .map(|&(_, person)| person)
}

/// Usage tags appearing as whole words in `text`.
pub fn usage_tags_in(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    USAGE_TAGS
        .iter()
        .copied()
        .filter(|tag| words.contains(tag))
        .collect()
}
