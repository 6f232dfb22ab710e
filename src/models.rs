use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// --- Top Level ---

/// The typed lexical record produced for one lookup key in one language.
///
/// Every collection is always present, possibly empty. Maps and sets are
/// ordered so that serializing the same record twice yields identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalRecord {
    pub text: String,
    pub language_code: String,
    #[serde(default)]
    pub translations: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub ipa_transcriptions: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub word_class: WordClass,
    #[serde(default)]
    pub word_forms: ConjugationTable,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    pub etymology: Option<String>,
    #[serde(default)]
    pub related_words: Vec<String>,
    /// 1-based rank when the key came from a frequency list.
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

// --- Word Class ---

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Interjection,
    Article,
    Numeral,
    #[default]
    Unknown,
}

impl WordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordClass::Noun => "noun",
            WordClass::Verb => "verb",
            WordClass::Adjective => "adjective",
            WordClass::Adverb => "adverb",
            WordClass::Pronoun => "pronoun",
            WordClass::Preposition => "preposition",
            WordClass::Conjunction => "conjunction",
            WordClass::Interjection => "interjection",
            WordClass::Article => "article",
            WordClass::Numeral => "numeral",
            WordClass::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for WordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// --- Conjugation ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Indicative,
    Subjunctive,
    Imperative,
    Conditional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Present,
    Preterite,
    Imperfect,
    Future,
    Conditional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PersonKey {
    #[serde(rename = "1sg")]
    FirstSingular,
    #[serde(rename = "2sg")]
    SecondSingular,
    #[serde(rename = "3sg")]
    ThirdSingular,
    #[serde(rename = "1pl")]
    FirstPlural,
    #[serde(rename = "2pl")]
    SecondPlural,
    #[serde(rename = "3pl")]
    ThirdPlural,
}

impl PersonKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKey::FirstSingular => "1sg",
            PersonKey::SecondSingular => "2sg",
            PersonKey::ThirdSingular => "3sg",
            PersonKey::FirstPlural => "1pl",
            PersonKey::SecondPlural => "2pl",
            PersonKey::ThirdPlural => "3pl",
        }
    }
}

impl std::fmt::Display for PersonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub type PersonForms = BTreeMap<PersonKey, String>;

/// mood -> tense -> person -> surface form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConjugationTable {
    moods: BTreeMap<Mood, BTreeMap<Tense, PersonForms>>,
}

impl ConjugationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the mood entry if it is not there yet.
    pub fn ensure_mood(&mut self, mood: Mood) {
        self.moods.entry(mood).or_default();
    }

    /// Creates the (mood, tense) entry if it is not there yet.
    pub fn ensure_axis(&mut self, mood: Mood, tense: Tense) {
        self.moods.entry(mood).or_default().entry(tense).or_default();
    }

    pub fn set(&mut self, mood: Mood, tense: Tense, person: PersonKey, form: impl Into<String>) {
        self.moods
            .entry(mood)
            .or_default()
            .entry(tense)
            .or_default()
            .insert(person, form.into());
    }

    pub fn get(&self, mood: Mood, tense: Tense, person: PersonKey) -> Option<&str> {
        self.moods
            .get(&mood)
            .and_then(|tenses| tenses.get(&tense))
            .and_then(|persons| persons.get(&person))
            .map(String::as_str)
    }

    pub fn tenses(&self, mood: Mood) -> Option<&BTreeMap<Tense, PersonForms>> {
        self.moods.get(&mood)
    }

    /// Merges `other` into `self` by mood, then tense. A person cell present
    /// in both ends up with `other`'s form.
    pub fn merge(&mut self, other: ConjugationTable) {
        for (mood, tenses) in other.moods {
            let target = self.moods.entry(mood).or_default();
            for (tense, persons) in tenses {
                target.entry(tense).or_default().extend(persons);
            }
        }
    }

    /// True when no mood entry exists at all.
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }

    /// Number of populated person cells.
    pub fn cell_count(&self) -> usize {
        self.moods
            .values()
            .flat_map(|tenses| tenses.values())
            .map(|persons| persons.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_class_display_matches_serde_name() {
        assert_eq!(WordClass::default().to_string(), "unknown");
        for class in [WordClass::Noun, WordClass::Adverb, WordClass::Numeral] {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class));
        }
    }

    #[test]
    fn test_merge_overwrites_person_cells_only() {
        let mut first = ConjugationTable::new();
        first.set(Mood::Indicative, Tense::Present, PersonKey::FirstSingular, "hablo");
        first.set(Mood::Indicative, Tense::Present, PersonKey::SecondSingular, "hablas");

        let mut second = ConjugationTable::new();
        second.set(Mood::Indicative, Tense::Present, PersonKey::FirstSingular, "HABLO");
        second.set(Mood::Subjunctive, Tense::Present, PersonKey::FirstSingular, "hable");

        first.merge(second);
        assert_eq!(
            first.get(Mood::Indicative, Tense::Present, PersonKey::FirstSingular),
            Some("HABLO")
        );
        assert_eq!(
            first.get(Mood::Indicative, Tense::Present, PersonKey::SecondSingular),
            Some("hablas")
        );
        assert_eq!(first.cell_count(), 3);
    }

    #[test]
    fn test_conjugation_table_serializes_with_person_keys() {
        let mut table = ConjugationTable::new();
        table.set(Mood::Indicative, Tense::Present, PersonKey::FirstSingular, "hablo");
        table.ensure_mood(Mood::Imperative);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"indicative":{"present":{"1sg":"hablo"}},"imperative":{}}"#
        );
    }
}
