//! Conjugation table parser.
//!
//! Two phases per table: every header cell is scanned for mood and tense
//! keywords to settle the (mood, tense) axis, then every body row whose first
//! cell names a person writes its second cell into that axis. A row is only
//! written when the axis and the person are both known.

use crate::classify::ClassifiedSpan;
use crate::document::Element;
use crate::inflection::InflectionStrategy;
use crate::models::{ConjugationTable, Mood, Tense};
use crate::vocab::{mood_for_header, person_for_cell, tense_for_header};
use log::debug;

const CONJUGATION_CLASS: &str = "conjugation";

/// Parses one conjugation table.
pub fn parse_conjugation_table(table: &Element) -> ConjugationTable {
    let mut conjugation = ConjugationTable::new();
    let mut current_mood: Option<Mood> = None;
    let mut current_tense: Option<Tense> = None;

    let headers = table.find_all("th");
    if headers.is_empty() {
        return conjugation;
    }

    // Phase 1: header cells establish the axis.
    for header in headers {
        let header_text = header.text().trim().to_lowercase();
        if let Some(mood) = mood_for_header(&header_text) {
            current_mood = Some(mood);
            conjugation.ensure_mood(mood);
        }
        if let Some(mood) = current_mood {
            if let Some(tense) = tense_for_header(&header_text) {
                current_tense = Some(tense);
                conjugation.ensure_axis(mood, tense);
            }
        }
    }

    let (Some(mood), Some(tense)) = (current_mood, current_tense) else {
        debug!("Conjugation table has no complete mood/tense axis; skipping rows");
        return conjugation;
    };

    // Phase 2: body rows fill person cells.
    for row in table.find_all("tr") {
        let cells: Vec<&Element> = row
            .children()
            .filter(|cell| cell.is("th") || cell.is("td"))
            .collect();
        if cells.len() < 2 {
            continue;
        }
        let Some(person) = person_for_cell(&cells[0].text()) else {
            continue;
        };
        let form = cells[1].text().trim().to_string();
        if !form.is_empty() {
            conjugation.set(mood, tense, person, form);
        }
    }

    conjugation
}

fn is_conjugation_table(el: &Element) -> bool {
    el.is("table") && el.has_class(CONJUGATION_CLASS)
}

/// Spanish verb conjugation: every `table.conjugation` in the section,
/// including ones nested in inflection-table containers, merged in document
/// order with later cells overwriting earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanishConjugation;

impl InflectionStrategy for SpanishConjugation {
    fn language_code(&self) -> &'static str {
        "es"
    }

    fn extract_forms(&self, span: &ClassifiedSpan<'_>) -> ConjugationTable {
        let mut word_forms = ConjugationTable::new();
        let mut tables = 0usize;
        for item in span.content() {
            for table in item
                .node
                .self_and_descendants()
                .into_iter()
                .filter(|el| is_conjugation_table(el))
            {
                word_forms.merge(parse_conjugation_table(table));
                tables += 1;
            }
        }
        debug!(
            "Parsed {} conjugation tables into {} cells",
            tables,
            word_forms.cell_count()
        );
        word_forms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::document::Document;
    use crate::models::PersonKey;
    use crate::section::isolate_language_section;

    fn first_table(markup: &str) -> ConjugationTable {
        let doc = Document::parse(markup).unwrap();
        let table = doc.root().find(|el| el.is("table")).unwrap();
        parse_conjugation_table(table)
    }

    #[test]
    fn test_header_axis_then_person_rows() {
        let table = first_table(
            r#"<table class="conjugation">
<tr><th>indicative</th><th>present</th></tr>
<tr><td>yo</td><td>hablo</td></tr>
<tr><td>tú</td><td>hablas</td></tr>
<tr><td>él / ella / usted</td><td>habla</td></tr>
<tr><td>nosotros</td><td>hablamos</td></tr>
<tr><td>vosotros</td><td>habláis</td></tr>
<tr><td>ellos / ellas / ustedes</td><td>hablan</td></tr>
<tr><td>gerund</td><td>hablando</td></tr>
</table>"#,
        );
        assert_eq!(table.cell_count(), 6);
        assert_eq!(
            table.get(Mood::Indicative, Tense::Present, PersonKey::FirstSingular),
            Some("hablo")
        );
        assert_eq!(
            table.get(Mood::Indicative, Tense::Present, PersonKey::ThirdPlural),
            Some("hablan")
        );
    }

    #[test]
    fn test_tense_before_mood_leaves_cells_unset() {
        let table = first_table(
            r#"<table class="conjugation">
<tr><th>present</th><th>indicative</th></tr>
<tr><td>yo</td><td>hablo</td></tr>
</table>"#,
        );
        assert_eq!(table.cell_count(), 0);
        assert!(table.tenses(Mood::Indicative).is_some_and(|t| t.is_empty()));
    }

    #[test]
    fn test_table_without_headers_is_empty() {
        let table = first_table(
            r#"<table class="conjugation"><tr><td>yo</td><td>hablo</td></tr></table>"#,
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_conditional_header_sets_mood_and_tense() {
        let table = first_table(
            r#"<table class="conjugation"><tr><th>conditional</th></tr><tr><td>yo</td><td>hablaría</td></tr></table>"#,
        );
        assert_eq!(
            table.get(Mood::Conditional, Tense::Conditional, PersonKey::FirstSingular),
            Some("hablaría")
        );
    }

    #[test]
    fn test_last_axis_wins_within_a_table() {
        let table = first_table(
            r#"<table class="conjugation">
<tr><th>indicative</th><th>present</th><th>subjunctive</th><th>past</th></tr>
<tr><td>1s</td><td>hablara</td></tr>
</table>"#,
        );
        assert!(table.tenses(Mood::Indicative).is_some());
        assert_eq!(
            table.get(Mood::Subjunctive, Tense::Preterite, PersonKey::FirstSingular),
            Some("hablara")
        );
        assert_eq!(table.cell_count(), 1);
    }

    #[test]
    fn test_strategy_merges_tables_last_write_wins() {
        let doc = Document::parse(
            r#"<h2>Spanish</h2><h3>Verb</h3>
<table class="conjugation"><tr><th>indicative present</th></tr><tr><td>yo</td><td>hablo</td></tr><tr><td>tú</td><td>hablas</td></tr></table>
<div class="inflection-table"><table class="conjugation"><tr><th>indicative</th><th>present</th></tr><tr><td>yo</td><td>HABLO</td></tr></table>
<table class="other"><tr><th>indicative</th><th>future</th></tr><tr><td>yo</td><td>hablaré</td></tr></table></div>"#,
        )
        .unwrap();
        let span = isolate_language_section(&doc, "Spanish").unwrap();
        let forms = SpanishConjugation.extract_forms(&classify(&span));
        assert_eq!(
            forms.get(Mood::Indicative, Tense::Present, PersonKey::FirstSingular),
            Some("HABLO")
        );
        assert_eq!(
            forms.get(Mood::Indicative, Tense::Present, PersonKey::SecondSingular),
            Some("hablas")
        );
        assert_eq!(forms.get(Mood::Indicative, Tense::Future, PersonKey::FirstSingular), None);
    }
}
