//! Per-language word-form extraction, selected by language code.
//!
//! Only Spanish has a table parser today. Every other language yields an
//! empty word-forms table.

use crate::classify::ClassifiedSpan;
use crate::conjugation::SpanishConjugation;
use crate::models::ConjugationTable;

pub trait InflectionStrategy: Send + Sync {
    /// The language code this strategy serves.
    fn language_code(&self) -> &'static str;

    fn extract_forms(&self, span: &ClassifiedSpan<'_>) -> ConjugationTable;
}

static STRATEGIES: &[&dyn InflectionStrategy] = &[&SpanishConjugation];

/// The registered strategy for `code`, if any.
pub fn strategy_for(code: &str) -> Option<&'static dyn InflectionStrategy> {
    STRATEGIES
        .iter()
        .copied()
        .find(|strategy| strategy.language_code() == code)
}
