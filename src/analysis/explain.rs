use crate::theory::KeyContext;
use super::result::{AnalyzedChord, Cadence, ChromaticElement};

/// Render the analysis as a prose summary: the numeral sequence, then
/// one sentence per cadence and per chromatic element.
pub(crate) fn render_explanation(
    key: &KeyContext,
    chords: &[AnalyzedChord],
    cadences: &[Cadence],
    elements: &[ChromaticElement],
) -> String {
    let numerals: Vec<&str> = chords.iter().map(|c| c.numeral.as_str()).collect();
    let mut out = format!("Functional analysis in {}: {}.", key, numerals.join(" - "));

    for cadence in cadences {
        out.push_str(&format!(
            " {} cadence between chords {} and {} (strength {:.2}).",
            cadence.kind,
            cadence.window.0 + 1,
            cadence.window.1 + 1,
            cadence.strength
        ));
    }

    for element in elements {
        out.push_str(&format!(
            " Chord {} is a chromatic element: {}.",
            element.index + 1,
            element.explanation
        ));
    }

    out
}
