//! Symbolic harmony analysis: parse chord symbols, resolve a key,
//! map scale degrees, classify chromatic chords, detect cadences and
//! score the whole reading. A separate modal analyzer detects church
//! modes from the same chord input.

pub mod analysis;
pub mod theory;

pub use analysis::{
    analyze_functionally, analyze_modal_characteristics, AnalysisError, AnalysisSession,
    FunctionalAnalysisResult, ModalAnalysisResult,
};
pub use theory::{KeyContext, Mode, ParsedChord, PitchClass, RomanNumeral};
