mod cadence;
mod chromatic;
mod confidence;
mod explain;
mod functional;
mod modal;
mod result;
mod session;

use thiserror::Error;

use crate::theory::{ChordParseError, KeyParseError};

pub use confidence::{
    CHROMATIC_PENALTY, DIATONIC_WEIGHT, STRONG_CADENCE_BONUS, STRONG_CADENCE_THRESHOLD,
    UNRESOLVED_PENALTY, WEAK_CADENCE_BONUS,
};
pub use functional::analyze_functionally;
pub use modal::analyze_modal_characteristics;
pub use result::{
    AnalyzedChord, Cadence, CadenceType, ChromaticElement, ChromaticType,
    FunctionalAnalysisResult, HarmonicFunction, ModalAnalysisResult, ProgressionType, Resolution,
};
pub use session::AnalysisSession;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No chords to analyze")]
    EmptyInput,

    #[error("Invalid chord `{symbol}` at position {position}")]
    Parse {
        symbol: String,
        position: usize,
        #[source]
        source: ChordParseError,
    },

    #[error(transparent)]
    Key(#[from] KeyParseError),
}
