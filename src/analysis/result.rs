use serde::Serialize;
use std::fmt;
use crate::theory::ChordQuality;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Predominant,
    Dominant,
    Chromatic,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaticType {
    SecondaryDominant,
    BorrowedChord,
    ChromaticMediant,
    Neapolitan,
    /// Catch-all for chromatic chords the rule chain can't place.
    /// Chromatic chords always carry one of these five tags; an
    /// unclassifiable chord is never silently dropped.
    Chromatic,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceType {
    Authentic,
    Plagal,
    Deceptive,
    Half,
}

impl fmt::Display for CadenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CadenceType::Authentic => "Authentic",
            CadenceType::Plagal => "Plagal",
            CadenceType::Deceptive => "Deceptive",
            CadenceType::Half => "Half",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionType {
    JazzStandard,
    AuthenticCadence,
    PlagalCadence,
    DeceptiveCadence,
    HalfCadence,
    Other,
}

impl fmt::Display for ProgressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgressionType::JazzStandard => "jazz_standard",
            ProgressionType::AuthenticCadence => "authentic_cadence",
            ProgressionType::PlagalCadence => "plagal_cadence",
            ProgressionType::DeceptiveCadence => "deceptive_cadence",
            ProgressionType::HalfCadence => "half_cadence",
            ProgressionType::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// The chord a chromatic chord tonicizes or resolves to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Resolution {
    pub index: usize,
    pub numeral: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedChord {
    pub symbol: String,
    pub numeral: String,
    pub quality: ChordQuality,

    /// Diatonic scale degree (1-7); None for chromatic chords.
    pub degree: Option<usize>,
    pub function: HarmonicFunction,
    pub is_chromatic: bool,

    /// Set exactly when `is_chromatic` is true.
    pub chromatic_type: Option<ChromaticType>,
    pub resolution: Option<Resolution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cadence {
    pub kind: CadenceType,

    /// Chord indices the cadence spans, inclusive.
    pub window: (usize, usize),
    pub strength: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChromaticElement {
    pub index: usize,
    pub kind: ChromaticType,
    pub explanation: String,
    pub resolution: Option<Resolution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionalAnalysisResult {
    pub key: String,
    pub chords: Vec<AnalyzedChord>,
    pub cadences: Vec<Cadence>,
    pub chromatic_elements: Vec<ChromaticElement>,
    pub confidence: f64,
    pub progression_type: ProgressionType,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModalAnalysisResult {
    pub tonic: String,
    pub mode: String,
    pub numerals: Vec<String>,
    pub confidence: f64,
    pub evidence: Vec<String>,
}
