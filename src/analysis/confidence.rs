use super::result::{AnalyzedChord, Cadence, ChromaticElement};

/// Scoring weights, kept as named constants so the heuristic stays
/// auditable and testable on its own.
pub const DIATONIC_WEIGHT: f64 = 0.85;
pub const STRONG_CADENCE_BONUS: f64 = 0.1;
pub const WEAK_CADENCE_BONUS: f64 = 0.05;
pub const STRONG_CADENCE_THRESHOLD: f64 = 0.8;
pub const CHROMATIC_PENALTY: f64 = 0.05;
pub const UNRESOLVED_PENALTY: f64 = 0.05;

/// Aggregate diatonic coverage, cadence strength and chromatic density
/// into one bounded score. Pure function of its arguments: identical
/// input always yields the identical score.
pub(crate) fn score_confidence(
    chords: &[AnalyzedChord],
    cadences: &[Cadence],
    elements: &[ChromaticElement],
) -> f64 {
    if chords.is_empty() {
        return 0.0;
    }
    let diatonic = chords.iter().filter(|c| !c.is_chromatic).count();
    let coverage = diatonic as f64 / chords.len() as f64;
    let mut score = coverage * DIATONIC_WEIGHT;

    let best_cadence = cadences.iter().map(|c| c.strength).fold(0.0, f64::max);
    if best_cadence >= STRONG_CADENCE_THRESHOLD {
        score += STRONG_CADENCE_BONUS;
    } else if best_cadence > 0.0 {
        score += WEAK_CADENCE_BONUS;
    }

    for element in elements {
        score -= CHROMATIC_PENALTY;
        if element.resolution.is_none() {
            score -= UNRESOLVED_PENALTY;
        }
    }

    round4(score.clamp(0.0, 1.0))
}

pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
