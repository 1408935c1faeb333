use crate::theory::{
    degree_for, KeyContext, Mode, ModeDef, ParsedChord, PitchClass, RomanNumeral, MODE_TABLE,
};
use super::confidence::round4;
use super::functional::parse_symbols;
use super::result::ModalAnalysisResult;
use super::AnalysisError;

const FIT_WEIGHT: f64 = 0.4;
const CHARACTERISTIC_WEIGHT: f64 = 0.6;
const SCORE_EPSILON: f64 = 1e-9;

/// Detect the best-fitting church mode and tonic for a chord-symbol
/// sequence, independent of the functional pipeline. Intended for
/// progressions where functional evidence is weak or modal color is
/// strong.
pub fn analyze_modal_characteristics(
    symbols: &[&str],
    parent_key: Option<&str>,
) -> Result<ModalAnalysisResult, AnalysisError> {
    let chords = parse_symbols(symbols)?;
    let parent = match parent_key {
        Some(s) => Some(s.parse::<KeyContext>()?),
        None => None,
    };

    let tonic = detect_tonic(&chords);
    log::debug!("Modal tonic candidate {}", tonic);

    let mut observed: Vec<PitchClass> = Vec::new();
    for chord in &chords {
        for pc in chord.pitch_classes() {
            if !observed.contains(&pc) {
                observed.push(pc);
            }
        }
    }

    let mut best: Option<(f64, bool, &ModeDef)> = None;
    for mode in &MODE_TABLE.modes {
        let score = mode_score(mode, tonic, &observed);
        let preferred = parent.map_or(false, |p| implied_by_parent(mode, tonic, &p));
        let replace = match best {
            None => true,
            Some((best_score, best_preferred, _)) => {
                score > best_score + SCORE_EPSILON
                    || ((score - best_score).abs() <= SCORE_EPSILON
                        && preferred
                        && !best_preferred)
            }
        };
        if replace {
            best = Some((score, preferred, mode));
        }
    }
    // The table always has seven modes.
    let (score, _, mode) = best.expect("mode table is empty");
    log::debug!("Best mode {} {} (score {:.2})", tonic, mode.name, score);

    Ok(ModalAnalysisResult {
        tonic: tonic.name().to_string(),
        mode: mode.name.clone(),
        numerals: modal_numerals(&chords, tonic),
        confidence: round4(score.clamp(0.0, 1.0)),
        evidence: gather_evidence(&chords, tonic, mode),
    })
}

/// The first chord's root, unless a dominant approach into a different
/// final chord argues for the final root instead.
fn detect_tonic(chords: &[ParsedChord]) -> PitchClass {
    let first = chords[0].root;
    if chords.len() >= 2 {
        let last = chords[chords.len() - 1].root;
        let prev = chords[chords.len() - 2].root;
        if prev == last.transpose(7) && last != first {
            return last;
        }
    }
    first
}

/// Weighted blend of how much of the observed material sits inside the
/// mode's scale and how many of its characteristic degrees actually
/// appear. Ionian has no altered degrees, so its characteristic term
/// falls back to the scale fit.
fn mode_score(mode: &ModeDef, tonic: PitchClass, observed: &[PitchClass]) -> f64 {
    if observed.is_empty() {
        return 0.0;
    }
    let in_scale = observed
        .iter()
        .filter(|pc| mode.contains(pc.interval_from(tonic)))
        .count();
    let fit = in_scale as f64 / observed.len() as f64;

    let characteristic = if mode.characteristic.is_empty() {
        fit
    } else {
        let present = mode
            .characteristic
            .iter()
            .filter(|&&s| observed.iter().any(|pc| pc.interval_from(tonic) == s))
            .count();
        present as f64 / mode.characteristic.len() as f64
    };

    FIT_WEIGHT * fit + CHARACTERISTIC_WEIGHT * characteristic
}

/// Whether this mode at this tonic belongs to the given parent key,
/// e.g. D Dorian belongs to C major.
fn implied_by_parent(mode: &ModeDef, tonic: PitchClass, parent: &KeyContext) -> bool {
    let parent_major = match parent.mode {
        Mode::Major => parent.tonic,
        // Route minor keys through their relative major.
        Mode::Minor => parent.tonic.transpose(3),
    };
    tonic.interval_from(parent_major) == mode.parent_offset
}

/// Numerals relative to the detected tonic, spelled against the major
/// scale as modal convention has it (bVII in Mixolydian, bII in
/// Phrygian).
fn modal_numerals(chords: &[ParsedChord], tonic: PitchClass) -> Vec<String> {
    chords
        .iter()
        .map(|chord| {
            let interval = chord.root.interval_from(tonic);
            let (degree, accidental) = degree_for(Mode::Major, interval);
            RomanNumeral::new(degree, accidental, chord.quality(), &chord.extension).to_string()
        })
        .collect()
}

/// Name the chords that supplied each characteristic degree.
fn gather_evidence(chords: &[ParsedChord], tonic: PitchClass, mode: &ModeDef) -> Vec<String> {
    let mut evidence = Vec::new();
    for &semitone in &mode.characteristic {
        let pc = tonic.transpose(semitone as isize);
        for chord in chords {
            if chord.pitch_classes().contains(&pc) {
                evidence.push(format!(
                    "{} contains {}, the characteristic {} of {}",
                    chord.symbol,
                    pc,
                    alt_degree_label(semitone),
                    mode.name
                ));
            }
        }
    }
    evidence
}

/// Major-relative label for an altered degree, e.g. 10 -> "b7".
fn alt_degree_label(semitone: u8) -> String {
    let (degree, accidental) = degree_for(Mode::Major, semitone);
    let prefix = if accidental < 0 {
        "b".repeat(accidental.unsigned_abs())
    } else if accidental > 0 {
        "#".repeat(accidental as usize)
    } else {
        String::new()
    };
    format!("{}{}", prefix, degree)
}
