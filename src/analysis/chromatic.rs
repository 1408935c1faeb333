use crate::theory::{degree_for, ChordQuality, KeyContext, ParsedChord, RomanNumeral, Triad};
use super::result::{AnalyzedChord, ChromaticElement, ChromaticType, Resolution};

struct Classification {
    kind: ChromaticType,
    numeral: Option<String>,
    explanation: String,
    resolution: Option<Resolution>,
}

/// Classify every chord the degree mapper flagged non-diatonic. The
/// rules run in a fixed priority order and the first match wins; the
/// secondary-dominant test deliberately fires before the borrowed and
/// mediant tests, so some borrowed chords read as secondary dominants.
/// Nothing falls through: the last rule is a catch-all.
pub(crate) fn classify_chromatic(
    chords: &[ParsedChord],
    key: &KeyContext,
    analyzed: &mut [AnalyzedChord],
) -> Vec<ChromaticElement> {
    let mut elements = Vec::new();
    for (index, chord) in chords.iter().enumerate() {
        if !analyzed[index].is_chromatic {
            continue;
        }
        let classification = try_secondary_dominant(index, chord, key, chords)
            .or_else(|| try_borrowed(chord, key))
            .or_else(|| try_chromatic_mediant(chord, key))
            .or_else(|| try_neapolitan(chord, key))
            .unwrap_or_else(|| fallback(chord, key));

        let slot = &mut analyzed[index];
        slot.chromatic_type = Some(classification.kind);
        slot.resolution = classification.resolution.clone();
        if let Some(numeral) = classification.numeral {
            slot.numeral = numeral;
        }
        elements.push(ChromaticElement {
            index,
            kind: classification.kind,
            explanation: classification.explanation,
            resolution: classification.resolution,
        });
    }
    elements
}

/// A dominant seventh or plain major triad a perfect fifth above a
/// diatonic degree root reads as the dominant of that degree.
fn try_secondary_dominant(
    index: usize,
    chord: &ParsedChord,
    key: &KeyContext,
    chords: &[ParsedChord],
) -> Option<Classification> {
    let is_plain_major = chord.triad == Triad::Major && chord.seventh.is_none();
    if !chord.is_dominant_seventh() && !is_plain_major {
        return None;
    }
    let target = chord.root.transpose(-7);
    let degree = key.degree_of(target)?;
    let target_quality = key.degree_quality(degree);
    if target_quality == ChordQuality::Diminished {
        return None;
    }
    let target_numeral = RomanNumeral::plain(degree, target_quality).to_string();
    let numeral = if chord.is_dominant_seventh() {
        format!("V7/{}", target_numeral)
    } else {
        format!("V/{}", target_numeral)
    };
    let resolution = chords
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, c)| c.root == target)
        .map(|(i, _)| Resolution {
            index: i,
            numeral: target_numeral.clone(),
        });
    Some(Classification {
        kind: ChromaticType::SecondaryDominant,
        numeral: Some(numeral),
        explanation: format!(
            "{} is a secondary dominant that tonicizes {}",
            chord.symbol, target_numeral
        ),
        resolution,
    })
}

/// Root and quality match a degree of the parallel mode.
fn try_borrowed(chord: &ParsedChord, key: &KeyContext) -> Option<Classification> {
    let parallel = key.mode.parallel();
    let interval = chord.root.interval_from(key.tonic);
    let pos = parallel.intervals().iter().position(|&s| s == interval)?;
    if parallel.qualities()[pos] != chord.quality() {
        return None;
    }
    let (degree, accidental) = degree_for(key.mode, interval);
    let numeral = RomanNumeral::new(degree, accidental, chord.quality(), &chord.extension);
    Some(Classification {
        kind: ChromaticType::BorrowedChord,
        numeral: Some(numeral.to_string()),
        explanation: format!(
            "{} is borrowed from the parallel {}",
            chord.symbol, parallel
        ),
        resolution: None,
    })
}

/// A major or minor triad whose root is a third from the tonic.
fn try_chromatic_mediant(chord: &ParsedChord, key: &KeyContext) -> Option<Classification> {
    let interval = chord.root.interval_from(key.tonic);
    if ![3, 4, 8, 9].contains(&interval) {
        return None;
    }
    if !matches!(chord.quality(), ChordQuality::Major | ChordQuality::Minor) {
        return None;
    }
    let (degree, accidental) = degree_for(key.mode, interval);
    let numeral = RomanNumeral::new(degree, accidental, chord.quality(), &chord.extension);
    Some(Classification {
        kind: ChromaticType::ChromaticMediant,
        numeral: Some(numeral.to_string()),
        explanation: format!(
            "{} is a chromatic mediant, a third away from the tonic",
            chord.symbol
        ),
        resolution: None,
    })
}

fn try_neapolitan(chord: &ParsedChord, key: &KeyContext) -> Option<Classification> {
    if chord.root.interval_from(key.tonic) != 1 {
        return None;
    }
    if chord.triad != Triad::Major || chord.seventh.is_some() {
        return None;
    }
    let numeral = RomanNumeral::new(2, -1, ChordQuality::Major, &chord.extension);
    Some(Classification {
        kind: ChromaticType::Neapolitan,
        numeral: Some(numeral.to_string()),
        explanation: format!(
            "{} is a Neapolitan chord built on the flattened second degree",
            chord.symbol
        ),
        resolution: None,
    })
}

fn fallback(chord: &ParsedChord, key: &KeyContext) -> Classification {
    Classification {
        kind: ChromaticType::Chromatic,
        numeral: None,
        explanation: format!("{} is chromatic and falls outside {}", chord.symbol, key),
        resolution: None,
    }
}
