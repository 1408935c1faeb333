use crate::theory::{degree_for, KeyContext, ParsedChord, RomanNumeral};
use super::cadence::{classify_progression, detect_cadences};
use super::chromatic::classify_chromatic;
use super::confidence::score_confidence;
use super::explain::render_explanation;
use super::result::{AnalyzedChord, FunctionalAnalysisResult, HarmonicFunction};
use super::AnalysisError;

/// Run the full functional pipeline over a chord-symbol sequence:
/// parse, resolve the key, map scale degrees, classify chromatic
/// chords, detect cadences, score and explain.
pub fn analyze_functionally(
    symbols: &[&str],
    parent_key: Option<&str>,
) -> Result<FunctionalAnalysisResult, AnalysisError> {
    let chords = parse_symbols(symbols)?;
    let key = match parent_key {
        Some(s) => s.parse::<KeyContext>()?,
        None => KeyContext::infer(&chords),
    };
    log::debug!("Analyzing {} chords in {}", chords.len(), key);

    let mut analyzed = map_degrees(&chords, &key);
    let chromatic_elements = classify_chromatic(&chords, &key, &mut analyzed);
    let cadences = detect_cadences(&analyzed);
    let progression_type = classify_progression(&analyzed, &cadences);
    let confidence = score_confidence(&analyzed, &cadences, &chromatic_elements);
    let explanation = render_explanation(&key, &analyzed, &cadences, &chromatic_elements);
    log::debug!(
        "Found {} cadences and {} chromatic elements, confidence {:.2}",
        cadences.len(),
        chromatic_elements.len(),
        confidence
    );

    Ok(FunctionalAnalysisResult {
        key: key.to_string(),
        chords: analyzed,
        cadences,
        chromatic_elements,
        confidence,
        progression_type,
        explanation,
    })
}

pub(crate) fn parse_symbols(symbols: &[&str]) -> Result<Vec<ParsedChord>, AnalysisError> {
    if symbols.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    symbols
        .iter()
        .enumerate()
        .map(|(position, s)| {
            s.parse::<ParsedChord>().map_err(|source| AnalysisError::Parse {
                symbol: s.to_string(),
                position,
                source,
            })
        })
        .collect()
}

fn map_degrees(chords: &[ParsedChord], key: &KeyContext) -> Vec<AnalyzedChord> {
    chords
        .iter()
        .map(|chord| match key.diatonic_degree(chord) {
            Some(degree) => {
                let numeral = RomanNumeral::new(degree, 0, chord.quality(), &chord.extension);
                AnalyzedChord {
                    symbol: chord.symbol.clone(),
                    numeral: numeral.to_string(),
                    quality: chord.quality(),
                    degree: Some(degree),
                    function: function_for_degree(degree),
                    is_chromatic: false,
                    chromatic_type: None,
                    resolution: None,
                }
            }
            None => {
                let interval = chord.root.interval_from(key.tonic);
                let (degree, accidental) = degree_for(key.mode, interval);
                let numeral = RomanNumeral::new(degree, accidental, chord.quality(), &chord.extension);
                AnalyzedChord {
                    symbol: chord.symbol.clone(),
                    numeral: numeral.to_string(),
                    quality: chord.quality(),
                    degree: None,
                    function: HarmonicFunction::Chromatic,
                    is_chromatic: true,
                    // The classifier fills this in; chromatic chords
                    // always end up with a tag.
                    chromatic_type: None,
                    resolution: None,
                }
            }
        })
        .collect()
}

fn function_for_degree(degree: usize) -> HarmonicFunction {
    match degree {
        1 | 3 | 6 => HarmonicFunction::Tonic,
        2 | 4 => HarmonicFunction::Predominant,
        _ => HarmonicFunction::Dominant,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::analysis::result::{CadenceType, ChromaticType, ProgressionType};

    fn numerals(result: &FunctionalAnalysisResult) -> Vec<&str> {
        result.chords.iter().map(|c| c.numeral.as_str()).collect()
    }

    #[test]
    fn test_diatonic_major() {
        let result = analyze_functionally(&["C", "F", "G", "C"], Some("C major")).unwrap();
        assert_eq!(result.key, "C major");
        assert_eq!(numerals(&result), vec!["I", "IV", "V", "I"]);
        assert!(result.confidence >= 0.9);
        assert!(result.chromatic_elements.is_empty());
    }

    #[test]
    fn test_diatonic_minor() {
        let result = analyze_functionally(&["Am", "Dm", "Em", "Am"], Some("A minor")).unwrap();
        assert_eq!(numerals(&result), vec!["i", "iv", "v", "i"]);
        assert!(result.confidence >= 0.9);
    }

    #[test]
    fn test_jazz_standard() {
        let result = analyze_functionally(&["Dm", "G", "C", "F"], None).unwrap();
        assert_eq!(result.key, "C major");
        assert_eq!(numerals(&result), vec!["ii", "V", "I", "IV"]);
        assert_eq!(result.progression_type, ProgressionType::JazzStandard);
        assert_eq!(result.progression_type.to_string(), "jazz_standard");

        let functions: Vec<_> = result.chords.iter().map(|c| c.function).collect();
        assert_eq!(
            functions[..3],
            [
                HarmonicFunction::Predominant,
                HarmonicFunction::Dominant,
                HarmonicFunction::Tonic,
            ]
        );
    }

    #[test]
    fn test_secondary_dominant() {
        let result =
            analyze_functionally(&["C", "E7", "Am", "F", "G", "C"], Some("C major")).unwrap();
        let e7 = &result.chords[1];
        assert!(e7.is_chromatic);
        assert_eq!(e7.chromatic_type, Some(ChromaticType::SecondaryDominant));
        assert!(e7.numeral.contains("vi"), "numeral was {}", e7.numeral);
        let resolution = e7.resolution.as_ref().unwrap();
        assert_eq!(resolution.index, 2);
        assert_eq!(resolution.numeral, "vi");
    }

    #[test]
    fn test_single_chord() {
        let result = analyze_functionally(&["C"], None).unwrap();
        assert_eq!(result.chords.len(), 1);
        assert_eq!(result.chords[0].numeral, "I");
        assert_eq!(result.chords[0].function, HarmonicFunction::Tonic);
        assert!(result.confidence >= 0.8);
    }

    #[test]
    fn test_empty_input() {
        let err = analyze_functionally(&[], None).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }

    #[test]
    fn test_parse_error_names_position() {
        let err = analyze_functionally(&["C", "H7", "G"], None).unwrap_err();
        match err {
            AnalysisError::Parse { symbol, position, .. } => {
                assert_eq!(symbol, "H7");
                assert_eq!(position, 1);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_idempotence() {
        let symbols = ["C", "E7", "Am", "F", "G", "C"];
        let a = analyze_functionally(&symbols, Some("C major")).unwrap();
        let b = analyze_functionally(&symbols, Some("C major")).unwrap();
        let c = analyze_functionally(&symbols, Some("C major")).unwrap();
        assert_eq!(numerals(&a), numerals(&b));
        assert_eq!(numerals(&b), numerals(&c));
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(b.confidence, c.confidence);
        assert_eq!(a.explanation, c.explanation);
    }

    #[test]
    fn test_chord_count_invariant() {
        let inputs: Vec<Vec<&str>> = vec![
            vec!["C"],
            vec!["C", "C", "C"],
            vec!["C", "Eb", "F#", "A", "B"],
            vec!["Am", "E7", "Am"],
        ];
        for symbols in inputs {
            let result = analyze_functionally(&symbols, None).unwrap();
            assert_eq!(result.chords.len(), symbols.len());
            for chord in &result.chords {
                assert!(!chord.numeral.is_empty());
                assert_eq!(chord.is_chromatic, chord.chromatic_type.is_some());
            }
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn test_extensions_preserved() {
        let result =
            analyze_functionally(&["Cmaj7", "Am7", "Dm7", "G7"], Some("C major")).unwrap();
        assert_eq!(numerals(&result), vec!["Imaj7", "vi7", "ii7", "V7"]);
    }

    #[test]
    fn test_minor_dominant_is_diatonic() {
        let result = analyze_functionally(&["Am", "Dm", "E7", "Am"], Some("A minor")).unwrap();
        assert_eq!(numerals(&result), vec!["i", "iv", "V7", "i"]);
        assert!(!result.chords[2].is_chromatic);
        let authentic = result
            .cadences
            .iter()
            .any(|c| c.kind == CadenceType::Authentic);
        assert!(authentic);
    }
}
