use super::result::{AnalyzedChord, Cadence, CadenceType, ProgressionType};

const AUTHENTIC_STRENGTH: f64 = 0.9;
const AUTHENTIC_SEVENTH_STRENGTH: f64 = 0.95;
const PLAGAL_STRENGTH: f64 = 0.7;
const DECEPTIVE_STRENGTH: f64 = 0.65;
const HALF_STRENGTH: f64 = 0.6;

/// Scan consecutive chord pairs for cadential patterns. Overlapping
/// detections are all kept; a pair may legitimately support more than
/// one reading across the sequence.
pub(crate) fn detect_cadences(analyzed: &[AnalyzedChord]) -> Vec<Cadence> {
    let mut cadences = Vec::new();
    for (i, pair) in analyzed.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let degrees = match (a.degree, b.degree) {
            (Some(da), Some(db)) => (da, db),
            _ => continue,
        };
        match degrees {
            (5, 1) => {
                let strength = if a.numeral.contains('7') {
                    AUTHENTIC_SEVENTH_STRENGTH
                } else {
                    AUTHENTIC_STRENGTH
                };
                cadences.push(Cadence {
                    kind: CadenceType::Authentic,
                    window: (i, i + 1),
                    strength,
                });
            }
            (4, 1) => cadences.push(Cadence {
                kind: CadenceType::Plagal,
                window: (i, i + 1),
                strength: PLAGAL_STRENGTH,
            }),
            (5, 6) => cadences.push(Cadence {
                kind: CadenceType::Deceptive,
                window: (i, i + 1),
                strength: DECEPTIVE_STRENGTH,
            }),
            _ => {}
        }
    }

    // A sequence that stops on the dominant, unresolved.
    let n = analyzed.len();
    if n >= 2 && analyzed[n - 1].degree == Some(5) {
        cadences.push(Cadence {
            kind: CadenceType::Half,
            window: (n - 2, n - 1),
            strength: HALF_STRENGTH,
        });
    }
    cadences
}

pub(crate) fn classify_progression(
    analyzed: &[AnalyzedChord],
    cadences: &[Cadence],
) -> ProgressionType {
    let degrees: Vec<Option<usize>> = analyzed.iter().map(|c| c.degree).collect();
    let two_five_one = degrees
        .windows(3)
        .any(|w| matches!(w, [Some(2), Some(5), Some(1)]));
    if two_five_one {
        return ProgressionType::JazzStandard;
    }
    if cadences.len() == 1 {
        return match cadences[0].kind {
            CadenceType::Authentic => ProgressionType::AuthenticCadence,
            CadenceType::Plagal => ProgressionType::PlagalCadence,
            CadenceType::Deceptive => ProgressionType::DeceptiveCadence,
            CadenceType::Half => ProgressionType::HalfCadence,
        };
    }
    ProgressionType::Other
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::analysis::analyze_functionally;

    #[test]
    fn test_authentic_cadence() {
        let result = analyze_functionally(&["F", "G", "C"], None).unwrap();
        assert_eq!(result.cadences.len(), 1);
        let cadence = &result.cadences[0];
        assert_eq!(cadence.kind, CadenceType::Authentic);
        assert!(cadence.strength > 0.8);
        assert_eq!(cadence.window, (1, 2));
        assert_eq!(result.progression_type, ProgressionType::AuthenticCadence);
    }

    #[test]
    fn test_authentic_cadence_with_seventh() {
        let result = analyze_functionally(&["F", "G7", "C"], Some("C major")).unwrap();
        assert_eq!(result.cadences[0].strength, AUTHENTIC_SEVENTH_STRENGTH);
    }

    #[test]
    fn test_plagal_cadence() {
        let result = analyze_functionally(&["F", "C"], None).unwrap();
        assert_eq!(result.cadences.len(), 1);
        assert_eq!(result.cadences[0].kind, CadenceType::Plagal);
        assert_eq!(result.progression_type, ProgressionType::PlagalCadence);
    }

    #[test]
    fn test_deceptive_cadence() {
        let result = analyze_functionally(&["G", "Am"], None).unwrap();
        let deceptive = result
            .cadences
            .iter()
            .any(|c| c.kind == CadenceType::Deceptive);
        assert!(deceptive);
    }

    #[test]
    fn test_half_cadence() {
        let result = analyze_functionally(&["C", "G"], None).unwrap();
        assert_eq!(result.cadences.len(), 1);
        assert_eq!(result.cadences[0].kind, CadenceType::Half);
        assert_eq!(result.progression_type, ProgressionType::HalfCadence);
    }

    #[test]
    fn test_no_cadence() {
        let result = analyze_functionally(&["C", "Em"], Some("C major")).unwrap();
        assert!(result.cadences.is_empty());
        assert_eq!(result.progression_type, ProgressionType::Other);
    }

    #[test]
    fn test_jazz_standard_takes_precedence() {
        // Contains an authentic cadence too, but the ii-V-I shape
        // labels the whole progression.
        let result = analyze_functionally(&["Dm", "G", "C", "F"], None).unwrap();
        assert_eq!(result.progression_type, ProgressionType::JazzStandard);
        assert!(result
            .cadences
            .iter()
            .any(|c| c.kind == CadenceType::Authentic));
    }
}
