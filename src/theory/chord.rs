use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use std::{fmt, str::FromStr};
use super::pitch::PitchClass;
use lazy_static::lazy_static;

lazy_static! {
    static ref SYMBOL_RE: Regex = Regex::new(
        r"^([A-G])([#b]*)([^/]*)(?:/([A-G])([#b]*))?$")
        .unwrap();
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Triad {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Power,
}

/// The seventh above the root, when the symbol carries one.
/// `Minor` is the flat seventh, so a dominant seventh chord is
/// a major triad plus `Seventh::Minor`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Seventh {
    Minor,
    Major,
    Diminished,
}

/// Coarse triad quality, the currency for diatonic matching
/// and Roman-numeral casing. Suspended and power chords count
/// as major here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedChord {
    pub root: PitchClass,
    pub triad: Triad,
    pub seventh: Option<Seventh>,

    /// The quality/extension tail as it should read when appended to a
    /// Roman numeral, e.g. "7" for "Am7", "maj7" for "Cmaj7".
    pub extension: String,

    /// Slash-chord bass, e.g. the E in "C/E".
    pub bass: Option<PitchClass>,

    /// The symbol as given.
    pub symbol: String,
}

#[derive(Error, Debug)]
pub enum ChordParseError {
    #[error("Invalid chord symbol `{0}`")]
    InvalidSymbol(String),
}

impl ParsedChord {
    pub fn quality(&self) -> ChordQuality {
        match self.triad {
            Triad::Major | Triad::Sus2 | Triad::Sus4 | Triad::Power => ChordQuality::Major,
            Triad::Minor => ChordQuality::Minor,
            Triad::Diminished => ChordQuality::Diminished,
            Triad::Augmented => ChordQuality::Augmented,
        }
    }

    pub fn is_dominant_seventh(&self) -> bool {
        self.triad == Triad::Major && self.seventh == Some(Seventh::Minor)
    }

    /// The pitch classes sounded by this chord (root, triad, seventh).
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        let mut intervals = match self.triad {
            Triad::Major => vec![0, 4, 7],
            Triad::Minor => vec![0, 3, 7],
            Triad::Diminished => vec![0, 3, 6],
            Triad::Augmented => vec![0, 4, 8],
            Triad::Sus2 => vec![0, 2, 7],
            Triad::Sus4 => vec![0, 5, 7],
            Triad::Power => vec![0, 7],
        };
        match self.seventh {
            Some(Seventh::Minor) => intervals.push(10),
            Some(Seventh::Major) => intervals.push(11),
            Some(Seventh::Diminished) => intervals.push(9),
            None => {}
        }
        intervals.into_iter().map(|i| self.root.transpose(i)).collect()
    }
}

/// Interpret the quality tail of a chord symbol. The root is strict,
/// the tail is lenient: an unrecognized tail reads as a plain major
/// triad and is carried through verbatim as the extension.
fn parse_quality(tail: &str) -> (Triad, Option<Seventh>, String) {
    if tail.is_empty() {
        return (Triad::Major, None, String::new());
    }
    if let Some(rest) = tail.strip_prefix("maj") {
        let seventh = if rest.starts_with(|c: char| c.is_ascii_digit()) {
            Some(Seventh::Major)
        } else {
            None
        };
        return (Triad::Major, seventh, tail.to_string());
    }
    if let Some(rest) = tail.strip_prefix("m7b5") {
        return (Triad::Diminished, Some(Seventh::Minor), format!("7b5{}", rest));
    }
    if let Some(rest) = tail.strip_prefix("dim7") {
        return (Triad::Diminished, Some(Seventh::Diminished), format!("°7{}", rest));
    }
    if let Some(rest) = tail.strip_prefix("dim") {
        return (Triad::Diminished, None, format!("°{}", rest));
    }
    if let Some(rest) = tail.strip_prefix("aug").or_else(|| tail.strip_prefix('+')) {
        let seventh = if rest.contains('7') {
            Some(Seventh::Minor)
        } else {
            None
        };
        return (Triad::Augmented, seventh, format!("+{}", rest));
    }
    if let Some(rest) = tail.strip_prefix("min").or_else(|| tail.strip_prefix('m')) {
        let seventh = if rest.starts_with('7')
            || rest.starts_with('9')
            || rest.starts_with("11")
            || rest.starts_with("13")
        {
            Some(Seventh::Minor)
        } else {
            None
        };
        return (Triad::Minor, seventh, rest.to_string());
    }
    if tail.starts_with("sus2") {
        return (Triad::Sus2, None, tail.to_string());
    }
    if tail.starts_with("sus") {
        return (Triad::Sus4, None, tail.to_string());
    }
    if tail.starts_with('7')
        || tail.starts_with('9')
        || tail.starts_with("11")
        || tail.starts_with("13")
    {
        return (Triad::Major, Some(Seventh::Minor), tail.to_string());
    }
    if tail.starts_with('6') || tail.starts_with("add") {
        return (Triad::Major, None, tail.to_string());
    }
    if tail == "5" {
        return (Triad::Power, None, tail.to_string());
    }
    (Triad::Major, None, tail.to_string())
}

/// Try to parse a chord symbol, e.g. "C#m7/G#".
impl FromStr for ParsedChord {
    type Err = ChordParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = SYMBOL_RE
            .captures(trimmed)
            .ok_or_else(|| ChordParseError::InvalidSymbol(s.to_string()))?;

        let letter = caps.get(1)
            .ok_or_else(|| ChordParseError::InvalidSymbol(s.to_string()))?
            .as_str();
        let accidental = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let root: PitchClass = format!("{}{}", letter, accidental)
            .parse()
            .map_err(|_| ChordParseError::InvalidSymbol(s.to_string()))?;

        let tail = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        let (triad, seventh, extension) = parse_quality(tail);

        let bass = match (caps.get(4), caps.get(5)) {
            (Some(letter), acc) => {
                let name = format!("{}{}", letter.as_str(), acc.map(|m| m.as_str()).unwrap_or_default());
                Some(name.parse().map_err(|_| ChordParseError::InvalidSymbol(s.to_string()))?)
            }
            _ => None,
        };

        Ok(ParsedChord {
            root,
            triad,
            seventh,
            extension,
            bass,
            symbol: trimmed.to_string(),
        })
    }
}

impl TryFrom<&str> for ParsedChord {
    type Error = ChordParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(Self::from_str(s)?)
    }
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_triads() {
        let examples = vec![
            ("C", 0, Triad::Major, None),
            ("Am", 9, Triad::Minor, None),
            ("F#m", 6, Triad::Minor, None),
            ("Bdim", 11, Triad::Diminished, None),
            ("Caug", 0, Triad::Augmented, None),
            ("Dsus2", 2, Triad::Sus2, None),
            ("Gsus4", 7, Triad::Sus4, None),
            ("A5", 9, Triad::Power, None),
        ];
        for (symbol, root, triad, seventh) in examples {
            let chord: ParsedChord = symbol.try_into().unwrap();
            assert_eq!(chord.root.semitones, root, "root of {}", symbol);
            assert_eq!(chord.triad, triad, "triad of {}", symbol);
            assert_eq!(chord.seventh, seventh, "seventh of {}", symbol);
        }
    }

    #[test]
    fn test_parse_sevenths() {
        let chord: ParsedChord = "G7".try_into().unwrap();
        assert_eq!(chord.triad, Triad::Major);
        assert_eq!(chord.seventh, Some(Seventh::Minor));
        assert!(chord.is_dominant_seventh());
        assert_eq!(chord.extension, "7");

        let chord: ParsedChord = "Cmaj7".try_into().unwrap();
        assert_eq!(chord.triad, Triad::Major);
        assert_eq!(chord.seventh, Some(Seventh::Major));
        assert!(!chord.is_dominant_seventh());
        assert_eq!(chord.extension, "maj7");

        let chord: ParsedChord = "Am7".try_into().unwrap();
        assert_eq!(chord.triad, Triad::Minor);
        assert_eq!(chord.seventh, Some(Seventh::Minor));
        assert_eq!(chord.extension, "7");

        let chord: ParsedChord = "Bm7b5".try_into().unwrap();
        assert_eq!(chord.triad, Triad::Diminished);
        assert_eq!(chord.seventh, Some(Seventh::Minor));

        let chord: ParsedChord = "Cdim7".try_into().unwrap();
        assert_eq!(chord.triad, Triad::Diminished);
        assert_eq!(chord.seventh, Some(Seventh::Diminished));
    }

    #[test]
    fn test_parse_slash_chords() {
        let chord: ParsedChord = "C/E".try_into().unwrap();
        assert_eq!(chord.root.semitones, 0);
        assert_eq!(chord.bass, Some(PitchClass::new(4)));

        let chord: ParsedChord = "C#m7/G#".try_into().unwrap();
        assert_eq!(chord.root.semitones, 1);
        assert_eq!(chord.triad, Triad::Minor);
        assert_eq!(chord.bass, Some(PitchClass::new(8)));

        let chord: ParsedChord = "C".try_into().unwrap();
        assert_eq!(chord.bass, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!("H7".parse::<ParsedChord>().is_err());
        assert!("".parse::<ParsedChord>().is_err());
        assert!("7".parse::<ParsedChord>().is_err());
    }

    #[test]
    fn test_lenient_tail() {
        // Unknown tails don't fail the parse; the root is what matters.
        let chord: ParsedChord = "Calt".try_into().unwrap();
        assert_eq!(chord.root.semitones, 0);
        assert_eq!(chord.triad, Triad::Major);
        assert_eq!(chord.extension, "alt");
    }

    #[test]
    fn test_pitch_classes() {
        let chord: ParsedChord = "G7".try_into().unwrap();
        let pcs: Vec<u8> = chord.pitch_classes().iter().map(|p| p.semitones).collect();
        assert_eq!(pcs, vec![7, 11, 2, 5]);

        let chord: ParsedChord = "Am".try_into().unwrap();
        let pcs: Vec<u8> = chord.pitch_classes().iter().map(|p| p.semitones).collect();
        assert_eq!(pcs, vec![9, 0, 4]);
    }

    #[test]
    fn test_quality() {
        let chord: ParsedChord = "Csus4".try_into().unwrap();
        assert_eq!(chord.quality(), ChordQuality::Major);

        let chord: ParsedChord = "Bm7b5".try_into().unwrap();
        assert_eq!(chord.quality(), ChordQuality::Diminished);
    }
}
