use std::fmt;
use super::chord::ChordQuality;
use super::key::Mode;

pub const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

// Semitone-above-tonic to (degree, accidental), per mode. Positions
// outside the scale take the flat/sharp spelling conventional for
// chromatic roots in that mode (bII, bIII, bVI, bVII in major; #III,
// #VI, #VII in minor).
const MAJOR_DEGREES: [(usize, isize); 12] = [
    (1, 0), (2, -1), (2, 0), (3, -1), (3, 0), (4, 0),
    (5, -1), (5, 0), (6, -1), (6, 0), (7, -1), (7, 0),
];
const MINOR_DEGREES: [(usize, isize); 12] = [
    (1, 0), (2, -1), (2, 0), (3, 0), (3, 1), (4, 0),
    (5, -1), (5, 0), (6, 0), (6, 1), (7, 0), (7, 1),
];

/// Spell the scale position for an interval above the tonic.
pub fn degree_for(mode: Mode, semitones: u8) -> (usize, isize) {
    let idx = (semitones % 12) as usize;
    match mode {
        Mode::Major => MAJOR_DEGREES[idx],
        Mode::Minor => MINOR_DEGREES[idx],
    }
}

/// A Roman numeral with its quality carried as a structured field;
/// the conventional upper/lower casing only appears when rendering.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RomanNumeral {
    pub degree: usize,
    pub accidental: isize,
    pub quality: ChordQuality,
    pub extension: String,
}

impl RomanNumeral {
    pub fn new(degree: usize, accidental: isize, quality: ChordQuality, extension: &str) -> RomanNumeral {
        RomanNumeral {
            degree,
            accidental,
            quality,
            extension: extension.to_string(),
        }
    }

    /// A bare numeral, e.g. for naming a tonicization target.
    pub fn plain(degree: usize, quality: ChordQuality) -> RomanNumeral {
        RomanNumeral::new(degree, 0, quality, "")
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut name = String::new();
        if self.accidental < 0 {
            name.push_str(&"b".repeat(self.accidental.unsigned_abs()));
        } else if self.accidental > 0 {
            name.push_str(&"#".repeat(self.accidental as usize));
        }

        let numeral = NUMERALS[(self.degree - 1) % 7];
        match self.quality {
            ChordQuality::Minor | ChordQuality::Diminished => {
                name.push_str(&numeral.to_lowercase())
            }
            ChordQuality::Major | ChordQuality::Augmented => name.push_str(numeral),
        }

        name.push_str(&self.extension);
        write!(f, "{}", name)
    }
}
