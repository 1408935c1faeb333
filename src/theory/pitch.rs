use thiserror::Error;
use std::{fmt, str::FromStr};

pub const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A pitch class, 0-11 semitones above C.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PitchClass {
    pub semitones: u8,
}

impl PitchClass {
    pub fn new(semitones: isize) -> PitchClass {
        PitchClass {
            semitones: semitones.rem_euclid(12) as u8,
        }
    }

    pub fn transpose(&self, semitones: isize) -> PitchClass {
        PitchClass::new(self.semitones as isize + semitones)
    }

    /// Ascending interval from `other` up to this pitch class, in 0-11.
    pub fn interval_from(&self, other: PitchClass) -> u8 {
        (self.semitones as isize - other.semitones as isize).rem_euclid(12) as u8
    }

    pub fn name(&self) -> &'static str {
        PITCH_NAMES[self.semitones as usize]
    }
}

#[derive(Error, Debug)]
pub enum PitchParseError {
    #[error("Invalid pitch name `{0}`")]
    InvalidName(String),
}

/// Try to parse a pitch class from a string, e.g. "C#" or "Bb".
/// Enharmonic spellings map to the same class: C# == Db.
impl FromStr for PitchClass {
    type Err = PitchParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(|| PitchParseError::InvalidName(s.to_string()))?;
        let base = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(PitchParseError::InvalidName(s.to_string())),
        };
        let mut adj: isize = 0;
        for c in chars {
            match c {
                '#' => adj += 1,
                'b' => adj -= 1,
                _ => return Err(PitchParseError::InvalidName(s.to_string())),
            }
        }
        Ok(PitchClass::new(base + adj))
    }
}

impl TryFrom<&str> for PitchClass {
    type Error = PitchParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(Self::from_str(s)?)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_pitch() {
        let pc: PitchClass = "C".try_into().unwrap();
        assert_eq!(pc.semitones, 0);

        let pc: PitchClass = "G".try_into().unwrap();
        assert_eq!(pc.semitones, 7);

        let pc: PitchClass = "F#".try_into().unwrap();
        assert_eq!(pc.semitones, 6);

        let pc: PitchClass = "Bb".try_into().unwrap();
        assert_eq!(pc.semitones, 10);

        // Enharmonic equivalence
        let sharp: PitchClass = "C#".try_into().unwrap();
        let flat: PitchClass = "Db".try_into().unwrap();
        assert_eq!(sharp, flat);

        // Wraparound spellings
        let pc: PitchClass = "Cb".try_into().unwrap();
        assert_eq!(pc.semitones, 11);
        let pc: PitchClass = "B#".try_into().unwrap();
        assert_eq!(pc.semitones, 0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("H".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
        assert!("Cx".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_intervals() {
        let c: PitchClass = "C".try_into().unwrap();
        let g: PitchClass = "G".try_into().unwrap();
        assert_eq!(g.interval_from(c), 7);
        assert_eq!(c.interval_from(g), 5);
        assert_eq!(c.interval_from(c), 0);
    }

    #[test]
    fn test_names() {
        assert_eq!(PitchClass::new(1).name(), "C#");
        assert_eq!(PitchClass::new(-2).name(), "A#");
        assert_eq!(PitchClass::new(12).name(), "C");
    }
}
