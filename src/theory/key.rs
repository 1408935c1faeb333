use regex::Regex;
use thiserror::Error;
use std::{fmt, str::FromStr};
use super::chord::{ChordQuality, ParsedChord};
use super::pitch::PitchClass;
use lazy_static::lazy_static;

pub const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
pub const MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

const MAJOR_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
];

const MINOR_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
];

/// Key-inference weights. Matches on the tonic, dominant and
/// subdominant degrees say more about the key than the others.
const PRIMARY_DEGREE_WEIGHT: f64 = 1.5;
const DEGREE_WEIGHT: f64 = 1.0;

lazy_static! {
    static ref KEY_RE: Regex = Regex::new(r"^\s*([A-G][#b]?)\s*(.*?)\s*$").unwrap();
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub fn intervals(&self) -> &'static [u8; 7] {
        match self {
            Mode::Major => &MAJOR,
            Mode::Minor => &MINOR,
        }
    }

    pub fn qualities(&self) -> &'static [ChordQuality; 7] {
        match self {
            Mode::Major => &MAJOR_QUALITIES,
            Mode::Minor => &MINOR_QUALITIES,
        }
    }

    pub fn parallel(&self) -> Mode {
        match self {
            Mode::Major => Mode::Minor,
            Mode::Minor => Mode::Major,
        }
    }

    /// The equivalent church-mode name.
    pub fn mode_name(&self) -> &'static str {
        match self {
            Mode::Major => "Ionian",
            Mode::Minor => "Aeolian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum KeyParseError {
    #[error("Invalid key `{0}`")]
    InvalidKey(String),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyContext {
    pub tonic: PitchClass,
    pub mode: Mode,
}

impl KeyContext {
    pub fn new(tonic: PitchClass, mode: Mode) -> KeyContext {
        KeyContext { tonic, mode }
    }

    /// Infer the most likely key from the chord sequence by scoring all
    /// 24 major/minor keys on how many chord roots land on a diatonic
    /// degree with the expected triad quality. Never fails: with no
    /// matches at all, the first chord's root is taken as a major tonic.
    pub fn infer(chords: &[ParsedChord]) -> KeyContext {
        let mut best: Option<(f64, KeyContext)> = None;
        // Majors first so a tie resolves to the major reading.
        for mode in [Mode::Major, Mode::Minor] {
            for tonic in 0..12 {
                let key = KeyContext::new(PitchClass::new(tonic), mode);
                let score: f64 = chords
                    .iter()
                    .map(|chord| match key.diatonic_degree(chord) {
                        Some(1) | Some(4) | Some(5) => PRIMARY_DEGREE_WEIGHT,
                        Some(_) => DEGREE_WEIGHT,
                        None => 0.0,
                    })
                    .sum();
                if best.map_or(true, |(b, _)| score > b) {
                    best = Some((score, key));
                }
            }
        }
        match best {
            Some((score, key)) if score > 0.0 => {
                log::debug!("Inferred key {} (score {:.1})", key, score);
                key
            }
            _ => {
                let tonic = chords.first().map(|c| c.root).unwrap_or_else(|| PitchClass::new(0));
                log::debug!("No key scored above zero, defaulting to {} major", tonic);
                KeyContext::new(tonic, Mode::Major)
            }
        }
    }

    /// The scale degree (1-7) whose root is this pitch class, if any.
    pub fn degree_of(&self, pc: PitchClass) -> Option<usize> {
        let interval = pc.interval_from(self.tonic);
        self.mode
            .intervals()
            .iter()
            .position(|&s| s == interval)
            .map(|pos| pos + 1)
    }

    pub fn degree_root(&self, degree: usize) -> PitchClass {
        let interval = self.mode.intervals()[(degree - 1) % 7];
        self.tonic.transpose(interval as isize)
    }

    pub fn degree_quality(&self, degree: usize) -> ChordQuality {
        self.mode.qualities()[(degree - 1) % 7]
    }

    /// The degree this chord sits on when it is diatonic: root on a scale
    /// degree with the expected triad quality. A major triad or dominant
    /// seventh on the fifth degree of a minor key also counts, covering
    /// the harmonic-minor dominant.
    pub fn diatonic_degree(&self, chord: &ParsedChord) -> Option<usize> {
        let interval = chord.root.interval_from(self.tonic);
        if self.mode == Mode::Minor && interval == 7 && chord.quality() == ChordQuality::Major {
            return Some(5);
        }
        let degree = self.degree_of(chord.root)?;
        if self.degree_quality(degree) == chord.quality() {
            Some(degree)
        } else {
            None
        }
    }

    pub fn is_diatonic(&self, chord: &ParsedChord) -> bool {
        self.diatonic_degree(chord).is_some()
    }
}

/// Try to parse a key from a string, e.g. "C major", "Am", "Bb minor".
impl FromStr for KeyContext {
    type Err = KeyParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = KEY_RE
            .captures(s)
            .ok_or_else(|| KeyParseError::InvalidKey(s.to_string()))?;
        let tonic: PitchClass = caps
            .get(1)
            .ok_or_else(|| KeyParseError::InvalidKey(s.to_string()))?
            .as_str()
            .parse()
            .map_err(|_| KeyParseError::InvalidKey(s.to_string()))?;
        let rest = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let mode = if rest == "M" {
            Mode::Major
        } else {
            match rest.to_lowercase().as_str() {
                "" | "maj" | "major" => Mode::Major,
                "m" | "min" | "minor" | "-" => Mode::Minor,
                _ => return Err(KeyParseError::InvalidKey(s.to_string())),
            }
        };
        Ok(KeyContext::new(tonic, mode))
    }
}

impl TryFrom<&str> for KeyContext {
    type Error = KeyParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(Self::from_str(s)?)
    }
}

impl fmt::Display for KeyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}
