use serde::Deserialize;
use lazy_static::lazy_static;

/// One church mode: its scale as semitone offsets from the tonic, the
/// semitones that distinguish it from the major scale, and the interval
/// down to its parent major key.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ModeDef {
    pub name: String,
    pub intervals: Vec<u8>,
    pub characteristic: Vec<u8>,
    pub parent_offset: u8,
}

impl ModeDef {
    pub fn contains(&self, semitones: u8) -> bool {
        self.intervals.contains(&(semitones % 12))
    }

    /// 1-indexed scale degree at this interval, if it is in the mode.
    pub fn degree_of(&self, semitones: u8) -> Option<usize> {
        self.intervals
            .iter()
            .position(|&s| s == semitones % 12)
            .map(|pos| pos + 1)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ModeTable {
    pub modes: Vec<ModeDef>,
}

lazy_static! {
    /// The static mode reference table, loaded once at first use.
    pub static ref MODE_TABLE: ModeTable =
        serde_yaml::from_str(include_str!("../../data/modes.yaml"))
            .expect("error while reading mode table yaml");
}
