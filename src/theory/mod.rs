mod chord;
mod key;
mod modes;
mod numeral;
mod pitch;

pub use chord::{ChordParseError, ChordQuality, ParsedChord, Seventh, Triad};
pub use key::{KeyContext, KeyParseError, Mode, MAJOR, MINOR};
pub use modes::{ModeDef, ModeTable, MODE_TABLE};
pub use numeral::{degree_for, RomanNumeral, NUMERALS};
pub use pitch::{PitchClass, PitchParseError, PITCH_NAMES};
