use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve chromatic pitch classes, C-first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    #[serde(rename = "C#")]
    Cs,
    D,
    #[serde(rename = "D#")]
    Ds,
    E,
    F,
    #[serde(rename = "F#")]
    Fs,
    G,
    #[serde(rename = "G#")]
    Gs,
    A,
    #[serde(rename = "A#")]
    As,
    B,
}

impl NoteName {
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::Cs,
        NoteName::D,
        NoteName::Ds,
        NoteName::E,
        NoteName::F,
        NoteName::Fs,
        NoteName::G,
        NoteName::Gs,
        NoteName::A,
        NoteName::As,
        NoteName::B,
    ];

    /// Semitone index within the octave (C = 0 .. B = 11).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: i32) -> NoteName {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// MusicXML spelling: natural step letter plus sharp alteration.
    pub fn step_alter(self) -> (&'static str, i32) {
        match self {
            NoteName::C => ("C", 0),
            NoteName::Cs => ("C", 1),
            NoteName::D => ("D", 0),
            NoteName::Ds => ("D", 1),
            NoteName::E => ("E", 0),
            NoteName::F => ("F", 0),
            NoteName::Fs => ("F", 1),
            NoteName::G => ("G", 0),
            NoteName::Gs => ("G", 1),
            NoteName::A => ("A", 0),
            NoteName::As => ("A", 1),
            NoteName::B => ("B", 0),
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (step, alter) = self.step_alter();
        if alter > 0 {
            write!(f, "{}#", step)
        } else {
            write!(f, "{}", step)
        }
    }
}

/// A frequency resolved to the nearest equal-tempered note (A4 = 440 Hz).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub name: NoteName,
    pub octave: i32,
    pub frequency: f32,
    /// Signed deviation from the nearest note, in [-50, 50] cents.
    pub cents: i32,
}

impl Note {
    /// Map a positive frequency to its nearest note, scientific octave
    /// numbering (octaves roll over at C, so A4-A#4-B4 precede C5).
    pub fn from_frequency(frequency: f32) -> Note {
        let semitones = (12.0 * (frequency / 440.0).log2()).round() as i32;
        let nearest = 440.0 * (semitones as f32 / 12.0).exp2();
        let cents = (1200.0 * (frequency / nearest).log2()).round() as i32;

        // Re-base the A4-relative count so C gets index 0 and octave
        // boundaries land on C.
        let from_c4 = semitones + 9;
        Note {
            name: NoteName::from_index(from_c4),
            octave: 4 + from_c4.div_euclid(12),
            frequency,
            cents,
        }
    }

    pub fn same_pitch(&self, other: &Note) -> bool {
        self.name == other.name && self.octave == other.octave
    }
}
