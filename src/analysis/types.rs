use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::pitch::note::{Note, NoteName};

/// One pitched analysis window.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PitchSample {
    pub frequency: f32,
    pub note: Note,
    pub start_time: f64,
    pub end_time: f64,
}

/// A run of adjacent same-pitch samples merged into one timed note.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NoteEvent {
    pub note: Note,
    pub start_time: f64,
    pub end_time: f64,
}

impl NoteEvent {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Closed vocabulary of recognized chord qualities.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordKind {
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "minor")]
    Minor,
    #[serde(rename = "diminished")]
    Diminished,
    #[serde(rename = "augmented")]
    Augmented,
    #[serde(rename = "major-7")]
    MajorSeventh,
    #[serde(rename = "dominant-7")]
    DominantSeventh,
    #[serde(rename = "minor-7")]
    MinorSeventh,
    #[serde(rename = "sus4")]
    SuspendedFourth,
    #[serde(rename = "sus2")]
    SuspendedSecond,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Chord {
    pub root: NoteName,
    pub kind: ChordKind,
    /// De-duplicated pitch classes in the order first observed within the
    /// window; this order is also the root-search order.
    pub notes: Vec<NoteName>,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

/// Standard notation duration classes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteDuration {
    #[serde(rename = "whole")]
    Whole,
    #[serde(rename = "half")]
    Half,
    #[serde(rename = "quarter")]
    Quarter,
    #[serde(rename = "eighth")]
    Eighth,
    #[serde(rename = "sixteenth")]
    Sixteenth,
}

impl NoteDuration {
    /// Length in quarter-note beats.
    pub fn beats(self) -> f64 {
        match self {
            NoteDuration::Whole => 4.0,
            NoteDuration::Half => 2.0,
            NoteDuration::Quarter => 1.0,
            NoteDuration::Eighth => 0.5,
            NoteDuration::Sixteenth => 0.25,
        }
    }

    /// MusicXML `<type>` text.
    pub fn xml_name(self) -> &'static str {
        match self {
            NoteDuration::Whole => "whole",
            NoteDuration::Half => "half",
            NoteDuration::Quarter => "quarter",
            NoteDuration::Eighth => "eighth",
            NoteDuration::Sixteenth => "16th",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clef {
    #[serde(rename = "treble")]
    Treble,
    #[serde(rename = "bass")]
    Bass,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SheetMusicNote {
    pub pitch: NoteName,
    pub octave: i32,
    pub duration: NoteDuration,
    pub start_time: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SheetMusic {
    pub notes: Vec<SheetMusicNote>,
    pub time_sig_num: u8,
    pub time_sig_den: u8,
    pub clef: Clef,
}

/// The sole output of one analysis call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TranscriptionResult {
    pub simple_notes: Vec<NoteEvent>,
    pub complex_chords: Vec<Chord>,
    pub sheet_music: SheetMusic,
    pub raw_pitch_data: Vec<PitchSample>,
}

/// Tunable analysis parameters. Missing fields in a host-supplied options
/// object fall back to the defaults.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Analysis window in samples; overlap is always half of it.
    pub segment_length: usize,
    pub min_frequency: f32,
    pub max_frequency: f32,
    /// Largest gap (seconds) still merged during note consolidation.
    pub gap_tolerance: f64,
    /// Width (seconds) of the chord simultaneity buckets.
    pub chord_window: f64,
    /// Minimum number of a chord definition's tones that must be present.
    pub min_chord_tones: usize,
    /// Minimum fraction of a chord definition that must be present.
    pub min_chord_coverage: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            segment_length: 4096,
            min_frequency: 80.0,
            max_frequency: 1000.0,
            gap_tolerance: 0.05,
            chord_window: 0.2,
            min_chord_tones: 3,
            min_chord_coverage: 0.75,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        fn bad(field: &'static str, reason: &str) -> AnalysisError {
            AnalysisError::InvalidConfig {
                field,
                reason: reason.to_string(),
            }
        }

        if self.segment_length < 2 {
            return Err(bad("segment_length", "must be at least 2 samples"));
        }
        if !self.min_frequency.is_finite() || self.min_frequency <= 0.0 {
            return Err(bad("min_frequency", "must be a positive finite value"));
        }
        if !self.max_frequency.is_finite() || self.max_frequency <= self.min_frequency {
            return Err(bad("max_frequency", "must be finite and above min_frequency"));
        }
        if !self.gap_tolerance.is_finite() || self.gap_tolerance < 0.0 {
            return Err(bad("gap_tolerance", "must be non-negative"));
        }
        if !self.chord_window.is_finite() || self.chord_window <= 0.0 {
            return Err(bad("chord_window", "must be positive"));
        }
        if self.min_chord_tones == 0 {
            return Err(bad("min_chord_tones", "must be at least 1"));
        }
        if !(self.min_chord_coverage > 0.0 && self.min_chord_coverage <= 1.0) {
            return Err(bad("min_chord_coverage", "must be in (0, 1]"));
        }
        Ok(())
    }
}
