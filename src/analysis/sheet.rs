use crate::analysis::types::{Clef, NoteDuration, NoteEvent, SheetMusic, SheetMusicNote};

/// Classify a duration in milliseconds into a notation class. Thresholds are
/// inclusive lower bounds; the longest class that fits wins.
pub fn quantize_duration(duration_ms: f64) -> NoteDuration {
    if duration_ms >= 1000.0 {
        NoteDuration::Whole
    } else if duration_ms >= 500.0 {
        NoteDuration::Half
    } else if duration_ms >= 250.0 {
        NoteDuration::Quarter
    } else if duration_ms >= 125.0 {
        NoteDuration::Eighth
    } else {
        NoteDuration::Sixteenth
    }
}

/// Package consolidated notes for rendering: quantized durations under a
/// fixed 4/4 treble staff. Measure layout stays with the renderer.
pub fn build_sheet_music(notes: &[NoteEvent]) -> SheetMusic {
    SheetMusic {
        notes: notes
            .iter()
            .map(|n| SheetMusicNote {
                pitch: n.note.name,
                octave: n.note.octave,
                duration: quantize_duration(n.duration() * 1000.0),
                start_time: n.start_time,
            })
            .collect(),
        time_sig_num: 4,
        time_sig_den: 4,
        clef: Clef::Treble,
    }
}
