use crate::analysis::types::{NoteEvent, PitchSample};

/// Slack absorbing f64 rounding in the gap comparison: a subtraction like
/// `0.15 - 0.1` lands a hair below 0.05, but a gap equal to the tolerance
/// must not merge. Far below any audio timing granularity.
const GAP_EPSILON: f64 = 1e-9;

/// Merge temporally adjacent samples that resolve to the same pitch.
///
/// A sample joins the running note when name and octave match and the gap
/// between its start and the running note's end is strictly under
/// `gap_tolerance`; only the end time is extended. Anything else emits the
/// running note and starts a new one. The input must be ordered by start
/// time.
pub fn consolidate(samples: &[PitchSample], gap_tolerance: f64) -> Vec<NoteEvent> {
    let mut notes: Vec<NoteEvent> = Vec::new();
    let mut current: Option<NoteEvent> = None;

    for sample in samples {
        match current.as_mut() {
            Some(note)
                if note.note.same_pitch(&sample.note)
                    && (sample.start_time - note.end_time).abs() + GAP_EPSILON
                        < gap_tolerance =>
            {
                note.end_time = sample.end_time;
            }
            _ => {
                if let Some(done) = current.take() {
                    notes.push(done);
                }
                current = Some(NoteEvent {
                    note: sample.note,
                    start_time: sample.start_time,
                    end_time: sample.end_time,
                });
            }
        }
    }
    if let Some(done) = current {
        notes.push(done);
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::note::Note;

    fn sample(freq: f32, start: f64, end: f64) -> PitchSample {
        PitchSample {
            frequency: freq,
            note: Note::from_frequency(freq),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(consolidate(&[], 0.05).is_empty());
    }

    #[test]
    fn test_adjacent_same_pitch_merges() {
        let samples = vec![sample(440.0, 0.0, 0.1), sample(440.0, 0.1, 0.2)];
        let notes = consolidate(&samples, 0.05);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].start_time, 0.0);
        assert_eq!(notes[0].end_time, 0.2);
    }

    #[test]
    fn test_gap_within_tolerance_merges() {
        let samples = vec![sample(440.0, 0.0, 0.1), sample(440.0, 0.14, 0.24)];
        let notes = consolidate(&samples, 0.05);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].end_time, 0.24);
    }

    #[test]
    fn test_gap_at_tolerance_does_not_merge() {
        // 0.15 - 0.1 computes to just under 0.05 in f64; the boundary rule
        // must still treat this gap as at tolerance and keep two notes.
        let samples = vec![sample(440.0, 0.0, 0.1), sample(440.0, 0.15, 0.25)];
        let notes = consolidate(&samples, 0.05);
        assert_eq!(notes.len(), 2);

        // The other rounding direction: 0.1 + 0.05 computes to just over
        // 0.15, so the gap lands a hair above the tolerance.
        let start = 0.1 + 0.05;
        let samples = vec![sample(440.0, 0.0, 0.1), sample(440.0, start, start + 0.1)];
        assert_eq!(consolidate(&samples, 0.05).len(), 2);
    }

    #[test]
    fn test_different_pitch_does_not_merge() {
        // A4 then C5, touching in time
        let samples = vec![sample(440.0, 0.0, 0.1), sample(523.25, 0.1, 0.2)];
        let notes = consolidate(&samples, 0.05);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].note.name.to_string(), "A");
        assert_eq!(notes[1].note.name.to_string(), "C");
    }

    #[test]
    fn test_same_name_different_octave_does_not_merge() {
        let samples = vec![sample(220.0, 0.0, 0.1), sample(440.0, 0.1, 0.2)];
        assert_eq!(consolidate(&samples, 0.05).len(), 2);
    }

    #[test]
    fn test_overlapping_segments_merge() {
        // 50%-overlap windows: the next sample starts before the previous ends
        let samples = vec![
            sample(440.0, 0.0, 0.0929),
            sample(440.0, 0.0464, 0.1393),
            sample(440.0, 0.0929, 0.1858),
        ];
        let notes = consolidate(&samples, 0.05);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].start_time, 0.0);
        assert_eq!(notes[0].end_time, 0.1858);
    }

    #[test]
    fn test_idempotent() {
        let samples = vec![
            sample(440.0, 0.0, 0.1),
            sample(440.0, 0.1, 0.2),
            sample(523.25, 0.2, 0.3),
            sample(440.0, 0.5, 0.6),
        ];
        let once = consolidate(&samples, 0.05);

        // Re-run consolidation over the consolidated sequence
        let as_samples: Vec<PitchSample> = once
            .iter()
            .map(|n| PitchSample {
                frequency: n.note.frequency,
                note: n.note,
                start_time: n.start_time,
                end_time: n.end_time,
            })
            .collect();
        let twice = consolidate(&as_samples, 0.05);
        assert_eq!(once, twice);
    }
}
