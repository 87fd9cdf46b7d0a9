use std::collections::BTreeMap;

use crate::analysis::types::{Chord, ChordKind, NoteEvent};
use crate::pitch::note::NoteName;

/// Chord qualities and their semitone offsets from the root. Table order is
/// the tie-break when two qualities match with the same number of tones.
const CHORD_INTERVALS: [(ChordKind, &[i32]); 9] = [
    (ChordKind::Major, &[0, 4, 7]),
    (ChordKind::Minor, &[0, 3, 7]),
    (ChordKind::Diminished, &[0, 3, 6]),
    (ChordKind::Augmented, &[0, 4, 8]),
    (ChordKind::MajorSeventh, &[0, 4, 7, 11]),
    (ChordKind::DominantSeventh, &[0, 4, 7, 10]),
    (ChordKind::MinorSeventh, &[0, 3, 7, 10]),
    (ChordKind::SuspendedFourth, &[0, 5, 7]),
    (ChordKind::SuspendedSecond, &[0, 2, 7]),
];

/// Group notes into fixed `time_window`-wide buckets and test each bucket's
/// pitch-class set against the chord table.
///
/// Roots are tried in the order their pitch class was first observed within
/// the bucket; the first root with any qualifying quality wins and the search
/// stops. Buckets with fewer than two notes, or with no qualifying match,
/// produce nothing.
pub fn identify_chords(
    notes: &[NoteEvent],
    time_window: f64,
    min_tones: usize,
    min_coverage: f64,
) -> Vec<Chord> {
    let mut buckets: BTreeMap<i64, Vec<&NoteEvent>> = BTreeMap::new();
    for note in notes {
        let key = (note.start_time / time_window).floor() as i64;
        buckets.entry(key).or_default().push(note);
    }

    let mut chords = Vec::new();
    for group in buckets.values() {
        if group.len() < 2 {
            continue;
        }

        // De-duplicated pitch classes, first-observation order
        let mut classes: Vec<NoteName> = Vec::new();
        for note in group {
            if !classes.contains(&note.note.name) {
                classes.push(note.note.name);
            }
        }

        if let Some((root, kind)) = match_chord(&classes, min_tones, min_coverage) {
            let start_time = group
                .iter()
                .map(|n| n.start_time)
                .fold(f64::INFINITY, f64::min);
            let end_time = group
                .iter()
                .map(|n| n.end_time)
                .fold(f64::NEG_INFINITY, f64::max);
            chords.push(Chord {
                root,
                kind,
                notes: classes,
                start_time,
                end_time,
                duration: end_time - start_time,
            });
        }
    }
    chords
}

/// Try every candidate root in order; per root, keep the quality with the
/// most defined tones present (table order breaks ties) among those clearing
/// both thresholds.
fn match_chord(
    classes: &[NoteName],
    min_tones: usize,
    min_coverage: f64,
) -> Option<(NoteName, ChordKind)> {
    for &root in classes {
        let mut present = [false; 12];
        for &class in classes {
            let interval = (class.index() as i32 - root.index() as i32).rem_euclid(12);
            present[interval as usize] = true;
        }

        let mut best: Option<(ChordKind, usize)> = None;
        for (kind, intervals) in CHORD_INTERVALS {
            let matched = intervals
                .iter()
                .filter(|&&i| present[i as usize])
                .count();
            let coverage = matched as f64 / intervals.len() as f64;
            if matched >= min_tones
                && coverage >= min_coverage
                && best.map_or(true, |(_, count)| matched > count)
            {
                best = Some((kind, matched));
            }
        }
        if let Some((kind, _)) = best {
            return Some((root, kind));
        }
    }
    None
}
