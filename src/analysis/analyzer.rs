use crate::analysis::chords::identify_chords;
use crate::analysis::consolidate::consolidate;
use crate::analysis::sheet::build_sheet_music;
use crate::analysis::types::{AnalyzerConfig, PitchSample, TranscriptionResult};
use crate::audio::buffer::SampleBuffer;
use crate::audio::segment::segments;
use crate::error::AnalysisError;
use crate::pitch::estimator::estimate_pitch;
use crate::pitch::note::Note;

/// Run the full transcription pipeline over one buffer.
///
/// Downmix, segment, estimate pitch per segment, consolidate runs into
/// notes, identify chords, quantize sheet music. Silence and unpitched
/// content degrade to empty sequences; only malformed configuration fails
/// here (malformed buffers fail at `SampleBuffer::new`).
pub fn analyze(
    buffer: &SampleBuffer,
    config: &AnalyzerConfig,
) -> Result<TranscriptionResult, AnalysisError> {
    config.validate()?;

    let mono = buffer.downmix();
    let sample_rate = buffer.sample_rate();

    let mut raw_pitch_data: Vec<PitchSample> = Vec::new();
    for segment in segments(&mono, config.segment_length, sample_rate) {
        if let Some(frequency) = estimate_pitch(
            segment.samples,
            sample_rate,
            config.min_frequency,
            config.max_frequency,
        ) {
            raw_pitch_data.push(PitchSample {
                frequency,
                note: Note::from_frequency(frequency),
                start_time: segment.start_time,
                end_time: segment.end_time,
            });
        }
    }

    let simple_notes = consolidate(&raw_pitch_data, config.gap_tolerance);
    let complex_chords = identify_chords(
        &simple_notes,
        config.chord_window,
        config.min_chord_tones,
        config.min_chord_coverage,
    );
    let sheet_music = build_sheet_music(&simple_notes);

    Ok(TranscriptionResult {
        simple_notes,
        complex_chords,
        sheet_music,
        raw_pitch_data,
    })
}
