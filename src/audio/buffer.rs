use crate::error::AnalysisError;

/// A decoded PCM buffer: one `Vec<f32>` per channel plus the sample rate.
///
/// Construction validates the input once; every later pipeline stage can
/// assume equal-length channels and finite samples.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: f32,
}

impl SampleBuffer {
    /// Build a buffer from per-channel sample arrays.
    ///
    /// Fails on a non-positive or non-finite sample rate, on channels of
    /// unequal length, and on any NaN or infinite sample. Zero channels is
    /// a valid (empty) buffer.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: f32) -> Result<Self, AnalysisError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }

        let expected = channels.first().map_or(0, |c| c.len());
        for (ch, samples) in channels.iter().enumerate() {
            if samples.len() != expected {
                return Err(AnalysisError::ChannelLengthMismatch {
                    channel: ch,
                    expected,
                    got: samples.len(),
                });
            }
            for (i, &s) in samples.iter().enumerate() {
                if !s.is_finite() {
                    return Err(AnalysisError::NonFiniteSample {
                        channel: ch,
                        index: i,
                    });
                }
            }
        }

        Ok(SampleBuffer {
            channels,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reduce to mono by per-index arithmetic mean across channels.
    pub fn downmix(&self) -> Vec<f32> {
        match self.channels.len() {
            0 => Vec::new(),
            1 => self.channels[0].clone(),
            n => {
                let scale = 1.0 / n as f32;
                (0..self.len())
                    .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() * scale)
                    .collect()
            }
        }
    }
}
