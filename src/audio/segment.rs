/// One fixed-length analysis window over the mono signal, with its position
/// in seconds derived from the segment index and the 50% overlap stride.
#[derive(Clone, Copy, Debug)]
pub struct Segment<'a> {
    pub index: usize,
    pub samples: &'a [f32],
    pub start_time: f64,
    pub end_time: f64,
}

/// Lazy iterator of `segment_length`-sample windows at a stride of
/// `segment_length / 2`. The final partial tail is dropped, not padded.
pub struct Segments<'a> {
    signal: &'a [f32],
    segment_length: usize,
    hop: usize,
    segment_seconds: f64,
    index: usize,
}

pub fn segments(signal: &[f32], segment_length: usize, sample_rate: f32) -> Segments<'_> {
    Segments {
        signal,
        segment_length,
        hop: (segment_length / 2).max(1),
        segment_seconds: segment_length as f64 / sample_rate as f64,
        index: 0,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let offset = self.index * self.hop;
        if offset + self.segment_length > self.signal.len() {
            return None;
        }
        let start_time = self.index as f64 * self.segment_seconds * 0.5;
        let segment = Segment {
            index: self.index,
            samples: &self.signal[offset..offset + self.segment_length],
            start_time,
            end_time: start_time + self.segment_seconds,
        };
        self.index += 1;
        Some(segment)
    }
}
