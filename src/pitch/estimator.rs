use std::f32::consts::PI;

/// Hann window of the given size. Degenerate sizes (0 or 1) get a
/// rectangular window.
pub fn hann_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    let n = (size - 1) as f32;
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / n).cos()))
        .collect()
}

/// Estimate the dominant periodicity of one segment via raw autocorrelation.
///
/// The segment is Hann-tapered, then `R[lag] = sum(x[i] * x[i + lag])` is
/// maximized over lags corresponding to `[min_frequency, max_frequency]`.
/// Returns `None` when no positive-correlation lag exists in range (silence,
/// or a segment too short for the lag window) -- "no pitch", not an error.
pub fn estimate_pitch(
    samples: &[f32],
    sample_rate: f32,
    min_frequency: f32,
    max_frequency: f32,
) -> Option<f32> {
    let len = samples.len();
    if len < 2 {
        return None;
    }

    let window = hann_window(len);
    let windowed: Vec<f32> = samples
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect();

    let min_lag = (sample_rate / max_frequency).floor() as usize;
    let max_lag = ((sample_rate / min_frequency).ceil() as usize).min(len);
    if min_lag >= max_lag {
        return None;
    }

    // Strict > over a zero seed: an all-zero segment never selects a lag.
    let mut best_lag = 0usize;
    let mut best_corr = 0.0f32;
    for lag in min_lag..max_lag {
        let mut corr = 0.0f32;
        for i in 0..len - lag {
            corr += windowed[i] * windowed[i + lag];
        }
        if corr > best_corr {
            best_corr = corr;
            best_lag = lag;
        }
    }

    if best_lag == 0 {
        return None;
    }

    let frequency = sample_rate / best_lag as f32;
    if frequency < min_frequency || frequency > max_frequency {
        return None;
    }
    Some(frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(freq: f32, sample_rate: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    /// Frequency step between adjacent lags around frequency `f`,
    /// i.e. the resolution limit of integer-lag autocorrelation.
    fn lag_resolution(f: f32, sample_rate: f32) -> f32 {
        let lag = (sample_rate / f).round();
        sample_rate / (lag - 1.0) - sample_rate / lag
    }

    #[test]
    fn test_hann_shape() {
        let w = hann_window(101);
        assert!(w[0].abs() < 1e-6, "left endpoint should be ~0: {}", w[0]);
        assert!(w[100].abs() < 1e-6, "right endpoint should be ~0: {}", w[100]);
        assert!((w[50] - 1.0).abs() < 1e-6, "midpoint should be ~1: {}", w[50]);
        for i in 0..101 {
            assert!((w[i] - w[100 - i]).abs() < 1e-6, "window must be symmetric");
        }
    }

    #[test]
    fn test_hann_trivial_sizes() {
        assert!(hann_window(0).is_empty());
        assert_eq!(hann_window(1), vec![1.0]);
    }

    #[test]
    fn test_sine_a440() {
        let samples = generate_sine(440.0, 44100.0, 4096);
        let hz = estimate_pitch(&samples, 44100.0, 80.0, 1000.0).expect("should detect pitch");
        let tol = lag_resolution(440.0, 44100.0) + 0.01;
        assert!(
            (hz - 440.0).abs() <= tol,
            "expected ~440 Hz within {} Hz, got {}",
            tol,
            hz
        );
    }

    #[test]
    fn test_sine_low_and_high() {
        let samples = generate_sine(110.0, 44100.0, 4096);
        let hz = estimate_pitch(&samples, 44100.0, 80.0, 1000.0).unwrap();
        assert!((hz - 110.0).abs() <= lag_resolution(110.0, 44100.0) + 0.01, "got {}", hz);

        let samples = generate_sine(880.0, 44100.0, 4096);
        let hz = estimate_pitch(&samples, 44100.0, 80.0, 1000.0).unwrap();
        assert!((hz - 880.0).abs() <= lag_resolution(880.0, 44100.0) + 0.01, "got {}", hz);
    }

    #[test]
    fn test_harmonics_resolve_to_fundamental() {
        let n = 4096;
        let sample_rate = 44100.0;
        let fundamental = 220.0;
        let samples: Vec<f32> = (0..n)
            .map(|i| {
                let t = i as f32 / sample_rate;
                0.5 * (2.0 * PI * fundamental * t).sin()
                    + 0.3 * (2.0 * PI * 2.0 * fundamental * t).sin()
                    + 0.1 * (2.0 * PI * 3.0 * fundamental * t).sin()
            })
            .collect();
        let hz = estimate_pitch(&samples, sample_rate, 80.0, 1000.0).unwrap();
        assert!(
            (hz - fundamental).abs() < 5.0,
            "should pick the fundamental despite harmonics, got {}",
            hz
        );
    }

    #[test]
    fn test_silence_yields_none() {
        let samples = vec![0.0f32; 4096];
        assert!(estimate_pitch(&samples, 44100.0, 80.0, 1000.0).is_none());
    }

    #[test]
    fn test_empty_and_tiny_segments() {
        assert!(estimate_pitch(&[], 44100.0, 80.0, 1000.0).is_none());
        assert!(estimate_pitch(&[0.5], 44100.0, 80.0, 1000.0).is_none());
        // Too short to hold the minimum lag for 80 Hz at 44.1 kHz
        let samples = generate_sine(440.0, 44100.0, 32);
        assert!(estimate_pitch(&samples, 44100.0, 80.0, 1000.0).is_none());
    }

    #[test]
    fn test_out_of_range_frequency_discarded() {
        // A 2 kHz tone has its true period below the minimum lag; whatever
        // lag wins must still land inside [80, 1000] or be rejected.
        let samples = generate_sine(2000.0, 44100.0, 4096);
        if let Some(hz) = estimate_pitch(&samples, 44100.0, 80.0, 1000.0) {
            assert!((80.0..=1000.0).contains(&hz));
        }
    }
}
