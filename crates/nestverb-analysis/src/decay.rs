//! Reverberation decay measurement.
//!
//! Decay times come from the Schroeder energy decay curve (EDC), the
//! backward-integrated squared impulse response:
//!
//! ```text
//! EDC[n] = 10·log10( Σ_{k≥n} h[k]² / Σ_k h[k]² )
//! ```
//!
//! A line fitted to a stretch of the EDC gives the decay slope in dB per
//! sample, which extrapolates to RT60.
//!
//! Reference: M. R. Schroeder, "New Method of Measuring Reverberation Time",
//! JASA 37 (1965).

/// Floor of the decay curve in dB.
pub const EDC_FLOOR_DB: f32 = -100.0;

/// Energy decay curve in dB, 0 dB at the first sample.
///
/// Accumulated in f64 so that late, tiny tail energies are not lost.
pub fn energy_decay_curve(ir: &[f32]) -> Vec<f32> {
    let mut remaining: Vec<f64> = ir
        .iter()
        .rev()
        .scan(0.0f64, |sum, &x| {
            *sum += f64::from(x) * f64::from(x);
            Some(*sum)
        })
        .collect();
    remaining.reverse();

    let Some(&total) = remaining.first() else {
        return Vec::new();
    };
    if total <= 0.0 {
        return vec![EDC_FLOOR_DB; ir.len()];
    }

    remaining
        .iter()
        .map(|&e| ((10.0 * (e / total).log10()) as f32).max(EDC_FLOOR_DB))
        .collect()
}

/// Decay times of one impulse response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTimes {
    /// Reverberation time, extrapolated to 60 dB of decay.
    pub rt60_seconds: f32,
    /// Early decay time: 0 to -10 dB, extrapolated to 60 dB.
    pub edt_seconds: f32,
    /// Whether RT60 came from the -5..-35 dB fit (otherwise -5..-25 dB).
    pub from_t30: bool,
}

/// Estimate RT60 and EDT from an impulse response.
///
/// Returns `None` if the response never decays 25 dB.
pub fn decay_times(ir: &[f32], sample_rate: f32) -> Option<DecayTimes> {
    let edc = energy_decay_curve(ir);

    let (rt60, from_t30) = match decay_slope(&edc, -5.0, -35.0) {
        Some(slope) => (-60.0 / slope, true),
        None => (-60.0 / decay_slope(&edc, -5.0, -25.0)?, false),
    };
    let edt = decay_slope(&edc, 0.0, -10.0).map_or(rt60, |slope| -60.0 / slope);

    Some(DecayTimes {
        rt60_seconds: rt60 / sample_rate,
        edt_seconds: edt / sample_rate,
        from_t30,
    })
}

/// Least-squares slope of the EDC between two levels, in dB per sample.
///
/// `None` unless both levels are reached and the fitted slope is negative.
fn decay_slope(edc: &[f32], start_db: f32, end_db: f32) -> Option<f32> {
    let start = edc.iter().position(|&e| e <= start_db)?;
    let end = edc.iter().position(|&e| e <= end_db)?;
    if end <= start {
        return None;
    }

    let points = &edc[start..=end];
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for (i, &y) in points.iter().enumerate() {
        let x = i as f64;
        let y = f64::from(y);
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
    }

    let denom = n * sxx - sx * sx;
    if denom <= 0.0 {
        return None;
    }
    let slope = ((n * sxy - sx * sy) / denom) as f32;
    (slope < 0.0).then_some(slope)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exponential decay reaching -60 dB after `rt60` seconds.
    fn exponential(rt60: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        // Amplitude falls 60 dB over rt60: a = 10^(-3 / (rt60 · sr))
        let a = 10f32.powf(-3.0 / (rt60 * sample_rate));
        (0..len).map(|n| a.powi(n as i32)).collect()
    }

    #[test]
    fn test_edc_starts_at_zero_db() {
        let edc = energy_decay_curve(&[1.0, 0.5, 0.25]);
        assert_eq!(edc.len(), 3);
        assert!(edc[0].abs() < 1e-6);
        assert!(edc.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_edc_empty_and_silent() {
        assert!(energy_decay_curve(&[]).is_empty());
        assert_eq!(energy_decay_curve(&[0.0; 4]), vec![EDC_FLOOR_DB; 4]);
    }

    #[test]
    fn test_rt60_of_exponential() {
        let sr = 8000.0;
        let ir = exponential(0.5, sr, 8000);
        let times = decay_times(&ir, sr).unwrap();

        assert!(times.from_t30);
        assert!((times.rt60_seconds - 0.5).abs() < 0.05, "{times:?}");
        assert!((times.edt_seconds - 0.5).abs() < 0.05, "{times:?}");
    }

    #[test]
    fn test_no_decay() {
        assert!(decay_times(&[1.0; 100], 48000.0).is_none());
        assert!(decay_times(&[], 48000.0).is_none());
    }
}
