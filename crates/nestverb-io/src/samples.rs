//! Stereo audio buffer for file-level processing.

/// A pair of stereo audio buffers (left and right channels).
///
/// Each channel is a `Vec<f32>` of equal length.
///
/// # Example
///
/// ```rust
/// use nestverb_io::StereoSamples;
///
/// let samples = StereoSamples::new(vec![1.0; 4], vec![0.5; 4]);
/// assert_eq!(samples.len(), 4);
/// assert_eq!(samples.to_interleaved()[..2], [1.0, 0.5]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create new stereo samples from left and right channels.
    ///
    /// The shorter channel is zero-padded to the length of the longer one.
    pub fn new(mut left: Vec<f32>, mut right: Vec<f32>) -> Self {
        let len = left.len().max(right.len());
        left.resize(len, 0.0);
        right.resize(len, 0.0);
        Self { left, right }
    }

    /// Silent buffer of `len` samples per channel.
    pub fn silence(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Create stereo samples from mono by duplicating to both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Deinterleave `[l0, r0, l1, r1, ...]`. A trailing odd sample is dropped.
    pub fn from_interleaved(interleaved: &[f32]) -> Self {
        let (left, right) = interleaved
            .chunks_exact(2)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        Self { left, right }
    }

    /// Interleave into `[l0, r0, l1, r1, ...]`.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
            .collect()
    }

    /// Get the number of samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Check if the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Append `samples` of silence to both channels.
    pub fn extend_silence(&mut self, samples: usize) {
        let len = self.len() + samples;
        self.left.resize(len, 0.0);
        self.right.resize(len, 0.0);
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .map(|x| x.abs())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pads_shorter_channel() {
        let stereo = StereoSamples::new(vec![1.0, 2.0, 3.0], vec![4.0]);
        assert_eq!(stereo.right, vec![4.0, 0.0, 0.0]);
        assert_eq!(stereo.len(), 3);
    }

    #[test]
    fn test_from_mono() {
        let stereo = StereoSamples::from_mono(vec![1.0, 2.0, 3.0]);
        assert_eq!(stereo.left, stereo.right);
    }

    #[test]
    fn test_interleaved() {
        let stereo = StereoSamples::new(vec![1.0, 3.0], vec![2.0, 4.0]);
        let interleaved = stereo.to_interleaved();
        assert_eq!(interleaved, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(StereoSamples::from_interleaved(&interleaved), stereo);

        let odd = StereoSamples::from_interleaved(&[1.0, 2.0, 3.0]);
        assert_eq!(odd.len(), 1);
    }

    #[test]
    fn test_extend_silence_and_peak() {
        let mut stereo = StereoSamples::new(vec![0.5], vec![-0.75]);
        stereo.extend_silence(3);
        assert_eq!(stereo.len(), 4);
        assert_eq!(stereo.left, vec![0.5, 0.0, 0.0, 0.0]);
        assert_eq!(stereo.peak(), 0.75);

        assert!(StereoSamples::silence(0).is_empty());
        assert_eq!(StereoSamples::default().peak(), 0.0);
    }
}
