use crate::error::WaveformError;

/// Read access to decoded, planar audio. Samples are expected in `[-1, 1]`.
pub trait SampleSource {
    fn channel_count(&self) -> usize;

    /// Frames per channel, shared by every channel.
    fn len(&self) -> usize;

    fn channel(&self, index: usize) -> &[f32];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Planar sample storage, one `Vec` per channel.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    len: usize,
}

impl SampleBuffer {
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Result<Self, WaveformError> {
        let len = channels.first().ok_or(WaveformError::NoChannels)?.len();
        if let Some((channel, data)) = channels
            .iter()
            .enumerate()
            .find(|(_, data)| data.len() != len)
        {
            return Err(WaveformError::ChannelLengthMismatch {
                channel,
                expected: len,
                found: data.len(),
            });
        }
        Ok(Self { channels, len })
    }

    /// Split frame-major interleaved samples into channels. A trailing
    /// partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Result<Self, WaveformError> {
        if channels == 0 {
            return Err(WaveformError::InvalidChannelCount(channels));
        }
        let frames = samples.len() / channels;
        let mut planar = vec![Vec::with_capacity(frames); channels];
        for frame in samples.chunks_exact(channels) {
            for (c, &s) in frame.iter().enumerate() {
                planar[c].push(s);
            }
        }
        Self::from_channels(planar)
    }
}

impl SampleSource for SampleBuffer {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_split() {
        let buf = SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2, 0.3], 2).unwrap();
        assert_eq!(buf.channel_count(), 2);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.channel(0), &[0.1, 0.2]);
        assert_eq!(buf.channel(1), &[-0.1, -0.2]);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        assert!(matches!(
            SampleBuffer::from_channels(vec![]),
            Err(WaveformError::NoChannels)
        ));
        assert!(matches!(
            SampleBuffer::from_channels(vec![vec![0.0; 4], vec![0.0; 3]]),
            Err(WaveformError::ChannelLengthMismatch { channel: 1, expected: 4, found: 3 })
        ));
        assert!(matches!(
            SampleBuffer::from_interleaved(&[0.0; 4], 0),
            Err(WaveformError::InvalidChannelCount(0))
        ));
    }
}
