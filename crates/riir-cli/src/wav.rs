//! WAV input and output for the `process` command.

use anyhow::{Context, Result};
use std::path::Path;

/// Decoded audio, one buffer per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelAudio {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl ChannelAudio {
    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Interleaves the channels back into frame order.
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.frames();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for i in 0..frames {
            out.extend(self.channels.iter().map(|ch| ch[i]));
        }
        out
    }
}

/// Reads a WAV file. Integer formats are scaled to [-1, 1).
pub fn read_wav(path: &Path) -> Result<ChannelAudio> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();
    let channel_count = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<f32>, hound::Error>>()
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, hound::Error>>(),
    }
    .with_context(|| format!("Failed to decode WAV samples: {}", path.display()))?;

    let mut channels = vec![Vec::with_capacity(samples.len() / channel_count); channel_count];
    for frame in samples.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(ChannelAudio {
        sample_rate: spec.sample_rate,
        channels,
    })
}

/// Writes 32-bit float WAV.
pub fn write_float_wav(path: &Path, audio: &ChannelAudio) -> Result<()> {
    let spec = hound::WavSpec {
        channels: audio.channels.len() as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    for sample in audio.interleaved() {
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;
    Ok(())
}

/// BLAKE3 hash of the interleaved little-endian f32 PCM.
pub fn pcm_hash(audio: &ChannelAudio) -> String {
    let pcm: Vec<u8> = audio
        .interleaved()
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    blake3::hash(&pcm).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stereo() -> ChannelAudio {
        ChannelAudio {
            sample_rate: 44100,
            channels: vec![vec![0.1, 0.2, 0.3], vec![-0.1, -0.2, -0.3]],
        }
    }

    #[test]
    fn test_interleave() {
        assert_eq!(stereo().interleaved(), vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3]);
    }

    #[test]
    fn test_float_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_float_wav(&path, &stereo()).unwrap();
        assert_eq!(read_wav(&path).unwrap(), stereo());
    }

    #[test]
    fn test_reads_16_bit_int() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono16.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(16384i16).unwrap();
        writer.write_sample(-32768i16).unwrap();
        writer.finalize().unwrap();

        let audio = read_wav(&path).unwrap();
        assert_eq!(audio.channels, vec![vec![0.5, -1.0]]);
    }

    #[test]
    fn test_hash_depends_on_samples() {
        let a = stereo();
        let mut b = stereo();
        b.channels[1][2] = 0.0;
        assert_eq!(pcm_hash(&a), pcm_hash(&stereo()));
        assert_ne!(pcm_hash(&a), pcm_hash(&b));
        assert_eq!(pcm_hash(&a).len(), 64);
    }
}
