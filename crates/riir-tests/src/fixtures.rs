//! Temporary files for CLI-level tests.

use riir_spec::AllpassSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding input WAVs and spec files.
pub struct WavFixture {
    pub root: TempDir,
}

impl WavFixture {
    /// Create a new empty fixture directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path for a file inside the fixture (not created).
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Write an interleaved 16-bit integer WAV.
    pub fn write_int16(&self, name: &str, sample_rate: u32, channels: u16, frames: &[i16]) -> PathBuf {
        let path = self.file(name);
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create WAV");
        for &sample in frames {
            writer.write_sample(sample).expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
        path
    }

    /// Write an interleaved 32-bit float WAV.
    pub fn write_float(&self, name: &str, sample_rate: u32, channels: u16, frames: &[f32]) -> PathBuf {
        let path = self.file(name);
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create WAV");
        for &sample in frames {
            writer.write_sample(sample).expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
        path
    }

    /// Write a spec as a JSON config file.
    pub fn write_spec(&self, name: &str, spec: &AllpassSpec) -> PathBuf {
        let path = self.file(name);
        let json = spec.to_json_pretty().expect("Failed to serialize spec");
        fs::write(&path, json).expect("Failed to write spec file");
        path
    }
}

impl Default for WavFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Read every sample of a float WAV, interleaved.
pub fn read_float(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let reader = hound::WavReader::open(path).expect("Failed to open WAV");
    let spec = reader.spec();
    let samples = reader
        .into_samples::<f32>()
        .collect::<Result<Vec<_>, _>>()
        .expect("Failed to read samples");
    (spec, samples)
}
