//! Byte-buffer decode strategies
//!
//! Raw byte frames arrive in one of two layouts and are converted to signed
//! 16-bit samples before they enter the history buffer. Both decoders are
//! pure functions of their input; neither touches the display ceiling beyond
//! what the layout itself requires (clamping happens during reduction).

use crate::config::VisualizerConfig;

/// How `submit_raw_bytes` interprets a byte buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeMode {
    /// Two bytes per sample, little-endian signed 16-bit PCM
    #[default]
    Pcm16Le,
    /// Legacy effect mode: each byte's magnitude is offset, wrapped through
    /// the signed-byte range and scaled into a negated amplitude; only the
    /// first `fold_limit` samples are populated
    MagnitudeFold,
}

/// Decode a raw byte buffer into signed samples using the given strategy
///
/// A trailing odd byte is ignored. Malformed or empty input yields an empty
/// or zero-valued buffer, never an error.
pub fn decode_samples(bytes: &[u8], mode: DecodeMode, config: &VisualizerConfig) -> Vec<i16> {
    match mode {
        DecodeMode::Pcm16Le => decode_pcm16_le(bytes),
        DecodeMode::MagnitudeFold => decode_magnitude_fold(bytes, config),
    }
}

fn decode_pcm16_le(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Magnitude-fold decode
///
/// `t = ((|b| + 128) as i8) * max_amplitude / 128`, sample = `-t`.
/// The cast back to a signed byte wraps for inputs near zero (|b| + 128
/// lands in 128..=256), so a zero byte folds to the full ceiling while a
/// -128 byte folds to silence. The wraparound is part of the effect's look
/// and is pinned by tests, not fixed.
fn decode_magnitude_fold(bytes: &[u8], config: &VisualizerConfig) -> Vec<i16> {
    let max = config.max_amplitude as i32;
    let mut samples = vec![0i16; bytes.len() / 2];

    let populated = samples.len().min(config.fold_limit);
    for (i, slot) in samples.iter_mut().enumerate().take(populated) {
        let magnitude = (bytes[i] as i8 as i32).abs();
        let wrapped = (magnitude + 128) as i8;
        let t = wrapped as i32 * max / 128;
        *slot = (-t) as i16;
    }

    samples
}
