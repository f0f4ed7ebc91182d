//! Splits oversized recordings into API-size-compliant WAV segments.
//!
//! The transcription API rejects uploads over 25 MB, so long lectures are
//! sliced into segments below the configured byte budget. Slicing happens at
//! sample-frame boundaries, never mid-frame, and every segment is re-emitted
//! with its own WAV header so it is a valid standalone upload.

use std::io::Cursor;
use std::time::Duration;

use hound::WavSpec;
use log::{debug, info};

use super::AudioFormat;

/// Never split into segments shorter than this unless the input itself is.
pub const MIN_CHUNK_SECS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("No audio to process")]
    EmptyInput,
    #[error("Unsupported audio format '{hint}' (supported: wav)")]
    UnsupportedFormat { hint: String },
    #[error("Failed to decode audio: {0}")]
    Decode(#[from] hound::Error),
    #[error(
        "A segment would stay above {max_bytes} bytes even at the minimum {min_secs}s duration"
    )]
    ChunkOverLimit { max_bytes: usize, min_secs: u32 },
    #[error("Encoded segment is {size_bytes} bytes, above the {max_bytes} byte budget")]
    SegmentOverBudget { size_bytes: usize, max_bytes: usize },
}

/// One size-bounded slice of the source audio.
///
/// `index` is the sole reassembly key; segments tile the source with no gaps
/// and no overlaps.
#[derive(Debug, Clone)]
pub struct AudioSegment {
    pub index: usize,
    pub bytes: Vec<u8>,
    pub duration: Duration,
}

impl AudioSegment {
    /// Upload filename for this segment.
    pub fn filename(&self) -> String {
        format!("chunk-{}.wav", self.index)
    }
}

/// Decoded sample data, kept in the source's own sample format so chunks
/// round-trip without a quality change.
enum Samples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

/// Split `audio_bytes` into ordered segments no larger than `max_chunk_bytes`.
///
/// A file that already fits the budget is returned as a single segment
/// without a re-encode pass. Pure function of its inputs.
pub fn split(
    audio_bytes: &[u8],
    format: AudioFormat,
    max_chunk_bytes: usize,
) -> Result<Vec<AudioSegment>, ChunkError> {
    if audio_bytes.is_empty() {
        return Err(ChunkError::EmptyInput);
    }
    match format {
        AudioFormat::Wav => split_wav(audio_bytes, max_chunk_bytes),
    }
}

fn split_wav(audio_bytes: &[u8], max_chunk_bytes: usize) -> Result<Vec<AudioSegment>, ChunkError> {
    let reader = hound::WavReader::new(Cursor::new(audio_bytes))?;
    let spec = reader.spec();
    let total_frames = reader.duration() as usize;
    if total_frames == 0 {
        return Err(ChunkError::EmptyInput);
    }

    let total_duration = frames_to_duration(total_frames, spec.sample_rate);
    debug!(
        "Audio spec: {} Hz, {} channel(s), {} bits, {:.1}s",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        total_duration.as_secs_f64()
    );

    // Small files skip slicing entirely: one segment, no re-encode.
    if audio_bytes.len() <= max_chunk_bytes {
        info!(
            "Audio fits the {} byte budget, keeping a single segment",
            max_chunk_bytes
        );
        return Ok(vec![AudioSegment {
            index: 0,
            bytes: audio_bytes.to_vec(),
            duration: total_duration,
        }]);
    }

    let samples = read_samples(reader)?;
    let channels = spec.channels as usize;

    // Measure the real container overhead for this spec: float WAVs carry an
    // extended fmt chunk plus a fact chunk, so a fixed allowance undershoots.
    let header_bytes = encode_chunk(spec, &samples, 0, 0)?.len();
    let bytes_per_frame = channels * ((spec.bits_per_sample as usize + 7) / 8);
    let chunk_frames = max_chunk_bytes.saturating_sub(header_bytes) / bytes_per_frame;
    let min_frames = MIN_CHUNK_SECS as usize * spec.sample_rate as usize;
    if chunk_frames < min_frames {
        return Err(ChunkError::ChunkOverLimit {
            max_bytes: max_chunk_bytes,
            min_secs: MIN_CHUNK_SECS,
        });
    }

    let mut segments = Vec::new();
    let mut start_frame = 0;
    while start_frame < total_frames {
        // The final segment absorbs any remainder shorter than a full chunk.
        let end_frame = (start_frame + chunk_frames).min(total_frames);
        let bytes = encode_chunk(spec, &samples, start_frame * channels, end_frame * channels)?;
        if bytes.len() > max_chunk_bytes {
            return Err(ChunkError::SegmentOverBudget {
                size_bytes: bytes.len(),
                max_bytes: max_chunk_bytes,
            });
        }
        segments.push(AudioSegment {
            index: segments.len(),
            bytes,
            duration: frames_to_duration(end_frame - start_frame, spec.sample_rate),
        });
        start_frame = end_frame;
    }

    info!(
        "Split {:.1}s of audio into {} segment(s)",
        total_duration.as_secs_f64(),
        segments.len()
    );
    Ok(segments)
}

fn read_samples(reader: hound::WavReader<Cursor<&[u8]>>) -> Result<Samples, ChunkError> {
    let samples = match reader.spec().sample_format {
        hound::SampleFormat::Int => Samples::Int(
            reader
                .into_samples::<i32>()
                .collect::<Result<Vec<_>, _>>()?,
        ),
        hound::SampleFormat::Float => Samples::Float(
            reader
                .into_samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };
    Ok(samples)
}

/// Re-emit one frame range as a standalone WAV with the source's spec.
fn encode_chunk(
    spec: WavSpec,
    samples: &Samples,
    start: usize,
    end: usize,
) -> Result<Vec<u8>, hound::Error> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        match samples {
            Samples::Int(all) => {
                for &sample in &all[start..end] {
                    writer.write_sample(sample)?;
                }
            }
            Samples::Float(all) => {
                for &sample in &all[start..end] {
                    writer.write_sample(sample)?;
                }
            }
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

fn frames_to_duration(frames: usize, sample_rate: u32) -> Duration {
    Duration::from_secs_f64(frames as f64 / sample_rate as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::SampleFormat;

    fn make_wav(secs: u32, sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..(secs * sample_rate) {
                writer.write_sample((i % 128) as i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_small_file_is_single_segment() {
        let wav = make_wav(2, 16_000);
        let segments = split(&wav, AudioFormat::Wav, 24 * 1024 * 1024).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[0].bytes, wav);
        assert!((segments[0].duration.as_secs_f64() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_file_tiles_duration_under_budget() {
        // 20s at 16kHz/16-bit mono is ~640kB; a 200kB budget forces slicing.
        let max_bytes = 200_000;
        let wav = make_wav(20, 16_000);
        assert!(wav.len() > max_bytes);

        let segments = split(&wav, AudioFormat::Wav, max_bytes).unwrap();
        assert!(segments.len() >= 2);

        let total: f64 = segments.iter().map(|s| s.duration.as_secs_f64()).sum();
        assert!((total - 20.0).abs() < 1.0 / 16_000.0);

        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index, i);
            assert!(segment.bytes.len() <= max_bytes);
            // Every segment must be a decodable standalone WAV.
            let reader = hound::WavReader::new(Cursor::new(segment.bytes.as_slice())).unwrap();
            assert!(reader.duration() > 0);
        }
    }

    fn make_float_wav(secs: u32, sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..(secs * sample_rate) {
                writer.write_sample((i % 128) as f32 / 128.0).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_float_wav_segments_stay_under_budget() {
        // Budget leaves room for ~6s of float frames plus only a plain PCM
        // header; the larger float header must come out of the frame count,
        // not push the segment over the budget.
        let max_bytes = 6 * 16_000 * 4 + 44;
        let wav = make_float_wav(15, 16_000);
        assert!(wav.len() > max_bytes);

        let segments = split(&wav, AudioFormat::Wav, max_bytes).unwrap();
        assert!(segments.len() >= 2);

        let total: f64 = segments.iter().map(|s| s.duration.as_secs_f64()).sum();
        assert!((total - 15.0).abs() < 1.0 / 16_000.0);

        for segment in &segments {
            assert!(segment.bytes.len() <= max_bytes);
            let reader = hound::WavReader::new(Cursor::new(segment.bytes.as_slice())).unwrap();
            assert!(reader.duration() > 0);
        }
    }

    #[test]
    fn test_float_wav_budget_below_minimum_is_a_typed_error() {
        // Exactly 5s of float frames plus a PCM-sized header: the float
        // header overhead pushes the minimum chunk over the budget, which
        // must surface as an error, never a panic.
        let max_bytes = 5 * 16_000 * 4 + 44;
        let wav = make_float_wav(15, 16_000);
        let err = split(&wav, AudioFormat::Wav, max_bytes).unwrap_err();
        assert!(matches!(err, ChunkError::ChunkOverLimit { .. }));
    }

    #[test]
    fn test_empty_input() {
        let err = split(&[], AudioFormat::Wav, 1024).unwrap_err();
        assert!(matches!(err, ChunkError::EmptyInput));
    }

    #[test]
    fn test_zero_duration_wav() {
        let wav = make_wav(0, 16_000);
        let err = split(&wav, AudioFormat::Wav, 1024).unwrap_err();
        assert!(matches!(err, ChunkError::EmptyInput));
    }

    #[test]
    fn test_budget_below_minimum_chunk_fails() {
        // 50kB cannot hold even the 5s minimum at 16kHz/16-bit mono.
        let wav = make_wav(20, 16_000);
        let err = split(&wav, AudioFormat::Wav, 50_000).unwrap_err();
        assert!(matches!(err, ChunkError::ChunkOverLimit { .. }));
    }

    #[test]
    fn test_segment_filename() {
        let segment = AudioSegment {
            index: 3,
            bytes: vec![0],
            duration: Duration::from_secs(1),
        };
        assert_eq!(segment.filename(), "chunk-3.wav");
    }
}
