//! Microphone capture and WAV encoding.

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};
use hound::{WavSpec, WavWriter};
use log::debug;

use crate::errors::SpeechError;

/// Sample rate for audio recording (16kHz), the rate transcription models
/// expect as input.
const SAMPLE_RATE: u32 = 16000;

/// Number of audio channels (mono).
const CHANNELS: u16 = 1;

/// Bits per sample for WAV encoding.
const BITS_PER_SAMPLE: u16 = 16;

/// Peak amplitude below which a capture window counts as silence.
const SILENCE_THRESHOLD: i16 = 500;

/// Trailing silence after speech that ends a capture early.
const TRAILING_SILENCE_WINDOW: Duration = Duration::from_millis(1500);

/// Poll interval while waiting for a capture to finish.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Records audio from the default input device.
///
/// Returns 16-bit PCM samples. Capture runs until `max_duration`, or ends
/// early once the speaker has said something and then stayed quiet for
/// `TRAILING_SILENCE_WINDOW`. The caller decides what to do with leading
/// silence.
pub fn record_audio(max_duration: Duration) -> Result<Vec<i16>, SpeechError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| SpeechError::Device("No input device available".to_string()))?;

    let config = StreamConfig {
        channels: CHANNELS,
        sample_rate: SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    let samples: Arc<Mutex<Vec<i16>>> = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&samples);

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _| {
                let mut buffer = writer.lock().unwrap();
                buffer.extend(data.iter().map(|s| (s * i16::MAX as f32) as i16));
            },
            |err| debug!("Input stream error: {}", err),
            None,
        )
        .map_err(|e| SpeechError::Device(format!("Failed to open input stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| SpeechError::Device(format!("Failed to start capture: {}", e)))?;

    let started = Instant::now();
    loop {
        std::thread::sleep(POLL_INTERVAL);
        if started.elapsed() >= max_duration {
            break;
        }

        let buffer = samples.lock().unwrap();
        if has_speech(&buffer) && ends_silent(&buffer, TRAILING_SILENCE_WINDOW) {
            debug!("Speaker went quiet, stopping capture early");
            break;
        }
    }
    drop(stream);

    let captured = samples.lock().unwrap().clone();
    debug!("Captured {} samples", captured.len());
    Ok(captured)
}

/// Check whether the first `window` of a capture holds any signal.
///
/// Used to decide that the speaker never started talking within the listen
/// timeout, so the network transcription call can be skipped entirely.
pub fn starts_silent(samples: &[i16], window: Duration) -> bool {
    let head = &samples[..samples.len().min(window_len(window))];
    head.iter().all(|s| s.unsigned_abs() < SILENCE_THRESHOLD as u16)
}

/// Check whether a capture holds any audible signal at all.
pub fn has_speech(samples: &[i16]) -> bool {
    samples.iter().any(|s| s.unsigned_abs() >= SILENCE_THRESHOLD as u16)
}

/// Check whether the last `window` of a capture is silent.
///
/// A capture shorter than the window is never considered trailing-silent,
/// so early stop cannot trigger before the window has even elapsed.
pub fn ends_silent(samples: &[i16], window: Duration) -> bool {
    let window_len = window_len(window);
    if samples.len() < window_len {
        return false;
    }
    samples[samples.len() - window_len..]
        .iter()
        .all(|s| s.unsigned_abs() < SILENCE_THRESHOLD as u16)
}

/// Number of samples covering a duration at the capture rate.
fn window_len(window: Duration) -> usize {
    (SAMPLE_RATE as u128 * window.as_millis() / 1000) as usize
}

/// Encode PCM samples as an in-memory WAV file.
pub fn encode_wav(samples: &[i16]) -> Result<Vec<u8>, SpeechError> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| SpeechError::Device(format!("Failed to create WAV writer: {}", e)))?;
        for sample in samples {
            writer
                .write_sample(*sample)
                .map_err(|e| SpeechError::Device(format!("Failed to write WAV sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| SpeechError::Device(format!("Failed to finalize WAV: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
