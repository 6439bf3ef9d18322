use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex, PoisonError};

// keep roughly the largest analysis window
const RING_CAP: usize = 32768;

/// Live mono sample feed from the best available input device.
pub struct AudioCapture {
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    _stream: cpal::Stream,
}

impl AudioCapture {
    pub fn start() -> Result<Self> {
        let device = pick_loopback_device()
            .or_else(|| cpal::default_host().default_input_device())
            .ok_or_else(|| anyhow!("no audio input device"))?;

        if let Ok(name) = device.name() {
            log::info!("cpal input device: {name}");
        }

        let config = device
            .default_input_config()
            .context("querying default input config")?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels().max(1) as usize;

        let samples = Arc::new(Mutex::new(Vec::with_capacity(RING_CAP)));
        let sink = Arc::clone(&samples);

        let err_fn = |err| {
            log::warn!("cpal stream error: {err}");
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_input_stream(
                &config.into(),
                move |data: &[f32], _| push_frames(&sink, data, channels, |s| s),
                err_fn,
                None,
            )?,
            cpal::SampleFormat::I16 => device.build_input_stream(
                &config.into(),
                move |data: &[i16], _| {
                    push_frames(&sink, data, channels, |s| s as f32 / i16::MAX as f32)
                },
                err_fn,
                None,
            )?,
            cpal::SampleFormat::U16 => device.build_input_stream(
                &config.into(),
                move |data: &[u16], _| {
                    push_frames(&sink, data, channels, |s| {
                        (s as f32 / u16::MAX as f32) * 2.0 - 1.0
                    })
                },
                err_fn,
                None,
            )?,
            other => return Err(anyhow!("unsupported sample format {other:?}")),
        };

        stream.play().context("starting input stream")?;
        Ok(Self {
            samples,
            sample_rate,
            _stream: stream,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Drains everything captured since the last call.
    pub fn take_samples(&self) -> Vec<f32> {
        let mut guard = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

fn push_frames<T: Copy>(
    buf: &Arc<Mutex<Vec<f32>>>,
    data: &[T],
    channels: usize,
    to_f32: impl Fn(T) -> f32,
) {
    let mut guard = buf.lock().unwrap_or_else(PoisonError::into_inner);
    guard.reserve(data.len() / channels);
    for frame in data.chunks(channels) {
        let sum: f32 = frame.iter().map(|&s| to_f32(s)).sum();
        guard.push(sum / frame.len() as f32);
    }

    if guard.len() > RING_CAP {
        let drop = guard.len() - RING_CAP;
        guard.drain(0..drop);
    }
}

// name fragments of system-output monitors vs. devices that hear the room
const LOOPBACK_HINTS: [&str; 3] = ["monitor", "loopback", "stereo mix"];
const ROOM_HINTS: [&str; 3] = ["mic", "headset", "camera"];

/// Highest-scoring input device of the default host, when any looks like a
/// loopback of what is playing.
fn pick_loopback_device() -> Option<cpal::Device> {
    cpal::default_host()
        .input_devices()
        .ok()?
        .map(|d| (device_score(&d.name().unwrap_or_default()), d))
        .filter(|(score, _)| *score > 0)
        .max_by_key(|(score, _)| *score)
        .map(|(_, d)| d)
}

fn device_score(name: &str) -> i32 {
    let lname = name.to_lowercase();
    let hits = |hints: &[&str]| hints.iter().filter(|h| lname.contains(*h)).count() as i32;
    hits(&LOOPBACK_HINTS) - hits(&ROOM_HINTS)
}
