//! Audio device output
//!
//! A cpal stream pulls from a lock-free voice queue: the game thread pushes
//! `Voice`s (a shared PCM buffer plus gain) and the audio callback mixes all
//! active voices into the device buffer, filling any shortfall with silence.

use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::HeapRb;

use crate::consts::SAMPLE_RATE;

/// Most simultaneous effects a battle plausibly triggers
const VOICE_QUEUE_CAPACITY: usize = 32;

/// A fire-and-forget playback request
#[derive(Clone)]
pub struct Voice {
    pub pcm: Arc<Vec<i16>>,
    pub gain: f32,
}

/// One playing voice inside the mixer callback
struct ActiveVoice {
    pcm: Arc<Vec<i16>>,
    gain: f32,
    playhead: f32,
}

/// cpal stream plus the producer side of the voice queue
pub struct AudioOutput {
    _stream: Stream,
    producer: ringbuf::HeapProd<Voice>,
}

impl AudioOutput {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("no audio output device found"))?;

        let sample_rate = Self::find_sample_rate(&device)?;
        let config = StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let ring = HeapRb::<Voice>::new(VOICE_QUEUE_CAPACITY);
        let (producer, mut consumer) = ring.split();

        let step = Self::resample_step(sample_rate);
        let mut active: Vec<ActiveVoice> = Vec::new();
        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                while let Some(voice) = consumer.try_pop() {
                    active.push(ActiveVoice {
                        pcm: voice.pcm,
                        gain: voice.gain,
                        playhead: 0.0,
                    });
                }

                for frame in data.chunks_mut(2) {
                    let mut mixed = 0.0f32;
                    for voice in &mut active {
                        // Nearest-sample resample when the device rate differs
                        if let Some(&s) = voice.pcm.get(voice.playhead as usize) {
                            mixed += s as f32 / 32768.0 * voice.gain;
                            voice.playhead += step;
                        }
                    }
                    let sample = mixed.clamp(-1.0, 1.0);
                    for out in frame {
                        *out = sample;
                    }
                }

                active.retain(|v| (v.playhead as usize) < v.pcm.len());
            },
            |err| {
                log::error!("audio stream error: {err}");
            },
            None,
        )?;

        stream.play()?;
        log::info!("audio output initialized at {sample_rate} Hz");

        Ok(Self {
            _stream: stream,
            producer,
        })
    }

    /// Playhead increment so buffers rendered at `SAMPLE_RATE` keep their
    /// pitch on a device running at a different rate
    fn resample_step(device_rate: u32) -> f32 {
        SAMPLE_RATE as f32 / device_rate as f32
    }

    fn find_sample_rate(device: &cpal::Device) -> anyhow::Result<u32> {
        for config in device.supported_output_configs()? {
            if config.channels() == 2
                && config.min_sample_rate().0 <= SAMPLE_RATE
                && config.max_sample_rate().0 >= SAMPLE_RATE
                && config.sample_format() == SampleFormat::F32
            {
                return Ok(SAMPLE_RATE);
            }
        }
        Ok(device.default_output_config()?.sample_rate().0)
    }

    /// Queue a voice; dropped if the queue is full
    pub fn play(&mut self, voice: Voice) {
        if self.producer.try_push(voice).is_err() {
            log::debug!("voice queue full, dropping effect");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_step_preserves_pitch() {
        assert_eq!(AudioOutput::resample_step(SAMPLE_RATE), 1.0);
        assert_eq!(AudioOutput::resample_step(SAMPLE_RATE / 2), 2.0);
        assert_eq!(AudioOutput::resample_step(SAMPLE_RATE * 2), 0.5);
    }
}
