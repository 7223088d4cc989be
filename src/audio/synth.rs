//! Procedural sound effect synthesis
//!
//! Every effect is rendered offline into a mono 16-bit PCM buffer at
//! 44.1 kHz, built from layered oscillators, filtered noise, and
//! exponential envelopes. Noise comes from an injected seeded RNG so a
//! given seed always renders the identical buffer.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::SAMPLE_RATE;

/// Default rendered length of most effects, in seconds
pub const BASE_DURATION: f32 = 0.5;

const TAU: f32 = std::f32::consts::TAU;

/// Standard gaussian via Box-Muller
fn gaussian(rng: &mut Pcg32) -> f32 {
    let u1: f32 = rng.random_range(f32::EPSILON..1.0);
    let u2: f32 = rng.random_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn sample_count(duration: f32) -> usize {
    (duration * SAMPLE_RATE as f32) as usize
}

fn to_pcm(wave: impl IntoIterator<Item = f32>) -> Vec<i16> {
    wave.into_iter()
        .map(|s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

/// Metallic clang: two detuned ringing partials plus a burst of noise
pub fn sword_hit(rng: &mut Pcg32, duration: f32) -> Vec<i16> {
    let wave = (0..sample_count(duration)).map(|i| {
        let t = i as f32 / SAMPLE_RATE as f32;

        let freq1 = 2000.0 + 500.0 * (t * 50.0).sin();
        let freq2 = 3000.0 + 300.0 * (t * 30.0).sin();

        let ring1 = (TAU * freq1 * t).sin() * (-t * 8.0).exp();
        let ring2 = (TAU * freq2 * t).sin() * (-t * 6.0).exp() * 0.7;
        let noise = gaussian(rng) * 0.1 * (-t * 10.0).exp();

        (ring1 + ring2 + noise) * 0.3
    });
    to_pcm(wave)
}

/// Fire whoosh: low-passed noise with a fast attack and slow decay
pub fn fireball(rng: &mut Pcg32, duration: f32) -> Vec<i16> {
    let mut filtered = 0.0f32;
    let alpha = 0.1;

    let wave = (0..sample_count(duration)).map(move |i| {
        let t = i as f32 / SAMPLE_RATE as f32;

        filtered = alpha * gaussian(rng) + (1.0 - alpha) * filtered;
        let envelope = (-t * 3.0).exp() * (1.0 - (-t * 20.0).exp());

        filtered * envelope * 0.4
    });
    to_pcm(wave)
}

/// Crystalline shimmer: four high partials decaying at staggered rates
pub fn ice_spell(duration: f32) -> Vec<i16> {
    const PARTIALS: [f32; 4] = [3000.0, 4500.0, 6000.0, 7500.0];

    let wave = (0..sample_count(duration)).map(|i| {
        let t = i as f32 / SAMPLE_RATE as f32;

        let mut sum = 0.0;
        for (k, freq) in PARTIALS.iter().enumerate() {
            let phase = k as f32 * std::f32::consts::FRAC_PI_4;
            let decay = (-t * (5.0 + 2.0 * k as f32)).exp();
            sum += (TAU * freq * t + phase).sin() * decay * (0.8 - 0.15 * k as f32);
        }
        sum * 0.3
    });
    to_pcm(wave)
}

/// Thunder crack: a 100 Hz amplitude-modulated noise burst, gone in 100 ms
pub fn lightning(rng: &mut Pcg32, duration: f32) -> Vec<i16> {
    let wave = (0..sample_count(duration)).map(|i| {
        let t = i as f32 / SAMPLE_RATE as f32;
        if t >= 0.1 {
            return 0.0;
        }

        let crackle = 1.0 + 0.5 * (TAU * 100.0 * t).sin();
        gaussian(rng) * crackle * (-t * 15.0).exp() * 0.5
    });
    to_pcm(wave)
}

/// Ascending chime: C5-E5-G5-C6 entering 100 ms apart
pub fn heal(duration: f32) -> Vec<i16> {
    const NOTES: [f32; 4] = [523.0, 659.0, 784.0, 1047.0];

    let wave = (0..sample_count(duration)).map(|i| {
        let t = i as f32 / SAMPLE_RATE as f32;

        let mut sum = 0.0;
        for (k, freq) in NOTES.iter().enumerate() {
            let delay = k as f32 * 0.1;
            if t >= delay {
                let nt = t - delay;
                sum += (TAU * freq * nt).sin() * (-nt * 2.0).exp();
            }
        }
        sum * 0.25
    });
    to_pcm(wave)
}

/// Monster roar: three wavering low layers plus breath noise, tremolo envelope
pub fn roar(rng: &mut Pcg32, duration: f32) -> Vec<i16> {
    let wave = (0..sample_count(duration)).map(|i| {
        let t = i as f32 / SAMPLE_RATE as f32;

        let f1 = 80.0 + 40.0 * (t * 5.0).sin();
        let f2 = 160.0 + 60.0 * (t * 3.0).sin();
        let f3 = 240.0 + 80.0 * (t * 7.0).sin();

        let layers = (TAU * f1 * t).sin()
            + (TAU * f2 * t).sin() * 0.7
            + (TAU * f3 * t).sin() * 0.5
            + gaussian(rng) * 0.3;

        let envelope = (-t * 1.5).exp() * (1.0 + 0.5 * (t * 8.0).sin());
        layers * envelope * 0.4
    });
    to_pcm(wave)
}

/// Victory fanfare: an ascending C-major melody, one note each half second
pub fn victory_fanfare(duration: f32) -> Vec<i16> {
    const MELODY: [f32; 6] = [262.0, 330.0, 392.0, 523.0, 659.0, 784.0];

    let samples = sample_count(duration);
    let mut wave = vec![0.0f32; samples];

    for (k, freq) in MELODY.iter().enumerate() {
        let start_time = k as f32 * 0.5;
        if start_time >= duration {
            break;
        }

        let note_duration = (duration - start_time).min(0.6);
        let start = (start_time * SAMPLE_RATE as f32) as usize;
        let end = (start + sample_count(note_duration)).min(samples);

        for (j, slot) in wave[start..end].iter_mut().enumerate() {
            let nt = j as f32 / SAMPLE_RATE as f32;
            *slot += (TAU * freq * nt).sin() * (-nt * 2.0).exp() * 0.3;
        }
    }
    to_pcm(wave)
}

/// Footstep thud: heavily low-passed noise with a sharp percussive envelope
pub fn footstep(rng: &mut Pcg32, duration: f32) -> Vec<i16> {
    let mut filtered = 0.0f32;
    let alpha = 0.3;

    let wave = (0..sample_count(duration)).map(move |i| {
        let t = i as f32 / SAMPLE_RATE as f32;

        filtered = alpha * gaussian(rng) + (1.0 - alpha) * filtered;
        let envelope = (-t * 25.0).exp() * (1.0 - (-t * 100.0).exp());

        filtered * envelope * 0.6
    });
    to_pcm(wave)
}

/// Fallback beep for effects with no dedicated generator
pub fn generic(duration: f32) -> Vec<i16> {
    let wave = (0..sample_count(duration)).map(|i| {
        let t = i as f32 / SAMPLE_RATE as f32;
        (TAU * 800.0 * t).sin() * (-t * 5.0).exp() * 0.3
    });
    to_pcm(wave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_base_duration_sample_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pcm = sword_hit(&mut rng, BASE_DURATION);
        assert_eq!(pcm.len(), (BASE_DURATION * SAMPLE_RATE as f32) as usize);
    }

    #[test]
    fn test_footstep_is_short() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pcm = footstep(&mut rng, BASE_DURATION * 0.3);
        assert_eq!(pcm.len(), (0.15 * SAMPLE_RATE as f32) as usize);
    }

    #[test]
    fn test_same_seed_same_buffer() {
        let mut a = Pcg32::seed_from_u64(77);
        let mut b = Pcg32::seed_from_u64(77);
        assert_eq!(fireball(&mut a, 0.5), fireball(&mut b, 0.5));
    }

    #[test]
    fn test_lightning_silent_after_crack() {
        let mut rng = Pcg32::seed_from_u64(5);
        let pcm = lightning(&mut rng, BASE_DURATION);

        let cutoff = (0.1 * SAMPLE_RATE as f32) as usize + 1;
        assert!(pcm[cutoff..].iter().all(|&s| s == 0));
        assert!(pcm[..cutoff].iter().any(|&s| s != 0));
    }

    #[test]
    fn test_heal_notes_enter_staggered() {
        let pcm = heal(BASE_DURATION);
        // Before the first delayed note only the fundamental sounds
        assert!(pcm[..100].iter().any(|&s| s != 0));
        assert_eq!(pcm[0], 0);
    }

    #[test]
    fn test_fanfare_has_notes_past_first_beat() {
        let pcm = victory_fanfare(BASE_DURATION * 3.0);
        let second_note = (0.55 * SAMPLE_RATE as f32) as usize;
        assert!(pcm[second_note..second_note + 1000].iter().any(|&s| s != 0));
    }

    proptest! {
        #[test]
        fn prop_all_effects_within_pcm_range(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let buffers = [
                sword_hit(&mut rng, BASE_DURATION),
                fireball(&mut rng, BASE_DURATION),
                ice_spell(BASE_DURATION),
                lightning(&mut rng, BASE_DURATION),
                heal(BASE_DURATION),
                roar(&mut rng, BASE_DURATION * 2.0),
                victory_fanfare(BASE_DURATION * 3.0),
                footstep(&mut rng, BASE_DURATION * 0.3),
                generic(BASE_DURATION),
            ];
            for pcm in &buffers {
                prop_assert!(!pcm.is_empty());
            }
        }
    }
}
