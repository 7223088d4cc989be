//! Sound effect management
//!
//! `AudioManager` owns the synthesized effect cache and the device output.
//! Buffers are rendered once on first use (or loaded from a WAV override in
//! `assets/sounds/`) and shared with the mixer thread via `Arc`. When no
//! output device exists the manager stays usable and simply plays nothing.

pub mod output;
pub mod synth;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::combat::Class;
use output::{AudioOutput, Voice};
use synth::BASE_DURATION;

/// Every effect the battle can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    SwordHit,
    Fireball,
    IceSpell,
    Lightning,
    Heal,
    Roar,
    Victory,
    Footstep,
    /// Neutral blip for moments with no dedicated effect (loot pickups)
    Generic,
}

impl SoundKind {
    /// File stem checked for a WAV override
    pub fn file_name(self) -> &'static str {
        match self {
            SoundKind::SwordHit => "sword_hit",
            SoundKind::Fireball => "fireball",
            SoundKind::IceSpell => "ice_spell",
            SoundKind::Lightning => "lightning",
            SoundKind::Heal => "heal",
            SoundKind::Roar => "roar",
            SoundKind::Victory => "victory",
            SoundKind::Footstep => "footstep",
            SoundKind::Generic => "generic",
        }
    }

    /// Rendered length in seconds
    fn duration(self) -> f32 {
        match self {
            SoundKind::Roar => BASE_DURATION * 2.0,
            SoundKind::Victory => BASE_DURATION * 3.0,
            SoundKind::Footstep => BASE_DURATION * 0.3,
            _ => BASE_DURATION,
        }
    }
}

/// Combat moments that trigger sound, mapped to effects by `cue_for`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatCue {
    Attack,
    Spell,
    Heal,
    MonsterAttack,
    Victory,
}

pub struct AudioManager {
    output: Option<AudioOutput>,
    cache: HashMap<SoundKind, Arc<Vec<i16>>>,
    rng: Pcg32,
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl AudioManager {
    pub fn new(seed: u64) -> Self {
        let output = match AudioOutput::new() {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("audio unavailable: {e}");
                None
            }
        };

        Self {
            output,
            cache: HashMap::new(),
            rng: Pcg32::seed_from_u64(seed),
            master_volume: 1.0,
            sfx_volume: 0.8,
            muted: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.output.is_some()
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn override_path(kind: SoundKind) -> PathBuf {
        PathBuf::from("assets/sounds").join(format!("{}.wav", kind.file_name()))
    }

    fn load_override(kind: SoundKind) -> Option<Vec<i16>> {
        let path = Self::override_path(kind);
        if !path.exists() {
            return None;
        }
        match hound::WavReader::open(&path) {
            Ok(reader) => {
                let pcm: Result<Vec<i16>, _> = reader.into_samples::<i16>().collect();
                match pcm {
                    Ok(pcm) => {
                        log::info!("loaded override {}", path.display());
                        Some(pcm)
                    }
                    Err(e) => {
                        log::warn!("bad samples in {}: {e}", path.display());
                        None
                    }
                }
            }
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                None
            }
        }
    }

    fn synthesize(&mut self, kind: SoundKind) -> Vec<i16> {
        let duration = kind.duration();
        match kind {
            SoundKind::SwordHit => synth::sword_hit(&mut self.rng, duration),
            SoundKind::Fireball => synth::fireball(&mut self.rng, duration),
            SoundKind::IceSpell => synth::ice_spell(duration),
            SoundKind::Lightning => synth::lightning(&mut self.rng, duration),
            SoundKind::Heal => synth::heal(duration),
            SoundKind::Roar => synth::roar(&mut self.rng, duration),
            SoundKind::Victory => synth::victory_fanfare(duration),
            SoundKind::Footstep => synth::footstep(&mut self.rng, duration),
            SoundKind::Generic => synth::generic(duration),
        }
    }

    /// Rendered buffer for an effect, cached after the first request
    pub fn buffer(&mut self, kind: SoundKind) -> Arc<Vec<i16>> {
        if let Some(pcm) = self.cache.get(&kind) {
            return Arc::clone(pcm);
        }

        let pcm = Self::load_override(kind).unwrap_or_else(|| self.synthesize(kind));
        let pcm = Arc::new(pcm);
        self.cache.insert(kind, Arc::clone(&pcm));
        pcm
    }

    pub fn play(&mut self, kind: SoundKind, volume: f32) {
        let gain = volume * self.effective_volume();
        if gain <= 0.0 {
            return;
        }

        let pcm = self.buffer(kind);
        if let Some(output) = &mut self.output {
            output.play(Voice { pcm, gain });
        }
    }

    /// Which effect and base volume a combat moment plays
    pub fn cue_for(&mut self, cue: CombatCue, class: Class) -> (SoundKind, f32) {
        match cue {
            CombatCue::Attack => {
                let volume = if class == Class::Knight { 0.8 } else { 0.6 };
                (SoundKind::SwordHit, volume)
            }
            CombatCue::Spell => {
                const SPELLS: [SoundKind; 3] =
                    [SoundKind::Fireball, SoundKind::IceSpell, SoundKind::Lightning];
                (SPELLS[self.rng.random_range(0..SPELLS.len())], 0.7)
            }
            CombatCue::Heal => (SoundKind::Heal, 0.6),
            CombatCue::MonsterAttack => (SoundKind::Roar, 0.5),
            CombatCue::Victory => (SoundKind::Victory, 0.9),
        }
    }

    pub fn play_combat_cue(&mut self, cue: CombatCue, class: Class) {
        let (kind, volume) = self.cue_for(cue, class);
        self.play(kind, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AudioManager {
        // Construct without touching the device
        AudioManager {
            output: None,
            cache: HashMap::new(),
            rng: Pcg32::seed_from_u64(42),
            master_volume: 1.0,
            sfx_volume: 0.8,
            muted: false,
        }
    }

    #[test]
    fn test_buffer_cached_by_identity() {
        let mut audio = manager();
        let a = audio.buffer(SoundKind::Heal);
        let b = audio.buffer(SoundKind::Heal);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_buffer_lengths_follow_duration() {
        let mut audio = manager();
        let base = audio.buffer(SoundKind::SwordHit).len();
        assert_eq!(audio.buffer(SoundKind::Roar).len(), base * 2);
        assert_eq!(audio.buffer(SoundKind::Victory).len(), base * 3);
    }

    #[test]
    fn test_generic_blip_renders_at_base_length() {
        let mut audio = manager();
        let base = audio.buffer(SoundKind::SwordHit).len();
        assert_eq!(audio.buffer(SoundKind::Generic).len(), base);
    }

    #[test]
    fn test_mute_zeroes_effective_volume() {
        let mut audio = manager();
        assert!((audio.effective_volume() - 0.8).abs() < 1e-6);

        audio.muted = true;
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_attack_cue_by_class() {
        let mut audio = manager();
        assert_eq!(
            audio.cue_for(CombatCue::Attack, Class::Knight),
            (SoundKind::SwordHit, 0.8)
        );
        assert_eq!(
            audio.cue_for(CombatCue::Attack, Class::Mage),
            (SoundKind::SwordHit, 0.6)
        );
    }

    #[test]
    fn test_spell_cue_is_a_spell_effect() {
        let mut audio = manager();
        for _ in 0..20 {
            let (kind, volume) = audio.cue_for(CombatCue::Spell, Class::Mage);
            assert!(matches!(
                kind,
                SoundKind::Fireball | SoundKind::IceSpell | SoundKind::Lightning
            ));
            assert_eq!(volume, 0.7);
        }
    }
}
