//! Arcane Arena entry point
//!
//! Owns the window, the frame loop, and the glue between the battle state
//! machine and its presentation: combat events map onto particle bursts,
//! synthesized sounds, floating damage numbers, and model animation flags.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use arcane_arena::audio::{AudioManager, CombatCue, SoundKind};
use arcane_arena::character::{
    CharacterModel, DragonModel, GoblinModel, KnightModel, MageModel, OgreModel,
};
use arcane_arena::combat::{
    ATTACK_ANIMATION, Battle, Class, CombatEvent, EnemyKind, GamePhase, SPELL_ANIMATION, Spell,
};
use arcane_arena::consts::{ENEMY_POS, MAX_FRAME_DT, PLAYER_POS};
use arcane_arena::hud;
use arcane_arena::particles::ParticleSystem;
use arcane_arena::render::camera::{Camera, Uniforms};
use arcane_arena::render::draw::VertexBatch;
use arcane_arena::render::pipeline::RenderState;
use arcane_arena::render::scene::{self, DamageNumbers};
use arcane_arena::render::transform::TransformStack;
use arcane_arena::settings::Settings;

/// Ambient rune aura pulse interval during combat, in seconds
const AMBIENT_AURA_INTERVAL: f32 = 2.0;

/// Everything that lives per run: battle state and its presentation
struct Arena {
    battle: Battle,
    player_model: Option<Box<dyn CharacterModel>>,
    enemy_model: Option<Box<dyn CharacterModel>>,
    particles: ParticleSystem,
    numbers: DamageNumbers,
    audio: AudioManager,
    settings: Settings,
    camera: Camera,
    time: f32,
    attack_timer: f32,
    cast_timer: f32,
    ambient_timer: f32,
    last_log_len: usize,
    last_phase: GamePhase,
}

impl Arena {
    fn new(seed: u64, settings: Settings) -> Self {
        let mut particles = ParticleSystem::new(seed.wrapping_add(1));
        particles.set_cap(settings.max_particles());

        let mut audio = AudioManager::new(seed.wrapping_add(2));
        audio.master_volume = settings.master_volume;
        audio.sfx_volume = settings.sfx_volume;

        Self {
            battle: Battle::new(seed),
            player_model: None,
            enemy_model: None,
            particles,
            numbers: DamageNumbers::new(),
            audio,
            settings,
            camera: Camera::default(),
            time: 0.0,
            attack_timer: 0.0,
            cast_timer: 0.0,
            ambient_timer: 0.0,
            last_log_len: 0,
            last_phase: GamePhase::CharacterSelect,
        }
    }

    fn player_class(&self) -> Option<Class> {
        self.battle.player.as_ref().map(|p| p.class)
    }

    fn spawn_player_model(&mut self, class: Class) {
        let pos = Vec3::from(PLAYER_POS);
        self.player_model = Some(match class {
            Class::Mage => Box::new(MageModel::new(pos)),
            Class::Knight => Box::new(KnightModel::new(pos)),
        });
    }

    fn spawn_enemy_model(&mut self, kind: EnemyKind) {
        let pos = Vec3::from(ENEMY_POS);
        self.enemy_model = Some(match kind {
            EnemyKind::Goblin => Box::new(GoblinModel::new(pos)) as Box<dyn CharacterModel>,
            EnemyKind::Ogre => Box::new(OgreModel::new(pos)),
            EnemyKind::Dragon => Box::new(DragonModel::new(pos)),
        });
    }

    /// Turn combat events into particles, sounds, numbers, and animation
    fn apply_events(&mut self, events: Vec<CombatEvent>) {
        let class = self.player_class().unwrap_or(Class::Knight);
        let player_pos = Vec3::from(PLAYER_POS);
        let enemy_pos = Vec3::from(ENEMY_POS);

        for event in events {
            match event {
                CombatEvent::ClassChosen(class) => {
                    self.spawn_player_model(class);
                }
                CombatEvent::BattleStarted(_) => {
                    if let Some(kind) = self.battle.enemy.as_ref().map(|e| e.kind) {
                        self.spawn_enemy_model(kind);
                    }
                    self.particles.emit_explosion(Vec3::ZERO, (0.5, 0.3, 1.0), 30);
                    self.numbers.clear();
                    self.camera.set_orbit(25.0, 45.0, 18.0);
                }
                CombatEvent::PlayerAttacked { damage, .. } => {
                    self.particles.emit_explosion(enemy_pos, (1.0, 0.0, 0.0), 20);
                    self.particles.emit_blood(
                        enemy_pos + Vec3::Y,
                        Vec3::new(1.0, 0.3, 0.0),
                        1.0,
                    );
                    self.numbers.spawn(damage, enemy_pos + Vec3::Y * 2.0, false);
                    self.audio.play_combat_cue(CombatCue::Attack, class);
                    if let Some(model) = &mut self.player_model {
                        model.set_attacking(true);
                    }
                    self.attack_timer = ATTACK_ANIMATION;
                }
                CombatEvent::SpellCast { spell, damage } => {
                    match spell {
                        Spell::Fireball => {
                            self.particles.emit_fire(enemy_pos + Vec3::Y, 1.0);
                        }
                        Spell::IceShard => {
                            self.particles.emit_ice(enemy_pos + Vec3::Y, 1.0);
                        }
                        Spell::Lightning => {
                            self.particles.emit_lightning(
                                player_pos + Vec3::Y * 2.0,
                                enemy_pos + Vec3::Y,
                            );
                        }
                        Spell::ShieldBash => {
                            self.particles.emit_explosion(enemy_pos, (0.8, 0.8, 0.3), 15);
                        }
                        Spell::Heal => {}
                    }
                    self.numbers.spawn(damage, enemy_pos + Vec3::Y * 2.0, false);
                    self.audio.play_combat_cue(CombatCue::Spell, class);
                    if let Some(model) = &mut self.player_model {
                        model.set_casting(true);
                    }
                    self.cast_timer = SPELL_ANIMATION;
                }
                CombatEvent::PlayerHealed { amount } => {
                    self.particles.emit_healing(player_pos + Vec3::Y, 1.0);
                    self.numbers.spawn(amount, player_pos + Vec3::Y * 2.0, true);
                    self.audio.play_combat_cue(CombatCue::Heal, class);
                    if let Some(model) = &mut self.player_model {
                        model.set_casting(true);
                    }
                    self.cast_timer = SPELL_ANIMATION;
                }
                CombatEvent::PotionUsed { healed, .. } => {
                    self.particles.emit_healing(player_pos + Vec3::Y, 0.8);
                    self.numbers.spawn(healed, player_pos + Vec3::Y * 2.0, true);
                    self.audio.play_combat_cue(CombatCue::Heal, class);
                }
                CombatEvent::EnemyAttacked { kind, damage, special } => {
                    if special {
                        match kind {
                            EnemyKind::Dragon => {
                                self.particles.emit_fire(player_pos + Vec3::Y, 1.2)
                            }
                            EnemyKind::Ogre => {
                                self.particles.emit_explosion(player_pos, (0.6, 0.4, 0.2), 25)
                            }
                            EnemyKind::Goblin => {
                                self.particles.emit_explosion(player_pos, (0.2, 0.7, 0.2), 20)
                            }
                        }
                    } else {
                        self.particles.emit_explosion(player_pos, (0.8, 0.2, 0.2), 15);
                    }
                    self.particles.emit_blood(
                        player_pos + Vec3::Y,
                        Vec3::new(-1.0, 0.3, 0.0),
                        1.0,
                    );
                    self.numbers.spawn(damage, player_pos + Vec3::Y * 2.0, false);
                    self.audio.play_combat_cue(CombatCue::MonsterAttack, class);
                }
                CombatEvent::EnemyDefeated { .. } => {
                    self.particles
                        .emit_explosion(enemy_pos + Vec3::Y * 2.0, (1.0, 1.0, 0.0), 50);
                    self.audio.play_combat_cue(CombatCue::Victory, class);
                    self.enemy_model = None;
                }
                CombatEvent::FinalVictory => {
                    self.particles.emit_explosion(Vec3::Y * 3.0, (1.0, 0.9, 0.2), 80);
                    self.particles.emit_healing(Vec3::ZERO, 2.0);
                }
                CombatEvent::PlayerDefeated => {
                    self.particles.emit_blood(
                        player_pos + Vec3::Y,
                        Vec3::new(-1.0, 1.0, 0.0),
                        1.5,
                    );
                }
                CombatEvent::LootFound(_) => {
                    self.audio.play(SoundKind::Generic, 0.5);
                }
                CombatEvent::OutOfMana
                | CombatEvent::NoPotions
                | CombatEvent::AdventureContinued => {}
            }
        }
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;

        let events = self.battle.update(dt);
        self.apply_events(events);

        self.particles.update(dt);
        self.numbers.update(dt);

        if let Some(model) = &mut self.player_model {
            model.update(dt);
            if let Some(player) = &self.battle.player {
                model.set_health_percent(player.health_percent());
            }
        }
        if let Some(model) = &mut self.enemy_model {
            model.update(dt);
            if let Some(enemy) = &self.battle.enemy {
                model.set_health_percent(enemy.health_percent());
            }
        }

        // Animation flags decay with their timers
        if self.attack_timer > 0.0 {
            self.attack_timer -= dt;
            if self.attack_timer <= 0.0
                && let Some(model) = &mut self.player_model
            {
                model.set_attacking(false);
            }
        }
        if self.cast_timer > 0.0 {
            self.cast_timer -= dt;
            if self.cast_timer <= 0.0
                && let Some(model) = &mut self.player_model
            {
                model.set_casting(false);
            }
        }

        // Ambient arena pulse while a fight is on
        if self.battle.phase == GamePhase::Combat && !self.settings.reduced_motion {
            self.ambient_timer += dt;
            if self.ambient_timer >= AMBIENT_AURA_INTERVAL {
                self.ambient_timer = 0.0;
                self.particles
                    .emit_magic_aura(Vec3::new(0.0, -1.0, 0.0), (0.3, 0.3, 0.8));
            }
        }

        // Menus get a slow camera drift
        let on_menu = matches!(
            self.battle.phase,
            GamePhase::CharacterSelect | GamePhase::EnemySelect
        );
        if on_menu && !self.settings.reduced_motion {
            self.camera.angle_y = 45.0 + 10.0 * (self.time * 0.5).sin();
        }

        // Echo the battle state to the console when it changes
        if self.battle.phase != self.last_phase || self.battle.log.len() != self.last_log_len {
            self.last_phase = self.battle.phase;
            self.last_log_len = self.battle.log.len();
            hud::print_state(&self.battle);
        }
    }

    fn handle_key(&mut self, key: KeyCode, render: &mut Option<RenderState>) {
        match key {
            KeyCode::Digit1 | KeyCode::Numpad1 => self.select_or_act(1),
            KeyCode::Digit2 | KeyCode::Numpad2 => self.select_or_act(2),
            KeyCode::Digit3 | KeyCode::Numpad3 => self.select_or_act(3),
            KeyCode::KeyH => {
                let events = self.battle.use_healing_potion();
                self.apply_events(events);
            }
            KeyCode::Space => match self.battle.phase {
                GamePhase::Victory => {
                    let events = self.battle.continue_adventure();
                    self.apply_events(events);
                }
                GamePhase::Defeat | GamePhase::FinalVictory => {
                    self.battle.restart();
                    self.player_model = None;
                    self.enemy_model = None;
                    self.particles.clear();
                    self.numbers.clear();
                    self.last_log_len = 0;
                    hud::print_state(&self.battle);
                }
                _ => {}
            },
            KeyCode::ArrowUp => self.camera.orbit_by(5.0, 0.0),
            KeyCode::ArrowDown => self.camera.orbit_by(-5.0, 0.0),
            KeyCode::ArrowLeft => self.camera.orbit_by(0.0, -5.0),
            KeyCode::ArrowRight => self.camera.orbit_by(0.0, 5.0),
            KeyCode::Equal | KeyCode::NumpadAdd => self.camera.zoom_by(-1.0),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.camera.zoom_by(1.0),
            KeyCode::KeyW => {
                if let Some(render) = render {
                    render.toggle_wireframe();
                    self.settings.wireframe = render.wireframe;
                }
            }
            KeyCode::KeyM => {
                self.audio.muted = !self.audio.muted;
                log::info!("audio muted: {}", self.audio.muted);
            }
            _ => {}
        }
    }

    /// Number keys are overloaded per phase: menu choice or combat action
    fn select_or_act(&mut self, slot: u8) {
        let events = match self.battle.phase {
            GamePhase::CharacterSelect => match slot {
                1 => self.battle.select_class(Class::Mage),
                2 => self.battle.select_class(Class::Knight),
                _ => Vec::new(),
            },
            GamePhase::EnemySelect => {
                let kind = match slot {
                    1 => EnemyKind::Goblin,
                    2 => EnemyKind::Ogre,
                    3 => EnemyKind::Dragon,
                    _ => return,
                };
                self.battle.select_enemy(kind)
            }
            GamePhase::Combat => match slot {
                1 => self.battle.player_attack(),
                2 => self.battle.cast_spell(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        self.apply_events(events);
    }

    /// Assemble the frame's vertex soup
    fn build_frame(&mut self, batch: &mut VertexBatch) {
        let mut stack = TransformStack::new();

        if self.settings.quality.arena_dressing() {
            scene::draw_arena(batch, &mut stack, self.time);
        } else {
            scene::draw_floor(batch, &mut stack, arcane_arena::consts::FLOOR_RADIUS);
        }

        if let Some(model) = &mut self.player_model {
            model.draw(self.time, &mut stack, batch);
        }
        if let Some(model) = &mut self.enemy_model {
            model.draw(self.time, &mut stack, batch);
        }

        self.particles.render(batch, &mut stack);
        self.numbers.draw(batch, &mut stack);
    }
}

struct App {
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    arena: Arena,
    batch: VertexBatch,
    last_frame: Instant,
}

impl App {
    fn new(seed: u64, settings: Settings) -> Self {
        let mut batch = VertexBatch::new();
        batch.tessellation = settings.quality.tessellation();

        Self {
            window: None,
            render: None,
            arena: Arena::new(seed, settings),
            batch,
            last_frame: Instant::now(),
        }
    }

    fn init_render(&mut self, window: Arc<Window>) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();
        let result = pollster::block_on(async {
            let surface = instance.create_surface(window.clone())?;
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await?;
            log::info!("using adapter: {:?}", adapter.get_info().name);
            RenderState::new(surface, &adapter, size.width, size.height).await
        });

        match result {
            Ok(mut render) => {
                render.wireframe = self.arena.settings.wireframe;
                self.render = Some(render);
            }
            Err(e) => log::error!("render init failed: {e}"),
        }
    }

    fn frame(&mut self) {
        let dt = self.last_frame.elapsed().as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = Instant::now();

        self.arena.update(dt);

        self.batch.clear();
        self.arena.build_frame(&mut self.batch);

        if let Some(render) = &mut self.render {
            let uniforms = Uniforms::new(&self.arena.camera, render.aspect(), self.arena.time);
            match render.render(&self.batch.vertices, &uniforms) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render.size;
                    render.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => log::error!("surface out of memory"),
                Err(e) => log::warn!("render error: {e:?}"),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Arcane Arena")
                .with_inner_size(PhysicalSize::new(1280, 800));
            match event_loop.create_window(attrs) {
                Ok(window) => {
                    let window = Arc::new(window);
                    self.init_render(window.clone());
                    self.window = Some(window);
                    hud::print_state(&self.arena.battle);
                }
                Err(e) => {
                    log::error!("window creation failed: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.arena.settings.save();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && let PhysicalKey::Code(key) = event.physical_key
                {
                    if matches!(key, KeyCode::Escape | KeyCode::KeyQ) {
                        self.arena.settings.save();
                        event_loop.exit();
                        return;
                    }
                    self.arena.handle_key(key, &mut self.render);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("===========================================");
    println!("              ARCANE ARENA");
    println!("===========================================");
    println!();
    println!("1/2/3: Choose and act    H: Potion    Space: Continue");
    println!("Arrows: Orbit camera     +/-: Zoom");
    println!("W: Wireframe   M: Mute   Esc/Q: Quit");
    println!();

    let settings = Settings::load();
    let seed = rand::random::<u64>();
    log::info!("starting with seed {seed}");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(seed, settings);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_applies_persisted_volumes() {
        let mut settings = Settings::default();
        settings.master_volume = 0.4;
        settings.sfx_volume = 0.2;

        let arena = Arena::new(7, settings);
        assert!((arena.audio.master_volume - 0.4).abs() < 1e-6);
        assert!((arena.audio.sfx_volume - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_arena_honors_particle_toggle() {
        let mut settings = Settings::default();
        settings.particles = false;

        let mut arena = Arena::new(7, settings);
        arena.particles.emit_explosion(Vec3::ZERO, (1.0, 0.5, 0.0), 10);
        assert!(arena.particles.is_empty());
    }

    #[test]
    fn test_batch_detail_follows_quality() {
        let mut settings = Settings::default();
        settings.quality = arcane_arena::QualityPreset::Low;

        let app = App::new(7, settings);
        assert!((app.batch.tessellation - 0.5).abs() < 1e-6);
    }
}
