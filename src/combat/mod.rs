//! Turn-based battle engine
//!
//! `Battle` is a pure state machine: player actions and the timed enemy turn
//! mutate the stat records and return `CombatEvent`s describing what
//! happened. The frame loop maps those events onto particles, sounds, damage
//! numbers, and log lines, so this module never touches the renderer or the
//! audio device and runs headless in tests.

pub mod data;
pub mod items;

pub use data::{Class, EnemyData, EnemyKind, GamePhase, PlayerData};
pub use items::{Loot, Potion, Weapon};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Turn delay before the enemy strikes back, in seconds
pub const ENEMY_TURN_DELAY: f32 = 1.0;
/// Player attack swing duration
pub const ATTACK_ANIMATION: f32 = 0.5;
/// Spell cast duration
pub const SPELL_ANIMATION: f32 = 1.0;
/// Log is capped at this many lines
pub const LOG_CAPACITY: usize = 50;

/// Damage spells a mage can roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spell {
    Fireball,
    IceShard,
    Lightning,
    Heal,
    ShieldBash,
}

impl Spell {
    pub fn display_name(self) -> &'static str {
        match self {
            Spell::Fireball => "Fireball",
            Spell::IceShard => "Ice Shard",
            Spell::Lightning => "Lightning",
            Spell::Heal => "Heal",
            Spell::ShieldBash => "Shield Bash",
        }
    }
}

/// What an action did, for the frame loop to turn into effects
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    ClassChosen(Class),
    BattleStarted(EnemyKind),
    PlayerAttacked { damage: i32, critical: bool },
    SpellCast { spell: Spell, damage: i32 },
    PlayerHealed { amount: i32 },
    PotionUsed { potion: Potion, healed: i32, mana: i32 },
    OutOfMana,
    NoPotions,
    EnemyAttacked { kind: EnemyKind, damage: i32, special: bool },
    EnemyDefeated { kind: EnemyKind, xp: u32, gold: u32, levels_gained: u32 },
    LootFound(Loot),
    PlayerDefeated,
    FinalVictory,
    AdventureContinued,
}

/// Pending timed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    EnemyTurn,
    AnimationOnly,
}

pub struct Battle {
    pub phase: GamePhase,
    pub player: Option<PlayerData>,
    pub enemy: Option<EnemyData>,
    pub is_player_turn: bool,
    pub log: Vec<String>,
    pending: Option<(PendingAction, f32)>,
    rng: Pcg32,
}

impl Battle {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::CharacterSelect,
            player: None,
            enemy: None,
            is_player_turn: true,
            log: Vec::new(),
            pending: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// An action is in flight; player input is ignored until it resolves
    pub fn busy(&self) -> bool {
        self.pending.is_some()
    }

    fn log_line(&mut self, line: String) {
        log::info!("{line}");
        self.log.push(line);
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    /// Uniform damage roll in [0.8, 1.2] x attack, with a 15% critical
    /// chance for 2.5x
    fn roll_damage(&mut self, attack: i32) -> (i32, bool) {
        let low = (attack as f32 * 0.8) as i32;
        let high = (attack as f32 * 1.2) as i32;
        let mut damage = self.rng.random_range(low..=high);

        let critical = self.rng.random_range(0.0..1.0) < 0.15;
        if critical {
            damage = (damage as f32 * 2.5) as i32;
        }
        (damage, critical)
    }

    // === Selection phases ===

    pub fn select_class(&mut self, class: Class) -> Vec<CombatEvent> {
        if self.phase != GamePhase::CharacterSelect {
            return Vec::new();
        }

        self.player = Some(PlayerData::new(class));
        self.phase = GamePhase::EnemySelect;
        self.log_line(format!("You chose: {}", class.display_name()));
        vec![CombatEvent::ClassChosen(class)]
    }

    /// Enemies not yet defeated this run
    pub fn remaining_enemies(&self) -> Vec<EnemyKind> {
        let defeated = self
            .player
            .as_ref()
            .map(|p| p.defeated.clone())
            .unwrap_or_default();
        EnemyKind::ALL
            .into_iter()
            .filter(|k| !defeated.contains(k))
            .collect()
    }

    pub fn select_enemy(&mut self, kind: EnemyKind) -> Vec<CombatEvent> {
        if self.phase != GamePhase::EnemySelect || !self.remaining_enemies().contains(&kind) {
            return Vec::new();
        }

        self.enemy = Some(EnemyData::new(kind));
        self.phase = GamePhase::Combat;
        self.is_player_turn = true;
        self.log_line(format!("You face the {}!", kind.display_name()));
        vec![CombatEvent::BattleStarted(kind)]
    }

    // === Player actions ===

    pub fn player_attack(&mut self) -> Vec<CombatEvent> {
        if !self.can_act() {
            return Vec::new();
        }
        let attack = self.player.as_ref().map(PlayerData::effective_attack);
        let Some(attack) = attack else {
            return Vec::new();
        };

        let (damage, critical) = self.roll_damage(attack);
        if let Some(enemy) = &mut self.enemy {
            enemy.take_damage(damage);
        }

        let line = if critical {
            format!("Critical hit! You strike for {damage} damage!")
        } else {
            format!("You attack for {damage} damage!")
        };
        self.log_line(line);

        let mut events = vec![CombatEvent::PlayerAttacked { damage, critical }];
        events.extend(self.after_player_action(ATTACK_ANIMATION));
        events
    }

    pub fn cast_spell(&mut self) -> Vec<CombatEvent> {
        if !self.can_act() {
            return Vec::new();
        }
        let class = match &self.player {
            Some(p) => p.class,
            None => return Vec::new(),
        };

        let (spells, cost): (&[Spell], i32) = match class {
            Class::Mage => (&[Spell::Fireball, Spell::IceShard, Spell::Lightning], 25),
            Class::Knight => (&[Spell::Heal, Spell::ShieldBash], 20),
        };

        if self.player.as_ref().is_none_or(|p| p.mp < cost) {
            self.log_line("Not enough MP to cast a spell".into());
            return vec![CombatEvent::OutOfMana];
        }

        let spell = spells[self.rng.random_range(0..spells.len())];
        if let Some(player) = &mut self.player {
            player.mp = (player.mp - cost).max(0);
        }

        let mut events = Vec::new();
        if spell == Spell::Heal {
            let amount = self.rng.random_range(30..=50);
            let healed = self
                .player
                .as_mut()
                .map(|p| p.heal(amount))
                .unwrap_or_default();
            self.log_line(format!("You heal {healed} HP!"));
            events.push(CombatEvent::PlayerHealed { amount: healed });
        } else {
            let damage = match class {
                Class::Mage => self.rng.random_range(35..=50),
                Class::Knight => self.rng.random_range(20..=35),
            };
            if let Some(enemy) = &mut self.enemy {
                enemy.take_damage(damage);
            }
            self.log_line(format!(
                "You cast {} for {damage} damage!",
                spell.display_name()
            ));
            events.push(CombatEvent::SpellCast { spell, damage });
        }

        events.extend(self.after_player_action(SPELL_ANIMATION));
        events
    }

    /// Drink the first healing potion in the inventory
    pub fn use_healing_potion(&mut self) -> Vec<CombatEvent> {
        if !self.can_act() {
            return Vec::new();
        }
        let index = self
            .player
            .as_ref()
            .map(|p| p.inventory.iter().position(|p| p.heal > 0));
        let index = match index {
            None => return Vec::new(),
            Some(None) => {
                self.log_line("No healing potions left".into());
                return vec![CombatEvent::NoPotions];
            }
            Some(Some(index)) => index,
        };

        let Some(player) = &mut self.player else {
            return Vec::new();
        };
        let potion = player.inventory.remove(index);
        let healed = player.heal(potion.heal);
        let mana = player.restore_mana(potion.mana);

        self.log_line(format!("You drink a {} and recover {healed} HP!", potion.name));

        let mut events = vec![CombatEvent::PotionUsed { potion, healed, mana }];
        events.extend(self.after_player_action(ATTACK_ANIMATION));
        events
    }

    fn can_act(&self) -> bool {
        self.phase == GamePhase::Combat && self.is_player_turn && !self.busy()
    }

    /// Resolve the aftermath of a player action: either the enemy died, or
    /// the turn passes and the enemy strike is scheduled.
    fn after_player_action(&mut self, animation: f32) -> Vec<CombatEvent> {
        if self.enemy.as_ref().is_some_and(|e| !e.is_alive()) {
            self.enemy_defeated()
        } else {
            self.is_player_turn = false;
            self.pending = Some((PendingAction::EnemyTurn, animation.max(ENEMY_TURN_DELAY)));
            Vec::new()
        }
    }

    // === Enemy turn ===

    fn enemy_turn(&mut self) -> Vec<CombatEvent> {
        let Some(enemy) = self.enemy.clone() else {
            return Vec::new();
        };
        if !enemy.is_alive() {
            return Vec::new();
        }

        let special = self.rng.random_range(0.0..1.0) < 0.5;
        let damage = if special {
            (enemy.attack as f32 * 1.5) as i32
        } else {
            self.roll_damage(enemy.attack).0
        };

        if let Some(player) = &mut self.player {
            player.hp = (player.hp - damage).max(0);
        }

        let line = if special {
            format!("{} uses a special attack for {damage} damage!", enemy.kind.display_name())
        } else {
            format!("{} attacks you for {damage} damage!", enemy.kind.display_name())
        };
        self.log_line(line);

        let mut events = vec![CombatEvent::EnemyAttacked {
            kind: enemy.kind,
            damage,
            special,
        }];

        if self.player.as_ref().is_some_and(|p| !p.is_alive()) {
            self.phase = GamePhase::Defeat;
            if let Some(player) = &mut self.player {
                player.win_streak = 0;
            }
            self.log_line("You have been defeated...".into());
            events.push(CombatEvent::PlayerDefeated);
        } else {
            self.is_player_turn = true;
        }
        events
    }

    fn enemy_defeated(&mut self) -> Vec<CombatEvent> {
        let Some(enemy) = self.enemy.take() else {
            return Vec::new();
        };
        let config = enemy.kind.config();
        self.log_line(format!("You defeated the {}!", enemy.kind.display_name()));

        let mut events = Vec::new();
        let mut loot_lines = Vec::new();
        let mut final_victory = false;

        if let Some(player) = &mut self.player {
            player.defeated.push(enemy.kind);
            player.total_victories += 1;
            player.win_streak += 1;
            player.gold += config.gold_reward;
            let levels_gained = player.add_experience(config.xp_reward);
            final_victory = player.defeated.len() >= EnemyKind::ALL.len();

            events.push(CombatEvent::EnemyDefeated {
                kind: enemy.kind,
                xp: config.xp_reward,
                gold: config.gold_reward,
                levels_gained,
            });

            let class = player.class;
            let bonus = 0.05 * player.win_streak as f32;
            for loot in items::roll_loot(&mut self.rng, class, bonus) {
                match &loot {
                    Loot::Weapon(weapon) => {
                        loot_lines.push(format!("Loot: {}!", weapon.name));
                        if weapon.attack > player.equipped_weapon.attack {
                            player.equip_weapon(weapon.clone());
                        }
                    }
                    Loot::Potion(potion) => {
                        loot_lines.push(format!("Loot: {}!", potion.name));
                        player.inventory.push(potion.clone());
                    }
                }
                events.push(CombatEvent::LootFound(loot));
            }
        }
        for line in loot_lines {
            self.log_line(line);
        }

        if final_victory {
            self.phase = GamePhase::FinalVictory;
            self.log_line("All foes vanquished. The arena is yours!".into());
            events.push(CombatEvent::FinalVictory);
        } else {
            self.phase = GamePhase::Victory;
        }
        events
    }

    // === Flow control ===

    pub fn continue_adventure(&mut self) -> Vec<CombatEvent> {
        if self.phase != GamePhase::Victory {
            return Vec::new();
        }

        if let Some(player) = &mut self.player {
            player.heal(20);
            player.restore_mana(30);
        }
        self.phase = GamePhase::EnemySelect;
        self.log_line("Your adventure continues!".into());
        vec![CombatEvent::AdventureContinued]
    }

    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        *self = Battle::new(seed);
    }

    /// Tick pending timers; fires the enemy turn when its delay elapses
    pub fn update(&mut self, dt: f32) -> Vec<CombatEvent> {
        let Some((action, timer)) = &mut self.pending else {
            return Vec::new();
        };

        *timer -= dt;
        if *timer > 0.0 {
            return Vec::new();
        }

        let action = *action;
        self.pending = None;
        match action {
            PendingAction::EnemyTurn => self.enemy_turn(),
            PendingAction::AnimationOnly => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battle_in_combat(seed: u64) -> Battle {
        let mut battle = Battle::new(seed);
        battle.select_class(Class::Knight);
        battle.select_enemy(EnemyKind::Goblin);
        battle
    }

    fn resolve_enemy_turn(battle: &mut Battle) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(battle.update(0.1));
            if !battle.busy() {
                break;
            }
        }
        events
    }

    #[test]
    fn test_phase_flow() {
        let mut battle = Battle::new(1);
        assert_eq!(battle.phase, GamePhase::CharacterSelect);

        battle.select_class(Class::Mage);
        assert_eq!(battle.phase, GamePhase::EnemySelect);

        battle.select_enemy(EnemyKind::Ogre);
        assert_eq!(battle.phase, GamePhase::Combat);
        assert!(battle.is_player_turn);
    }

    #[test]
    fn test_attack_damage_in_range() {
        for seed in 0..20 {
            let mut battle = battle_in_combat(seed);
            let events = battle.player_attack();
            let Some(CombatEvent::PlayerAttacked { damage, critical }) = events.first() else {
                panic!("expected an attack event");
            };
            // Knight attack 40 + iron sword 8
            let (low, high) = (38, 57);
            if *critical {
                assert!(*damage >= (low as f32 * 2.5) as i32);
            } else {
                assert!(*damage >= low && *damage <= high, "damage {damage}");
            }
        }
    }

    #[test]
    fn test_turn_passes_after_attack() {
        let mut battle = battle_in_combat(2);
        battle.player_attack();

        if battle.phase == GamePhase::Combat {
            assert!(!battle.is_player_turn);
            assert!(battle.busy());

            let events = resolve_enemy_turn(&mut battle);
            assert!(events
                .iter()
                .any(|e| matches!(e, CombatEvent::EnemyAttacked { .. })));
        }
    }

    #[test]
    fn test_actions_ignored_while_busy() {
        let mut battle = battle_in_combat(3);
        battle.player_attack();
        if battle.busy() {
            assert!(battle.player_attack().is_empty());
            assert!(battle.cast_spell().is_empty());
        }
    }

    #[test]
    fn test_spell_requires_mana() {
        let mut battle = battle_in_combat(4);
        if let Some(player) = &mut battle.player {
            player.mp = 5;
        }
        let events = battle.cast_spell();
        assert_eq!(events, vec![CombatEvent::OutOfMana]);
        assert!(battle.is_player_turn);
    }

    #[test]
    fn test_mage_spells_hit_harder() {
        let mut battle = Battle::new(5);
        battle.select_class(Class::Mage);
        battle.select_enemy(EnemyKind::Dragon);

        let events = battle.cast_spell();
        match events.first() {
            Some(CombatEvent::SpellCast { spell, damage }) => {
                assert!(matches!(
                    spell,
                    Spell::Fireball | Spell::IceShard | Spell::Lightning
                ));
                assert!(*damage >= 35 && *damage <= 50);
                assert_eq!(battle.player.as_ref().map(|p| p.mp), Some(95));
            }
            other => panic!("unexpected first event: {other:?}"),
        }
    }

    #[test]
    fn test_healing_potion_consumed() {
        let mut battle = battle_in_combat(6);
        if let Some(player) = &mut battle.player {
            player.hp = 50;
        }
        let before = battle.player.as_ref().map(|p| p.inventory.len());

        let events = battle.use_healing_potion();
        assert!(matches!(events.first(), Some(CombatEvent::PotionUsed { .. })));
        assert_eq!(
            battle.player.as_ref().map(|p| p.inventory.len() + 1),
            before
        );
        assert_eq!(battle.player.as_ref().map(|p| p.hp), Some(100));
    }

    #[test]
    fn test_no_potions_left() {
        let mut battle = battle_in_combat(7);
        if let Some(player) = &mut battle.player {
            player.inventory.retain(|p| p.heal == 0);
        }
        assert_eq!(battle.use_healing_potion(), vec![CombatEvent::NoPotions]);
    }

    #[test]
    fn test_victory_awards_and_excludes_enemy() {
        let mut battle = battle_in_combat(8);
        if let Some(enemy) = &mut battle.enemy {
            enemy.hp = 1;
        }

        let events = battle.player_attack();
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::EnemyDefeated { kind: EnemyKind::Goblin, .. })));
        assert_eq!(battle.phase, GamePhase::Victory);

        let player = battle.player.as_ref().unwrap();
        assert_eq!(player.gold, 75);
        assert_eq!(player.total_victories, 1);
        assert!(!battle.remaining_enemies().contains(&EnemyKind::Goblin));
    }

    #[test]
    fn test_final_victory_after_all_three() {
        let mut battle = Battle::new(9);
        battle.select_class(Class::Knight);

        for kind in EnemyKind::ALL {
            battle.select_enemy(kind);
            if let Some(enemy) = &mut battle.enemy {
                enemy.hp = 1;
            }
            let events = battle.player_attack();
            if battle.phase == GamePhase::Victory {
                battle.continue_adventure();
            } else {
                assert!(events.iter().any(|e| matches!(e, CombatEvent::FinalVictory)));
            }
        }
        assert_eq!(battle.phase, GamePhase::FinalVictory);
    }

    #[test]
    fn test_continue_restores_resources() {
        let mut battle = battle_in_combat(10);
        if let Some(enemy) = &mut battle.enemy {
            enemy.hp = 1;
        }
        if let Some(player) = &mut battle.player {
            player.hp = 40;
            player.mp = 10;
        }
        battle.player_attack();
        assert_eq!(battle.phase, GamePhase::Victory);

        let (hp_before, mp_before) = {
            let p = battle.player.as_ref().unwrap();
            (p.hp, p.mp)
        };
        battle.continue_adventure();
        assert_eq!(battle.phase, GamePhase::EnemySelect);

        let player = battle.player.as_ref().unwrap();
        assert_eq!(player.hp, (hp_before + 20).min(player.max_hp));
        assert_eq!(player.mp, (mp_before + 30).min(player.max_mp));
    }

    #[test]
    fn test_defeat_on_zero_hp() {
        let mut battle = battle_in_combat(11);
        if let Some(player) = &mut battle.player {
            player.hp = 1;
        }
        battle.player_attack();

        if battle.phase == GamePhase::Combat {
            let events = resolve_enemy_turn(&mut battle);
            assert!(events.iter().any(|e| matches!(e, CombatEvent::PlayerDefeated)));
            assert_eq!(battle.phase, GamePhase::Defeat);
        }
    }

    #[test]
    fn test_log_capped() {
        let mut battle = Battle::new(12);
        for i in 0..200 {
            battle.log_line(format!("line {i}"));
        }
        assert_eq!(battle.log.len(), LOG_CAPACITY);
        assert_eq!(battle.log.last().map(String::as_str), Some("line 199"));
    }

    #[test]
    fn test_seeded_battles_replay_identically() {
        let run = |seed| {
            let mut battle = battle_in_combat(seed);
            let mut all = Vec::new();
            for _ in 0..20 {
                all.extend(battle.player_attack());
                all.extend(resolve_enemy_turn(&mut battle));
                if battle.phase != GamePhase::Combat {
                    break;
                }
            }
            all
        };
        assert_eq!(run(77), run(77));
    }
}
