//! Core battle records: classes, enemies, and the stat schema

use crate::combat::items::{Potion, Weapon};

/// Player character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Mage,
    Knight,
}

impl Class {
    pub fn display_name(self) -> &'static str {
        match self {
            Class::Mage => "Epic Mage",
            Class::Knight => "Valiant Knight",
        }
    }

    /// Starting stats as (hp, mp, attack)
    pub fn base_stats(self) -> (i32, i32, i32) {
        match self {
            Class::Mage => (80, 120, 25),
            Class::Knight => (120, 50, 40),
        }
    }
}

/// The three opponents, fought in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Goblin,
    Ogre,
    Dragon,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Goblin, EnemyKind::Ogre, EnemyKind::Dragon];

    pub fn display_name(self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Sinister Goblin",
            EnemyKind::Ogre => "Devastating Ogre",
            EnemyKind::Dragon => "Shadow Dragon",
        }
    }
}

/// Fixed per-enemy stat block
#[derive(Debug, Clone, Copy)]
pub struct EnemyConfig {
    pub level: u32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl EnemyKind {
    pub fn config(self) -> EnemyConfig {
        match self {
            EnemyKind::Goblin => EnemyConfig {
                level: 1,
                hp: 80,
                attack: 18,
                defense: 8,
                xp_reward: 60,
                gold_reward: 75,
            },
            EnemyKind::Ogre => EnemyConfig {
                level: 2,
                hp: 150,
                attack: 28,
                defense: 15,
                xp_reward: 100,
                gold_reward: 120,
            },
            EnemyKind::Dragon => EnemyConfig {
                level: 3,
                hp: 250,
                attack: 40,
                defense: 25,
                xp_reward: 200,
                gold_reward: 300,
            },
        }
    }
}

/// Top-level game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    CharacterSelect,
    EnemySelect,
    Combat,
    Victory,
    Defeat,
    FinalVictory,
}

/// Experience needed per level
pub const XP_PER_LEVEL: u32 = 100;

/// Player progress and stats
#[derive(Debug, Clone)]
pub struct PlayerData {
    pub class: Class,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub experience: u32,
    pub attack: i32,
    pub defense: i32,
    pub gold: u32,
    pub inventory: Vec<Potion>,
    pub equipped_weapon: Weapon,
    pub defeated: Vec<EnemyKind>,
    pub win_streak: u32,
    pub total_victories: u32,
}

impl PlayerData {
    pub fn new(class: Class) -> Self {
        let (hp, mp, attack) = class.base_stats();
        Self {
            class,
            level: 1,
            hp,
            max_hp: hp,
            mp,
            max_mp: mp,
            experience: 0,
            attack,
            defense: 10,
            gold: 0,
            inventory: crate::combat::items::starter_potions(class),
            equipped_weapon: crate::combat::items::starter_weapon(class),
            defeated: Vec::new(),
            win_streak: 0,
            total_victories: 0,
        }
    }

    /// Total attack including the equipped weapon
    pub fn effective_attack(&self) -> i32 {
        self.attack + self.equipped_weapon.attack
    }

    /// Award experience, levelling up as thresholds pass. Each level fully
    /// restores HP/MP and grows the stat block. Returns levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut gained = 0;

        while self.experience >= XP_PER_LEVEL {
            self.level += 1;
            gained += 1;
            self.experience -= XP_PER_LEVEL;

            self.max_hp += 25 + (self.level as i32) * 5;
            self.hp = self.max_hp;
            self.max_mp += 15 + (self.level as i32) * 3;
            self.mp = self.max_mp;
            self.attack += 6 + (self.level as i32) * 2;
            self.defense += 4 + self.level as i32;
        }
        gained
    }

    pub fn equip_weapon(&mut self, weapon: Weapon) {
        self.equipped_weapon = weapon;
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = (self.mp + amount).min(self.max_mp);
        self.mp - before
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// The currently engaged opponent
#[derive(Debug, Clone)]
pub struct EnemyData {
    pub kind: EnemyKind,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl EnemyData {
    pub fn new(kind: EnemyKind) -> Self {
        let config = kind.config();
        Self {
            kind,
            level: config.level,
            hp: config.hp,
            max_hp: config.hp,
            attack: config.attack,
            defense: config.defense,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_base_stats() {
        let mage = PlayerData::new(Class::Mage);
        assert_eq!((mage.hp, mage.mp, mage.attack), (80, 120, 25));

        let knight = PlayerData::new(Class::Knight);
        assert_eq!((knight.hp, knight.mp, knight.attack), (120, 50, 40));
    }

    #[test]
    fn test_level_up_restores_and_grows() {
        let mut player = PlayerData::new(Class::Knight);
        player.hp = 10;

        let gained = player.add_experience(150);
        assert_eq!(gained, 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 50);
        // 120 + 25 + 2*5
        assert_eq!(player.max_hp, 155);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn test_multi_level_gain() {
        let mut player = PlayerData::new(Class::Mage);
        let gained = player.add_experience(250);
        assert_eq!(gained, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 50);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = PlayerData::new(Class::Mage);
        player.hp = 70;
        assert_eq!(player.heal(50), 10);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn test_health_percent_guards_zero_max() {
        let mut enemy = EnemyData::new(EnemyKind::Goblin);
        enemy.max_hp = 0;
        assert_eq!(enemy.health_percent(), 0.0);
    }

    #[test]
    fn test_enemy_damage_floors_at_zero() {
        let mut enemy = EnemyData::new(EnemyKind::Goblin);
        enemy.take_damage(9999);
        assert_eq!(enemy.hp, 0);
        assert!(!enemy.is_alive());
    }
}
