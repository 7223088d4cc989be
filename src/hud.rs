//! Console HUD
//!
//! Status lives in the terminal while the arena renders in the window.
//! Every panel is built as a `String` first so the layout is testable, then
//! printed by the frame loop when the battle state changes.

use crate::combat::data::{Class, EnemyKind, GamePhase};
use crate::combat::Battle;

const PANEL_WIDTH: usize = 58;
const BAR_WIDTH: usize = 20;

fn rule() -> String {
    "=".repeat(PANEL_WIDTH)
}

/// ASCII meter: `[#####---------------]`
fn bar(current: i32, max: i32) -> String {
    let filled = if max > 0 {
        ((current.max(0) as f32 / max as f32) * BAR_WIDTH as f32).round() as usize
    } else {
        0
    };
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn class_select_panel() -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push_str("\n              ARCANE ARENA - CHOOSE YOUR HERO\n");
    out.push_str(&rule());
    out.push('\n');
    for (key, class) in [(1, Class::Mage), (2, Class::Knight)] {
        let (hp, mp, attack) = class.base_stats();
        out.push_str(&format!(
            "  [{key}] {:<16} HP {hp:>3}  MP {mp:>3}  ATK {attack:>3}\n",
            class.display_name()
        ));
    }
    out.push_str(&rule());
    out.push('\n');
    out
}

pub fn enemy_select_panel(remaining: &[EnemyKind]) -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push_str("\n                  CHOOSE YOUR OPPONENT\n");
    out.push_str(&rule());
    out.push('\n');
    for kind in remaining {
        let key = match kind {
            EnemyKind::Goblin => 1,
            EnemyKind::Ogre => 2,
            EnemyKind::Dragon => 3,
        };
        let config = kind.config();
        out.push_str(&format!(
            "  [{key}] {:<18} Lv{}  HP {:>3}  ATK {:>2}\n",
            kind.display_name(),
            config.level,
            config.hp,
            config.attack
        ));
    }
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Player and enemy status bars plus the action menu
pub fn combat_panel(battle: &Battle) -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push('\n');

    if let Some(player) = &battle.player {
        out.push_str(&format!(
            "  {} (Lv{})  Gold {}\n",
            player.class.display_name(),
            player.level,
            player.gold
        ));
        out.push_str(&format!(
            "  HP {} {:>3}/{:<3}   MP {} {:>3}/{:<3}\n",
            bar(player.hp, player.max_hp),
            player.hp,
            player.max_hp,
            bar(player.mp, player.max_mp),
            player.mp,
            player.max_mp
        ));
        out.push_str(&format!(
            "  Weapon: {} (+{} ATK)   Potions: {}\n",
            player.equipped_weapon.name,
            player.equipped_weapon.attack,
            player.inventory.len()
        ));
    }

    if let Some(enemy) = &battle.enemy {
        out.push('\n');
        out.push_str(&format!(
            "  {} (Lv{})\n  HP {} {:>3}/{:<3}\n",
            enemy.kind.display_name(),
            enemy.level,
            bar(enemy.hp, enemy.max_hp),
            enemy.hp,
            enemy.max_hp
        ));
    }

    out.push('\n');
    if battle.is_player_turn && !battle.busy() {
        out.push_str("  [1] Attack   [2] Cast Spell   [H] Potion\n");
    } else {
        out.push_str("  ...\n");
    }
    out.push_str(&rule());
    out.push('\n');
    out
}

/// The most recent combat log lines
pub fn log_tail(battle: &Battle, lines: usize) -> String {
    let start = battle.log.len().saturating_sub(lines);
    battle.log[start..]
        .iter()
        .map(|l| format!("  > {l}\n"))
        .collect()
}

pub fn victory_panel(battle: &Battle) -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push_str("\n                       VICTORY!\n");
    if let Some(player) = &battle.player {
        out.push_str(&format!(
            "  Level {}  XP {}/100  Gold {}  Streak {}\n",
            player.level, player.experience, player.gold, player.win_streak
        ));
    }
    out.push_str("\n  [Space] Continue your adventure\n");
    out.push_str(&rule());
    out.push('\n');
    out
}

pub fn defeat_panel() -> String {
    format!(
        "{}\n                    YOU HAVE FALLEN\n\n  [Space] Try again\n{}\n",
        rule(),
        rule()
    )
}

pub fn final_victory_panel(battle: &Battle) -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push_str("\n          ALL FOES VANQUISHED - THE ARENA IS YOURS\n");
    if let Some(player) = &battle.player {
        out.push_str(&format!(
            "  Final level {}  Total victories {}  Gold {}\n",
            player.level, player.total_victories, player.gold
        ));
    }
    out.push_str("\n  [Space] Begin a new legend\n");
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Panel for the current phase; `None` means nothing phase-specific to show
pub fn phase_panel(battle: &Battle) -> Option<String> {
    match battle.phase {
        GamePhase::CharacterSelect => Some(class_select_panel()),
        GamePhase::EnemySelect => Some(enemy_select_panel(&battle.remaining_enemies())),
        GamePhase::Combat => Some(combat_panel(battle)),
        GamePhase::Victory => Some(victory_panel(battle)),
        GamePhase::Defeat => Some(defeat_panel()),
        GamePhase::FinalVictory => Some(final_victory_panel(battle)),
    }
}

/// Print the phase panel plus the log tail to stdout
pub fn print_state(battle: &Battle) {
    if let Some(panel) = phase_panel(battle) {
        print!("{panel}");
    }
    print!("{}", log_tail(battle, 5));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_proportions() {
        assert_eq!(bar(0, 100), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(100, 100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50, 100), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn test_bar_guards_degenerate_input() {
        assert_eq!(bar(10, 0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(-5, 100), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(200, 100), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_class_select_lists_both_heroes() {
        let panel = class_select_panel();
        assert!(panel.contains("Epic Mage"));
        assert!(panel.contains("Valiant Knight"));
    }

    #[test]
    fn test_combat_panel_shows_stats() {
        let mut battle = Battle::new(1);
        battle.select_class(Class::Knight);
        battle.select_enemy(EnemyKind::Goblin);

        let panel = combat_panel(&battle);
        assert!(panel.contains("Valiant Knight"));
        assert!(panel.contains("Sinister Goblin"));
        assert!(panel.contains("120/120"));
        assert!(panel.contains("[1] Attack"));
    }

    #[test]
    fn test_menu_hidden_while_busy() {
        let mut battle = Battle::new(2);
        battle.select_class(Class::Knight);
        battle.select_enemy(EnemyKind::Goblin);
        battle.player_attack();

        if battle.busy() {
            assert!(!combat_panel(&battle).contains("[1] Attack"));
        }
    }

    #[test]
    fn test_enemy_select_omits_defeated() {
        let panel = enemy_select_panel(&[EnemyKind::Ogre, EnemyKind::Dragon]);
        assert!(!panel.contains("Goblin"));
        assert!(panel.contains("Devastating Ogre"));
        assert!(panel.contains("Shadow Dragon"));
    }

    #[test]
    fn test_log_tail_takes_last_lines() {
        let mut battle = Battle::new(3);
        battle.select_class(Class::Mage);
        battle.select_enemy(EnemyKind::Goblin);

        let tail = log_tail(&battle, 1);
        assert!(tail.contains("Sinister Goblin"));
        assert!(!tail.contains("You chose"));
    }

    #[test]
    fn test_every_phase_has_a_panel() {
        let mut battle = Battle::new(4);
        assert!(phase_panel(&battle).is_some());
        battle.select_class(Class::Mage);
        assert!(phase_panel(&battle).is_some());
        battle.select_enemy(EnemyKind::Dragon);
        assert!(phase_panel(&battle).is_some());
    }
}
