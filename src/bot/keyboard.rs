//! Inline keyboards and the callback data they carry.
//!
//! Callback payloads are self-contained so a button keeps working after
//! a restart. A tournament id of 0 means the all-time scope.

use crate::bot::format::{ALL_TIME, ALL_TOURNAMENTS};
use crate::stats::TournamentRef;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PlayerScope { player_id: i64, tournament_id: i64 },
    TeamScope { team_id: i64, tournament_id: i64 },
    HeroScope { hero_id: i64, tournament_id: i64 },
    PlayerPool { player_id: i64, tournament_id: i64 },
    PlayerPoolDismiss,
}

impl Action {
    pub fn encode(&self) -> String {
        match self {
            Action::PlayerScope { player_id, tournament_id } => {
                format!("player:{player_id}:{tournament_id}")
            }
            Action::TeamScope { team_id, tournament_id } => {
                format!("team:{team_id}:{tournament_id}")
            }
            Action::HeroScope { hero_id, tournament_id } => {
                format!("hero:{hero_id}:{tournament_id}")
            }
            Action::PlayerPool { player_id, tournament_id } => {
                format!("pool:{player_id}:{tournament_id}")
            }
            Action::PlayerPoolDismiss => "pool_skip".to_string(),
        }
    }

    /// Parse a callback payload. Unknown or malformed payloads (say,
    /// from an older bot version) return `None`.
    pub fn decode(data: &str) -> Option<Self> {
        if data == "pool_skip" {
            return Some(Action::PlayerPoolDismiss);
        }
        let mut parts = data.split(':');
        let kind = parts.next()?;
        let first: i64 = parts.next()?.parse().ok()?;
        let second: i64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        match kind {
            "player" => Some(Action::PlayerScope { player_id: first, tournament_id: second }),
            "team" => Some(Action::TeamScope { team_id: first, tournament_id: second }),
            "hero" => Some(Action::HeroScope { hero_id: first, tournament_id: second }),
            "pool" => Some(Action::PlayerPool { player_id: first, tournament_id: second }),
            _ => None,
        }
    }
}

/// One tournament per row, with the all-time option last.
pub fn player_scopes(player_id: i64, tournaments: &[TournamentRef]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = tournaments
        .iter()
        .map(|t| {
            vec![InlineKeyboardButton::callback(
                t.name.clone(),
                Action::PlayerScope { player_id, tournament_id: t.id }.encode(),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        ALL_TOURNAMENTS,
        Action::PlayerScope { player_id, tournament_id: 0 }.encode(),
    )]);
    InlineKeyboardMarkup::new(rows)
}

/// The all-time option first, then one tournament per row.
pub fn team_scopes(team_id: i64, tournaments: &[TournamentRef]) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        ALL_TIME,
        Action::TeamScope { team_id, tournament_id: 0 }.encode(),
    )]];
    for t in tournaments {
        rows.push(vec![InlineKeyboardButton::callback(
            t.name.clone(),
            Action::TeamScope { team_id, tournament_id: t.id }.encode(),
        )]);
    }
    InlineKeyboardMarkup::new(rows)
}

pub fn hero_scopes(hero_id: i64, tournaments: &[TournamentRef]) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        ALL_TOURNAMENTS,
        Action::HeroScope { hero_id, tournament_id: 0 }.encode(),
    )]];
    for t in tournaments {
        rows.push(vec![InlineKeyboardButton::callback(
            t.name.clone(),
            Action::HeroScope { hero_id, tournament_id: t.id }.encode(),
        )]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// Yes/No confirmation for showing the full hero pool.
pub fn pool_confirm(player_id: i64, tournament_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            "Да",
            Action::PlayerPool { player_id, tournament_id }.encode(),
        ),
        InlineKeyboardButton::callback("Нет", Action::PlayerPoolDismiss.encode()),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn t(id: i64, name: &str) -> TournamentRef {
        TournamentRef { id, name: name.to_string() }
    }

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("expected callback button, got {other:?}"),
        }
    }

    #[test]
    fn test_action_roundtrip() {
        let actions = [
            Action::PlayerScope { player_id: 3, tournament_id: 7 },
            Action::TeamScope { team_id: 1, tournament_id: 0 },
            Action::HeroScope { hero_id: 12, tournament_id: 4 },
            Action::PlayerPool { player_id: 3, tournament_id: 0 },
            Action::PlayerPoolDismiss,
        ];
        for action in actions {
            assert_eq!(Action::decode(&action.encode()), Some(action));
        }
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        for data in ["", "player", "player:1", "player:x:2", "player:1:2:3", "mystery:1:2"] {
            assert_eq!(Action::decode(data), None, "payload {data:?}");
        }
    }

    #[test]
    fn test_player_scopes_puts_all_tournaments_last() {
        let markup = player_scopes(5, &[t(1, "MSC"), t(2, "EWC")]);
        assert_eq!(markup.inline_keyboard.len(), 3);
        assert_eq!(markup.inline_keyboard[0][0].text, "MSC");
        assert_eq!(markup.inline_keyboard[2][0].text, ALL_TOURNAMENTS);
        assert_eq!(callback_data(&markup.inline_keyboard[2][0]), "player:5:0");
    }

    #[test]
    fn test_team_scopes_puts_all_time_first() {
        let markup = team_scopes(2, &[t(1, "MSC")]);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0][0].text, ALL_TIME);
        assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "team:2:0");
        assert_eq!(markup.inline_keyboard[1][0].text, "MSC");
    }

    #[test]
    fn test_hero_scopes_puts_all_tournaments_first() {
        let markup = hero_scopes(9, &[t(1, "MSC")]);
        assert_eq!(markup.inline_keyboard[0][0].text, ALL_TOURNAMENTS);
        assert_eq!(callback_data(&markup.inline_keyboard[1][0]), "hero:9:1");
    }

    #[test]
    fn test_pool_confirm_is_one_row() {
        let markup = pool_confirm(5, 2);
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "pool:5:2");
        assert_eq!(callback_data(&markup.inline_keyboard[0][1]), "pool_skip");
    }
}
