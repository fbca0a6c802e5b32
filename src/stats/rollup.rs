//! Aggregated records produced by the query layer.

use serde::Serialize;

/// Round to two decimal places, the precision used for winrates and averages.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Winrate in percent. Zero games is a valid empty aggregate, not an error.
pub(crate) fn winrate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    round2(wins as f64 / games as f64 * 100.0)
}

/// Per-hero slice of a player's or team's record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroPoolEntry {
    pub hero_id: i64,
    pub hero_name: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate: f64,
}

/// Per-player slice of a hero's record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPlayerEntry {
    pub player_id: i64,
    pub nickname: String,
    pub team_name: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate: f64,
}

/// A player's record over the selected scope.
///
/// KDA divides kills plus assists by deaths, with a floor of one death so
/// a deathless run still yields a finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRollup {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate: f64,
    pub total_kills: u32,
    pub total_deaths: u32,
    pub total_assists: u32,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub kda: f64,
    /// Heroes played, most-used first.
    pub hero_pool: Vec<HeroPoolEntry>,
}

/// A team's record over the selected scope.
///
/// Games count matches, not stat rows; the K/D/A averages divide the
/// roster's totals by the match count.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRollup {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub hero_pool: Vec<HeroPoolEntry>,
}

/// A hero's record over the selected scope.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroRollup {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate: f64,
    /// Bans are counted separately from picks.
    pub ban_count: u32,
    /// Up to five players, ranked by usage.
    pub top_players: Vec<TopPlayerEntry>,
}

/// Tournament an entity has appeared in.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentRef {
    pub id: i64,
    pub name: String,
}
