//! Message texts for the stats flows. All user-facing copy lives here.

use crate::stats::{
    Hero, HeroPoolEntry, HeroRollup, PlayerProfile, PlayerRollup, Team, TeamRollup,
    TopPlayerEntry, Tournament,
};

pub const ALL_TOURNAMENTS: &str = "Все турниры";
pub const ALL_TIME: &str = "Все время";
pub const UNKNOWN_TOURNAMENT: &str = "Неизвестный турнир";

/// Up to two decimals with trailing zeros stripped: "100", "12.5", "33.33".
pub fn fmt2(value: f64) -> String {
    let mut s = format!("{value:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

pub fn player_summary(
    player: &PlayerProfile,
    rollup: &PlayerRollup,
    scope: &str,
    analysis: &str,
) -> String {
    format!(
        "Игрок: {} ({})\nТурнир: {}\nИгры: {} | Победы: {} | WR: {}%\nKDA: {} (Avg {}/{}/{})\n\n{}",
        player.nickname,
        player.team_name,
        scope,
        rollup.games,
        rollup.wins,
        fmt2(rollup.winrate),
        fmt2(rollup.kda),
        fmt2(rollup.avg_kills),
        fmt2(rollup.avg_deaths),
        fmt2(rollup.avg_assists),
        analysis,
    )
}

pub fn team_summary(team: &Team, rollup: &TeamRollup, scope: &str, analysis: &str) -> String {
    format!(
        "Команда: {} ({})\nТурнир: {}\nМатчей: {} | Победы: {} | WR: {}%\nСредние K/D/A: {}/{}/{}\n\nТоп герои:\n{}\n\n{}",
        team.name,
        team.tag,
        scope,
        rollup.games,
        rollup.wins,
        fmt2(rollup.winrate),
        fmt2(rollup.avg_kills),
        fmt2(rollup.avg_deaths),
        fmt2(rollup.avg_assists),
        top_heroes_block(&rollup.hero_pool),
        analysis,
    )
}

pub fn hero_summary(hero: &Hero, rollup: &HeroRollup, scope: &str, analysis: &str) -> String {
    format!(
        "Герой: {}\nТурнир: {}\nМатчей: {} | Победы: {} | WR: {}%\nBan count: {}\n\nТоп игроки:\n{}\n\n{}",
        hero.name,
        scope,
        rollup.games,
        rollup.wins,
        fmt2(rollup.winrate),
        rollup.ban_count,
        top_players_block(&rollup.top_players),
        analysis,
    )
}

/// Numbered top five heroes from a pool.
pub fn top_heroes_block(pool: &[HeroPoolEntry]) -> String {
    if pool.is_empty() {
        return "Нет данных по героям.".to_string();
    }
    let mut text = String::new();
    for (idx, hero) in pool.iter().take(5).enumerate() {
        if idx > 0 {
            text.push('\n');
        }
        text.push_str(&format!(
            "{}. {} — {}W/{}L ({}%)",
            idx + 1,
            hero.hero_name,
            hero.wins,
            hero.losses,
            fmt2(hero.winrate)
        ));
    }
    text
}

/// Numbered top players on a hero.
pub fn top_players_block(players: &[TopPlayerEntry]) -> String {
    if players.is_empty() {
        return "Нет игроков с матчами на этом герое.".to_string();
    }
    let mut text = String::new();
    for (idx, player) in players.iter().enumerate() {
        if idx > 0 {
            text.push('\n');
        }
        text.push_str(&format!(
            "{}. {} ({}) — {}W/{}L ({}%)",
            idx + 1,
            player.nickname,
            player.team_name,
            player.wins,
            player.losses,
            fmt2(player.winrate)
        ));
    }
    text
}

/// Full hero pool, one line per hero.
pub fn hero_pool_block(pool: &[HeroPoolEntry]) -> String {
    if pool.is_empty() {
        return "Нет сыгранных героев для выбранного турнира.".to_string();
    }
    let mut text = String::new();
    for (idx, entry) in pool.iter().enumerate() {
        if idx > 0 {
            text.push('\n');
        }
        text.push_str(&format!(
            "{} — {}W ({}%) / {}L / {} игр",
            entry.hero_name,
            entry.wins,
            fmt2(entry.winrate),
            entry.losses,
            entry.games
        ));
    }
    text
}

pub fn teams_list(teams: &[Team]) -> String {
    if teams.is_empty() {
        return "Пока нет ни одной команды. Добавить: /add_team".to_string();
    }
    let mut text = String::from("Команды:");
    for team in teams {
        text.push_str(&format!("\n- {} ({})", team.name, team.tag));
    }
    text
}

pub fn tournaments_list(tournaments: &[Tournament]) -> String {
    if tournaments.is_empty() {
        return "Пока нет ни одного турнира.".to_string();
    }
    let mut text = String::from("Турниры:");
    for tournament in tournaments {
        text.push_str(&format!("\n- {}", tournament.name));
    }
    text
}
