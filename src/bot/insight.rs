//! Analytical summaries over rollup payloads.
//!
//! Each report ships the computed numbers to the model as JSON so the
//! text can only restate them. Without a configured client, or when
//! the request fails, a fallback message carries the raw payload.

use crate::openai;
use crate::stats::{Hero, HeroRollup, PlayerProfile, PlayerRollup, Team, TeamRollup};
use serde_json::{Value, json};
use tracing::warn;

const PLAYER_PROMPT: &str = "Ты — аналитик по киберспортивной дисциплине MLBB. \
Ниже переданы расчётные данные по игроку за конкретный турнир. \
Сформируй структурированный разбор: количество игр/побед/WR, KDA и средние K/D/A, \
ключевые герои с их винрейтом и 1–2 предложения об общей форме. \
Используй только переданные цифры, ничего не придумывай.";

const TEAM_PROMPT: &str = "Ты — аналитик MLBB. На основе данных расскажи о форме команды: \
общий винрейт, средние K/D/A, стиль (агрессивный, сбалансированный и т.д.), \
ключевые герои с их винрейтом и возможные сильные или слабые стороны.";

const HERO_PROMPT: &str = "Ты — аналитик меты MLBB. Проанализируй героя: общий WR, \
частоту использования, лучших игроков на нём и (если есть) популярность в банах. \
Сделай выводы о том, насколько герой метовый и кому подходит.";

pub fn player_payload(player: &PlayerProfile, rollup: &PlayerRollup, scope: &str) -> Value {
    let top_heroes: Vec<_> = rollup.hero_pool.iter().take(5).collect();
    json!({
        "player": {
            "nickname": player.nickname,
            "team": player.team_name,
            "role": player.role.as_str(),
        },
        "tournament": scope,
        "stats": {
            "games_total": rollup.games,
            "wins": rollup.wins,
            "losses": rollup.losses,
            "winrate": rollup.winrate,
            "total_kills": rollup.total_kills,
            "total_deaths": rollup.total_deaths,
            "total_assists": rollup.total_assists,
            "avg_kills": rollup.avg_kills,
            "avg_deaths": rollup.avg_deaths,
            "avg_assists": rollup.avg_assists,
            "kda": rollup.kda,
        },
        "top_heroes": top_heroes,
    })
}

pub fn team_payload(team: &Team, rollup: &TeamRollup, scope: &str) -> Value {
    let top_heroes: Vec<_> = rollup.hero_pool.iter().take(5).collect();
    json!({
        "team": { "name": team.name, "tag": team.tag },
        "tournament": scope,
        "stats": {
            "games_total": rollup.games,
            "wins": rollup.wins,
            "losses": rollup.losses,
            "winrate": rollup.winrate,
            "avg_kills": rollup.avg_kills,
            "avg_deaths": rollup.avg_deaths,
            "avg_assists": rollup.avg_assists,
        },
        "top_heroes": top_heroes,
    })
}

pub fn hero_payload(hero: &Hero, rollup: &HeroRollup, scope: &str) -> Value {
    json!({
        "hero": { "name": hero.name, "role": hero.role },
        "tournament": scope,
        "stats": {
            "games_total": rollup.games,
            "wins": rollup.wins,
            "losses": rollup.losses,
            "winrate": rollup.winrate,
        },
        "top_players": rollup.top_players,
        "ban_stats": { "ban_count": rollup.ban_count },
    })
}

pub async fn player_report(client: Option<&openai::Client>, payload: &Value) -> String {
    run_report(client, PLAYER_PROMPT, payload).await
}

pub async fn team_report(client: Option<&openai::Client>, payload: &Value) -> String {
    run_report(client, TEAM_PROMPT, payload).await
}

pub async fn hero_report(client: Option<&openai::Client>, payload: &Value) -> String {
    run_report(client, HERO_PROMPT, payload).await
}

async fn run_report(client: Option<&openai::Client>, prompt: &str, payload: &Value) -> String {
    let Some(client) = client else {
        return fallback(payload);
    };
    let user = format!("Данные: {payload}");
    match client.complete(prompt, &user).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Analysis request failed: {e}");
            fallback(payload)
        }
    }
}

fn fallback(payload: &Value) -> String {
    format!("⚠️ Не удалось получить ответ от ИИ. Попробуй позже.\n\nДанные: {payload}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{HeroPoolEntry, Role, TopPlayerEntry};

    fn profile() -> PlayerProfile {
        PlayerProfile {
            id: 1,
            nickname: "Kairi".to_string(),
            team_id: 1,
            role: Role::Jungle,
            team_name: "Onic".to_string(),
            team_tag: "ONC".to_string(),
        }
    }

    fn pool(n: usize) -> Vec<HeroPoolEntry> {
        (0..n)
            .map(|i| HeroPoolEntry {
                hero_id: i as i64,
                hero_name: format!("Hero{i}"),
                games: 2,
                wins: 1,
                losses: 1,
                winrate: 50.0,
            })
            .collect()
    }

    #[test]
    fn test_player_payload_shape() {
        let rollup = PlayerRollup {
            games: 12,
            wins: 8,
            losses: 4,
            winrate: 66.67,
            total_kills: 60,
            total_deaths: 24,
            total_assists: 84,
            avg_kills: 5.0,
            avg_deaths: 2.0,
            avg_assists: 7.0,
            kda: 6.0,
            hero_pool: pool(7),
        };
        let payload = player_payload(&profile(), &rollup, "MSC");
        assert_eq!(payload["player"]["nickname"], "Kairi");
        assert_eq!(payload["player"]["role"], "jungle");
        assert_eq!(payload["tournament"], "MSC");
        assert_eq!(payload["stats"]["games_total"], 12);
        assert_eq!(payload["stats"]["kda"], 6.0);
        assert_eq!(payload["top_heroes"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_team_payload_caps_top_heroes() {
        let team = Team {
            id: 1,
            name: "Onic".to_string(),
            tag: "ONC".to_string(),
            region: None,
        };
        let rollup = TeamRollup {
            games: 3,
            wins: 2,
            losses: 1,
            winrate: 66.67,
            avg_kills: 20.0,
            avg_deaths: 10.0,
            avg_assists: 40.0,
            hero_pool: pool(6),
        };
        let payload = team_payload(&team, &rollup, "Все турниры");
        assert_eq!(payload["team"]["tag"], "ONC");
        assert_eq!(payload["stats"]["games_total"], 3);
        assert!(payload["stats"].get("kda").is_none());
        assert_eq!(payload["top_heroes"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_hero_payload_includes_bans() {
        let hero = Hero {
            id: 1,
            name: "Lancelot".to_string(),
            role: None,
            game: "MLBB".to_string(),
        };
        let rollup = HeroRollup {
            games: 9,
            wins: 6,
            losses: 3,
            winrate: 66.67,
            ban_count: 4,
            top_players: vec![TopPlayerEntry {
                player_id: 1,
                nickname: "Kairi".to_string(),
                team_name: "Onic".to_string(),
                games: 9,
                wins: 6,
                losses: 3,
                winrate: 66.67,
            }],
        };
        let payload = hero_payload(&hero, &rollup, "MSC");
        assert_eq!(payload["hero"]["role"], serde_json::Value::Null);
        assert_eq!(payload["ban_stats"]["ban_count"], 4);
        assert_eq!(payload["top_players"][0]["nickname"], "Kairi");
    }

    #[test]
    fn test_fallback_embeds_payload() {
        let payload = json!({"stats": {"games_total": 2}});
        let text = fallback(&payload);
        assert!(text.contains("Не удалось получить ответ от ИИ"));
        assert!(text.contains(r#""games_total":2"#));
    }
}
