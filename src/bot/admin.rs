//! Data-entry commands. Each takes the raw argument tail, pipe-separated,
//! and returns the reply text; the caller has already checked admin rights.

use crate::stats::{Role, Store, StoreError};
use chrono::NaiveDate;
use tracing::warn;

pub const NOT_ADMIN: &str = "Эта команда доступна только администраторам.";

fn split_args(args: &str) -> Vec<&str> {
    args.split('|').map(str::trim).filter(|part| !part.is_empty()).collect()
}

fn store_failure(action: &str, e: StoreError) -> String {
    match e {
        StoreError::Integrity(msg) => format!("Данные отклонены: {msg}"),
        other => {
            warn!("{action} failed: {other}");
            "Ошибка базы данных, попробуй позже.".to_string()
        }
    }
}

pub fn add_team(store: &Store, args: &str) -> String {
    let parts = split_args(args);
    if parts.len() < 2 || parts.len() > 3 {
        return "Формат: /add_team <название> | <тег> | [регион]".to_string();
    }
    let region = parts.get(2).copied().filter(|r| *r != "-");
    match store.add_team(parts[0], parts[1], region) {
        Ok(team) => format!("Команда {} ({}) добавлена.", team.name, team.tag),
        Err(e) => store_failure("add_team", e),
    }
}

pub fn add_player(store: &Store, args: &str) -> String {
    let parts = split_args(args);
    let &[nickname, team_query, role_raw] = parts.as_slice() else {
        return "Формат: /add_player <ник> | <команда> | <роль>".to_string();
    };
    let Some(role) = Role::parse(role_raw) else {
        return "Некорректная роль. Доступны: gold, exp, mid, jungle, roam.".to_string();
    };
    let team = match store.find_team(team_query) {
        Ok(Some(team)) => team,
        Ok(None) => return "Команда не найдена, попробуй ещё раз.".to_string(),
        Err(e) => return store_failure("add_player", e),
    };
    match store.add_player(nickname, team.id, role) {
        Ok(player) => {
            format!("Игрок {} добавлен в команду {} ({}).", player.nickname, team.name, role)
        }
        Err(e) => store_failure("add_player", e),
    }
}

pub fn add_match(store: &Store, args: &str) -> String {
    let parts = split_args(args);
    if parts.len() < 4 || parts.len() > 5 {
        return "Формат: /add_match <турнир> | <команда A> | <команда B> | <A или B> | [дата]"
            .to_string();
    }
    let date = match parts.get(4) {
        Some(raw) => {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                return "Дата должна быть в формате ГГГГ-ММ-ДД.".to_string();
            }
            Some(*raw)
        }
        None => None,
    };
    let team_a = match store.find_team(parts[1]) {
        Ok(Some(team)) => team,
        Ok(None) => return format!("Команда {} не найдена.", parts[1]),
        Err(e) => return store_failure("add_match", e),
    };
    let team_b = match store.find_team(parts[2]) {
        Ok(Some(team)) => team,
        Ok(None) => return format!("Команда {} не найдена.", parts[2]),
        Err(e) => return store_failure("add_match", e),
    };
    if team_b.id == team_a.id {
        return "Команда B должна отличаться от команды A.".to_string();
    }
    let winner_id = match parts[3].to_lowercase().as_str() {
        "a" => team_a.id,
        "b" => team_b.id,
        _ => return "Ответь A или B.".to_string(),
    };
    let tournament = match store.get_or_create_tournament(parts[0]) {
        Ok(tournament) => tournament,
        Err(e) => return store_failure("add_match", e),
    };
    match store.add_match(tournament.id, team_a.id, team_b.id, winner_id, date) {
        Ok(record) => format!(
            "Матч сохранён (ID {}). Добавь статистику игроков: /add_stat {} | nickname | hero | kills | deaths | assists",
            record.id, record.id
        ),
        Err(e) => store_failure("add_match", e),
    }
}

pub fn add_stat(store: &Store, args: &str) -> String {
    let parts = split_args(args);
    let &[match_raw, nickname, hero_name, kills_raw, deaths_raw, assists_raw] = parts.as_slice()
    else {
        return "Формат: /add_stat <ID матча> | <ник> | <герой> | <киллы> | <смерти> | <ассисты>"
            .to_string();
    };
    let Ok(match_id) = match_raw.parse::<i64>() else {
        return "ID матча должен быть числом.".to_string();
    };
    let (Ok(kills), Ok(deaths), Ok(assists)) =
        (kills_raw.parse::<u32>(), deaths_raw.parse::<u32>(), assists_raw.parse::<u32>())
    else {
        return "Kills/Deaths/Assists должны быть числами.".to_string();
    };
    let record = match store.get_match(match_id) {
        Ok(Some(record)) => record,
        Ok(None) => return format!("Матч с ID {match_id} не найден."),
        Err(e) => return store_failure("add_stat", e),
    };
    let player = match store.find_player(nickname) {
        Ok(Some(player)) => player,
        Ok(None) => return format!("Игрок {nickname} не найден в БД."),
        Err(e) => return store_failure("add_stat", e),
    };
    if player.team_id != record.team_a_id && player.team_id != record.team_b_id {
        return "Этот игрок не относится к командам матча.".to_string();
    }
    let hero = match store.get_or_create_hero(hero_name) {
        Ok(hero) => hero,
        Err(e) => return store_failure("add_stat", e),
    };
    let is_win = player.team_id == record.winner_team_id;
    if let Err(e) =
        store.add_player_stat(match_id, player.id, hero.id, kills, deaths, assists, is_win)
    {
        return store_failure("add_stat", e);
    }
    format!(
        "Добавлено: {} на {} ({}/{}/{}) — {}",
        player.nickname,
        hero.name,
        kills,
        deaths,
        assists,
        if is_win { "WIN" } else { "LOSS" }
    )
}

pub fn add_hero(store: &Store, args: &str) -> String {
    let parts = split_args(args);
    if parts.is_empty() || parts.len() > 2 {
        return "Формат: /add_hero <имя> | [роль]".to_string();
    }
    let role = parts.get(1).copied().filter(|r| *r != "-");
    match store.add_hero(parts[0], role) {
        Ok(hero) => format!("Герой {} добавлен.", hero.name),
        Err(e) => store_failure("add_hero", e),
    }
}

pub fn add_ban(store: &Store, args: &str) -> String {
    let parts = split_args(args);
    if parts.len() < 3 || parts.len() > 4 {
        return "Формат: /add_ban <ID матча> | <команда> | <герой> | [порядок]".to_string();
    }
    let Ok(match_id) = parts[0].parse::<i64>() else {
        return "ID матча должен быть числом.".to_string();
    };
    let ban_order = match parts.get(3) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(order) => Some(order),
            Err(_) => return "Порядок бана должен быть числом.".to_string(),
        },
        None => None,
    };
    let record = match store.get_match(match_id) {
        Ok(Some(record)) => record,
        Ok(None) => return format!("Матч с ID {match_id} не найден."),
        Err(e) => return store_failure("add_ban", e),
    };
    let team = match store.find_team(parts[1]) {
        Ok(Some(team)) => team,
        Ok(None) => return format!("Команда {} не найдена.", parts[1]),
        Err(e) => return store_failure("add_ban", e),
    };
    if team.id != record.team_a_id && team.id != record.team_b_id {
        return "Эта команда не участвует в матче.".to_string();
    }
    let hero = match store.get_or_create_hero(parts[2]) {
        Ok(hero) => hero,
        Err(e) => return store_failure("add_ban", e),
    };
    if let Err(e) = store.add_hero_ban(match_id, team.id, hero.id, ban_order) {
        return store_failure("add_ban", e);
    }
    format!("Бан сохранён: {} забанили {}.", team.name, hero.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    /// Two teams, one player each, via the public commands.
    fn seeded() -> Store {
        let store = store();
        assert!(add_team(&store, "Onic Esports | ONC | ID").contains("добавлена"));
        assert!(add_team(&store, "RRQ Hoshi | RRQ | -").contains("добавлена"));
        assert!(add_player(&store, "Kairi | ONC | jungle").contains("добавлен"));
        assert!(add_player(&store, "Alberttt | RRQ | Jungle").contains("добавлен"));
        store
    }

    #[test]
    fn test_add_team_usage_and_region() {
        let store = store();
        assert!(add_team(&store, "").starts_with("Формат:"));
        assert!(add_team(&store, "Onic").starts_with("Формат:"));

        add_team(&store, "Onic | ONC | ID");
        add_team(&store, "RRQ Hoshi | RRQ | -");
        let onic = store.find_team("ONC").unwrap().unwrap();
        assert_eq!(onic.region.as_deref(), Some("ID"));
        let rrq = store.find_team("RRQ").unwrap().unwrap();
        assert_eq!(rrq.region, None);
    }

    #[test]
    fn test_add_team_duplicate_is_rejected() {
        let store = store();
        add_team(&store, "Onic | ONC");
        let reply = add_team(&store, "Onic | ON2");
        assert!(reply.starts_with("Данные отклонены:"), "{reply}");
    }

    #[test]
    fn test_add_player_validation() {
        let store = seeded();
        assert!(add_player(&store, "Kairi | ONC").starts_with("Формат:"));
        assert_eq!(
            add_player(&store, "Nova | ONC | support"),
            "Некорректная роль. Доступны: gold, exp, mid, jungle, roam."
        );
        assert_eq!(
            add_player(&store, "Nova | XYZ | mid"),
            "Команда не найдена, попробуй ещё раз."
        );
        assert_eq!(
            add_player(&store, "Nova | onic esports | mid"),
            "Игрок Nova добавлен в команду Onic Esports (mid)."
        );
    }

    #[test]
    fn test_add_match_validation() {
        let store = seeded();
        assert!(add_match(&store, "MSC | ONC").starts_with("Формат:"));
        assert_eq!(add_match(&store, "MSC | XYZ | RRQ | A"), "Команда XYZ не найдена.");
        assert_eq!(
            add_match(&store, "MSC | ONC | onic esports | A"),
            "Команда B должна отличаться от команды A."
        );
        assert_eq!(add_match(&store, "MSC | ONC | RRQ | C"), "Ответь A или B.");
        assert_eq!(
            add_match(&store, "MSC | ONC | RRQ | A | 07-01-2024"),
            "Дата должна быть в формате ГГГГ-ММ-ДД."
        );
        // Nothing was written by the rejected attempts.
        assert!(store.list_tournaments().unwrap().is_empty());
    }

    #[test]
    fn test_add_match_records_winner_and_date() {
        let store = seeded();
        let reply = add_match(&store, "MSC | RRQ | ONC | b | 2024-07-01");
        assert!(reply.contains("Матч сохранён (ID 1)"), "{reply}");
        assert!(reply.contains("/add_stat 1"));

        let record = store.get_match(1).unwrap().unwrap();
        let onic = store.find_team("ONC").unwrap().unwrap();
        assert_eq!(record.winner_team_id, onic.id);
        assert_eq!(record.date.as_deref(), Some("2024-07-01"));
        assert_eq!(store.list_tournaments().unwrap().len(), 1);
    }

    #[test]
    fn test_add_stat_validation() {
        let store = seeded();
        add_match(&store, "MSC | ONC | RRQ | A");

        assert!(add_stat(&store, "1 | Kairi | Lancelot").starts_with("Формат:"));
        assert_eq!(
            add_stat(&store, "x | Kairi | Lancelot | 5 | 1 | 7"),
            "ID матча должен быть числом."
        );
        assert_eq!(
            add_stat(&store, "9 | Kairi | Lancelot | 5 | 1 | 7"),
            "Матч с ID 9 не найден."
        );
        assert_eq!(
            add_stat(&store, "1 | Ghost | Lancelot | 5 | 1 | 7"),
            "Игрок Ghost не найден в БД."
        );
        assert_eq!(
            add_stat(&store, "1 | Kairi | Lancelot | 5 | one | 7"),
            "Kills/Deaths/Assists должны быть числами."
        );
    }

    #[test]
    fn test_add_stat_derives_win_from_match() {
        let store = seeded();
        add_match(&store, "MSC | ONC | RRQ | A");

        let win = add_stat(&store, "1 | kairi | Lancelot | 5 | 1 | 7");
        assert_eq!(win, "Добавлено: Kairi на Lancelot (5/1/7) — WIN");
        let loss = add_stat(&store, "1 | Alberttt | Fanny | 2 | 3 | 4");
        assert_eq!(loss, "Добавлено: Alberttt на Fanny (2/3/4) — LOSS");

        let kairi = store.find_player("Kairi").unwrap().unwrap();
        let rollup = store.player_rollup(kairi.id, None).unwrap();
        assert_eq!(rollup.wins, 1);
        // The hero was auto-created by the command.
        assert!(store.find_hero("lancelot").unwrap().is_some());
    }

    #[test]
    fn test_add_stat_rejects_outsider_player() {
        let store = seeded();
        add_team(&store, "Blacklist | BLI");
        add_player(&store, "Wise | BLI | gold");
        add_match(&store, "MSC | ONC | RRQ | A");

        assert_eq!(
            add_stat(&store, "1 | Wise | Lancelot | 5 | 1 | 7"),
            "Этот игрок не относится к командам матча."
        );
    }

    #[test]
    fn test_add_hero_with_optional_role() {
        let store = store();
        assert!(add_hero(&store, "").starts_with("Формат:"));
        assert_eq!(add_hero(&store, "Lancelot | assassin"), "Герой Lancelot добавлен.");
        let hero = store.find_hero("Lancelot").unwrap().unwrap();
        assert_eq!(hero.role.as_deref(), Some("assassin"));
        assert!(add_hero(&store, "Lancelot").starts_with("Данные отклонены:"));
    }

    #[test]
    fn test_add_ban_flow() {
        let store = seeded();
        add_team(&store, "Blacklist | BLI");
        add_match(&store, "MSC | ONC | RRQ | A");

        assert!(add_ban(&store, "1 | ONC").starts_with("Формат:"));
        assert_eq!(add_ban(&store, "1 | ONC | Ling | first"), "Порядок бана должен быть числом.");
        assert_eq!(add_ban(&store, "1 | BLI | Ling"), "Эта команда не участвует в матче.");
        assert_eq!(add_ban(&store, "5 | ONC | Ling"), "Матч с ID 5 не найден.");
        assert_eq!(add_ban(&store, "1 | ONC | Ling | 1"), "Бан сохранён: Onic Esports забанили Ling.");

        let ling = store.find_hero("Ling").unwrap().unwrap();
        let rollup = store.hero_rollup(ling.id, None).unwrap();
        assert_eq!(rollup.ban_count, 1);
    }
}
