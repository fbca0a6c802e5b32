//! Update handlers: command routing and callback dispatch.

use crate::bot::AppState;
use crate::bot::admin;
use crate::bot::format::{self, ALL_TOURNAMENTS, UNKNOWN_TOURNAMENT};
use crate::bot::insight;
use crate::bot::keyboard::{self, Action};
use crate::stats::{Store, StoreError};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

pub const HELP_TEXT: &str = "Привет, я Sil — бот для киберспортивной статистики (MLBB).\n\n\
Доступные команды:\n\
• /player_stats <ник> — статистика игрока по турниру\n\
• /team_stats <команда> — статистика команды\n\
• /hero_stats <герой> — статистика героя\n\
• /teams — список команд\n\
• /tournaments — список турниров\n\n\
Ввод матчей и редактирование данных доступны только администраторам.";

/// Split "/cmd@bot args" into the command name and its argument tail.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let command = match head.split_once('@') {
        Some((command, _bot)) => command,
        None => head,
    };
    if command.is_empty() {
        return None;
    }
    Some((command, args))
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some((command, args)) = parse_command(text) else {
        return Ok(());
    };

    match command {
        "start" | "help" => {
            bot.send_message(msg.chat.id, HELP_TEXT).await?;
        }
        "player_stats" => return handle_player_stats(&bot, &msg, &state, args).await,
        "team_stats" => return handle_team_stats(&bot, &msg, &state, args).await,
        "hero_stats" => return handle_hero_stats(&bot, &msg, &state, args).await,
        "teams" => match state.store.list_teams() {
            Ok(teams) => {
                bot.send_message(msg.chat.id, format::teams_list(&teams)).await?;
            }
            Err(e) => return db_error(&bot, msg.chat.id, "team listing", e).await,
        },
        "tournaments" => match state.store.list_tournaments() {
            Ok(tournaments) => {
                bot.send_message(msg.chat.id, format::tournaments_list(&tournaments)).await?;
            }
            Err(e) => return db_error(&bot, msg.chat.id, "tournament listing", e).await,
        },
        "add_team" => return admin_reply(&bot, &msg, &state, command, args, admin::add_team).await,
        "add_player" => {
            return admin_reply(&bot, &msg, &state, command, args, admin::add_player).await;
        }
        "add_match" => {
            return admin_reply(&bot, &msg, &state, command, args, admin::add_match).await;
        }
        "add_stat" => return admin_reply(&bot, &msg, &state, command, args, admin::add_stat).await,
        "add_hero" => return admin_reply(&bot, &msg, &state, command, args, admin::add_hero).await,
        "add_ban" => return admin_reply(&bot, &msg, &state, command, args, admin::add_ban).await,
        _ => {}
    }
    Ok(())
}

pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(action) = q.data.as_deref().and_then(Action::decode) else {
        if let Some(data) = q.data.as_deref() {
            warn!("Unknown callback payload: {data:?}");
        }
        return Ok(());
    };
    // Old buttons on messages Telegram no longer exposes get dropped.
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    match action {
        Action::PlayerScope { player_id, tournament_id } => {
            send_player_stats(&bot, chat_id, &state, player_id, tournament_id).await
        }
        Action::TeamScope { team_id, tournament_id } => {
            send_team_stats(&bot, chat_id, &state, team_id, tournament_id).await
        }
        Action::HeroScope { hero_id, tournament_id } => {
            send_hero_stats(&bot, chat_id, &state, hero_id, tournament_id).await
        }
        Action::PlayerPool { player_id, tournament_id } => {
            send_player_pool(&bot, chat_id, &state, player_id, tournament_id).await
        }
        Action::PlayerPoolDismiss => {
            bot.send_message(chat_id, "Ок, если потребуется полный пул — запроси позже.").await?;
            Ok(())
        }
    }
}

// ==================== PLAYER FLOW ====================

async fn handle_player_stats(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    args: &str,
) -> ResponseResult<()> {
    if args.is_empty() {
        bot.send_message(msg.chat.id, "Укажи ник игрока: /player_stats Kairi").await?;
        return Ok(());
    }
    let player = match state.store.find_player(args) {
        Ok(Some(player)) => player,
        Ok(None) => {
            bot.send_message(
                msg.chat.id,
                format!("Игрока с ником {args} не найдено. Проверь написание."),
            )
            .await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, msg.chat.id, "player lookup", e).await,
    };
    let tournaments = match state.store.player_tournaments(player.id) {
        Ok(tournaments) => tournaments,
        Err(e) => return db_error(bot, msg.chat.id, "tournament discovery", e).await,
    };
    if tournaments.is_empty() {
        bot.send_message(msg.chat.id, "Для этого игрока пока нет сыгранных матчей.").await?;
        return Ok(());
    }
    if let [only] = tournaments.as_slice() {
        return send_player_stats(bot, msg.chat.id, state, player.id, only.id).await;
    }
    bot.send_message(
        msg.chat.id,
        format!("За какой турнир показать статистику {}?", player.nickname),
    )
    .reply_markup(keyboard::player_scopes(player.id, &tournaments))
    .await?;
    Ok(())
}

async fn send_player_stats(
    bot: &Bot,
    chat_id: ChatId,
    state: &AppState,
    player_id: i64,
    tournament_id: i64,
) -> ResponseResult<()> {
    let player = match state.store.get_player(player_id) {
        Ok(Some(player)) => player,
        Ok(None) => {
            bot.send_message(chat_id, "Сессия устарела. Запроси статистику заново.").await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, chat_id, "player lookup", e).await,
    };
    let rollup = match state.store.player_rollup(player_id, Some(tournament_id)) {
        Ok(rollup) => rollup,
        Err(e) => return db_error(bot, chat_id, "player rollup", e).await,
    };
    if rollup.games == 0 {
        bot.send_message(chat_id, "Нет матчей для выбранного турнира.").await?;
        return Ok(());
    }

    let scope = scope_label(state, tournament_id);
    let payload = insight::player_payload(&player, &rollup, &scope);
    let analysis = insight::player_report(state.openai.as_ref(), &payload).await;
    bot.send_message(chat_id, format::player_summary(&player, &rollup, &scope, &analysis))
        .await?;

    bot.send_message(
        chat_id,
        format!("Показать полный список всех героев, на которых играл {}?", player.nickname),
    )
    .reply_markup(keyboard::pool_confirm(player_id, tournament_id))
    .await?;
    Ok(())
}

async fn send_player_pool(
    bot: &Bot,
    chat_id: ChatId,
    state: &AppState,
    player_id: i64,
    tournament_id: i64,
) -> ResponseResult<()> {
    let player = match state.store.get_player(player_id) {
        Ok(Some(player)) => player,
        Ok(None) => {
            bot.send_message(chat_id, "Сессия устарела. Запроси статистику заново.").await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, chat_id, "player lookup", e).await,
    };
    let rollup = match state.store.player_rollup(player_id, Some(tournament_id)) {
        Ok(rollup) => rollup,
        Err(e) => return db_error(bot, chat_id, "player rollup", e).await,
    };
    let scope = scope_label(state, tournament_id);
    bot.send_message(
        chat_id,
        format!(
            "Пул героев {} ({}):\n{}",
            player.nickname,
            scope,
            format::hero_pool_block(&rollup.hero_pool)
        ),
    )
    .await?;
    Ok(())
}

// ==================== TEAM FLOW ====================

async fn handle_team_stats(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    args: &str,
) -> ResponseResult<()> {
    if args.is_empty() {
        bot.send_message(msg.chat.id, "Укажи название или тег команды: /team_stats ONIC").await?;
        return Ok(());
    }
    let team = match state.store.find_team(args) {
        Ok(Some(team)) => team,
        Ok(None) => {
            bot.send_message(msg.chat.id, format!("Команда {args} не найдена.")).await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, msg.chat.id, "team lookup", e).await,
    };
    let tournaments = match state.store.team_tournaments(team.id) {
        Ok(tournaments) => tournaments,
        Err(e) => return db_error(bot, msg.chat.id, "tournament discovery", e).await,
    };
    bot.send_message(msg.chat.id, format!("Показать статистику {} за:", team.name))
        .reply_markup(keyboard::team_scopes(team.id, &tournaments))
        .await?;
    Ok(())
}

async fn send_team_stats(
    bot: &Bot,
    chat_id: ChatId,
    state: &AppState,
    team_id: i64,
    tournament_id: i64,
) -> ResponseResult<()> {
    let team = match state.store.get_team(team_id) {
        Ok(Some(team)) => team,
        Ok(None) => {
            bot.send_message(chat_id, "Сессия устарела. Запусти команду заново.").await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, chat_id, "team lookup", e).await,
    };
    let rollup = match state.store.team_rollup(team_id, Some(tournament_id)) {
        Ok(rollup) => rollup,
        Err(e) => return db_error(bot, chat_id, "team rollup", e).await,
    };
    if rollup.games == 0 {
        bot.send_message(chat_id, "Нет матчей для выбранного набора.").await?;
        return Ok(());
    }

    let scope = scope_label(state, tournament_id);
    let payload = insight::team_payload(&team, &rollup, &scope);
    let analysis = insight::team_report(state.openai.as_ref(), &payload).await;
    bot.send_message(chat_id, format::team_summary(&team, &rollup, &scope, &analysis)).await?;
    Ok(())
}

// ==================== HERO FLOW ====================

async fn handle_hero_stats(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    args: &str,
) -> ResponseResult<()> {
    if args.is_empty() {
        bot.send_message(msg.chat.id, "Укажи имя героя: /hero_stats Lancelot").await?;
        return Ok(());
    }
    let hero = match state.store.find_hero(args) {
        Ok(Some(hero)) => hero,
        Ok(None) => {
            bot.send_message(msg.chat.id, format!("Герой {args} не найден.")).await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, msg.chat.id, "hero lookup", e).await,
    };
    let tournaments = match state.store.hero_tournaments(hero.id) {
        Ok(tournaments) => tournaments,
        Err(e) => return db_error(bot, msg.chat.id, "tournament discovery", e).await,
    };
    bot.send_message(
        msg.chat.id,
        format!("Выбери турнир для героя {} (или Все турниры):", hero.name),
    )
    .reply_markup(keyboard::hero_scopes(hero.id, &tournaments))
    .await?;
    Ok(())
}

async fn send_hero_stats(
    bot: &Bot,
    chat_id: ChatId,
    state: &AppState,
    hero_id: i64,
    tournament_id: i64,
) -> ResponseResult<()> {
    let hero = match state.store.get_hero(hero_id) {
        Ok(Some(hero)) => hero,
        Ok(None) => {
            bot.send_message(chat_id, "Сессия устарела, запроси заново.").await?;
            return Ok(());
        }
        Err(e) => return db_error(bot, chat_id, "hero lookup", e).await,
    };
    let rollup = match state.store.hero_rollup(hero_id, Some(tournament_id)) {
        Ok(rollup) => rollup,
        Err(e) => return db_error(bot, chat_id, "hero rollup", e).await,
    };
    if rollup.games == 0 {
        bot.send_message(chat_id, "Для героя нет матчей в выбранном диапазоне.").await?;
        return Ok(());
    }

    let scope = scope_label(state, tournament_id);
    let payload = insight::hero_payload(&hero, &rollup, &scope);
    let analysis = insight::hero_report(state.openai.as_ref(), &payload).await;
    bot.send_message(chat_id, format::hero_summary(&hero, &rollup, &scope, &analysis)).await?;
    Ok(())
}

// ==================== SHARED ====================

fn scope_label(state: &AppState, tournament_id: i64) -> String {
    if tournament_id == 0 {
        return ALL_TOURNAMENTS.to_string();
    }
    match state.store.get_tournament(tournament_id) {
        Ok(Some(tournament)) => tournament.name,
        Ok(None) => UNKNOWN_TOURNAMENT.to_string(),
        Err(e) => {
            warn!("Tournament lookup failed: {e}");
            UNKNOWN_TOURNAMENT.to_string()
        }
    }
}

async fn db_error(bot: &Bot, chat_id: ChatId, action: &str, e: StoreError) -> ResponseResult<()> {
    warn!("{action} failed: {e}");
    bot.send_message(chat_id, "Ошибка базы данных, попробуй позже.").await?;
    Ok(())
}

async fn admin_reply(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    command: &str,
    args: &str,
    run: fn(&Store, &str) -> String,
) -> ResponseResult<()> {
    let reply = match msg.from.as_ref() {
        Some(user) if state.config.is_admin(user.id) => run(&state.store, args),
        _ => {
            info!("Rejected /{command} from non-admin");
            admin::NOT_ADMIN.to_string()
        }
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_command;

    #[test]
    fn test_parse_command_splits_args() {
        assert_eq!(parse_command("/player_stats Kairi"), Some(("player_stats", "Kairi")));
        assert_eq!(parse_command("/teams"), Some(("teams", "")));
        assert_eq!(
            parse_command("/add_team Onic Esports | ONC"),
            Some(("add_team", "Onic Esports | ONC"))
        );
    }

    #[test]
    fn test_parse_command_strips_bot_mention() {
        assert_eq!(parse_command("/help@sil_bot"), Some(("help", "")));
        assert_eq!(parse_command("/player_stats@sil_bot Kairi"), Some(("player_stats", "Kairi")));
    }

    #[test]
    fn test_parse_command_ignores_plain_text() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("  /teams  "), Some(("teams", "")));
    }
}
