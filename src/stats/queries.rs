//! Aggregation queries layered over the store.

use crate::stats::rollup::{
    HeroPoolEntry, HeroRollup, PlayerRollup, TeamRollup, TopPlayerEntry, TournamentRef, round2,
    winrate,
};
use crate::stats::store::{Store, StoreError};
use rusqlite::{Connection, OptionalExtension, params};

impl Store {
    /// Aggregate one player's stat lines, optionally scoped to a
    /// tournament. A scope of `Some(0)` means all time, same as `None`.
    pub fn player_rollup(
        &self,
        player_id: i64,
        tournament_id: Option<i64>,
    ) -> Result<PlayerRollup, StoreError> {
        let tournament_id = tournament_id.filter(|&id| id != 0);
        let conn = self.conn.lock().unwrap();
        ensure_exists(&conn, "player", "SELECT 1 FROM players WHERE id = ?1", player_id)?;

        let (games, wins, kills, deaths, assists) = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(CASE WHEN pms.is_win = 1 THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(pms.kills), 0),
                    COALESCE(SUM(pms.deaths), 0),
                    COALESCE(SUM(pms.assists), 0)
               FROM player_match_stats pms
               JOIN matches m ON m.id = pms.match_id
              WHERE pms.player_id = ?1
                AND (?2 IS NULL OR m.tournament_id = ?2)",
            params![player_id, tournament_id],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, u32>(4)?,
                ))
            },
        )?;

        let hero_pool = collect_hero_pool(
            &conn,
            "SELECT pms.hero_id,
                    COALESCE(h.name, 'Unknown') AS hero_name,
                    COUNT(*) AS games,
                    COALESCE(SUM(CASE WHEN pms.is_win = 1 THEN 1 ELSE 0 END), 0) AS wins
               FROM player_match_stats pms
               JOIN matches m ON m.id = pms.match_id
               LEFT JOIN heroes h ON h.id = pms.hero_id
              WHERE pms.player_id = ?1
                AND (?2 IS NULL OR m.tournament_id = ?2)
              GROUP BY pms.hero_id
              ORDER BY games DESC, hero_name ASC",
            player_id,
            tournament_id,
        )?;

        Ok(PlayerRollup {
            games,
            wins,
            losses: games.saturating_sub(wins),
            winrate: winrate(wins, games),
            total_kills: kills,
            total_deaths: deaths,
            total_assists: assists,
            avg_kills: average(kills, games),
            avg_deaths: average(deaths, games),
            avg_assists: average(assists, games),
            kda: kda(kills, deaths, assists),
            hero_pool,
        })
    }

    /// Aggregate a team's matches and the stat lines of its roster in
    /// those matches. Averages are per match, not per stat row.
    pub fn team_rollup(
        &self,
        team_id: i64,
        tournament_id: Option<i64>,
    ) -> Result<TeamRollup, StoreError> {
        let tournament_id = tournament_id.filter(|&id| id != 0);
        let conn = self.conn.lock().unwrap();
        ensure_exists(&conn, "team", "SELECT 1 FROM teams WHERE id = ?1", team_id)?;

        let (games, wins) = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(CASE WHEN m.winner_team_id = ?1 THEN 1 ELSE 0 END), 0)
               FROM matches m
              WHERE (m.team_a_id = ?1 OR m.team_b_id = ?1)
                AND (?2 IS NULL OR m.tournament_id = ?2)",
            params![team_id, tournament_id],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
        )?;

        let (kills, deaths, assists) = conn.query_row(
            "SELECT COALESCE(SUM(pms.kills), 0),
                    COALESCE(SUM(pms.deaths), 0),
                    COALESCE(SUM(pms.assists), 0)
               FROM player_match_stats pms
               JOIN players p ON p.id = pms.player_id
               JOIN matches m ON m.id = pms.match_id
              WHERE p.team_id = ?1
                AND (m.team_a_id = ?1 OR m.team_b_id = ?1)
                AND (?2 IS NULL OR m.tournament_id = ?2)",
            params![team_id, tournament_id],
            |row| {
                Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?, row.get::<_, u32>(2)?))
            },
        )?;

        let hero_pool = collect_hero_pool(
            &conn,
            "SELECT pms.hero_id,
                    COALESCE(h.name, 'Unknown') AS hero_name,
                    COUNT(*) AS games,
                    COALESCE(SUM(CASE WHEN pms.is_win = 1 THEN 1 ELSE 0 END), 0) AS wins
               FROM player_match_stats pms
               JOIN players p ON p.id = pms.player_id
               JOIN matches m ON m.id = pms.match_id
               LEFT JOIN heroes h ON h.id = pms.hero_id
              WHERE p.team_id = ?1
                AND (m.team_a_id = ?1 OR m.team_b_id = ?1)
                AND (?2 IS NULL OR m.tournament_id = ?2)
              GROUP BY pms.hero_id
              ORDER BY games DESC, hero_name ASC",
            team_id,
            tournament_id,
        )?;

        Ok(TeamRollup {
            games,
            wins,
            losses: games.saturating_sub(wins),
            winrate: winrate(wins, games),
            avg_kills: average(kills, games),
            avg_deaths: average(deaths, games),
            avg_assists: average(assists, games),
            hero_pool,
        })
    }

    /// Aggregate a hero's pick stats, ban count and its most frequent
    /// players within the scope.
    pub fn hero_rollup(
        &self,
        hero_id: i64,
        tournament_id: Option<i64>,
    ) -> Result<HeroRollup, StoreError> {
        let tournament_id = tournament_id.filter(|&id| id != 0);
        let conn = self.conn.lock().unwrap();
        ensure_exists(&conn, "hero", "SELECT 1 FROM heroes WHERE id = ?1", hero_id)?;

        let (games, wins) = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(CASE WHEN pms.is_win = 1 THEN 1 ELSE 0 END), 0)
               FROM player_match_stats pms
               JOIN matches m ON m.id = pms.match_id
              WHERE pms.hero_id = ?1
                AND (?2 IS NULL OR m.tournament_id = ?2)",
            params![hero_id, tournament_id],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
        )?;

        let ban_count = conn.query_row(
            "SELECT COUNT(*)
               FROM hero_bans hb
               JOIN matches m ON m.id = hb.match_id
              WHERE hb.hero_id = ?1
                AND (?2 IS NULL OR m.tournament_id = ?2)",
            params![hero_id, tournament_id],
            |row| row.get::<_, u32>(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT p.id,
                    p.nickname,
                    t.name AS team_name,
                    COUNT(*) AS games,
                    COALESCE(SUM(CASE WHEN pms.is_win = 1 THEN 1 ELSE 0 END), 0) AS wins
               FROM player_match_stats pms
               JOIN players p ON p.id = pms.player_id
               JOIN teams t ON t.id = p.team_id
               JOIN matches m ON m.id = pms.match_id
              WHERE pms.hero_id = ?1
                AND (?2 IS NULL OR m.tournament_id = ?2)
              GROUP BY p.id
              ORDER BY games DESC, p.nickname ASC
              LIMIT 5",
        )?;
        let rows = stmt.query_map(params![hero_id, tournament_id], |row| {
            let games: u32 = row.get(3)?;
            let wins: u32 = row.get(4)?;
            Ok(TopPlayerEntry {
                player_id: row.get(0)?,
                nickname: row.get(1)?,
                team_name: row.get(2)?,
                games,
                wins,
                losses: games.saturating_sub(wins),
                winrate: winrate(wins, games),
            })
        })?;
        let top_players = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(HeroRollup {
            games,
            wins,
            losses: games.saturating_sub(wins),
            winrate: winrate(wins, games),
            ban_count,
            top_players,
        })
    }

    // ==================== SCOPE DISCOVERY ====================

    /// Tournaments in which the player has at least one stat line.
    pub fn player_tournaments(&self, player_id: i64) -> Result<Vec<TournamentRef>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.id, t.name
               FROM tournaments t
               JOIN matches m ON m.tournament_id = t.id
               JOIN player_match_stats pms ON pms.match_id = m.id
              WHERE pms.player_id = ?1
              ORDER BY t.name",
        )?;
        let rows = stmt.query_map(params![player_id], |row| {
            Ok(TournamentRef { id: row.get(0)?, name: row.get(1)? })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Tournaments in which the team has played at least one match.
    pub fn team_tournaments(&self, team_id: i64) -> Result<Vec<TournamentRef>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.id, t.name
               FROM tournaments t
               JOIN matches m ON m.tournament_id = t.id
              WHERE m.team_a_id = ?1 OR m.team_b_id = ?1
              ORDER BY t.name",
        )?;
        let rows = stmt.query_map(params![team_id], |row| {
            Ok(TournamentRef { id: row.get(0)?, name: row.get(1)? })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Tournaments in which the hero was picked at least once.
    pub fn hero_tournaments(&self, hero_id: i64) -> Result<Vec<TournamentRef>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.id, t.name
               FROM tournaments t
               JOIN matches m ON m.tournament_id = t.id
               JOIN player_match_stats pms ON pms.match_id = m.id
              WHERE pms.hero_id = ?1
              ORDER BY t.name",
        )?;
        let rows = stmt.query_map(params![hero_id], |row| {
            Ok(TournamentRef { id: row.get(0)?, name: row.get(1)? })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn ensure_exists(
    conn: &Connection,
    entity: &'static str,
    sql: &str,
    id: i64,
) -> Result<(), StoreError> {
    let found = conn.query_row(sql, params![id], |_| Ok(())).optional()?;
    if found.is_none() {
        return Err(StoreError::NotFound { entity, id });
    }
    Ok(())
}

fn collect_hero_pool(
    conn: &Connection,
    sql: &str,
    entity_id: i64,
    tournament_id: Option<i64>,
) -> Result<Vec<HeroPoolEntry>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![entity_id, tournament_id], |row| {
        let games: u32 = row.get(2)?;
        let wins: u32 = row.get(3)?;
        Ok(HeroPoolEntry {
            hero_id: row.get(0)?,
            hero_name: row.get(1)?,
            games,
            wins,
            losses: games.saturating_sub(wins),
            winrate: winrate(wins, games),
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn average(total: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    round2(f64::from(total) / f64::from(games))
}

// Deaths are floored at one so a deathless run still yields a finite
// ratio instead of dividing by zero.
fn kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    round2(f64::from(kills + assists) / f64::from(deaths.max(1)))
}
