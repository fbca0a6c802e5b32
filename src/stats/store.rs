//! Persistent SQLite store for teams, players, matches and heroes.

use crate::stats::model::{Hero, MatchRecord, Player, PlayerProfile, Role, Team, Tournament};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Game tag stamped on newly created heroes.
pub const DEFAULT_GAME: &str = "MLBB";

/// Errors surfaced by the store and the aggregation queries on top of it.
#[derive(Debug)]
pub enum StoreError {
    /// The referenced row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// A uniqueness or integrity constraint rejected a write.
    Integrity(String),
    /// Any other driver failure.
    Sqlite(rusqlite::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { entity, id } => write!(f, "{entity} #{id} not found"),
            StoreError::Integrity(msg) => write!(f, "integrity violation: {msg}"),
            StoreError::Sqlite(e) => write!(f, "database error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Sqlite(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Integrity(msg.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => StoreError::Sqlite(e),
        }
    }
}

/// Handle over a single SQLite connection.
pub struct Store {
    pub(super) conn: Mutex<Connection>,
}

impl Store {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;

        let (teams, players, matches) = store.counts()?;
        info!(
            "Opened store at {:?} ({teams} teams, {players} players, {matches} matches)",
            path.as_ref()
        );
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                tag TEXT NOT NULL UNIQUE,
                region TEXT
            );

            CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nickname TEXT NOT NULL UNIQUE,
                team_id INTEGER NOT NULL,
                role TEXT NOT NULL,
                FOREIGN KEY (team_id) REFERENCES teams(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS tournaments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS matches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tournament_id INTEGER NOT NULL,
                team_a_id INTEGER NOT NULL,
                team_b_id INTEGER NOT NULL,
                winner_team_id INTEGER NOT NULL,
                date TEXT,
                FOREIGN KEY (tournament_id) REFERENCES tournaments(id) ON DELETE CASCADE,
                FOREIGN KEY (team_a_id) REFERENCES teams(id) ON DELETE CASCADE,
                FOREIGN KEY (team_b_id) REFERENCES teams(id) ON DELETE CASCADE,
                FOREIGN KEY (winner_team_id) REFERENCES teams(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS heroes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                role TEXT,
                game TEXT DEFAULT 'MLBB'
            );

            CREATE TABLE IF NOT EXISTS player_match_stats (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id INTEGER NOT NULL,
                player_id INTEGER NOT NULL,
                hero_id INTEGER NOT NULL,
                kills INTEGER DEFAULT 0,
                deaths INTEGER DEFAULT 0,
                assists INTEGER DEFAULT 0,
                is_win INTEGER DEFAULT 0,
                FOREIGN KEY (match_id) REFERENCES matches(id) ON DELETE CASCADE,
                FOREIGN KEY (player_id) REFERENCES players(id) ON DELETE CASCADE,
                FOREIGN KEY (hero_id) REFERENCES heroes(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS hero_bans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id INTEGER NOT NULL,
                team_id INTEGER NOT NULL,
                hero_id INTEGER NOT NULL,
                ban_order INTEGER,
                FOREIGN KEY (match_id) REFERENCES matches(id) ON DELETE CASCADE,
                FOREIGN KEY (team_id) REFERENCES teams(id) ON DELETE CASCADE,
                FOREIGN KEY (hero_id) REFERENCES heroes(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
            CREATE INDEX IF NOT EXISTS idx_matches_tournament ON matches(tournament_id);
            CREATE INDEX IF NOT EXISTS idx_stats_match ON player_match_stats(match_id);
            CREATE INDEX IF NOT EXISTS idx_stats_player ON player_match_stats(player_id);
            CREATE INDEX IF NOT EXISTS idx_stats_hero ON player_match_stats(hero_id);
            CREATE INDEX IF NOT EXISTS idx_bans_hero ON hero_bans(hero_id);
            "#,
        )?;
        Ok(())
    }

    fn counts(&self) -> Result<(i64, i64, i64), StoreError> {
        let conn = self.conn.lock().unwrap();
        let teams = conn.query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))?;
        let players = conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        let matches = conn.query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?;
        Ok((teams, players, matches))
    }

    // ==================== WRITE PATH ====================

    /// Insert a team. Name and tag must be unique.
    pub fn add_team(&self, name: &str, tag: &str, region: Option<&str>) -> Result<Team, StoreError> {
        let name = name.trim();
        let tag = tag.trim();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO teams (name, tag, region) VALUES (?1, ?2, ?3)",
            params![name, tag, region.map(str::trim)],
        )?;
        let id = conn.last_insert_rowid();
        info!("Added team {name} ({tag}) as #{id}");
        Ok(Team {
            id,
            name: name.to_string(),
            tag: tag.to_string(),
            region: region.map(|r| r.trim().to_string()),
        })
    }

    /// Insert a player on an existing team.
    pub fn add_player(&self, nickname: &str, team_id: i64, role: Role) -> Result<Player, StoreError> {
        let nickname = nickname.trim();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO players (nickname, team_id, role) VALUES (?1, ?2, ?3)",
            params![nickname, team_id, role],
        )?;
        let id = conn.last_insert_rowid();
        info!("Added player {nickname} ({role}) to team #{team_id}");
        Ok(Player { id, nickname: nickname.to_string(), team_id, role })
    }

    /// Look up a tournament by name (case-insensitive) or create it.
    /// Re-invocation with a different casing returns the existing row.
    pub fn get_or_create_tournament(&self, name: &str) -> Result<Tournament, StoreError> {
        let name = name.trim();
        let conn = self.conn.lock().unwrap();
        let existing = conn
            .query_row(
                "SELECT id, name FROM tournaments WHERE LOWER(name) = LOWER(?1)",
                params![name],
                Self::tournament_row,
            )
            .optional()?;
        if let Some(tournament) = existing {
            return Ok(tournament);
        }
        conn.execute("INSERT INTO tournaments (name) VALUES (?1)", params![name])?;
        let id = conn.last_insert_rowid();
        info!("Created tournament {name} as #{id}");
        Ok(Tournament { id, name: name.to_string() })
    }

    /// Look up a hero by name (case-insensitive) or create it with the
    /// default game tag.
    pub fn get_or_create_hero(&self, name: &str) -> Result<Hero, StoreError> {
        let name = name.trim();
        let conn = self.conn.lock().unwrap();
        let existing = conn
            .query_row(
                "SELECT id, name, role, game FROM heroes WHERE LOWER(name) = LOWER(?1)",
                params![name],
                Self::hero_row,
            )
            .optional()?;
        if let Some(hero) = existing {
            return Ok(hero);
        }
        conn.execute(
            "INSERT INTO heroes (name, role, game) VALUES (?1, NULL, ?2)",
            params![name, DEFAULT_GAME],
        )?;
        let id = conn.last_insert_rowid();
        info!("Created hero {name} as #{id}");
        Ok(Hero { id, name: name.to_string(), role: None, game: DEFAULT_GAME.to_string() })
    }

    /// Insert a hero with an explicit role. The name must be unique.
    pub fn add_hero(&self, name: &str, role: Option<&str>) -> Result<Hero, StoreError> {
        let name = name.trim();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO heroes (name, role, game) VALUES (?1, ?2, ?3)",
            params![name, role.map(str::trim), DEFAULT_GAME],
        )?;
        let id = conn.last_insert_rowid();
        info!("Added hero {name} as #{id}");
        Ok(Hero {
            id,
            name: name.to_string(),
            role: role.map(|r| r.trim().to_string()),
            game: DEFAULT_GAME.to_string(),
        })
    }

    /// Record a match. The winner must be one of the two sides.
    pub fn add_match(
        &self,
        tournament_id: i64,
        team_a_id: i64,
        team_b_id: i64,
        winner_team_id: i64,
        date: Option<&str>,
    ) -> Result<MatchRecord, StoreError> {
        if winner_team_id != team_a_id && winner_team_id != team_b_id {
            return Err(StoreError::Integrity(format!(
                "winner team #{winner_team_id} is not a side of the match"
            )));
        }
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO matches (tournament_id, team_a_id, team_b_id, winner_team_id, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![tournament_id, team_a_id, team_b_id, winner_team_id, date],
        )?;
        let id = conn.last_insert_rowid();
        info!("Recorded match #{id}: team #{team_a_id} vs #{team_b_id}, winner #{winner_team_id}");
        Ok(MatchRecord {
            id,
            tournament_id,
            team_a_id,
            team_b_id,
            winner_team_id,
            date: date.map(str::to_string),
        })
    }

    /// Record one player's line in a match. The caller decides `is_win`
    /// from the match winner; reads trust the stored flag as-is.
    pub fn add_player_stat(
        &self,
        match_id: i64,
        player_id: i64,
        hero_id: i64,
        kills: u32,
        deaths: u32,
        assists: u32,
        is_win: bool,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO player_match_stats (match_id, player_id, hero_id, kills, deaths, assists, is_win)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![match_id, player_id, hero_id, kills, deaths, assists, is_win as i64],
        )?;
        debug!("Recorded stat line: match #{match_id}, player #{player_id}, hero #{hero_id}");
        Ok(())
    }

    /// Record a hero ban in a match.
    pub fn add_hero_ban(
        &self,
        match_id: i64,
        team_id: i64,
        hero_id: i64,
        ban_order: Option<u32>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO hero_bans (match_id, team_id, hero_id, ban_order)
             VALUES (?1, ?2, ?3, ?4)",
            params![match_id, team_id, hero_id, ban_order],
        )?;
        debug!("Recorded ban: match #{match_id}, team #{team_id}, hero #{hero_id}");
        Ok(())
    }

    // ==================== RESOLUTION ====================

    /// Case-insensitive nickname lookup, joined with the player's team.
    pub fn find_player(&self, nickname: &str) -> Result<Option<PlayerProfile>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let profile = conn
            .query_row(
                "SELECT p.id, p.nickname, p.team_id, p.role, t.name, t.tag
                 FROM players p
                 JOIN teams t ON t.id = p.team_id
                 WHERE LOWER(p.nickname) = LOWER(?1)",
                params![nickname.trim()],
                Self::profile_row,
            )
            .optional()?;
        Ok(profile)
    }

    pub fn get_player(&self, id: i64) -> Result<Option<PlayerProfile>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let profile = conn
            .query_row(
                "SELECT p.id, p.nickname, p.team_id, p.role, t.name, t.tag
                 FROM players p
                 JOIN teams t ON t.id = p.team_id
                 WHERE p.id = ?1",
                params![id],
                Self::profile_row,
            )
            .optional()?;
        Ok(profile)
    }

    /// Case-insensitive lookup by tag or name. A tag match wins over a
    /// name match when both exist.
    pub fn find_team(&self, query: &str) -> Result<Option<Team>, StoreError> {
        let query = query.trim();
        let conn = self.conn.lock().unwrap();
        let by_tag = conn
            .query_row(
                "SELECT id, name, tag, region FROM teams WHERE LOWER(tag) = LOWER(?1)",
                params![query],
                Self::team_row,
            )
            .optional()?;
        if by_tag.is_some() {
            return Ok(by_tag);
        }
        let by_name = conn
            .query_row(
                "SELECT id, name, tag, region FROM teams WHERE LOWER(name) = LOWER(?1)",
                params![query],
                Self::team_row,
            )
            .optional()?;
        Ok(by_name)
    }

    pub fn get_team(&self, id: i64) -> Result<Option<Team>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let team = conn
            .query_row(
                "SELECT id, name, tag, region FROM teams WHERE id = ?1",
                params![id],
                Self::team_row,
            )
            .optional()?;
        Ok(team)
    }

    /// Case-insensitive hero lookup by name.
    pub fn find_hero(&self, name: &str) -> Result<Option<Hero>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let hero = conn
            .query_row(
                "SELECT id, name, role, game FROM heroes WHERE LOWER(name) = LOWER(?1)",
                params![name.trim()],
                Self::hero_row,
            )
            .optional()?;
        Ok(hero)
    }

    pub fn get_hero(&self, id: i64) -> Result<Option<Hero>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let hero = conn
            .query_row(
                "SELECT id, name, role, game FROM heroes WHERE id = ?1",
                params![id],
                Self::hero_row,
            )
            .optional()?;
        Ok(hero)
    }

    pub fn get_tournament(&self, id: i64) -> Result<Option<Tournament>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let tournament = conn
            .query_row(
                "SELECT id, name FROM tournaments WHERE id = ?1",
                params![id],
                Self::tournament_row,
            )
            .optional()?;
        Ok(tournament)
    }

    pub fn get_match(&self, id: i64) -> Result<Option<MatchRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let record = conn
            .query_row(
                "SELECT id, tournament_id, team_a_id, team_b_id, winner_team_id, date
                 FROM matches WHERE id = ?1",
                params![id],
                Self::match_row,
            )
            .optional()?;
        Ok(record)
    }

    // ==================== LISTINGS ====================

    pub fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, tag, region FROM teams ORDER BY name")?;
        let rows = stmt.query_map([], Self::team_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name FROM tournaments ORDER BY name")?;
        let rows = stmt.query_map([], Self::tournament_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ==================== ROW MAPPERS ====================

    fn team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
        Ok(Team {
            id: row.get(0)?,
            name: row.get(1)?,
            tag: row.get(2)?,
            region: row.get(3)?,
        })
    }

    fn profile_row(row: &Row<'_>) -> rusqlite::Result<PlayerProfile> {
        Ok(PlayerProfile {
            id: row.get(0)?,
            nickname: row.get(1)?,
            team_id: row.get(2)?,
            role: row.get(3)?,
            team_name: row.get(4)?,
            team_tag: row.get(5)?,
        })
    }

    fn tournament_row(row: &Row<'_>) -> rusqlite::Result<Tournament> {
        Ok(Tournament { id: row.get(0)?, name: row.get(1)? })
    }

    fn hero_row(row: &Row<'_>) -> rusqlite::Result<Hero> {
        Ok(Hero {
            id: row.get(0)?,
            name: row.get(1)?,
            role: row.get(2)?,
            game: row.get(3)?,
        })
    }

    fn match_row(row: &Row<'_>) -> rusqlite::Result<MatchRecord> {
        Ok(MatchRecord {
            id: row.get(0)?,
            tournament_id: row.get(1)?,
            team_a_id: row.get(2)?,
            team_b_id: row.get(3)?,
            winner_team_id: row.get(4)?,
            date: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn test_add_team_rejects_duplicate_name() {
        let store = store();
        store.add_team("Onic Esports", "ONC", None).unwrap();
        let err = store.add_team("Onic Esports", "ON2", None).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
        assert!(err.to_string().contains("teams.name"));
    }

    #[test]
    fn test_add_team_rejects_duplicate_tag() {
        let store = store();
        store.add_team("Onic Esports", "ONC", None).unwrap();
        let err = store.add_team("Onic PH", "ONC", None).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn test_add_player_requires_existing_team() {
        let store = store();
        let err = store.add_player("Kairi", 42, Role::Jungle).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn test_get_or_create_tournament_is_case_insensitive() {
        let store = store();
        let first = store.get_or_create_tournament("EWC").unwrap();
        let second = store.get_or_create_tournament("ewc").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "EWC");
        assert_eq!(store.list_tournaments().unwrap().len(), 1);
    }

    #[test]
    fn test_get_or_create_hero_is_case_insensitive() {
        let store = store();
        let first = store.get_or_create_hero("Lancelot").unwrap();
        let second = store.get_or_create_hero("LANCELOT").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Lancelot");
        assert_eq!(second.game, DEFAULT_GAME);
    }

    #[test]
    fn test_add_hero_rejects_duplicate_name() {
        let store = store();
        store.add_hero("Lancelot", Some("assassin")).unwrap();
        let err = store.add_hero("Lancelot", None).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn test_find_team_prefers_tag_over_name() {
        let store = store();
        let echo = store.add_team("Echo Philippines", "RRQ", None).unwrap();
        store.add_team("RRQ", "HOSHI", None).unwrap();
        let found = store.find_team("rrq").unwrap().unwrap();
        assert_eq!(found.id, echo.id);
    }

    #[test]
    fn test_find_team_falls_back_to_name() {
        let store = store();
        let team = store.add_team("Onic Esports", "ONC", Some("ID")).unwrap();
        let found = store.find_team("onic esports").unwrap().unwrap();
        assert_eq!(found.id, team.id);
        assert_eq!(found.region.as_deref(), Some("ID"));
        assert!(store.find_team("blacklist").unwrap().is_none());
    }

    #[test]
    fn test_find_player_is_case_insensitive_and_joins_team() {
        let store = store();
        let team = store.add_team("Onic Esports", "ONC", None).unwrap();
        let player = store.add_player("Kairi", team.id, Role::Jungle).unwrap();
        let profile = store.find_player("kAiRi").unwrap().unwrap();
        assert_eq!(profile.id, player.id);
        assert_eq!(profile.team_name, "Onic Esports");
        assert_eq!(profile.team_tag, "ONC");
        assert_eq!(profile.role, Role::Jungle);
    }

    #[test]
    fn test_add_match_rejects_foreign_winner() {
        let store = store();
        let a = store.add_team("Onic", "ONC", None).unwrap();
        let b = store.add_team("RRQ Hoshi", "RRQ", None).unwrap();
        let c = store.add_team("Blacklist", "BLI", None).unwrap();
        let t = store.get_or_create_tournament("MSC").unwrap();
        let err = store.add_match(t.id, a.id, b.id, c.id, None).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn test_add_match_roundtrip_with_date() {
        let store = store();
        let a = store.add_team("Onic", "ONC", None).unwrap();
        let b = store.add_team("RRQ Hoshi", "RRQ", None).unwrap();
        let t = store.get_or_create_tournament("MSC").unwrap();
        let m = store.add_match(t.id, a.id, b.id, a.id, Some("2024-07-01")).unwrap();
        let loaded = store.get_match(m.id).unwrap().unwrap();
        assert_eq!(loaded, m);
        assert_eq!(loaded.date.as_deref(), Some("2024-07-01"));
        assert!(store.get_match(m.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_add_player_stat_requires_existing_match() {
        let store = store();
        let team = store.add_team("Onic", "ONC", None).unwrap();
        let player = store.add_player("Kairi", team.id, Role::Jungle).unwrap();
        let hero = store.get_or_create_hero("Lancelot").unwrap();
        let err = store.add_player_stat(999, player.id, hero.id, 5, 1, 7, true).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn test_list_teams_sorted_by_name() {
        let store = store();
        store.add_team("RRQ Hoshi", "RRQ", None).unwrap();
        store.add_team("Blacklist", "BLI", None).unwrap();
        store.add_team("Onic", "ONC", None).unwrap();
        let names: Vec<String> = store.list_teams().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Blacklist", "Onic", "RRQ Hoshi"]);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.db");
        {
            let store = Store::open(&path).unwrap();
            store.add_team("Onic", "ONC", None).unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.list_teams().unwrap().len(), 1);
    }
}
