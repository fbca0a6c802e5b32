//! Entity records stored in the statistics database.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;

/// In-game position a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Gold,
    Exp,
    Mid,
    Jungle,
    Roam,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gold" => Some(Role::Gold),
            "exp" => Some(Role::Exp),
            "mid" => Some(Role::Mid),
            "jungle" => Some(Role::Jungle),
            "roam" => Some(Role::Roam),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Gold => "gold",
            Role::Exp => "exp",
            Role::Mid => "mid",
            Role::Jungle => "jungle",
            Role::Roam => "roam",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Role::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown role: {s}").into()))
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// A team roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub tag: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub nickname: String,
    pub team_id: i64,
    pub role: Role,
}

/// Player joined with its team, as shown in summaries and report payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub id: i64,
    pub nickname: String,
    pub team_id: i64,
    pub role: Role,
    pub team_name: String,
    pub team_tag: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub game: String,
}

/// A single match between two teams. The winner is always one of the sides.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: i64,
    pub tournament_id: i64,
    pub team_a_id: i64,
    pub team_b_id: i64,
    pub winner_team_id: i64,
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_accepts_any_case() {
        assert_eq!(Role::parse("jungle"), Some(Role::Jungle));
        assert_eq!(Role::parse("JUNGLE"), Some(Role::Jungle));
        assert_eq!(Role::parse(" Gold "), Some(Role::Gold));
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(Role::parse("support"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_display_matches_parse() {
        for role in [Role::Gold, Role::Exp, Role::Mid, Role::Jungle, Role::Roam] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
