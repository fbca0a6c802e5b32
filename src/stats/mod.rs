//! Esports statistics: storage, resolution and aggregation.

pub mod model;
mod queries;
pub mod rollup;
pub mod store;

pub use model::{Hero, PlayerProfile, Role, Team, Tournament};
pub use rollup::{
    HeroPoolEntry, HeroRollup, PlayerRollup, TeamRollup, TopPlayerEntry, TournamentRef,
};
pub use store::{Store, StoreError};
