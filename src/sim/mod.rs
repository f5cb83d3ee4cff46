//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within a category)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod collision;
pub mod director;
pub mod entity;
pub mod player;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{enemy_points, resolve_collisions};
pub use director::{Director, DirectorState, Formation};
pub use entity::{ArmorSegment, Boss, Category, Entity, EntityId, EntityKind, Rect, damage_alpha};
pub use player::PlayerController;
pub use registry::Registry;
pub use state::{GameEvent, GameMode, GameOverReason, GameState};
pub use tick::{TickInput, tick};
