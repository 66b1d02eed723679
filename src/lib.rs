//! Gravity-flipping side scroller: entity simulation core.
//!
//! The library owns the per-frame kinematics of the player and its
//! projectiles, the scrolling tile map and the delayed sound queue.
//! Rendering, audio and window/input plumbing are reached only through
//! the traits in [`sprite`], [`input`] and [`sound`].

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod player;
pub mod projectile;
pub mod sound;
pub mod sprite;
pub mod tilemap;

pub use config::{ConfigError, GameConfig};
pub use entities::{Arsenal, BoundingShape, ShapeKind, Size, Vector2, WeaponKind, WeaponSpec};
pub use error::GameError;
pub use input::{Action, EdgeTriggers, InputState, KeyMap};
pub use player::Player;
pub use projectile::Projectile;
pub use sound::{PlayDuration, SoundQueue, SoundSink};
pub use sprite::{HeadlessFactory, HeadlessSprite, Sprite, SpriteFactory};
pub use tilemap::{Column, Tile, TileMap};
