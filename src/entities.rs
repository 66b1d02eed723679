//! Plain value types shared by the simulation: dimensions, vectors,
//! bounding shapes and the weapon table.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::GameError;

// ── Dimensions & vectors ─────────────────────────────────────────────────────

/// Play-area dimensions in world units (pixels). Fixed for a session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Angle of the vector from the +x axis, in radians, range `[-PI, PI]`.
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ── Bounding shapes ──────────────────────────────────────────────────────────

/// Kind tag accepted by the bounding-shape factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl FromStr for ShapeKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            other => Err(GameError::InvalidArgument(format!(
                "unknown bounding shape kind `{other}`"
            ))),
        }
    }
}

impl TryFrom<String> for ShapeKind {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Collision shape built once per projectile and never mutated.
/// Consumed by an external collision system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundingShape {
    Rectangle {
        origin: Vector2,
        width: f32,
        height: f32,
    },
    Circle {
        origin: Vector2,
        radius: f32,
    },
}

impl BoundingShape {
    /// Build a shape for a sprite of the given size. A circle takes the
    /// larger sprite dimension as its radius.
    pub fn new(kind: ShapeKind, origin: Vector2, width: f32, height: f32) -> Self {
        match kind {
            ShapeKind::Rectangle => BoundingShape::Rectangle {
                origin,
                width,
                height,
            },
            ShapeKind::Circle => BoundingShape::Circle {
                origin,
                radius: width.max(height),
            },
        }
    }

    /// Same as [`BoundingShape::new`] but from a textual kind
    /// (`"rectangle"` / `"circle"`, any case).
    pub fn from_kind_str(
        kind: &str,
        origin: Vector2,
        width: f32,
        height: f32,
    ) -> Result<Self, GameError> {
        Ok(Self::new(kind.parse()?, origin, width, height))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            BoundingShape::Rectangle { .. } => ShapeKind::Rectangle,
            BoundingShape::Circle { .. } => ShapeKind::Circle,
        }
    }

    pub fn origin(&self) -> Vector2 {
        match self {
            BoundingShape::Rectangle { origin, .. } | BoundingShape::Circle { origin, .. } => {
                *origin
            }
        }
    }
}

// ── Weapons ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Pistol,
    Cannon,
    Rocket,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Cannon, WeaponKind::Rocket];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Cannon => "cannon",
            WeaponKind::Rocket => "rocket",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Construction parameters for one weapon's projectiles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WeaponSpec {
    /// Image identifier handed to the sprite factory.
    pub asset: String,
    /// Horizontal launch speed in pixels per second.
    pub speed: f32,
    /// Projectile gravity = player gravity × this. Zero ignores gravity.
    pub gravity_scale: f32,
    /// Constant tumble in degrees per second; zero faces along velocity.
    #[serde(default)]
    pub spin: f32,
    #[serde(default = "default_shape")]
    pub shape: ShapeKind,
}

fn default_shape() -> ShapeKind {
    ShapeKind::Rectangle
}

impl WeaponSpec {
    pub fn pistol() -> Self {
        Self {
            asset: "playerBullet.png".to_string(),
            speed: 1500.0,
            gravity_scale: 2.0,
            spin: 0.0,
            shape: ShapeKind::Rectangle,
        }
    }

    pub fn cannon() -> Self {
        Self {
            asset: "playerCannonball.png".to_string(),
            speed: 500.0,
            gravity_scale: 0.0,
            spin: 300.0,
            shape: ShapeKind::Circle,
        }
    }

    pub fn rocket() -> Self {
        Self {
            asset: "playerRocket.png".to_string(),
            speed: 400.0,
            gravity_scale: 2.0,
            spin: 0.0,
            shape: ShapeKind::Rectangle,
        }
    }
}

/// Weapon table: one spec per [`WeaponKind`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Arsenal {
    pub pistol: WeaponSpec,
    pub cannon: WeaponSpec,
    pub rocket: WeaponSpec,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            pistol: WeaponSpec::pistol(),
            cannon: WeaponSpec::cannon(),
            rocket: WeaponSpec::rocket(),
        }
    }
}

impl Arsenal {
    pub fn spec(&self, kind: WeaponKind) -> &WeaponSpec {
        match kind {
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Cannon => &self.cannon,
            WeaponKind::Rocket => &self.rocket,
        }
    }
}
