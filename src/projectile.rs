//! Projectile kinematics and lifecycle.
//!
//! A projectile owns its sprite and integrates it each frame until it leaves
//! the play area horizontally. Gravity follows the firing player's gravity
//! sign, which the owner passes in on every update instead of the projectile
//! holding a reference back to the player.

use tracing::{debug, trace};

use crate::compute::{
    facing_rotation, is_off_screen_horizontally, spin_rotation, synced_gravity, usable_dt,
};
use crate::entities::{BoundingShape, ShapeKind, Size, Vector2, WeaponKind, WeaponSpec};
use crate::sprite::{Sprite, SpriteFactory};

#[derive(Debug)]
pub struct Projectile<S: Sprite> {
    id: u64,
    weapon: Option<WeaponKind>,
    sprite: S,
    velocity: Vector2,
    gravity: f32,
    spin: f32,
    destroyed: bool,
    bounding_shape: BoundingShape,
    window: Size,
}

impl<S: Sprite> Projectile<S> {
    /// Launch horizontally at `speed` from wherever `sprite` currently sits.
    pub fn new(
        id: u64,
        sprite: S,
        window: Size,
        speed: f32,
        gravity: f32,
        shape: ShapeKind,
        spin: f32,
    ) -> Self {
        let origin = Vector2::new(sprite.x(), sprite.y());
        let bounding_shape = BoundingShape::new(shape, origin, sprite.width(), sprite.height());
        Self {
            id,
            weapon: None,
            sprite,
            velocity: Vector2::new(speed, 0.0),
            gravity,
            spin,
            destroyed: false,
            bounding_shape,
            window,
        }
    }

    /// Instantiate the projectile a weapon fires from `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_weapon<F>(
        factory: &mut F,
        id: u64,
        kind: WeaponKind,
        spec: &WeaponSpec,
        x: f32,
        y: f32,
        window: Size,
        player_gravity: f32,
    ) -> Self
    where
        F: SpriteFactory<Sprite = S>,
    {
        let sprite = factory.spawn(&spec.asset, x, y);
        let gravity = player_gravity * spec.gravity_scale;
        let mut projectile = Self::new(id, sprite, window, spec.speed, gravity, spec.shape, spec.spin);
        projectile.weapon = Some(kind);
        projectile
    }

    /// Advance one frame. `player_gravity` is the owner's current gravity;
    /// only its sign is used. No-op once destroyed. An unusable `dt` skips
    /// integration but the off-screen check still runs.
    pub fn update(&mut self, dt: f32, player_gravity: f32) {
        if self.destroyed {
            return;
        }
        if let Some(dt) = usable_dt(dt) {
            self.integrate(dt, player_gravity);
        }

        let x = self.sprite.x();
        if is_off_screen_horizontally(x, self.sprite.width(), self.window.width) {
            debug!(id = self.id, x, y = self.sprite.y(), "projectile left the play area");
            self.destroy();
        }
    }

    fn integrate(&mut self, dt: f32, player_gravity: f32) {
        self.gravity = synced_gravity(self.gravity, player_gravity);
        self.velocity.y += self.gravity * dt;

        let rotation = if self.spin == 0.0 {
            facing_rotation(self.velocity)
        } else {
            spin_rotation(self.sprite.rotation(), self.spin, dt)
        };
        self.sprite.set_rotation(rotation);

        let x = self.sprite.x() + self.velocity.x * dt;
        let y = self.sprite.y() + self.velocity.y * dt;
        self.sprite.set_position(x, y);
    }

    /// Mark destroyed and release the sprite. Safe to call repeatedly; the
    /// sprite is released only the first time.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.sprite.delete();
        trace!(id = self.id, "projectile destroyed");
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn weapon(&self) -> Option<WeaponKind> {
        self.weapon
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.sprite.x(), self.sprite.y())
    }

    pub fn rotation(&self) -> f32 {
        self.sprite.rotation()
    }

    pub fn bounding_shape(&self) -> &BoundingShape {
        &self.bounding_shape
    }

    pub fn sprite(&self) -> &S {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut S {
        &mut self.sprite
    }
}
