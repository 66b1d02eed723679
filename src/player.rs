//! The player: gravity-flipping runner that owns its projectiles.
//!
//! Per frame the player
//! 1. drops destroyed projectiles and advances the rest,
//! 2. moves vertically by `gravity * dt` (a rate, not an acceleration) and
//!    horizontally by `dx * dt`,
//! 3. clamps itself inside the window,
//! 4. runs one edge trigger per action (flip gravity, fire, next weapon,
//!    previous weapon).

use tracing::{debug, trace, warn};

use crate::compute::{clamp_index, clamp_vertical, next_index, previous_index, usable_dt};
use crate::config::{GameConfig, PlayerTuning};
use crate::entities::{Arsenal, Size, Vector2, WeaponKind};
use crate::error::GameError;
use crate::input::{Action, EdgeTriggers, InputState};
use crate::projectile::Projectile;
use crate::sprite::{Sprite, SpriteFactory};

pub struct Player<F: SpriteFactory> {
    factory: F,
    sprite: F::Sprite,
    window: Size,
    half_width: f32,
    half_height: f32,
    dx: f32,
    dy: f32,
    gravity: f32,
    weapons: Vec<WeaponKind>,
    equipped: usize,
    arsenal: Arsenal,
    projectiles: Vec<Projectile<F::Sprite>>,
    triggers: EdgeTriggers,
    next_projectile_id: u64,
    despawned: bool,
}

impl<F: SpriteFactory> Player<F> {
    pub fn new(
        mut factory: F,
        window: Size,
        tuning: &PlayerTuning,
        arsenal: Arsenal,
    ) -> Result<Self, GameError> {
        if tuning.weapons.is_empty() {
            return Err(GameError::InvalidArgument(
                "player needs at least one weapon".to_string(),
            ));
        }
        if window.width <= 0.0 || window.height <= 0.0 {
            return Err(GameError::InvalidArgument(format!(
                "window must be positive, got {}x{}",
                window.width, window.height
            )));
        }

        let mut sprite = factory.spawn(&tuning.asset, tuning.start_x, tuning.start_y);
        let half_width = sprite.width() / 2.0;
        let half_height = sprite.height() / 2.0;
        let (start_y, clamped) = clamp_vertical(tuning.start_y, half_height, window.height);
        if clamped {
            warn!(start_y = tuning.start_y, clamped_to = start_y, "player spawn outside window");
            sprite.set_position(tuning.start_x, start_y);
        }

        Ok(Self {
            factory,
            sprite,
            window,
            half_width,
            half_height,
            dx: tuning.dx,
            dy: 0.0,
            gravity: tuning.gravity,
            weapons: tuning.weapons.clone(),
            equipped: 0,
            arsenal,
            projectiles: Vec::new(),
            triggers: EdgeTriggers::new(),
            next_projectile_id: 0,
            despawned: false,
        })
    }

    pub fn from_config(factory: F, config: &GameConfig) -> Result<Self, GameError> {
        Self::new(factory, config.window, &config.player, config.weapons.clone())
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    pub fn update<I: InputState + ?Sized>(&mut self, dt: f32, input: &I) {
        if self.despawned {
            return;
        }

        self.update_projectiles(dt);

        match usable_dt(dt) {
            Some(dt) => self.integrate(dt),
            None => warn!(dt, "ignoring negative frame time"),
        }

        for action in self.triggers.sample(input) {
            match action {
                Action::FlipGravity => self.flip_gravity(),
                Action::Fire => {
                    self.fire();
                }
                Action::NextWeapon => self.next_weapon(),
                Action::PreviousWeapon => self.previous_weapon(),
            }
        }
    }

    /// Drop destroyed projectiles and advance the survivors. Projectiles
    /// destroyed during this pass are dropped on the next one.
    fn update_projectiles(&mut self, dt: f32) {
        let gravity = self.gravity;
        let before = self.projectiles.len();
        let mut i = 0;
        while i < self.projectiles.len() {
            if self.projectiles[i].is_destroyed() {
                self.projectiles.swap_remove(i);
            } else {
                self.projectiles[i].update(dt, gravity);
                i += 1;
            }
        }
        let pruned = before - self.projectiles.len();
        if pruned > 0 {
            trace!(pruned, live = self.projectiles.len(), "pruned projectiles");
        }
    }

    fn integrate(&mut self, dt: f32) {
        let x = self.sprite.x() + self.dx * dt;
        let y = self.sprite.y() + self.gravity * dt;
        self.dy = self.gravity;

        let (y, clamped) = clamp_vertical(y, self.half_height, self.window.height);
        if clamped {
            self.dy = 0.0;
        }
        self.sprite.set_position(x, y);
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    pub fn flip_gravity(&mut self) {
        self.gravity = -self.gravity;
        debug!(gravity = self.gravity, "gravity flipped");
    }

    /// Spawn one projectile of the equipped weapon at the player's position.
    /// Returns its id.
    pub fn fire(&mut self) -> u64 {
        let kind = self.equipped_weapon();
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;

        let projectile = Projectile::from_weapon(
            &mut self.factory,
            id,
            kind,
            self.arsenal.spec(kind),
            self.sprite.x(),
            self.sprite.y(),
            self.window,
            self.gravity,
        );
        debug!(id, weapon = %kind, live = self.projectiles.len() + 1, "fired");
        self.projectiles.push(projectile);
        id
    }

    pub fn next_weapon(&mut self) {
        self.equipped = next_index(self.equipped, self.weapons.len());
        debug!(weapon = %self.equipped_weapon(), "weapon switched");
    }

    pub fn previous_weapon(&mut self) {
        self.equipped = previous_index(self.equipped, self.weapons.len());
        debug!(weapon = %self.equipped_weapon(), "weapon switched");
    }

    /// Select a weapon slot; out-of-range indices clamp to the last slot.
    pub fn set_equipped_index(&mut self, index: usize) {
        self.equipped = clamp_index(index, self.weapons.len());
    }

    /// Destroy every live projectile and release the player sprite. Later
    /// calls, and later updates, do nothing.
    pub fn despawn(&mut self) {
        if self.despawned {
            return;
        }
        for projectile in &mut self.projectiles {
            projectile.destroy();
        }
        self.projectiles.clear();
        self.sprite.delete();
        self.despawned = true;
        debug!("player despawned");
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.sprite.x(), self.sprite.y())
    }

    /// Teleport the player. `y` is clamped into the window like a frame
    /// update would.
    pub fn set_position(&mut self, x: f32, y: f32) {
        let (y, _) = clamp_vertical(y, self.half_height, self.window.height);
        self.sprite.set_position(x, y);
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn set_dx(&mut self, dx: f32) {
        self.dx = dx;
    }

    /// Vertical rate applied on the last update; zero when clamped.
    pub fn dy(&self) -> f32 {
        self.dy
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    pub fn window(&self) -> Size {
        self.window
    }

    pub fn weapons(&self) -> &[WeaponKind] {
        &self.weapons
    }

    pub fn equipped_index(&self) -> usize {
        clamp_index(self.equipped, self.weapons.len())
    }

    pub fn equipped_weapon(&self) -> WeaponKind {
        self.weapons[self.equipped_index()]
    }

    pub fn projectiles(&self) -> &[Projectile<F::Sprite>] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut [Projectile<F::Sprite>] {
        &mut self.projectiles
    }

    pub fn sprite(&self) -> &F::Sprite {
        &self.sprite
    }

    /// Total projectiles fired this session, live or not.
    pub fn shots_fired(&self) -> u64 {
        self.next_projectile_id
    }

    pub fn triggers(&self) -> &EdgeTriggers {
        &self.triggers
    }

    pub fn is_despawned(&self) -> bool {
        self.despawned
    }
}
