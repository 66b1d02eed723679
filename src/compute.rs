//! Pure numeric helpers for the per-frame update.
//!
//! Every function here is side-effect free; the entity modules compose them
//! so the invariants (clamped positions, wrapped indices, normalised angles)
//! can be tested in isolation.

use crate::entities::Vector2;

// ── Time step ────────────────────────────────────────────────────────────────

/// The step to integrate with, or `None` when `dt` is negative or not a
/// number. Callers skip kinematics entirely in that case.
pub fn usable_dt(dt: f32) -> Option<f32> {
    if dt >= 0.0 && dt.is_finite() {
        Some(dt)
    } else {
        None
    }
}

// ── Gravity ──────────────────────────────────────────────────────────────────

/// Flip `own` so its sign follows `reference`. A zero on either side leaves
/// `own` untouched, so gravity-free projectiles stay gravity-free.
pub fn synced_gravity(own: f32, reference: f32) -> f32 {
    if (reference < 0.0 && own > 0.0) || (reference > 0.0 && own < 0.0) {
        -own
    } else {
        own
    }
}

// ── Rotation ─────────────────────────────────────────────────────────────────

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Sprite rotation that points along `velocity`. Sprites rotate clockwise,
/// so the mathematical angle is mirrored.
pub fn facing_rotation(velocity: Vector2) -> f32 {
    normalize_degrees(360.0 - velocity.angle().to_degrees())
}

/// Advance a constant tumble by `spin` degrees per second.
pub fn spin_rotation(current: f32, spin: f32, dt: f32) -> f32 {
    normalize_degrees(current + spin * dt)
}

// ── Bounds ───────────────────────────────────────────────────────────────────

/// Keep a centre-anchored sprite inside `[half_height, window_height - half_height]`.
/// Returns the clamped y and whether a bound was hit.
pub fn clamp_vertical(y: f32, half_height: f32, window_height: f32) -> (f32, bool) {
    if y - half_height < 0.0 {
        (half_height, true)
    } else if y + half_height > window_height {
        (window_height - half_height, true)
    } else {
        (y, false)
    }
}

/// True once a centre-anchored sprite of `width` has fully left the
/// horizontal play area. Vertical position is not considered.
pub fn is_off_screen_horizontally(x: f32, width: f32, window_width: f32) -> bool {
    x - width > window_width || x + width < 0.0
}

// ── Weapon index ─────────────────────────────────────────────────────────────

pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index + 1 < len {
        index + 1
    } else {
        0
    }
}

pub fn previous_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index > 0 && index < len {
        index - 1
    } else {
        len - 1
    }
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
