use gravity_runner::compute::*;
use gravity_runner::entities::Vector2;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

// ── usable_dt ─────────────────────────────────────────────────────────────────

#[test]
fn usable_dt_accepts_zero_and_positive() {
    assert_eq!(usable_dt(0.0), Some(0.0));
    assert_eq!(usable_dt(0.016), Some(0.016));
}

#[test]
fn usable_dt_rejects_negative_and_nan() {
    assert_eq!(usable_dt(-0.1), None);
    assert_eq!(usable_dt(f32::NAN), None);
    assert_eq!(usable_dt(f32::INFINITY), None);
}

// ── synced_gravity ────────────────────────────────────────────────────────────

#[test]
fn gravity_follows_reference_sign() {
    assert_eq!(synced_gravity(1000.0, -500.0), -1000.0);
    assert_eq!(synced_gravity(-1000.0, 500.0), 1000.0);
}

#[test]
fn gravity_unchanged_when_signs_agree() {
    assert_eq!(synced_gravity(-1000.0, -500.0), -1000.0);
    assert_eq!(synced_gravity(1000.0, 500.0), 1000.0);
}

#[test]
fn zero_gravity_stays_zero() {
    assert_eq!(synced_gravity(0.0, -500.0), 0.0);
    assert_eq!(synced_gravity(0.0, 500.0), 0.0);
}

// ── rotation ──────────────────────────────────────────────────────────────────

#[test]
fn facing_rotation_mirrors_velocity_angle() {
    assert_close(facing_rotation(Vector2::new(1.0, 0.0)), 0.0);
    assert_close(facing_rotation(Vector2::new(0.0, 1.0)), 270.0); // up → 360 - 90
    assert_close(facing_rotation(Vector2::new(0.0, -1.0)), 90.0); // down → 360 + 90, wrapped
    assert_close(facing_rotation(Vector2::new(-1.0, 0.0)), 180.0);
}

#[test]
fn spin_rotation_accumulates_and_wraps() {
    assert_close(spin_rotation(0.0, 300.0, 0.5), 150.0);
    assert_close(spin_rotation(350.0, 300.0, 0.1), 20.0);
    assert_close(spin_rotation(10.0, -300.0, 0.1), 340.0);
}

#[test]
fn normalize_degrees_range() {
    for raw in [-720.0, -359.5, -1.0, 0.0, 45.0, 359.9, 360.0, 1080.5] {
        let wrapped = normalize_degrees(raw);
        assert!((0.0..360.0).contains(&wrapped), "{raw} → {wrapped}");
    }
}

#[test]
fn normalize_degrees_handles_negative_and_overflow() {
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(720.0), 0.0);
    assert_eq!(normalize_degrees(-1e-9), 0.0);
}

// ── clamp_vertical ────────────────────────────────────────────────────────────

#[test]
fn clamp_bottom_edge() {
    assert_eq!(clamp_vertical(10.0, 16.0, 600.0), (16.0, true));
}

#[test]
fn clamp_top_edge() {
    assert_eq!(clamp_vertical(590.0, 16.0, 600.0), (584.0, true));
}

#[test]
fn clamp_inside_is_untouched() {
    assert_eq!(clamp_vertical(300.0, 16.0, 600.0), (300.0, false));
    // Exactly on the bound is still inside
    assert_eq!(clamp_vertical(16.0, 16.0, 600.0), (16.0, false));
    assert_eq!(clamp_vertical(584.0, 16.0, 600.0), (584.0, false));
}

// ── off-screen test ───────────────────────────────────────────────────────────

#[test]
fn off_screen_right_needs_full_width_past_edge() {
    assert!(!is_off_screen_horizontally(816.0, 16.0, 800.0));
    assert!(is_off_screen_horizontally(816.5, 16.0, 800.0));
}

#[test]
fn off_screen_left_needs_full_width_past_zero() {
    assert!(!is_off_screen_horizontally(-16.0, 16.0, 800.0));
    assert!(is_off_screen_horizontally(-16.5, 16.0, 800.0));
}

// ── weapon index ──────────────────────────────────────────────────────────────

#[test]
fn next_index_wraps_to_zero() {
    assert_eq!(next_index(0, 3), 1);
    assert_eq!(next_index(1, 3), 2);
    assert_eq!(next_index(2, 3), 0);
}

#[test]
fn previous_index_wraps_to_last() {
    assert_eq!(previous_index(2, 3), 1);
    assert_eq!(previous_index(0, 3), 2);
}

#[test]
fn previous_from_out_of_range_lands_on_last() {
    assert_eq!(previous_index(7, 3), 2);
}

#[test]
fn index_helpers_tolerate_empty_lists() {
    assert_eq!(next_index(0, 0), 0);
    assert_eq!(previous_index(0, 0), 0);
    assert_eq!(clamp_index(5, 0), 0);
}

#[test]
fn clamp_index_caps_at_last() {
    assert_eq!(clamp_index(1, 3), 1);
    assert_eq!(clamp_index(3, 3), 2);
    assert_eq!(clamp_index(usize::MAX, 3), 2);
}
