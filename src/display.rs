//! Terminal renderer: draws a frame of the simulation with crossterm.
//!
//! The simulation runs in world pixels with y pointing up; this module maps
//! that space onto the terminal grid and draws a frame. No game logic.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use gravity_runner::{
    HeadlessFactory, HeadlessSprite, Player, Projectile, Size, Sprite, Tile, TileMap,
    WeaponKind,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HUD_WEAPON: Color = Color::White;
const C_HUD_EQUIPPED: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_TILE: Color = Color::DarkGreen;
const C_PISTOL: Color = Color::Cyan;
const C_CANNON: Color = Color::Grey;
const C_ROCKET: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Everything the renderer needs for one frame.
pub struct Frame<'a> {
    pub player: &'a Player<HeadlessFactory>,
    pub tile_map: &'a TileMap,
    pub last_sound: Option<&'a str>,
    pub width: u16,
    pub height: u16,
}

/// Maps world coordinates onto the play area (inside the border).
struct Viewport {
    world: Size,
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(world: Size, width: u16, height: u16) -> Self {
        Self {
            world,
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    /// Cell for a world point, or `None` when it lies outside the window.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || x >= self.world.width || y < 0.0 || y >= self.world.height {
            return None;
        }
        let col = (x / self.world.width * self.cols as f32) as u16;
        let row_from_bottom = (y / self.world.height * self.rows as f32) as u16;
        let row = self.rows - 1 - row_from_bottom.min(self.rows - 1);
        Some((self.left + col.min(self.cols - 1), self.top + row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame<'_>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::new(frame.player.window(), frame.width, frame.height);

    draw_border(out, frame)?;
    draw_hud(out, frame)?;
    draw_tiles(out, frame.tile_map, &view)?;

    for projectile in frame.player.projectiles() {
        draw_projectile(out, projectile, &view)?;
    }

    draw_player(out, frame.player, &view)?;
    draw_controls_hint(out, frame)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, frame: &Frame<'_>) -> std::io::Result<()> {
    let w = frame.width as usize;
    let h = frame.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(frame.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &Frame<'_>) -> std::io::Result<()> {
    let player = frame.player;

    // Weapons: left, equipped one highlighted
    out.queue(cursor::MoveTo(1, 0))?;
    for (i, weapon) in player.weapons().iter().enumerate() {
        if i == player.equipped_index() {
            out.queue(style::SetForegroundColor(C_HUD_EQUIPPED))?;
            out.queue(Print(format!("[{}] ", weapon.name().to_uppercase())))?;
        } else {
            out.queue(style::SetForegroundColor(C_HUD_WEAPON))?;
            out.queue(Print(format!(" {}  ", weapon.name())))?;
        }
    }

    // Gravity, distance, projectiles: right
    let arrow = if player.gravity() < 0.0 { "▼" } else { "▲" };
    let distance = (frame.tile_map.scroll_offset() / frame.tile_map.tile_size()) as i64;
    let sound = frame.last_sound.map(|s| format!("♪ {s}  ")).unwrap_or_default();
    let right = format!(
        "{sound}Gravity:{arrow}  Shots:{:>3}  Dist:{:>6}",
        player.projectiles().len(),
        distance
    );
    let rx = frame.width.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Tile map ──────────────────────────────────────────────────────────────────

fn draw_tiles<W: Write>(out: &mut W, tile_map: &TileMap, view: &Viewport) -> std::io::Result<()> {
    let tile = tile_map.tile_size();
    out.queue(style::SetForegroundColor(C_TILE))?;
    for index in tile_map.visible_columns() {
        let Some(column) = tile_map.column(index) else {
            continue;
        };
        let x = index as f32 * tile - tile_map.scroll_offset() + tile / 2.0;
        for (row, kind) in column.tiles.iter().enumerate() {
            if *kind != Tile::Solid {
                continue;
            }
            let y = row as f32 * tile + tile / 2.0;
            if let Some((col, row)) = view.cell(x, y) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("█"))?;
            }
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player<HeadlessFactory>,
    view: &Viewport,
) -> std::io::Result<()> {
    let pos = player.position();
    if let Some((col, row)) = view.cell(pos.x, pos.y) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("☻"))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile<HeadlessSprite>,
    view: &Viewport,
) -> std::io::Result<()> {
    if projectile.is_destroyed() {
        return Ok(());
    }
    let sprite = projectile.sprite();
    let Some((col, row)) = view.cell(sprite.x(), sprite.y()) else {
        return Ok(());
    };
    let (glyph, color) = match projectile.weapon() {
        Some(WeaponKind::Cannon) => (tumble_glyph(sprite.rotation()), C_CANNON),
        Some(WeaponKind::Rocket) => (heading_glyph(sprite.rotation()), C_ROCKET),
        Some(WeaponKind::Pistol) | None => ("•", C_PISTOL),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Arrow for a clockwise sprite rotation (0° = facing right).
fn heading_glyph(rotation: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let sector = ((rotation + 22.5).rem_euclid(360.0) / 45.0) as usize;
    ARROWS[sector % 8]
}

fn tumble_glyph(rotation: f32) -> &'static str {
    const FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
    let sector = (rotation.rem_euclid(360.0) / 90.0) as usize;
    FRAMES[sector % 4]
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, frame: &Frame<'_>) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, frame.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "ENTER : Flip gravity   SPACE : Fire   ← → : Weapon   R : Restart   Q : Quit",
    ))?;
    Ok(())
}
