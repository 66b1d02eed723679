//! Visual resource provider.
//!
//! The simulation reads and writes position and rotation through a
//! [`Sprite`] handle and releases it exactly once. Renderers implement these
//! traits; [`HeadlessFactory`] is a render-free implementation used by the
//! terminal front-end (which draws from positions) and by tests.

use std::collections::HashMap;

/// A positionable, rotatable, deletable visual handle. Sprites are
/// centre-anchored: `position` is the centre of the image.
pub trait Sprite {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn set_position(&mut self, x: f32, y: f32);
    /// Clockwise rotation in degrees.
    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, degrees: f32);
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Release the underlying resource.
    fn delete(&mut self);
}

/// Creates sprites for an image identifier at a position.
pub trait SpriteFactory {
    type Sprite: Sprite;

    fn spawn(&mut self, asset: &str, x: f32, y: f32) -> Self::Sprite;
}

// ── Headless implementation ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessSprite {
    pub asset: String,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    /// Number of times `delete` was called on this handle.
    pub releases: u32,
}

impl HeadlessSprite {
    pub fn new(asset: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            asset: asset.into(),
            x,
            y,
            rotation: 0.0,
            width,
            height,
            releases: 0,
        }
    }
}

impl Sprite for HeadlessSprite {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn delete(&mut self) {
        self.releases += 1;
    }
}

/// Hands out [`HeadlessSprite`]s sized from a per-asset table.
#[derive(Clone, Debug)]
pub struct HeadlessFactory {
    sizes: HashMap<String, (f32, f32)>,
    default_size: (f32, f32),
}

impl HeadlessFactory {
    pub fn new(default_width: f32, default_height: f32) -> Self {
        Self {
            sizes: HashMap::new(),
            default_size: (default_width, default_height),
        }
    }

    pub fn with_size(mut self, asset: impl Into<String>, width: f32, height: f32) -> Self {
        self.sizes.insert(asset.into(), (width, height));
        self
    }

    pub fn size_of(&self, asset: &str) -> (f32, f32) {
        self.sizes.get(asset).copied().unwrap_or(self.default_size)
    }
}

impl Default for HeadlessFactory {
    fn default() -> Self {
        Self::new(16.0, 16.0)
    }
}

impl SpriteFactory for HeadlessFactory {
    type Sprite = HeadlessSprite;

    fn spawn(&mut self, asset: &str, x: f32, y: f32) -> HeadlessSprite {
        let (width, height) = self.size_of(asset);
        HeadlessSprite::new(asset, x, y, width, height)
    }
}
