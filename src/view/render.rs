use glam::Vec3;

use crate::model::Dimensions;

/// Anything that can draw the entity once a frame's ticks have run
pub trait Renderer {
    fn render(&mut self, transform: Vec3, dimensions: Dimensions);
}

/// Axis-aligned rectangle in screen pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Marker,
    Shadow,
    Body,
}

impl Paint {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Paint::Marker => [255, 0, 0],
            Paint::Shadow => [128, 128, 128],
            Paint::Body => [0, 0, 0],
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Paint::Marker => "red",
            Paint::Shadow => "gray",
            Paint::Body => "black",
        }
    }
}

/// Size of the fixed origin marker drawn in the top-left corner
pub const MARKER_SIZE: f32 = 32.0;

/// Screen-space layout of the entity: the shadow stays on the ground plane
/// while the body is lifted by `z`, which sells the jump as height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteLayout {
    pub marker: Rect,
    pub shadow: Rect,
    pub body: Rect,
}

impl SpriteLayout {
    pub fn new(transform: Vec3, dimensions: Dimensions) -> Self {
        let Dimensions { w, h } = dimensions;
        Self {
            marker: Rect { x: 0.0, y: 0.0, w: MARKER_SIZE, h: MARKER_SIZE },
            shadow: Rect { x: transform.x, y: transform.y + h / 2.0, w, h: h / 2.0 },
            body: Rect { x: transform.x, y: transform.y - transform.z, w, h },
        }
    }

    /// Layers in draw order
    pub fn layers(&self) -> [(Rect, Paint); 3] {
        [
            (self.marker, Paint::Marker),
            (self.shadow, Paint::Shadow),
            (self.body, Paint::Body),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_body_overlaps_its_shadow() {
        let layout = SpriteLayout::new(Vec3::new(100.0, 200.0, 0.0), Dimensions::default());
        assert_eq!(layout.shadow, Rect { x: 100.0, y: 216.0, w: 32.0, h: 16.0 });
        assert_eq!(layout.body, Rect { x: 100.0, y: 200.0, w: 32.0, h: 32.0 });
    }

    #[test]
    fn height_lifts_body_but_not_shadow() {
        let grounded = SpriteLayout::new(Vec3::new(10.0, 50.0, 0.0), Dimensions::default());
        let jumping = SpriteLayout::new(Vec3::new(10.0, 50.0, 40.0), Dimensions::default());
        assert_eq!(jumping.shadow, grounded.shadow);
        assert_eq!(jumping.body.y, grounded.body.y - 40.0);
    }

    #[test]
    fn body_is_drawn_last() {
        let layout = SpriteLayout::new(Vec3::ZERO, Dimensions { w: 8.0, h: 4.0 });
        let order: Vec<Paint> = layout.layers().iter().map(|(_, paint)| *paint).collect();
        assert_eq!(order, vec![Paint::Marker, Paint::Shadow, Paint::Body]);
    }
}
