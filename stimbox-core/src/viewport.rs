use glam::Vec2;

/// The bounding box the host reports on resize/layout changes.
///
/// A host that is not currently showing the simulation reports non-finite
/// dimensions; the engine treats that as "clear all bodies".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// A viewport at the origin with the given dimensions.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The "not currently visible" viewport.
    pub fn hidden() -> Self {
        Self::new(0.0, 0.0, f32::NAN, f32::NAN)
    }

    /// True when the viewport cannot host a simulation (non-finite or
    /// zero-sized dimensions).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Scale factor applied to masses and the wall charge: the square root
    /// of the viewport area over a normalization constant.
    pub fn area_factor(&self, norm: f32) -> f32 {
        (self.width * self.height).sqrt() / norm
    }

    /// Converts a client-space position into viewport-local coordinates.
    pub fn to_local(&self, client: Vec2) -> Vec2 {
        client - Vec2::new(self.left, self.top)
    }
}
