//! Pixel geometry shared by the packer and the compositor.

use derive_more::{Deref, From};

pub struct PixelUnit;
pub type SizePx = euclid::Size2D<u32, PixelUnit>;
pub type PointPx = euclid::Point2D<u32, PixelUnit>;
pub type BoxPx = euclid::Box2D<u32, PixelUnit>;

pub trait Contains<Other> {
    fn contains(&self, other: Other) -> bool;
}

/// The pixel area of a canvas, `[0,width) × [0,height)`.
#[derive(Debug, Copy, Clone, PartialEq, Deref, From)]
pub struct CanvasBounds(SizePx);

impl CanvasBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self(SizePx::new(width, height))
    }

    pub fn to_box(self) -> BoxPx {
        BoxPx::from_size(self.0)
    }

    /// The area that remains after removing a border of `gap` pixels on every side.
    ///
    /// Empty if the border consumes the canvas.
    pub fn inner(self, gap: u32) -> BoxPx {
        let max = PointPx::new(
            self.0.width.saturating_sub(gap),
            self.0.height.saturating_sub(gap),
        );
        let min = PointPx::new(gap.min(max.x), gap.min(max.y));
        BoxPx::new(min, max)
    }
}

impl Contains<BoxPx> for CanvasBounds {
    fn contains(&self, other: BoxPx) -> bool {
        self.to_box().contains_box(&other)
    }
}

/// A rectangle of `size` whose top-left corner is at `origin`.
pub fn box_at(origin: PointPx, size: SizePx) -> BoxPx {
    BoxPx::from_origin_and_size(origin, size)
}
