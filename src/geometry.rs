//! Axis-aligned boxes in image pixel coordinates.

/// Axis-aligned rectangle `(left, top, right, bottom)` in pixels.
///
/// Decoded boxes satisfy `left <= right` and `top <= bottom`, but nothing
/// here relies on it: areas use absolute extents and zero-area boxes are
/// valid values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    /// Minimum x coordinate.
    pub left: f32,
    /// Minimum y coordinate.
    pub top: f32,
    /// Maximum x coordinate.
    pub right: f32,
    /// Maximum y coordinate.
    pub bottom: f32,
}

impl BoundingBox {
    /// Creates a box from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a box from a center and size, clamped to a `width x height`
    /// image so both corners land in `[0, width-1] x [0, height-1]`.
    pub fn from_center_clamped(
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        width: usize,
        height: usize,
    ) -> Self {
        let max_x = width.saturating_sub(1) as f32;
        let max_y = height.saturating_sub(1) as f32;
        Self {
            left: (cx - w / 2.0).max(0.0).min(max_x),
            top: (cy - h / 2.0).max(0.0).min(max_y),
            right: max_x.min(cx + w / 2.0).max(0.0),
            bottom: max_y.min(cy + h / 2.0).max(0.0),
        }
    }

    /// Returns the box width (`right - left`).
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Returns the box height (`bottom - top`).
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Area computed from absolute extents.
    pub fn area(&self) -> f32 {
        (self.bottom - self.top).abs() * (self.left - self.right).abs()
    }

    /// Returns the overlapping region if it has positive width and height.
    ///
    /// Boxes that only touch along an edge, or where either box is empty,
    /// do not intersect.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
        {
            Some(BoundingBox {
                left: self.left.max(other.left),
                top: self.top.max(other.top),
                right: self.right.min(other.right),
                bottom: self.bottom.min(other.bottom),
            })
        } else {
            None
        }
    }

    /// Intersection over union, or `0.0` when the boxes do not intersect.
    ///
    /// Evaluated in `f64`; a degenerate union also yields `0.0`.
    pub fn overlap(&self, other: &BoundingBox) -> f64 {
        let Some(inter) = self.intersection(other) else {
            return 0.0;
        };
        let inter_area = f64::from(inter.area());
        let union = f64::from(self.area()) + f64::from(other.area()) - inter_area;
        if union <= 0.0 {
            return 0.0;
        }
        inter_area / union
    }

    /// Returns `true` when the box lies within a `width x height` image.
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        let max_x = width.saturating_sub(1) as f32;
        let max_y = height.saturating_sub(1) as f32;
        self.left >= 0.0
            && self.top >= 0.0
            && self.right <= max_x
            && self.bottom <= max_y
    }
}
