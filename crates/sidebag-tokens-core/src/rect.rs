use serde::{Deserialize, Serialize};

use crate::Circle;

/// Axis-aligned crop window, `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Bounding box of `circle` grown by `padding` pixels on every side and
    /// clipped to a `image_width` x `image_height` image.
    ///
    /// Returns `None` when nothing of the box is left after clipping.
    pub fn around_circle(
        circle: &Circle,
        padding: u32,
        image_width: u32,
        image_height: u32,
    ) -> Option<CropRect> {
        let reach = circle.radius.saturating_add(padding);
        let x0 = circle.x.saturating_sub(reach);
        let y0 = circle.y.saturating_sub(reach);
        let x1 = circle.x.saturating_add(reach).min(image_width);
        let y1 = circle.y.saturating_add(reach).min(image_height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(CropRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_circle_gets_padded_box() {
        let rect = CropRect::around_circle(&Circle::new(100, 100, 30), 1, 1275, 900).unwrap();
        assert_eq!(
            rect,
            CropRect {
                x: 69,
                y: 69,
                width: 62,
                height: 62
            }
        );
    }

    #[test]
    fn box_is_clipped_at_image_edges() {
        let rect = CropRect::around_circle(&Circle::new(10, 895, 30), 1, 200, 900).unwrap();
        assert_eq!(rect.x, 0);
        assert_eq!(rect.right(), 41);
        assert_eq!(rect.y, 864);
        assert_eq!(rect.bottom(), 900);
    }

    #[test]
    fn box_never_exceeds_bounds() {
        for &(x, y, r) in &[(0, 0, 45), (63, 47, 45), (5, 40, 40), (64, 48, 1)] {
            let rect = CropRect::around_circle(&Circle::new(x, y, r), 3, 64, 48).unwrap();
            assert!(rect.right() <= 64);
            assert!(rect.bottom() <= 48);
        }
    }

    #[test]
    fn box_outside_image_is_none() {
        assert!(CropRect::around_circle(&Circle::new(500, 10, 5), 1, 100, 100).is_none());
    }
}
