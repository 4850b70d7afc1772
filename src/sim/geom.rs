//! Screen-space hit regions

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle centred on (cx, cy)
    pub const fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(cx - width / 2.0, cy - height / 2.0),
            max: Vec2::new(cx + width / 2.0, cy + height / 2.0),
        }
    }

    /// Rectangle anchored at its top-left corner
    pub const fn from_min_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Point-in-rectangle test, edges inclusive
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive_edges() {
        let rect = Rect::from_center(100.0, 100.0, 20.0, 10.0);
        assert!(rect.contains(Vec2::new(100.0, 100.0)));
        assert!(rect.contains(Vec2::new(90.0, 95.0)));
        assert!(rect.contains(Vec2::new(110.0, 105.0)));
        assert!(!rect.contains(Vec2::new(110.1, 100.0)));
        assert!(!rect.contains(Vec2::new(100.0, 94.0)));
    }

    #[test]
    fn test_center_and_size() {
        let rect = Rect::from_min_size(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
        assert_eq!(rect.size(), Vec2::new(30.0, 40.0));
    }
}
