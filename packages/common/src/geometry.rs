//! Screen geometry reported by the host page.
//!
//! The editor never queries layout itself: the host hands over the boxes it
//! measured together with each interaction, and dismissal decisions are made
//! by testing click coordinates against the registered interactive regions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box in viewport coordinates (edges inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// True when `point` falls inside any of `regions`
pub fn was_inside_interactive_region(point: Point, regions: &[Rect]) -> bool {
    regions.iter().any(|region| region.contains(point))
}

/// Layout of a compound field at the moment it is clicked
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGeometry {
    /// The clickable edit wrapper around the rendered value
    pub wrapper: Rect,
    /// The rendered value element itself
    pub element: Rect,
    /// The section row that owns the field
    pub container: Rect,
    /// Vertical scroll offset of the page
    pub scroll_y: f64,
}

impl FieldGeometry {
    /// Panel anchor: right of the owning container, level with the element
    pub fn anchor(&self, horizontal_offset: f64) -> Point {
        Point::new(
            self.container.right + horizontal_offset,
            self.element.top + self.scroll_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(15.0, 15.0)));
        assert!(!rect.contains(Point::new(20.5, 15.0)));
    }

    #[test]
    fn test_interactive_region_any() {
        let regions = [
            Rect::from_origin(0.0, 0.0, 10.0, 10.0),
            Rect::from_origin(100.0, 100.0, 10.0, 10.0),
        ];
        assert!(was_inside_interactive_region(Point::new(105.0, 105.0), &regions));
        assert!(!was_inside_interactive_region(Point::new(50.0, 50.0), &regions));
        assert!(!was_inside_interactive_region(Point::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_anchor_uses_container_right_and_scrolled_top() {
        let geometry = FieldGeometry {
            wrapper: Rect::new(20.0, 300.0, 580.0, 500.0),
            element: Rect::new(20.0, 310.0, 580.0, 490.0),
            container: Rect::new(0.0, 200.0, 600.0, 700.0),
            scroll_y: 120.0,
        };
        assert_eq!(geometry.anchor(25.0), Point::new(625.0, 430.0));
    }
}
