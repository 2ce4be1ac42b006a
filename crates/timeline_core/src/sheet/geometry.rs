//! Sheet travel derived from host layout measurements.

use serde::{Deserialize, Serialize};

/// Host-measured rectangle in list coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// Pixel boundaries the sheet moves between.
///
/// Expanded, the sheet's top edge sits under the header; collapsed, it sits
/// under the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SheetGeometry {
    expanded_top: f64,
    collapsed_top: f64,
}

impl SheetGeometry {
    /// Returns `None` unless the collapsed top lies below the expanded top.
    pub fn new(expanded_top: f64, collapsed_top: f64) -> Option<Self> {
        if !expanded_top.is_finite() || !collapsed_top.is_finite() {
            return None;
        }
        (collapsed_top > expanded_top).then_some(Self {
            expanded_top,
            collapsed_top,
        })
    }

    pub fn from_regions(header: &Rect, month_grid: &Rect) -> Option<Self> {
        if !header.is_finite() || !month_grid.is_finite() {
            return None;
        }
        Self::new(header.bottom(), month_grid.bottom())
    }

    pub fn expanded_top(&self) -> f64 {
        self.expanded_top
    }

    pub fn collapsed_top(&self) -> f64 {
        self.collapsed_top
    }

    /// Pixel distance between the two snap points.
    pub fn travel(&self) -> f64 {
        self.collapsed_top - self.expanded_top
    }

    /// Top edge in pixels for a normalized position.
    pub fn top_for(&self, position: f64) -> f64 {
        self.collapsed_top - position.clamp(0.0, 1.0) * self.travel()
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, SheetGeometry};

    #[test]
    fn geometry_requires_positive_travel() {
        let header = Rect::new(0.0, 0.0, 390.0, 64.0);
        let grid = Rect::new(0.0, 64.0, 390.0, 300.0);
        let geometry = SheetGeometry::from_regions(&header, &grid).expect("valid geometry");
        assert_eq!(geometry.travel(), 300.0);
        assert_eq!(geometry.top_for(0.0), 364.0);
        assert_eq!(geometry.top_for(1.0), 64.0);
        assert_eq!(geometry.top_for(0.5), 214.0);

        assert!(SheetGeometry::from_regions(&grid, &header).is_none());
        assert!(SheetGeometry::new(f64::NAN, 10.0).is_none());
    }
}
