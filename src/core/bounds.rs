//! Achsen-parallele Hüllform der Schiene.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Min/Max-Ausdehnung der Schienen-Hüllform in Weltkoordinaten.
///
/// Wird vom Ausstieg genutzt, um Zielpunkte knapp außerhalb der Form zu
/// legen. Der Konstruktor normalisiert vertauschte Ecken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RailBounds {
    /// Untere linke Ecke
    pub min: Vec2,
    /// Obere rechte Ecke
    pub max: Vec2,
}

impl RailBounds {
    /// Erstellt Bounds aus zwei beliebigen Ecken.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Erstellt Bounds aus Mittelpunkt und halber Ausdehnung.
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Umschließende Bounds einer Punktmenge; `None` für die leere Menge.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some(Self { min, max })
    }

    /// Ausdehnung in beiden Achsen.
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Mittelpunkt der Bounds.
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Ob der Punkt innerhalb liegt (Ränder inklusive).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Klemmt einen Punkt in die Bounds.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes_swapped_corners() {
        let bounds = RailBounds::new(Vec2::new(5.0, -1.0), Vec2::new(-2.0, 3.0));
        assert_relative_eq!(bounds.min.x, -2.0);
        assert_relative_eq!(bounds.min.y, -1.0);
        assert_relative_eq!(bounds.max.x, 5.0);
        assert_relative_eq!(bounds.max.y, 3.0);
    }

    #[test]
    fn test_from_points_hulls_the_set() {
        let bounds = RailBounds::from_points(&[
            Vec2::new(1.0, 2.0),
            Vec2::new(-3.0, 0.5),
            Vec2::new(4.0, -1.0),
        ])
        .expect("Bounds erwartet");

        assert_relative_eq!(bounds.min.x, -3.0);
        assert_relative_eq!(bounds.max.y, 2.0);
        assert!(RailBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_contains_and_clamp() {
        let bounds = RailBounds::new(Vec2::ZERO, Vec2::new(10.0, 4.0));
        assert!(bounds.contains(Vec2::new(10.0, 4.0)));
        assert!(!bounds.contains(Vec2::new(10.1, 2.0)));

        let clamped = bounds.clamp(Vec2::new(12.0, -1.0));
        assert_relative_eq!(clamped.x, 10.0);
        assert_relative_eq!(clamped.y, 0.0);
    }

    #[test]
    fn test_center_and_size() {
        let bounds = RailBounds::from_center_half_extents(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.5));
        assert_relative_eq!(bounds.center().x, 1.0);
        assert_relative_eq!(bounds.size().x, 4.0);
        assert_relative_eq!(bounds.size().y, 1.0);
    }
}
