//! Authoring-Snapshot einer Strecke.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::baked_curve::BakedCurve;
use crate::core::baker::{DEFAULT_SAMPLES_PER_SEGMENT, bake};

/// Kontrollpunkt-Definition einer Strecke, wie die Authoring-Ebene sie
/// übergibt.
///
/// Serde-roundtrip-fähig; das konkrete Dateiformat gehört der
/// Szenen-Ebene. Die Engine kopiert die Punkte beim Backen und hält
/// keinerlei Referenz auf den Snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDefinition {
    /// Geordnete Wegpunkte der Strecke
    pub control_points: Vec<Vec2>,
    /// Ob die Strecke geschlossen ist
    #[serde(default)]
    pub is_loop: bool,
    /// Sample-Dichte pro Spline-Segment
    #[serde(default = "default_samples_per_segment")]
    pub samples_per_segment: usize,
}

fn default_samples_per_segment() -> usize {
    DEFAULT_SAMPLES_PER_SEGMENT
}

impl TrackDefinition {
    /// Erstellt eine Definition mit Standard-Sample-Dichte.
    pub fn new(control_points: Vec<Vec2>, is_loop: bool) -> Self {
        Self {
            control_points,
            is_loop,
            samples_per_segment: DEFAULT_SAMPLES_PER_SEGMENT,
        }
    }

    /// Mindestens zwei Kontrollpunkte nötig, sonst degeneriert der Bake.
    pub fn is_bakeable(&self) -> bool {
        self.control_points.len() >= 2
    }

    /// Backt die Definition zu einer abfragbaren Kurve.
    pub fn bake(&self) -> BakedCurve {
        bake(&self.control_points, self.is_loop, self.samples_per_segment)
    }
}
