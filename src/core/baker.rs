//! Backt spärliche Kontrollpunkte zu einer dichten `BakedCurve`.
//!
//! Der Bake ist deterministisch und wirft nie: ungültige Eingaben
//! degradieren zur explizit leeren bzw. degenerierten Kurve, die alle
//! Abfragen mit deterministischen Fallbacks beantworten.

use std::sync::Arc;

use glam::Vec2;

use crate::core::baked_curve::{BakedCurve, MIN_SAMPLE_SPACING};
use crate::shared::spline_geometry::{catmull_rom_point, segment_control_points};

/// Empfohlene Sample-Dichte pro Spline-Segment.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 20;
/// Untergrenze der Sample-Dichte.
pub const MIN_SAMPLES_PER_SEGMENT: usize = 4;
/// Offset des synthetischen Zweitpunkts beim Null-Längen-Schutz.
const ZERO_LENGTH_NUDGE: Vec2 = Vec2::new(1e-6, 0.0);

/// Backt eine Kurve aus Kontrollpunkten.
///
/// Offene Kurven sampeln N−1 Segmente, Loops N Segmente; das letzte
/// Segment schließt bei Loops die Polyline am Startpunkt. Weniger als
/// zwei Kontrollpunkte ergeben die leere bzw. degenerierte Kurve.
pub fn bake(control_points: &[Vec2], is_loop: bool, samples_per_segment: usize) -> BakedCurve {
    if control_points.len() < 2 {
        log::warn!(
            "bake: {} Kontrollpunkte (< 2) — degenerierte Kurve",
            control_points.len()
        );
        return build_curve(control_points.to_vec(), is_loop);
    }

    let samples = samples_per_segment.max(MIN_SAMPLES_PER_SEGMENT);
    let segment_count = if is_loop {
        control_points.len()
    } else {
        control_points.len() - 1
    };

    let mut points: Vec<Vec2> = Vec::with_capacity(segment_count * samples + 1);
    for seg in 0..segment_count {
        let (p0, p1, p2, p3) = segment_control_points(control_points, seg, is_loop);
        // Der gemeinsame Randpunkt zweier Segmente wird nur einmal emittiert;
        // das letzte Segment schließt mit t=1 ab.
        let steps = if seg == segment_count - 1 {
            samples + 1
        } else {
            samples
        };
        for j in 0..steps {
            let t = j as f32 / samples as f32;
            push_sample(&mut points, catmull_rom_point(p0, p1, p2, p3, t));
        }
    }

    let curve = build_curve(points, is_loop);
    log::debug!(
        "bake: {} Samples, Länge {:.3}, loop={}",
        curve.sample_count(),
        curve.total_length(),
        is_loop
    );
    curve
}

/// Hängt ein Sample an, sofern es nicht praktisch auf dem vorigen liegt.
fn push_sample(points: &mut Vec<Vec2>, sample: Vec2) {
    if let Some(last) = points.last() {
        if last.distance(sample) < MIN_SAMPLE_SPACING {
            return;
        }
    }
    points.push(sample);
}

/// Baut die kumulative Längentabelle und wendet den Null-Längen-Schutz an.
fn build_curve(mut points: Vec<Vec2>, is_loop: bool) -> BakedCurve {
    if points.is_empty() {
        return BakedCurve::empty(is_loop);
    }

    let mut cumulative = Vec::with_capacity(points.len().max(2));
    cumulative.push(0.0);
    for i in 1..points.len() {
        let prev = cumulative[i - 1];
        cumulative.push(prev + points[i - 1].distance(points[i]));
    }

    // Null-Längen-Schutz: zweiter Punkt mit winzigem Offset, damit
    // nachgelagerte Distanz-Mathematik nie durch Null teilt.
    if cumulative[points.len() - 1] <= 0.0 {
        let anchor = points[0];
        points.truncate(1);
        points.push(anchor + ZERO_LENGTH_NUDGE);
        cumulative = vec![0.0, ZERO_LENGTH_NUDGE.length()];
    }

    BakedCurve::from_samples(points, cumulative, is_loop)
}

/// Stateful Authoring-Container: besitzt eine Kopie der Kontrollpunkte
/// und backt bei jeder Änderung atomar neu (Copy-on-Rebuild).
///
/// `curve()` gibt einen billigen `Arc`-Klon heraus; laufende Leser sehen
/// dadurch nie einen halbfertigen Rebuild.
#[derive(Debug, Clone)]
pub struct PathBaker {
    control_points: Vec<Vec2>,
    is_loop: bool,
    samples_per_segment: usize,
    curve: Arc<BakedCurve>,
}

impl PathBaker {
    /// Erstellt einen leeren Baker mit der angegebenen Sample-Dichte.
    pub fn new(samples_per_segment: usize) -> Self {
        Self {
            control_points: Vec::new(),
            is_loop: false,
            samples_per_segment: samples_per_segment.max(MIN_SAMPLES_PER_SEGMENT),
            curve: Arc::new(BakedCurve::empty(false)),
        }
    }

    /// Ersetzt die Kontrollpunkte (Kopie) und backt neu.
    pub fn set_control_points(&mut self, control_points: &[Vec2], is_loop: bool) {
        self.control_points = control_points.to_vec();
        self.is_loop = is_loop;
        self.rebake();
    }

    /// Verschiebt einen einzelnen Kontrollpunkt und backt bei Bedarf neu.
    /// Gibt `false` zurück, wenn der Index ungültig ist.
    pub fn move_control_point(&mut self, index: usize, position: Vec2) -> bool {
        let Some(point) = self.control_points.get_mut(index) else {
            return false;
        };
        if *point == position {
            return true;
        }
        *point = position;
        self.rebake();
        true
    }

    /// Ändert den Loop-Modus und backt bei Änderung neu.
    pub fn set_loop(&mut self, is_loop: bool) {
        if self.is_loop != is_loop {
            self.is_loop = is_loop;
            self.rebake();
        }
    }

    /// Ändert die Sample-Dichte (geklemmt auf das Minimum) und backt neu.
    pub fn set_samples_per_segment(&mut self, samples_per_segment: usize) {
        let clamped = samples_per_segment.max(MIN_SAMPLES_PER_SEGMENT);
        if self.samples_per_segment != clamped {
            self.samples_per_segment = clamped;
            self.rebake();
        }
    }

    /// Aktuelle Kurve als geteilter Snapshot.
    pub fn curve(&self) -> Arc<BakedCurve> {
        Arc::clone(&self.curve)
    }

    /// Anzahl der gehaltenen Kontrollpunkte.
    pub fn control_point_count(&self) -> usize {
        self.control_points.len()
    }

    /// Aktuelle Sample-Dichte.
    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    fn rebake(&mut self) {
        self.curve = Arc::new(bake(
            &self.control_points,
            self.is_loop,
            self.samples_per_segment,
        ));
    }
}

impl Default for PathBaker {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES_PER_SEGMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bake_straight_segment_has_exact_length() {
        let curve = bake(
            &[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)],
            false,
            DEFAULT_SAMPLES_PER_SEGMENT,
        );

        assert_relative_eq!(curve.total_length(), 10.0, epsilon = 1e-3);
        assert_eq!(curve.sample_count(), DEFAULT_SAMPLES_PER_SEGMENT + 1);
    }

    #[test]
    fn test_bake_l_shape_length_within_tolerance() {
        let curve = bake(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
            ],
            false,
            DEFAULT_SAMPLES_PER_SEGMENT,
        );

        // Zwei 10er-Segmente; die Eckenrundung darf ±10% kosten
        assert!(curve.total_length() > 18.0 && curve.total_length() < 22.0);
        assert!(curve.position_at(0.0).distance(Vec2::new(0.0, 0.0)) < 0.01);
        assert!(
            curve
                .position_at(curve.total_length())
                .distance(Vec2::new(10.0, 10.0))
                < 0.01
        );
    }

    #[test]
    fn test_cumulative_table_is_monotonic() {
        let curve = bake(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(5.0, 3.0),
                Vec2::new(10.0, -2.0),
                Vec2::new(15.0, 4.0),
            ],
            false,
            12,
        );

        let table = curve.cumulative_lengths();
        assert_relative_eq!(table[0], 0.0);
        for w in table.windows(2) {
            assert!(w[0] <= w[1]);
        }
        assert_eq!(curve.points().len(), table.len());
    }

    #[test]
    fn test_bake_is_deterministic() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(8.0, -1.0),
        ];
        let a = bake(&pts, false, 16);
        let b = bake(&pts, false, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_loop_bake_closes_polyline() {
        let curve = bake(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(0.0, 4.0),
            ],
            true,
            DEFAULT_SAMPLES_PER_SEGMENT,
        );

        assert!(curve.is_loop());
        let first = curve.points()[0];
        let last = *curve.points().last().expect("Samples erwartet");
        assert!(first.distance(last) < 1e-5);
    }

    #[test]
    fn test_samples_per_segment_clamped_to_minimum() {
        let curve = bake(&[Vec2::ZERO, Vec2::new(1.0, 0.0)], false, 1);
        // Ein Segment mit Mindestdichte: 4 Zwischenschritte + Endpunkt
        assert_eq!(curve.sample_count(), MIN_SAMPLES_PER_SEGMENT + 1);
    }

    #[test]
    fn test_duplicate_control_points_do_not_break_length_math() {
        let p = Vec2::new(3.0, 3.0);
        let curve = bake(&[p, p, Vec2::new(6.0, 3.0)], false, 8);

        let table = curve.cumulative_lengths();
        for w in table.windows(2) {
            assert!(w[1] - w[0] >= 0.0);
        }
        assert!(curve.total_length() > 0.0);
    }

    #[test]
    fn test_single_point_bake_is_degenerate_but_queryable() {
        let anchor = Vec2::new(2.0, 5.0);
        let curve = bake(&[anchor], false, DEFAULT_SAMPLES_PER_SEGMENT);

        assert!(curve.total_length() < 1e-3);
        assert_eq!(curve.sample_count(), 2);
        assert!(curve.position_at(0.0).distance(anchor) < 1e-3);
        // Nachgelagerte Abfragen dürfen nicht crashen
        let _ = curve.tangent_at(0.5);
        let _ = curve.project_to_distance(Vec2::ZERO);
    }

    #[test]
    fn test_empty_bake_yields_empty_curve() {
        let curve = bake(&[], false, DEFAULT_SAMPLES_PER_SEGMENT);
        assert!(curve.is_degenerate());
        assert_eq!(curve.sample_count(), 0);
    }

    #[test]
    fn test_path_baker_rebakes_on_mutation() {
        let mut baker = PathBaker::default();
        baker.set_control_points(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], false);

        let before = baker.curve();
        assert_relative_eq!(before.total_length(), 10.0, epsilon = 1e-3);

        assert!(baker.move_control_point(1, Vec2::new(20.0, 0.0)));
        let after = baker.curve();
        assert_relative_eq!(after.total_length(), 20.0, epsilon = 1e-3);

        // Alter Snapshot bleibt unverändert lesbar (Copy-on-Rebuild)
        assert_relative_eq!(before.total_length(), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_path_baker_ignores_invalid_index_and_noop_moves() {
        let mut baker = PathBaker::default();
        baker.set_control_points(&[Vec2::ZERO, Vec2::new(5.0, 0.0)], false);

        assert!(!baker.move_control_point(7, Vec2::ONE));

        let before = baker.curve();
        assert!(baker.move_control_point(1, Vec2::new(5.0, 0.0)));
        // No-Op-Move erzeugt keinen neuen Bake
        assert!(Arc::ptr_eq(&before, &baker.curve()));
    }

    #[test]
    fn test_path_baker_loop_toggle_rebakes() {
        let mut baker = PathBaker::new(8);
        baker.set_control_points(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
            ],
            false,
        );
        let open_length = baker.curve().total_length();

        baker.set_loop(true);
        // Das schließende Segment verlängert die Kurve
        assert!(baker.curve().total_length() > open_length);
        assert!(baker.curve().is_loop());
    }
}
