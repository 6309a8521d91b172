//! Gebackene Kurve: dichte Polyline mit kumulativer Längentabelle.
//!
//! `BakedCurve` ist nach dem Backen unveränderlich und read-only für alle
//! Abfragen — mehrere Körper können dieselbe Kurve gleichzeitig befahren,
//! ohne geteilten veränderlichen Zustand. Jede Abfrage nimmt die Distanz
//! als expliziten Parameter entgegen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::traversal::TravelDirection;
use crate::shared::spline_geometry::perp_left;

/// Minimaler Abstand zweier aufeinanderfolgender Samples.
/// Nähere Samples werden beim Backen verworfen (Division-durch-Null-Schutz).
pub const MIN_SAMPLE_SPACING: f32 = 1e-8;

/// Arc-Length-parametrisierte Kurve: Polyline-Samples plus monotone
/// kumulative Längentabelle gleicher Länge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakedCurve {
    points: Vec<Vec2>,
    cumulative_lengths: Vec<f32>,
    total_length: f32,
    is_loop: bool,
}

impl BakedCurve {
    /// Erstellt die Kurve aus fertigen Samples; `cumulative_lengths` muss
    /// parallel zu `points` aufgebaut sein (Invariante des Bakers).
    pub(crate) fn from_samples(points: Vec<Vec2>, cumulative_lengths: Vec<f32>, is_loop: bool) -> Self {
        debug_assert_eq!(points.len(), cumulative_lengths.len());
        let total_length = cumulative_lengths.last().copied().unwrap_or(0.0);
        Self {
            points,
            cumulative_lengths,
            total_length,
            is_loop,
        }
    }

    /// Erstellt eine explizit leere Kurve (`total_length = 0`).
    pub fn empty(is_loop: bool) -> Self {
        Self {
            points: Vec::new(),
            cumulative_lengths: Vec::new(),
            total_length: 0.0,
            is_loop,
        }
    }

    /// Die gesampelten Polyline-Punkte (read-only).
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Die kumulative Längentabelle, `[0] = 0`, nicht-fallend.
    pub fn cumulative_lengths(&self) -> &[f32] {
        &self.cumulative_lengths
    }

    /// Gesamtlänge der Polyline (0.0 für die leere Kurve).
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Ob die Distanz modulo `total_length` wickelt.
    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Anzahl der Samples.
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// `true`, wenn die Kurve keine nutzbare Länge hat.
    /// Aufrufer behandeln diesen Fall als "keine Kurve" (No-Op).
    pub fn is_degenerate(&self) -> bool {
        self.total_length <= 0.0
    }

    /// Normalisiert eine Distanz in den gültigen Bereich:
    /// Loop → modulo in `[0, total_length)`, offen → geklemmt in
    /// `[0, total_length]`. Vorstufe jeder anderen Abfrage.
    pub fn wrap_distance(&self, s: f32) -> f32 {
        if self.total_length <= 0.0 {
            return 0.0;
        }
        if self.is_loop {
            let wrapped = s.rem_euclid(self.total_length);
            // rem_euclid kann durch Rundung exakt total_length liefern
            if wrapped >= self.total_length { 0.0 } else { wrapped }
        } else {
            s.clamp(0.0, self.total_length)
        }
    }

    /// Findet per Binärsuche den Segment-Index `i` mit
    /// `cum[i] <= s <= cum[i+1]` — O(log M).
    ///
    /// Erwartet eine bereits normalisierte Distanz; Ergebnisse liegen
    /// immer in `[0, M−2]`.
    pub fn find_segment(&self, s: f32) -> usize {
        if self.cumulative_lengths.len() < 2 {
            return 0;
        }
        let upper = self.cumulative_lengths.partition_point(|&c| c <= s);
        upper.saturating_sub(1).min(self.cumulative_lengths.len() - 2)
    }

    /// Lokaler Interpolationsfaktor t ∈ [0, 1] innerhalb eines Segments.
    /// Null-Längen-Segmente liefern t = 0.
    fn segment_factor(&self, seg: usize, s: f32) -> f32 {
        let start = self.cumulative_lengths[seg];
        let end = self.cumulative_lengths[seg + 1];
        let len = end - start;
        if len <= 0.0 {
            0.0
        } else {
            ((s - start) / len).clamp(0.0, 1.0)
        }
    }

    /// Position bei Distanz `s` (linear zwischen den Samples).
    ///
    /// Stetig in `s`, auch über die Loop-Naht hinweg. Degenerierte Kurven
    /// liefern deterministische Fallbacks: den einzigen Punkt oder
    /// `Vec2::ZERO` für die leere Kurve.
    pub fn position_at(&self, s: f32) -> Vec2 {
        match self.points.len() {
            0 => Vec2::ZERO,
            1 => self.points[0],
            _ => {
                let s = self.wrap_distance(s);
                let seg = self.find_segment(s);
                let t = self.segment_factor(seg, s);
                self.points[seg].lerp(self.points[seg + 1], t)
            }
        }
    }

    /// Normalisierte Tangente bei Distanz `s`; degenerierte Segmente
    /// liefern `fallback` statt eines undefinierten Vektors.
    pub fn tangent_at_or(&self, s: f32, fallback: Vec2) -> Vec2 {
        if self.points.len() < 2 {
            return fallback;
        }
        let s = self.wrap_distance(s);
        let seg = self.find_segment(s);
        (self.points[seg + 1] - self.points[seg])
            .try_normalize()
            .unwrap_or(fallback)
    }

    /// Normalisierte Tangente bei Distanz `s` mit `Vec2::X` als Fallback.
    pub fn tangent_at(&self, s: f32) -> Vec2 {
        self.tangent_at_or(s, Vec2::X)
    }

    /// Linke Normale (Tangente um 90° gegen den Uhrzeigersinn gedreht);
    /// bestimmt die lateralen "Seiten" der Kurve.
    pub fn left_normal_at(&self, s: f32) -> Vec2 {
        perp_left(self.tangent_at(s))
    }

    /// Projiziert eine Weltposition auf die Kurve und liefert die Distanz
    /// des nächstgelegenen Polyline-Punkts.
    ///
    /// Zwei Phasen: grober O(M)-Scan über alle Samples, dann exakte
    /// Projektion auf die 1–2 angrenzenden Segmente (Dot-Produkt, auf
    /// [0, 1] geklemmt). Die Genauigkeit ist durch den Sample-Abstand
    /// begrenzt (Polyline, nicht die kontinuierliche Spline).
    pub fn project_to_distance(&self, world_pos: Vec2) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }

        // Grobphase: nächstes Sample per linearem Scan
        let mut best_idx = 0usize;
        let mut best_sample_d2 = f32::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let d2 = p.distance_squared(world_pos);
            if d2 < best_sample_d2 {
                best_sample_d2 = d2;
                best_idx = i;
            }
        }

        // Feinphase: angrenzende Segmente exakt projizieren
        let last_seg = self.points.len() - 2;
        let first = best_idx.saturating_sub(1).min(last_seg);
        let last = best_idx.min(last_seg);

        let mut best_s = self.cumulative_lengths[best_idx];
        let mut best_d2 = f32::INFINITY;
        for seg in first..=last {
            let a = self.points[seg];
            let ab = self.points[seg + 1] - a;
            let len2 = ab.length_squared();
            let t = if len2 <= 0.0 {
                0.0
            } else {
                ((world_pos - a).dot(ab) / len2).clamp(0.0, 1.0)
            };
            let candidate = a + ab * t;
            let d2 = candidate.distance_squared(world_pos);
            if d2 < best_d2 {
                best_d2 = d2;
                let seg_len = self.cumulative_lengths[seg + 1] - self.cumulative_lengths[seg];
                best_s = self.cumulative_lengths[seg] + t * seg_len;
            }
        }

        best_s
    }

    /// Entscheidet Einstiegsdistanz und Fahrtrichtung für einen Körper,
    /// der die Kurve neu betritt.
    ///
    /// Offene Kurven: näheres Ende gewinnt (Kopf → Forward, Schwanz →
    /// Backward). Loops: Projektion liefert die Distanz; die Richtung,
    /// deren Tangente zum Vektor Körper→Projektionspunkt zeigt, gewinnt
    /// (Forward bei Gleichstand).
    pub fn decide_start_and_direction(&self, world_pos: Vec2) -> (f32, TravelDirection) {
        if self.points.len() < 2 || self.is_degenerate() {
            return (0.0, TravelDirection::Forward);
        }

        if !self.is_loop {
            let head = self.points[0];
            let tail = self.points[self.points.len() - 1];
            return if world_pos.distance_squared(head) <= world_pos.distance_squared(tail) {
                (0.0, TravelDirection::Forward)
            } else {
                (self.total_length, TravelDirection::Backward)
            };
        }

        let s = self.project_to_distance(world_pos);
        let to_curve = self.position_at(s) - world_pos;
        let direction = if self.tangent_at(s).dot(to_curve) >= 0.0 {
            TravelDirection::Forward
        } else {
            TravelDirection::Backward
        };
        (s, direction)
    }

    /// Rückt die Distanz um `delta` in Fahrtrichtung vor und normalisiert.
    /// Offene Kurven bleiben dadurch natürlich am Ende stehen.
    pub fn step_along(&self, s: f32, direction: TravelDirection, delta: f32) -> f32 {
        self.wrap_distance(s + delta * direction.signum())
    }
}
