//! Reine Geometrie-Funktionen für Catmull-Rom-Splines.
//!
//! Layer-neutral: wird von `core::baker` und `core::baked_curve` importiert,
//! ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::Vec2;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2 (uniforme Formulierung, Tension 0.5).
pub fn catmull_rom_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Liefert die vier Kontrollpunkte, die Segment `seg` umklammern.
///
/// Offene Kurven spiegeln an den Rändern Phantom-Punkte nach außen
/// (`2·p0 − p1` bzw. `2·pn − p_{n−1}`), damit die Kurve natürlich durch
/// den ersten und letzten Punkt läuft. Loop-Kurven wickeln die Indizes
/// modulo N. Phantom-Punkte tauchen nie als Kurvenpositionen auf.
///
/// Voraussetzung: `points.len() >= 2` und `seg` ist ein gültiger
/// Segment-Index (N−1 Segmente offen, N Segmente als Loop).
pub fn segment_control_points(
    points: &[Vec2],
    seg: usize,
    is_loop: bool,
) -> (Vec2, Vec2, Vec2, Vec2) {
    let n = points.len();

    if is_loop {
        let p0 = points[(seg + n - 1) % n];
        let p1 = points[seg % n];
        let p2 = points[(seg + 1) % n];
        let p3 = points[(seg + 2) % n];
        return (p0, p1, p2, p3);
    }

    let p0 = if seg == 0 {
        2.0 * points[0] - points[1]
    } else {
        points[seg - 1]
    };
    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p3 = if seg + 2 < n {
        points[seg + 2]
    } else {
        2.0 * points[n - 1] - points[n - 2]
    };

    (p0, p1, p2, p3)
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Rotiert einen Vektor um 90° nach links (gegen den Uhrzeigersinn).
pub fn perp_left(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}
