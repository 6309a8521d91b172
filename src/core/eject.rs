//! Seitlicher Ausstieg von der Schiene (Cancel & Eject).
//!
//! Geometrische Entscheidungsprozedur: prüft, ob ein fahrender Körper die
//! Kurve seitlich verlassen darf, und berechnet den Zielpunkt knapp
//! außerhalb der Hüllform. Eine Ablehnung ist ein normales negatives
//! Ergebnis, kein Fehler.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::baked_curve::BakedCurve;
use crate::core::bounds::RailBounds;
use crate::core::traversal::TravelDirection;
use crate::shared::spline_geometry::perp_left;

/// Cosinus-Schwelle: Eingaben in Fahrtrichtung lehnen den Ausstieg ab.
pub const SAME_DIR_DOT_THRESHOLD: f32 = 0.75;
/// Deadzone für die Achsen-Komponente des Input-Hints.
pub const INPUT_DEADZONE: f32 = 0.2;
/// Abstand, um den der Zielpunkt die Hüllform überragt (Welteinheiten).
pub const EXIT_SIDE_OFFSET: f32 = 0.2;

/// Einstellwerte des Ausstiegs; die Defaults entsprechen den Konstanten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EjectSettings {
    /// Ablehnungsschwelle gegen die Fahrtrichtung (Cosinus)
    pub same_dir_dot_threshold: f32,
    /// Deadzone der Hint-Komponente auf der Ausstiegs-Achse
    pub input_deadzone: f32,
    /// Sicherheitsabstand jenseits der Hüllform
    pub exit_side_offset: f32,
}

impl Default for EjectSettings {
    fn default() -> Self {
        Self {
            same_dir_dot_threshold: SAME_DIR_DOT_THRESHOLD,
            input_deadzone: INPUT_DEADZONE,
            exit_side_offset: EXIT_SIDE_OFFSET,
        }
    }
}

/// Ergebnis eines Ausstiegsversuchs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EjectOutcome {
    /// Die Eingabe zeigte weiter in Fahrtrichtung — Versuch abgelehnt,
    /// der Körper bleibt auf der Kurve
    Rejected,
    /// Ausstieg erlaubt; der Aufrufer bewegt den Körper zum Zielpunkt
    /// und übernimmt wieder die freie Steuerung
    Ejected {
        /// Zielpunkt knapp außerhalb der Hüllform
        target: Vec2,
    },
}

impl EjectOutcome {
    /// Ob der Ausstieg erlaubt wurde.
    pub fn is_ejected(&self) -> bool {
        matches!(self, EjectOutcome::Ejected { .. })
    }

    /// Zielpunkt, falls erlaubt.
    pub fn target(&self) -> Option<Vec2> {
        match self {
            EjectOutcome::Ejected { target } => Some(*target),
            EjectOutcome::Rejected => None,
        }
    }
}

/// Versucht, einen Körper bei Distanz `distance` seitlich von der Kurve
/// zu lösen.
///
/// Ablauf:
/// 1. Travel-Vektor = richtungs-korrigierte Tangente.
/// 2. Zeigt der normalisierte Input-Hint weiter in Fahrtrichtung
///    (Dot ≥ Schwelle), wird der Versuch abgelehnt.
/// 3. Die dominante Achse der Fahrt bestimmt die Querachse des Ausstiegs:
///    vertikale Fahrt wirft nach X aus, horizontale nach Y.
/// 4. Das Vorzeichen kommt aus der Hint-Komponente (jenseits der
///    Deadzone), sonst aus der linken Normale der Fahrt.
/// 5. Der Zielpunkt liegt `exit_side_offset` jenseits der Hüllkante auf
///    der Ausstiegsseite; die andere Koordinate wird auf den
///    Bounds-Bereich geklemmt. Ohne Hüllform: Kurvenposition plus
///    Ausstiegsrichtung mal Offset.
#[allow(clippy::too_many_arguments)]
pub fn try_cancel_and_eject(
    curve: &BakedCurve,
    body_pos: Vec2,
    distance: f32,
    direction: TravelDirection,
    input_hint: Vec2,
    bounds: Option<&RailBounds>,
    settings: &EjectSettings,
) -> EjectOutcome {
    let travel = curve.tangent_at(distance) * direction.signum();

    // Eingabe in Fahrtrichtung: der Aufrufer will weiterfahren, nicht weg
    if let Some(hint) = input_hint.try_normalize() {
        if hint.dot(travel) >= settings.same_dir_dot_threshold {
            return EjectOutcome::Rejected;
        }
    }

    let vertical_dominant = travel.y.abs() > travel.x.abs();
    // travel ist bereits orientiert, damit "links" unabhängig von der
    // Traversal-Richtung konsistent bleibt
    let left = perp_left(travel);

    let (hint_component, left_component) = if vertical_dominant {
        (input_hint.x, left.x)
    } else {
        (input_hint.y, left.y)
    };
    let sign = if hint_component.abs() > settings.input_deadzone {
        hint_component.signum()
    } else if left_component != 0.0 {
        left_component.signum()
    } else {
        1.0
    };

    let target = match bounds {
        Some(bounds) if vertical_dominant => {
            let edge_x = if sign > 0.0 { bounds.max.x } else { bounds.min.x };
            Vec2::new(
                edge_x + sign * settings.exit_side_offset,
                body_pos.y.clamp(bounds.min.y, bounds.max.y),
            )
        }
        Some(bounds) => {
            let edge_y = if sign > 0.0 { bounds.max.y } else { bounds.min.y };
            Vec2::new(
                body_pos.x.clamp(bounds.min.x, bounds.max.x),
                edge_y + sign * settings.exit_side_offset,
            )
        }
        None => {
            // Ohne Hüllform: direkt neben der Kurvenposition
            let axis = if vertical_dominant { Vec2::X } else { Vec2::Y };
            curve.position_at(distance) + axis * sign * settings.exit_side_offset
        }
    };

    EjectOutcome::Ejected { target }
}
