//! Caller-seitiger Traversal-Zustand über einer `BakedCurve`.
//!
//! Die Engine selbst bleibt zustandslos: Distanz und Richtung gehören dem
//! Aufrufer. `Traversal` bildet den Zustandsautomaten
//! Idle → Engaged → (EndReached | Ejected) als reinen Datenwert ab.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::baked_curve::BakedCurve;
use crate::core::bounds::RailBounds;
use crate::core::eject::{EjectOutcome, EjectSettings, try_cancel_and_eject};

/// Fahrtrichtung entlang der Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelDirection {
    /// In Richtung wachsender Distanz
    #[default]
    Forward,
    /// In Richtung fallender Distanz
    Backward,
}

impl TravelDirection {
    /// Vorzeichen für Distanz-Schritte.
    pub fn signum(self) -> f32 {
        match self {
            TravelDirection::Forward => 1.0,
            TravelDirection::Backward => -1.0,
        }
    }

    /// Kehrt die Richtung um.
    pub fn flip(self) -> Self {
        match self {
            TravelDirection::Forward => TravelDirection::Backward,
            TravelDirection::Backward => TravelDirection::Forward,
        }
    }
}

/// Distanz und Richtung eines Körpers auf der Kurve (reiner Datenwert).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraversalState {
    /// Distanz entlang der Kurve in Welteinheiten
    pub distance: f32,
    /// Aktuelle Fahrtrichtung
    pub direction: TravelDirection,
}

/// Ergebnis eines Traversal-Schritts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Der Körper bewegt sich weiter auf der Kurve
    Moving,
    /// Ende einer offenen Kurve erreicht; der Traversal ist beendet
    EndReached,
}

/// Komfort-Helfer über den reinen Abfragen: Einstieg, Schritt, Ausstieg.
///
/// Gehört dem Aufrufer; mehrere `Traversal`-Werte können dieselbe
/// `BakedCurve` gleichzeitig befahren.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Traversal {
    state: Option<TraversalState>,
}

impl Traversal {
    /// Erstellt einen Traversal im Idle-Zustand.
    pub fn idle() -> Self {
        Self { state: None }
    }

    /// Ob der Körper gerade auf der Kurve fährt.
    pub fn is_engaged(&self) -> bool {
        self.state.is_some()
    }

    /// Aktueller Zustand, falls Engaged.
    pub fn state(&self) -> Option<TraversalState> {
        self.state
    }

    /// Idle → Engaged: Einstiegsdistanz und Richtung aus der Weltposition.
    pub fn engage(&mut self, curve: &BakedCurve, world_pos: Vec2) -> TraversalState {
        let (distance, direction) = curve.decide_start_and_direction(world_pos);
        let state = TraversalState {
            distance,
            direction,
        };
        self.state = Some(state);
        state
    }

    /// Rückt um `delta` vor. `EndReached` nur an den Enden offener Kurven;
    /// der Traversal fällt dann zurück auf Idle. Im Idle-Zustand ein No-Op.
    pub fn advance(&mut self, curve: &BakedCurve, delta: f32) -> StepOutcome {
        let Some(state) = self.state.as_mut() else {
            return StepOutcome::EndReached;
        };

        state.distance = curve.step_along(state.distance, state.direction, delta);

        if !curve.is_loop() {
            let at_tail =
                state.direction == TravelDirection::Forward && state.distance >= curve.total_length();
            let at_head = state.direction == TravelDirection::Backward && state.distance <= 0.0;
            if at_tail || at_head {
                self.state = None;
                return StepOutcome::EndReached;
            }
        }

        StepOutcome::Moving
    }

    /// Versucht den seitlichen Ausstieg; bei Erfolg zurück zu Idle,
    /// bei Ablehnung bleibt der Traversal Engaged.
    pub fn try_eject(
        &mut self,
        curve: &BakedCurve,
        body_pos: Vec2,
        input_hint: Vec2,
        bounds: Option<&RailBounds>,
        settings: &EjectSettings,
    ) -> EjectOutcome {
        let Some(state) = self.state else {
            return EjectOutcome::Rejected;
        };

        let outcome = try_cancel_and_eject(
            curve,
            body_pos,
            state.distance,
            state.direction,
            input_hint,
            bounds,
            settings,
        );
        if outcome.is_ejected() {
            self.state = None;
        }
        outcome
    }

    /// Position des Körpers laut aktuellem Zustand.
    pub fn position(&self, curve: &BakedCurve) -> Option<Vec2> {
        self.state.map(|s| curve.position_at(s.distance))
    }
}
