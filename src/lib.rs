//! Arc-Length-parametrisierte Pfad-Engine.
//!
//! Backt spärliche Kontrollpunkte per Catmull-Rom-Spline zu einer dichten
//! Polyline mit kumulativer Längentabelle und stellt darauf reine
//! Abfragen bereit: Position/Tangente/Normale bei Distanz (O(log M)),
//! Projektion beliebiger Weltpositionen auf die Kurve sowie der
//! regelbasierte seitliche Ausstieg eines fahrenden Körpers.
//!
//! Die Engine hält keinen globalen Zustand: `BakedCurve` ist nach dem
//! Backen unveränderlich, Distanz und Richtung gehören dem Aufrufer.

pub mod core;
pub mod shared;

pub use crate::core::{
    BakedCurve, DEFAULT_SAMPLES_PER_SEGMENT, EjectOutcome, EjectSettings, MIN_SAMPLE_SPACING,
    MIN_SAMPLES_PER_SEGMENT, PathBaker, RailBounds, StepOutcome, TrackDefinition, Traversal,
    TraversalState, TravelDirection, bake, try_cancel_and_eject,
};
