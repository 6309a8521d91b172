//! Core-Domänentypen: BakedCurve, PathBaker, Traversal, Eject, Bounds.

pub mod baked_curve;
pub mod baker;
pub mod bounds;
pub mod eject;
pub mod track;
pub mod traversal;

pub use baked_curve::{BakedCurve, MIN_SAMPLE_SPACING};
pub use baker::{DEFAULT_SAMPLES_PER_SEGMENT, MIN_SAMPLES_PER_SEGMENT, PathBaker, bake};
pub use bounds::RailBounds;
pub use eject::{EjectOutcome, EjectSettings, try_cancel_and_eject};
pub use track::TrackDefinition;
pub use traversal::{StepOutcome, Traversal, TraversalState, TravelDirection};
