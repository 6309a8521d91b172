//! Layer-übergreifende Hilfsmodule ohne Abhängigkeiten auf `core`.

pub mod spline_geometry;
