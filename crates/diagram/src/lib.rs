//! Flood-inundation diagrams for pole-mounted watt-hour meters.
//!
//! Composes sprite images onto a fixed-size RGBA canvas, draws elevation
//! reference lines and labels, and encodes the result as PNG:
//! - Sprite compositor (load, resize, alpha-composite)
//! - Affine elevation-to-row calibration
//! - Wet/dry scenario renderer

pub mod calibration;
pub mod diagram;
pub mod error;
pub mod sprite;
pub mod style;

pub use calibration::Calibration;
pub use diagram::MeterDiagram;
pub use error::{DiagramError, DiagramResult};
pub use sprite::{Anchor, Coords, Sprite};
pub use style::DiagramStyle;
