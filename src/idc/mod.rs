//! Interdigitated capacitor geometry.
//!
//! An interdigitated capacitor is two combs of copper fingers pushed into
//! each other. Its capacitance is set by the finger count, the finger
//! length, and the gap between neighbouring fingers.
//!
//! - [`spec`] - input parameters and their validation
//! - [`layout`] - the comb geometry itself
//! - [`naming`] - output filenames
//!
//! # Example
//!
//! ```
//! use idc_footprint::idc::{CapacitorSpec, LayoutGenerator, PrimitiveKind, WidthConstraint};
//!
//! let spec = CapacitorSpec::new("IDC", 0.8, 0.5, 10, WidthConstraint::FingerLength(15.0));
//! spec.validate().unwrap();
//!
//! let layout = LayoutGenerator::new(PrimitiveKind::Pad).generate(&spec);
//! assert_eq!(layout.primitives.len(), 12);
//! println!("{}", layout.dimensions());
//! ```

pub mod error;
pub mod layout;
pub mod naming;
pub mod spec;

pub use error::{SpecError, SpecResult};
pub use layout::{
    LayoutGenerator, LayoutResult, Point, Primitive, PrimitiveKind, Role, Size, Terminal,
};
pub use spec::{CapacitorSpec, RawSpec, WidthConstraint, DEFAULT_LAYER, MAX_FINGERS, MIN_FINGERS};
