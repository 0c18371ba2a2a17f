//! idc-footprint: interdigitated capacitor footprint generator for KiCad
//!
//! This library turns a handful of physical parameters (finger width, gap,
//! finger count, and either the finger length or the overall width) into the
//! copper geometry of an interdigitated capacitor, and writes it out as a
//! KiCad footprint.
//!
//! # Architecture
//!
//! - **Validation**: raw parameters become a [`idc::CapacitorSpec`] or an
//!   [`idc::SpecError`]; nothing downstream re-checks them
//! - **Layout**: [`idc::LayoutGenerator`] computes the rectangles, as pads
//!   or filled rectangles
//! - **Output**: [`kicad`] renders the `.kicad_mod` text and writes the file
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`idc`] — Capacitor parameters and layout geometry
//! - [`kicad`] — KiCad footprint output

pub mod config;
pub mod error;
pub mod idc;
pub mod kicad;
