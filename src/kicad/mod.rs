//! KiCad footprint output.
//!
//! Footprints are written in the KiCad s-expression format (`.kicad_mod`),
//! one file per capacitor, typically into a `*.pretty` library directory.
//! Only SMD rectangular pads and filled rectangles are emitted.

pub mod error;
pub mod writer;

pub use error::{KicadError, KicadResult};
pub use writer::{render_file, render_footprint, render_preamble, write_footprint};

/// Default footprint library directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./idc.pretty";
