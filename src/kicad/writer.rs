//! Text writer for KiCad footprint (`.kicad_mod`) files.
//!
//! # File Format
//!
//! ```text
//! # ----------------------------------------------------  // Comment preamble
//! # Autogenerated by idc-footprint 0.1.0.
//! # ...
//! (footprint IDC (layer F.Cu) (tedit 66321A80)          // Header
//!   (pad 1 smd rect (at 0.400000 6.250000) (size ...) (layers F.Cu))
//!   ...                                                  // One line per primitive
//! )                                                      // Closing marker
//! ```
//!
//! All coordinates are written with six decimals.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use super::error::{KicadError, KicadResult};
use crate::idc::naming::footprint_filename;
use crate::idc::{CapacitorSpec, LayoutResult, Primitive, PrimitiveKind};

const RULE: &str = "# ----------------------------------------------------";

/// Parameter record written into the preamble.
#[derive(Serialize)]
struct PreambleParameters<'a> {
    #[serde(flatten)]
    spec: &'a CapacitorSpec,
    kind: PrimitiveKind,
}

/// Renders the footprint body: header, one line per primitive, closing marker.
///
/// The `tedit` field is the Unix time of `timestamp` in uppercase hex.
#[must_use]
pub fn render_footprint(
    spec: &CapacitorSpec,
    layout: &LayoutResult,
    timestamp: &DateTime<Local>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "(footprint {} (layer {}) (tedit {:X})",
        spec.module_name,
        spec.layer,
        timestamp.timestamp()
    );
    for primitive in &layout.primitives {
        output.push_str("  ");
        output.push_str(&render_primitive(primitive));
        output.push('\n');
    }
    output.push_str(")\n");

    output
}

/// Renders a single primitive as one s-expression line (without indentation).
#[must_use]
pub fn render_primitive(primitive: &Primitive) -> String {
    match primitive.kind {
        PrimitiveKind::Pad => format!(
            "(pad {} smd rect (at {:.6} {:.6}) (size {:.6} {:.6}) (layers {}))",
            primitive.terminal.number(),
            primitive.centre.x,
            primitive.centre.y,
            primitive.size.width,
            primitive.size.height,
            primitive.layer
        ),
        PrimitiveKind::Rectangle => {
            let start = primitive.start();
            let end = primitive.end();
            format!(
                "(fp_rect (start {:.6} {:.6}) (end {:.6} {:.6}) (layer {}) (width 0) (fill solid))",
                start.x, start.y, end.x, end.y, primitive.layer
            )
        }
    }
}

/// Renders the comment preamble placed above the footprint body.
///
/// # Errors
///
/// Returns an error if the parameter record cannot be serialised.
pub fn render_preamble(
    spec: &CapacitorSpec,
    layout: &LayoutResult,
    timestamp: &DateTime<Local>,
) -> KicadResult<String> {
    let parameters = serde_json::to_string(&PreambleParameters {
        spec,
        kind: layout.kind,
    })
    .map_err(|source| KicadError::Serialise { source })?;

    let mut output = String::new();
    let _ = writeln!(output, "{RULE}");
    let _ = writeln!(
        output,
        "# Autogenerated by {} {}.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(output, "{RULE}");
    let _ = writeln!(output, "# Date: {}", timestamp.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(output, "# Parameters: {parameters}");
    let _ = writeln!(output, "# {}", layout.dimensions());
    let _ = writeln!(output, "{RULE}");

    Ok(output)
}

/// Renders the complete file content: preamble followed by the footprint.
///
/// # Errors
///
/// Returns an error if the preamble cannot be rendered.
pub fn render_file(
    spec: &CapacitorSpec,
    layout: &LayoutResult,
    timestamp: &DateTime<Local>,
) -> KicadResult<String> {
    let mut output = render_preamble(spec, layout, timestamp)?;
    output.push_str(&render_footprint(spec, layout, timestamp));
    Ok(output)
}

/// Writes the footprint into `dir`, creating the directory if needed.
///
/// The filename encodes the capacitor parameters, see
/// [`footprint_filename`]. An existing file with the same name is replaced.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_footprint(
    dir: &Path,
    spec: &CapacitorSpec,
    layout: &LayoutResult,
    timestamp: &DateTime<Local>,
) -> KicadResult<PathBuf> {
    let content = render_file(spec, layout, timestamp)?;

    if !dir.exists() {
        tracing::debug!(path = %dir.display(), "Creating output directory");
        fs::create_dir_all(dir).map_err(|e| KicadError::create_dir(dir, e))?;
    }

    let path = dir.join(footprint_filename(spec));
    fs::write(&path, content).map_err(|e| KicadError::file_write(&path, e))?;

    tracing::info!(
        path = %path.display(),
        primitives = layout.primitives.len(),
        "Wrote footprint"
    );

    Ok(path)
}
