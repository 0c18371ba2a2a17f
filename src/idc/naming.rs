//! Output file naming.
//!
//! Generated footprints carry their defining parameters in the filename so
//! a library directory can hold many variants side by side.
//!
//! # Name Format
//!
//! `{NAME}_tw{TRACK}_ctw{CONNECTING}_g{GAP}_{fl|w}{WIDTH}_n{FINGERS}.kicad_mod`
//!
//! Examples:
//! - `IDC_tw0.8_ctw0.8_g0.5_fl15_n10.kicad_mod` - finger length fixed
//! - `IDC_tw0.2_ctw0.3_g0.15_w5_n8.kicad_mod` - total width fixed

use super::spec::{CapacitorSpec, WidthConstraint};

/// File extension of KiCad footprint files.
pub const FOOTPRINT_EXTENSION: &str = "kicad_mod";

/// Builds the output filename for a footprint.
///
/// Numbers are written in their shortest exact form, so `15.0` becomes `15`
/// and `0.8` stays `0.8`.
///
/// # Examples
///
/// ```
/// use idc_footprint::idc::{naming::footprint_filename, CapacitorSpec, WidthConstraint};
///
/// let spec = CapacitorSpec::new("IDC", 0.8, 0.5, 10, WidthConstraint::FingerLength(15.0));
/// assert_eq!(footprint_filename(&spec), "IDC_tw0.8_ctw0.8_g0.5_fl15_n10.kicad_mod");
/// ```
#[must_use]
pub fn footprint_filename(spec: &CapacitorSpec) -> String {
    let width = match spec.width {
        WidthConstraint::FingerLength(length) => format!("fl{length}"),
        WidthConstraint::TotalWidth(width) => format!("w{width}"),
    };

    format!(
        "{name}_tw{tw}_ctw{ctw}_g{gap}_{width}_n{n}.{FOOTPRINT_EXTENSION}",
        name = spec.module_name,
        tw = spec.track_width,
        ctw = spec.connecting_track_width(),
        gap = spec.gap,
        n = spec.num_fingers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_width_variant() {
        let spec = CapacitorSpec::new("IDC", 0.2, 0.15, 8, WidthConstraint::TotalWidth(5.0))
            .with_connecting_track_width(0.3);
        assert_eq!(
            footprint_filename(&spec),
            "IDC_tw0.2_ctw0.3_g0.15_w5_n8.kicad_mod"
        );
    }

    #[test]
    fn resolved_connecting_width_in_name() {
        let spec = CapacitorSpec::new("CAP", 1.25, 1.0, 2, WidthConstraint::FingerLength(3.5));
        let name = footprint_filename(&spec);
        assert!(name.contains("_ctw1.25_"));
        assert!(name.starts_with("CAP_"));
        assert!(name.ends_with("_fl3.5_n2.kicad_mod"));
    }
}
