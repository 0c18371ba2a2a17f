//! Capacitor input parameters and their validation.
//!
//! A [`RawSpec`] is what the command line hands over: every width optional,
//! the finger count signed. Converting it into a [`CapacitorSpec`] runs the
//! range checks once, so the layout generator never sees an invalid value.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{SpecError, SpecResult};

/// Default copper layer for generated footprints.
pub const DEFAULT_LAYER: &str = "F.Cu";

/// Minimum number of fingers that still forms an interleaved comb.
pub const MIN_FINGERS: u32 = 2;

/// Upper bound on the finger count.
pub const MAX_FINGERS: u32 = 10_000;

/// Which horizontal dimension the caller fixed.
///
/// The other one is derived through
/// `total_width = finger_length + 2 * connecting_track_width + gap`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthConstraint {
    /// Overall footprint width in mm; finger length is derived.
    TotalWidth(f64),
    /// Finger length in mm; overall width is derived.
    FingerLength(f64),
}

impl WidthConstraint {
    /// Picks the authoritative width from the optional command line values.
    ///
    /// Finger length wins when both are given. The discarded total width is
    /// reported with a warning rather than silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::MissingWidth`] if neither value is present, or
    /// [`SpecError::InvalidParameter`] if a present value is not positive.
    pub fn from_options(total_width: Option<f64>, finger_length: Option<f64>) -> SpecResult<Self> {
        if total_width.is_none() && finger_length.is_none() {
            return Err(SpecError::MissingWidth);
        }
        if let Some(width) = total_width {
            require_positive("total_width", "Total width", width)?;
        }
        if let Some(length) = finger_length {
            require_positive("finger_length", "Finger length", length)?;
        }

        match (total_width, finger_length) {
            (Some(width), Some(length)) => {
                tracing::warn!(
                    total_width = width,
                    finger_length = length,
                    "Both total width and finger length given; total width is recomputed from finger length"
                );
                Ok(Self::FingerLength(length))
            }
            (_, Some(length)) => Ok(Self::FingerLength(length)),
            (Some(width), None) => Ok(Self::TotalWidth(width)),
            (None, None) => Err(SpecError::MissingWidth),
        }
    }

    /// Returns the fixed value in mm, whichever dimension it is.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match *self {
            Self::TotalWidth(v) | Self::FingerLength(v) => v,
        }
    }
}

/// Unvalidated capacitor parameters, as received from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpec {
    /// Footprint (module) name.
    pub module_name: String,
    /// Finger width in mm.
    pub track_width: f64,
    /// Gap between fingers in mm.
    pub gap: f64,
    /// Number of fingers.
    pub num_fingers: i64,
    /// Overall width in mm.
    pub total_width: Option<f64>,
    /// Finger length in mm.
    pub finger_length: Option<f64>,
    /// Width of the two connecting tracks in mm.
    pub connecting_track_width: Option<f64>,
    /// Copper layer name.
    pub layer: String,
}

/// Validated parameters of an interdigitated capacitor.
///
/// All lengths are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitorSpec {
    /// Footprint (module) name.
    pub module_name: String,

    /// Width of each finger.
    pub track_width: f64,

    /// Gap between neighbouring fingers, and between a finger tip and the
    /// opposite connecting track.
    pub gap: f64,

    /// Number of fingers, between [`MIN_FINGERS`] and [`MAX_FINGERS`].
    pub num_fingers: u32,

    /// The authoritative horizontal dimension.
    pub width: WidthConstraint,

    /// Width of the connecting tracks. `None` means "same as `track_width`".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connecting_track_width: Option<f64>,

    /// Copper layer name, e.g. `F.Cu`.
    pub layer: String,
}

impl CapacitorSpec {
    /// Creates a spec on the default layer with the connecting track width
    /// equal to the finger width.
    ///
    /// The values are not checked; call [`validate`](Self::validate) or build
    /// from a [`RawSpec`] instead when they come from user input.
    #[must_use]
    pub fn new(
        module_name: impl Into<String>,
        track_width: f64,
        gap: f64,
        num_fingers: u32,
        width: WidthConstraint,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            track_width,
            gap,
            num_fingers,
            width,
            connecting_track_width: None,
            layer: DEFAULT_LAYER.to_string(),
        }
    }

    /// Sets an explicit connecting track width.
    #[must_use]
    pub fn with_connecting_track_width(mut self, width: f64) -> Self {
        self.connecting_track_width = Some(width);
        self
    }

    /// Sets the copper layer.
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in command line order.
    pub fn validate(&self) -> SpecResult<()> {
        validate_leading(
            &self.module_name,
            self.track_width,
            self.gap,
            self.num_fingers,
            self.connecting_track_width,
        )?;
        self.validate_resolved()
    }

    /// Checks that only make sense once the width constraint is settled.
    fn validate_resolved(&self) -> SpecResult<()> {
        match self.width {
            WidthConstraint::TotalWidth(w) => require_positive("total_width", "Total width", w)?,
            WidthConstraint::FingerLength(l) => {
                require_positive("finger_length", "Finger length", l)?;
            }
        }
        self.require_fingers_fit()?;
        self.require_finite_dimensions()?;
        validate_layer(&self.layer)
    }

    /// A fixed total width must leave room for the fingers once both
    /// connecting tracks and the tip gap are taken out.
    fn require_fingers_fit(&self) -> SpecResult<()> {
        if matches!(self.width, WidthConstraint::TotalWidth(_)) && self.finger_length() <= 0.0 {
            return Err(SpecError::invalid_parameter(
                "total_width",
                format!(
                    "Total width must exceed twice the connecting track width plus the gap ({:.6} mm).",
                    2.0 * self.connecting_track_width() + self.gap
                ),
            ));
        }
        Ok(())
    }

    /// Finite inputs can still overflow once summed.
    fn require_finite_dimensions(&self) -> SpecResult<()> {
        if !self.total_height().is_finite() {
            return Err(SpecError::invalid_parameter(
                "track_width",
                format!(
                    "Track width and gap are too large for {} fingers: total height overflows.",
                    self.num_fingers
                ),
            ));
        }
        if !self.total_width().is_finite() || !self.finger_length().is_finite() {
            let (name, label) = match self.width {
                WidthConstraint::TotalWidth(_) => ("total_width", "Total width"),
                WidthConstraint::FingerLength(_) => ("finger_length", "Finger length"),
            };
            return Err(SpecError::invalid_parameter(
                name,
                format!("{label} is too large: derived width overflows."),
            ));
        }
        Ok(())
    }

    /// Connecting track width with the default applied.
    #[must_use]
    pub fn connecting_track_width(&self) -> f64 {
        self.connecting_track_width.unwrap_or(self.track_width)
    }

    /// Height of the comb: `n * (track_width + gap) - gap`.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        f64::from(self.num_fingers) * (self.track_width + self.gap) - self.gap
    }

    /// Finger length, derived from the total width when that is authoritative.
    #[must_use]
    pub fn finger_length(&self) -> f64 {
        match self.width {
            WidthConstraint::FingerLength(length) => length,
            WidthConstraint::TotalWidth(width) => {
                width - 2.0 * self.connecting_track_width() - self.gap
            }
        }
    }

    /// Total width, derived from the finger length when that is authoritative.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        match self.width {
            WidthConstraint::TotalWidth(width) => width,
            WidthConstraint::FingerLength(length) => {
                length + 2.0 * self.connecting_track_width() + self.gap
            }
        }
    }
}

impl TryFrom<RawSpec> for CapacitorSpec {
    type Error = SpecError;

    fn try_from(raw: RawSpec) -> SpecResult<Self> {
        // Out-of-range counts saturate so the range check reports them.
        let num_fingers = u32::try_from(raw.num_fingers).unwrap_or(if raw.num_fingers < 0 {
            0
        } else {
            u32::MAX
        });
        validate_leading(
            &raw.module_name,
            raw.track_width,
            raw.gap,
            num_fingers,
            raw.connecting_track_width,
        )?;
        let width = WidthConstraint::from_options(raw.total_width, raw.finger_length)?;

        let spec = Self {
            module_name: raw.module_name,
            track_width: raw.track_width,
            gap: raw.gap,
            num_fingers,
            width,
            connecting_track_width: raw.connecting_track_width,
            layer: raw.layer,
        };
        spec.validate_resolved()?;
        Ok(spec)
    }
}

/// Checks shared by [`CapacitorSpec::validate`] and the `RawSpec` conversion,
/// in command line order, up to the width constraint.
fn validate_leading(
    module_name: &str,
    track_width: f64,
    gap: f64,
    num_fingers: u32,
    connecting_track_width: Option<f64>,
) -> SpecResult<()> {
    validate_module_name(module_name)?;
    require_positive("track_width", "Track width", track_width)?;
    require_positive("gap", "Gap", gap)?;
    if num_fingers < MIN_FINGERS {
        return Err(SpecError::invalid_parameter(
            "num_fingers",
            format!("Number of fingers must be at least {MIN_FINGERS}."),
        ));
    }
    if num_fingers > MAX_FINGERS {
        return Err(SpecError::invalid_parameter(
            "num_fingers",
            format!("Number of fingers must be at most {MAX_FINGERS}."),
        ));
    }
    if let Some(ctw) = connecting_track_width {
        require_positive("connecting_track_width", "Connecting track width", ctw)?;
    }
    Ok(())
}

/// Rejects zero, negative and non-finite lengths.
fn require_positive(name: &'static str, label: &str, value: f64) -> SpecResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpecError::invalid_parameter(
            name,
            format!("{label} must be greater than 0."),
        ))
    }
}

fn module_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.+\-]+$").expect("module name pattern is valid")
    })
}

fn layer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^[^\s()"]+$"#).expect("layer pattern is valid"))
}

/// The module name ends up in the output filename and the footprint header.
fn validate_module_name(name: &str) -> SpecResult<()> {
    if module_name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(SpecError::invalid_parameter(
            "modulename",
            format!(
                "Module name '{name}' is invalid. Use letters, digits, '_', '.', '+' or '-'."
            ),
        ))
    }
}

fn validate_layer(layer: &str) -> SpecResult<()> {
    if layer_pattern().is_match(layer) {
        Ok(())
    } else {
        Err(SpecError::invalid_parameter(
            "layer",
            format!("Layer '{layer}' is invalid."),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn raw() -> RawSpec {
        RawSpec {
            module_name: "IDC".to_string(),
            track_width: 0.8,
            gap: 0.5,
            num_fingers: 10,
            total_width: None,
            finger_length: Some(15.0),
            connecting_track_width: Some(0.8),
            layer: DEFAULT_LAYER.to_string(),
        }
    }

    fn rejected_parameter(raw: RawSpec) -> Option<&'static str> {
        CapacitorSpec::try_from(raw).unwrap_err().parameter()
    }

    #[test]
    fn accepts_reference_parameters() {
        let spec = CapacitorSpec::try_from(raw()).unwrap();
        assert_eq!(spec.num_fingers, 10);
        assert_eq!(spec.width, WidthConstraint::FingerLength(15.0));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn reference_dimensions() {
        let spec = CapacitorSpec::try_from(raw()).unwrap();
        assert!((spec.total_height() - 12.5).abs() < TOLERANCE);
        assert!((spec.total_width() - 17.1).abs() < TOLERANCE);
        assert!((spec.finger_length() - 15.0).abs() < TOLERANCE);
    }

    #[test]
    fn three_fingers_height() {
        let spec = CapacitorSpec::new("IDC", 1.0, 1.0, 3, WidthConstraint::TotalWidth(10.0));
        assert!((spec.total_height() - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn total_width_round_trip() {
        let spec = CapacitorSpec::new("IDC", 0.3, 0.2, 4, WidthConstraint::TotalWidth(7.3))
            .with_connecting_track_width(0.45);
        let reverse = CapacitorSpec {
            width: WidthConstraint::FingerLength(spec.finger_length()),
            ..spec.clone()
        };
        assert!((reverse.total_width() - 7.3).abs() < TOLERANCE);
    }

    #[test]
    fn finger_length_round_trip() {
        let spec = CapacitorSpec::new("IDC", 0.25, 0.15, 6, WidthConstraint::FingerLength(4.2));
        let reverse = CapacitorSpec {
            width: WidthConstraint::TotalWidth(spec.total_width()),
            ..spec.clone()
        };
        assert!((reverse.finger_length() - 4.2).abs() < TOLERANCE);
    }

    #[test]
    fn connecting_track_width_defaults_to_track_width() {
        let spec = CapacitorSpec::new("IDC", 0.6, 0.2, 2, WidthConstraint::FingerLength(3.0));
        assert!((spec.connecting_track_width() - 0.6).abs() < TOLERANCE);
        assert!((spec.total_width() - 4.4).abs() < TOLERANCE);
    }

    #[test]
    fn finger_count_boundary() {
        let mut two = raw();
        two.num_fingers = 2;
        assert!(CapacitorSpec::try_from(two).is_ok());

        for n in [1, 0, -3] {
            let mut bad = raw();
            bad.num_fingers = n;
            assert_eq!(rejected_parameter(bad), Some("num_fingers"));
        }
    }

    #[test]
    fn rejects_non_positive_lengths() {
        for value in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let mut r = raw();
            r.track_width = value;
            assert_eq!(rejected_parameter(r), Some("track_width"));

            let mut r = raw();
            r.gap = value;
            assert_eq!(rejected_parameter(r), Some("gap"));

            let mut r = raw();
            r.connecting_track_width = Some(value);
            assert_eq!(rejected_parameter(r), Some("connecting_track_width"));

            let mut r = raw();
            r.finger_length = Some(value);
            assert_eq!(rejected_parameter(r), Some("finger_length"));

            let mut r = raw();
            r.finger_length = None;
            r.total_width = Some(value);
            assert_eq!(rejected_parameter(r), Some("total_width"));
        }
    }

    #[test]
    fn total_width_too_small_for_fingers() {
        let mut r = raw();
        r.finger_length = None;
        r.total_width = Some(2.0);
        assert_eq!(rejected_parameter(r), Some("total_width"));

        let mut r = raw();
        r.finger_length = None;
        r.total_width = Some(2.2);
        assert!(CapacitorSpec::try_from(r).is_ok());
    }

    #[test]
    fn overflowing_height_rejected() {
        let mut r = raw();
        r.track_width = 1e308;
        r.gap = 1e308;
        r.finger_length = Some(1.0);
        assert_eq!(rejected_parameter(r), Some("track_width"));
    }

    #[test]
    fn overflowing_width_rejected() {
        let mut r = raw();
        r.connecting_track_width = Some(1e308);
        r.finger_length = Some(1e308);
        assert_eq!(rejected_parameter(r), Some("finger_length"));

        let spec = CapacitorSpec::new("IDC", 0.5, 0.5, 2, WidthConstraint::FingerLength(f64::MAX))
            .with_connecting_track_width(f64::MAX);
        assert_eq!(spec.validate().unwrap_err().parameter(), Some("finger_length"));
    }

    #[test]
    fn finger_count_upper_bound() {
        let mut at_limit = raw();
        at_limit.num_fingers = i64::from(MAX_FINGERS);
        assert!(CapacitorSpec::try_from(at_limit).is_ok());

        for n in [i64::from(MAX_FINGERS) + 1, 4_000_000_000, i64::MAX] {
            let mut bad = raw();
            bad.num_fingers = n;
            let err = CapacitorSpec::try_from(bad).unwrap_err();
            assert_eq!(err.parameter(), Some("num_fingers"));
            assert!(err.to_string().contains("at most"));
        }
    }

    #[test]
    fn conversion_and_validate_agree() {
        let mut r = raw();
        r.total_width = Some(30.0);
        r.finger_length = None;
        let spec = CapacitorSpec::try_from(r).unwrap();
        assert!(spec.validate().is_ok());

        let too_many = CapacitorSpec { num_fingers: MAX_FINGERS + 1, ..spec };
        assert_eq!(too_many.validate().unwrap_err().parameter(), Some("num_fingers"));
    }

    #[test]
    fn missing_width_rejected() {
        let mut r = raw();
        r.finger_length = None;
        assert_eq!(CapacitorSpec::try_from(r), Err(SpecError::MissingWidth));
    }

    #[test]
    fn checks_run_in_command_line_order() {
        let mut r = raw();
        r.gap = 0.0;
        r.num_fingers = 1;
        r.finger_length = None;
        assert_eq!(rejected_parameter(r), Some("gap"));
    }

    #[test]
    fn finger_length_wins_over_total_width() {
        let mut r = raw();
        r.total_width = Some(99.0);
        let spec = CapacitorSpec::try_from(r).unwrap();
        assert_eq!(spec.width, WidthConstraint::FingerLength(15.0));
        assert!((spec.total_width() - 17.1).abs() < TOLERANCE);
    }

    #[test]
    fn discarded_total_width_is_still_checked() {
        let mut r = raw();
        r.total_width = Some(-1.0);
        assert_eq!(rejected_parameter(r), Some("total_width"));
    }

    #[test]
    fn rejects_bad_module_names() {
        for name in ["", "my cap", "../IDC", "a/b"] {
            let mut r = raw();
            r.module_name = name.to_string();
            assert_eq!(rejected_parameter(r), Some("modulename"));
        }

        let mut r = raw();
        r.module_name = "IDC_0.8-v2+".to_string();
        assert!(CapacitorSpec::try_from(r).is_ok());
    }

    #[test]
    fn rejects_bad_layers() {
        for layer in ["", "F Cu", "F.Cu)", "\"F.Cu\""] {
            let mut r = raw();
            r.layer = layer.to_string();
            assert_eq!(rejected_parameter(r), Some("layer"));
        }

        let mut r = raw();
        r.layer = "In1.Cu".to_string();
        assert!(CapacitorSpec::try_from(r).is_ok());
    }

    #[test]
    fn validate_catches_direct_construction() {
        let spec = CapacitorSpec::new("IDC", 0.5, 0.5, 1, WidthConstraint::FingerLength(3.0));
        assert_eq!(spec.validate().unwrap_err().parameter(), Some("num_fingers"));

        let spec = CapacitorSpec::new("IDC", 0.5, 0.5, 2, WidthConstraint::TotalWidth(0.0));
        assert_eq!(spec.validate().unwrap_err().parameter(), Some("total_width"));
    }

    #[test]
    fn width_constraint_value() {
        assert!((WidthConstraint::TotalWidth(3.5).value() - 3.5).abs() < TOLERANCE);
        assert!((WidthConstraint::FingerLength(2.0).value() - 2.0).abs() < TOLERANCE);
    }
}
