//! Interdigitated capacitor layout generation.
//!
//! The layout is built in footprint coordinates (mm, y pointing down, origin
//! at the top-left corner of the comb):
//!
//! ```text
//!  x=0                                   x=total_width
//!  +---+=============================+   +---+   y=0       finger 0 (terminal 1)
//!  | 1 |   +=============================+ 2 |             finger 1 (terminal 2)
//!  |   |=============================+   |   |             finger 2 (terminal 1)
//!  +---+                                 +---+   y=total_height
//! ```
//!
//! Each terminal is a vertical connecting track spanning the full height.
//! Even fingers hang off terminal 1 on the left, odd fingers are shifted
//! right by `gap` and touch terminal 2, leaving a `gap` at the open tip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::spec::{CapacitorSpec, MAX_FINGERS};

/// Shape used for every generated primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// SMD pads carrying the terminal number (`pad N smd rect`).
    #[default]
    Pad,
    /// Filled copper rectangles (`fp_rect`).
    ///
    /// `fp_rect` has no pad number, so the written footprint does not say
    /// which comb each rectangle belongs to. [`Primitive::terminal`] is still
    /// set in the layout but is dropped on output.
    #[serde(rename = "rect", alias = "rectangle")]
    Rectangle,
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pad" | "pads" => Ok(Self::Pad),
            "rect" | "rectangle" => Ok(Self::Rectangle),
            other => Err(format!("unknown primitive kind '{other}', expected 'pad' or 'rect'")),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pad => write!(f, "pad"),
            Self::Rectangle => write!(f, "rect"),
        }
    }
}

/// Capacitor terminal a primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// Left comb.
    #[serde(rename = "1")]
    One,
    /// Right comb.
    #[serde(rename = "2")]
    Two,
}

impl Terminal {
    /// Terminal owning finger `index`; fingers alternate starting with [`Terminal::One`].
    #[must_use]
    pub const fn for_finger(index: u32) -> Self {
        if index % 2 == 0 {
            Self::One
        } else {
            Self::Two
        }
    }

    /// Pad number used in the footprint.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// A 2D point in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Extent of a primitive in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Extent along X (mm).
    pub width: f64,
    /// Extent along Y (mm).
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Role of a primitive inside the comb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Vertical track joining all fingers of one terminal.
    ConnectingTrack,
    /// One finger.
    Finger,
}

/// One axis-aligned rectangle of copper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Shape to emit.
    pub kind: PrimitiveKind,
    /// Connecting track or finger.
    pub role: Role,
    /// Terminal the copper is connected to.
    pub terminal: Terminal,
    /// Centre of the rectangle.
    pub centre: Point,
    /// Rectangle size.
    pub size: Size,
    /// Copper layer.
    pub layer: String,
}

impl Primitive {
    /// Top-left corner.
    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(
            self.centre.x - self.size.width / 2.0,
            self.centre.y - self.size.height / 2.0,
        )
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(
            self.centre.x + self.size.width / 2.0,
            self.centre.y + self.size.height / 2.0,
        )
    }
}

/// Generated layout plus the dimensions derived along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Shape of every primitive.
    pub kind: PrimitiveKind,
    /// Two connecting tracks followed by the fingers, top to bottom.
    pub primitives: Vec<Primitive>,
    /// Overall width (mm).
    pub total_width: f64,
    /// Overall height (mm).
    pub total_height: f64,
    /// Finger length (mm).
    pub finger_length: f64,
    /// Resolved connecting track width (mm).
    pub connecting_track_width: f64,
}

impl LayoutResult {
    /// Human-readable dimension summary.
    #[must_use]
    pub fn dimensions(&self) -> String {
        format!(
            "Total Width: {}mm, Total Height: {}mm",
            self.total_width, self.total_height
        )
    }

    /// Iterates over the finger primitives only.
    pub fn fingers(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| p.role == Role::Finger)
    }

    /// Iterates over the connecting track primitives only.
    pub fn connecting_tracks(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| p.role == Role::ConnectingTrack)
    }
}

/// Builds the comb for a validated [`CapacitorSpec`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutGenerator {
    kind: PrimitiveKind,
}

impl LayoutGenerator {
    /// Creates a generator emitting primitives of the given kind.
    #[must_use]
    pub const fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }

    /// Primitive kind this generator emits.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Generates the layout.
    ///
    /// The spec is expected to have passed validation; the computation
    /// itself cannot fail.
    #[must_use]
    pub fn generate(&self, spec: &CapacitorSpec) -> LayoutResult {
        let ctw = spec.connecting_track_width();
        let total_height = spec.total_height();
        let finger_length = spec.finger_length();
        let total_width = spec.total_width();

        tracing::debug!(
            module = %spec.module_name,
            kind = %self.kind,
            total_width,
            total_height,
            finger_length,
            connecting_track_width = ctw,
            "Resolved capacitor dimensions"
        );

        let mut primitives = Vec::with_capacity(spec.num_fingers.min(MAX_FINGERS) as usize + 2);

        let track_size = Size::new(ctw, total_height);
        primitives.push(self.primitive(
            spec,
            Role::ConnectingTrack,
            Terminal::One,
            Point::new(ctw / 2.0, total_height / 2.0),
            track_size,
        ));
        primitives.push(self.primitive(
            spec,
            Role::ConnectingTrack,
            Terminal::Two,
            Point::new(total_width - ctw / 2.0, total_height / 2.0),
            track_size,
        ));

        let finger_size = Size::new(finger_length, spec.track_width);
        let pitch = spec.track_width + spec.gap;
        for n in 0..spec.num_fingers {
            let left = ctw + f64::from(n % 2) * spec.gap;
            let top = f64::from(n) * pitch;
            primitives.push(self.primitive(
                spec,
                Role::Finger,
                Terminal::for_finger(n),
                Point::new(left + finger_length / 2.0, top + spec.track_width / 2.0),
                finger_size,
            ));
        }

        LayoutResult {
            kind: self.kind,
            primitives,
            total_width,
            total_height,
            finger_length,
            connecting_track_width: ctw,
        }
    }

    fn primitive(
        &self,
        spec: &CapacitorSpec,
        role: Role,
        terminal: Terminal,
        centre: Point,
        size: Size,
    ) -> Primitive {
        Primitive {
            kind: self.kind,
            role,
            terminal,
            centre,
            size,
            layer: spec.layer.clone(),
        }
    }
}
