//! SVG moon icons.
//!
//! The lit part of the disc is drawn as an ellipse clipped to the disc. The
//! ellipse narrows toward new moon and is pushed to one side so its edge,
//! the terminator, sweeps across the face as the cycle advances.
//!
//! Definition ids inside each document are derived from the caller's scope
//! and a digest of the inputs, so several icons can share a page and the
//! same inputs always produce the same bytes.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::MoonError;

pub const DEFAULT_ICON_SIZE: f64 = 120.0;

/// Horizontal offset of the terminator ellipse, as a fraction of the radius.
const TERMINATOR_SHIFT: f64 = 0.65;

const DARK_FILL: &str = "#1d2230";
const LIT_FILL: &str = "#f3efd9";
const LIT_EDGE: &str = "#d8d2b4";
const OUTLINE: &str = "#6b7080";

/// Side length of a square icon, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSize(f64);

impl IconSize {
    pub fn new(size: f64) -> Result<Self, MoonError> {
        if size.is_finite() && size > 0.0 {
            Ok(Self(size))
        } else {
            Err(MoonError::InvalidIconSize(size))
        }
    }

    /// Falls back to the default for missing or unusable sizes.
    pub fn or_default(size: Option<f64>) -> Self {
        size.and_then(|s| Self::new(s).ok()).unwrap_or_default()
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for IconSize {
    fn default() -> Self {
        Self(DEFAULT_ICON_SIZE)
    }
}

/// Scoped, content-derived identifier for the definitions of one icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconId(String);

impl IconId {
    pub fn new(scope: &str, phase_fraction: f64, size: IconSize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(scope.as_bytes());
        hasher.update(phase_fraction.to_bits().to_le_bytes());
        hasher.update(size.get().to_bits().to_le_bytes());
        let digest = hasher.finalize();
        Self(format!("moon-{}-{}", scope, hex::encode(&digest[..8])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered icon: its id and the complete SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoonIcon {
    pub id: IconId,
    pub svg: String,
}

impl MoonIcon {
    /// URI under which the image loader caches this document.
    pub fn uri(&self) -> String {
        format!("bytes://{}.svg", self.id)
    }
}

/// Where the terminator ellipse sits for a given phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terminator {
    /// `2p - 1`, in `[-1, 1)`.
    pub signed_position: f64,
    /// Horizontal scale of the ellipse, `1 - |x|`.
    pub horizontal_scale: f64,
    /// +1 on the second half of the cycle, -1 on the first.
    pub direction: f64,
    /// Horizontal offset of the ellipse centre, in pixels.
    pub horizontal_shift: f64,
}

impl Terminator {
    pub fn new(phase_fraction: f64, radius: f64) -> Self {
        let signed_position = 2.0 * phase_fraction - 1.0;
        let horizontal_scale = 1.0 - signed_position.abs();
        let direction = if signed_position >= 0.0 { 1.0 } else { -1.0 };
        Self {
            signed_position,
            horizontal_scale,
            direction,
            horizontal_shift: direction * radius * TERMINATOR_SHIFT,
        }
    }
}

/// Builds the SVG for `phase_fraction`, scoping its ids under `scope`.
pub fn build_icon(phase_fraction: f64, size: IconSize, scope: &str) -> MoonIcon {
    let id = IconId::new(scope, phase_fraction, size);
    let s = num(size.get());
    let centre = size.get() / 2.0;
    // inset one pixel so the outline stroke is not clipped
    let radius = (centre - 1.0).max(size.get() / 4.0);
    let terminator = Terminator::new(phase_fraction, radius);
    let (c, r) = (num(centre), num(radius));

    let mut svg = String::with_capacity(768);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#
    ));
    svg.push_str(&format!(
        concat!(
            r#"<defs>"#,
            r#"<clipPath id="{id}-disc"><circle cx="{c}" cy="{c}" r="{r}"/></clipPath>"#,
            r#"<radialGradient id="{id}-glow" cx="0.4" cy="0.4" r="0.7">"#,
            r#"<stop offset="0" stop-color="{lit}"/><stop offset="1" stop-color="{edge}"/>"#,
            r#"</radialGradient>"#,
            r#"</defs>"#,
        ),
        id = id,
        c = c,
        r = r,
        lit = LIT_FILL,
        edge = LIT_EDGE,
    ));
    svg.push_str(&format!(
        r#"<circle cx="{c}" cy="{c}" r="{r}" fill="{DARK_FILL}"/>"#
    ));
    svg.push_str(&format!(
        r#"<ellipse cx="{ex}" cy="{c}" rx="{rx}" ry="{r}" fill="url(#{id}-glow)" clip-path="url(#{id}-disc)"/>"#,
        ex = num(centre + terminator.horizontal_shift),
        rx = num(radius * terminator.horizontal_scale),
    ));
    svg.push_str(&format!(
        r#"<circle cx="{c}" cy="{c}" r="{r}" fill="none" stroke="{OUTLINE}" stroke-width="1"/>"#
    ));
    svg.push_str("</svg>");

    MoonIcon { id, svg }
}

/// Fixed three-decimal rendering with trailing zeros dropped.
fn num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
