//! # Layout Fit
//!
//! Placement geometry for the live preview and the print file: where the
//! artwork sits inside the banner, where the grommets go, and what DPI the
//! artwork prints at.
//!
//! ## Fit Modes
//! ```text
//! banner 48" × 24" (2:1), artwork 1000 × 1000 px (1:1)
//!
//!    contain               cover                 stretch
//! ┌────┬────┬────┐     ┌──────────────┐ ▲     ┌──────────────┐
//! │    │ ## │    │     │##############│ │     │##############│
//! │    │ ## │    │     │##############│ 48"   │##############│
//! │    │ ## │    │     │##############│ │     │##############│
//! └────┴────┴────┘     └──────────────┘ ▼     └──────────────┘
//!  24×24 at (12,0)      48×48 at (0,−12)       48×24 at (0,0)
//!  letterboxed          cropped by renderer    distorted
//! ```
//!
//! All rectangles are in inches, the banner's own unit. Inputs must be
//! strictly positive; callers validate before calling.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::Grommets;

/// Screen DPI used when converting inches to preview pixels.
pub const DEFAULT_DPI: f64 = 96.0;

/// Grommets sit this far in from each edge.
pub const GROMMET_INSET_IN: f64 = 1.0;

// =============================================================================
// Fit Mode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Whole artwork visible, letterboxed.
    #[default]
    Contain,
    /// Banner filled, overflow cropped.
    Cover,
    /// Banner filled, aspect ratio ignored.
    Stretch,
}

impl FitMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FitMode::Contain => "contain",
            FitMode::Cover => "cover",
            FitMode::Stretch => "stretch",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "contain" => Ok(FitMode::Contain),
            "cover" => Ok(FitMode::Cover),
            "stretch" => Ok(FitMode::Stretch),
            other => Err(CoreError::UnknownFitMode(other.to_string())),
        }
    }
}

// =============================================================================
// Geometry Types
// =============================================================================

/// Width and height. Inches for banners, pixels for artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Artwork placement inside the banner. Offsets may be negative under
/// [`FitMode::Cover`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FitRect {
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

// =============================================================================
// Fit
// =============================================================================

/// Computes where artwork of `artwork_px` lands on a banner of `banner_in`.
///
/// `contain` matches the width when the artwork is relatively wider than
/// the banner, otherwise the height. `cover` does the opposite. Both are
/// centered.
///
/// ## Example
/// ```rust
/// use banner_core::layout::{fit_image, FitMode, FitRect, Size};
///
/// let rect = fit_image(Size::new(48.0, 24.0), Size::new(1000.0, 500.0), FitMode::Contain);
/// assert_eq!(rect, FitRect { x: 0.0, y: 0.0, width: 48.0, height: 24.0 });
/// ```
pub fn fit_image(banner_in: Size, artwork_px: Size, mode: FitMode) -> FitRect {
    let (bw, bh) = (banner_in.width, banner_in.height);

    if mode == FitMode::Stretch {
        return FitRect {
            x: 0.0,
            y: 0.0,
            width: bw,
            height: bh,
        };
    }

    let artwork_ratio = artwork_px.aspect_ratio();
    let artwork_wider = artwork_ratio > banner_in.aspect_ratio();
    let match_width = match mode {
        FitMode::Contain => artwork_wider,
        _ => !artwork_wider,
    };

    let (width, height) = if match_width {
        (bw, bw / artwork_ratio)
    } else {
        (bh * artwork_ratio, bh)
    };

    FitRect {
        x: (bw - width) / 2.0,
        y: (bh - height) / 2.0,
        width,
        height,
    }
}

// =============================================================================
// Grommet Placement
// =============================================================================

/// Evenly spaced points strictly between the two inset corners of an edge.
fn edge_midpoints(length: f64, inset: f64, spacing: f64) -> Vec<f64> {
    let usable = (length - 2.0 * inset).max(0.0);
    let count = (usable / spacing).floor() as usize;
    let step = usable / (count as f64 + 1.0);
    (0..count).map(|k| inset + (k as f64 + 1.0) * step).collect()
}

/// Grommet centers in inches from the top-left corner.
///
/// ## Placement
/// ```text
///  TL ●────●────● TR     corners inset 1" from each edge
///     │         │        spaced modes add evenly spaced points
///     ●         ●        on every edge between the corners
///     │         │
///  BL ●────●────● BR
/// ```
///
/// Points whose coordinates round to the same 0.01" collapse to the first
/// one placed.
pub fn grommet_positions(width_in: f64, height_in: f64, grommets: Grommets) -> Vec<Point> {
    let m = GROMMET_INSET_IN;
    let tl = Point::new(m, m);
    let tr = Point::new(width_in - m, m);
    let bl = Point::new(m, height_in - m);
    let br = Point::new(width_in - m, height_in - m);

    let points = match grommets {
        Grommets::None => Vec::new(),
        Grommets::FourCorners => vec![tl, tr, bl, br],
        Grommets::TopCorners => vec![tl, tr],
        Grommets::RightCorners => vec![tr, br],
        Grommets::LeftCorners => vec![tl, bl],
        Grommets::Every2To3Ft | Grommets::Every1To2Ft => {
            let spacing = grommets.spacing_in().unwrap_or(24.0);
            let mut pts = vec![tl, tr, bl, br];
            for x in edge_midpoints(width_in, m, spacing) {
                pts.push(Point::new(x, m));
                pts.push(Point::new(x, height_in - m));
            }
            for y in edge_midpoints(height_in, m, spacing) {
                pts.push(Point::new(m, y));
                pts.push(Point::new(width_in - m, y));
            }
            pts
        }
    };

    dedupe_points(points)
}

fn dedupe_points(points: Vec<Point>) -> Vec<Point> {
    let mut seen = HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(((p.x * 100.0).round() as i64, (p.y * 100.0).round() as i64)))
        .collect()
}

/// Preview marker radius in inches.
#[inline]
pub fn grommet_radius(width_in: f64, height_in: f64) -> f64 {
    (width_in.min(height_in) * 0.0075).max(0.15)
}

// =============================================================================
// Resolution
// =============================================================================

/// Print resolution of artwork stretched over the banner: the lower of the
/// horizontal and vertical pixels per inch.
///
/// ```rust
/// use banner_core::layout::{effective_dpi, Size};
///
/// let dpi = effective_dpi(Size::new(4800.0, 1200.0), Size::new(48.0, 24.0));
/// assert_eq!(dpi, 50.0);
/// ```
pub fn effective_dpi(artwork_px: Size, banner_in: Size) -> f64 {
    (artwork_px.width / banner_in.width).min(artwork_px.height / banner_in.height)
}

#[inline]
pub fn inches_to_px(inches: f64, dpi: f64) -> f64 {
    inches * dpi
}

#[inline]
pub fn px_to_inches(px: f64, dpi: f64) -> f64 {
    px / dpi
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: Size = Size::new(48.0, 24.0);

    #[test]
    fn test_fit_mode_parse() {
        assert_eq!("cover".parse::<FitMode>().unwrap(), FitMode::Cover);
        assert!(matches!(
            "fill".parse::<FitMode>(),
            Err(CoreError::UnknownFitMode(ref s)) if s == "fill"
        ));
        assert_eq!(serde_json::to_string(&FitMode::Stretch).unwrap(), "\"stretch\"");
    }

    #[test]
    fn test_stretch_ignores_aspect_ratio() {
        for artwork in [Size::new(10.0, 1000.0), Size::new(1000.0, 10.0), Size::new(3.0, 3.0)] {
            let rect = fit_image(BANNER, artwork, FitMode::Stretch);
            assert_eq!(
                rect,
                FitRect {
                    x: 0.0,
                    y: 0.0,
                    width: 48.0,
                    height: 24.0
                }
            );
        }
    }

    #[test]
    fn test_contain_matching_ratio_fills_exactly() {
        let rect = fit_image(BANNER, Size::new(1000.0, 500.0), FitMode::Contain);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 48.0);
        assert_eq!(rect.height, 24.0);
    }

    #[test]
    fn test_contain_and_cover_square_artwork() {
        let square = Size::new(1000.0, 1000.0);

        let contain = fit_image(BANNER, square, FitMode::Contain);
        assert_eq!((contain.x, contain.y, contain.width, contain.height), (12.0, 0.0, 24.0, 24.0));

        let cover = fit_image(BANNER, square, FitMode::Cover);
        assert_eq!((cover.x, cover.y, cover.width, cover.height), (0.0, -12.0, 48.0, 48.0));
    }

    #[test]
    fn test_contain_wide_artwork_letterboxes_vertically() {
        let rect = fit_image(BANNER, Size::new(4000.0, 1000.0), FitMode::Contain);
        assert_eq!(rect.width, 48.0);
        assert_eq!(rect.height, 12.0);
        assert_eq!(rect.y, 6.0);
    }

    #[test]
    fn test_cover_area_bounds_contain_area() {
        for artwork in [Size::new(1000.0, 1000.0), Size::new(4000.0, 1000.0), Size::new(640.0, 480.0)] {
            let contain = fit_image(BANNER, artwork, FitMode::Contain);
            let cover = fit_image(BANNER, artwork, FitMode::Cover);
            assert!(cover.area() >= BANNER.area());
            assert!(BANNER.area() >= contain.area());
        }
    }

    #[test]
    fn test_corner_grommets() {
        assert!(grommet_positions(48.0, 24.0, Grommets::None).is_empty());
        assert_eq!(
            grommet_positions(48.0, 24.0, Grommets::TopCorners),
            vec![Point::new(1.0, 1.0), Point::new(47.0, 1.0)]
        );
        assert_eq!(
            grommet_positions(48.0, 24.0, Grommets::RightCorners),
            vec![Point::new(47.0, 1.0), Point::new(47.0, 23.0)]
        );
        assert_eq!(
            grommet_positions(48.0, 24.0, Grommets::LeftCorners),
            vec![Point::new(1.0, 1.0), Point::new(1.0, 23.0)]
        );
        assert_eq!(grommet_positions(48.0, 24.0, Grommets::FourCorners).len(), 4);
    }

    #[test]
    fn test_spaced_grommets() {
        let pts = grommet_positions(48.0, 24.0, Grommets::Every2To3Ft);
        assert_eq!(pts.len(), 6);
        assert!(pts.contains(&Point::new(24.0, 1.0)));
        assert!(pts.contains(&Point::new(24.0, 23.0)));

        assert_eq!(grommet_positions(48.0, 24.0, Grommets::Every1To2Ft).len(), 10);
        assert!(grommet_positions(12.0, 12.0, Grommets::Every2To3Ft).len() >= 4);
    }

    #[test]
    fn test_tiny_banner_corners_collapse() {
        // 2" square: every corner lands on (1, 1)
        assert_eq!(grommet_positions(2.0, 2.0, Grommets::FourCorners), vec![Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_grommet_radius() {
        assert!((grommet_radius(48.0, 24.0) - 0.18).abs() < 1e-9);
        assert_eq!(grommet_radius(12.0, 12.0), 0.15);
    }

    #[test]
    fn test_dpi_helpers() {
        assert_eq!(effective_dpi(Size::new(4800.0, 2400.0), BANNER), 100.0);
        assert_eq!(inches_to_px(2.0, DEFAULT_DPI), 192.0);
        assert_eq!(px_to_inches(192.0, DEFAULT_DPI), 2.0);
    }

    #[test]
    fn test_dedupe_keys_on_hundredths() {
        // 0.996 and 1.004 both round to 1.00
        let merged = dedupe_points(vec![Point::new(1.004, 1.0), Point::new(0.996, 1.0)]);
        assert_eq!(merged, vec![Point::new(1.004, 1.0)]);

        // 1.004 and 1.006 are closer than 0.01" but round apart
        let kept = dedupe_points(vec![Point::new(1.004, 1.0), Point::new(1.006, 1.0)]);
        assert_eq!(kept.len(), 2);
    }
}
