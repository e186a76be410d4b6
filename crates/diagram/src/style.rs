//! Style configuration for diagram rendering.
//!
//! The original tool existed as several near-identical script revisions that
//! differed only in calibration constants and placement tweaks. All of those
//! knobs live here instead, so one renderer serves every variant.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DiagramError, DiagramResult};

/// Diagram style loaded from JSON (or built from `Default`).
///
/// Defaults reproduce the reference diagram: a 427x1260 canvas calibrated so
/// the pole bottom sits at 87.5% of the canvas height and the pole top at
/// 4.0%, with a 12 m pole and the meter installed 1.75 m above ground.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagramStyle {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Physical pole length in meters
    pub pole_length_m: f64,
    /// Meter installation height above ground in meters
    pub install_height_m: f64,
    /// Normalized canvas row where the pole bottom maps to
    pub canvas_lower: f64,
    /// Normalized canvas row where the pole top maps to
    pub canvas_upper: f64,
    /// Normalized x column where meter sprites are centered
    pub sprite_column: f64,
    /// Scale factor applied to the meter sprites
    pub sprite_scale: f32,
    /// Width of level reference lines in pixels
    pub line_width: u32,
    /// Left margin of level reference lines in pixels
    pub line_left_px: i32,
    /// Right extent of level reference lines in pixels
    pub line_right_px: i32,
    /// Font size for level labels
    pub font_size: f32,
    /// Directory holding the sprite assets
    pub asset_dir: PathBuf,
    /// Pole backdrop sprite file name
    pub pole_sprite: String,
    /// Gray pole backdrop variant file name
    pub pole_sprite_gray: String,
    /// Green (dry) meter sprite file name
    pub green_meter_sprite: String,
    /// Red (submerged) meter sprite file name
    pub red_meter_sprite: String,
    /// Ground elevation line color (hex)
    pub dtm_color: String,
    /// Installation line color in the wet scenario (hex)
    pub pea_wet_color: String,
    /// Installation line color in the dry scenario (hex)
    pub pea_dry_color: String,
    /// Flood level line color (hex)
    pub flood_color: String,
    /// Connector arrow color (hex)
    pub connector_color: String,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            canvas_width: 427,
            canvas_height: 1260,
            pole_length_m: 12.0,
            install_height_m: 1.75,
            canvas_lower: 0.875,
            canvas_upper: 0.040,
            sprite_column: 0.55,
            sprite_scale: 0.15,
            line_width: 5,
            line_left_px: 10,
            line_right_px: 250,
            font_size: 32.0,
            asset_dir: PathBuf::from("pics"),
            pole_sprite: "PEA_Pole.png".to_string(),
            pole_sprite_gray: "PEA_Pole_GRAY.png".to_string(),
            green_meter_sprite: "WattHourMeter_GREEN.png".to_string(),
            red_meter_sprite: "WattHourMeter_RED.png".to_string(),
            dtm_color: "#8B4513".to_string(),
            pea_wet_color: "#FF0000".to_string(),
            pea_dry_color: "#008000".to_string(),
            flood_color: "#0000FF".to_string(),
            connector_color: "#00C000".to_string(),
        }
    }
}

impl DiagramStyle {
    /// Load style configuration from a JSON string.
    ///
    /// Missing fields fall back to the defaults above.
    pub fn from_json(json_str: &str) -> DiagramResult<Self> {
        serde_json::from_str(json_str).map_err(|e| DiagramError::Style(e.to_string()))
    }

    /// Load style configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> DiagramResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Parse a `#RRGGBB` hex color string to opaque RGBA.
pub fn hex_to_rgba(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Rgba([r, g, b, 255]))
}
