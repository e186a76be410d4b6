//! Meter diagram renderer.
//!
//! Owns one canvas per scenario and walks a linear lifecycle: construct
//! (pole backdrop + ground line), render wet or dry, save. Every vertical
//! placement funnels through [`Calibration::elevation_to_row_norm`], so the
//! level lines, labels, sprites and connector all share one scale.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut, draw_text_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::path::Path;
use tracing::{debug, info};

use crate::calibration::Calibration;
use crate::error::{DiagramError, DiagramResult};
use crate::sprite::{Anchor, Coords, Sprite};
use crate::style::{hex_to_rgba, DiagramStyle};

/// Embedded font data - DejaVu Sans Mono (a clean, readable monospace font)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Connector shaft width in pixels
const CONNECTOR_WIDTH: u32 = 3;
/// Arrowhead half-width / height in pixels
const ARROW_HALF_WIDTH: i32 = 8;
const ARROW_HEIGHT: i32 = 12;

/// Format a signed elevation annotation, e.g. `FLOOD=+205.40m.`.
pub fn format_level_label(label: &str, level_m: f64) -> String {
    format!("{label}={level_m:+.2}m.")
}

/// Line and sprite colors resolved from the style's hex strings.
#[derive(Debug, Clone, Copy)]
struct Palette {
    dtm: Rgba<u8>,
    pea_wet: Rgba<u8>,
    pea_dry: Rgba<u8>,
    flood: Rgba<u8>,
    connector: Rgba<u8>,
}

impl Palette {
    fn from_style(style: &DiagramStyle) -> DiagramResult<Self> {
        Ok(Self {
            dtm: parse_color(&style.dtm_color)?,
            pea_wet: parse_color(&style.pea_wet_color)?,
            pea_dry: parse_color(&style.pea_dry_color)?,
            flood: parse_color(&style.flood_color)?,
            connector: parse_color(&style.connector_color)?,
        })
    }
}

fn parse_color(hex: &str) -> DiagramResult<Rgba<u8>> {
    hex_to_rgba(hex).ok_or_else(|| DiagramError::Style(format!("invalid hex color '{hex}'")))
}

/// One pole-mounted meter diagram for a single ground elevation.
///
/// Construction draws the pole backdrop and the DTM reference line; a
/// subsequent [`MeterDiagram::render_wet`] or [`MeterDiagram::render_dry`]
/// call annotates the scenario, and [`MeterDiagram::save`] encodes the
/// canvas to PNG. Each instance is meant to be rendered exactly once.
#[derive(Debug)]
pub struct MeterDiagram {
    canvas: RgbaImage,
    calibration: Calibration,
    style: DiagramStyle,
    palette: Palette,
    font: Font<'static>,
    dtm: f64,
    msl: f64,
    green_meter: Sprite,
    red_meter: Sprite,
}

impl MeterDiagram {
    /// Build a diagram for the given ground elevation.
    ///
    /// Allocates the white canvas, pastes the pole backdrop centered on it,
    /// loads and scales the meter sprites, and plots the DTM reference line.
    pub fn new(dtm: f64, style: DiagramStyle) -> DiagramResult<Self> {
        let font = Font::try_from_bytes(FONT_DATA).ok_or_else(|| {
            DiagramError::FontLoad("embedded DejaVuSansMono is not a valid TrueType font".into())
        })?;

        let palette = Palette::from_style(&style)?;
        let calibration = Calibration::new(&style);
        let msl = dtm + style.install_height_m;

        let mut canvas = RgbaImage::from_pixel(
            style.canvas_width,
            style.canvas_height,
            Rgba([255, 255, 255, 255]),
        );

        let pole = Sprite::load(style.asset_dir.join(&style.pole_sprite))?;
        pole.paste(&mut canvas, 0.5, 0.5, Coords::Normalized, Anchor::Centroid);

        let mut green_meter = Sprite::load(style.asset_dir.join(&style.green_meter_sprite))?;
        green_meter.resize(style.sprite_scale)?;

        let mut red_meter = Sprite::load(style.asset_dir.join(&style.red_meter_sprite))?;
        red_meter.resize(style.sprite_scale)?;

        debug!(dtm, msl, "Constructed meter diagram");

        let mut diagram = Self {
            canvas,
            calibration,
            style,
            palette,
            font,
            dtm,
            msl,
            green_meter,
            red_meter,
        };

        let dtm_color = diagram.palette.dtm;
        diagram.plot_level("DTM", dtm, dtm_color);

        Ok(diagram)
    }

    /// Ground elevation this diagram was constructed with.
    pub fn dtm(&self) -> f64 {
        self.dtm
    }

    /// Installation elevation (`dtm + install_height_m`).
    pub fn msl(&self) -> f64 {
        self.msl
    }

    /// The elevation-to-row mapping in use.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// The rendered canvas.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Draw a horizontal reference line and label for an elevation.
    ///
    /// Returns the pixel row (for connector drawing) and the normalized row
    /// (for sprite placement).
    pub fn plot_level(&mut self, label: &str, level_m: f64, color: Rgba<u8>) -> (i32, f64) {
        let row_norm = self.calibration.elevation_to_row_norm(self.dtm, level_m);
        let row_px = (row_norm * self.canvas.height() as f64) as i32;

        if self.style.line_width > 0 {
            let span = (self.style.line_right_px - self.style.line_left_px).max(1) as u32;
            let top = row_px - (self.style.line_width / 2) as i32;
            let rect = Rect::at(self.style.line_left_px, top).of_size(span, self.style.line_width);
            draw_filled_rect_mut(&mut self.canvas, rect, color);
        }

        let text = format_level_label(label, level_m);
        draw_text_mut(
            &mut self.canvas,
            color,
            self.style.line_left_px,
            row_px,
            Scale::uniform(self.style.font_size),
            &self.font,
            &text,
        );

        debug!(label, level_m, row_px, row_norm, "Plotted level");
        (row_px, row_norm)
    }

    /// Annotate the submerged scenario.
    ///
    /// Requires the flood level at or above the installation elevation.
    /// Draws the installation line in red with the red meter, the flood line
    /// in blue with the green meter, and a connector arrow labeled with the
    /// signed elevation difference.
    pub fn render_wet(&mut self, flood_level: f64) -> DiagramResult<()> {
        if flood_level < self.msl {
            return Err(DiagramError::Precondition(format!(
                "wet scenario requires flood level >= installation elevation \
                 (flood={flood_level:.2}m, installation={:.2}m)",
                self.msl
            )));
        }

        let pea_color = self.palette.pea_wet;
        let (pea_px, pea_norm) = self.plot_level("PEA", self.msl, pea_color);
        self.red_meter.paste(
            &mut self.canvas,
            self.style.sprite_column,
            pea_norm,
            Coords::Normalized,
            Anchor::Centroid,
        );

        let flood_color = self.palette.flood;
        let (flood_px, flood_norm) = self.plot_level("FLOOD", flood_level, flood_color);
        self.green_meter.paste(
            &mut self.canvas,
            self.style.sprite_column,
            flood_norm,
            Coords::Normalized,
            Anchor::Centroid,
        );

        self.draw_connector(pea_px, flood_px, flood_level);

        info!(
            dtm = self.dtm,
            flood_level,
            depth_m = flood_level - self.msl,
            "Rendered wet scenario"
        );
        Ok(())
    }

    /// Annotate the dry scenario.
    ///
    /// Requires the flood level at or below the installation elevation.
    /// Draws the installation line in green with the green meter and the
    /// flood line in blue. No connector is drawn.
    pub fn render_dry(&mut self, flood_level: f64) -> DiagramResult<()> {
        if flood_level > self.msl {
            return Err(DiagramError::Precondition(format!(
                "dry scenario requires flood level <= installation elevation \
                 (flood={flood_level:.2}m, installation={:.2}m)",
                self.msl
            )));
        }

        let pea_color = self.palette.pea_dry;
        let (_, pea_norm) = self.plot_level("PEA", self.msl, pea_color);
        self.green_meter.paste(
            &mut self.canvas,
            self.style.sprite_column,
            pea_norm,
            Coords::Normalized,
            Anchor::Centroid,
        );

        let flood_color = self.palette.flood;
        self.plot_level("FLOOD", flood_level, flood_color);

        info!(
            dtm = self.dtm,
            flood_level,
            clearance_m = self.msl - flood_level,
            "Rendered dry scenario"
        );
        Ok(())
    }

    /// Encode the canvas to a raster file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> DiagramResult<()> {
        let path = path.as_ref();
        self.canvas.save(path)?;
        info!(path = %path.display(), "Saved diagram");
        Ok(())
    }

    /// Vertical connector between the installation and flood rows, with an
    /// arrowhead at the flood end and the signed elevation difference at the
    /// midpoint.
    fn draw_connector(&mut self, pea_px: i32, flood_px: i32, flood_level: f64) {
        let color = self.palette.connector;
        let x = (self.style.sprite_column * self.canvas.width() as f64) as i32;

        let top = flood_px.min(pea_px);
        let height = pea_px.abs_diff(flood_px);
        if height == 0 {
            // flood exactly at the installation; nothing to span
            return;
        }

        let shaft = Rect::at(x - (CONNECTOR_WIDTH / 2) as i32, top).of_size(CONNECTOR_WIDTH, height);
        draw_filled_rect_mut(&mut self.canvas, shaft, color);

        // arrowhead at the flood end, apex on the flood row pointing down
        let head = [
            Point::new(x - ARROW_HALF_WIDTH, flood_px - ARROW_HEIGHT),
            Point::new(x + ARROW_HALF_WIDTH, flood_px - ARROW_HEIGHT),
            Point::new(x, flood_px),
        ];
        draw_polygon_mut(&mut self.canvas, &head, color);

        // midpoint through the elevation mapping, which coincides with the
        // pixel average because the mapping is affine
        let mid_level = (self.msl + flood_level) / 2.0;
        let mid_norm = self.calibration.elevation_to_row_norm(self.dtm, mid_level);
        let mid_px = (mid_norm * self.canvas.height() as f64) as i32;

        let text = format_level_label("UP", flood_level - self.msl);
        draw_text_mut(
            &mut self.canvas,
            color,
            x + ARROW_HALF_WIDTH + 2,
            mid_px,
            Scale::uniform(self.style.font_size),
            &self.font,
            &text,
        );
    }
}
