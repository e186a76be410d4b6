//! Vertical calibration: mapping physical elevations to canvas rows.

use crate::style::DiagramStyle;

/// Affine mapping from elevation in meters to normalized canvas rows.
///
/// The two calibration fractions mark where the pole bottom and top map to
/// on the canvas; dividing their span by the pole's physical length gives the
/// normalized-row change per meter of elevation. Every vertical placement in
/// a diagram (lines, labels, sprites, connector endpoints) goes through
/// [`Calibration::elevation_to_row_norm`] so all markings share one scale.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    canvas_lower: f64,
    norm_per_meter: f64,
}

impl Calibration {
    /// Derive the mapping from a style's calibration constants.
    pub fn new(style: &DiagramStyle) -> Self {
        let norm_per_meter = (style.canvas_lower - style.canvas_upper) / style.pole_length_m;
        Self {
            canvas_lower: style.canvas_lower,
            norm_per_meter,
        }
    }

    /// Normalized-row change per meter of elevation.
    pub fn norm_per_meter(&self) -> f64 {
        self.norm_per_meter
    }

    /// Map an elevation to a normalized canvas row (0 = top, 1 = bottom).
    ///
    /// Strictly decreasing in `level_m`: canvas rows grow downward, so a
    /// higher elevation yields a smaller row fraction. Ground level
    /// (`level_m == dtm`) maps exactly to the lower calibration fraction.
    pub fn elevation_to_row_norm(&self, dtm: f64, level_m: f64) -> f64 {
        self.canvas_lower - self.norm_per_meter * (level_m - dtm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_per_meter_from_defaults() {
        let cal = Calibration::new(&DiagramStyle::default());
        let expected = (0.875 - 0.040) / 12.0;
        assert!((cal.norm_per_meter() - expected).abs() < 1e-12);
        assert!(cal.norm_per_meter() > 0.0);
    }

    #[test]
    fn test_ground_level_maps_to_lower_fraction() {
        let cal = Calibration::new(&DiagramStyle::default());
        assert_eq!(cal.elevation_to_row_norm(200.0, 200.0), 0.875);
        assert_eq!(cal.elevation_to_row_norm(-15.0, -15.0), 0.875);
    }

    #[test]
    fn test_mapping_strictly_decreasing() {
        let cal = Calibration::new(&DiagramStyle::default());
        let dtm = 200.0;
        let mut prev = cal.elevation_to_row_norm(dtm, dtm - 3.0);
        let mut level = dtm - 2.75;
        while level <= dtm + 12.0 {
            let row = cal.elevation_to_row_norm(dtm, level);
            assert!(row < prev, "row must shrink as elevation rises");
            prev = row;
            level += 0.25;
        }
    }

    #[test]
    fn test_pole_top_maps_to_upper_fraction() {
        let cal = Calibration::new(&DiagramStyle::default());
        let row = cal.elevation_to_row_norm(200.0, 212.0);
        assert!((row - 0.040).abs() < 1e-12);
    }
}
