// Tunable constants for the particle field. Defaults match the hero background.

use crate::color::{studio_palette, Color};
use crate::error::{FieldError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub palette: Vec<Color>,
    /// Per-axis speed bound, velocity components fall in [-max_speed, max_speed]
    pub max_speed: f64,
    pub radius: (f64, f64),
    pub opacity: (f64, f64),
    /// Threshold distance below which two particles get a connecting line
    pub link_distance: f64,
    pub link_opacity_scale: f64,
    pub link_width: f64,
}

impl FieldConfig {
    pub const DEFAULT_COUNT: usize = 50;

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_radius(mut self, low: f64, high: f64) -> Self {
        self.radius = (low, high);
        self
    }

    pub fn with_opacity(mut self, low: f64, high: f64) -> Self {
        self.opacity = (low, high);
        self
    }

    pub fn with_link_distance(mut self, link_distance: f64) -> Self {
        self.link_distance = link_distance;
        self
    }

    pub fn with_link_opacity_scale(mut self, scale: f64) -> Self {
        self.link_opacity_scale = scale;
        self
    }

    pub fn with_link_width(mut self, width: f64) -> Self {
        self.link_width = width;
        self
    }

    /// Replaces the palette with colours parsed from a comma separated list
    /// of css hex strings, e.g. `"#8B5CF6, #06B6D4"`
    pub fn with_hex_palette(self, palette: &str) -> Result<Self> {
        let colors = palette
            .split(',')
            .map(str::trim)
            .filter(|hex| !hex.is_empty())
            .map(Color::from_hex)
            .collect::<Result<Vec<Color>>>()?;
        Ok(self.with_palette(colors))
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        check_range("radius", self.radius)?;
        check_range("opacity", self.opacity)?;
        if self.opacity.0 < 0.0 || self.opacity.1 > 1.0 {
            return Err(FieldError::InvalidRange {
                name: "opacity",
                low: self.opacity.0,
                high: self.opacity.1,
            });
        }
        if self.radius.0 < 0.0 {
            return Err(FieldError::InvalidValue {
                name: "radius",
                value: self.radius.0,
            });
        }
        check_value("max_speed", self.max_speed, |v| v >= 0.0)?;
        check_value("link_distance", self.link_distance, |v| v > 0.0)?;
        check_value("link_opacity_scale", self.link_opacity_scale, |v| v <= 1.0 && v >= 0.0)?;
        check_value("link_width", self.link_width, |v| v > 0.0)?;
        Ok(())
    }
}

// Non-finite values never pass, an infinite speed or distance turns the field into NaN
fn check_value(name: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<()> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidValue { name, value })
    }
}

fn check_range(name: &'static str, (low, high): (f64, f64)) -> Result<()> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(FieldError::InvalidRange { name, low, high })
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            count: FieldConfig::DEFAULT_COUNT,
            palette: studio_palette(),
            max_speed: 0.25,
            radius: (1.0, 4.0),
            opacity: (0.2, 0.7),
            link_distance: 100.0,
            link_opacity_scale: 0.2,
            link_width: 0.5,
        }
    }
}
