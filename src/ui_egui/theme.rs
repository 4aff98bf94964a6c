//! Theme module for the availability grid
//!
//! Colors for editor cells, drag previews, the completion pulse and the
//! heatmap brackets, plus conversion helpers between `egui::Color32` and
//! hex strings.

use egui::Color32;

use crate::services::heatmap::HeatLevel;

/// All colors used when painting the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    pub app_background: Color32,
    pub cell_background: Color32,
    pub cell_selected: Color32,
    /// Cells outside the event's time window
    pub cell_disabled: Color32,
    pub quarter_border: Color32,
    pub hour_border: Color32,

    /// Drag preview while painting
    pub drag_select: Color32,
    /// Drag preview while erasing
    pub drag_deselect: Color32,
    /// Outline flashed around a completed hour block
    pub pulse: Color32,

    /// Base color the heat brackets are blended from
    pub heat_base: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl GridTheme {
    /// Create the default Light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            cell_background: Color32::from_rgb(255, 255, 255),
            cell_selected: Color32::from_rgb(20, 20, 20),
            cell_disabled: Color32::from_rgb(225, 225, 225),
            quarter_border: Color32::from_rgb(235, 235, 235),
            hour_border: Color32::from_rgb(200, 200, 200),
            drag_select: Color32::from_rgb(120, 120, 120),
            drag_deselect: Color32::from_rgb(240, 200, 200),
            pulse: Color32::from_rgb(100, 150, 255),
            heat_base: Color32::from_rgb(37, 99, 235),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    /// Create the default Dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            cell_background: Color32::from_rgb(40, 40, 40),
            cell_selected: Color32::from_rgb(235, 235, 235),
            cell_disabled: Color32::from_rgb(55, 55, 55),
            quarter_border: Color32::from_rgb(50, 50, 50),
            hour_border: Color32::from_rgb(70, 70, 70),
            drag_select: Color32::from_rgb(150, 150, 150),
            drag_deselect: Color32::from_rgb(110, 60, 60),
            pulse: Color32::from_rgb(100, 150, 255),
            heat_base: Color32::from_rgb(96, 165, 250),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    /// Fill for a read-only heatmap cell
    pub fn heat_color(&self, level: HeatLevel) -> Color32 {
        let strength = match level {
            HeatLevel::Empty => return self.cell_disabled,
            HeatLevel::Available => return self.cell_selected,
            HeatLevel::Low => 0.2,
            HeatLevel::Medium => 0.4,
            HeatLevel::High => 0.6,
            HeatLevel::VeryHigh => 0.8,
            HeatLevel::Full => 1.0,
        };
        blend(self.cell_background, self.heat_base, strength)
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }

    /// Convert Color32 to hex string for display
    pub fn color_to_hex(color: Color32) -> String {
        format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
    }

    /// Parse hex string to Color32
    pub fn hex_to_color(hex: &str) -> Result<Color32, String> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex color must be 6 characters".to_string());
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;

        Ok(Color32::from_rgb(r, g, b))
    }
}

impl Default for GridTheme {
    fn default() -> Self {
        Self::light()
    }
}

fn blend(from: Color32, to: Color32, t: f32) -> Color32 {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
}
