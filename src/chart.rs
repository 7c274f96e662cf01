//! Environmental Factor Chart
//!
//! The seven request values shown next to a recommendation: Nitrogen,
//! Phosphorous, Potassium, Temperature, Humidity, pH, Moisture. Rendered as
//! a dark-themed SVG scatter (marker area grows with the value, one color per
//! factor) or as a plain-text bar summary for the terminal.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::PredictionRequest;

pub const CHART_TITLE: &str = "Environmental Factors for Crop & Fertilizer Selection";

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 500.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 80.0;
const MARGIN_LEFT: f64 = 80.0;

const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 30.0;

const COLOR_BACKGROUND: &str = "#111111";
const COLOR_GRID: &str = "#283442";
const COLOR_AXIS: &str = "#506784";
const COLOR_TEXT: &str = "#f2f5fa";

const FACTOR_COLORS: [&str; 7] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692",
];

const TEXT_BAR_WIDTH: usize = 40;

/// One plotted factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorChart {
    pub title: String,
    pub factors: Vec<Factor>,
}

impl FactorChart {
    /// Factors of a request, in display order (rainfall is not plotted)
    pub fn from_request(request: &PredictionRequest) -> Self {
        let factors = [
            ("Nitrogen", request.nitrogen as f64),
            ("Phosphorous", request.phosphorous as f64),
            ("Potassium", request.potassium as f64),
            ("Temperature", request.temperature),
            ("Humidity", request.humidity),
            ("pH", request.ph),
            ("Moisture", request.moisture),
        ]
        .into_iter()
        .map(|(name, value)| Factor { name: name.to_string(), value })
        .collect();

        Self {
            title: CHART_TITLE.to_string(),
            factors,
        }
    }

    fn max_value(&self) -> f64 {
        self.factors.iter().map(|f| f.value).fold(0.0f64, f64::max)
    }

    /// Standalone SVG document
    pub fn to_svg(&self) -> String {
        let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        // Round the axis up to the next multiple of 10
        let y_max = ((self.max_value() / 10.0).ceil() * 10.0).max(10.0);
        let slot = plot_width / self.factors.len().max(1) as f64;

        let mut svg = String::new();

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
        ));

        svg.push_str(&format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            CHART_WIDTH, CHART_HEIGHT, COLOR_BACKGROUND
        ));

        svg.push_str(&format!(
            r#"<text x="{}" y="35" text-anchor="middle" font-family="Arial, sans-serif" font-size="18" font-weight="bold" fill="{}">{}</text>"#,
            CHART_WIDTH / 2.0, COLOR_TEXT, escape_xml(&self.title)
        ));

        // Grid lines
        for i in 0..=5 {
            let y = MARGIN_TOP + plot_height - (i as f64 / 5.0) * plot_height;
            let value = (i as f64 / 5.0) * y_max;

            svg.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
                MARGIN_LEFT, y, MARGIN_LEFT + plot_width, y, COLOR_GRID
            ));

            svg.push_str(&format!(
                r#"<text x="{}" y="{}" text-anchor="end" font-family="Arial, sans-serif" font-size="12" fill="{}">{:.0}</text>"#,
                MARGIN_LEFT - 10.0, y + 4.0, COLOR_TEXT, value
            ));
        }

        // X axis
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
            MARGIN_LEFT, MARGIN_TOP + plot_height, MARGIN_LEFT + plot_width, MARGIN_TOP + plot_height, COLOR_AXIS
        ));

        // Axis labels
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="{}">Factors</text>"#,
            MARGIN_LEFT + plot_width / 2.0, CHART_HEIGHT - 20.0, COLOR_TEXT
        ));
        svg.push_str(&format!(
            r#"<text x="20" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="{}" transform="rotate(-90 20 {})">Values</text>"#,
            CHART_HEIGHT / 2.0, COLOR_TEXT, CHART_HEIGHT / 2.0
        ));

        // Markers
        for (i, factor) in self.factors.iter().enumerate() {
            let cx = MARGIN_LEFT + slot * (i as f64 + 0.5);
            let cy = MARGIN_TOP + plot_height - (factor.value.max(0.0) / y_max) * plot_height;
            let radius = marker_radius(factor.value, y_max);
            let color = FACTOR_COLORS[i % FACTOR_COLORS.len()];

            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" fill-opacity="0.8" stroke="{}" stroke-width="1"><title>{}: {}</title></circle>"#,
                cx, cy, radius, color, COLOR_TEXT, escape_xml(&factor.name), factor.value
            ));

            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="11" fill="{}">{}</text>"#,
                cx, MARGIN_TOP + plot_height + 25.0, COLOR_TEXT, escape_xml(&factor.name)
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    pub fn write_svg(&self, output_path: &Path) -> std::io::Result<()> {
        fs::write(output_path, self.to_svg())
    }

    /// Terminal summary, one bar per factor scaled to the largest value
    pub fn to_text(&self) -> String {
        let max = self.max_value();
        let name_width = self.factors.iter().map(|f| f.name.len()).max().unwrap_or(0);

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');

        for factor in &self.factors {
            let filled = if max > 0.0 {
                ((factor.value.max(0.0) / max) * TEXT_BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            out.push_str(&format!(
                "  {:<width$}  {:<bar$}  {}\n",
                factor.name,
                "█".repeat(filled),
                factor.value,
                width = name_width,
                bar = TEXT_BAR_WIDTH,
            ));
        }

        out
    }
}

/// Marker radius with area proportional to the value
fn marker_radius(value: f64, y_max: f64) -> f64 {
    let fraction = (value.max(0.0) / y_max).clamp(0.0, 1.0);
    MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * fraction.sqrt()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
