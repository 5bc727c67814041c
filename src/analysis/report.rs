//! Analysis report and its HTML rendering
//!
//! The report carries the label, the metrics as integer percentages and the
//! recommendation list. `html` is the rendered results panel the page inserts
//! as-is.

use std::fmt::Write;

use serde::Serialize;

use super::classify::SkinType;
use super::frame::round_half_up;
use super::landmarks::{Point, Region};
use super::recommend::recommendations;
use super::sample::{RegionSample, SkinMetrics};

/// Metrics as rounded percentages (`round(metric * 100)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricPercents {
    pub brightness: u32,
    pub redness: u32,
    pub oiliness: u32,
}

impl MetricPercents {
    pub fn from_metrics(metrics: &SkinMetrics) -> Self {
        Self {
            brightness: to_percent(metrics.brightness),
            redness: to_percent(metrics.redness),
            oiliness: to_percent(metrics.oiliness),
        }
    }
}

/// Sample taken for one region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionReading {
    pub region: Region,
    pub landmark: usize,
    pub point: Point,
    pub sample: RegionSample,
}

/// Full result of analysing one face
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinReport {
    pub skin_type: SkinType,
    pub metrics: MetricPercents,
    pub raw_metrics: SkinMetrics,
    pub regions: Vec<RegionReading>,
    pub recommendations: Vec<&'static str>,
    pub html: String,
}

impl SkinReport {
    pub fn new(skin_type: SkinType, raw_metrics: SkinMetrics, regions: Vec<RegionReading>) -> Self {
        let metrics = MetricPercents::from_metrics(&raw_metrics);
        let recommendations = recommendations(skin_type).to_vec();
        let html = render_html(skin_type, &metrics, &recommendations);
        Self {
            skin_type,
            metrics,
            raw_metrics,
            regions,
            recommendations,
            html,
        }
    }
}

/// Metric in [0, 1] (or above, for the ratios) to an integer percentage
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_percent(metric: f64) -> u32 {
    let value = round_half_up(metric * 100.0);
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.min(f64::from(u32::MAX)) as u32
    }
}

/// Render the results panel: label, metric bars, recommendation list
pub fn render_html(skin_type: SkinType, metrics: &MetricPercents, recommendations: &[&str]) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h2>Your Skin Type: {skin_type}</h2>");
    html.push_str("<h3>Skin Metrics:</h3>\n<div class=\"metrics\">\n");
    for (name, percent) in [
        ("Brightness", metrics.brightness),
        ("Redness", metrics.redness),
        ("Oiliness", metrics.oiliness),
    ] {
        // Ratios can pass 100%; the bar stops at full width
        let width = percent.min(100);
        let _ = writeln!(html, "<p>{name}: {percent}%</p>");
        let _ = writeln!(
            html,
            "<div class=\"metric-bar\"><div class=\"metric-fill\" style=\"width: {width}%\"></div></div>"
        );
    }
    html.push_str("</div>\n<h3>Recommendations:</h3>\n<ul>");
    for rec in recommendations {
        let _ = write!(html, "<li>{}</li>", escape_html(rec));
    }
    html.push_str("</ul>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
