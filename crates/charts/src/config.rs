//! Dashboard configuration.
//!
//! Every label, month name, year colour and currency rule the charts use is
//! read from a [`DashboardConfig`] resource passed at construction time.
//! Defaults reproduce the Brazilian-Portuguese dashboard; any field can be
//! overridden from a JSON file.

use std::path::Path;

use bevy::color::Srgba;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::series::{Category, MONTHS_PER_YEAR};

/// Marker used for years without an explicit style.
pub const DEFAULT_MARKER: &str = "●";

/// Colour used for years without an explicit style.
pub const DEFAULT_FALLBACK_COLOR: &str = "#9CA3AF";

/// Upper bound on the ticks one axis may produce.
pub const MAX_AXIS_TICKS: usize = 200;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartLabels {
    pub primary: String,
    pub secondary: String,
    pub derived: String,
    pub outbound: String,
    pub inbound: String,
    pub contracts_unit: String,
    /// Shown for a missing month and for a chart without data.
    pub no_data: String,
    pub window_title: String,
    pub contracts_tab: String,
    pub lead_sources_tab: String,
    pub keybind_hint: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            primary: "GMV".to_string(),
            secondary: "Soller".to_string(),
            derived: "Margem".to_string(),
            outbound: "Outbound".to_string(),
            inbound: "Inbound".to_string(),
            contracts_unit: "contratos".to_string(),
            no_data: "Sem dados".to_string(),
            window_title: "Painel comercial".to_string(),
            contracts_tab: "Contratos".to_string(),
            lead_sources_tab: "Origem dos leads".to_string(),
            keybind_hint: "[C] mostrar/ocultar, [R] recarregar".to_string(),
        }
    }
}

impl ChartLabels {
    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Primary => &self.primary,
            Category::Secondary => &self.secondary,
        }
    }
}

/// Colour and tooltip marker for one data year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStyle {
    pub year: i32,
    pub color: String,
    pub marker: String,
}

/// Currency formatting rules (symbol and digit grouping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            thousands_separator: '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadSourceColors {
    pub outbound: String,
    pub inbound: String,
}

impl Default for LeadSourceColors {
    fn default() -> Self {
        Self {
            outbound: "#00A8FF".to_string(),
            inbound: "#FF375F".to_string(),
        }
    }
}

/// Fixed value range of a chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 150.0,
            step: 15.0,
        }
    }
}

impl AxisRange {
    /// Checks that the range is finite, ordered and yields at most
    /// [`MAX_AXIS_TICKS`] ticks.
    pub fn validate(&self) -> Result<(), DashboardError> {
        self.step_count().map(|_| ())
    }

    /// Tick values from `min` to `max` inclusive. An invalid range yields
    /// only the two endpoints.
    pub fn ticks(&self) -> Vec<f64> {
        match self.step_count() {
            Ok(count) => (0..=count).map(|i| self.min + i as f64 * self.step).collect(),
            Err(_) => vec![self.min, self.max],
        }
    }

    fn step_count(&self) -> Result<usize, DashboardError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            return Err(DashboardError::InvalidAxis {
                reason: format!("min {} must be below max {}", self.min, self.max),
            });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(DashboardError::InvalidAxis {
                reason: format!("step {} must be positive", self.step),
            });
        }
        let steps = ((self.max - self.min) / self.step).round();
        if !steps.is_finite() || steps >= MAX_AXIS_TICKS as f64 {
            return Err(DashboardError::InvalidAxis {
                reason: format!("step {} yields more than {MAX_AXIS_TICKS} ticks", self.step),
            });
        }
        Ok(steps as usize)
    }
}

// =============================================================================
// Resource
// =============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub labels: ChartLabels,
    /// Month names, January first.
    pub months: Vec<String>,
    pub years: Vec<YearStyle>,
    pub fallback_color: String,
    pub currency: CurrencyFormat,
    pub lead_source_colors: LeadSourceColors,
    pub contracts_axis: AxisRange,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let months = [
            "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
        ];
        Self {
            labels: ChartLabels::default(),
            months: months.iter().map(|m| m.to_string()).collect(),
            years: vec![
                YearStyle {
                    year: 2023,
                    color: "#00A8FF".to_string(),
                    marker: "🔵".to_string(),
                },
                YearStyle {
                    year: 2024,
                    color: "#FF375F".to_string(),
                    marker: "🔴".to_string(),
                },
                YearStyle {
                    year: 2025,
                    color: "#00FF84".to_string(),
                    marker: "🟢".to_string(),
                },
            ],
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            currency: CurrencyFormat::default(),
            lead_source_colors: LeadSourceColors::default(),
            contracts_axis: AxisRange::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DashboardError> {
        let config: Self = serde_json::from_str(json)?;
        config.contracts_axis.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn year_style(&self, year: i32) -> Option<&YearStyle> {
        self.years.iter().find(|s| s.year == year)
    }

    /// Colour for a data year, falling back to `fallback_color`.
    pub fn color_for_year(&self, year: i32) -> Result<Srgba, DashboardError> {
        match self.year_style(year) {
            Some(style) => parse_hex(&style.color),
            None => parse_hex(&self.fallback_color),
        }
    }

    pub fn marker_for_year(&self, year: i32) -> &str {
        self.year_style(year)
            .map(|s| s.marker.as_str())
            .unwrap_or(DEFAULT_MARKER)
    }

    /// Month name for a 0-based index; empty for out-of-range months.
    pub fn month_label(&self, month: usize) -> &str {
        self.months.get(month).map(String::as_str).unwrap_or("")
    }

    /// Month names padded/truncated to exactly twelve entries.
    pub fn month_labels(&self) -> Vec<String> {
        (0..MONTHS_PER_YEAR)
            .map(|m| self.month_label(m).to_string())
            .collect()
    }
}

/// Parse a `#RRGGBB` / `#RGB` colour string.
pub fn parse_hex(value: &str) -> Result<Srgba, DashboardError> {
    Srgba::hex(value).map_err(|e| DashboardError::InvalidColor {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
