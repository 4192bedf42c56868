//! GMV vs. internal revenue vs. margin chart.
//!
//! GMV series are bars on the primary axis, internal revenue series are lines
//! on the secondary axis, and margin is a derived metric that only appears in
//! the tooltip. [`GmvChart`] owns the structured series list and coordinates
//! the grouped legend (see `legend.rs`) and the synchronized tooltip (see
//! `tooltip.rs`). Visibility starts all-visible and only changes through
//! legend activation; rebuilding the chart resets it.

mod legend;
#[cfg(test)]
mod tests;
mod tooltip;

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::config::{ChartLabels, CurrencyFormat, DashboardConfig};
use crate::data_provider::GmvDataset;
use crate::error::DashboardError;
use crate::series::{Axis, Category, MonthlyValues, Series};

pub use legend::{LegendEntry, Swatch, LINE_SWATCH_WIDTH};
pub use tooltip::Tooltip;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GmvChart {
    series: Vec<Series>,
    /// Margin per year, keyed by the year of its internal revenue series.
    derived: BTreeMap<i32, MonthlyValues>,
    markers: BTreeMap<i32, String>,
    labels: ChartLabels,
    months: Vec<String>,
    currency: CurrencyFormat,
}

impl GmvChart {
    /// Builds one GMV and one internal revenue series per data year (GMV
    /// first, years ascending) plus the optional margin windows.
    pub fn new(config: &DashboardConfig, dataset: &GmvDataset) -> Result<Self, DashboardError> {
        let years = dataset.years();
        let mut series = Vec::with_capacity(years.len() * 2);
        for &year in &years {
            series.push(Series::new(
                Category::Primary,
                year,
                config.color_for_year(year)?,
                dataset.primary_window(year),
            ));
        }
        for &year in &years {
            series.push(Series::new(
                Category::Secondary,
                year,
                config.color_for_year(year)?,
                dataset.secondary_window(year),
            ));
        }
        let derived = years
            .iter()
            .filter_map(|&year| dataset.derived_window(year).map(|w| (year, w)))
            .collect();
        Ok(Self::from_series(config, series, derived))
    }

    /// Builds a chart from an explicit series list. Every series is made
    /// visible.
    pub fn from_series(
        config: &DashboardConfig,
        mut series: Vec<Series>,
        derived: BTreeMap<i32, MonthlyValues>,
    ) -> Self {
        for s in &mut series {
            s.visible = true;
        }
        let markers = series
            .iter()
            .map(|s| (s.year, config.marker_for_year(s.year).to_string()))
            .collect();
        Self {
            series,
            derived,
            markers,
            labels: config.labels.clone(),
            months: config.month_labels(),
            currency: config.currency.clone(),
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.series.get(index).is_some_and(|s| s.visible)
    }

    /// Sets one series' visibility. Returns `false` for an unknown index.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.series.get_mut(index) {
            Some(s) => {
                s.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Indices of every series in `category`, in series order.
    pub fn members(&self, category: Category) -> Vec<usize> {
        self.series
            .iter()
            .enumerate()
            .filter(|(_, s)| s.category == category)
            .map(|(i, _)| i)
            .collect()
    }

    /// AND of the visibility of every series in `category`.
    pub fn all_visible(&self, category: Category) -> bool {
        self.series
            .iter()
            .filter(|s| s.category == category)
            .all(|s| s.visible)
    }

    pub fn series_for(&self, category: Category, year: i32) -> Option<&Series> {
        self.series
            .iter()
            .find(|s| s.category == category && s.year == year)
    }

    /// Distinct series years, newest first.
    pub fn years_descending(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.series.iter().map(|s| s.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    pub fn derived(&self, year: i32) -> Option<&MonthlyValues> {
        self.derived.get(&year)
    }

    pub fn marker(&self, year: i32) -> &str {
        self.markers
            .get(&year)
            .map(String::as_str)
            .unwrap_or(crate::config::DEFAULT_MARKER)
    }

    pub fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    pub fn month_labels(&self) -> &[String] {
        &self.months
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    /// Largest visible value drawn against `axis`, used to scale the axis.
    pub fn axis_max(&self, axis: Axis) -> f64 {
        self.series
            .iter()
            .filter(|s| s.axis == axis && s.visible)
            .filter_map(|s| s.values.max())
            .fold(0.0, f64::max)
    }
}
