//! Lead source distribution (outbound vs. inbound) doughnut chart.

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::config::{parse_hex, DashboardConfig};
use crate::data_provider::LeadSourceDistribution;
use crate::error::DashboardError;
use crate::formatting::share_pct;

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: Srgba,
    pub visible: bool,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LeadSourceChart {
    /// Slices in drawing order: outbound, then inbound.
    pub slices: Vec<Slice>,
}

impl LeadSourceChart {
    pub fn new(
        config: &DashboardConfig,
        distribution: &LeadSourceDistribution,
    ) -> Result<Self, DashboardError> {
        Ok(Self {
            slices: vec![
                Slice {
                    label: config.labels.outbound.clone(),
                    value: distribution.outbound.count as f64,
                    color: parse_hex(&config.lead_source_colors.outbound)?,
                    visible: true,
                },
                Slice {
                    label: config.labels.inbound.clone(),
                    value: distribution.inbound.count as f64,
                    color: parse_hex(&config.lead_source_colors.inbound)?,
                    visible: true,
                },
            ],
        })
    }

    /// Sum of every slice, hidden ones included.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of the drawn ring in `0.0..=1.0`. Hidden slices take no share
    /// and the rest fill the ring; zero when nothing visible has data.
    pub fn fraction(&self, index: usize) -> f64 {
        let visible_total: f64 = self
            .slices
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.value)
            .sum();
        match self.slices.get(index) {
            Some(slice) if slice.visible && visible_total > 0.0 => slice.value / visible_total,
            _ => 0.0,
        }
    }

    /// Flips one slice's visibility. Returns `false` for an unknown index.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.slices.get_mut(index) {
            Some(slice) => {
                slice.visible = !slice.visible;
                true
            }
            None => false,
        }
    }

    /// `"{label}: {value} ({pct}%)"` with the share of the full total,
    /// hidden slices included, rounded to a whole percent.
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        let slice = self.slices.get(index)?;
        Some(format!(
            "{}: {} ({}%)",
            slice.label,
            slice.value,
            share_pct(slice.value, self.total())
        ))
    }

    /// Slice indices in legend order (reversed drawing order).
    pub fn legend_order(&self) -> Vec<usize> {
        (0..self.slices.len()).rev().collect()
    }
}
