//! Synchronized tooltip for the GMV chart.

use super::GmvChart;
use crate::formatting::{fmt_currency, fmt_pct};
use crate::series::Category;

/// Tooltip content for one hovered month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
}

impl GmvChart {
    pub fn tooltip(&self, month: usize) -> Tooltip {
        Tooltip {
            title: self.months.get(month).cloned().unwrap_or_default(),
            lines: self.tooltip_lines(month),
        }
    }

    /// Lines for `month`: the GMV section, a blank line, the internal revenue
    /// section and, when any year qualifies, a blank line and the margin
    /// section. Years run newest first in every section. Hidden series and
    /// absent or zero values are skipped.
    pub fn tooltip_lines(&self, month: usize) -> Vec<String> {
        let years = self.years_descending();
        let mut lines = Vec::new();

        self.push_category_section(Category::Primary, month, &years, &mut lines);
        lines.push(String::new());
        self.push_category_section(Category::Secondary, month, &years, &mut lines);

        let derived = self.derived_lines(month, &years);
        if !derived.is_empty() {
            lines.push(String::new());
            lines.push(self.labels.derived.clone());
            lines.extend(derived);
        }
        lines
    }

    fn push_category_section(
        &self,
        category: Category,
        month: usize,
        years: &[i32],
        lines: &mut Vec<String>,
    ) {
        lines.push(self.labels.category(category).to_string());
        for &year in years {
            let value = self
                .series_for(category, year)
                .filter(|s| s.visible)
                .and_then(|s| s.values.get(month))
                .filter(|v| *v != 0.0);
            if let Some(value) = value {
                lines.push(format!(
                    "{} {}: {}",
                    self.marker(year),
                    year,
                    fmt_currency(value, &self.currency)
                ));
            }
        }
    }

    /// Margin lines for years whose internal revenue series is visible and
    /// whose margin is strictly positive.
    fn derived_lines(&self, month: usize, years: &[i32]) -> Vec<String> {
        years
            .iter()
            .filter(|&&year| {
                self.series_for(Category::Secondary, year)
                    .is_some_and(|s| s.visible)
            })
            .filter_map(|&year| {
                let margin = self.derived(year)?.get(month).filter(|m| *m > 0.0)?;
                Some(format!("{} {}: {}", self.marker(year), year, fmt_pct(margin)))
            })
            .collect()
    }
}
