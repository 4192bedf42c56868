//! Contracts-by-year line chart.

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::config::{AxisRange, DashboardConfig};
use crate::data_provider::ContractsDataset;
use crate::error::DashboardError;

#[derive(Debug, Clone, PartialEq)]
pub struct ContractLine {
    pub year: i32,
    pub color: Srgba,
    /// Monthly counts; `None` marks a month without data.
    pub values: Vec<Option<f64>>,
    pub visible: bool,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ContractsChart {
    pub labels: Vec<String>,
    /// One line per year, oldest first.
    pub lines: Vec<ContractLine>,
    pub axis: AxisRange,
    unit: String,
    no_data: String,
}

impl ContractsChart {
    pub fn new(config: &DashboardConfig, dataset: &ContractsDataset) -> Result<Self, DashboardError> {
        config.contracts_axis.validate()?;
        let labels = if dataset.labels.is_empty() {
            config.month_labels()
        } else {
            dataset.labels.clone()
        };
        let mut lines = Vec::with_capacity(dataset.data.len());
        for (&year, values) in &dataset.data {
            lines.push(ContractLine {
                year,
                color: config.color_for_year(year)?,
                values: values.clone(),
                visible: true,
            });
        }
        Ok(Self {
            labels,
            lines,
            axis: config.contracts_axis,
            unit: config.labels.contracts_unit.clone(),
            no_data: config.labels.no_data.clone(),
        })
    }

    /// Flips one line's visibility. Returns `false` for an unknown index.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.visible = !line.visible;
                true
            }
            None => false,
        }
    }

    /// One line per visible year that has a point at `month`:
    /// `"2024: 12 contratos"`, or `"2024: Sem dados"` for an empty month.
    pub fn tooltip_lines(&self, month: usize) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.visible)
            .filter_map(|line| {
                let point = line.values.get(month)?;
                Some(match point {
                    Some(count) => format!("{}: {} {}", line.year, count, self.unit),
                    None => format!("{}: {}", line.year, self.no_data),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn dataset() -> ContractsDataset {
        let mut data = BTreeMap::new();
        data.insert(2024, vec![Some(20.0), None, Some(31.0)]);
        data.insert(2023, vec![Some(12.0), Some(15.0)]);
        ContractsDataset {
            labels: Vec::new(),
            data,
        }
    }

    #[test]
    fn test_lines_sorted_by_year() {
        let chart = ContractsChart::new(&DashboardConfig::default(), &dataset()).unwrap();
        let years: Vec<i32> = chart.lines.iter().map(|l| l.year).collect();
        assert_eq!(years, vec![2023, 2024]);
        assert_eq!(chart.labels.len(), 12);
        assert_eq!(chart.labels[0], "Jan");
        assert!((chart.axis.max - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tooltip_lines() {
        let chart = ContractsChart::new(&DashboardConfig::default(), &dataset()).unwrap();
        assert_eq!(
            chart.tooltip_lines(0),
            vec!["2023: 12 contratos".to_string(), "2024: 20 contratos".to_string()]
        );
        assert_eq!(
            chart.tooltip_lines(1),
            vec!["2023: 15 contratos".to_string(), "2024: Sem dados".to_string()]
        );
        // 2023 has no point for March at all.
        assert_eq!(chart.tooltip_lines(2), vec!["2024: 31 contratos".to_string()]);
        assert!(chart.tooltip_lines(11).is_empty());
    }

    #[test]
    fn test_toggle_hides_from_tooltip() {
        let mut chart = ContractsChart::new(&DashboardConfig::default(), &dataset()).unwrap();
        assert!(chart.toggle(0));
        assert_eq!(chart.tooltip_lines(0), vec!["2024: 20 contratos".to_string()]);
        assert!(chart.toggle(0));
        assert_eq!(chart.tooltip_lines(0).len(), 2);
        assert!(!chart.toggle(5));
    }

    #[test]
    fn test_unusable_axis_is_error() {
        let mut config = DashboardConfig::default();
        config.contracts_axis.step = 1e-9;
        let result = ContractsChart::new(&config, &dataset());
        assert!(matches!(result, Err(DashboardError::InvalidAxis { .. })));
    }

    #[test]
    fn test_explicit_labels_are_kept() {
        let mut data = dataset();
        data.labels = vec!["Q1".to_string(), "Q2".to_string()];
        let chart = ContractsChart::new(&DashboardConfig::default(), &data).unwrap();
        assert_eq!(chart.labels, vec!["Q1".to_string(), "Q2".to_string()]);
    }
}
