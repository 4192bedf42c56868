//! Data provider interface for the dashboard charts.
//!
//! The provider exposes already-prepared datasets; the charts only slice the
//! flat month-ordered GMV sequences into per-year windows. A provider that
//! returns `None` for a chart means that chart is not built at all.

use std::collections::BTreeMap;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::series::{MonthlyValues, MONTHS_PER_YEAR};

/// First data year when a GMV document does not state one.
pub const DEFAULT_FIRST_YEAR: i32 = 2023;

// =============================================================================
// Datasets
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceCount {
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadSourceDistribution {
    pub outbound: SourceCount,
    pub inbound: SourceCount,
}

/// Monthly contract counts per year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractsDataset {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: BTreeMap<i32, Vec<Option<f64>>>,
}

/// A year whose data stops early (the current year).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialYear {
    pub year: i32,
    pub months: usize,
}

/// Flat month-ordered GMV, internal revenue and margin sequences, 12 entries
/// per year starting at `first_year`.
#[derive(Debug, Clone, PartialEq)]
pub struct GmvDataset {
    pub first_year: i32,
    pub primary: Vec<Option<f64>>,
    pub secondary: Vec<Option<f64>>,
    pub derived: Option<Vec<Option<f64>>>,
    pub partial_year: Option<PartialYear>,
}

impl GmvDataset {
    /// Builds a dataset, rejecting secondary or derived sequences that run
    /// past the years covered by the primary sequence.
    pub fn new(
        first_year: i32,
        primary: Vec<Option<f64>>,
        secondary: Vec<Option<f64>>,
        derived: Option<Vec<Option<f64>>>,
    ) -> Result<Self, DashboardError> {
        let span = primary.len().div_ceil(MONTHS_PER_YEAR) * MONTHS_PER_YEAR;
        if secondary.len() > span {
            return Err(DashboardError::WindowLength {
                series: "values2",
                expected: span,
                found: secondary.len(),
            });
        }
        if let Some(derived) = &derived {
            if derived.len() > span {
                return Err(DashboardError::WindowLength {
                    series: "values3",
                    expected: span,
                    found: derived.len(),
                });
            }
        }
        let years = primary.len().div_ceil(MONTHS_PER_YEAR);
        let last_offset = i32::try_from(years.saturating_sub(1)).ok();
        if last_offset.and_then(|o| first_year.checked_add(o)).is_none() {
            return Err(DashboardError::YearRange { first_year, years });
        }
        Ok(Self {
            first_year,
            primary,
            secondary,
            derived,
            partial_year: None,
        })
    }

    pub fn with_partial_year(mut self, year: i32, months: usize) -> Self {
        self.partial_year = Some(PartialYear { year, months });
        self
    }

    /// Data years in ascending order, stopping at the last representable year.
    pub fn years(&self) -> Vec<i32> {
        let count = self.primary.len().div_ceil(MONTHS_PER_YEAR);
        (0..count)
            .map_while(|offset| {
                i32::try_from(offset)
                    .ok()
                    .and_then(|o| self.first_year.checked_add(o))
            })
            .collect()
    }

    pub fn primary_window(&self, year: i32) -> MonthlyValues {
        self.window(&self.primary, year)
    }

    pub fn secondary_window(&self, year: i32) -> MonthlyValues {
        self.window(&self.secondary, year)
    }

    pub fn derived_window(&self, year: i32) -> Option<MonthlyValues> {
        self.derived.as_ref().map(|seq| self.window(seq, year))
    }

    fn available_months(&self, year: i32) -> usize {
        match self.partial_year {
            Some(partial) if partial.year == year => partial.months,
            _ => MONTHS_PER_YEAR,
        }
    }

    fn window(&self, seq: &[Option<f64>], year: i32) -> MonthlyValues {
        let start = year
            .checked_sub(self.first_year)
            .and_then(|d| usize::try_from(d).ok())
            .and_then(|offset| offset.checked_mul(MONTHS_PER_YEAR));
        let Some(start) = start.filter(|&start| start < seq.len()) else {
            return MonthlyValues::default();
        };
        let end = (start + MONTHS_PER_YEAR).min(seq.len());
        MonthlyValues::from_window(&seq[start..end], self.available_months(year))
    }
}

// =============================================================================
// Provider interface
// =============================================================================

/// Source of chart datasets, injected into the app as [`DashboardData`].
pub trait DataProvider: Send + Sync + 'static {
    fn gmv(&self) -> Option<GmvDataset>;
    fn lead_sources(&self) -> Option<LeadSourceDistribution>;
    fn contracts(&self) -> Option<ContractsDataset>;
}

/// Resource holding the active data provider.
#[derive(Resource)]
pub struct DashboardData(pub Box<dyn DataProvider>);

impl DashboardData {
    pub fn new(provider: impl DataProvider) -> Self {
        Self(Box::new(provider))
    }
}

// =============================================================================
// JSON document
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LeadSourceSection {
    #[serde(default)]
    distribution: Option<LeadSourceDistribution>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmvSection {
    #[serde(default)]
    first_year: Option<i32>,
    #[serde(default)]
    values: Option<Vec<Option<f64>>>,
    #[serde(default)]
    values2: Option<Vec<Option<f64>>>,
    #[serde(default)]
    values3: Option<Vec<Option<f64>>>,
    #[serde(default)]
    partial_year: Option<PartialYear>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardDocument {
    #[serde(default)]
    lead_source: Option<LeadSourceSection>,
    #[serde(default)]
    contracts: Option<ContractsDataset>,
    #[serde(default)]
    gmv: Option<GmvSection>,
}

/// In-memory provider, built directly or from a JSON document shaped like
/// `{ "leadSource": …, "contracts": …, "gmv": { "values": …, "values2": … } }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticDataProvider {
    pub gmv: Option<GmvDataset>,
    pub lead_sources: Option<LeadSourceDistribution>,
    pub contracts: Option<ContractsDataset>,
}

impl StaticDataProvider {
    pub fn from_json_str(json: &str) -> Result<Self, DashboardError> {
        let doc: DashboardDocument = serde_json::from_str(json)?;

        // A GMV section without both base sequences counts as absent.
        let gmv = match doc.gmv {
            Some(GmvSection {
                first_year,
                values: Some(values),
                values2: Some(values2),
                values3,
                partial_year,
            }) => {
                let mut dataset = GmvDataset::new(
                    first_year.unwrap_or(DEFAULT_FIRST_YEAR),
                    values,
                    values2,
                    values3,
                )?;
                dataset.partial_year = partial_year;
                Some(dataset)
            }
            _ => None,
        };

        let contracts = doc.contracts.filter(|c| !c.data.is_empty());

        Ok(Self {
            gmv,
            lead_sources: doc.lead_source.and_then(|s| s.distribution),
            contracts,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl DataProvider for StaticDataProvider {
    fn gmv(&self) -> Option<GmvDataset> {
        self.gmv.clone()
    }

    fn lead_sources(&self) -> Option<LeadSourceDistribution> {
        self.lead_sources
    }

    fn contracts(&self) -> Option<ContractsDataset> {
        self.contracts.clone()
    }
}
