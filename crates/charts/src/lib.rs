//! Chart models for the revenue dashboard: lead sources, contracts by year,
//! and the GMV / internal revenue / margin combination chart with its
//! grouped legend and synchronized tooltip.
//!
//! Nothing here renders; the `ui` crate paints these models with egui.

pub mod config;
pub mod contracts;
pub mod data_provider;
pub mod error;
pub mod formatting;
pub mod gmv;
pub mod lead_source;
pub mod plugin;
pub mod series;

pub use config::DashboardConfig;
pub use data_provider::{DashboardData, DataProvider, StaticDataProvider};
pub use error::DashboardError;
pub use plugin::{
    ContractsLegendActivated, DashboardPlugin, LeadSourceLegendActivated, LegendActivated,
    RebuildCharts,
};
