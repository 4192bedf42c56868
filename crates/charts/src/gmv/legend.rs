//! Grouped legend for the GMV chart.
//!
//! The charting layer has no notion of a category, so the legend synthesizes
//! it: a header per category (acting as a toggle-all control), the member
//! series, and two spacers between the groups.

use bevy::color::Srgba;
use bevy::prelude::*;

use super::GmvChart;
use crate::series::{Category, SeriesKind};

/// Stroke width used for line-series swatches.
pub const LINE_SWATCH_WIDTH: f32 = 3.0;

/// How a series entry's colour sample is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    /// Solid box, for bar series.
    Fill(Srgba),
    /// Outlined line sample, for line series.
    Stroke { color: Srgba, width: f32 },
}

impl Swatch {
    pub fn color(&self) -> Srgba {
        match self {
            Swatch::Fill(color) | Swatch::Stroke { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegendEntry {
    /// Category label; activating it toggles the whole category.
    Header {
        category: Category,
        text: String,
        all_visible: bool,
    },
    /// Empty layout filler.
    Spacer,
    /// One series, carrying a back-reference to its index.
    Series {
        series_index: usize,
        text: String,
        swatch: Swatch,
        hidden: bool,
    },
}

impl LegendEntry {
    pub fn is_interactive(&self) -> bool {
        !matches!(self, LegendEntry::Spacer)
    }

    /// Display text; empty for spacers.
    pub fn text(&self) -> &str {
        match self {
            LegendEntry::Header { text, .. } | LegendEntry::Series { text, .. } => text,
            LegendEntry::Spacer => "",
        }
    }
}

impl GmvChart {
    /// Legend entries in display order: primary header and series, two
    /// spacers, secondary header and series. Reflects current visibility.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let mut entries = Vec::with_capacity(self.series.len() + 4);
        self.push_group(Category::Primary, &mut entries);
        entries.push(LegendEntry::Spacer);
        entries.push(LegendEntry::Spacer);
        self.push_group(Category::Secondary, &mut entries);
        entries
    }

    fn push_group(&self, category: Category, entries: &mut Vec<LegendEntry>) {
        entries.push(LegendEntry::Header {
            category,
            text: self.labels.category(category).to_string(),
            all_visible: self.all_visible(category),
        });
        for (index, series) in self.series.iter().enumerate() {
            if series.category != category {
                continue;
            }
            let swatch = match series.kind {
                SeriesKind::Bar => Swatch::Fill(series.color),
                SeriesKind::Line => Swatch::Stroke {
                    color: series.color,
                    width: LINE_SWATCH_WIDTH,
                },
            };
            entries.push(LegendEntry::Series {
                series_index: index,
                text: series.year.to_string(),
                swatch,
                hidden: !series.visible,
            });
        }
    }

    /// Applies a legend activation. Returns whether any visibility changed.
    ///
    /// A header shows the whole category unless every member is already
    /// visible, in which case it hides them all. A series entry flips only
    /// that series.
    pub fn activate(&mut self, entry: &LegendEntry) -> bool {
        match entry {
            LegendEntry::Spacer => false,
            LegendEntry::Header { category, .. } => {
                let target = !self.all_visible(*category);
                let mut changed = false;
                for series in self.series.iter_mut().filter(|s| s.category == *category) {
                    changed |= series.visible != target;
                    series.visible = target;
                }
                changed
            }
            LegendEntry::Series { series_index, .. } => {
                let current = self.is_visible(*series_index);
                if !self.set_visible(*series_index, !current) {
                    warn!("Legend entry references unknown series {series_index}");
                    return false;
                }
                true
            }
        }
    }
}
