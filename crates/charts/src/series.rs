//! Structured series metadata shared by every chart.
//!
//! A series carries its category and year as data; display text is derived
//! from them, never parsed back.

use bevy::color::Srgba;

/// Number of monthly slots in one per-year window.
pub const MONTHS_PER_YEAR: usize = 12;

/// Legend/toggle grouping of the GMV chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Gross merchandise value, drawn as bars.
    Primary,
    /// Internal revenue, drawn as lines.
    Secondary,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Primary, Category::Secondary];
}

/// Which value axis a series is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
}

/// Twelve monthly values for one year. `None` means "no data for this month".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyValues([Option<f64>; MONTHS_PER_YEAR]);

impl MonthlyValues {
    pub fn new(values: [Option<f64>; MONTHS_PER_YEAR]) -> Self {
        Self(values)
    }

    /// Build a window from a (possibly short) slice, masking every month at or
    /// beyond `available_months` as absent.
    pub fn from_window(window: &[Option<f64>], available_months: usize) -> Self {
        let mut values = [None; MONTHS_PER_YEAR];
        let limit = available_months.min(MONTHS_PER_YEAR);
        for (slot, value) in values.iter_mut().zip(window.iter()).take(limit) {
            *slot = *value;
        }
        Self(values)
    }

    /// Value at `month` (0-based). Out-of-range months are absent.
    pub fn get(&self, month: usize) -> Option<f64> {
        self.0.get(month).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().copied()
    }

    /// Largest present value, or `None` when the window is empty.
    pub fn max(&self) -> Option<f64> {
        self.0.iter().flatten().copied().reduce(f64::max)
    }

    /// Number of months that hold a value.
    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }
}

/// One labelled bar or line of monthly values for one year within one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub category: Category,
    pub year: i32,
    pub kind: SeriesKind,
    pub axis: Axis,
    pub color: Srgba,
    pub values: MonthlyValues,
    pub visible: bool,
}

impl Series {
    pub fn new(category: Category, year: i32, color: Srgba, values: MonthlyValues) -> Self {
        let (kind, axis) = match category {
            Category::Primary => (SeriesKind::Bar, Axis::Primary),
            Category::Secondary => (SeriesKind::Line, Axis::Secondary),
        };
        Self {
            category,
            year,
            kind,
            axis,
            color,
            values,
            visible: true,
        }
    }
}
