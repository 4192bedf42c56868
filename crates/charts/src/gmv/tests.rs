use std::collections::BTreeMap;

use bevy::color::Srgba;

use super::*;
use crate::series::MONTHS_PER_YEAR;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn months(values: &[f64]) -> MonthlyValues {
    let raw: Vec<Option<f64>> = values.iter().map(|v| Some(*v)).collect();
    MonthlyValues::from_window(&raw, MONTHS_PER_YEAR)
}

fn ramp(start: f64, step: f64) -> MonthlyValues {
    let raw: Vec<f64> = (0..MONTHS_PER_YEAR).map(|m| start + step * m as f64).collect();
    months(&raw)
}

fn series(category: Category, year: i32, values: MonthlyValues) -> Series {
    Series::new(category, year, Srgba::WHITE, values)
}

/// GMV {2023, 2024}, internal revenue {2023}, no margin.
fn two_by_one_chart() -> GmvChart {
    GmvChart::from_series(
        &DashboardConfig::default(),
        vec![
            series(Category::Primary, 2023, ramp(10.0, 10.0)),
            series(Category::Primary, 2024, ramp(15.0, 10.0)),
            series(Category::Secondary, 2023, ramp(1.0, 1.0)),
        ],
        BTreeMap::new(),
    )
}

/// Three years of everything, margin for every year.
fn full_chart() -> GmvChart {
    let mut derived = BTreeMap::new();
    derived.insert(2023, months(&[10.0; MONTHS_PER_YEAR]));
    derived.insert(2024, months(&[20.0; MONTHS_PER_YEAR]));
    derived.insert(2025, months(&[30.0; MONTHS_PER_YEAR]));
    let mut all = Vec::new();
    for year in [2023, 2024, 2025] {
        all.push(series(Category::Primary, year, ramp(1_000.0, 100.0)));
    }
    for year in [2023, 2024, 2025] {
        all.push(series(Category::Secondary, year, ramp(100.0, 10.0)));
    }
    GmvChart::from_series(&DashboardConfig::default(), all, derived)
}

fn header(chart: &GmvChart, category: Category) -> LegendEntry {
    chart
        .legend_entries()
        .into_iter()
        .find(|e| matches!(e, LegendEntry::Header { category: c, .. } if *c == category))
        .unwrap()
}

fn entry_for(chart: &GmvChart, index: usize) -> LegendEntry {
    chart
        .legend_entries()
        .into_iter()
        .find(|e| matches!(e, LegendEntry::Series { series_index, .. } if *series_index == index))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_new_builds_primary_then_secondary_per_year() {
    let config = DashboardConfig::default();
    let dataset = GmvDataset::new(
        2023,
        vec![Some(1.0); 36],
        vec![Some(2.0); 36],
        Some(vec![Some(3.0); 36]),
    )
    .unwrap();
    let chart = GmvChart::new(&config, &dataset).unwrap();

    let layout: Vec<(Category, i32)> = chart.series().iter().map(|s| (s.category, s.year)).collect();
    assert_eq!(
        layout,
        vec![
            (Category::Primary, 2023),
            (Category::Primary, 2024),
            (Category::Primary, 2025),
            (Category::Secondary, 2023),
            (Category::Secondary, 2024),
            (Category::Secondary, 2025),
        ]
    );
    assert!(chart.series().iter().all(|s| s.visible));
    assert_eq!(chart.series()[0].color, config.color_for_year(2023).unwrap());
    assert_eq!(chart.derived(2024).and_then(|d| d.get(0)), Some(3.0));
}

#[test]
fn test_new_propagates_invalid_color() {
    let mut config = DashboardConfig::default();
    config.years[0].color = "#nope".to_string();
    let dataset = GmvDataset::new(2023, vec![Some(1.0); 12], vec![], None).unwrap();
    assert!(matches!(
        GmvChart::new(&config, &dataset),
        Err(DashboardError::InvalidColor { .. })
    ));
}

#[test]
fn test_years_descending_dedups() {
    assert_eq!(full_chart().years_descending(), vec![2025, 2024, 2023]);
    assert_eq!(two_by_one_chart().years_descending(), vec![2024, 2023]);
}

// ---------------------------------------------------------------------------
// Legend generation
// ---------------------------------------------------------------------------

#[test]
fn test_legend_count_and_order() {
    let chart = two_by_one_chart();
    let entries = chart.legend_entries();
    // 2 headers + 2 GMV + 1 revenue + 2 spacers
    assert_eq!(entries.len(), 7);

    assert!(matches!(
        &entries[0],
        LegendEntry::Header { category: Category::Primary, text, all_visible: true } if text == "GMV"
    ));
    assert!(matches!(&entries[1], LegendEntry::Series { series_index: 0, text, .. } if text == "2023"));
    assert!(matches!(&entries[2], LegendEntry::Series { series_index: 1, text, .. } if text == "2024"));
    assert_eq!(entries[3], LegendEntry::Spacer);
    assert_eq!(entries[4], LegendEntry::Spacer);
    assert!(matches!(
        &entries[5],
        LegendEntry::Header { category: Category::Secondary, text, .. } if text == "Soller"
    ));
    assert!(matches!(&entries[6], LegendEntry::Series { series_index: 2, text, .. } if text == "2023"));
}

#[test]
fn test_legend_count_full_chart() {
    assert_eq!(full_chart().legend_entries().len(), 2 + 3 + 3 + 2);
}

#[test]
fn test_legend_swatches_follow_series_kind() {
    let chart = two_by_one_chart();
    match entry_for(&chart, 0) {
        LegendEntry::Series { swatch, .. } => assert_eq!(swatch, Swatch::Fill(Srgba::WHITE)),
        other => panic!("unexpected entry {other:?}"),
    }
    match entry_for(&chart, 2) {
        LegendEntry::Series { swatch, .. } => assert_eq!(
            swatch,
            Swatch::Stroke {
                color: Srgba::WHITE,
                width: LINE_SWATCH_WIDTH
            }
        ),
        other => panic!("unexpected entry {other:?}"),
    }
}

#[test]
fn test_legend_is_idempotent() {
    let mut chart = full_chart();
    assert_eq!(chart.legend_entries(), chart.legend_entries());
    chart.set_visible(4, false);
    assert_eq!(chart.legend_entries(), chart.legend_entries());
}

#[test]
fn test_legend_reflects_hidden_series() {
    let mut chart = full_chart();
    chart.set_visible(1, false);
    match entry_for(&chart, 1) {
        LegendEntry::Series { hidden, .. } => assert!(hidden),
        other => panic!("unexpected entry {other:?}"),
    }
    assert!(matches!(
        header(&chart, Category::Primary),
        LegendEntry::Header { all_visible: false, .. }
    ));
    assert!(matches!(
        header(&chart, Category::Secondary),
        LegendEntry::Header { all_visible: true, .. }
    ));
}

#[test]
fn test_spacers_are_not_interactive() {
    let entries = full_chart().legend_entries();
    let spacers: Vec<_> = entries.iter().filter(|e| !e.is_interactive()).collect();
    assert_eq!(spacers.len(), 2);
    assert!(spacers.iter().all(|e| e.text().is_empty()));
}

// ---------------------------------------------------------------------------
// Legend interaction
// ---------------------------------------------------------------------------

#[test]
fn test_header_hides_all_when_all_visible() {
    let mut chart = full_chart();
    let primary = header(&chart, Category::Primary);
    assert!(chart.activate(&primary));
    for i in chart.members(Category::Primary) {
        assert!(!chart.is_visible(i));
    }
    // Other category untouched.
    assert!(chart.all_visible(Category::Secondary));
}

#[test]
fn test_header_shows_all_when_mixed() {
    let mut chart = full_chart();
    chart.set_visible(0, false);
    chart.set_visible(2, false);
    let primary = header(&chart, Category::Primary);
    assert!(chart.activate(&primary));
    assert!(chart.all_visible(Category::Primary));
}

#[test]
fn test_header_shows_all_when_all_hidden() {
    let mut chart = full_chart();
    for i in chart.members(Category::Secondary) {
        chart.set_visible(i, false);
    }
    let secondary = header(&chart, Category::Secondary);
    chart.activate(&secondary);
    assert!(chart.all_visible(Category::Secondary));
}

#[test]
fn test_header_twice_restores_all_visible_state() {
    let mut chart = full_chart();
    let before = chart.clone();
    let primary = header(&chart, Category::Primary);
    chart.activate(&primary);
    chart.activate(&primary);
    assert_eq!(chart, before);
}

#[test]
fn test_header_twice_from_mixed_does_not_restore() {
    let mut chart = full_chart();
    chart.set_visible(1, false);
    let primary = header(&chart, Category::Primary);
    chart.activate(&primary); // mixed -> all visible
    chart.activate(&primary); // all visible -> all hidden
    for i in chart.members(Category::Primary) {
        assert!(!chart.is_visible(i));
    }
}

#[test]
fn test_series_entry_flips_only_that_series() {
    let mut chart = full_chart();
    let entry = entry_for(&chart, 4);
    assert!(chart.activate(&entry));
    for i in 0..chart.series().len() {
        assert_eq!(chart.is_visible(i), i != 4, "series {i}");
    }
    assert!(chart.activate(&entry));
    assert!(chart.is_visible(4));
}

#[test]
fn test_spacer_activation_is_noop() {
    let mut chart = full_chart();
    let before = chart.clone();
    assert!(!chart.activate(&LegendEntry::Spacer));
    assert_eq!(chart, before);
}

#[test]
fn test_unknown_series_index_is_ignored() {
    let mut chart = full_chart();
    let before = chart.clone();
    let bogus = LegendEntry::Series {
        series_index: 99,
        text: "1999".to_string(),
        swatch: Swatch::Fill(Srgba::WHITE),
        hidden: false,
    };
    assert!(!chart.activate(&bogus));
    assert_eq!(chart, before);
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

#[test]
fn test_tooltip_two_by_one_scenario() {
    let chart = two_by_one_chart();
    let tooltip = chart.tooltip(1);
    assert_eq!(tooltip.title, "Fev");
    assert_eq!(
        tooltip.lines,
        vec![
            "GMV".to_string(),
            "🔴 2024: R$ 25".to_string(),
            "🔵 2023: R$ 20".to_string(),
            String::new(),
            "Soller".to_string(),
            "🔵 2023: R$ 2".to_string(),
        ]
    );
}

#[test]
fn test_tooltip_hidden_secondary_hides_its_margin() {
    let mut chart = full_chart();
    let idx = chart
        .series()
        .iter()
        .position(|s| s.category == Category::Secondary && s.year == 2023)
        .unwrap();
    chart.set_visible(idx, false);

    let lines = chart.tooltip_lines(0);
    let margin_at = lines.iter().position(|l| l == "Margem").unwrap();
    let revenue_at = lines.iter().position(|l| l == "Soller").unwrap();

    assert!(!lines[revenue_at..margin_at].iter().any(|l| l.contains("2023")));
    assert!(!lines[margin_at..].iter().any(|l| l.contains("2023")));
    assert!(lines[margin_at..].iter().any(|l| l == "🔴 2024: 20.0%"));
    // GMV 2023 is still shown.
    assert!(lines[..revenue_at].iter().any(|l| l.contains("2023")));
}

#[test]
fn test_tooltip_margin_section_layout() {
    let lines = full_chart().tooltip_lines(0);
    let tail: Vec<&str> = lines.iter().rev().take(5).rev().map(String::as_str).collect();
    assert_eq!(
        tail,
        vec!["", "Margem", "🟢 2025: 30.0%", "🔴 2024: 20.0%", "🔵 2023: 10.0%"]
    );
}

#[test]
fn test_tooltip_zero_margin_is_omitted() {
    let mut derived = BTreeMap::new();
    derived.insert(2023, months(&[0.0; MONTHS_PER_YEAR]));
    let chart = GmvChart::from_series(
        &DashboardConfig::default(),
        vec![
            series(Category::Primary, 2023, ramp(10.0, 10.0)),
            series(Category::Secondary, 2023, ramp(1.0, 1.0)),
        ],
        derived,
    );
    let lines = chart.tooltip_lines(3);
    assert!(!lines.iter().any(|l| l == "Margem"));
    assert_eq!(lines.last().map(String::as_str), Some("🔵 2023: R$ 4"));
}

#[test]
fn test_tooltip_negative_margin_is_omitted() {
    let mut derived = BTreeMap::new();
    derived.insert(2023, months(&[-5.0; MONTHS_PER_YEAR]));
    let chart = GmvChart::from_series(
        &DashboardConfig::default(),
        vec![series(Category::Secondary, 2023, ramp(1.0, 1.0))],
        derived,
    );
    assert!(!chart.tooltip_lines(0).iter().any(|l| l == "Margem"));
}

#[test]
fn test_tooltip_zero_value_is_omitted() {
    let chart = GmvChart::from_series(
        &DashboardConfig::default(),
        vec![
            series(Category::Primary, 2023, months(&[0.0, 5.0])),
            series(Category::Primary, 2024, months(&[7.0, 0.0])),
        ],
        BTreeMap::new(),
    );
    assert_eq!(chart.tooltip_lines(0)[..2], ["GMV".to_string(), "🔴 2024: R$ 7".to_string()]);
    assert_eq!(chart.tooltip_lines(1)[..2], ["GMV".to_string(), "🔵 2023: R$ 5".to_string()]);
}

#[test]
fn test_tooltip_partial_year_month_is_absent() {
    let partial = MonthlyValues::from_window(&[Some(9.0); MONTHS_PER_YEAR], 7);
    let chart = GmvChart::from_series(
        &DashboardConfig::default(),
        vec![
            series(Category::Primary, 2024, ramp(10.0, 1.0)),
            series(Category::Primary, 2025, partial),
        ],
        BTreeMap::new(),
    );
    let lines = chart.tooltip_lines(8);
    assert!(!lines.iter().any(|l| l.contains("2025")));
    assert!(lines.iter().any(|l| l == "🔴 2024: R$ 18"));
    assert!(chart.tooltip_lines(6).iter().any(|l| l == "🟢 2025: R$ 9"));
}

#[test]
fn test_tooltip_all_hidden_keeps_section_headers() {
    let mut chart = full_chart();
    for i in 0..chart.series().len() {
        chart.set_visible(i, false);
    }
    assert_eq!(
        chart.tooltip_lines(0),
        vec!["GMV".to_string(), String::new(), "Soller".to_string()]
    );
}

#[test]
fn test_tooltip_out_of_range_month() {
    let tooltip = full_chart().tooltip(12);
    assert_eq!(tooltip.title, "");
    assert_eq!(
        tooltip.lines,
        vec!["GMV".to_string(), String::new(), "Soller".to_string()]
    );
}

#[test]
fn test_tooltip_omission_matches_visibility_and_presence() {
    let mut chart = full_chart();
    chart.set_visible(0, false);
    chart.set_visible(5, false);
    for month in 0..MONTHS_PER_YEAR {
        let lines = chart.tooltip_lines(month);
        let revenue_at = lines.iter().position(|l| l == "Soller").unwrap();
        for (index, s) in chart.series().iter().enumerate() {
            let section = match s.category {
                Category::Primary => &lines[..revenue_at],
                Category::Secondary => &lines[revenue_at..],
            };
            let shown = section
                .iter()
                .any(|l| l.contains(&format!(" {}: R$", s.year)));
            let expected = s.visible && s.values.get(month).is_some();
            assert_eq!(shown, expected, "series {index} month {month}");
        }
    }
}

#[test]
fn test_axis_max_ignores_hidden_series() {
    let mut chart = two_by_one_chart();
    assert!((chart.axis_max(Axis::Primary) - 125.0).abs() < f64::EPSILON);
    chart.set_visible(1, false);
    assert!((chart.axis_max(Axis::Primary) - 120.0).abs() < f64::EPSILON);
    assert!((chart.axis_max(Axis::Secondary) - 12.0).abs() < f64::EPSILON);
}

#[test]
fn test_margin_shown_when_revenue_absent_but_visible() {
    // 2023 internal revenue has no value in March; its margin does.
    let revenue: Vec<Option<f64>> = (0..MONTHS_PER_YEAR)
        .map(|m| if m == 2 { None } else { Some(50.0) })
        .collect();
    let mut derived = BTreeMap::new();
    derived.insert(2023, months(&[12.5; MONTHS_PER_YEAR]));
    let chart = GmvChart::from_series(
        &DashboardConfig::default(),
        vec![
            series(Category::Primary, 2023, ramp(1_000.0, 100.0)),
            series(
                Category::Secondary,
                2023,
                MonthlyValues::from_window(&revenue, MONTHS_PER_YEAR),
            ),
        ],
        derived,
    );

    let lines = chart.tooltip_lines(2);
    assert_eq!(
        lines,
        vec!["GMV", "🔵 2023: R$ 1.200", "", "Soller", "", "Margem", "🔵 2023: 12.5%"]
    );
}
