// Commodity sources: workbook prices, unit conversion and reference merge

mod common;

use energy_figures::commodities::ReferenceDataset;
use energy_figures::config::SheetLayouts;
use energy_figures::extract_error::ExtractError;
use energy_figures::services::CommodityService;
use energy_figures::units::{build_conversion_table, to_source_value, ConversionRegion, SourceUnit};
use energy_figures::workbook::InMemoryWorkbook;
use std::io::Write;

fn reference() -> ReferenceDataset {
    ReferenceDataset::from_reader(common::REFERENCE_CSV.as_bytes(), "znes").unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1.0e-12 * b.abs()
}

#[test]
fn test_oil_price_in_euro_per_joule() {
    let wb = common::workbook();
    let layouts = SheetLayouts::default();
    let table = CommodityService::new(&wb, &layouts)
        .get_commodity_sources(&reference(), false)
        .unwrap();

    // EUR/t divided by J/t (41.868 PJ per Mio. t = 4.1868e10 J/t)
    let expected = common::OIL_PRICE_2014 / (common::OIL_PJ_PER_MIO_T * 1.0e9);
    let oil = table.cost("oil", 2014).unwrap();
    assert!(close(oil, expected), "{oil} != {expected}");
    // about 46 EUR/MWh
    assert!((oil * 3.6e9 - 45.79).abs() < 0.01);
}

#[test]
fn test_gas_uses_fixed_divisor() {
    let wb = common::workbook();
    let layouts = SheetLayouts::default();
    let table = CommodityService::new(&wb, &layouts)
        .get_commodity_sources(&reference(), false)
        .unwrap();
    assert!(close(table.cost("natural gas", 2014).unwrap(), common::GAS_PRICE_2014 / 1.0e12));
    assert_eq!(table.cost("natural gas", 1990), None);
}

#[test]
fn test_reference_price_fills_gap_only() {
    let wb = common::workbook();
    let layouts = SheetLayouts::default();
    let table = CommodityService::new(&wb, &layouts)
        .get_commodity_sources(&reference(), false)
        .unwrap();

    // hard coal has no 2014 workbook price, so the reference price is used
    assert!(close(table.cost("hard coal", 2014).unwrap(), 2.5e-9));
    // oil has one and keeps it
    assert!(!close(table.cost("oil", 2014).unwrap(), 9.8e-9));
    // lignite only exists in the reference dataset
    assert!(close(table.cost("lignite", 2014).unwrap(), 1.5e-9));
    assert_eq!(table.cost("lignite", 2013), None);
}

#[test]
fn test_force_reference_replaces_reference_year() {
    let wb = common::workbook();
    let layouts = SheetLayouts::default();
    let table = CommodityService::new(&wb, &layouts)
        .get_commodity_sources(&reference(), true)
        .unwrap();

    assert!(close(table.cost("oil", 2014).unwrap(), 9.8e-9));
    assert!(close(table.cost("natural gas", 2014).unwrap(), 6.9e-9));
    // other years untouched
    let oil_2013 = 579.0 / (common::OIL_PJ_PER_MIO_T * 1.0e9);
    assert!(close(table.cost("oil", 2013).unwrap(), oil_2013));
}

#[test]
fn test_emissions_every_year() {
    let wb = common::workbook();
    let layouts = SheetLayouts::default();
    let table = CommodityService::new(&wb, &layouts)
        .get_commodity_sources(&reference(), false)
        .unwrap();

    for year in [1990, 2000, 2014, 2016] {
        assert!(close(table.emission("oil", year).unwrap(), 7.41e-5));
    }
    // waste has an emission factor but no price anywhere
    assert!(close(table.emission("waste", 2014).unwrap(), 9.17e-5));
    assert_eq!(table.cost("waste", 2014), None);
}

#[test]
fn test_conversion_round_trip_against_workbook_factors() {
    let wb = common::workbook();
    let conversions = build_conversion_table(&wb, &ConversionRegion::default()).unwrap();
    let unit = SourceUnit::MassEquivalent {
        unit_label: "1 Mio. t Steinkohleeinheit (SKE)".to_string(),
    };
    let wb_costs = CommodityService::new(&wb, &SheetLayouts::default())
        .primary_costs()
        .unwrap();
    let coal_2013 = wb_costs.iter().find(|(f, _)| f.as_str() == "hard coal").unwrap().1[&2013];
    let back = to_source_value(coal_2013, &unit, &conversions).unwrap();
    assert!(close(back, 79.0));
}

#[test]
fn test_missing_conversion_row_is_fatal() {
    let mut grid = common::sheet_0_2();
    // drop the coal factor row
    grid.remove(9);
    let wb = InMemoryWorkbook::new()
        .with_sheet("0.2", grid)
        .with_sheet("26", common::sheet_26());
    let layouts = SheetLayouts::default();
    let err = CommodityService::new(&wb, &layouts)
        .get_commodity_sources(&reference(), false)
        .unwrap_err();
    assert!(matches!(err, ExtractError::UnknownUnit(unit) if unit.contains("Steinkohleeinheit")));
}

#[test]
fn test_reference_dataset_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(common::REFERENCE_CSV.as_bytes()).unwrap();
    let data = ReferenceDataset::from_path(file.path()).unwrap();
    assert_eq!(data.fuels.len(), 5);
    assert_eq!(data.fuels[4].fuel_price, None);
}

#[test]
fn test_reference_dataset_missing_file() {
    let err = ReferenceDataset::from_path("/nonexistent/znes.csv").unwrap_err();
    assert!(matches!(err, ExtractError::Io(_)));
}
