// Shared fixtures: an in-memory copy of the workbook sheets the readers use,
// with the irregular offsets of the real publication.
#![allow(dead_code)]

use energy_figures::workbook::{Cell, InMemoryWorkbook};

pub const YEARS: [f64; 4] = [1990.0, 2013.0, 2014.0, 2015.0];

pub const OIL_PJ_PER_MIO_T: f64 = 41.868;
pub const COAL_PJ_PER_MIO_T: f64 = 29.308;
pub const OIL_PRICE_2014: f64 = 532.54;
pub const GAS_PRICE_2014: f64 = 6.5e6;

/// Label cell followed by one cell per entry in `values` (None → blank)
pub fn row(label: &str, values: &[Option<f64>]) -> Vec<Cell> {
    let mut cells = vec![Cell::text(label)];
    cells.extend(values.iter().map(|v| match v {
        Some(f) => Cell::number(*f),
        None => Cell::Empty,
    }));
    cells
}

fn year_header(leading_blanks: usize) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; leading_blanks];
    cells.extend(YEARS.iter().map(|y| Cell::number(*y)));
    cells
}

fn preamble(rows: usize) -> Vec<Vec<Cell>> {
    (0..rows)
        .map(|i| match i {
            0 => vec![Cell::text("Endenergieverbrauch nach Anwendungsbereichen")],
            1 => vec![Cell::text("Quelle: Arbeitsgemeinschaft Energiebilanzen, Stand 2014")],
            3 => vec![Cell::text("Einheit"), Cell::text("PJ")],
            _ => vec![Cell::Empty],
        })
        .collect()
}

/// Sheet 7a, header at row 11
pub fn sheet_7a() -> Vec<Vec<Cell>> {
    let mut grid = preamble(11);
    grid.push(year_header(1));
    grid.extend([
        row(
            "Endenergieverbrauch nach Anwendungsbereichen in der Industrie",
            &[Some(2900.0), Some(2600.0), Some(2545.0), Some(2560.0)],
        ),
        row("gesamt", &[Some(2900.0), Some(2600.0), Some(2545.0), Some(2560.0)]),
        row("  - Raumwärme", &[Some(250.0), Some(180.0), Some(170.0), Some(175.0)]),
        row("  - Prozesswärme", &[Some(1900.0), Some(1700.0), Some(1690.0), Some(1700.0)]),
        row("Strom", &[Some(800.0), Some(810.0), Some(800.0), Some(805.0)]),
        row("  - mechanische Energie", &[Some(600.0), Some(620.0), Some(610.0), Some(612.0)]),
        row("  - Raumwärme", &[None, Some(5.0), Some(5.0), Some(5.0)]),
        row("", &[]),
        row(
            "Endenergieverbrauch nach Anwendungsbereichen im Sektor Gewerbe, Handel, Dienstleistungen",
            &[Some(1500.0), Some(1400.0), Some(1350.0), Some(1380.0)],
        ),
        row("gesamt", &[Some(1500.0), Some(1400.0), Some(1350.0), Some(1380.0)]),
        row("  - Raumwärme", &[Some(800.0), Some(700.0), Some(640.0), Some(660.0)]),
        row("", &[]),
        row("Abweichungen in den Summen durch Runden", &[]),
    ]);
    grid
}

/// Sheet 7b, header at row 8
pub fn sheet_7b() -> Vec<Vec<Cell>> {
    let mut grid = preamble(8);
    grid.push(year_header(1));
    grid.extend([
        row(
            "Endenergieverbrauch nach Anwendungsbereichen in den privaten Haushalten",
            &[None, None, Some(2188.04), None],
        ),
        row("gesamt", &[Some(2600.0), Some(2500.0), Some(2188.04), Some(2300.0)]),
        row("  - Raumwärme", &[Some(1800.0), Some(1700.0), Some(1450.0), Some(1500.0)]),
        row("  - Warmwasser", &[Some(300.0), Some(320.0), Some(340.0), Some(345.0)]),
    ]);
    grid
}

/// Sheet 0.2: conversion factors (skip 6, 6 rows, blank column 1)
pub fn sheet_0_2() -> Vec<Vec<Cell>> {
    let mut grid: Vec<Vec<Cell>> = (0..6).map(|_| vec![Cell::Empty]).collect();
    grid[0] = vec![Cell::text("Umrechnungsfaktoren")];
    grid.push(vec![Cell::Empty, Cell::Empty, Cell::text("PJ"), Cell::text("Mio. t SKE")]);
    grid.push(vec![Cell::text("Einheit"), Cell::Empty, Cell::text("PJ"), Cell::text("Mio. t")]);
    grid.push(vec![
        Cell::text("1 Mio. t Rohöleinheit (RÖE)"),
        Cell::Empty,
        Cell::number(OIL_PJ_PER_MIO_T),
        Cell::number(1.4286),
    ]);
    grid.push(vec![
        Cell::text("1 Mio. t  Steinkohleeinheit (SKE)"),
        Cell::Empty,
        Cell::number(COAL_PJ_PER_MIO_T),
        Cell::number(1.0),
    ]);
    grid.push(vec![Cell::text("1 Mrd. kWh"), Cell::Empty, Cell::number(3.6), Cell::number(0.1228)]);
    grid.push(vec![Cell::text("1 PJ"), Cell::Empty, Cell::number(1.0), Cell::number(0.0341)]);
    grid
}

/// Sheet 26: import prices (skip 6, rows 4..7 after the header)
pub fn sheet_26() -> Vec<Vec<Cell>> {
    let mut grid: Vec<Vec<Cell>> = (0..6).map(|_| vec![Cell::Empty]).collect();
    let mut header = vec![Cell::Empty, Cell::text("Einheit")];
    header.extend(YEARS.iter().map(|y| Cell::number(*y)));
    grid.push(header);

    let priced = |label: &str, unit: &str, values: [Option<f64>; 4]| {
        let mut cells = vec![Cell::text(label), Cell::text(unit)];
        cells.extend(values.iter().map(|v| v.map(Cell::number).unwrap_or(Cell::Empty)));
        cells
    };
    grid.extend([
        priced("Energieträger", "", [None, None, None, None]),
        priced("Einfuhrpreise", "", [None, None, None, None]),
        priced("frei Grenze", "", [None, None, None, None]),
        priced("Rohöl", "", [None, None, None, None]),
        priced("  - Rohöl", "EUR/t", [Some(130.0), Some(579.0), Some(OIL_PRICE_2014), Some(319.0)]),
        priced("  - Erdgas", "EUR/TJ", [None, Some(7.4e6), Some(GAS_PRICE_2014), Some(5.7e6)]),
        priced("  - Steinkohlen", "EUR/t SKE", [Some(48.0), Some(79.0), None, Some(67.0)]),
        priced("Verbraucherpreise", "", [Some(1.0), Some(1.0), Some(1.0), Some(1.0)]),
    ]);
    grid
}

/// Sheet 20: renewable energy and capacity (skip 22, 24 rows)
pub fn sheet_20() -> Vec<Vec<Cell>> {
    let mut grid: Vec<Vec<Cell>> = (0..22).map(|_| vec![Cell::Empty]).collect();
    grid.push(vec![Cell::Empty, Cell::number(2015.0), Cell::number(2016.0)]);
    let blocks = [
        ("Wasserkraft", [20000.0, 21000.0], [5600.0, 5601.0], [3.3, 3.5]),
        ("Windenergie", [79000.0, 78000.0], [45000.0, 50000.0], [13.3, 12.9]),
        ("Biomasse", [44000.0, 45000.0], [7000.0, 7100.0], [7.4, 7.4]),
        ("biogener Abfall", [5800.0, 5900.0], [1600.0, 1600.0], [1.0, 1.0]),
        ("Photovoltaik", [38000.0, 38000.0], [39000.0, 40000.0], [6.4, 6.3]),
        ("Geothermie", [130.0, 175.0], [33.0, 38.0], [0.02, 0.03]),
    ];
    for (heading, energy, capacity, fraction) in blocks {
        grid.push(vec![Cell::text(heading)]);
        grid.push(row("Stromerzeugung (GWh)", &[Some(energy[0]), Some(energy[1])]));
        grid.push(row("Installierte Leistung (MW)", &[Some(capacity[0]), Some(capacity[1])]));
        grid.push(row("Anteil am Bruttostromverbrauch (%)", &[Some(fraction[0]), Some(fraction[1])]));
    }
    grid
}

/// Sheet 21: gross electricity consumption (skip 7)
pub fn sheet_21() -> Vec<Vec<Cell>> {
    let mut grid: Vec<Vec<Cell>> = (0..7).map(|_| vec![Cell::Empty]).collect();
    grid.push(vec![Cell::text("TWh"), Cell::number(2013.0), Cell::number(2014.0)]);
    grid.push(row("   Industrie", &[Some(240.0), Some(238.0)]));
    grid.push(row("   zusammen", &[Some(530.0), Some(523.988)]));
    grid
}

pub fn workbook() -> InMemoryWorkbook {
    InMemoryWorkbook::new()
        .with_sheet("0.2", sheet_0_2())
        .with_sheet("7a", sheet_7a())
        .with_sheet("7b", sheet_7b())
        .with_sheet("20", sheet_20())
        .with_sheet("21", sheet_21())
        .with_sheet("26", sheet_26())
}

/// Reference cost/emission dataset (prices EUR/GJ, emissions g/kJ)
pub const REFERENCE_CSV: &str = "\
Kraftstoffkosten und Emissionsfaktoren
,fuel price,fuel price,emission,emission
fuel,value,unit,value,unit
Hard coal,2.5,EUR/GJ,0.0934,g/kJ
Lignite,1.5,EUR/GJ,0.1113,g/kJ
Natural gas,6.9,EUR/GJ,0.0561,g/kJ
Oil,9.8,EUR/GJ,0.0741,g/kJ
Waste,,EUR/GJ,0.0917,g/kJ
";

/// Pumped hydro inventory with a facility lacking coordinates and one lacking energy
pub const STORAGE_CSV: &str = "\
dena,dena,dena,Wikipedia,Wikipedia,ZFES,ZFES
pump,turbine,efficiency,longitude,latitude,name,energy
1060,1060,0.8,10.81,50.51,Goldisthal,8480
320,320,,11.43,50.49,Hohenwarte II,2087
90,80,0.75,,,Ohne Koordinaten,400
164,160,0.77,7.95,47.61,Häusern,500
1000,1000,0.81,8.05,47.62,Wehr,6000
40,35,0.7,9.0,48.0,Ohne Energie,
";

pub const ASSIGNMENTS_CSV: &str = "\
facility,region
Goldisthal,TH
Hohenwarte II,TH
Häusern,BW
Wehr,BW
Ohne Energie,BW
";
