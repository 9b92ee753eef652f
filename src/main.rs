use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use energy_figures::commodities::ReferenceDataset;
use energy_figures::config::Config;
use energy_figures::services::{CommodityService, StorageService};
use energy_figures::sheets::electricity_demand::annual_electricity_demand;
use energy_figures::sheets::read_sector_table;
use energy_figures::sheets::renewables::re_energy_capacity;
use energy_figures::storage::read_region_assignments;
use energy_figures::workbook::CalamineWorkbook;

#[derive(Parser)]
#[command(name = "energy-figures")]
#[command(about = "Extract energy statistics from the published workbook as JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Final energy consumption by sector and application
    Sectors {
        /// Sheet id, e.g. 7a or 7b
        #[arg(default_value = "7a")]
        sheet: String,
    },
    /// Fuel costs [EUR/J] and emissions [g/J]
    Commodities {
        /// Reference prices replace workbook prices in the reference year
        #[arg(long)]
        force_reference: bool,
    },
    /// Pumped hydro storage aggregated per region
    Storage {
        /// CSV with columns facility,region from the spatial join
        #[arg(long)]
        assignments: PathBuf,
    },
    /// Renewable energy, capacity and share per source
    Renewables,
    /// Annual electricity demand in TWh
    Demand {
        year: i32,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[instrument(skip_all)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the JSON output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,energy_figures=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!("Starting extraction with config: {:?}", config);

    match cli.command {
        Command::Sectors { sheet } => {
            let workbook = CalamineWorkbook::open(&config.workbook_path)?;
            let decoded = read_sector_table(
                &workbook,
                &sheet,
                &config.layouts.sectors,
                config.header_probe_limit,
            )?;
            print_json(&decoded)?;
        }
        Command::Commodities { force_reference } => {
            let workbook = CalamineWorkbook::open(&config.workbook_path)?;
            let reference = ReferenceDataset::from_path(&config.reference_dataset_path)?;
            let service = CommodityService::new(&workbook, &config.layouts);
            let table = service.get_commodity_sources(&reference, force_reference)?;
            print_json(&table)?;
        }
        Command::Storage { assignments } => {
            let assignments = read_region_assignments(File::open(&assignments)?)?;
            let service = StorageService::new(config.missing_efficiency());
            let regions =
                service.pumped_hydro_storage_from_path(&config.hydro_storage_path, &assignments)?;
            print_json(&regions)?;
        }
        Command::Renewables => {
            let workbook = CalamineWorkbook::open(&config.workbook_path)?;
            let table = re_energy_capacity(&workbook, &config.layouts.renewables)?;
            print_json(&table)?;
        }
        Command::Demand { year } => {
            let workbook = CalamineWorkbook::open(&config.workbook_path)?;
            let demand = annual_electricity_demand(&workbook, &config.layouts.demand, year)?;
            print_json(&demand)?;
        }
    }

    Ok(())
}
