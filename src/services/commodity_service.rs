use std::collections::BTreeMap;
use tracing::{info, instrument};

use crate::commodities::{merge, prices_from_workbook, CommodityTable, FuelName, MergeOptions, ReferenceDataset};
use crate::config::SheetLayouts;
use crate::extract_error::ExtractError;
use crate::units::{build_conversion_table, YearSeries};
use crate::workbook::WorkbookAccessor;

/// Fuel costs and emissions from the workbook plus the reference dataset
pub struct CommodityService<'a, W: WorkbookAccessor + ?Sized> {
    workbook: &'a W,
    layouts: &'a SheetLayouts,
}

impl<'a, W: WorkbookAccessor + ?Sized> CommodityService<'a, W> {
    pub fn new(workbook: &'a W, layouts: &'a SheetLayouts) -> Self {
        Self { workbook, layouts }
    }

    /// Workbook import prices in EUR/J
    pub fn primary_costs(&self) -> Result<BTreeMap<FuelName, YearSeries>, ExtractError> {
        let conversions = build_conversion_table(self.workbook, &self.layouts.conversion)?;
        prices_from_workbook(self.workbook, &self.layouts.prices, &conversions)
    }

    /// Full commodity table: emissions in g/J, costs in EUR/J
    #[instrument(skip(self, reference))]
    pub fn get_commodity_sources(
        &self,
        reference: &ReferenceDataset,
        force_secondary: bool,
    ) -> Result<CommodityTable, ExtractError> {
        info!("Get prices and emissions for commodity sources");
        let primary = self.primary_costs()?;
        let options = MergeOptions {
            force_secondary,
            ..self.layouts.merge.clone()
        };
        let table = merge(
            &primary,
            &reference.emissions(),
            &reference.fallback_prices(),
            &options,
        );
        info!("Emissions: [g/J], Costs: [EUR/J]");
        Ok(table)
    }
}
