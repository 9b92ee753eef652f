/// Three-level index reconstruction from a single label column
///
/// Sector tables carry category, subcategory and item in one column and
/// rely on indentation and dashes to tell them apart:
///
/// ```text
/// Endenergieverbrauch nach Anwendungsbereichen in der Industrie   <- category (sentinel)
/// gesamt                                                          <- subcategory (no dash)
///   - Raumwärme                                                   <- item (dash)
///   - Prozesswärme
/// Strom
///   - mechanische Energie
/// ```
///
/// The decoder folds over the rows carrying the current category and
/// subcategory and emits one record per item row.
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::extract_error::ExtractError;
use crate::workbook::RawTable;

const SEPARATOR: char = '-';
const LABEL_COLUMN: usize = 0;

/// Ordered substring replacement applied to category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripRule {
    pub pattern: String,
    pub replacement: String,
}

impl StripRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Rule that removes `pattern` entirely
    pub fn remove(pattern: impl Into<String>) -> Self {
        Self::new(pattern, "")
    }
}

/// One decoded row keyed by (category, subcategory, item)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchicalRecord {
    pub category: String,
    pub subcategory: String,
    pub item: String,
    /// Year → value; years with a blank or placeholder cell are absent
    pub values: BTreeMap<i32, f64>,
}

impl HierarchicalRecord {
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.category, &self.subcategory, &self.item)
    }

    pub fn value(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }
}

/// Decoder output
///
/// `records` holds item rows; `subtotals` holds the subcategory header rows
/// (keyed with item = subcategory), which carry the subcategory totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedTable {
    pub records: Vec<HierarchicalRecord>,
    pub subtotals: Vec<HierarchicalRecord>,
}

impl DecodedTable {
    pub fn record(&self, category: &str, subcategory: &str, item: &str) -> Option<&HierarchicalRecord> {
        self.records
            .iter()
            .find(|r| r.key() == (category, subcategory, item))
    }

    pub fn value(&self, category: &str, subcategory: &str, item: &str, year: i32) -> Option<f64> {
        self.record(category, subcategory, item)
            .and_then(|r| r.value(year))
    }

    pub fn subtotal(&self, category: &str, subcategory: &str, year: i32) -> Option<f64> {
        self.subtotals
            .iter()
            .find(|r| r.category == category && r.subcategory == subcategory)
            .and_then(|r| r.value(year))
    }

    /// Distinct categories in sheet order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.subtotals
            .iter()
            .chain(self.records.iter())
            .map(|r| r.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

/// Values carried from row to row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CarryState {
    category: Option<String>,
    subcategory: Option<String>,
}

/// What a single row contributes to the output
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowOutput {
    Nothing,
    Subtotal {
        category: String,
        subcategory: String,
    },
    Item {
        category: String,
        subcategory: String,
        item: String,
    },
    /// Item row inside a category but with no subcategory carried
    Orphan { category: String, item: String },
}

/// Pure transition: next carried state plus the row's contribution
fn step(
    state: &CarryState,
    label: &str,
    category_sentinel: &str,
    strip_rules: &[StripRule],
) -> (CarryState, RowOutput) {
    if label.is_empty() {
        // A blank line ends the current block; items need a fresh subcategory header
        let next = CarryState {
            category: state.category.clone(),
            subcategory: None,
        };
        return (next, RowOutput::Nothing);
    }

    if label.contains(category_sentinel) {
        let next = CarryState {
            category: Some(apply_strip_rules(label, strip_rules)),
            subcategory: None,
        };
        return (next, RowOutput::Nothing);
    }

    if !label.contains(SEPARATOR) {
        let next = CarryState {
            category: state.category.clone(),
            subcategory: Some(label.to_string()),
        };
        let output = match &state.category {
            Some(category) => RowOutput::Subtotal {
                category: category.clone(),
                subcategory: label.to_string(),
            },
            None => RowOutput::Nothing,
        };
        return (next, output);
    }

    let output = match (&state.category, &state.subcategory) {
        (Some(category), Some(subcategory)) => RowOutput::Item {
            category: category.clone(),
            subcategory: subcategory.clone(),
            item: label.to_string(),
        },
        (Some(category), None) => RowOutput::Orphan {
            category: category.clone(),
            item: label.to_string(),
        },
        (None, _) => RowOutput::Nothing,
    };
    (state.clone(), output)
}

/// Apply ordered replacements to a category label
pub fn apply_strip_rules(label: &str, strip_rules: &[StripRule]) -> String {
    strip_rules
        .iter()
        .fold(label.to_string(), |acc, rule| {
            acc.replace(&rule.pattern, &rule.replacement)
        })
        .trim()
        .to_string()
}

/// Decode the first column of `table` into (category, subcategory, item) records
///
/// Rows before the first category sentinel are dropped, as are item rows
/// without a carried subcategory (directly after a category row or a blank
/// line); the latter are logged as warnings and never filed under the
/// category label. Two item rows decoding to the same triple
/// fail with `DuplicateKey`. A repeated subcategory header replaces the
/// carried subcategory and its subtotal.
pub fn decode(
    table: RawTable,
    category_sentinel: &str,
    strip_rules: &[StripRule],
) -> Result<DecodedTable, ExtractError> {
    let year_columns = table.year_columns();
    debug!("Decoding {} rows over {} year columns", table.row_count(), year_columns.len());

    let values_of = |row: usize| -> BTreeMap<i32, f64> {
        year_columns
            .iter()
            .filter_map(|&(col, year)| table.value(row, col).map(|v| (year, v)))
            .collect()
    };

    let mut decoded = DecodedTable::default();
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut subtotal_index: HashMap<(String, String), usize> = HashMap::new();
    let mut dropped = 0usize;

    let mut state = CarryState::default();
    for row in 0..table.row_count() {
        let label = table.label(row, LABEL_COLUMN);
        let (next, output) = step(&state, &label, category_sentinel, strip_rules);
        state = next;

        match output {
            RowOutput::Nothing => dropped += 1,
            RowOutput::Orphan { category, item } => {
                warn!("Item '{}' in '{}' has no subcategory, dropped", item, category);
                dropped += 1;
            }
            RowOutput::Subtotal {
                category,
                subcategory,
            } => {
                let record = HierarchicalRecord {
                    item: subcategory.clone(),
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                    values: values_of(row),
                };
                match subtotal_index.get(&(category.clone(), subcategory.clone())) {
                    Some(&pos) => {
                        debug!("Subcategory '{}' repeated in '{}', replacing", subcategory, category);
                        decoded.subtotals[pos] = record;
                    }
                    None => {
                        subtotal_index.insert((category, subcategory), decoded.subtotals.len());
                        decoded.subtotals.push(record);
                    }
                }
            }
            RowOutput::Item {
                category,
                subcategory,
                item,
            } => {
                if !seen.insert((category.clone(), subcategory.clone(), item.clone())) {
                    return Err(ExtractError::DuplicateKey {
                        category,
                        subcategory,
                        item,
                    });
                }
                decoded.records.push(HierarchicalRecord {
                    category,
                    subcategory,
                    item,
                    values: values_of(row),
                });
            }
        }
    }

    info!(
        "Decoded {} item records and {} subtotals ({} rows without output)",
        decoded.records.len(),
        decoded.subtotals.len(),
        dropped
    );
    Ok(decoded)
}
