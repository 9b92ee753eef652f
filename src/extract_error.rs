#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Header '{column}' not found in sheet {sheet} (probed skip rows {first_skip}..={last_skip})")]
    HeaderNotFound {
        sheet: String,
        column: String,
        first_skip: usize,
        last_skip: usize,
    },

    #[error("Duplicate key ({category}, {subcategory}, {item})")]
    DuplicateKey {
        category: String,
        subcategory: String,
        item: String,
    },

    #[error("No conversion factor for unit: {0}")]
    UnknownUnit(String),

    #[error("Column '{column}' missing in {source_name}")]
    MissingColumn { source_name: String, column: String },

    #[error("Row '{label}' missing in sheet {sheet}")]
    MissingRow { sheet: String, label: String },

    #[error("Invalid data in {source_name} at row {row}: {msg}")]
    InvalidData {
        source_name: String,
        row: usize,
        msg: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
