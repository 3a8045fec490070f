use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, BomError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests the netlist, reconciles the workbook, or emits output files.
#[derive(Debug, Error)]
pub enum BomError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the CSV export fails.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the netlist XML cannot be parsed at all.
    #[error("netlist XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Raised when the netlist parses as XML but does not follow the KiCad
    /// generic netlist conventions.
    #[error("invalid netlist: {0}")]
    InvalidNetlist(String),

    /// Raised when the workbook lacks a column the reconciliation requires.
    #[error("workbook is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
