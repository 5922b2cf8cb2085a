pub mod coerce;
pub mod errors;
pub mod model;
mod reader;
pub mod schema;

pub use errors::ParserError;
pub use model::{
    CoercedCell, CoercionPolicy, CoercionReport, ColumnLayout, ColumnRole, FinancialTable,
    ParseOptions, ResolvedColumn,
};
pub use reader::parse_financial_report;
pub use schema::{normalize_headers, normalize_label, resolve_columns};
