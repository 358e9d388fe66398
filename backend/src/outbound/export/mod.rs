//! Export adapters rendering records into downloadable documents.

mod xlsx;

pub use xlsx::XlsxRecordExporter;
