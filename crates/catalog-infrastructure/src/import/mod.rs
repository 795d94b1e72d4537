//! Import sources

pub mod xlsx_source;

pub use xlsx_source::XlsxImportSource;
