//! Pipeline stages downstream of the delta engine.
//!
//! - `ratio`: apply every method to the delta table.
//! - `select`: recency filtering and priority selection per region.
//! - `assemble`: package selected series, provenance and diagnostics.
//! - `export`: CSV rendering of the diagnostic table.
pub(crate) mod assemble;
pub(crate) mod export;
pub(crate) mod ratio;
pub(crate) mod select;
