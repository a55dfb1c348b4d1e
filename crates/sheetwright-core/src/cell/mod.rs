//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The typed value stored in a cell
//! - [`CellData`] - A value plus its number format
//! - [`CellAddress`] / [`CellRange`] - A cell's location (e.g., "A1")
//! - [`CellStorage`] - Sparse row-major grid with row/column sizing

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::CellStorage;
pub use value::{CellData, CellValue};
