//! # dash-core
//!
//! Core types and error types for gamedash.
//!
//! This crate provides the foundational types shared across all gamedash crates:
//! - Tri-state metric values and projected cells
//! - Chronological period tags (`1Q25`, `2Q25`, ...)
//! - Row structs for every dataset table, plus the [`rows::Row`] field-lookup trait
//! - The canonical entity catalog (display order and colours)
//! - The backend-agnostic [`chart::ChartSpec`] and [`chart::Kpi`] output types
//! - Presentation units attached to field names
//! - Cross-cutting error types

pub mod catalog;
pub mod chart;
pub mod errors;
pub mod period;
pub mod rows;
pub mod units;
pub mod value;

pub use catalog::{Catalog, EntityInfo};
pub use chart::{ChartKind, ChartSpec, Direction, Kpi, Overlay, Record, SortSpec};
pub use errors::CoreError;
pub use period::Period;
pub use rows::{AnnualMetricRow, IpBreakdownRow, Observation, ProductivityRow, Row, to_record};
pub use units::Unit;
pub use value::{Cell, Metric};
