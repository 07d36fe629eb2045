//! # dash-view
//!
//! Selection filter and view projector for gamedash.
//!
//! Data flows one way: registry tables are narrowed by a [`Selection`]
//! ([`filter`]), then projected onto backend-agnostic chart specs
//! ([`Projector`]) or KPI widgets ([`kpi`]). [`Dashboard`] ties the stages
//! together for a host that only knows view names.
//!
//! ```
//! use dash_registry::Registry;
//! use dash_view::{Dashboard, Selection, ViewKind, ViewParams};
//!
//! let registry = Registry::builtin().unwrap();
//! let selection = Selection::entities(["Shift Up", "Krafton"]);
//! let specs = Dashboard::new(registry)
//!     .render(ViewKind::PeriodSnapshot, &selection, &ViewParams::default())
//!     .unwrap();
//! assert_eq!(specs[0].text_column("entity"), vec!["Krafton", "Shift Up"]);
//! ```

pub mod dashboard;
pub mod filter;
pub mod kpi;
pub mod projector;

pub use dashboard::{Dashboard, ViewKind, ViewParams};
pub use filter::{PeriodFilter, Selection, filter, filter_table};
pub use projector::{Projector, ProductivityViews};
