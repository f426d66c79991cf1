//! SASB Annotation Domain Layer
//!
//! This crate contains the data model shared by every other crate in the
//! workspace: metric descriptors, page contexts, machine-suggested candidates
//! and human-confirmed annotations. It also defines the trait seam through
//! which an external text-understanding capability is reached.
//!
//! ## Key Concepts
//!
//! - **Metric**: a single SASB disclosure requirement (e.g. `TC-SC-110a.1`)
//! - **Candidate**: a machine-suggested, unconfirmed value for a metric on a page
//! - **Annotation**: a human-confirmed record, persisted per metric
//! - **BBox**: a rectangle in page-image pixel coordinates marking evidence
//!
//! ## Architecture
//!
//! - Pure data types and validation only
//! - No file or network I/O
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotation;
pub mod bbox;
pub mod candidate;
pub mod category;
pub mod metric;
pub mod page;
pub mod traits;

// Re-exports for convenience
pub use annotation::{Annotation, MetricAnnotationFile};
pub use bbox::BBox;
pub use candidate::Candidate;
pub use category::Category;
pub use metric::{CatalogError, MetricCatalog, MetricDescriptor, MetricInfo};
pub use page::PageContext;
