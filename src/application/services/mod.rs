//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod catalog;
mod selection;

pub use catalog::CatalogService;
pub use selection::SelectionService;
