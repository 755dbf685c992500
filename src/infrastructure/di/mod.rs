//! Dependency injection: wires settings and I/O implementations into services.

mod service_container;

pub use service_container::ServiceContainer;
