//! Dependency resolution across source files.
//!
//! [`order`] infers each file's namespace and the foreign namespaces it
//! mentions (see [`scan`](scan::scan)) and returns a processing order in
//! which every namespace is fully declared before any file that uses it.

pub mod order;
pub mod scan;

pub use order::order;
pub use scan::{FileImports, scan};
