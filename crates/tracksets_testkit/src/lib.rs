//! # Tracksets Testkit
//!
//! Test utilities for tracksets.
//!
//! This crate provides:
//! - Ping and shard directory fixtures
//! - Property-based ping stream generators using proptest
//! - Cross-crate properties of the segmenter and the shard buffer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracksets_testkit::prelude::*;
//!
//! #[test]
//! fn builds_into_temp_dir() {
//!     let dir = TempShardDir::new();
//!     let mut store = dir.store_for_write();
//!     // ... build into the store
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod properties;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::properties::*;
}

pub use fixtures::*;
pub use generators::*;
pub use properties::*;
