//! Common types, traits, and error definitions for planimetry_nav
//!
//! This module provides the foundational building blocks shared by the
//! mapping, planning and tracking modules.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
