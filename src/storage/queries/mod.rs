//! Database query modules.
//!
//! Each module provides plain functions over a borrowed connection.

pub mod labels;
pub mod threads;
