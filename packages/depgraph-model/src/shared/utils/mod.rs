//! Shared utilities

pub mod aar_layout;
