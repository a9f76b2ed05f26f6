//! Feature modules
//!
//! Leaves first: address → cache → dependency_graph, all owned by session.

pub mod address;
pub mod cache;
pub mod dependency_graph;
pub mod session;
