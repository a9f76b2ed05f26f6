//! Dependency graph assembly
//!
//! Per variant: query the classpath artifacts, merge jar/manifest/AAR
//! results, then build the level-2 graph (simple or full) or the level-1
//! dependency lists. Libraries land in the session's library map as a side
//! effect; resolution failures are collected, never thrown.

mod artifacts;
mod assembler;
mod failures;

pub use artifacts::{collect_all_artifacts, configuration_name, runtime_component_ids};
pub use assembler::DependencyGraphAssembler;
pub use failures::{extract_coordinate, DependencyError, DependencyFailureHandler};
