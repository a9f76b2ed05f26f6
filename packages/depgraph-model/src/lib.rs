/*
 * Depgraph Model - IDE dependency model engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (artifacts, addresses, libraries, graph items) + ports
 * - features/    : Vertical slices (address → cache → dependency_graph → session)
 * - tooling/     : Model dispatch for the IDE transport
 * - config/      : Session configuration (YAML v1)
 *
 * Turns the resolved artifact collections of one build variant into a flat,
 * deduplicated, serializable dependency graph plus a per-session
 * address → library registry.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)] // AAR naming

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and ports
pub mod shared;

/// Feature modules
pub mod features;

/// Tooling model dispatch
pub mod tooling;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, GraphBuildConfig};
pub use errors::{ModelError, Result};
pub use features::dependency_graph::{DependencyFailureHandler, DependencyGraphAssembler};
pub use features::session::GraphBuildSession;
pub use shared::models::{
    Address, ComponentIdentifier, DependencyGraph, GraphItem, Library, ResolvedArtifact,
    SyncIssue,
};
pub use shared::ports::VariantScope;
pub use tooling::{ModelRegistry, ToolingModel};
