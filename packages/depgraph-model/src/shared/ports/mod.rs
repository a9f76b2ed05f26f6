//! Ports to the build engine

mod static_scope;
mod variant_scope;

pub use static_scope::{StaticClasspath, StaticVariantScope};
pub use variant_scope::{
    ArtifactCollection, ArtifactScope, ConsumedConfigType, ResolutionFailure, VariantScope,
};
