//! Variant outputs

use crate::errors::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    Main,
    FullSplit,
    Split,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub output_type: OutputType,
    pub file: PathBuf,
    /// Density/ABI/language filters of a split
    #[serde(default)]
    pub filters: Vec<String>,
}

/// Outputs of one variant with their designated main output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputCandidates {
    outputs: Vec<OutputFile>,
    main: usize,
}

impl OutputCandidates {
    /// Picks the `Main` output, else the unfiltered `FullSplit`
    pub fn new(variant: &str, outputs: Vec<OutputFile>) -> Result<Self> {
        let main = outputs
            .iter()
            .position(|o| o.output_type == OutputType::Main)
            .or_else(|| {
                outputs
                    .iter()
                    .position(|o| o.output_type == OutputType::FullSplit && o.filters.is_empty())
            })
            .ok_or_else(|| ModelError::MissingMainOutput {
                variant: variant.to_string(),
                candidates: outputs.len(),
            })?;

        Ok(Self { outputs, main })
    }

    pub fn main_output(&self) -> &OutputFile {
        &self.outputs[self.main]
    }

    pub fn outputs(&self) -> &[OutputFile] {
        &self.outputs
    }
}
