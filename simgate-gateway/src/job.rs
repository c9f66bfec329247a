//! The record handed to the external job-submission collaborator.

use serde::Serialize;

use simgate_params::ParameterSet;

/// A fully-resolved, fully-validated submission, ready for the task store
/// and scheduler. Whether fields like `ensemble` are promoted out of `input`
/// into top-level task properties is the submission layer's policy, not
/// part of this contract.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedJob {
    pub simulation: String,
    pub version: String,
    pub command: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u32>,
    pub input: ParameterSet,
}
