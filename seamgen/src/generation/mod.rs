//! Generation requests, results and the orchestrator that connects them.
//!
//! [`Generator::process`] takes a [`GenerationRequest`], assembles template
//! data from the contract and options, renders the templates the operation
//! needs and returns a [`GenerationResult`] describing every proposed file.

mod data;
mod envelope;
mod orchestrator;
#[cfg(test)]
mod orchestrator_tests;
mod request;
mod result;

pub use data::build_template_data;
pub use envelope::{parse_request, SeamResponse};
pub use orchestrator::{Generator, MULTIPLE_TEMPLATES, PREVIEW_PREFIX};
pub use request::{GenerationOptions, GenerationRequest, Operation, DEFAULT_TEMPLATE_TYPE};
pub use result::{
    checksum, complexity_score, CompileDiagnostic, FileType, GeneratedFile, GenerationMetadata,
    GenerationResult, GenerationStatistics, GenerationWarning, LintCheck, LintIssue,
    TypescriptCheck, ValidationSummary, LINT_SCORE,
};
