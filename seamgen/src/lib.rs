//! # Seamgen
//!
//! Contract-driven code generation for seams.
//!
//! A seam is a named interface described by a YAML contract: its inputs,
//! outputs, errors and examples. Seamgen provides:
//!
//! - **Contract loading**: parse and check contract documents
//! - **Contract validation**: report every problem across a directory of contracts
//! - **Template rendering**: `{{scalar}}` and `{{#block}}...{{/block}}` substitution
//!   with pluggable block renderers
//! - **Generation**: stubs, blueprints and test scaffolds packaged with size,
//!   line-count and checksum metadata
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seamgen::prelude::*;
//!
//! let contract = load_contract("contracts/UserSeam.contract.v1.yml")?;
//! let generator = Generator::new(GeneratorConfig::default());
//!
//! let result = generator.process(&GenerationRequest::new(Operation::GenerateAll, contract))?;
//! for file in &result.files {
//!     println!("{} ({} lines)", file.path, file.lines);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod contracts;
pub mod errors;
pub mod generation;
pub mod observability;
pub mod template;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::GeneratorConfig;
    pub use crate::contracts::{
        contract_hash, load_contract, parse_contract, validate_contracts, Contract,
        ContractExample, ErrorDescriptor, SeamCategory, ValidationReport,
    };
    pub use crate::errors::{
        ContractError, ErrorEntry, GenerationError, GenerationFailure, TemplateError,
    };
    pub use crate::generation::{
        FileType, GeneratedFile, GenerationOptions, GenerationRequest, GenerationResult,
        Generator, Operation, SeamResponse,
    };
    pub use crate::template::{
        BlockRegistry, FsTemplateStore, MemoryTemplateStore, TemplateData, TemplateRenderer,
        TemplateStore, UnknownPlaceholder,
    };
    pub use crate::utils::{iso_timestamp, Clock, FixedClock, SystemClock, Timestamp};
}
