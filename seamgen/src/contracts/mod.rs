//! Seam contracts.
//!
//! This module provides:
//! - The contract data model
//! - Loading contracts from YAML
//! - Directory-wide validation
//! - Deterministic contract hashing

mod checks;
mod hash;
mod loader;
mod types;
mod validator;

pub use hash::{canonical_json, contract_hash, hash_value};
pub use loader::{load_contract, parse_contract};
pub use types::{
    contract_file_name, Contract, ContractExample, ContractMetadata, Dependency, DependencyKind,
    ErrorDescriptor, ErrorExample, SeamCategory, Stability,
};
pub use validator::{validate_contracts, ValidationReport};
