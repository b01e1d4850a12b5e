//! Testing utilities for seamgen.
//!
//! This module provides:
//! - Sample contracts
//! - Template stores that record or fail loads
//! - Assertions for generation outcomes

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_failed_with, assert_file, assert_generated, assert_statistics_consistent,
};
pub use fixtures::{sample_contract, SAMPLE_CONTRACT_YAML};
pub use mocks::{FailingTemplateStore, RecordingTemplateStore};
