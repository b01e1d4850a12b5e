//! Test assertions for generation outcomes.

use crate::errors::GenerationFailure;
use crate::generation::{GeneratedFile, GenerationResult};

/// Asserts success and returns the result.
pub fn assert_generated(outcome: Result<GenerationResult, GenerationFailure>) -> GenerationResult {
    match outcome {
        Ok(result) => result,
        Err(failure) => panic!("Expected success, got: {failure}"),
    }
}

/// Asserts failure with `code` as the primary error code.
pub fn assert_failed_with(
    outcome: Result<GenerationResult, GenerationFailure>,
    code: &str,
) -> GenerationFailure {
    match outcome {
        Ok(result) => panic!(
            "Expected failure {code}, got {} file(s)",
            result.files.len()
        ),
        Err(failure) => {
            assert_eq!(
                failure.primary_code(),
                Some(code),
                "Expected code {code}, got {failure}"
            );
            failure
        }
    }
}

/// Asserts the result holds a file whose path ends with `suffix` and returns it.
pub fn assert_file<'a>(result: &'a GenerationResult, suffix: &str) -> &'a GeneratedFile {
    match result.files.iter().find(|f| f.path.ends_with(suffix)) {
        Some(file) => file,
        None => panic!(
            "Expected a file ending with '{suffix}'. Paths: {:?}",
            result.files.iter().map(|f| f.path.as_str()).collect::<Vec<_>>()
        ),
    }
}

/// Asserts that statistics agree with the file list.
pub fn assert_statistics_consistent(result: &GenerationResult) {
    let stats = &result.statistics;
    assert_eq!(stats.total_files, result.files.len(), "totalFiles mismatch");
    assert_eq!(
        stats.total_lines,
        result.files.iter().map(|f| f.lines).sum::<usize>(),
        "totalLines mismatch"
    );
    assert_eq!(
        stats.total_size,
        result.files.iter().map(|f| f.size).sum::<usize>(),
        "totalSize mismatch"
    );
}
