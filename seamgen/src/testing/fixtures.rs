//! Sample contracts for tests.

use serde_json::json;

use crate::contracts::{
    Contract, ContractExample, Dependency, ErrorDescriptor, SeamCategory,
};

/// A complete, valid contract document for `UserSeam` v1.
pub const SAMPLE_CONTRACT_YAML: &str = r#"name: UserSeam
version: v1
category: api
description: Looks up and manages users
inputs:
  request:
    type: object
    required: [operation]
    properties:
      operation:
        type: string
        enum: [get, delete]
        description: What to do
      userId:
        type: string
        description: Target user
outputs:
  success:
    type: object
    properties:
      id:
        type: string
      email:
        type: string
errors:
  - code: USER_NOT_FOUND
    name: UserNotFoundError
    description: No user with that id
    retryable: false
    httpStatus: 404
examples:
  - name: Get user
    input:
      operation: get
      userId: "123"
    output:
      id: "123"
      email: ada@example.com
dependencies:
  - seam: AuthSeam
    version: v2
    type: required
"#;

/// The contract described by [`SAMPLE_CONTRACT_YAML`], built in code.
#[must_use]
pub fn sample_contract() -> Contract {
    Contract::new(
        "UserSeam",
        "v1",
        SeamCategory::Api,
        "Looks up and manages users",
    )
    .with_inputs(json!({
        "request": {
            "type": "object",
            "required": ["operation"],
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["get", "delete"],
                    "description": "What to do"
                },
                "userId": {"type": "string", "description": "Target user"}
            }
        }
    }))
    .with_outputs(json!({
        "success": {
            "type": "object",
            "properties": {
                "id": {"type": "string"},
                "email": {"type": "string"}
            }
        }
    }))
    .with_error(ErrorDescriptor::new(
        "USER_NOT_FOUND",
        "UserNotFoundError",
        "No user with that id",
    ))
    .with_example(ContractExample::new(
        "Get user",
        json!({"operation": "get", "userId": "123"}),
        json!({"id": "123", "email": "ada@example.com"}),
    ))
    .with_dependency(Dependency::new("AuthSeam", "v2"))
}
