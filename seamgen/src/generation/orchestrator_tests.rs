//! End-to-end tests for the generation orchestrator.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::config::GeneratorConfig;
    use crate::contracts::{contract_hash, Contract, ContractExample, SeamCategory};
    use crate::errors::codes;
    use crate::generation::{
        FileType, GenerationOptions, GenerationRequest, Generator, Operation, PREVIEW_PREFIX,
    };
    use crate::template::{MemoryTemplateStore, TemplateData, UnknownPlaceholder};
    use crate::testing::{
        assert_failed_with, assert_file, assert_generated, assert_statistics_consistent,
        sample_contract, FailingTemplateStore, RecordingTemplateStore,
    };
    use crate::utils::FixedClock;

    const NOW: &str = "2024-05-01T12:00:00Z";

    fn generator() -> Generator {
        generator_with(GeneratorConfig::default())
    }

    fn generator_with(config: GeneratorConfig) -> Generator {
        Generator::new(config)
            .with_store(Arc::new(MemoryTemplateStore::builtin()))
            .with_clock(Arc::new(FixedClock::parse(NOW).unwrap()))
    }

    fn request(operation: Operation) -> GenerationRequest {
        GenerationRequest::new(operation, sample_contract())
    }

    #[test]
    fn test_generate_stub_minimal_contract() {
        let contract = Contract::new("UserSeam", "v1", SeamCategory::Api, "Manages users");
        let request = GenerationRequest::new(Operation::GenerateStub, contract)
            .with_template_type("typescript");

        let result = assert_generated(generator().process(&request));

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("UserSeam.ts"));
        assert_eq!(result.statistics.total_files, 1);
        assert!(result
            .generation
            .template_used
            .ends_with("typescript_stub.ts.template"));
        assert_eq!(result.files[0].file_type, FileType::Typescript);
        assert_statistics_consistent(&result);
    }

    #[test]
    fn test_stub_content() {
        let result = assert_generated(generator().process(&request(Operation::GenerateStub)));
        let stub = assert_file(&result, "src/generated/UserSeam.ts");

        assert!(stub.content.contains(" * UserSeam Stub - Auto-Generated"));
        assert!(stub
            .content
            .contains(" * Contract: contracts/UserSeam.contract.v1.yml"));
        assert!(stub.content.contains("Generated: 2024-05-01T12:00:00.000Z by seamgen 1.0.0"));
        assert!(stub.content.contains("export interface UserSeamInput {"));
        assert!(stub.content.contains(r#"  operation: "get" | "delete";"#));
        assert!(stub.content.contains("  userId?: string;"));
        assert!(stub.content.contains("export interface UserSeamOutput {"));
        assert!(stub.content.contains("export class UserNotFoundError extends Error {"));
        assert!(stub.content.contains("// depends on AuthSeam@v2 (required)"));
        assert!(stub.content.contains(r#""userId": "123""#));
        assert!(!stub.content.contains("{{"));
        assert!(!stub.content.contains("import type"));
    }

    #[test]
    fn test_result_metadata() {
        let result = assert_generated(generator().process(&request(Operation::GenerateStub)));

        assert_eq!(result.generation.generated_at, "2024-05-01T12:00:00.000Z");
        assert_eq!(result.generation.generator_version, "1.0.0");
        assert_eq!(
            result.generation.contract_hash,
            contract_hash(&sample_contract()).unwrap()
        );
        assert!(result.validation.typescript.compiles);
        assert_eq!(result.validation.linting.score, 100.0);
        assert_eq!(result.statistics.complexity_score, 1.0);

        let file = &result.files[0];
        assert_eq!(file.size, file.content.len());
        assert_eq!(file.lines, file.content.split('\n').count());
        assert_eq!(file.checksum.len(), 32);
    }

    #[test]
    fn test_default_templates_produce_no_warnings() {
        let generator = generator();
        for operation in [Operation::GenerateStub, Operation::GenerateAll] {
            let result = assert_generated(generator.process(&request(operation)));
            assert!(
                result.generation.warnings.is_empty(),
                "{operation}: {:?}",
                result.generation.warnings
            );
        }
    }

    #[test]
    fn test_unsupported_block_is_reported() {
        let store = MemoryTemplateStore::builtin()
            .with_template("typescript_stub.ts.template", "{{#banner}}x{{/banner}}// {{seamName}}");
        let generator = generator().with_store(Arc::new(store));

        let result = assert_generated(generator.process(&request(Operation::GenerateStub)));
        let warnings = &result.generation.warnings;
        assert_eq!(result.files[0].content, "// UserSeam");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, "unsupported_block");
        assert!(warnings[0].message.contains("'banner'"));
    }

    #[test]
    fn test_generate_test_without_examples() {
        let contract = Contract::new("UserSeam", "v1", SeamCategory::Api, "Manages users");
        let request = GenerationRequest::new(Operation::GenerateTest, contract);

        let result = assert_generated(generator().process(&request));
        let content = &result.files[0].content;
        assert!(!content.contains("= ;"));
        assert!(!content.contains("matches the first contract example"));
        assert!(content.contains("rejects malformed input"));
        assert!(result.generation.warnings.is_empty());
    }

    #[test]
    fn test_forced_examples_without_contract_example_stay_valid() {
        let contract = Contract::new("UserSeam", "v1", SeamCategory::Api, "Manages users");
        let request = GenerationRequest::new(Operation::GenerateTest, contract)
            .with_options(GenerationOptions::new().with_examples(true));

        let result = assert_generated(generator().process(&request));
        let content = &result.files[0].content;
        assert!(content.contains("    const input = {};"));
        assert!(content.contains("    const expected = {};"));
    }

    #[test]
    fn test_comment_terminators_are_escaped_in_stub() {
        let contract = Contract::new(
            "UserSeam",
            "v1",
            SeamCategory::Api,
            "glob src/*/ files */ oops",
        )
        .with_example(ContractExample::new(
            "Pattern",
            json!({"pattern": "a*/b"}),
            json!({"matched": "*/"}),
        ));
        let request = GenerationRequest::new(Operation::GenerateStub, contract);

        let result = assert_generated(generator().process(&request));
        let content = &result.files[0].content;
        assert!(content.contains(" * glob src/* / files * / oops"));
        assert!(content.contains(r#""pattern": "a* /b""#));
        assert!(content.contains(r#""matched": "* /""#));
        assert!(!content.contains("*/ oops"));
        assert!(!content.contains("a*/b"));
    }

    #[test]
    fn test_preview_matches_stub_except_path() {
        let generator = generator();
        let stub = assert_generated(generator.process(&request(Operation::GenerateStub)));
        let preview = assert_generated(generator.process(&request(Operation::Preview)));

        assert_eq!(preview.files.len(), 1);
        assert_eq!(preview.files[0].content, stub.files[0].content);
        assert_eq!(preview.files[0].checksum, stub.files[0].checksum);
        assert_eq!(
            preview.files[0].path,
            format!("{PREVIEW_PREFIX}{}", stub.files[0].path)
        );
        assert_eq!(preview.files[0].path, "[PREVIEW] src/generated/UserSeam.ts");
    }

    #[test]
    fn test_generate_all_is_concatenation_of_parts() {
        let generator = generator();
        let all = assert_generated(generator.process(&request(Operation::GenerateAll)));
        let parts: Vec<_> = [
            Operation::GenerateStub,
            Operation::GenerateBlueprint,
            Operation::GenerateTest,
        ]
        .into_iter()
        .map(|op| assert_generated(generator.process(&request(op))))
        .collect();

        let expected: Vec<_> = parts.iter().flat_map(|r| r.files.clone()).collect();
        assert_eq!(all.files, expected);
        assert_eq!(
            all.statistics.total_lines,
            parts.iter().map(|r| r.statistics.total_lines).sum::<usize>()
        );
        assert_eq!(
            all.statistics.total_size,
            parts.iter().map(|r| r.statistics.total_size).sum::<usize>()
        );
        assert_eq!(all.generation.template_used, "multiple");
        assert_eq!(all.statistics.complexity_score, 2.0);
        assert_eq!(all.statistics.files_by_type.len(), 3);
        assert_statistics_consistent(&all);
    }

    #[test]
    fn test_blueprint_and_test_paths() {
        let generator = generator();
        let blueprint =
            assert_generated(generator.process(&request(Operation::GenerateBlueprint)));
        let file = assert_file(&blueprint, "blueprints/UserSeam.md");
        assert_eq!(file.file_type, FileType::Markdown);
        assert!(file.content.contains("| Author   | SDD Generator   |"));
        assert!(blueprint
            .generation
            .template_used
            .ends_with("blueprint.md.template"));

        let test = assert_generated(generator.process(&request(Operation::GenerateTest)));
        let file = assert_file(&test, "tests/UserSeam.spec.ts");
        assert_eq!(file.file_type, FileType::Test);
        assert!(file.content.contains(r#"describe("UserSeam v1", () => {"#));
    }

    #[test]
    fn test_options_reach_templates() {
        let request = request(Operation::GenerateStub).with_options(
            GenerationOptions::new()
                .with_comments(false)
                .with_examples(false),
        );
        let result = assert_generated(generator().process(&request));
        let content = &result.files[0].content;

        assert!(!content.contains("/** What to do */"));
        assert!(!content.contains("Success example input"));
        assert!(!content.contains("Looks up and manages users"));
    }

    #[test]
    fn test_custom_variables_win() {
        let request = request(Operation::GenerateBlueprint)
            .with_options(GenerationOptions::new().with_author("Ada"))
            .with_variable("author", "Grace");
        let result = assert_generated(generator().process(&request));
        assert!(result.files[0].content.contains("| Author   | Grace   |"));
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let mut contract = sample_contract();
        contract.description = "literal {{seamName}} marker".to_string();
        let request = GenerationRequest::new(Operation::GenerateBlueprint, contract);

        let result = assert_generated(generator().process(&request));
        assert!(result.files[0].content.contains("literal {{seamName}} marker"));
    }

    #[test]
    fn test_validate_template() {
        let result = assert_generated(generator().process(&request(Operation::ValidateTemplate)));
        assert!(result.files.is_empty());
        assert_eq!(result.statistics.total_files, 0);
        assert_eq!(result.statistics.complexity_score, 0.0);
        assert_eq!(
            result.generation.template_used,
            "templates/typescript_stub.ts.template"
        );
    }

    #[test]
    fn test_validate_missing_template() {
        let request = request(Operation::ValidateTemplate).with_template_type("python");
        let failure = assert_failed_with(generator().process(&request), codes::TEMPLATE_NOT_FOUND);
        assert_eq!(
            failure.errors[0].details,
            Some(json!({"path": "templates/python_stub.ts.template"}))
        );
    }

    #[test]
    fn test_missing_template_on_generate() {
        let generator = Generator::new(GeneratorConfig::default()).with_store(Arc::new(
            MemoryTemplateStore::new().with_template("typescript_stub.ts.template", "x"),
        ));
        assert_failed_with(
            generator.process(&request(Operation::GenerateAll)),
            codes::TEMPLATE_NOT_FOUND,
        );
    }

    #[test]
    fn test_empty_identity_is_input_invalid() {
        let mut contract = sample_contract();
        contract.name = "  ".to_string();
        let request = GenerationRequest::new(Operation::GenerateStub, contract);
        assert_failed_with(generator().process(&request), codes::INPUT_INVALID);

        let mut contract = sample_contract();
        contract.version = String::new();
        let request = GenerationRequest::new(Operation::GenerateStub, contract);
        assert_failed_with(generator().process(&request), codes::INPUT_INVALID);
    }

    #[test]
    fn test_unsafe_template_type_is_input_invalid() {
        for template_type in ["../secrets", "type script", ""] {
            let request = request(Operation::GenerateStub).with_template_type(template_type);
            assert_failed_with(generator().process(&request), codes::INPUT_INVALID);
        }
    }

    #[test]
    fn test_unreadable_template_is_generation_failed() {
        let generator = Generator::new(GeneratorConfig::default())
            .with_store(Arc::new(FailingTemplateStore::new("permission denied")));
        let failure = assert_failed_with(
            generator.process(&request(Operation::GenerateStub)),
            codes::GENERATION_FAILED,
        );
        let details = failure.errors[0].details.clone().unwrap();
        assert!(details["error"].as_str().unwrap().contains("permission denied"));
    }

    #[test]
    fn test_templates_are_read_per_request() {
        let store = Arc::new(RecordingTemplateStore::new(MemoryTemplateStore::builtin()));
        let generator = Generator::new(GeneratorConfig::default()).with_store(store.clone());

        assert_generated(generator.process(&request(Operation::GenerateStub)));
        assert_generated(generator.process(&request(Operation::GenerateStub)));
        assert_eq!(store.load_count("typescript_stub.ts.template"), 2);

        assert_generated(generator.process(&request(Operation::GenerateAll)));
        assert_eq!(store.total_loads(), 5);
    }

    #[test]
    fn test_fs_templates_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("typescript_stub.ts.template"),
            "// {{seamName}} {{missing}}",
        )
        .unwrap();
        let config = GeneratorConfig::default()
            .with_templates_dir(dir.path().display().to_string())
            .with_unknown_placeholder(UnknownPlaceholder::Keep);
        let generator = Generator::new(config);

        let result = assert_generated(generator.process(&request(Operation::GenerateStub)));
        assert_eq!(result.files[0].content, "// UserSeam {{missing}}");
        assert_eq!(result.generation.warnings.len(), 1);
        assert_eq!(result.generation.warnings[0].kind, "unresolved_placeholder");
    }

    #[test]
    fn test_custom_block_registration() {
        let store = MemoryTemplateStore::builtin().with_template(
            "typescript_stub.ts.template",
            "{{#banner}}{{/banner}}// {{seamName}}\n",
        );
        let generator = generator_with(GeneratorConfig::default().with_output_dir("gen"))
            .with_store(Arc::new(store));
        generator.blocks().register("banner", |data: &TemplateData| {
            format!("// category: {}\n", data.get_str("category").unwrap_or(""))
        });

        let result = assert_generated(generator.process(&request(Operation::GenerateStub)));
        assert_eq!(result.files[0].path, "gen/UserSeam.ts");
        assert_eq!(result.files[0].content, "// category: api\n// UserSeam\n");
        assert!(result.generation.warnings.is_empty());
    }

    #[test]
    fn test_process_value_envelope() {
        let generator = generator();
        let response = generator.process_value(json!({
            "operation": "generate_stub",
            "contract": {
                "name": "UserSeam",
                "version": "v1",
                "category": "api",
                "description": "Manages users"
            },
            "templateType": "typescript"
        }));
        assert!(response.ok);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["statistics"]["totalFiles"], json!(1));
        assert_eq!(json["data"]["files"][0]["type"], json!("typescript"));
        assert!(json.get("errors").is_none());

        let response = generator.process_value(json!({"operation": "compile", "contract": {}}));
        assert!(!response.ok);
        assert_eq!(response.errors[0].code, codes::INPUT_INVALID);
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Generator>();
    }
}
