//! The generation orchestrator.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::contracts::contract_hash;
use crate::errors::{GenerationError, GenerationFailure};
use crate::observability::{GenerationSpanAttributes, SpanTimer};
use crate::template::{
    stub_template_name, BlockRegistry, FsTemplateStore, RenderOutput, TemplateData,
    TemplateRenderer, TemplateStore, BLUEPRINT_TEMPLATE, TEST_TEMPLATE,
};
use crate::utils::{format_iso, Clock, SystemClock};

use super::data::build_template_data;
use super::request::{GenerationRequest, Operation};
use super::result::{
    FileType, GeneratedFile, GenerationMetadata, GenerationResult, GenerationStatistics,
    GenerationWarning, ValidationSummary,
};

/// Path prefix that marks preview output.
pub const PREVIEW_PREFIX: &str = "[PREVIEW] ";

/// `templateUsed` reported by `generate_all`.
pub const MULTIPLE_TEMPLATES: &str = "multiple";

/// Renders contracts into stubs, blueprints and test scaffolds.
///
/// A generator holds only configuration and read-only collaborators.
/// Templates are read from the store on every request and nothing is
/// written to disk: persisting [`GeneratedFile`]s is the caller's job.
///
/// # Example
///
/// ```
/// use seamgen::prelude::*;
///
/// let generator = Generator::new(GeneratorConfig::default())
///     .with_store(std::sync::Arc::new(MemoryTemplateStore::builtin()));
/// let contract = Contract::new("UserSeam", "v1", SeamCategory::Api, "Users");
///
/// let result = generator
///     .process(&GenerationRequest::new(Operation::GenerateStub, contract))
///     .unwrap();
/// assert_eq!(result.files[0].path, "src/generated/UserSeam.ts");
/// ```
pub struct Generator {
    config: GeneratorConfig,
    store: Arc<dyn TemplateStore>,
    renderer: TemplateRenderer,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("renderer", &self.renderer)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Creates a generator reading templates from `config.templates_dir`.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let store = Arc::new(FsTemplateStore::new(config.templates_dir.clone()));
        let renderer = TemplateRenderer::new(BlockRegistry::builtin(), config.unknown_placeholder);
        Self {
            config,
            store,
            renderer,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the template store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn TemplateStore>) -> Self {
        self.store = store;
        self
    }

    /// Replaces the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the block registry, for registering custom blocks.
    #[must_use]
    pub fn blocks(&self) -> &BlockRegistry {
        self.renderer.blocks()
    }

    /// Runs one generation request.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationFailure`] carrying `INPUT_INVALID` for a
    /// malformed request, `TEMPLATE_NOT_FOUND` when a template is missing
    /// and `GENERATION_FAILED` for anything else.
    pub fn process(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationFailure> {
        let attrs = GenerationSpanAttributes::new(request.operation.as_str())
            .with_seam(&request.contract.name, &request.contract.version)
            .with_template_type(request.template_type());
        let span = attrs.span();
        let _guard = span.enter();
        let timer = SpanTimer::start(request.operation.as_str());
        debug!(attributes = ?attrs.to_otel_attributes(), "Generation started");

        match self.run(request) {
            Ok(mut result) => {
                result.generation.duration = timer.finish();
                result.generation.generated_at = format_iso(&self.clock.now());
                info!(
                    operation = %request.operation,
                    seam = %request.contract.name,
                    files = result.files.len(),
                    warnings = result.generation.warnings.len(),
                    duration_ms = result.generation.duration,
                    "Generation completed"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    operation = %request.operation,
                    seam = %request.contract.name,
                    timer = timer.name(),
                    elapsed_ms = timer.elapsed_ms(),
                    code = err.code(),
                    error = %err,
                    "Generation failed"
                );
                Err(err.into())
            }
        }
    }

    fn run(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        validate_request(request)?;

        let timestamp = format_iso(&self.clock.now());
        let data = build_template_data(request, &self.config, &timestamp)
            .map_err(|e| GenerationError::failed("Unable to build template data", &e))?;
        let name = &request.contract.name;
        let stub_template = stub_template_name(request.template_type());

        let mut warnings = Vec::new();
        let (files, template_used) = match request.operation {
            Operation::GenerateStub | Operation::Preview => {
                let (file, used) = self.render_file(
                    &stub_template,
                    self.config.stub_path(name),
                    FileType::Typescript,
                    &data,
                    &mut warnings,
                )?;
                let file = if request.operation == Operation::Preview {
                    file.with_path_prefix(PREVIEW_PREFIX)
                } else {
                    file
                };
                (vec![file], used)
            }
            Operation::GenerateBlueprint => {
                let (file, used) = self.render_blueprint(name, &data, &mut warnings)?;
                (vec![file], used)
            }
            Operation::GenerateTest => {
                let (file, used) = self.render_test(name, &data, &mut warnings)?;
                (vec![file], used)
            }
            Operation::GenerateAll => {
                let (stub, _) = self.render_file(
                    &stub_template,
                    self.config.stub_path(name),
                    FileType::Typescript,
                    &data,
                    &mut warnings,
                )?;
                let (blueprint, _) = self.render_blueprint(name, &data, &mut warnings)?;
                let (test, _) = self.render_test(name, &data, &mut warnings)?;
                (vec![stub, blueprint, test], MULTIPLE_TEMPLATES.to_string())
            }
            Operation::ValidateTemplate => {
                let path = self.store.resolve(&stub_template);
                if !self.store.exists(&stub_template) {
                    return Err(GenerationError::TemplateNotFound { path });
                }
                debug!(template = %path, "Template exists");
                (Vec::new(), path)
            }
        };

        let contract_hash = contract_hash(&request.contract)
            .map_err(|e| GenerationError::failed("Unable to hash contract", &e))?;
        let statistics = GenerationStatistics::from_files(&files, request.operation);

        Ok(GenerationResult {
            files,
            generation: GenerationMetadata {
                template_used,
                generated_at: timestamp,
                duration: 0,
                contract_hash,
                generator_version: self.config.generator_version.clone(),
                warnings,
            },
            validation: ValidationSummary::unchecked(),
            statistics,
        })
    }

    fn render_blueprint(
        &self,
        name: &str,
        data: &TemplateData,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Result<(GeneratedFile, String), GenerationError> {
        self.render_file(
            BLUEPRINT_TEMPLATE,
            self.config.blueprint_path(name),
            FileType::Markdown,
            data,
            warnings,
        )
    }

    fn render_test(
        &self,
        name: &str,
        data: &TemplateData,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Result<(GeneratedFile, String), GenerationError> {
        self.render_file(
            TEST_TEMPLATE,
            self.config.test_path(name),
            FileType::Test,
            data,
            warnings,
        )
    }

    fn render_file(
        &self,
        template_name: &str,
        path: String,
        file_type: FileType,
        data: &TemplateData,
        warnings: &mut Vec<GenerationWarning>,
    ) -> Result<(GeneratedFile, String), GenerationError> {
        let template = self.store.load(template_name)?;
        debug!(template = %template.path, output = %path, "Rendering template");

        let output = self.renderer.render(&template.source, data);
        warnings.extend(render_warnings(&template.path, &output, data));

        Ok((GeneratedFile::new(path, output.content, file_type), template.path))
    }
}

fn validate_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    let contract = &request.contract;
    if contract.name.trim().is_empty() {
        return Err(GenerationError::InputInvalid(
            "Contract name is required".to_string(),
        ));
    }
    if contract.version.trim().is_empty() {
        return Err(GenerationError::InputInvalid(
            "Contract version is required".to_string(),
        ));
    }
    if let Some(template_type) = request.template_type.as_deref() {
        let safe = !template_type.is_empty()
            && template_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !safe {
            return Err(GenerationError::InputInvalid(format!(
                "Invalid template type: {template_type}"
            )));
        }
    }
    Ok(())
}

/// Unresolved placeholders, and blocks dropped because nothing supports
/// them. Blocks switched off by a `false` value are not reported.
fn render_warnings(
    template: &str,
    output: &RenderOutput,
    data: &TemplateData,
) -> Vec<GenerationWarning> {
    let unresolved = output.unresolved.iter().map(|key| {
        GenerationWarning::new(
            "unresolved_placeholder",
            format!("{template}: placeholder '{key}' has no value"),
        )
    });
    let removed = output
        .removed_blocks
        .iter()
        .filter(|name| data.lookup(name).is_none())
        .map(|name| {
            GenerationWarning::new(
                "unsupported_block",
                format!("{template}: block '{name}' is not supported and was removed"),
            )
        });
    unresolved.chain(removed).collect()
}
