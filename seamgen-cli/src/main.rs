//! `seamgen` - generate stubs, blueprints and tests from seam contracts.
//!
//! ## Commands
//!
//! - `generate`: render a contract and print the JSON response envelope
//! - `validate`: check every contract in a directory
//! - `hash`: print a contract's hash

mod telemetry;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seamgen::prelude::*;
use tracing::{info, Level};

#[derive(Debug, Parser)]
#[command(name = "seamgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Contract-driven code generation for seams", long_about = None)]
struct Cli {
    /// Generator config file (YAML)
    #[arg(short, long, global = true, env = "SEAMGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a contract and print the response envelope
    Generate {
        /// Path to the contract file
        contract: PathBuf,

        /// Operation to run
        #[arg(short, long, default_value = "generate_stub", value_parser = parse_operation)]
        operation: Operation,

        /// Stub template type
        #[arg(short, long)]
        template_type: Option<String>,

        /// Write generated files to their proposed paths
        #[arg(short, long)]
        write: bool,

        /// Use the templates bundled with seamgen instead of the templates directory
        #[arg(long)]
        builtin_templates: bool,

        /// Leave doc comments out of generated code
        #[arg(long)]
        no_comments: bool,

        /// Leave contract examples out of generated files
        #[arg(long)]
        no_examples: bool,
    },

    /// Validate every contract in a directory
    Validate {
        /// Contracts directory (default: the configured contracts directory)
        dir: Option<PathBuf>,
    },

    /// Print the hash of a contract
    Hash {
        /// Path to the contract file
        contract: PathBuf,
    },
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse::<Operation>().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    telemetry::init_tracing(cli.json, level);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            contract,
            operation,
            template_type,
            write,
            builtin_templates,
            no_comments,
            no_examples,
        } => {
            let contract = load_contract(&contract)
                .with_context(|| format!("loading contract {}", contract.display()))?;
            let mut generator = Generator::new(config);
            if builtin_templates {
                generator = generator.with_store(Arc::new(MemoryTemplateStore::builtin()));
            }

            let mut request = GenerationRequest::new(operation, contract);
            request.template_type = template_type;
            request.options = options_from_flags(no_comments, no_examples);

            let outcome = generator.process(&request);
            if write && operation != Operation::Preview {
                if let Ok(result) = &outcome {
                    write_files(&result.files)?;
                }
            }

            let response = SeamResponse::from(outcome);
            print_json(&response)?;
            Ok(if response.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Validate { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.contracts_dir));
            let report = validate_contracts(&dir);
            print_json(&report)?;
            Ok(if report.pass {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Hash { contract } => {
            let contract = load_contract(&contract)
                .with_context(|| format!("loading contract {}", contract.display()))?;
            let hash = contract_hash(&contract).context("hashing contract")?;
            println!("{hash}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn options_from_flags(no_comments: bool, no_examples: bool) -> GenerationOptions {
    let mut options = GenerationOptions::new();
    if no_comments {
        options = options.with_comments(false);
    }
    if no_examples {
        options = options.with_examples(false);
    }
    options
}

fn write_files(files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = Path::new(&file.path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        fs::write(path, &file.content).with_context(|| format!("writing {}", file.path))?;
        info!(path = %file.path, size = file.size, "Wrote generated file");
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["seamgen", "generate", "contracts/A.contract.v1.yml"]).unwrap();
        match cli.command {
            Commands::Generate {
                operation,
                template_type,
                write,
                builtin_templates,
                ..
            } => {
                assert_eq!(operation, Operation::GenerateStub);
                assert_eq!(template_type, None);
                assert!(!write);
                assert!(!builtin_templates);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "seamgen",
            "--verbose",
            "generate",
            "a.yml",
            "--operation",
            "generate_all",
            "--template-type",
            "typescript",
            "--write",
            "--no-comments",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate {
                operation,
                write,
                no_comments,
                no_examples,
                ..
            } => {
                assert_eq!(operation, Operation::GenerateAll);
                assert!(write);
                let options = options_from_flags(no_comments, no_examples);
                assert!(!options.include_comments());
                assert!(options.include_examples());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let err = Cli::try_parse_from(["seamgen", "generate", "a.yml", "-o", "deploy"]).unwrap_err();
        assert!(err.to_string().contains("Unsupported operation: deploy"));
    }

    #[test]
    fn test_validate_dir_optional() {
        let cli = Cli::try_parse_from(["seamgen", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { dir: None }));
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src/generated/A.ts");
        let file = GeneratedFile::new(path.display().to_string(), "export {};\n", FileType::Typescript);

        write_files(&[file]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "export {};\n");
    }
}
