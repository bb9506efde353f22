//! Minimal CLI: schema → (models | types)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use swagger_models::config::{Settings, DEFAULT_BASE_TYPE, DEFAULT_NAMESPACE};
use swagger_models::loader::load_document;
use swagger_models::lower::lower_document;
use swagger_models::resolve::TypeMap;
use swagger_models::output::{write_models, Emitter, JsonEmitter, OutlineEmitter};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile Swagger `definitions` (JSON or YAML) into model type descriptors
#[derive(Parser, Debug)]
#[command(name = "swagger-models", version, about)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// increase verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile every object definition into an output type
    Models(ModelsOut),
    /// print the resolved type map as JSON
    Types(TypesOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// one or more schema files; literal paths or quoted glob patterns.
    /// Files ending in `json` are read as JSON, anything else as YAML
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerateSettings {
    /// namespace of the generated types (`::`-separated)
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// shared parent type of every non-composed model
    #[arg(long, default_value = DEFAULT_BASE_TYPE)]
    base_type: String,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Json,
    Outline,
}

#[derive(clap::Parser, Debug)]
struct ModelsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generate_settings: GenerateSettings,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// output directory (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// report the files that would be written without writing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(clap::Parser, Debug)]
struct TypesOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn paths(&self) -> Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")
    }
}

impl From<&GenerateSettings> for Settings {
    fn from(g: &GenerateSettings) -> Self {
        Settings { namespace: g.namespace.clone(), base_type: g.base_type.clone() }
    }
}

impl OutputFormat {
    fn emitter(self) -> &'static dyn Emitter {
        match self {
            OutputFormat::Json => &JsonEmitter,
            OutputFormat::Outline => &OutlineEmitter,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Models(target) => {
                let settings = Settings::from(&target.generate_settings);
                let emitter = target.format.emitter();
                for path in target.input_settings.paths()? {
                    // each file is an independent, all-or-nothing run
                    let run = swagger_models::generate_from_file(&path, &settings)
                        .with_context(|| format!("generation failed for {}", path.display()))?;

                    match target.out.as_ref() {
                        Some(out) => {
                            let files = write_models(out, run.models(), &settings, emitter, target.dry_run)?;
                            let verb = if target.dry_run { "would write" } else { "wrote" };
                            eprintln!(
                                "{} {}: {verb} {} files to {}",
                                "✓".green(),
                                path.display(),
                                files.len(),
                                out.display()
                            );
                        }
                        None => {
                            for model in run.models() {
                                println!("{}", emitter.emit_type(model, &settings)?);
                            }
                        }
                    }
                }
            }
            Command::Types(target) => {
                for path in target.input_settings.paths()? {
                    let document = load_document(&path)?;
                    let types = TypeMap::build(&lower_document(&document));
                    println!("{}", serde_json::to_string_pretty(&types)?);
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if !has_glob_chars(pattern) {
            out.push(Path::new(pattern).to_path_buf());
            continue;
        }
        let before = out.len();
        for entry in glob::glob(pattern)? {
            out.push(entry?);
        }
        if out.len() == before {
            bail!("glob pattern matched no files: {pattern}");
        }
    }

    Ok(out)
}
