//! `autoimpl` developer CLI: run a generation pass, inspect interface
//! closures, or validate a schema without emitting anything.

use autoimpl_build::{
    diagnostics::{CollectingSink, Diagnostic, TracingSink},
    emit::FsSink,
    run,
    validate::check_blueprint,
};
use autoimpl_config_build::{Config, ConfigError};
use autoimpl_schema::{
    node::{NodeError, Schema},
    resolve::{ResolveError, closure},
    validate::validate_schema,
};
use clap::{Parser, Subcommand};
use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error as ThisError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] NodeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("no output directory: pass --out or set generate.out_dir")]
    MissingOutDir,

    #[error("cannot read working directory: {0}")]
    Cwd(std::io::Error),
}

#[derive(Parser)]
#[command(name = "autoimpl", about = "Trait delegation generator")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a generation pass and write artifacts
    Generate {
        /// Schema file (TOML or JSON); defaults to the config's schema
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Output directory; defaults to the config's out_dir
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Config file; defaults to ./autoimpl.toml when present
        #[arg(short, long, env = "AUTOIMPL_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the interface closure of an interface, root first
    Closure {
        #[arg(short, long)]
        schema: PathBuf,

        /// Qualified interface path, e.g. crate::speak::Speaker
        interface: String,
    },

    /// Validate a schema and its blueprints without emitting
    Check {
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "autoimpl=debug,info" } else { "autoimpl=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn execute(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Generate {
            schema,
            out,
            config,
        } => generate(schema, out, config.as_deref()),
        Command::Closure { schema, interface } => print_closure(&schema, &interface),
        Command::Check { schema } => check(&schema),
    }
}

fn generate(
    schema: Option<PathBuf>,
    out: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<ExitCode, CliError> {
    let cwd = env::current_dir().map_err(CliError::Cwd)?;
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&cwd)?,
    };

    let schema_path = schema.unwrap_or_else(|| config.schema_path(&cwd));
    let out_dir = out
        .or_else(|| config.out_dir.clone())
        .ok_or(CliError::MissingOutDir)?;
    let schema = Schema::load(&schema_path)?;
    tracing::debug!(
        schema = %schema_path.display(),
        out = %out_dir.display(),
        nodes = schema.len(),
        "loaded schema"
    );

    // TracingSink already prints each diagnostic
    let mut diags = TracingSink::new(CollectingSink::new());
    let mut sink = FsSink::new(&out_dir);
    let report = run(&schema, &config, &mut diags, &mut sink);

    for emitted in &report.emitted {
        println!("{} -> {}", emitted.artifact, emitted.location);
    }

    Ok(exit_code(report.is_success()))
}

fn print_closure(schema_path: &Path, interface: &str) -> Result<ExitCode, CliError> {
    let schema = Schema::load(schema_path)?;

    for member in &closure(&schema, interface)? {
        println!("{member}");
    }

    Ok(ExitCode::SUCCESS)
}

fn check(schema_path: &Path) -> Result<ExitCode, CliError> {
    let schema = Schema::load(schema_path)?;
    let mut problems = Vec::new();

    if let Err(errs) = validate_schema(&schema) {
        problems.extend(errs.flatten().into_iter().map(|(route, message)| {
            Diagnostic::error(if route.is_empty() {
                message
            } else {
                format!("{route}: {message}")
            })
        }));
    }
    problems.extend(schema.blueprints().filter_map(|b| check_blueprint(b).err()));

    for problem in &problems {
        eprintln!("{problem}");
    }
    if problems.is_empty() {
        println!("{} ok ({} nodes)", schema_path.display(), schema.len());
    }

    Ok(exit_code(problems.is_empty()))
}

const fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
