//! CLI entry point.
//!
//! Commands: `generate` writes component descriptors for a package,
//! `resolve` prints one symbol's hierarchy as JSON, `config` shows the
//! effective settings.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tscomp::display::{Outcome, THEME, create_generate_table};
use tscomp::io::ExitCode;
use tscomp::resolution::{Diagnostic, SymbolSummary};
use tscomp::{
    Diagnostics, FileAstCache, Generator, HierarchyBuilder, ResolveError, Settings,
    SymbolReference, logging,
};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// TypeScript component descriptor generator
#[derive(Parser)]
#[command(
    name = "tscomp",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate component descriptors from TypeScript class hierarchies",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one descriptor per exported class
    #[command(
        about = "Generate component descriptors for a package",
        after_help = "Examples:\n  tscomp generate\n  tscomp generate --package packages/core --output dist/components\n  tscomp generate --ignore .componentsignore --extension .json"
    )]
    Generate {
        /// Package directory containing package.json
        #[arg(short, long)]
        package: Option<PathBuf>,

        /// Source directory, relative to the package
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output directory, relative to the package
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Descriptor file extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Ignore file (JSON array of class names), relative to the package
        #[arg(short, long)]
        ignore: Option<PathBuf>,

        /// Number of classes resolved in parallel
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Resolve a symbol and print its hierarchy
    #[command(
        about = "Resolve a class or interface and print its hierarchy as JSON",
        after_help = "Examples:\n  tscomp resolve Button --file lib/index.ts\n  tscomp resolve Closeable --file lib/index.ts --interfaces"
    )]
    Resolve {
        /// Name as visible from FILE
        name: String,

        /// File the name is looked up from
        #[arg(short, long)]
        file: PathBuf,

        /// Also accept interfaces
        #[arg(long)]
        interfaces: bool,

        /// Accept any declaration kind, including type aliases and enums
        #[arg(long, conflicts_with = "interfaces")]
        any_kind: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,
}

#[derive(Serialize)]
struct ResolveOutput {
    chain: Vec<String>,
    symbol: SymbolSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {}",
                config_path.display(),
                e
            );
            std::process::exit(ExitCode::ConfigError.into());
        })
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };

    if let Some(level) = &cli.log_level {
        config.logging.default = level.clone();
    }

    if let Commands::Generate {
        package,
        source,
        output,
        extension,
        ignore,
        threads,
    } = &cli.command
    {
        if let Some(package) = package {
            config.package_dir = package.clone();
        }
        if let Some(source) = source {
            config.generate.source_dir = source.clone();
        }
        if let Some(output) = output {
            config.generate.output_dir = output.clone();
        }
        if let Some(extension) = extension {
            config.generate.extension = extension.clone();
        }
        if let Some(ignore) = ignore {
            config.generate.ignore_file = ignore.clone();
        }
        if let Some(threads) = threads {
            config.generate.parallel_threads = *threads;
        }
    }

    logging::init_with_config(&config.logging);

    let code = match cli.command {
        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            match toml::to_string_pretty(&config) {
                Ok(toml_str) => println!("{toml_str}"),
                Err(e) => eprintln!("Error displaying config: {e}"),
            }
            ExitCode::Success
        }
        Commands::Generate { .. } => run_generate(&config),
        Commands::Resolve {
            name,
            file,
            interfaces,
            any_kind,
        } => run_resolve(&name, file, interfaces, any_kind),
    };

    std::process::exit(code.into());
}

fn run_generate(config: &Settings) -> ExitCode {
    let start = Instant::now();
    let cache = FileAstCache::new();
    let generator = Generator::new(config, &cache);

    let report = match generator.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", THEME.outcome(Outcome::Failed, format!("Error: {e}")));
            for suggestion in e.recovery_suggestions() {
                eprintln!("  {suggestion}");
            }
            return ExitCode::from_generate_error(&e);
        }
    };

    println!("{}", create_generate_table(&report));
    for diagnostic in &report.diagnostics {
        tracing::debug!("[generate] {diagnostic}");
    }

    let summary = format!(
        "{} descriptors for {} in {:.2?} ({} files parsed)",
        report.written.len(),
        report.package,
        start.elapsed(),
        cache.len()
    );

    if report.is_success() {
        println!("{}", THEME.outcome(Outcome::Written, &summary));
        ExitCode::Success
    } else {
        println!("{}", THEME.outcome(Outcome::Ignored, &summary));
        for (name, error) in &report.failed {
            eprintln!("{}", THEME.outcome(Outcome::Failed, format!("{name}: {error}")));
            for suggestion in error.recovery_suggestions() {
                eprintln!("  {suggestion}");
            }
        }
        ExitCode::PartialFailure
    }
}

fn run_resolve(name: &str, file: PathBuf, interfaces: bool, any_kind: bool) -> ExitCode {
    let cache = FileAstCache::new();
    let builder = HierarchyBuilder::new(&cache);
    let mut diagnostics = Diagnostics::new();
    let reference = SymbolReference::new(name, file);

    let result = if any_kind {
        builder.resolver().resolve_type(&reference, &mut diagnostics)
    } else {
        builder
            .resolver()
            .resolve(&reference, interfaces, &mut diagnostics)
    }
    .and_then(|symbol| builder.build_chain(symbol, &mut diagnostics));

    match result {
        Ok(chain) => {
            let Some(root) = chain.first() else {
                return report_resolve_error(&ResolveError::symbol_not_found(
                    name,
                    &reference.file_name,
                ));
            };
            let output = ResolveOutput {
                chain: chain.iter().map(|s| s.name().to_string()).collect(),
                symbol: root.summary(),
                diagnostics: diagnostics.into_entries(),
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::Success
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::GeneralError
                }
            }
        }
        Err(e) => {
            for diagnostic in diagnostics.entries() {
                eprintln!("{}", THEME.diagnostic(diagnostic));
            }
            report_resolve_error(&e)
        }
    }
}

fn report_resolve_error(error: &ResolveError) -> ExitCode {
    eprintln!("{}", THEME.outcome(Outcome::Failed, format!("Error: {error}")));
    for suggestion in error.recovery_suggestions() {
        eprintln!("  {suggestion}");
    }
    ExitCode::from_resolve_error(error)
}
