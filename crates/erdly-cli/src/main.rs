use clap::{Parser, Subcommand};
use colored::Colorize;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use erdly_core::{Config, DialectConfig, Diagnostic, Domain, Severity};
use erdly_catalog::{NativeLimits, StaticLimits};
use erdly_engine::{Attribute, AttributeError, EntitySummary, ModelIntrospector};

/// erdly - classify model attributes for entity-relationship diagrams
#[derive(Parser)]
#[command(name = "erdly")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: erdly.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show classified attributes of every model
    Attributes {
        /// Domain description (JSON)
        domain: PathBuf,

        /// Only show this model
        #[arg(short, long)]
        model: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Override the configured database dialect
        #[arg(short, long)]
        dialect: Option<DialectConfig>,
    },

    /// Check the domain for inconsistent metadata
    Check {
        /// Domain description (JSON)
        domain: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Attributes { domain, model, json, dialect } => {
            let mut config = config;
            if let Some(dialect) = dialect {
                config.dialect = dialect;
            }
            attributes_command(&config, &domain, model.as_deref(), json)
        }
        Commands::Check { domain } => {
            if check_command(&domain)? > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)?
    } else if Path::new("erdly.toml").exists() {
        Config::from_file(Path::new("erdly.toml"))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    tracing::debug!(dialect = ?config.dialect, "configuration loaded");
    Ok(config)
}

/// Attributes command - print each model's classified attributes
fn attributes_command(config: &Config, domain_path: &Path, model: Option<&str>, json: bool) -> Result<()> {
    let domain = Domain::from_file(domain_path)?;
    tracing::info!(models = domain.models.len(), "domain loaded from {}", domain_path.display());

    if config.warn {
        for diagnostic in domain.validate() {
            tracing::warn!(code = %diagnostic.code, "{}", diagnostic.message);
        }
    }

    print!("{}", attributes_report(config, &domain, model, json)?);
    Ok(())
}

/// Render the attributes of `model` (or every shown model) as text or JSON
fn attributes_report(config: &Config, domain: &Domain, model: Option<&str>, json: bool) -> Result<String> {
    let catalog = StaticLimits::from_config(config);
    let introspector = ModelIntrospector::new(domain)
        .with_native_limits(&catalog)
        .with_rules(config.attributes.clone());

    if json {
        let entities: Vec<EntitySummary> = match model {
            Some(name) => {
                let found = domain
                    .find_model(name)
                    .ok_or_else(|| AttributeError::UnknownModel(name.to_string()))?;
                vec![introspector.summarize(found)]
            }
            None => introspector.summaries(),
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&entities)?));
    }

    let entities: Vec<(&str, Vec<Attribute<'_>>)> = match model {
        Some(name) => vec![(name, introspector.attributes_for(name)?)],
        None => introspector
            .models()
            .map(|m| (m.name.as_str(), introspector.attributes(m)))
            .collect(),
    };

    let mut output = String::new();
    writeln!(output, "{} {} ({} limits)", "Domain".cyan(), domain.name.bold(), catalog.name())?;
    for (name, attributes) in &entities {
        writeln!(output)?;
        writeln!(output, "{}", name.bold())?;
        for attribute in attributes {
            writeln!(output, "  {}", attribute_row(attribute))?;
        }
    }

    Ok(output)
}

/// Check command - report domain diagnostics, returning the error count
fn check_command(domain_path: &Path) -> Result<usize> {
    let domain = Domain::from_file(domain_path)?;
    let (report, errors) = check_report(&domain)?;
    print!("{}", report);
    Ok(errors)
}

fn check_report(domain: &Domain) -> Result<(String, usize)> {
    let diagnostics = domain.validate();
    let mut output = String::new();

    for diagnostic in &diagnostics {
        writeln!(output, "{}", diagnostic_line(diagnostic))?;
    }

    let errors = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
    if diagnostics.is_empty() {
        writeln!(output, "{}", "No problems found".green())?;
    } else {
        writeln!(output, "{} problem(s), {} error(s)", diagnostics.len(), errors)?;
    }

    Ok((output, errors))
}

fn attribute_flags(attribute: &Attribute<'_>) -> String {
    let mut flags = Vec::new();
    if attribute.primary_key() {
        flags.push("PK");
    }
    if attribute.foreign_key() {
        flags.push("FK");
    }
    if attribute.timestamp() {
        flags.push("TS");
    }
    if attribute.inheritance() {
        flags.push("STI");
    }
    flags.join(",")
}

fn attribute_row(attribute: &Attribute<'_>) -> String {
    let flags = attribute_flags(attribute);
    let row = format!("{:<24} {:<20} {}", attribute.name(), attribute.type_description(), flags);

    if attribute.primary_key() {
        row.bold().to_string()
    } else if attribute.content() {
        row
    } else {
        row.dimmed().to_string()
    }
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => diagnostic.severity.to_string().red().bold(),
        Severity::Warn => diagnostic.severity.to_string().yellow(),
        Severity::Info => diagnostic.severity.to_string().blue(),
    };

    let location = diagnostic
        .location
        .as_ref()
        .map(|l| format!(" [{}]", l))
        .unwrap_or_default();

    format!("{} {}{}: {}", severity, diagnostic.code, location, diagnostic.message)
}
