//! catalogctl CLI
//!
//! Command-line interface for invoking AWS Service Catalog operations
//! through the generic request/response adapter.

mod config;
mod input;
mod prompt;

use anyhow::{anyhow, Context, Result};
use catalogctl_adapter::{Invocation, ParameterSpec, SelectorDirective, SelectorRule};
use catalogctl_common::{ParamKind, ParamValue, ParameterContext};
use catalogctl_service::{
    builtin_registry, CatalogRegistry, HttpCatalogClient, ServiceCatalogClient,
};
use clap::{Parser, Subcommand};
use colored::*;
use config::CliConfig;
use prompt::InteractivePrompt;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "catalogctl")]
#[command(version, about = "Invoke AWS Service Catalog operations from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every supported operation
    Operations,

    /// Show one operation's parameters, outputs, and default selection
    Describe {
        /// Operation key, e.g. terminate-provisioned-product
        operation: String,
    },

    /// Invoke one operation
    #[command(after_help = "EXAMPLES:\n  \
        # Terminate a provisioned product, keeping physical resources\n  \
        catalogctl invoke terminate-provisioned-product \\\n    \
        --endpoint http://localhost:4566 \\\n    \
        --param ProvisionedProductId=pp-123 \\\n    \
        --param RetainPhysicalResource=true --yes\n\n  \
        # Describe a product and project one output\n  \
        catalogctl invoke describe-product \\\n    \
        --param Id=prod-123 --select ProductViewSummary\n\n  \
        # Echo the identifier you supplied instead of the response\n  \
        catalogctl invoke delete-portfolio \\\n    \
        --param Id=port-123 --select ^Id --yes")]
    Invoke {
        /// Operation key, e.g. provision-product
        operation: String,

        /// Parameter binding, Name=value (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        param: Vec<String>,

        /// Output selection: an output name, '*', '^Parameter', or 'none'
        #[arg(short, long)]
        select: Option<String>,

        /// Skip the confirmation prompt for mutating operations
        #[arg(short = 'y', long = "yes")]
        yes: bool,

        /// Service endpoint (overrides the config file)
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = builtin_registry().context("failed to assemble the operation registry")?;

    match cli.command {
        Commands::Operations => {
            operations_command(&registry);
            Ok(())
        }
        Commands::Describe { operation } => describe_command(&registry, &operation),
        Commands::Invoke {
            operation,
            param,
            select,
            yes,
            endpoint,
        } => {
            invoke_command(
                InvokeArgs {
                    operation,
                    params: param,
                    select,
                    yes,
                    endpoint,
                },
                &registry,
                cli.config.as_deref(),
                cli.verbose,
            )
            .await
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn operations_command(registry: &CatalogRegistry) {
    println!(
        "{} {} operations available",
        "→".cyan(),
        registry.len().to_string().yellow()
    );
    for descriptor in registry.iter() {
        let marker = if descriptor.mutating {
            " (mutating)".red().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<40} {}{}",
            descriptor.key.cyan(),
            descriptor.api_name,
            marker
        );
    }
}

fn describe_command(registry: &CatalogRegistry, key: &str) -> Result<()> {
    let descriptor = registry
        .get(key)
        .ok_or_else(|| unknown_operation(registry, key))?;

    println!("{}", descriptor.api_name.bold());
    println!("  Key: {}", descriptor.key);
    println!(
        "  Mutating: {}",
        if descriptor.mutating { "yes" } else { "no" }
    );

    println!("\n{}", "Parameters:".bold());
    for spec in &descriptor.parameters {
        println!("  • {}{}", spec.name.cyan(), parameter_suffix(spec));
        if spec.target != spec.name {
            println!("      maps to {}", spec.target.yellow());
        }
    }

    if !descriptor.outputs.is_empty() {
        println!("\n{}", "Outputs:".bold());
        for output in &descriptor.outputs {
            println!("  • {}", output.name.cyan());
        }
    }

    println!(
        "\n  Default selection: {}",
        selector_label(descriptor.default_selector).yellow()
    );

    Ok(())
}

struct InvokeArgs {
    operation: String,
    params: Vec<String>,
    select: Option<String>,
    yes: bool,
    endpoint: Option<String>,
}

async fn invoke_command(
    args: InvokeArgs,
    registry: &CatalogRegistry,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let config = CliConfig::load_or_default(config_path)?;

    let descriptor = registry
        .get(&args.operation)
        .ok_or_else(|| unknown_operation(registry, &args.operation))?;

    let endpoint = args
        .endpoint
        .or(config.endpoint)
        .context("no endpoint configured; pass --endpoint or set it in the config file")?;

    let mut context = ParameterContext::new();
    for raw in &args.params {
        let (name, value) = input::parse_binding(raw)?;
        let spec = descriptor.parameter(name).ok_or_else(|| {
            anyhow!(
                "operation '{}' has no parameter '{}'; expected one of [{}]",
                descriptor.key,
                name,
                descriptor
                    .parameters
                    .iter()
                    .map(|spec| spec.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        context.insert(name, input::coerce(name, spec.kind, value)?);
    }

    // Config-level default language, only where the operation takes one.
    if let Some(language) = &config.accept_language {
        if descriptor.parameter("AcceptLanguage").is_some() && !context.contains("AcceptLanguage")
        {
            context.insert("AcceptLanguage", ParamValue::Str(language.clone()));
        }
    }

    let directive = args
        .select
        .as_deref()
        .map(SelectorDirective::parse)
        .unwrap_or_default();

    if verbose {
        println!("  Operation: {}", descriptor.api_name);
        println!("  Endpoint: {endpoint}");
        println!("  Parameters bound: {}", context.len());
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let client = HttpCatalogClient::new(endpoint);
    let client: &dyn ServiceCatalogClient = &client;

    println!("{} Invoking {}", "→".cyan(), descriptor.api_name.yellow());

    let mut invocation = Invocation::new(descriptor);
    invocation.bind(context);
    invocation.select_output(&directive)?;
    invocation.build()?;

    let force = args.yes || config.assume_yes;
    let output = invocation
        .execute(client, &InteractivePrompt, force, &cancel)
        .await?;

    match output {
        Some(value) => {
            println!("{}", "✓ Invocation complete".green().bold());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        None => println!("{}", "✓ Invocation complete (no output)".green().bold()),
    }

    Ok(())
}

fn unknown_operation(registry: &CatalogRegistry, key: &str) -> anyhow::Error {
    let known: Vec<&str> = registry.iter().map(|descriptor| descriptor.key).collect();
    anyhow!(
        "unknown operation '{key}'; run 'catalogctl operations' to list them (known: {})",
        known.join(", ")
    )
}

fn parameter_suffix(spec: &ParameterSpec) -> String {
    let kind = kind_label(spec.kind);
    if spec.required {
        format!(" [{kind}] {}", "(required)".red())
    } else {
        format!(" [{kind}]")
    }
}

fn kind_label(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::String => "string",
        ParamKind::Boolean => "boolean",
        ParamKind::Integer => "integer",
        ParamKind::StringList => "list",
        ParamKind::KeyValueList => "key=value list",
    }
}

fn selector_label(rule: SelectorRule) -> &'static str {
    match rule {
        SelectorRule::EntireResponse => "entire response",
        SelectorRule::Output(name) => name,
        SelectorRule::Nothing => "none",
    }
}
