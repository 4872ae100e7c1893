//! formhandler CLI
//!
//! Flushes a demo form against a submitted body and prints the outcome.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use formhandler::dns::{default_resolver, DnsResolver, StaticResolver, SystemResolver};
use formhandler::fields::{text_field, textarea_field};
use formhandler::messages::{DefaultCatalog, MessageCatalog, StaticCatalog};
use formhandler::validation::{DateValidator, EmailValidator};
use formhandler::widgets::BootstrapTextInput;
use formhandler::{Field, Form, FormConfig, Submission};

/// Server-side form validation and rendering.
#[derive(Parser)]
#[command(name = "formhandler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Urlencoded request body.
    #[arg(short, long, env = "FORM_BODY", conflicts_with = "json")]
    body: Option<String>,

    /// JSON file holding the submitted values.
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// JSON file with form options.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with message translations.
    #[arg(short, long)]
    messages: Option<PathBuf>,

    /// Print the rendered HTML.
    #[arg(long)]
    html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Status selects with preselected defaults.
    Status,

    /// Contact form with email and date validation.
    Contact {
        /// Check that the email domain exists.
        #[arg(long)]
        check_domain: bool,

        /// Resolver used for domain checks.
        #[arg(long, value_enum, default_value_t = ResolverKind::Network)]
        resolver: ResolverKind,

        /// JSON table for the static resolver.
        #[arg(long, required_if_eq("resolver", "static"))]
        dns_table: Option<PathBuf>,

        /// Lookup timeout in milliseconds.
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResolverKind {
    /// DNS servers from the host configuration, with MX lookups.
    Network,
    /// Platform host lookup only.
    System,
    /// A JSON table given with --dns-table.
    Static,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let submission = read_submission(&cli)?;
    let config = match &cli.config {
        Some(path) => FormConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => FormConfig::new(),
    };
    let catalog: Box<dyn MessageCatalog> = match &cli.messages {
        Some(path) => Box::new(
            StaticCatalog::from_json(&read(path)?)
                .with_context(|| format!("invalid messages {}", path.display()))?,
        ),
        None => Box::new(DefaultCatalog),
    };

    let mut form = match &cli.command {
        Commands::Status => status_form(config)?,
        Commands::Contact {
            check_domain,
            resolver,
            dns_table,
            timeout,
        } => {
            let resolver = build_resolver(*resolver, dns_table.as_deref(), *timeout)?;
            contact_form(config, catalog.as_ref(), *check_domain, resolver)?
        }
    };

    let html = form.flush(&submission)?;
    info!(form = form.name(), processed = form.is_processed(), "done");

    if cli.html {
        println!("{html}");
        return Ok(());
    }

    let errors: serde_json::Map<String, serde_json::Value> = form
        .fields()
        .iter()
        .filter_map(|field| {
            form.errors()
                .get(&field.name)
                .map(|messages| (field.name.clone(), json!(messages)))
        })
        .collect();
    let report = json!({
        "form": form.name(),
        "submitted": form.is_submitted(),
        "processed": form.is_processed(),
        "values": form.values(),
        "errors": errors,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn read(path: &std::path::Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn read_submission(cli: &Cli) -> anyhow::Result<Submission> {
    if let Some(body) = &cli.body {
        return Submission::from_urlencoded(body).context("invalid request body");
    }
    if let Some(path) = &cli.json {
        return Submission::from_json(&read(path)?).context("invalid submission");
    }
    Ok(Submission::new())
}

fn build_resolver(
    kind: ResolverKind,
    table: Option<&std::path::Path>,
    timeout: Option<u64>,
) -> anyhow::Result<Arc<dyn DnsResolver>> {
    Ok(match (kind, table) {
        (ResolverKind::Static, Some(path)) => Arc::new(
            StaticResolver::from_json(&read(path)?)
                .with_context(|| format!("invalid DNS table {}", path.display()))?,
        ),
        (ResolverKind::Static, None) => anyhow::bail!("--dns-table is required"),
        (ResolverKind::Network, _) => default_resolver(timeout.map(Duration::from_millis)),
        (ResolverKind::System, _) => match timeout {
            Some(ms) => Arc::new(SystemResolver::with_timeout(Duration::from_millis(ms))),
            None => Arc::new(SystemResolver::new()),
        },
    })
}

const STATUSES: [(&str, &str); 3] = [
    ("to_be_processed", "To be processed"),
    ("in_process", "In process"),
    ("0", "Finished"),
];

/// One select per status, each preselecting its own key.
fn status_form(config: FormConfig) -> anyhow::Result<Form> {
    let mut form = Form::with_config("status", config).action("/status");
    for (key, label) in STATUSES {
        form.add_field(
            Field::select(format!("status_{key}"), label)
                .options(STATUSES)
                .default_value(key),
        )?;
    }
    Ok(form)
}

fn contact_form(
    config: FormConfig,
    catalog: &dyn MessageCatalog,
    check_domain: bool,
    resolver: Arc<dyn DnsResolver>,
) -> anyhow::Result<Form> {
    let mut form = Form::with_config("contact", config).action("/contact");
    form.add_field(text_field("name", "Name", 100, true))?;
    form.add_field(
        Field::new("email", "Email", BootstrapTextInput::email())
            .required()
            .validator(
                EmailValidator::with_catalog(catalog)
                    .check_if_domain_exists(check_domain)
                    .resolver(resolver),
            ),
    )?;
    form.add_field(
        Field::new("callback", "Call back on", BootstrapTextInput::date())
            .help_text("Leave empty for no call")
            .validator(DateValidator::with_catalog(catalog).required(false)),
    )?;
    form.add_field(textarea_field("message", "Message", 5, false))?;
    Ok(form)
}
