//! Command handlers

use crate::cli::{Cli, Commands, EntryInput};
use crate::output::{output_aggregate, output_response, output_sizes, output_specs};
use pipeweight_app::client::CalculationClient;
use pipeweight_app::config::Config;
use pipeweight_app::export::{export_to_excel, export_totals_pdf, DEFAULT_PDF_NAME};
use pipeweight_app::repository::load_spec_table;
use pipeweight_domain::model::SpecTable;
use pipeweight_domain::service::aggregate;
use pipeweight_infra::entry_loader::{load_entries_csv, load_entries_json};
use pipeweight_types::{Error, Length, OutputFormat, PipeEntry, Result, Shape};
use std::path::PathBuf;

const DEFAULT_XLSX_NAME: &str = "pipe-weight.xlsx";

pub fn execute(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref path) = cli.spec_table {
        config.spec_table = Some(path.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Calc {
            input,
            remote,
            endpoint,
        } => {
            if let Some(url) = endpoint {
                config.endpoint_url = url.clone();
            }
            cmd_calc(&config, output_format, input, *remote)
        }

        Commands::Specs { shape } => cmd_specs(&config, output_format, *shape),

        Commands::Export {
            input,
            output,
            xlsx,
        } => cmd_export(&config, input, output.clone(), *xlsx),

        Commands::Config {
            show,
            set_host,
            set_port,
            set_origins,
            set_endpoint,
            set_spec_table,
            set_output,
            set_currency,
            reset,
        } => cmd_config(
            *show,
            ConfigUpdate {
                host: set_host.clone(),
                port: *set_port,
                origins: set_origins.clone(),
                endpoint: set_endpoint.clone(),
                spec_table: set_spec_table.clone(),
                output: *set_output,
                currency: set_currency.clone(),
            },
            *reset,
        ),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse `MATERIAL,THICKNESS,SHAPE,SIZE,LENGTH`.
///
/// Selectors are kept verbatim so an unknown combination simply fails lookup.
pub fn parse_pipe_arg(arg: &str) -> Result<PipeEntry> {
    let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
    let &[material, thickness, shape, size, length] = parts.as_slice() else {
        return Err(Error::InvalidInput(format!(
            "expected MATERIAL,THICKNESS,SHAPE,SIZE,LENGTH, got '{}'",
            arg
        )));
    };
    Ok(PipeEntry {
        material: material.to_string(),
        thickness: thickness.to_string(),
        shape: shape.to_string(),
        pipe_type: size.to_string(),
        length: Length::parse(length),
    })
}

fn collect_entries(input: &EntryInput) -> Result<Vec<PipeEntry>> {
    let mut entries = Vec::new();
    for arg in &input.pipes {
        entries.push(parse_pipe_arg(arg)?);
    }
    if let Some(ref path) = input.json {
        entries.extend(load_entries_json(path)?);
    }
    if let Some(ref path) = input.csv {
        entries.extend(load_entries_csv(path)?);
    }
    Ok(entries)
}

fn cmd_calc(
    config: &Config,
    output_format: OutputFormat,
    input: &EntryInput,
    remote: bool,
) -> Result<()> {
    let entries = collect_entries(input)?;

    if remote {
        if entries.is_empty() {
            return Err(Error::EmptySubmission);
        }
        let client = CalculationClient::from_config(config);
        let runtime = tokio::runtime::Runtime::new()?;
        let response = runtime
            .block_on(client.calculate(entries))
            .map_err(|e| Error::Http(e.to_string()))?;
        return output_response(output_format, &response, &config.currency_label);
    }

    let table = load_spec_table(config, None)?;
    let result = aggregate(&entries, &table)?;
    output_aggregate(output_format, &entries, &result, &config.currency_label)
}

fn cmd_specs(config: &Config, output_format: OutputFormat, shape: Option<Shape>) -> Result<()> {
    let table: SpecTable = load_spec_table(config, None)?;
    match shape {
        Some(shape) => output_sizes(output_format, shape, &table.sizes_for(shape)),
        None => output_specs(output_format, table.specs()),
    }
}

fn cmd_export(
    config: &Config,
    input: &EntryInput,
    output: Option<PathBuf>,
    xlsx: bool,
) -> Result<()> {
    let entries = collect_entries(input)?;
    let table = load_spec_table(config, None)?;
    let result = aggregate(&entries, &table)?;

    if xlsx {
        let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_XLSX_NAME));
        export_to_excel(&entries, &result, &config.currency_label, &path)?;
        println!("Exported breakdown to {}", path.display());
    } else {
        let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_NAME));
        export_totals_pdf(
            &path,
            &result.formatted_weight(),
            &result.formatted_price(),
            &config.currency_label,
        )?;
        println!("Exported totals to {}", path.display());
    }

    if !result.unmatched.is_empty() {
        eprintln!(
            "Warning: {} entries had no matching spec and were ignored",
            result.unmatched.len()
        );
    }
    Ok(())
}

/// Values requested by `config --set-*`
#[derive(Debug, Default)]
struct ConfigUpdate {
    host: Option<String>,
    port: Option<u16>,
    origins: Option<Vec<String>>,
    endpoint: Option<String>,
    spec_table: Option<PathBuf>,
    output: Option<OutputFormat>,
    currency: Option<String>,
}

impl ConfigUpdate {
    /// Apply to `config`, returning whether anything was set
    fn apply(self, config: &mut Config) -> bool {
        let mut modified = false;

        if let Some(host) = self.host {
            config.server_host = host;
            modified = true;
        }

        if let Some(port) = self.port {
            config.server_port = port;
            modified = true;
        }

        if let Some(origins) = self.origins {
            config.allowed_origins = origins;
            modified = true;
        }

        if let Some(endpoint) = self.endpoint {
            config.endpoint_url = endpoint;
            modified = true;
        }

        if let Some(path) = self.spec_table {
            config.spec_table = Some(path);
            modified = true;
        }

        if let Some(output_format) = self.output {
            config.output_format = output_format;
            modified = true;
        }

        if let Some(currency) = self.currency {
            config.currency_label = currency;
            modified = true;
        }

        modified
    }
}

fn cmd_config(show: bool, update: ConfigUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = update.apply(&mut config);

    if modified {
        if let Some(ref path) = config.spec_table {
            // Refuse to save a table that cannot be loaded
            load_spec_table(&config, Some(path.clone()))?;
        }
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
