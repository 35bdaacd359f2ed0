//! CLI entry point.
//!
//! Parses the option flags and the raw positional monitor arguments,
//! runs one collection pass, and converts any error into a diagnostic
//! line on stdout plus the error's process exit code. Internal logic
//! never terminates the process itself.

use std::io::{self, Write};
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rabbitwatch::{
    output, CollectError, Collector, LineShape, OutputFormat, Request, DEFAULT_PORT, LEGACY_PORT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// `<id>|<value>|`
    Plain,
    /// `<timestamp>|<id>|<target>|<value>|`
    Tagged,
}

#[derive(Parser, Debug)]
#[command(name = "rabbitwatch")]
#[command(about = "One-shot RabbitMQ performance collector using the management HTTP API")]
struct Cli {
    /// Output line shape; defaults to tagged when a target id is given
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Version tag appended to metric ids (empty disables the suffix)
    #[arg(long, default_value = "4")]
    id_tag: String,

    /// Default the port to 55672 (pre-3.0 management plugin) when the
    /// port argument is empty
    #[arg(long)]
    legacy_management: bool,

    /// Raw monitor arguments:
    /// [TARGET_ID] METRIC_STATE HOST PORT USERNAME PASSWORD
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

impl Cli {
    fn output_format(&self, request: &Request) -> OutputFormat {
        let shape = match self.format {
            Some(FormatArg::Plain) => LineShape::Plain,
            Some(FormatArg::Tagged) => LineShape::Tagged,
            None if request.target.is_some() => LineShape::Tagged,
            None => LineShape::Plain,
        };
        let version_tag = if self.id_tag.is_empty() {
            None
        } else {
            Some(self.id_tag.clone())
        };
        OutputFormat { shape, version_tag }
    }
}

#[tokio::main]
async fn main() {
    // Logging is opt-in via RUST_LOG and goes to stderr; stdout carries
    // only metric lines and the final diagnostic.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        println!("{err}");
        let _ = io::stdout().flush();
        process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CollectError> {
    let default_port = if cli.legacy_management {
        LEGACY_PORT
    } else {
        DEFAULT_PORT
    };

    let request = Request::from_args(&cli.args, default_port)?;
    let format = cli.output_format(&request);

    let collector = Collector::new(request)?;
    let metrics = collector.collect().await?;

    let stdout = io::stdout();
    output::write_metrics(
        stdout.lock(),
        &format,
        &metrics,
        collector.request().target.as_deref(),
    )?;

    Ok(())
}
