use anyhow::Result;
use clap::{error::ErrorKind, ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use modbins::{
    build_inventory,
    config::Config,
    output::{format_inventory, OutputFormat},
    LmodQuery, ModuleEnumerator,
};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit codes
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser, Debug)]
#[command(name = "modbins")]
#[command(
    author,
    version,
    about = "List the executables each application's environment modules put on PATH"
)]
struct Cli {
    /// Installation prefix (module files are read from <PREFIX>/modules/all)
    prefix: PathBuf,

    /// Output format (map, json, table)
    #[arg(short, long)]
    format: Option<String>,

    /// Sort modules and binaries for reproducible output
    #[arg(long)]
    sort: bool,

    /// Skip hidden (dot-prefixed) module files
    #[arg(long)]
    skip_hidden: bool,

    /// Seconds allowed per module query (0 disables the limit)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Module system driver (defaults to $LMOD_CMD)
    #[arg(long, value_name = "PATH")]
    module_cmd: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write output to file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Help and version requests succeed; every other parse failure is a usage error.
fn exit_code_for(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
        _ => exit_codes::ERROR,
    }
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_code_for(&e));
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("{}", error_line(&e));
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

/// Library errors already name their cause, so only the top message is printed.
fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {}", err)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.sort {
        config.sort = true;
    }
    if cli.skip_hidden {
        config.skip_hidden = true;
    }
    if let Some(secs) = cli.timeout {
        config.query_timeout_secs = secs;
    }
    if let Some(cmd) = &cli.module_cmd {
        config.module_command = cmd.clone();
    }
    if let Some(format) = &cli.format {
        config.default_format = format.clone();
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let format = OutputFormat::from_str(&config.default_format).map_err(|e| anyhow::anyhow!(e))?;
    let is_interactive = format == OutputFormat::Table || cli.output.is_some();

    let root = config.modules_root(&cli.prefix);
    let modules = ModuleEnumerator::new(&root, config.sort, config.skip_hidden)?;
    let query = LmodQuery::from_config(&config);

    tracing::info!(
        root = %root.display(),
        command = query.command(),
        "building binary inventory"
    );

    let progress = if is_interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{pos}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let (inventory, stats) = build_inventory(modules, &query, config.sort, |module| {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Querying {}...", module));
            pb.inc(1);
        }
    });

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    tracing::info!(
        modules = stats.modules,
        skipped = stats.skipped_modules,
        contributions = stats.contributions,
        unavailable_dirs = stats.unavailable_dirs,
        binaries = inventory.binary_count(),
        "inventory complete"
    );

    let document = format_inventory(&inventory, format)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, document)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            eprintln!("Results written to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
