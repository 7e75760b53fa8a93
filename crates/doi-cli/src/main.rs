//! doi-cli: ejecuta el sender de DOIs contra un snapshot local.
//!
//! `doi-cli run --snapshot <file> [--export-dir <dir>] [--outbox <dir>] [--log-file <file>]`
//! `doi-cli eligibility --snapshot <file>`
//!
//! Códigos de salida: 0 corrida exitosa, 1 corrida fallida, 2 error de
//! configuración.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use doi_adapters::{build_task, init_dotenv, SenderConfig};
use doi_core::{EligibilityFilter, ObjectKind, TenantRepository};
use flexi_logger::{Logger, LoggerHandle};
use log::{error, info};

const ENV_LOG: &str = "DOIFLOW_LOG";
const EXIT_FAILED: u8 = 1;
const EXIT_CONFIG: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "doi-cli", version, about = "Automatic DOI deposit runner")]
struct Cli {
    /// Nivel de log (`error`, `warn`, `info`, `debug`, ...). Por defecto
    /// `DOIFLOW_LOG` o `info`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ejecuta una corrida de depósitos.
    Run(RunArgs),
    /// Muestra qué tenants participarían y por qué se saltan los demás.
    Eligibility(SnapshotArg),
}

#[derive(Debug, Args)]
struct SnapshotArg {
    /// Snapshot JSON de tenants y objetos (o `DOIFLOW_SNAPSHOT`).
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    source: SnapshotArg,
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Directorio donde el transporte outbox archiva los documentos.
    #[arg(long)]
    outbox: Option<PathBuf>,
    /// Archivo NDJSON al que se agrega el log de ejecución.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_dotenv();
    let cli = Cli::parse();
    let _logger = match start_logger(cli.log_level.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("[doi-cli] {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut config = match SenderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("config: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match cli.command {
        Command::Run(args) => {
            apply_overrides(&mut config, &args);
            run(&config)
        }
        Command::Eligibility(arg) => {
            if let Some(snapshot) = arg.snapshot {
                config.snapshot = Some(snapshot);
            }
            eligibility(&config)
        }
    }
}

fn start_logger(flag: Option<&str>) -> Result<LoggerHandle, String> {
    let level = flag.map(str::to_string)
                    .or_else(|| std::env::var(ENV_LOG).ok())
                    .unwrap_or_else(|| "info".to_string());
    Logger::try_with_str(&level).map_err(|e| format!("invalid log level `{level}`: {e}"))?
                                .log_to_stderr()
                                .format(flexi_logger::detailed_format)
                                .start()
                                .map_err(|e| format!("failed to start logger: {e}"))
}

fn apply_overrides(config: &mut SenderConfig, args: &RunArgs) {
    if let Some(snapshot) = &args.source.snapshot {
        config.snapshot = Some(snapshot.clone());
    }
    if let Some(dir) = &args.export_dir {
        config.export_dir = dir.clone();
    }
    if let Some(outbox) = &args.outbox {
        config.outbox = Some(outbox.clone());
    }
    if let Some(file) = &args.log_file {
        config.execution_log = Some(file.clone());
    }
}

fn run(config: &SenderConfig) -> ExitCode {
    let task = match build_task(config) {
        Ok(task) => task,
        Err(e) => {
            error!("config: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    info!("{} export_dir={} outbox={}", task.name(), config.export_dir.display(), config.outbox_dir().display());
    if task.run() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED)
    }
}

fn eligibility(config: &SenderConfig) -> ExitCode {
    let repo = match config.load_snapshot() {
        Ok(repo) => repo,
        Err(e) => {
            error!("config: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    let tenants = match repo.list_tenants() {
        Ok(tenants) => tenants,
        Err(e) => {
            error!("eligibility: {e}");
            return ExitCode::from(EXIT_FAILED);
        }
    };
    let result = EligibilityFilter::new(&repo, &repo).filter(tenants);

    for eligible in &result.eligible {
        let flags = eligible.kind_flags();
        let kinds: Vec<&str> = ObjectKind::ALL.iter().filter(|k| flags.is_enabled(**k)).map(|k| k.label()).collect();
        println!("eligible {} (id {}) prefix={} kinds=[{}]",
                 eligible.tenant.path,
                 eligible.tenant.id,
                 eligible.prefix.as_deref().unwrap_or("-"),
                 kinds.join(","));
    }
    for skip in &result.skipped {
        println!("skipped  {} (id {}): {}", skip.tenant.path, skip.tenant.id, skip.reason.as_str());
    }
    ExitCode::SUCCESS
}
