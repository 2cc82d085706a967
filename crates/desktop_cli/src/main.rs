//! Desktop CLI smoke entry point.
//!
//! # Responsibility
//! - Load a desktop config, register every listed manifest and optionally
//!   launch entries or invoke commands.
//! - Print the registered apps and the resulting window table.

use clap::Parser;
use desktop_core::{
    core_version, init_logging, open_db, ConfigError, DbError, Desktop, DesktopConfig,
    DesktopError, SqliteLayoutStore,
};
use log::info;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "desktop_cli",
    version,
    about = "Load desktop app manifests and drive their windows"
)]
struct Cli {
    /// Desktop config JSON listing manifest files.
    #[arg(long)]
    config: PathBuf,

    /// Entry to launch, as `<app_id>:<entry>`. Repeatable.
    #[arg(long = "launch", value_parser = parse_target)]
    launches: Vec<Target>,

    /// Command to invoke, as `<app_id>:<command>`. Repeatable.
    #[arg(long = "invoke", value_parser = parse_target)]
    invocations: Vec<Target>,

    /// Absolute log directory; overrides `log_dir` from the config.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    app_id: String,
    name: String,
}

fn parse_target(value: &str) -> Result<Target, String> {
    match value.rsplit_once(':') {
        Some((app_id, name)) if !app_id.is_empty() && !name.is_empty() => Ok(Target {
            app_id: app_id.to_string(),
            name: name.to_string(),
        }),
        _ => Err(format!("expected `<app_id>:<name>`, got `{value}`")),
    }
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Desktop(DesktopError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging: {message}"),
            Self::Db(err) => write!(f, "session db: {err}"),
            Self::Desktop(err) => write!(f, "[{}] {err}", err.code()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<DesktopError> for CliError {
    fn from(value: DesktopError) -> Self {
        Self::Desktop(value)
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = DesktopConfig::load(&cli.config)?;
    if let Some(log_dir) = cli.log_dir.as_ref().or(config.log_dir.as_ref()) {
        init_logging(&config.log_level, log_dir).map_err(CliError::Logging)?;
    }

    let mut desktop = Desktop::with_options(config.options());
    if let Some(path) = config.session_db_path() {
        desktop = desktop.with_layout_store(SqliteLayoutStore::new(open_db(path)?));
    }

    for path in config.manifest_paths() {
        desktop.register_file(&path)?;
    }
    info!(
        "event=cli_start module=config status=ok apps={} theme={}",
        desktop.registry().len(),
        config.theme.as_deref().unwrap_or("default")
    );

    for target in &cli.launches {
        let handle = desktop.launch(&target.app_id, &target.name)?;
        println!(
            "launched {}:{} instance={} windows={}",
            target.app_id,
            target.name,
            handle.id,
            handle.window_ids.len()
        );
    }
    for target in &cli.invocations {
        desktop.invoke(&target.app_id, &target.name, &[])?;
        println!("invoked {}:{}", target.app_id, target.name);
    }

    print_report(&desktop);
    Ok(())
}

fn print_report(desktop: &Desktop) {
    println!("desktop_core version={}", core_version());
    println!("apps:");
    for app_id in desktop.registry().app_ids() {
        let title = desktop
            .registry()
            .manifest(app_id)
            .map(|manifest| manifest.manifest().title.as_str())
            .unwrap_or_default();
        println!("  {app_id} \"{title}\"");
    }

    println!("windows (bottom to top):");
    for window_id in desktop.z_order() {
        let Ok(window) = desktop.window(*window_id) else {
            continue;
        };
        println!(
            "  {} key={} title=\"{}\" pos={},{} size={}x{} minimized={} maximized={} focused={} component={}",
            window.id,
            window.window_key,
            window.title,
            window.position.x,
            window.position.y,
            window.size.width,
            window.size.height,
            window.minimized,
            window.maximized,
            window.focused,
            window.component.as_str()
        );
    }
}
