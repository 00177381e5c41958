// wowsdirectory - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. One locate() pass and printing of the resolved paths

use clap::Parser;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use wowsdirectory::platform::config::{load_config, PlatformPaths};
use wowsdirectory::util::{self, error, error::WowsDirError};
use wowsdirectory::{GameDirectory, GameServer, GAME_SERVERS};

/// wowsdirectory - locate World of Warships installations.
///
/// Prints the worldwide client directory, then one line per server region
/// (WW, CN, PT). An unresolved region prints an empty line.
#[derive(Parser, Debug)]
#[command(name = "wowsdirectory", version, about)]
struct Cli {
    /// Alternate config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the install record as JSON instead of plain lines.
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// One region in the JSON report. Paths are rendered the same way as in
/// the line output, so a non-UTF-8 directory name cannot fail serialisation.
#[derive(Serialize)]
struct RegionReport {
    server: GameServer,
    path: Option<String>,
    source: Option<&'static str>,
}

fn print_lines(locator: &GameDirectory, out: &mut impl Write) -> std::io::Result<()> {
    let line = |server| {
        locator
            .get_game_directory(server)
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };

    writeln!(out, "{}", line(GameServer::Ww))?;
    for server in GAME_SERVERS {
        writeln!(out, "{}", line(server))?;
    }
    Ok(())
}

fn print_json(locator: &GameDirectory, out: &mut impl Write) -> error::Result<()> {
    let report: Vec<RegionReport> = GAME_SERVERS
        .into_iter()
        .map(|server| {
            let install = locator.record().get(server);
            RegionReport {
                server,
                path: install.map(|i| i.path.display().to_string()),
                source: install.map(|i| i.source),
            }
        })
        .collect();

    // Rendered in full first so a failure never leaves half a document.
    let json = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json}").map_err(|source| WowsDirError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source,
    })
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its [logging] level can apply;
    // validation warnings are logged once the subscriber exists.
    let platform_paths = PlatformPaths::resolve();
    let explicit_config = cli.config.is_some();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());
    let (config, config_warnings) = load_config(&config_path, explicit_config);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "wowsdirectory starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config validation warning");
    }

    let mut locator = GameDirectory::from_config(&config, platform_paths.home_dir.as_deref());
    tracing::debug!(strategies = ?locator.strategy_names(), "Discovery chain");
    locator.locate().info();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = if cli.json {
        print_json(&locator, &mut out)
    } else {
        print_lines(&locator, &mut out).map_err(|source| WowsDirError::Io {
            path: PathBuf::from("<stdout>"),
            operation: "write",
            source,
        })
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to print results");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
