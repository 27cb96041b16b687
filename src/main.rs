//! chatview CLI entry point.
//!
//! Provides `preview`, `reporting` and `settings` subcommands for exercising
//! the reply preview resolver, the reporting gate and the settings model
//! against a config file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use chatview::config::{self, Config};
use chatview::preview::{resolve_preview, QueryTokenSigner};
use chatview::settings;
use chatview::state::{AppState, Credentials};
use chatview::telemetry::{LogBackend, ReportingGate, TelemetryBackends};
use chatview::types::Message;

/// chatview — reply previews and telemetry gating for a chat client.
#[derive(Parser)]
#[command(name = "chatview", version, about)]
struct Cli {
    /// Config file (default: `~/.chatview/config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to this directory in addition to stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Resolve the reply preview for a message stored as JSON.
    Preview {
        /// Path to the message JSON.
        message: PathBuf,
        /// Logged-in user id, enables thumbnails together with `--token`.
        #[arg(long, requires = "token")]
        user_id: Option<String>,
        /// Session token.
        #[arg(long, requires = "user_id")]
        token: Option<String>,
    },
    /// Toggle reporting flags and record events through the log backend.
    Reporting {
        /// New crash reporting value.
        #[arg(long)]
        crash: Option<bool>,
        /// New analytics reporting value.
        #[arg(long)]
        analytics: Option<bool>,
        /// Event to record after applying the toggles.
        #[arg(long)]
        event: Option<String>,
    },
    /// Print the settings rows and links for the configured build.
    Settings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logging_guard = match &cli.log_dir {
        Some(dir) => Some(chatview::logging::init_production(dir)?),
        None => {
            chatview::logging::init_cli()?;
            None
        }
    };

    let config = load(cli.config.as_deref())?;

    match cli.command {
        Command::Preview {
            message,
            user_id,
            token,
        } => handle_preview(&config, &message, user_id.zip(token)),
        Command::Reporting {
            crash,
            analytics,
            event,
        } => handle_reporting(&config, crash, analytics, event.as_deref()),
        Command::Settings => handle_settings(&config),
    }
}

fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config::default_config_path()?,
    };
    config::load_or_default(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Resolve and print a reply preview.
fn handle_preview(
    config: &Config,
    message_path: &Path,
    session: Option<(String, String)>,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(message_path)
        .with_context(|| format!("failed to read {}", message_path.display()))?;
    let message: Message = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", message_path.display()))?;

    let mut state = AppState::from_config(config);
    state.login.user = session.map(|(user_id, token)| Credentials { user_id, token });

    let preview = resolve_preview(&message, &state.preview_context(), &QueryTokenSigner);
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

/// Apply reporting toggles and print the resulting flags.
fn handle_reporting(
    config: &Config,
    crash: Option<bool>,
    analytics: Option<bool>,
    event: Option<&str>,
) -> anyhow::Result<()> {
    let gate = ReportingGate::new(config.build.variant, config.reporting.flags(), || {
        TelemetryBackends {
            analytics: Box::new(LogBackend),
            crash: Box::new(LogBackend),
        }
    });
    gate.apply_flags();

    if let Some(value) = crash {
        gate.set_crash_reporting_enabled(value);
    }
    if let Some(value) = analytics {
        gate.set_analytics_reporting_enabled(value);
    }
    if let Some(name) = event {
        gate.log_event(name, None);
    }

    info!(?gate, "reporting state");
    let summary = serde_json::json!({
        "variant": config.build.variant,
        "analytics_available": gate.capabilities().analytics_available,
        "crash_reporting": gate.crash_reporting_enabled(),
        "analytics_reporting": gate.analytics_reporting_enabled(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Print the settings rows and links.
fn handle_settings(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config);
    let items: Vec<&str> =
        settings::visible_items(config.build.variant, state.app.is_master_detail)
            .into_iter()
            .map(|item| item.title_key())
            .collect();
    let summary = serde_json::json!({
        "items": items,
        "share_link": settings::share_link(
            config.build.platform,
            config.build.variant,
            &config.links,
        ),
        "server": settings::server_subtitle(&state.server.url),
        "support_mail": settings::support_mail_url(
            &config.support,
            env!("CARGO_PKG_VERSION"),
            "cli",
        )?,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
