//! `retrodesk`: drives the desktop runtime from line commands on stdin.

mod commands;
mod session;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    rc::Rc,
};

use anyhow::Context;
use clap::Parser;
use desktop_runtime::{DesktopConfig, DesktopHost};
use platform_host::{unix_time_ms_now, FilePrefsStore, MemoryPrefsStore, PrefsStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    commands::{parse_command, ShellCommand},
    session::OutputMode,
};

#[derive(Debug, Parser)]
#[command(name = "retrodesk", version, about = "Retro desktop shell emulator")]
struct Cli {
    /// TOML configuration file; defaults apply when it does not exist.
    #[arg(long, default_value = "retrodesk.toml")]
    config: PathBuf,
    /// Directory for persisted state, overriding `[storage] dir`.
    #[arg(long)]
    state_dir: Option<PathBuf>,
    /// Print listings as JSON.
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn open_prefs_store(config: &DesktopConfig) -> anyhow::Result<Rc<dyn PrefsStore>> {
    match &config.storage.dir {
        Some(dir) => {
            let store = FilePrefsStore::from_root(dir)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("opening state dir {}", dir.display()))?;
            info!(file = %store.file().display(), "using file-backed state");
            Ok(Rc::new(store))
        }
        None => {
            info!("no state dir configured; state is kept in memory");
            Ok(Rc::new(MemoryPrefsStore::default()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = DesktopConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(dir) = cli.state_dir {
        config.storage.dir = Some(dir);
    }
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let prefs = open_prefs_store(&config)?;
    let mut host = DesktopHost::boot(&config, prefs, unix_time_ms_now());
    info!(
        width = config.screen.width,
        height = config.screen.height,
        "desktop ready"
    );

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    write_sounds(&mut host, &mut out)?;
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let now = unix_time_ms_now();

        let outcome = host.tick(now);
        if outcome.screensaver_started {
            writeln!(out, "[screensaver {:?}]", host.idle_timer().kind())?;
        }
        if host.record_input(now) {
            writeln!(out, "[screensaver dismissed]")?;
        }
        if let Some(reading) = outcome.clock {
            info!(clock = %reading.label(), "tick");
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_command(trimmed) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => session::execute(&mut host, command, now, mode, &mut out)?,
            Err(err) => writeln!(out, "error: {err}")?,
        }
        write_sounds(&mut host, &mut out)?;
    }

    Ok(())
}

fn write_sounds(host: &mut DesktopHost, out: &mut impl Write) -> io::Result<()> {
    for sound in host.take_sounds() {
        writeln!(out, "[sound {sound}]")?;
    }
    Ok(())
}
