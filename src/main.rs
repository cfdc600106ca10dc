mod app;
mod backend;
mod cli;
mod config;
mod dashboard;
mod keybinds;
mod logging;
mod poller;
mod snapshot;
mod theme;
mod ui;
mod view;

use std::env;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::{App, AppAction};
use crate::backend::BackendClient;
use crate::cli::{Cli, CliCommand, SnapshotOptions, USAGE, parse_args};
use crate::config::{Config, config_path, log_path};
use crate::poller::{PollEvent, Poller};

type TuiBackend = CrosstermBackend<Stdout>;
type Tui = Terminal<TuiBackend>;

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Cli { url, command } = parse_args(&args)?;

    match command {
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Version => {
            println!("repodash {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        CliCommand::ConfigPath => {
            println!("{}", config_path().display());
            return Ok(());
        }
        _ => {}
    }

    let mut config = Config::load()?;
    if let Some(url) = url {
        config.base_url = url;
    }

    match command {
        CliCommand::Snapshot(options) => handle_snapshot(&config, &options),
        CliCommand::Update => handle_update(&config),
        _ => run_dashboard(config),
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("repodash-poll")
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn handle_snapshot(config: &Config, options: &SnapshotOptions) -> Result<()> {
    logging::init_stderr_logging(&config.log_level)?;
    let client = BackendClient::new(&config.base_url, config.request_timeout())?;
    let runtime = build_runtime()?;

    let repos = runtime.block_on(client.list_repos())?;
    let last_updated = match runtime.block_on(client.last_updated()) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!("Could not read last updated value: {:#}", error);
            None
        }
    };

    let filters = options.apply(&config.filters);
    let rows = view::filtered_rows(&repos, &filters);
    print!(
        "{}",
        snapshot::render_table(&rows, view::totals(&rows), last_updated.as_ref())
    );
    Ok(())
}

fn handle_update(config: &Config) -> Result<()> {
    logging::init_stderr_logging(&config.log_level)?;
    let client = BackendClient::new(&config.base_url, config.request_timeout())?;
    let runtime = build_runtime()?;
    runtime.block_on(client.trigger_update())?;
    println!("Update requested from {}", client.base_url());
    Ok(())
}

fn run_dashboard(config: Config) -> Result<()> {
    let log_file = log_path();
    logging::init_file_logging(&config.log_level, &log_file)?;
    tracing::info!(base_url = %config.base_url, log = %log_file.display(), "starting dashboard");

    let client = BackendClient::new(&config.base_url, config.request_timeout())?;
    let runtime = build_runtime()?;
    let (event_tx, event_rx) = mpsc::channel();
    let mut poller = Poller::start(
        runtime.handle().clone(),
        Arc::new(client),
        config.poll_intervals(),
        event_tx,
    );

    let mut app = App::new(&config);
    let result = {
        let mut terminal_guard = TerminalGuard::init()?;
        run_app(terminal_guard.terminal_mut(), &mut app, &mut poller, &event_rx)
    };

    if poller.is_running() {
        poller.shutdown();
    }
    runtime.shutdown_timeout(Duration::from_secs(1));
    tracing::info!("dashboard closed");
    result
}

fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    poller: &mut Poller,
    event_rx: &Receiver<PollEvent>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        drain_poll_events(app, event_rx);
        terminal.draw(|frame| ui::draw(frame, app))?;

        if app.should_quit() {
            return Ok(());
        }

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if !event::poll(timeout)? {
            last_tick = Instant::now();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            app.on_key(key);
        }
        handle_actions(app, poller);

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }
    }
}

fn drain_poll_events(app: &mut App, event_rx: &Receiver<PollEvent>) {
    loop {
        match event_rx.try_recv() {
            Ok(event) => app.apply_poll_event(event),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                app.set_status("Poller stopped");
                return;
            }
        }
    }
}

fn handle_actions(app: &mut App, poller: &mut Poller) {
    while let Some(action) = app.take_action() {
        match action {
            AppAction::TriggerUpdate => {
                tracing::info!("backend update requested");
                poller.trigger_update();
            }
            AppAction::Refresh => {
                tracing::info!("manual refresh requested");
                poller.refresh_now();
            }
        }
    }
}

struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    fn init() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
