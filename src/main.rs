//wsterm/src/main.rs
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use wsterm::kernel::services::adapters::{
    ensure_settings_file, load_settings, AsyncRuntime, HttpExecutionBridge, ShellExecutionBridge,
};
use wsterm::kernel::services::ports::{BridgeMode, RemoteExecutionBridge, Settings};
use wsterm::kernel::{CommandInterpreter, TerminalSession, WorkspaceStore};
use wsterm::line_mode::LineMode;
use wsterm::models::WorkspaceTree;

mod logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Local,
    Http,
    Shell,
}

impl From<ModeArg> for BridgeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Local => BridgeMode::Local,
            ModeArg::Http => BridgeMode::Http,
            ModeArg::Shell => BridgeMode::Shell,
        }
    }
}

#[derive(Parser)]
#[command(name = "wsterm")]
#[command(about = "Workspace tree driven by a terminal-style command language")]
#[command(version)]
struct Cli {
    /// Where commands are executed (overrides settings)
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Base URL of the remote execution endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Remote command timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Directory that shell mode runs commands under
    #[arg(long)]
    shell_root: Option<PathBuf>,

    /// Read commands from stdin line by line instead of starting the TUI
    #[arg(long)]
    line_mode: bool,

    /// Root folder created at startup (can be repeated)
    #[arg(long = "seed")]
    seed: Vec<String>,
}

fn merge_settings(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(mode) = cli.mode {
        settings.bridge.mode = mode.into();
    }
    if let Some(endpoint) = &cli.endpoint {
        settings.bridge.endpoint = endpoint.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.bridge.timeout_ms = timeout_ms;
    }
    if let Some(root) = &cli.shell_root {
        settings.bridge.shell_root = Some(root.clone());
    }
    settings.workspace.seed_folders.extend(cli.seed.iter().cloned());
    settings
}

fn build_interpreter(
    settings: &Settings,
    store: WorkspaceStore,
) -> anyhow::Result<CommandInterpreter> {
    let bridge: Arc<dyn RemoteExecutionBridge> = match settings.bridge.mode {
        BridgeMode::Local => return Ok(CommandInterpreter::local(store)),
        BridgeMode::Http => Arc::new(
            HttpExecutionBridge::new(&settings.bridge.endpoint)
                .context("failed to create HTTP bridge")?,
        ),
        BridgeMode::Shell => {
            let root = match &settings.bridge.shell_root {
                Some(root) => root.clone(),
                None => std::env::current_dir().context("failed to resolve shell root")?,
            };
            Arc::new(ShellExecutionBridge::new(root))
        }
    };
    let timeout = Duration::from_millis(settings.bridge.timeout_ms);
    tracing::info!(bridge = bridge.name(), timeout_ms = settings.bridge.timeout_ms, "remote mode");
    Ok(CommandInterpreter::remote(store, bridge, timeout))
}

fn seed_store(settings: &Settings) -> anyhow::Result<WorkspaceStore> {
    let mut tree = WorkspaceTree::new();
    for name in &settings.workspace.seed_folders {
        if let Err(err) = tree.create_root_folder(name) {
            tracing::warn!(folder = %name, error = %err, "skipping seed folder");
        }
    }
    WorkspaceStore::with_tree(tree).context("seeded workspace is inconsistent")
}

fn mode_label(settings: &Settings) -> &'static str {
    match settings.bridge.mode {
        BridgeMode::Local => "local",
        BridgeMode::Http => "http",
        BridgeMode::Shell => "shell",
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let log_guard = logging::init();
    if let Some(guard) = &log_guard {
        tracing::debug!(log_dir = %guard.log_dir().display(), "wsterm starting");
    }

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "could not create settings file");
    }
    let settings = merge_settings(&cli, load_settings().unwrap_or_default());

    let store = seed_store(&settings)?;
    let interpreter = build_interpreter(&settings, store)?;
    let session = TerminalSession::with_welcome(settings.terminal.welcome.as_deref());

    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).context("failed to start async runtime")?;

    if cli.line_mode || !cfg!(feature = "tui") {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let mut mode = LineMode::new(runtime.tokio_handle(), &interpreter, session, interactive);
        mode.run(stdin.lock(), &mut io::stdout().lock())
            .context("line mode failed")?;
        return Ok(ExitCode::SUCCESS);
    }

    run_tui(interpreter, session, runtime, rx, mode_label(&settings))
}

#[cfg(feature = "tui")]
fn run_tui(
    interpreter: CommandInterpreter,
    session: TerminalSession,
    runtime: AsyncRuntime,
    rx: mpsc::Receiver<wsterm::kernel::services::adapters::AppMessage>,
    label: &str,
) -> anyhow::Result<ExitCode> {
    use ratatui::backend::CrosstermBackend;
    use ratatui::Terminal;
    use wsterm::tui::{QuitSignal, ScreenGuard, TerminalApp};

    let quit = QuitSignal::install().context("failed to install signal handlers")?;
    let mut screen = ScreenGuard::enter().context("failed to enter raw mode")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to create terminal")?;
    let mut app = TerminalApp::new(interpreter, session, runtime, rx, label);
    let outcome = app.run(&mut terminal, &quit);

    screen.leave().context("failed to restore terminal")?;
    match outcome.context("terminal loop failed")? {
        Some(signal) => Ok(ExitCode::from(signal.exit_code())),
        None => Ok(ExitCode::SUCCESS),
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(
    _interpreter: CommandInterpreter,
    _session: TerminalSession,
    _runtime: AsyncRuntime,
    _rx: mpsc::Receiver<wsterm::kernel::services::adapters::AppMessage>,
    _label: &str,
) -> anyhow::Result<ExitCode> {
    anyhow::bail!("built without the `tui` feature; use --line-mode")
}
