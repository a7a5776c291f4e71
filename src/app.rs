use crate::api::Api;
use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{self, Event as NetworkEvent};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger;
use crate::session::{FileStore, Session};
use crate::state::{Navigator, State};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::{mpsc, Arc};
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
type LogReceiver = std::sync::mpsc::Receiver<String>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_rx = App::start_logger(&config)?;

        info!("Starting application...");
        let (tx, rx) = mpsc::channel::<NetworkEvent>();
        let store = FileStore::open(&config.session_path()?);
        debug!("Using session store at {:?}.", store.path());
        let session = Session::hydrate(Box::new(store));
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', expected one of {:?}.",
                config.theme_name,
                Theme::available_themes()
            );
            Theme::default()
        });
        let app = App {
            state: Arc::new(Mutex::new(State::new(
                tx,
                session,
                Navigator::new(),
                theme,
            ))),
            config,
        };
        app.start_network(rx)?;
        app.start_ui(log_rx).await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Install the logger and return the receiving end of its output.
    ///
    fn start_logger(config: &Config) -> Result<LogReceiver> {
        let level = config.log_level_filter()?;
        let logger = logger::init(level)?;
        let (log_tx, log_rx) = mpsc::channel::<String>();
        let log_tx = std::sync::Mutex::new(log_tx);
        logger.set_log_callback(Box::new(move |entry| {
            if let Ok(sender) = log_tx.lock() {
                let _ = sender.send(entry);
            }
        }));
        Ok(log_rx)
    }

    /// Start a separate thread for asynchronous state mutations. Every
    /// received event is handled on its own task.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let api = Arc::new(Api::new(&self.config.api_base_url)?);
        info!("Using schemes API at {}.", api.base_url());
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        std::thread::spawn(move || {
            let _guard = runtime.enter();
            while let Ok(network_event) = net_receiver.recv() {
                network::spawn(Arc::clone(&cloned_state), Arc::clone(&api), network_event);
            }
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, log_rx: LogReceiver) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {}", e)))?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let terminal_event_handler = TerminalEventHandler::new();
        let result = loop {
            let mut state = self.state.lock().await;
            while let Ok(entry) = log_rx.try_recv() {
                state.push_log(entry);
            }
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(anyhow::Error::from(e));
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => (),
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}
