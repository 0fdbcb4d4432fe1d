//! gqltable - paginated GraphQL tables in the terminal.
//!
//! Runs the demo pages against the in-process mock backend, or against a
//! real endpoint with `--endpoint`.

use std::io::{self, Stdout};
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use gqltable::api::{Client, GraphQlClient, MockBackend, Transport};
use gqltable::app::App;
use gqltable::config::Config;
use gqltable::error::{AppError, Result as AppResult};
use gqltable::events::EventHandler;
use gqltable::logging;
use gqltable::tasks::create_task_channel;
use gqltable::ui::Demo;

#[derive(Parser, Debug)]
#[command(name = "gqltable", version, about = "Paginated GraphQL tables in the terminal")]
struct Cli {
    /// Demo page to open first.
    #[arg(long, value_enum, default_value_t = Demo::Simple)]
    demo: Demo,

    /// GraphQL endpoint; the built-in mock is used when omitted.
    #[arg(long)]
    endpoint: Option<String>,

    /// Rows per page.
    #[arg(long)]
    page_size: Option<usize>,

    /// Artificial mock latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Configuration file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let client = build_client(&config)?;
    let result = run(&config, cli.demo, client);

    logging::shutdown();
    result
}

/// Load the configuration file and layer the command line on top.
fn load_config(cli: &Cli) -> AppResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.backend.endpoint = Some(endpoint.clone());
    }
    if let Some(page_size) = cli.page_size {
        config.settings.page_size = page_size;
    }
    if let Some(latency_ms) = cli.latency_ms {
        config.backend.latency_ms = latency_ms;
    }

    config.validate()?;
    Ok(config)
}

fn build_client(config: &Config) -> AppResult<Client> {
    let transport: Arc<dyn Transport> = match &config.backend.endpoint {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "Using HTTP GraphQL endpoint");
            Arc::new(GraphQlClient::new(endpoint)?)
        }
        None => {
            info!(seed_rows = config.backend.seed_rows, "Using mock backend");
            Arc::new(
                MockBackend::new(config.backend.seed_rows)
                    .with_latency(Duration::from_millis(config.backend.latency_ms))
                    .with_failing_mutations(config.backend.fail_mutations),
            )
        }
    };
    Ok(Client::with_cache(transport, config.settings.query_cache()))
}

fn run(config: &Config, demo: Demo, client: Client) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, config, demo, client);
    restore_terminal()?;
    if let Err(e) = &result {
        error!(error = %e, "Event loop failed");
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &Config,
    demo: Demo,
    client: Client,
) -> anyhow::Result<()> {
    let (mut rx, spawner) = create_task_channel(client);
    let mut app = App::new(config, demo, spawner);
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        match events.next() {
            Ok(event) => app.update(event),
            Err(e) => app.handle_error(&AppError::Io(e)),
        }

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
