//! tcalc - Terminal Calculator
//!
//! A keypad calculator in the terminal. Digits, operators and functions can
//! be entered from the keyboard or by clicking the on-screen buttons.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{info, warn};

use tcalc::application::{App, Effect};
use tcalc::infrastructure::{copy_to_clipboard, default_log_path, init_logging, Config};
use tcalc::presentation::{render_ui, screen_layout, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "tcalc", version, about = "A keypad calculator for the terminal")]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter such as "debug" or "tcalc=trace" (overrides the config file)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Entry point for the tcalc terminal calculator.
///
/// Loads configuration, installs the file logger, sets up the terminal and
/// runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    let config_path = args.config.clone().or_else(Config::default_path);
    let (config, config_error) = match config_path.as_deref().map(Config::load_from) {
        Some(Ok(config)) => (config, None),
        Some(Err(error)) => (Config::default(), Some(error)),
        None => (Config::default(), None),
    };

    let log_path = args
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(default_log_path);
    let log_level = args.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    if let Err(error) = init_logging(&log_path, &log_level) {
        eprintln!("tcalc: logging disabled: {}", error);
    }
    info!(log = %log_path.display(), "starting tcalc");

    let mut app = App::new(&config);
    if let Some(error) = config_error {
        warn!(%error, "falling back to default config");
        app.status_message = Some(format!("Config ignored: {}", error));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    info!("tcalc exited");

    Ok(())
}

/// Main application event loop.
///
/// Draws the calculator, then applies exactly one input event before
/// drawing again, so actions are processed strictly in arrival order.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let effect = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                InputHandler::handle_key_event(app, key.code, key.modifiers)
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let layout = screen_layout(Rect::new(0, 0, size.width, size.height));
                InputHandler::handle_mouse_event(app, mouse, layout.keypad)
            }
            _ => None,
        };

        match effect {
            Some(Effect::Quit) => return Ok(()),
            Some(Effect::Copy(text)) => {
                let result = copy_to_clipboard(&text).map(|()| text);
                app.set_copy_result(result);
            }
            None => {}
        }
    }
}
