mod app;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, time::Duration};

/// An LED Turing machine simulator with a Terminal User Interface.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  blinkentape-tui
  blinkentape-tui --seed 42")]
struct Cli {
    /// The 16-bit number to load onto the tape. A random seed is drawn when
    /// omitted.
    #[clap(short, long)]
    seed: Option<u16>,

    /// Milliseconds between ticks during auto-play
    #[clap(short, long, default_value = "80")]
    tick_ms: u64,
}

/// Represents the state of the application loop.
#[derive(PartialEq)]
enum AppState {
    Running,
    ShouldQuit,
}

/// A wrapper around the terminal to ensure it's restored on drop.
struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    /// Creates a new TUI.
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Restore the terminal to its original state.
        // The results are ignored as we can't do much about errors during drop.
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);

    // Build the machine before initializing the TUI so a load failure prints
    // to stderr without interfering with the alternate screen.
    let app = match App::new(seed) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: failed to load seed {}: {}", seed, e);
            std::process::exit(1);
        }
    };

    // Initialize the TUI. The `Tui` struct will handle cleanup on drop.
    let mut tui = Tui::new()?;

    run_app(&mut tui.terminal, app, Duration::from_millis(cli.tick_ms))?;

    Ok(())
}

/// Runs the main application loop; auto-play acts as the external tick
/// source driving the automaton.
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        let timeout = if app.is_auto_playing() {
            tick_rate
        } else {
            Duration::from_millis(100)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(&mut app, key) == AppState::ShouldQuit {
                    return Ok(());
                }
            }
        }

        if app.is_auto_playing() {
            app.tick();
        }
    }
}

/// Handles key events and updates the application state.
fn handle_key_event(app: &mut App, key: KeyEvent) -> AppState {
    if key.kind != KeyEventKind::Press {
        return AppState::Running;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return AppState::ShouldQuit,
        KeyCode::Char(' ') => app.tick(),
        KeyCode::Char('p') => app.toggle_auto_play(),
        KeyCode::Char('r') => app.reset_same_seed(),
        KeyCode::Char('n') => app.reset_new_seed(rand::random()),
        KeyCode::Char('h') => app.toggle_help(),
        _ => {}
    }
    AppState::Running
}
