use blinkentape::{Automaton, LedColor, Phase, State, Step, Symbol, TapeError};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};

const BLOCK_PADDING: Padding = Padding::new(1, 1, 0, 0);

/// How many tape positions to show on each side of the head.
const TAPE_CONTEXT: i8 = 5;

pub struct App {
    automaton: Automaton,
    seed: u16,
    outcome: Step,
    auto_play: bool,
    message: String,
    show_help: bool,
}

impl App {
    pub fn new(seed: u16) -> Result<Self, TapeError> {
        let automaton = Automaton::new(seed)?;

        Ok(Self {
            automaton,
            seed,
            outcome: Step::Running,
            auto_play: false,
            message: "Press 'h' for help.".to_string(),
            show_help: false,
        })
    }

    pub fn render(&mut self, f: &mut Frame) {
        let margin_size = Margin::new(1, 0);
        let inner_area = f.area().inner(margin_size);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Machine info
                Constraint::Length(5), // LED strip
                Constraint::Min(0),    // Tape window / help
                Constraint::Length(3), // Status
            ])
            .split(inner_area);

        self.render_machine_info(f, main_chunks[0]);
        self.render_leds(f, main_chunks[1]);

        if self.show_help {
            self.render_help(f, main_chunks[2]);
        } else {
            self.render_tape(f, main_chunks[2]);
        }

        self.render_status(f, main_chunks[3]);
    }

    /// Advances the machine by one external tick.
    pub fn tick(&mut self) {
        match self.outcome {
            Step::Running => {
                self.outcome = self.automaton.step();
                self.message = match self.outcome {
                    Step::Running => format!("Tick {}", self.automaton.tick_count()),
                    Step::Halted => {
                        self.auto_play = false;
                        "Machine halted. Press 'n' for a new seed.".to_string()
                    }
                    Step::Failed => {
                        self.auto_play = false;
                        match self.automaton.fault() {
                            Some(fault) => format!("Machine failed: {}", fault),
                            None => "Machine failed: unexpected blank under the head".to_string(),
                        }
                    }
                };
            }
            _ => {
                self.auto_play = false;
                self.message = "Machine is terminal. Press 'r' or 'n' to restart.".to_string();
            }
        }
    }

    pub fn reset_same_seed(&mut self) {
        let seed = self.seed;
        self.reset_new_seed(seed);
    }

    pub fn reset_new_seed(&mut self, seed: u16) {
        // A 16-bit seed always fits the tape, but surface a failure rather
        // than crashing the terminal session.
        match self.automaton.reset(seed) {
            Ok(()) => {
                self.seed = seed;
                self.outcome = Step::Running;
                self.auto_play = false;
                self.message = format!("Loaded seed {}", seed);
            }
            Err(e) => {
                self.message = format!("Failed to load seed {}: {}", seed, e);
            }
        }
    }

    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
        self.message = format!(
            "Auto-play {}",
            if self.auto_play {
                "enabled"
            } else {
                "disabled"
            }
        );
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play && self.outcome == Step::Running
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn render_machine_info(&self, f: &mut Frame, area: Rect) {
        let (status_text, status_color) = match self.outcome {
            Step::Halted => ("HALTED", Color::Green),
            Step::Failed => ("FAILED", Color::Red),
            Step::Running if self.automaton.tick_count() == 0 => ("READY", Color::Blue),
            Step::Running => ("RUNNING", Color::Green),
        };

        let text = vec![
            Line::from(vec![
                Span::styled("Seed: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{} (0b{:b})", self.seed, self.seed)),
                Span::styled(" | Ticks: ", Style::default().fg(Color::Yellow)),
                Span::raw(self.automaton.tick_count().to_string()),
                Span::styled(" | Status: ", Style::default().fg(Color::Yellow)),
                Span::styled(status_text, Style::default().fg(status_color)),
            ]),
            Line::from(vec![
                Span::styled("Program state: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{:?}", self.automaton.state()),
                    Style::default()
                        .fg(state_color(self.automaton.state()))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" | Phase: ", Style::default().fg(Color::Yellow)),
                Span::raw(phase_name(self.automaton.phase())),
            ]),
        ];

        let paragraph = Paragraph::new(text).block(
            block("Blinkentape - LED Turing Machine (TUI)").title_alignment(Alignment::Center),
        );

        f.render_widget(paragraph, area);
    }

    fn render_leds(&self, f: &mut Frame, area: Rect) {
        let snapshot = self.automaton.led_snapshot();

        let mut cells = Vec::new();
        for (i, color) in snapshot.iter().enumerate() {
            let style = match color {
                LedColor::Green => Style::default().fg(Color::Green),
                LedColor::Red => Style::default().fg(Color::Red),
                LedColor::Off => Style::default().fg(Color::DarkGray),
            };
            cells.push(Span::styled("██", style));
            if i + 1 < snapshot.len() {
                cells.push(Span::raw(" "));
            }
        }

        let labels = (0..snapshot.len())
            .map(|i| format!("{:<3}", i))
            .collect::<String>();

        let text = vec![
            Line::from(cells),
            Line::from(Span::styled(labels, Style::default().fg(Color::DarkGray))),
        ];

        f.render_widget(section("LED Strip", text), area);
    }

    fn render_tape(&self, f: &mut Frame, area: Rect) {
        let tape = self.automaton.tape();
        let head = tape.head();

        let mut tape_spans = Vec::new();
        for delta in -TAPE_CONTEXT..=TAPE_CONTEXT {
            let symbol = match tape.read_offset(delta) {
                Symbol::One => '1',
                Symbol::Zero => '0',
                Symbol::Blank => '_',
            };

            if delta == 0 {
                // Head cell with bracket-free highlight, like the hardware's
                // doubled center LEDs.
                tape_spans.push(Span::styled(
                    format!(" {symbol} "),
                    Style::default()
                        .bg(Color::Yellow)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                tape_spans.push(Span::styled(format!(" {symbol} "), Style::default()));
            }
        }

        let text = vec![
            Line::from(tape_spans),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Head at position {} | {} cell(s) written",
                    head,
                    tape.len()
                ),
                Style::default().fg(Color::Cyan),
            )),
        ];

        let paragraph = section("Tape", text).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from("Controls:"),
            Line::from("  Space - Tick once"),
            Line::from("  p - Toggle auto-play"),
            Line::from("  r - Reset with the same seed"),
            Line::from("  n - Reset with a new random seed"),
            Line::from("  h - Toggle this help"),
            Line::from("  q - Quit"),
            Line::from(""),
            Line::from("The strip shows five tape positions around the head,"),
            Line::from("each doubled except the outermost cells. Green is 1,"),
            Line::from("red is 0. Both edges turn green on halt, red on error."),
        ];

        f.render_widget(section("Help", help_text), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let outer = block("Status");
        let inner = outer.inner(area);

        let auto_play_status = if self.auto_play { "ON" } else { "OFF" };
        let status = Line::from(vec![
            Span::raw("Auto-play: "),
            Span::styled(auto_play_status, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" | {}", self.message)),
        ]);

        f.render_widget(outer, area);
        f.render_widget(Paragraph::new(status), inner);
    }
}

fn state_color(state: State) -> Color {
    match state {
        State::Halt => Color::Green,
        State::Error => Color::Red,
        _ => Color::Cyan,
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::ReadWrite => "read-write",
        Phase::MoveLeft => "move-left",
        Phase::MoveRight => "move-right",
        Phase::Idle => "idle",
    }
}

fn section<'a>(title: &'a str, content: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(content).block(block(title))
}

fn block(title: &str) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .padding(BLOCK_PADDING)
}
