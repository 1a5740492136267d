use anyhow::ensure;
use crossterm::event::{self, Event, KeyCode};
use quintris_engine::{GameEvent, GameSession, Grid, QueueSeed, SessionState};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::SessionDisplay;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Grid width in cells
    #[clap(long, default_value_t = Grid::DEFAULT_COLUMNS)]
    columns: usize,
    /// Grid height in cells
    #[clap(long, default_value_t = Grid::DEFAULT_ROWS)]
    rows: usize,
    /// 32-character hex seed for a reproducible piece sequence
    #[clap(long)]
    seed: Option<QueueSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            columns: Grid::DEFAULT_COLUMNS,
            rows: Grid::DEFAULT_ROWS,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { columns, rows, seed } = arg;
    ensure!(*columns > 0 && *rows > 0, "grid dimensions must be nonzero");

    let mut screen = PlayScreen::new(*columns, *rows, *seed);
    ratatui::run(|terminal| screen.run(terminal))
}

#[derive(Debug)]
struct PlayScreen {
    session: GameSession,
    aim: (usize, usize),
    status: String,
    is_exiting: bool,
}

impl PlayScreen {
    fn new(columns: usize, rows: usize, seed: Option<QueueSeed>) -> Self {
        let mut session = match seed {
            Some(seed) => GameSession::with_seed(columns, rows, seed),
            None => GameSession::new(columns, rows),
        };
        session.start();
        Self {
            session,
            aim: (columns / 2, rows / 2),
            status: String::new(),
            is_exiting: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.is_exiting {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_event(&event::read()?);
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let mut session_display = SessionDisplay::new(&self.session);
        if self.session.session_state().is_active() {
            session_display = session_display.aim(self.aim);
        }

        let help_text = match self.session.session_state() {
            SessionState::Idle | SessionState::Active => {
                "Controls: ← ↑ ↓ → (Aim) | Enter/Space (Place) | R (Rotate) | S (Swap) | X (Forfeit Life) | N (New Game) | Q (Quit)"
            }
            SessionState::GameOver => "Controls: N (New Game) | Q (Quit)",
        };
        let status_text = Text::from(self.status.as_str())
            .style(Style::default().fg(Color::Yellow))
            .centered();
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(status_text, status_area);
        frame.render_widget(help_text, help_area);
    }

    fn handle_event(&mut self, event: &Event) {
        let is_active = self.session.session_state().is_active();

        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Left if is_active => self.move_aim(-1, 0),
                KeyCode::Right if is_active => self.move_aim(1, 0),
                KeyCode::Up if is_active => self.move_aim(0, -1),
                KeyCode::Down if is_active => self.move_aim(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') if is_active => self.place(),
                KeyCode::Char('r') if is_active => self.session.rotate_current_piece(),
                KeyCode::Char('s') if is_active => self.session.swap_pieces(),
                KeyCode::Char('x') if is_active => self.session.lose_life(),
                KeyCode::Char('n') => self.restart(),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
        self.drain_events();
    }

    fn move_aim(&mut self, dx: isize, dy: isize) {
        let (column, row) = self.aim;
        self.aim = (
            column
                .saturating_add_signed(dx)
                .min(self.session.grid().columns() - 1),
            row.saturating_add_signed(dy)
                .min(self.session.grid().rows() - 1),
        );
    }

    fn place(&mut self) {
        let (column, row) = self.aim;
        _ = self.session.cell_activated(column, row);
    }

    fn restart(&mut self) {
        self.session.start();
        self.status.clear();
    }

    /// Turns queued session events into the status line. A real frontend
    /// would hook sounds and animations here instead.
    fn drain_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                GameEvent::PiecePlaced { .. } | GameEvent::QueueChanged => {}
                GameEvent::LinesCleared(1) => self.status = "Cleared 1 line".to_owned(),
                GameEvent::LinesCleared(count) => self.status = format!("Cleared {count} lines"),
                GameEvent::LevelUp(level) => self.status = format!("Level up! Now level {level}"),
                GameEvent::GameOver => self.status = "Game over".to_owned(),
            }
        }
    }
}
