use quintris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, ProgressDisplay, color, style};

#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    aim: Option<(usize, usize)>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            aim: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn aim(self, aim: (usize, usize)) -> Self {
        Self {
            aim: Some(aim),
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::Idle => color::GRAY,
            SessionState::Active => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(self.session.grid())
                .block(Block::bordered().border_style(border_style).style(style));
            if let Some(aim) = self.aim {
                widget.aim(aim)
            } else {
                widget
            }
        };
        let current_panel = PieceDisplay::new(self.session.current_piece()).block(
            Block::bordered()
                .title(Line::from("PIECE").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let following_panel = PieceDisplay::new(self.session.following_piece()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let progress_panel = ProgressDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(u16::max(current_panel.width(), progress_panel.width())),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [current_area, following_area, progress_area] = Layout::vertical([
            Constraint::Length(current_panel.height()),
            Constraint::Length(following_panel.height()),
            Constraint::Length(progress_panel.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let current_area = current_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(current_panel.width())]).flex(Flex::End),
        )[0];
        let following_area = following_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(following_panel.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let game_board_width = game_board.width();
        current_panel.render(current_area, buf);
        following_panel.render(following_area, buf);
        game_board.render(board_area, buf);
        progress_panel.render(progress_area, buf);

        let popup = match self.session.session_state() {
            SessionState::Idle | SessionState::Active => None,
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
