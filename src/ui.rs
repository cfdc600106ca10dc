use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
};

use crate::app::{App, InputMode};
use crate::backend::{Endpoint, PLACEHOLDER_NAME, RepositoryRecord};
use crate::dashboard::Connection;
use crate::keybinds::BINDING_SPECS;
use crate::theme::ThemePalette;

mod ui_help;
mod ui_shared;
mod ui_status;
mod ui_table;

use ui_help::draw_help_overlay;
use ui_shared::*;
use ui_status::{draw_detail, draw_footer, draw_header};
use ui_table::draw_repo_table;

const HEADER_HEIGHT: u16 = 4;
const DETAIL_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 1;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let theme = app.theme();
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_app)), area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(DETAIL_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    draw_header(frame, app, sections[0], theme);
    draw_repo_table(frame, app, sections[1], theme);
    draw_detail(frame, app, sections[2], theme);
    draw_footer(frame, app, sections[3], theme);

    if app.help_visible() {
        draw_help_overlay(frame, app, area, theme);
    }
}
