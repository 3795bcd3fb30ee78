use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::feed::Feed;
use crate::tui::app::DashboardApp;
use crate::view::render::{render_view, render_view_bar};

const KEY_HINTS: &str = "1-4/Tab switch view   h/l select account   r refresh   q quit";

pub fn draw<F: Feed>(f: &mut Frame, app: &DashboardApp<F>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // status
            Constraint::Min(10),    // active view
            Constraint::Length(4),  // view bar + keys
        ])
        .split(f.area());

    let status = app.coordinator.status();
    let header = Paragraph::new(format!(
        "{} {}  {}",
        status.indicator(),
        status.label(),
        app.coordinator.status_line()
    ))
    .block(Block::default().title("mtwatch").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let body = Paragraph::new(render_view(
        app.view,
        &app.accounts,
        &app.selection,
        &app.render_options(),
    ))
    .block(Block::default().title(app.view.label()).borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let footer = Paragraph::new(format!("{}\n{}", render_view_bar(app.view), KEY_HINTS))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}
