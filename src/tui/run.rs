use ratatui::crossterm::event::{self, Event, KeyCode};
use ratatui::crossterm::{execute, terminal};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::{Duration, Instant};

use crate::app::metrics;
use crate::config::Config;
use crate::feed::Feed;
use crate::refresh::RefreshCoordinator;
use crate::tui::{app::DashboardApp, ui::draw};
use crate::view::ViewMode;
use crate::{Error, Result};

/// Interactive loop: keyboard between ticks, periodic unforced refresh,
/// redraw every pass. View switching never waits on a pending fetch.
pub fn run<F: Feed>(config: Config, coordinator: RefreshCoordinator<F>) -> Result<()> {
    let mut app = DashboardApp::new(config, coordinator)?;

    terminal::enable_raw_mode().map_err(term_err)?;
    execute!(stdout(), terminal::EnterAlternateScreen).map_err(term_err)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).map_err(term_err)?;

    app.refresh(false);
    let interval = Duration::from_millis(app.config.refresh.interval_ms);
    let mut last_tick = Instant::now();

    let result = loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                    KeyCode::Char('c')
                        if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                    {
                        break Ok(());
                    }
                    KeyCode::Char('r') => app.refresh(true),
                    KeyCode::Tab => {
                        let next = app.view.next();
                        app.switch_view(next);
                    }
                    KeyCode::Char('1') => app.switch_view(ViewMode::Tabs),
                    KeyCode::Char('2') => app.switch_view(ViewMode::Grid),
                    KeyCode::Char('3') => app.switch_view(ViewMode::Table),
                    KeyCode::Char('4') => app.switch_view(ViewMode::Dropdown),
                    KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
                    KeyCode::Right | KeyCode::Char('l') => app.select_next(),
                    _ => {}
                },
                Ok(_) => {}
                Err(err) => break Err(term_err(err)),
            },
            Ok(false) => {}
            Err(err) => break Err(term_err(err)),
        }

        if last_tick.elapsed() >= interval {
            app.refresh(false);
            last_tick = Instant::now();
        }

        if let Err(err) = terminal.draw(|frame| draw(frame, &app)) {
            break Err(term_err(err));
        }
    };

    terminal::disable_raw_mode().map_err(term_err)?;
    execute!(stdout(), terminal::LeaveAlternateScreen).map_err(term_err)?;
    let _ = metrics::write_if_configured();
    result
}

fn term_err(err: std::io::Error) -> Error {
    Error::new(format!("terminal io failed: {err}"))
}
