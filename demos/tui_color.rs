//! TUI color picker - live swatch of the pixel under the cursor.
//!
//! Run with: cargo run --example tui_color
//!
//! Press 'q' or Ctrl+C to exit, 'p' to pin the current color.

use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pixprobe::{
    Config, CursorTracker, DpiContext, IntervalScheduler, SampleResult, SampleStatus, Scheduler,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::{
    collections::VecDeque,
    io,
    ops::ControlFlow,
    time::{Duration, Instant},
};

/// Maximum number of pinned colors to keep
const MAX_PINNED: usize = 20;

/// Application state
struct App {
    /// Most recent poll result
    current: Option<SampleResult>,
    /// Pinned colors (newest first)
    pinned: VecDeque<PinnedColor>,
    /// Polls since start
    polls: u64,
    /// Polls that were not live
    failures: u64,
    /// Start time for uptime calculation
    start_time: Instant,
    refresh: Duration,
}

#[derive(Clone)]
struct PinnedColor {
    timestamp: Instant,
    result: SampleResult,
}

impl App {
    fn new(refresh: Duration) -> Self {
        Self {
            current: None,
            pinned: VecDeque::with_capacity(MAX_PINNED),
            polls: 0,
            failures: 0,
            start_time: Instant::now(),
            refresh,
        }
    }

    fn record(&mut self, result: SampleResult) {
        self.polls += 1;
        if !result.is_live() {
            self.failures += 1;
        }
        self.current = Some(result);
    }

    fn pin(&mut self) {
        let Some(result) = self.current else { return };
        if result.color.is_none() {
            return;
        }
        if self.pinned.len() >= MAX_PINNED {
            self.pinned.pop_back();
        }
        self.pinned.push_front(PinnedColor {
            timestamp: Instant::now(),
            result,
        });
    }

    fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let mins = secs / 60;
        let hours = mins / 60;
        format!("{:02}:{:02}:{:02}", hours, mins % 60, secs % 60)
    }
}

fn swatch(color: pixprobe::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dpi = DpiContext::initialize()?;
    let config = Config::new().with_refresh_interval(Duration::from_millis(50));
    config.check_awareness(dpi.awareness())?;

    let mut tracker = CursorTracker::system(&dpi)?;
    let scheduler = IntervalScheduler::from_config(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(scheduler.period());
    let mut failure: Option<io::Error> = None;

    let run = scheduler.run(|| {
        app.record(tracker.poll());

        if let Err(e) = terminal.draw(|f| draw(f, &app)) {
            failure = Some(e);
            return ControlFlow::Break(());
        }

        // Drain pending keys without blocking the tick.
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    failure = Some(e);
                    return ControlFlow::Break(());
                }
            }
            match event::read() {
                Ok(CEvent::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return ControlFlow::Break(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return ControlFlow::Break(());
                    }
                    KeyCode::Char('p') | KeyCode::Char(' ') => app.pin(),
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    failure = Some(e);
                    return ControlFlow::Break(());
                }
            }
        }
        ControlFlow::Continue(())
    });

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run?;
    if let Some(e) = failure {
        return Err(e.into());
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(7), // Current sample
            Constraint::Min(6),    // Pinned colors
            Constraint::Length(1), // Help text
        ])
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);
    draw_current(f, app, chunks[1]);
    draw_pinned(f, app, chunks[2]);
    draw_help(f, chunks[3]);
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let (status_color, status_text) = match app.current.map(|r| r.status) {
        Some(SampleStatus::Live) => (Color::Green, "LIVE"),
        Some(SampleStatus::CaptureFailed) => (Color::Yellow, "CAPTURE FAILED"),
        Some(SampleStatus::CursorUnavailable) => (Color::Red, "NO CURSOR"),
        None => (Color::DarkGray, "STARTING"),
    };

    let title = Line::from(vec![
        Span::styled(
            " pixprobe ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            status_text,
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | {:?} | Polls: {} ({} failed) | Uptime: ",
            app.refresh, app.polls, app.failures
        )),
        Span::styled(app.uptime(), Style::default().fg(Color::Yellow)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let paragraph = Paragraph::new(title)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn draw_current(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Under Cursor ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(inner);

    let Some(result) = app.current else {
        let empty = Paragraph::new("Waiting for the first sample...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    };

    // Left: swatch, labelled in whichever of black or white reads better
    match result.color {
        Some(color) => {
            let label = if color.luma() > 0.5 {
                Color::Black
            } else {
                Color::White
            };
            let swatch_label = Paragraph::new(color.to_hex())
                .style(Style::default().bg(swatch(color)).fg(label))
                .alignment(Alignment::Center);
            f.render_widget(swatch_label, sections[0]);
        }
        None => {
            let empty = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            f.render_widget(empty, sections[0]);
        }
    }

    // Right: values
    let mut lines = vec![Line::from(vec![
        Span::styled("Position: ", Style::default().fg(Color::DarkGray)),
        Span::raw(result.position.to_string()),
    ])];
    match result.color {
        Some(color) => {
            let [r, g, b] = color.channels();
            lines.push(Line::from(vec![
                Span::styled("Hex:      ", Style::default().fg(Color::DarkGray)),
                Span::styled(color.to_hex(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("RGB:      ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{r}, {g}, {b}")),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "Color unavailable",
            Style::default().fg(Color::Red),
        ))),
    }
    if !result.is_live() {
        lines.push(Line::from(Span::styled(
            "(showing last known values)",
            Style::default().fg(Color::Yellow),
        )));
    }

    let values = Paragraph::new(lines).alignment(Alignment::Left);
    f.render_widget(values, sections[1]);
}

fn draw_pinned(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Pinned ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.pinned.is_empty() {
        let empty = Paragraph::new("Press 'p' to pin the current color")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    let rows: Vec<Row> = app
        .pinned
        .iter()
        .take(inner.height.saturating_sub(2) as usize)
        .filter_map(|entry| {
            let color = entry.result.color?;
            let elapsed = entry.timestamp.elapsed();
            let [r, g, b] = color.channels();
            Some(Row::new(vec![
                Cell::from("    ").style(Style::default().bg(swatch(color))),
                Cell::from(color.to_hex()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(format!("{r}, {g}, {b}")),
                Cell::from(entry.result.position.to_string()),
                Cell::from(format!("{}s ago", elapsed.as_secs()))
                    .style(Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(15),
            Constraint::Length(16),
            Constraint::Min(8),
        ],
    )
    .header(
        Row::new(vec!["", "Hex", "RGB", "Position", "Pinned"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    );

    f.render_widget(table, inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new("Press 'p' to pin, 'q' or Ctrl+C to exit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}
