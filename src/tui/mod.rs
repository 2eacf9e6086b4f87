//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive parameter source: a settings panel with the
//! sample-size and noise-level sliders drives a [`LinearSession`], and every
//! change redraws the chart and findings from the recomputed run.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::warn;

use crate::app::pipeline::LinearRun;
use crate::app::session::{LinearSession, ParamChange};
use crate::config::Settings;
use crate::domain::true_line;
use crate::error::AppError;
use crate::params::LinearParams;

mod linear_chart;

use linear_chart::LinearChart;

/// Sample-size slider steps per arrow key press.
const SAMPLE_SIZE_KEY_STEPS: i64 = 10;
const FIELD_COUNT: usize = 3;
const X_LABEL: &str = "x_variable";
const Y_LABEL: &str = "y_variable";

/// Start the TUI.
pub fn run(params: LinearParams, seed: u64, settings: &Settings) -> Result<(), AppError> {
    // Compute the first run before touching the terminal so config errors
    // print normally.
    let mut app = App::new(params, seed, settings.report_dir.clone())?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::Terminal(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: LinearSession,
    report_dir: PathBuf,
    selected_field: usize,
    status: String,
}

impl App {
    fn new(params: LinearParams, seed: u64, report_dir: PathBuf) -> Result<Self, AppError> {
        Ok(Self {
            session: LinearSession::new(params, seed)?,
            report_dir,
            selected_field: 0,
            status: "Ready.".to_string(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::Terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::Terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::Terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('r') => {
                self.reseed(self.session.seed().wrapping_add(1));
            }
            KeyCode::Char('b') => {
                match crate::report::bundle::write_report_bundle(&self.report_dir, self.session.run())
                {
                    Ok(path) => {
                        self.status = format!("Wrote report bundle: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Report write failed: {err}");
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i64) {
        match self.selected_field {
            0 => {
                if self.apply(ParamChange::StepSampleSize(delta * SAMPLE_SIZE_KEY_STEPS)) {
                    self.status = format!("sample size: {}", self.session.run().dataset.len());
                }
            }
            1 => {
                if self.apply(ParamChange::StepNoiseLevel(delta)) {
                    self.status =
                        format!("noise level: {}", self.session.params().noise_level.value());
                }
            }
            2 => {
                let seed = if delta >= 0 {
                    self.session.seed().wrapping_add(1)
                } else {
                    self.session.seed().wrapping_sub(1)
                };
                self.reseed(seed);
            }
            _ => {}
        }
    }

    fn reseed(&mut self, seed: u64) {
        if self.apply(ParamChange::Reseed(seed)) {
            self.status = format!("seed: {seed}");
        }
    }

    /// Apply a change; on failure the previous run stays on screen.
    fn apply(&mut self, change: ParamChange) -> bool {
        match self.session.apply(change) {
            Ok(_) => true,
            Err(err) => {
                warn!(?change, error = %err, "parameter change rejected");
                self.status = format!("Update failed: {err}");
                false
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let summary = &self.session.run().summary;
        let lines = vec![
            Line::from(vec![
                Span::styled("synth", Style::default().fg(Color::Cyan)),
                Span::raw(" | interactive data analysis"),
            ]),
            Line::from(Span::styled(
                format!(
                    "n={} | noise={} ({}) | seed={} | r={:.3} ({})",
                    summary.config.sample_size,
                    summary.config.noise_level,
                    summary.noise_band.label(),
                    self.session.seed(),
                    summary.correlation,
                    summary.strength.label(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(42)])
            .split(area);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(columns[1]);

        self.draw_chart(frame, columns[0]);
        self.draw_settings(frame, side[0]);
        self.draw_findings(frame, side[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Observed data vs y = 2x + 1")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(self.session.run());
        let axes = AxisSpec {
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: X_LABEL,
            y_label: Y_LABEL,
        };
        let (chart_rect, insets) = chart_layout(inner);
        let widget = LinearChart {
            points: &series.points,
            true_line: &series.true_line,
            fit_line: &series.fit_line,
            x_bounds: axes.x_bounds,
            y_bounds: axes.y_bounds,
            x_label: axes.x_label,
            y_label: axes.y_label,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &axes);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let params = self.session.params();
        let items = vec![
            ListItem::new(slider_line(&params.sample_size)),
            ListItem::new(slider_line(&params.noise_level)),
            ListItem::new(format!("Seed: {}", self.session.seed())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_findings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines: Vec<Line> = findings_lines(self.session.run())
            .into_iter()
            .map(Line::from)
            .collect();
        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Key Findings").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r reseed  b report  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn slider_line(slider: &crate::params::Slider) -> String {
    format!(
        "{}: {} [{} - {}]",
        slider.label,
        slider.value(),
        slider.min,
        slider.max
    )
}

fn findings_lines(run: &LinearRun) -> Vec<String> {
    let s = &run.summary;
    vec![
        format!("Sample Size: {} data points", s.config.sample_size),
        format!(
            "Correlation: {:.3} ({} relationship)",
            s.correlation,
            s.strength.label()
        ),
        format!("Mean Y: {:.2} ± {:.2}", s.mean_y, s.std_y),
        format!(
            "Noise Level: {} ({})",
            s.noise_band.label(),
            s.config.noise_level
        ),
        format!("Fit: y = {:.3}x + {:.3}", s.fit.slope, s.fit.intercept),
    ]
}

struct ChartSeries {
    points: Vec<(f64, f64)>,
    true_line: Vec<(f64, f64)>,
    fit_line: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters.
fn chart_series(run: &LinearRun) -> ChartSeries {
    let points: Vec<(f64, f64)> = run.dataset.records.iter().map(|r| (r.x, r.y)).collect();

    let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, _) in &points {
        x0 = x0.min(x);
        x1 = x1.max(x);
    }
    if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
        x0 = crate::domain::X_MIN;
        x1 = crate::domain::X_MAX;
    }

    let fit = run.summary.fit;
    let true_line = vec![(x0, true_line(x0)), (x1, true_line(x1))];
    let fit_line = vec![
        (x0, fit.intercept + fit.slope * x0),
        (x1, fit.intercept + fit.slope * x1),
    ];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in points.iter().chain(&true_line).chain(&fit_line) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartSeries {
        points,
        true_line,
        fit_line,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    }
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.1}")
}

/// Axis bounds and titles shared by the Plotters widget and the tick overlay.
#[derive(Debug, Clone, Copy)]
struct AxisSpec<'a> {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'a str,
    y_label: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

const AXIS_INSETS: AxisInsets = AxisInsets {
    left: 8,
    right: 2,
    top: 1,
    bottom: 2,
};
const AXIS_TICKS: usize = 5;

/// Shrink `inner` to leave room for tick labels, or `None` when it is too small.
fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let i = AXIS_INSETS;
    let fits = inner.width > i.left + i.right + 10 && inner.height > i.top + i.bottom + 5;
    if !fits {
        return (inner, None);
    }
    let rect = Rect::new(
        inner.x + i.left,
        inner.y + i.top,
        inner.width - i.left - i.right,
        inner.height - i.top - i.bottom,
    );
    (rect, Some(i))
}

/// `(fraction along the axis, value)` for evenly spaced ticks.
fn tick_values(bounds: [f64; 2]) -> impl Iterator<Item = (f64, f64)> {
    (0..AXIS_TICKS).map(move |i| {
        let u = i as f64 / (AXIS_TICKS as f64 - 1.0);
        (u, bounds[0] + u * (bounds[1] - bounds[0]))
    })
}

fn draw_label(frame: &mut ratatui::Frame<'_>, text: String, x: u16, y: u16, style: Style) {
    let width = text.chars().count() as u16;
    frame.render_widget(Paragraph::new(text).style(style), Rect::new(x, y, width, 1));
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    axes: &AxisSpec<'_>,
) {
    let style = Style::default().fg(Color::Gray);
    let bottom = inner.y + inner.height;

    let tick_row = chart.y + chart.height;
    if tick_row + 1 < bottom {
        for (u, value) in tick_values(axes.x_bounds) {
            let label = format!("{value:.1}");
            let col = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let start = col.saturating_sub((label.len() / 2) as u16);
            draw_label(frame, label, start, tick_row, style);
        }
    }

    let right_edge = inner.x + insets.left.saturating_sub(1);
    for (u, value) in tick_values(axes.y_bounds) {
        let label = format!("{value:.0}");
        let start = right_edge.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        let row = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        draw_label(frame, label, start, row, style);
    }

    let title_row = tick_row + 1;
    if title_row < bottom {
        frame.render_widget(
            Paragraph::new(axes.x_label)
                .alignment(Alignment::Center)
                .style(style),
            Rect::new(chart.x, title_row, chart.width, 1),
        );
    }

    // The y title sits on the free row above the plot, left-aligned.
    let width = (axes.y_label.chars().count() as u16).min(inner.width);
    frame.render_widget(
        Paragraph::new(axes.y_label).style(style.add_modifier(Modifier::BOLD)),
        Rect::new(inner.x, inner.y, width, 1),
    );
}
