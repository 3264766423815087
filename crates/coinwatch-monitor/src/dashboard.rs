//! TUI Dashboard using ratatui.

use std::fmt::Display;
use std::io;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use coinwatch_core::types::TIMESTAMP_FORMAT;
use coinwatch_indicators::{IndicatorSnapshot, WindowSummary};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Tabs},
    Frame, Terminal,
};
use tracing::{debug, warn};

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const PAGE_ROWS: usize = 20;
const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Prices,
    AllPrices,
    Indicators,
    Rsi,
    Correlation,
    Daily,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Prices,
        Tab::AllPrices,
        Tab::Indicators,
        Tab::Rsi,
        Tab::Correlation,
        Tab::Daily,
        Tab::Data,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Prices => "Prices",
            Tab::AllPrices => "All prices",
            Tab::Indicators => "Indicators",
            Tab::Rsi => "RSI",
            Tab::Correlation => "Correlation",
            Tab::Daily => "Daily",
            Tab::Data => "Data",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What a key press asks the run loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    None,
}

/// Dashboard state.
///
/// Each refresh replaces the snapshot wholesale. A failed refresh keeps
/// the previous snapshot on screen and shows the error.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub snapshot: Option<IndicatorSnapshot>,
    pub tab: Tab,
    pub selected: usize,
    /// Rows scrolled past on the data tab, counted from the newest
    pub data_offset: usize,
    pub last_error: Option<String>,
    pub refreshes: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            snapshot: None,
            tab: Tab::Prices,
            selected: 0,
            data_offset: 0,
            last_error: None,
            refreshes: 0,
        }
    }
}

impl DashboardState {
    /// Take the result of one refresh cycle.
    pub fn apply<E: Display>(&mut self, result: Result<IndicatorSnapshot, E>) {
        match result {
            Ok(snapshot) => {
                let count = snapshot.assets.len();
                if self.selected >= count {
                    self.selected = count.saturating_sub(1);
                }
                self.data_offset = self.data_offset.min(snapshot.prices.len().saturating_sub(1));
                self.snapshot = Some(snapshot);
                self.last_error = None;
                self.refreshes += 1;
            }
            Err(e) => {
                warn!(error = %e, "Dashboard refresh failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn asset_count(&self) -> usize {
        self.snapshot.as_ref().map(|s| s.assets.len()).unwrap_or(0)
    }

    fn row_count(&self) -> usize {
        self.snapshot.as_ref().map(|s| s.prices.len()).unwrap_or(0)
    }

    fn scroll_data(&mut self, code: KeyCode) {
        let last = self.row_count().saturating_sub(1);
        self.data_offset = match code {
            KeyCode::Down => self.data_offset + 1,
            KeyCode::Up => self.data_offset.saturating_sub(1),
            KeyCode::PageDown => self.data_offset + PAGE_ROWS,
            KeyCode::PageUp => self.data_offset.saturating_sub(PAGE_ROWS),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => self.data_offset,
        }
        .min(last);
    }

    /// Name of the asset shown on the chart tabs.
    pub fn selected_asset(&self) -> Option<&str> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.assets.get(self.selected))
            .map(|a| a.asset.as_str())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        let count = self.asset_count();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('r') => return KeyAction::Refresh,
            KeyCode::Right | KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Left | KeyCode::BackTab => self.tab = self.tab.previous(),
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End
                if self.tab == Tab::Data =>
            {
                self.scroll_data(code)
            }
            KeyCode::Up if count > 0 => {
                self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Down if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            _ => {}
        }
        KeyAction::None
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh: Duration,
    tick: Duration,
}

impl Dashboard {
    /// Create a new dashboard reloading data every `refresh_secs`.
    pub fn new(refresh_secs: u64, tick_ms: u64) -> Self {
        Self {
            refresh: Duration::from_secs(refresh_secs.max(1)),
            tick: Duration::from_millis(tick_ms.max(10)),
        }
    }

    /// Run the dashboard until the user quits.
    ///
    /// `load` runs one full pipeline cycle and is called on start, on
    /// every refresh interval and on demand.
    pub fn run<F, E>(&self, mut load: F) -> io::Result<()>
    where
        F: FnMut() -> Result<IndicatorSnapshot, E>,
        E: Display,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut load);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F, E>(&self, terminal: &mut Terminal<B>, load: &mut F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut() -> Result<IndicatorSnapshot, E>,
        E: Display,
    {
        let mut state = DashboardState::default();
        state.apply(load());
        let mut last_refresh = Instant::now();

        loop {
            terminal.draw(|f| self.ui(f, &state))?;

            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match state.handle_key(key.code) {
                            KeyAction::Quit => return Ok(()),
                            KeyAction::Refresh => {
                                debug!("Manual refresh");
                                state.apply(load());
                                last_refresh = Instant::now();
                            }
                            KeyAction::None => {}
                        }
                    }
                }
            }

            if last_refresh.elapsed() >= self.refresh {
                state.apply(load());
                last_refresh = Instant::now();
            }
        }
    }

    /// Draw one frame.
    pub fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(10),   // Body
                Constraint::Length(3), // Status
            ])
            .split(frame.area());

        self.render_tabs(frame, chunks[0], state);

        match &state.snapshot {
            Some(snapshot) => match state.tab {
                Tab::Prices => self.render_prices(frame, chunks[1], snapshot, state.selected),
                Tab::AllPrices => self.render_all_prices(frame, chunks[1], snapshot),
                Tab::Indicators => self.render_indicators(frame, chunks[1], snapshot, state.selected),
                Tab::Rsi => self.render_rsi(frame, chunks[1], snapshot, state.selected),
                Tab::Correlation => self.render_correlation(frame, chunks[1], snapshot),
                Tab::Daily => self.render_daily(frame, chunks[1], snapshot),
                Tab::Data => self.render_data(frame, chunks[1], snapshot, state.data_offset),
            },
            None => {
                let waiting = Paragraph::new("Waiting for price data...")
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(waiting, chunks[1]);
            }
        }

        self.render_status(frame, chunks[2], state);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(state.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Crypto Dashboard"),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let mut spans = Vec::new();
        if let Some(snapshot) = &state.snapshot {
            spans.push(Span::raw(format!(
                "Updated {}  |  {} samples",
                snapshot.generated_at.format("%Y-%m-%d %H:%M:%S"),
                snapshot.prices.len()
            )));
            if let Some(asset) = state.selected_asset() {
                spans.push(Span::raw("  |  "));
                spans.push(Span::styled(asset.to_string(), Style::default().fg(Color::Cyan)));
            }
        }
        if let Some(err) = &state.last_error {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                format!("Refresh failed: {}", err),
                Style::default().fg(Color::Red),
            ));
        }
        spans.push(Span::raw(
            "  |  q quit, ←/→ tabs, ↑/↓ asset or row, PgUp/PgDn page, r refresh",
        ));

        let status = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, area);
    }

    fn render_prices(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &IndicatorSnapshot,
        selected: usize,
    ) {
        let Some(asset) = snapshot.assets.get(selected) else {
            return;
        };
        let timestamps = snapshot.prices.timestamps();
        let prices = snapshot.prices.prices(&asset.asset).unwrap_or_default();

        let price_points = points(timestamps, prices);
        let mean_points = points(timestamps, &asset.rolling_mean);
        let (lo, hi) = value_bounds(price_points.iter().chain(&mean_points));

        let datasets = vec![
            Dataset::default()
                .name(asset.asset.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&price_points),
            Dataset::default()
                .name(format!("mean({})", snapshot.config.rolling_window))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&mean_points),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} price", asset.asset)),
            )
            .x_axis(time_axis(timestamps))
            .y_axis(
                Axis::default()
                    .bounds([lo, hi])
                    .labels(vec![
                        format!("{:.2}", lo),
                        format!("{:.2}", (lo + hi) / 2.0),
                        format!("{:.2}", hi),
                    ]),
            );
        frame.render_widget(chart, area);
    }

    /// Every asset on one chart, each indexed to 100 at its first price.
    fn render_all_prices(&self, frame: &mut Frame, area: Rect, snapshot: &IndicatorSnapshot) {
        let timestamps = snapshot.prices.timestamps();
        let series: Vec<(String, Vec<(f64, f64)>)> = snapshot
            .prices
            .iter_series()
            .map(|s| (s.asset().to_string(), points(timestamps, &indexed(s.prices()))))
            .collect();
        let (lo, hi) = value_bounds(series.iter().flat_map(|(_, p)| p));

        let datasets: Vec<Dataset> = series
            .iter()
            .zip(SERIES_COLORS.iter().cycle())
            .map(|((asset, data), color)| {
                Dataset::default()
                    .name(asset.as_str())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(data)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Crypto prices over time (first price = 100)"),
            )
            .x_axis(time_axis(timestamps))
            .y_axis(
                Axis::default()
                    .bounds([lo, hi])
                    .labels(vec![
                        format!("{:.1}", lo),
                        format!("{:.1}", (lo + hi) / 2.0),
                        format!("{:.1}", hi),
                    ]),
            );
        frame.render_widget(chart, area);
    }

    /// Raw price rows, newest first, starting `offset` rows down.
    fn render_data(&self, frame: &mut Frame, area: Rect, snapshot: &IndicatorSnapshot, offset: usize) {
        let prices = &snapshot.prices;
        let total = prices.len();
        // Borders and header
        let visible = (area.height as usize).saturating_sub(3);

        let header_cells = std::iter::once("timestamp")
            .chain(prices.assets().iter().map(String::as_str))
            .map(|h| Cell::from(h.to_string()).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells.collect::<Vec<_>>()).height(1);

        let columns: Vec<&[f64]> = prices
            .assets()
            .iter()
            .map(|a| prices.prices(a).unwrap_or_default())
            .collect();
        let rows: Vec<Row> = (0..total)
            .rev()
            .skip(offset)
            .take(visible)
            .map(|i| {
                let cells = std::iter::once(Cell::from(
                    prices.timestamps()[i].format(TIMESTAMP_FORMAT).to_string(),
                ))
                .chain(columns.iter().map(|c| Cell::from(fmt_price(c[i]))));
                Row::new(cells.collect::<Vec<_>>())
            })
            .collect();

        let title = if total == 0 {
            "Price data (empty)".to_string()
        } else {
            let first = offset.min(total - 1) + 1;
            let last = (offset + rows.len()).min(total);
            format!("Price data, newest first (rows {}-{} of {})", first, last, total)
        };

        let widths = std::iter::once(Constraint::Length(21))
            .chain(std::iter::repeat(Constraint::Min(12)).take(prices.assets().len()))
            .collect::<Vec<_>>();
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(table, area);
    }

    fn render_rsi(&self, frame: &mut Frame, area: Rect, snapshot: &IndicatorSnapshot, selected: usize) {
        let Some(asset) = snapshot.assets.get(selected) else {
            return;
        };
        let timestamps = snapshot.prices.timestamps();
        let rsi_points = points(timestamps, &asset.rsi);
        let x_max = x_extent(timestamps);
        let oversold = [(0.0, RSI_OVERSOLD), (x_max, RSI_OVERSOLD)];
        let overbought = [(0.0, RSI_OVERBOUGHT), (x_max, RSI_OVERBOUGHT)];

        let datasets = vec![
            Dataset::default()
                .name(format!("RSI({})", snapshot.config.rsi_period))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Magenta))
                .data(&rsi_points),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&oversold),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&overbought),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} RSI  (latest {})", asset.asset, fmt_num(asset.latest_rsi, 1))),
            )
            .x_axis(time_axis(timestamps))
            .y_axis(
                Axis::default()
                    .bounds([0.0, 100.0])
                    .labels(vec!["0", "30", "70", "100"]),
            );
        frame.render_widget(chart, area);
    }

    fn render_indicators(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &IndicatorSnapshot,
        selected: usize,
    ) {
        let header_cells = ["Asset", "Last price", "Volatility", "Max drawdown", "RSI"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = snapshot.assets.iter().enumerate().map(|(i, a)| {
            let rsi_color = if a.latest_rsi >= RSI_OVERBOUGHT {
                Color::Red
            } else if a.latest_rsi <= RSI_OVERSOLD {
                Color::Green
            } else {
                Color::White
            };
            let row = Row::new(vec![
                Cell::from(a.asset.clone()),
                Cell::from(fmt_opt(a.last_price, 2)),
                Cell::from(fmt_pct(a.volatility_pct)),
                Cell::from(fmt_pct(a.max_drawdown_pct)).style(Style::default().fg(Color::Red)),
                Cell::from(fmt_num(a.latest_rsi, 1)).style(Style::default().fg(rsi_color)),
            ]);
            if i == selected {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(24),
                Constraint::Percentage(19),
                Constraint::Percentage(19),
                Constraint::Percentage(19),
                Constraint::Percentage(19),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Indicators"));

        frame.render_widget(table, area);
    }

    fn render_correlation(&self, frame: &mut Frame, area: Rect, snapshot: &IndicatorSnapshot) {
        let assets = snapshot.correlation.assets();

        let header_cells = std::iter::once(Cell::from(""))
            .chain(assets.iter().map(|a| Cell::from(a.clone())))
            .map(|c| c.style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells.collect::<Vec<_>>()).height(1);

        let rows = assets
            .iter()
            .zip(snapshot.correlation.values())
            .map(|(asset, values)| {
                let cells = std::iter::once(
                    Cell::from(asset.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .chain(values.iter().map(|v| {
                    Cell::from(fmt_num(*v, 2)).style(Style::default().fg(correlation_color(*v)))
                }));
                Row::new(cells.collect::<Vec<_>>())
            });

        let widths = vec![Constraint::Ratio(1, assets.len() as u32 + 1); assets.len() + 1];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Return correlation"));

        frame.render_widget(table, area);
    }

    fn render_daily(&self, frame: &mut Frame, area: Rect, snapshot: &IndicatorSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        frame.render_widget(window_table(&snapshot.today), chunks[0]);
        frame.render_widget(window_table(&snapshot.yesterday), chunks[1]);
    }
}

fn window_table(window: &WindowSummary) -> Table<'static> {
    let header_cells = ["Asset", "Open", window.status.end_price_label(), "Evolution", "Volatility"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = window
        .assets
        .iter()
        .map(|a| {
            let color = match a.evolution_pct {
                Some(e) if e >= 0.0 => Color::Green,
                Some(_) => Color::Red,
                None => Color::DarkGray,
            };
            Row::new(vec![
                Cell::from(a.asset.clone()),
                Cell::from(fmt_opt(a.open, 2)),
                Cell::from(fmt_opt(a.end_price, 2)),
                Cell::from(a.evolution_pct.map(fmt_pct).unwrap_or_else(na))
                    .style(Style::default().fg(color)),
                Cell::from(a.volatility_pct.map(fmt_pct).unwrap_or_else(na)),
            ])
        })
        .collect();

    let title = if window.is_empty() {
        format!("{} ({}) - not yet available", window.label, window.start.date())
    } else {
        format!("{} ({}, {} samples)", window.label, window.start.date(), window.samples)
    };

    Table::new(
        rows,
        [
            Constraint::Percentage(24),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
}

/// Chart points with x in seconds since the first sample. Undefined values are skipped.
fn points(timestamps: &[NaiveDateTime], values: &[f64]) -> Vec<(f64, f64)> {
    let Some(first) = timestamps.first() else {
        return Vec::new();
    };
    timestamps
        .iter()
        .zip(values)
        .filter(|(_, v)| v.is_finite())
        .map(|(t, v)| ((*t - *first).num_seconds() as f64, *v))
        .collect()
}

/// Values scaled so the first usable price reads 100.
fn indexed(values: &[f64]) -> Vec<f64> {
    match values.iter().find(|v| v.is_finite() && **v != 0.0) {
        Some(base) => values.iter().map(|v| v / base * 100.0).collect(),
        None => vec![f64::NAN; values.len()],
    }
}

fn x_extent(timestamps: &[NaiveDateTime]) -> f64 {
    match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) => ((*last - *first).num_seconds() as f64).max(1.0),
        _ => 1.0,
    }
}

fn time_axis(timestamps: &[NaiveDateTime]) -> Axis<'static> {
    let labels = match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) => vec![
            first.format("%m-%d %H:%M").to_string(),
            last.format("%m-%d %H:%M").to_string(),
        ],
        _ => Vec::new(),
    };
    Axis::default()
        .bounds([0.0, x_extent(timestamps)])
        .labels(labels)
}

fn value_bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> (f64, f64) {
    let (lo, hi) = points.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
        (lo.min(*y), hi.max(*y))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(hi.abs() * 1e-4).max(1e-9);
    (lo - pad, hi + pad)
}

fn correlation_color(value: f64) -> Color {
    if !value.is_finite() {
        Color::DarkGray
    } else if value >= 0.7 {
        Color::Green
    } else if value <= -0.7 {
        Color::Red
    } else {
        Color::White
    }
}

fn na() -> String {
    "n/a".to_string()
}

fn fmt_num(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", decimals, value)
    } else {
        na()
    }
}

fn fmt_price(value: f64) -> String {
    if value.abs() < 10.0 {
        fmt_num(value, 4)
    } else {
        fmt_num(value, 2)
    }
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| fmt_num(v, decimals)).unwrap_or_else(na)
}

fn fmt_pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value)
    } else {
        na()
    }
}
