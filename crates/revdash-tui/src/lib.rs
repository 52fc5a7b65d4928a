// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use revdash_app::{
    AppCommand, AppEvent, AppState, ClientId, ClientRecord, CommitOutcome, FORWARD_MONTHS,
    ForecastEditor, SortDirection, SortKey, TabKind, displayed_value, forward_month_labels,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::{Date, OffsetDateTime};

/// Fixed auto-dismiss delay for the save acknowledgment overlay.
const ACK_DISMISS: Duration = Duration::from_secs(3);
const STATUS_DISMISS: Duration = Duration::from_secs(4);

const SORT_MARK_ASC: &str = "↑";
const SORT_MARK_DESC: &str = "↓";

const THIS_MONTH_COLUMNS: [&str; 5] = ["client", "forecast", "actual", "difference", "comment"];
const COMMENT_COLUMN: usize = 4;

/// Seam between the view layer and whatever owns the client records.
/// Mutations mirror the store contract: unknown ids degrade to no-ops
/// inside the implementation, never to errors.
pub trait AppRuntime {
    fn load_clients(&mut self) -> Result<Vec<ClientRecord>>;
    fn apply_sort(&mut self, key: SortKey, direction: SortDirection) -> Result<()>;
    fn set_comment(&mut self, id: ClientId, text: &str) -> Result<()>;
    fn set_future_forecast(&mut self, id: ClientId, month: &str, value: f64) -> Result<()>;
    /// Diagnostic trace of the state a save-like action observed.
    /// Implementations may drop it entirely.
    fn record_saved_snapshot(&mut self, clients: &[ClientRecord]) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    ClearAcknowledgment { token: u64 },
}

#[derive(Debug, Clone, Default)]
struct ViewData {
    clients: Vec<ClientRecord>,
    forward_months: [String; FORWARD_MONTHS],
    selected_row: usize,
    selected_col: usize,
    comment_editing: bool,
    forecast_editor: ForecastEditor,
    status_token: u64,
    ack_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    refresh_forward_months(&mut view_data, OffsetDateTime::now_utc().date());
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_clients(runtime, &mut view_data, state.active_tab) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);
        refresh_forward_months(&mut view_data, OffsetDateTime::now_utc().date());

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(state: &mut AppState, view_data: &ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearAcknowledgment { token } if token == view_data.ack_token => {
                state.dispatch(AppCommand::ClearAcknowledgment);
            }
            // A newer save or status superseded this timer.
            InternalEvent::ClearStatus { .. } | InternalEvent::ClearAcknowledgment { .. } => {}
        }
    }
}

fn schedule_clear(internal_tx: &Sender<InternalEvent>, delay: Duration, event: InternalEvent) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(event);
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_clear(
        internal_tx,
        STATUS_DISMISS,
        InternalEvent::ClearStatus {
            token: view_data.status_token,
        },
    );
}

/// Dispatches a shell command and reacts to the emitted events: sort
/// changes reorder through the runtime, acknowledgments arm their
/// dismiss timer, and status updates arm theirs. Re-arming bumps the
/// token so a stale timer's event is ignored instead of cutting a newer
/// acknowledgment short.
fn dispatch_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let tab = state.active_tab;
    let events = state.dispatch(command);
    for event in &events {
        match event {
            AppEvent::SortChanged(spec) => {
                if let Err(error) = runtime
                    .apply_sort(spec.key, spec.direction)
                    .and_then(|()| refresh_clients(runtime, view_data, tab))
                {
                    emit_status(state, view_data, internal_tx, format!("sort failed: {error}"));
                }
            }
            AppEvent::TabChanged(_) => {
                view_data.selected_row = 0;
                view_data.selected_col = 0;
                view_data.comment_editing = false;
                view_data.forecast_editor.cancel();
            }
            AppEvent::AcknowledgmentShown => {
                view_data.ack_token = view_data.ack_token.saturating_add(1);
                schedule_clear(
                    internal_tx,
                    ACK_DISMISS,
                    InternalEvent::ClearAcknowledgment {
                        token: view_data.ack_token,
                    },
                );
            }
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_clear(
                    internal_tx,
                    STATUS_DISMISS,
                    InternalEvent::ClearStatus {
                        token: view_data.status_token,
                    },
                );
            }
            _ => {}
        }
    }
}

/// Month labels follow the host clock on every redraw: a session that
/// crosses a month boundary shifts the grid forward, and overrides
/// keyed by a label that fell off revert to the derived default.
fn refresh_forward_months(view_data: &mut ViewData, today: Date) {
    view_data.forward_months = forward_month_labels(today);
}

fn refresh_clients<R: AppRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tab: TabKind,
) -> Result<()> {
    view_data.clients = runtime.load_clients()?;
    clamp_cursor(view_data, tab);
    Ok(())
}

fn column_count(tab: TabKind) -> usize {
    match tab {
        TabKind::ThisMonth => THIS_MONTH_COLUMNS.len(),
        TabKind::NextThreeMonths => 1 + FORWARD_MONTHS,
    }
}

fn clamp_cursor(view_data: &mut ViewData, tab: TabKind) {
    let rows = view_data.clients.len();
    if rows == 0 {
        view_data.selected_row = 0;
    } else {
        view_data.selected_row = view_data.selected_row.min(rows - 1);
    }
    view_data.selected_col = view_data.selected_col.min(column_count(tab) - 1);
}

fn sort_key_for_column(column: usize) -> Option<SortKey> {
    SortKey::ALL.get(column).copied()
}

fn selected_client(view_data: &ViewData) -> Option<&ClientRecord> {
    view_data.clients.get(view_data.selected_row)
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.comment_editing {
        handle_comment_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.forecast_editor.is_editing() {
        handle_forecast_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch_command(state, runtime, view_data, internal_tx, AppCommand::NextTab);
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch_command(state, runtime, view_data, internal_tx, AppCommand::PrevTab);
        }
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            move_row(view_data, 1);
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            move_row(view_data, -1);
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
            move_col(state, view_data, 1);
        }
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
            move_col(state, view_data, -1);
        }
        (KeyCode::Char(']'), KeyModifiers::NONE) if state.active_tab == TabKind::ThisMonth => {
            dispatch_command(state, runtime, view_data, internal_tx, AppCommand::NextMonth);
        }
        (KeyCode::Char('['), KeyModifiers::NONE) if state.active_tab == TabKind::ThisMonth => {
            dispatch_command(state, runtime, view_data, internal_tx, AppCommand::PrevMonth);
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => {
            handle_sort_request(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            handle_edit_request(state, view_data, internal_tx);
        }
        (KeyCode::Char('w'), KeyModifiers::NONE) => {
            handle_save_request(state, runtime, view_data, internal_tx);
        }
        _ => {}
    }

    false
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    let rows = view_data.clients.len();
    if rows == 0 {
        return;
    }
    let current = view_data.selected_row;
    view_data.selected_row = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        (current + delta as usize).min(rows - 1)
    };
}

fn move_col(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let columns = column_count(state.active_tab);
    let current = view_data.selected_col;
    view_data.selected_col = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        (current + delta as usize).min(columns - 1)
    };
}

fn handle_sort_request<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if state.active_tab != TabKind::ThisMonth {
        emit_status(state, view_data, internal_tx, "sort unavailable");
        return;
    }
    match sort_key_for_column(view_data.selected_col) {
        Some(key) => {
            dispatch_command(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::CycleSort(key),
            );
        }
        None => {
            emit_status(state, view_data, internal_tx, "sort unavailable");
        }
    }
}

fn handle_edit_request(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(client) = selected_client(view_data) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };

    match state.active_tab {
        TabKind::ThisMonth => {
            if view_data.selected_col == COMMENT_COLUMN {
                view_data.comment_editing = true;
                emit_status(state, view_data, internal_tx, "comment edit (enter/esc done)");
            } else {
                emit_status(state, view_data, internal_tx, "only comments are editable here");
            }
        }
        TabKind::NextThreeMonths => {
            let Some(offset) = view_data.selected_col.checked_sub(1) else {
                emit_status(state, view_data, internal_tx, "edit unavailable");
                return;
            };
            let Some(month) = view_data.forward_months.get(offset).cloned() else {
                emit_status(state, view_data, internal_tx, "edit unavailable");
                return;
            };
            let displayed = displayed_value(client, &month, offset);
            let id = client.id;
            view_data.forecast_editor.begin(id, month, displayed);
            emit_status(state, view_data, internal_tx, "forecast edit (enter save, esc cancel)");
        }
    }
}

fn handle_save_request<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match state.active_tab {
        TabKind::ThisMonth => {
            if let Err(error) = runtime.record_saved_snapshot(&view_data.clients) {
                emit_status(state, view_data, internal_tx, format!("trace failed: {error}"));
            }
            dispatch_command(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::ShowAcknowledgment,
            );
        }
        TabKind::NextThreeMonths => {
            if !state.unsaved_forecasts {
                emit_status(state, view_data, internal_tx, "no forecast changes to commit");
                return;
            }
            if let Err(error) = runtime.record_saved_snapshot(&view_data.clients) {
                emit_status(state, view_data, internal_tx, format!("trace failed: {error}"));
            }
            dispatch_command(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::CommitAllForecasts,
            );
        }
    }
}

/// Comment editing writes through on every keystroke: the stored
/// comment is always the text on screen, with no separate buffer to
/// lose.
fn handle_comment_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            view_data.comment_editing = false;
        }
        KeyCode::Backspace => {
            let Some(client) = selected_client(view_data) else {
                view_data.comment_editing = false;
                return;
            };
            let mut comment = client.comment.clone();
            comment.pop();
            write_comment(state, runtime, view_data, internal_tx, comment);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let Some(client) = selected_client(view_data) else {
                view_data.comment_editing = false;
                return;
            };
            let mut comment = client.comment.clone();
            comment.push(ch);
            write_comment(state, runtime, view_data, internal_tx, comment);
        }
        _ => {}
    }
}

fn write_comment<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    comment: String,
) {
    let Some(id) = selected_client(view_data).map(|client| client.id) else {
        return;
    };
    let tab = state.active_tab;
    if let Err(error) = runtime
        .set_comment(id, &comment)
        .and_then(|()| refresh_clients(runtime, view_data, tab))
    {
        emit_status(state, view_data, internal_tx, format!("comment failed: {error}"));
    }
}

fn handle_forecast_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.forecast_editor.cancel();
        }
        KeyCode::Backspace => {
            view_data.forecast_editor.delete_back();
        }
        KeyCode::Enter => match view_data.forecast_editor.commit() {
            CommitOutcome::Committed { client, month, value } => {
                let tab = state.active_tab;
                if let Err(error) = runtime
                    .set_future_forecast(client, &month, value)
                    .and_then(|()| refresh_clients(runtime, view_data, tab))
                {
                    emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
                    return;
                }
                dispatch_command(
                    state,
                    runtime,
                    view_data,
                    internal_tx,
                    AppCommand::MarkUnsavedForecasts,
                );
                emit_status(state, view_data, internal_tx, "forecast saved (w commits all)");
            }
            CommitOutcome::RejectedInput => {
                emit_status(state, view_data, internal_tx, "not a number");
            }
            CommitOutcome::NotEditing => {}
        },
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.forecast_editor.insert_char(ch);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = TabKind::ALL
        .iter()
        .map(|tab| format!(" {} ", tab.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("revdash").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.active_tab {
        TabKind::ThisMonth => render_this_month(frame, layout[1], state, view_data),
        TabKind::NextThreeMonths => render_next_months(frame, layout[1], state, view_data),
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if state.acknowledgment {
        let area = centered_rect(44, 22, frame.area());
        frame.render_widget(Clear, area);
        let thanks = Paragraph::new("Thank you!\nYour changes have been saved successfully.")
            .block(
                Block::default()
                    .title("saved")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Green)),
            );
        frame.render_widget(thanks, area);
    }
}

fn render_this_month(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let header_cells = THIS_MONTH_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            Cell::from(this_month_header_label(state, index, label)).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        });
    let header = Row::new(header_cells);

    let rows = view_data.clients.iter().enumerate().map(|(row_index, client)| {
        let difference = client.difference();
        let comment_text = if view_data.comment_editing && row_index == view_data.selected_row {
            format!("{}▏", client.comment)
        } else {
            client.comment.clone()
        };
        let texts = [
            client.name.clone(),
            format_amount(client.forecast),
            format_amount(client.actual),
            format_amount(difference),
            comment_text,
        ];
        let cells = texts
            .into_iter()
            .enumerate()
            .map(|(col_index, text)| {
                let mut style = Style::default();
                if col_index == 3 {
                    style = style.fg(if difference >= 0.0 {
                        Color::Green
                    } else {
                        Color::Red
                    });
                }
                style = apply_cursor_style(style, view_data, row_index, col_index);
                if view_data.comment_editing
                    && row_index == view_data.selected_row
                    && col_index == COMMENT_COLUMN
                {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(text).style(style)
            })
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let widths = vec![Constraint::Min(10); THIS_MONTH_COLUMNS.len()];
    let title = format!(
        "clients r:{} | viewing {}",
        view_data.clients.len(),
        state.selected_month().unwrap_or("-"),
    );
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_next_months(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let mut labels = vec!["client".to_owned()];
    for month in &view_data.forward_months {
        labels.push(format!("forecast {month}"));
    }
    let header = Row::new(labels.into_iter().map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = view_data.clients.iter().enumerate().map(|(row_index, client)| {
        let mut cells = Vec::with_capacity(1 + FORWARD_MONTHS);
        let name_style = apply_cursor_style(Style::default(), view_data, row_index, 0);
        cells.push(Cell::from(client.name.clone()).style(name_style));

        for (offset, month) in view_data.forward_months.iter().enumerate() {
            let col_index = offset + 1;
            let editing_here = view_data
                .forecast_editor
                .editing_cell()
                .is_some_and(|(id, editing_month)| {
                    id == client.id && editing_month == month.as_str()
                });
            if editing_here {
                let buffer = view_data.forecast_editor.buffer().unwrap_or_default();
                cells.push(Cell::from(format!("{buffer}▏")).style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let value = displayed_value(client, month, offset);
            let mut style = Style::default();
            if client.future_forecast.contains_key(month) {
                style = style.fg(Color::Cyan);
            }
            style = apply_cursor_style(style, view_data, row_index, col_index);
            cells.push(Cell::from(format_amount(value)).style(style));
        }
        Row::new(cells)
    });

    let widths = vec![Constraint::Min(12); 1 + FORWARD_MONTHS];
    let mut title = format!("forecast next 3 months r:{}", view_data.clients.len());
    if state.unsaved_forecasts {
        title.push_str(" | unsaved");
    }
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn apply_cursor_style(
    mut style: Style,
    view_data: &ViewData,
    row_index: usize,
    col_index: usize,
) -> Style {
    if row_index == view_data.selected_row {
        style = style.bg(Color::DarkGray);
    }
    if row_index == view_data.selected_row && col_index == view_data.selected_col {
        style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
    }
    style
}

fn this_month_header_label(state: &AppState, column: usize, label: &str) -> String {
    let Some(spec) = state.sort else {
        return label.to_owned();
    };
    if sort_key_for_column(column) != Some(spec.key) {
        return label.to_owned();
    }
    let marker = match spec.direction {
        SortDirection::Asc => SORT_MARK_ASC,
        SortDirection::Desc => SORT_MARK_DESC,
    };
    format!("{label} {marker}")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let mode = if view_data.comment_editing || view_data.forecast_editor.is_editing() {
        "EDIT"
    } else {
        "NAV"
    };
    let save_hint = match state.active_tab {
        TabKind::ThisMonth => "w save comments",
        TabKind::NextThreeMonths => {
            if state.unsaved_forecasts {
                "w commit all"
            } else {
                "w commit"
            }
        }
    };
    let default = format!(
        "j/k/h/l move | tab/f/b tabs | s sort | [/] month | e edit | {save_hint} | ctrl+q quit"
    );
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

/// Dollar rendering with thousands separators, matching the reference
/// dashboard's locale formatting for whole amounts.
fn format_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let absolute = value.abs();
    let whole = absolute.trunc() as u64;
    let grouped = group_thousands(whole);
    let fraction = absolute.fract();
    if fraction < 1e-9 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{:02}", (fraction * 100.0).round() as u64)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
