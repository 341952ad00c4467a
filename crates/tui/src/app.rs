use std::{io, time::Duration};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamenight_core::{
    catalog::{Catalog, FieldValue},
    config::AppConfig,
    library::{self, LibraryStore},
    models::{PreferenceSet, Suggestion},
    recommend::{recommend_today, RecommendError, RecommendRequest},
    tsv,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use tracing::{error, info};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_INPUT_LEN: usize = 128;

const COLUMNS: [&str; 6] = [
    "Name",
    "Min Players",
    "Max Players",
    "Duration (min)",
    "Last Played",
    "Times Played",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    AddForm,
    EditCell,
    RecommendForm,
    PromptImport,
    PromptExport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct TextInput {
    value: String,
}

impl TextInput {
    fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
        }
    }

    fn insert(&mut self, ch: char) {
        if self.value.len() >= MAX_INPUT_LEN {
            return;
        }
        if !ch.is_control() {
            self.value.push(ch);
        }
    }

    fn backspace(&mut self) {
        self.value.pop();
    }

    fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Field-by-field entry of a new game.
struct AddForm {
    inputs: [TextInput; 6],
    focus: usize,
}

impl AddForm {
    fn new() -> Self {
        Self {
            inputs: std::array::from_fn(|_| TextInput::new("")),
            focus: 0,
        }
    }

    fn focused(&mut self) -> &mut TextInput {
        &mut self.inputs[self.focus]
    }

    fn next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    fn prev(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }
}

/// Single-cell edit of the record under the cursor.
struct CellEdit {
    position: usize,
    column: usize,
    input: TextInput,
}

/// Inputs of the recommendation request.
struct RecommendForm {
    players: TextInput,
    minutes: TextInput,
    count: TextInput,
    favor_stale: bool,
    favor_underplayed: bool,
    focus: usize,
}

impl RecommendForm {
    const FIELDS: usize = 5;

    fn new(default_count: usize) -> Self {
        Self {
            players: TextInput::new("2"),
            minutes: TextInput::new("60"),
            count: TextInput::new(default_count.to_string()),
            favor_stale: false,
            favor_underplayed: false,
            focus: 0,
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            0 => Some(&mut self.players),
            1 => Some(&mut self.minutes),
            2 => Some(&mut self.count),
            _ => None,
        }
    }

    fn toggle_focused(&mut self) {
        match self.focus {
            3 => self.favor_stale = !self.favor_stale,
            4 => self.favor_underplayed = !self.favor_underplayed,
            _ => {}
        }
    }

    fn next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS;
    }

    fn prev(&mut self) {
        self.focus = (self.focus + Self::FIELDS - 1) % Self::FIELDS;
    }
}

pub struct GamenightApp {
    config: AppConfig,
    store: LibraryStore,
    catalog: Catalog,
    mode: Mode,
    cursor: usize,
    column: usize,
    table_state: TableState,
    status: String,
    status_kind: StatusKind,
    dirty: bool,
    should_quit: bool,
    add_form: Option<AddForm>,
    cell_edit: Option<CellEdit>,
    recommend_form: Option<RecommendForm>,
    path_prompt: Option<TextInput>,
    suggestions: Vec<Suggestion>,
}

impl GamenightApp {
    pub fn new(config: AppConfig, store: LibraryStore, catalog: Catalog) -> Self {
        let status = format!(
            "Loaded {} games from {}",
            catalog.len(),
            store.path().display()
        );
        Self {
            config,
            store,
            catalog,
            mode: Mode::Browse,
            cursor: 0,
            column: 0,
            table_state: TableState::default(),
            status,
            status_kind: StatusKind::Info,
            dirty: false,
            should_quit: false,
            add_form: None,
            cell_edit: None,
            recommend_form: None,
            path_prompt: None,
            suggestions: Vec::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                return Ok(());
            }
            if event::poll(TICK_RATE).context("failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                    if key.kind != KeyEventKind::Release {
                        self.handle_key(key);
                    }
                }
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_kind = StatusKind::Info;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.status = message;
        self.status_kind = StatusKind::Error;
    }

    fn clamp_cursor(&mut self) {
        if self.catalog.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.catalog.len() {
            self.cursor = self.catalog.len() - 1;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::AddForm => self.handle_add_key(key),
            Mode::EditCell => self.handle_edit_key(key),
            Mode::RecommendForm => self.handle_recommend_key(key),
            Mode::PromptImport | Mode::PromptExport => self.handle_prompt_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.catalog.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.column = self.column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.column + 1 < COLUMNS.len() {
                    self.column += 1;
                }
            }
            KeyCode::Char('a') => {
                self.add_form = Some(AddForm::new());
                self.mode = Mode::AddForm;
            }
            KeyCode::Enter | KeyCode::Char('e') => self.begin_cell_edit(),
            KeyCode::Char('d') => self.delete_under_cursor(),
            KeyCode::Char('r') => {
                self.recommend_form = Some(RecommendForm::new(self.config.default_suggestions));
                self.mode = Mode::RecommendForm;
            }
            KeyCode::Char('i') => {
                self.path_prompt = Some(TextInput::new(""));
                self.mode = Mode::PromptImport;
            }
            KeyCode::Char('x') => {
                self.path_prompt = Some(TextInput::new(""));
                self.mode = Mode::PromptExport;
            }
            KeyCode::Char('s') => self.save_library(),
            _ => {}
        }
    }

    fn begin_cell_edit(&mut self) {
        let Some(record) = self.catalog.get(self.cursor) else {
            self.set_error("Nothing to edit; add a game first");
            return;
        };
        let current = match self.column {
            0 => record.name.clone(),
            1 => record.min_players.to_string(),
            2 => record.max_players.to_string(),
            3 => record.max_duration.to_string(),
            4 => record.last_played.format(tsv::DATE_FORMAT).to_string(),
            _ => record.times_played.to_string(),
        };
        self.cell_edit = Some(CellEdit {
            position: self.cursor,
            column: self.column,
            input: TextInput::new(current),
        });
        self.mode = Mode::EditCell;
    }

    fn delete_under_cursor(&mut self) {
        if self.catalog.is_empty() {
            self.set_error("Nothing to delete");
            return;
        }
        match self.catalog.delete(self.cursor) {
            Ok(removed) => {
                self.dirty = true;
                self.clamp_cursor();
                self.set_status(format!("Deleted {}", removed.name));
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn save_library(&mut self) {
        match self.store.save(&self.catalog) {
            Ok(()) => {
                self.dirty = false;
                self.set_status(format!("Saved library to {}", self.store.path().display()));
            }
            Err(err) => self.set_error(format!("Save failed: {err:#}")),
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent) {
        let Some(form) = self.add_form.as_mut() else {
            self.mode = Mode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.add_form = None;
                self.mode = Mode::Browse;
                self.set_status("Add cancelled");
            }
            KeyCode::Tab | KeyCode::Down => form.next(),
            KeyCode::BackTab | KeyCode::Up => form.prev(),
            KeyCode::Backspace => form.focused().backspace(),
            KeyCode::Char(ch) => form.focused().insert(ch),
            KeyCode::Enter => {
                if form.focus + 1 < form.inputs.len() {
                    form.next();
                } else {
                    self.submit_add();
                }
            }
            _ => {}
        }
    }

    fn submit_add(&mut self) {
        let Some(form) = self.add_form.as_ref() else {
            return;
        };
        let values: Vec<String> = form
            .inputs
            .iter()
            .map(|input| input.trimmed().to_string())
            .collect();
        // Reuse the import row parser so the form and file formats agree.
        let row = values.join("\t");
        let document = format!("{}\n{row}\n", tsv::HEADER);
        let record = match tsv::parse_catalog(&document) {
            Ok(mut records) if records.len() == 1 => records.remove(0),
            Ok(_) => {
                self.set_error("Form produced no record");
                return;
            }
            Err(err) => {
                self.set_error(err.to_string());
                return;
            }
        };
        match self.catalog.add(record) {
            Ok(()) => {
                self.dirty = true;
                self.cursor = self.catalog.len() - 1;
                self.add_form = None;
                self.mode = Mode::Browse;
                self.set_status(format!("Added {}", values[0]));
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(edit) = self.cell_edit.as_mut() else {
            self.mode = Mode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.cell_edit = None;
                self.mode = Mode::Browse;
                self.set_status("Edit cancelled");
            }
            KeyCode::Backspace => edit.input.backspace(),
            KeyCode::Char(ch) => edit.input.insert(ch),
            KeyCode::Enter => self.submit_cell_edit(),
            _ => {}
        }
    }

    fn submit_cell_edit(&mut self) {
        let Some(edit) = self.cell_edit.take() else {
            return;
        };
        self.mode = Mode::Browse;
        let value = match parse_field_value(edit.column, edit.input.trimmed()) {
            Ok(value) => value,
            Err(message) => {
                self.set_error(message);
                return;
            }
        };
        match self.catalog.edit(edit.position, value) {
            Ok(()) => {
                self.dirty = true;
                self.set_status(format!(
                    "Updated {} of row {}",
                    COLUMNS[edit.column],
                    edit.position + 1
                ));
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn handle_recommend_key(&mut self, key: KeyEvent) {
        let Some(form) = self.recommend_form.as_mut() else {
            self.mode = Mode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.recommend_form = None;
                self.mode = Mode::Browse;
            }
            KeyCode::Tab | KeyCode::Down => form.next(),
            KeyCode::BackTab | KeyCode::Up => form.prev(),
            KeyCode::Char(' ') => form.toggle_focused(),
            KeyCode::Backspace => {
                if let Some(input) = form.focused_input() {
                    input.backspace();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(input) = form.focused_input() {
                    input.insert(ch);
                }
            }
            KeyCode::Enter => self.submit_recommend(),
            _ => {}
        }
    }

    fn submit_recommend(&mut self) {
        let Some(form) = self.recommend_form.as_ref() else {
            return;
        };
        let player_count: u32 = match form.players.trimmed().parse() {
            Ok(value) if value > 0 => value,
            _ => {
                self.set_error("Number of players must be a positive number");
                return;
            }
        };
        let available_minutes: u32 = match form.minutes.trimmed().parse() {
            Ok(value) => value,
            Err(_) => {
                self.set_error("Available time must be a number of minutes");
                return;
            }
        };
        let requested_count: usize = match form.count.trimmed().parse() {
            Ok(value) if value > 0 => value,
            _ => {
                self.set_error("Suggestion count must be a positive number");
                return;
            }
        };
        let request = RecommendRequest {
            player_count,
            available_minutes,
            preferences: PreferenceSet {
                favor_stale: form.favor_stale,
                favor_underplayed: form.favor_underplayed,
            },
            requested_count: requested_count.min(self.config.max_suggestions),
        };

        let mut rng = rand::rng();
        match recommend_today(self.catalog.records(), &request, &mut rng) {
            Ok(suggestions) => {
                info!(count = suggestions.len(), "recommendation drawn");
                self.set_status(format!("Drew {} suggestion(s)", suggestions.len()));
                self.suggestions = suggestions;
                self.recommend_form = None;
                self.mode = Mode::Browse;
            }
            Err(RecommendError::NoMatch) => {
                // Expected outcome, keep the form open for adjustment.
                self.suggestions.clear();
                self.set_error("No games match your parameters");
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(input) = self.path_prompt.as_mut() else {
            self.mode = Mode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.path_prompt = None;
                self.mode = Mode::Browse;
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Char(ch) => input.insert(ch),
            KeyCode::Enter => {
                let path = input.trimmed().to_string();
                let importing = self.mode == Mode::PromptImport;
                self.path_prompt = None;
                self.mode = Mode::Browse;
                if path.is_empty() {
                    self.set_error("No path given");
                } else if importing {
                    self.import_from(&path);
                } else {
                    self.export_to(&path);
                }
            }
            _ => {}
        }
    }

    fn import_from(&mut self, path: &str) {
        let text = match library::read_import(path) {
            Ok(text) => text,
            Err(err) => {
                self.set_error(format!("Import failed: {err:#}"));
                return;
            }
        };
        match self.catalog.import_bulk(&text) {
            Ok(added) => {
                self.dirty = true;
                self.set_status(format!("Imported {added} game(s) from {path}"));
            }
            Err(err) => self.set_error(format!("Import failed: {err}")),
        }
    }

    fn export_to(&mut self, path: &str) {
        match library::write_export(path, self.catalog.export_snapshot()) {
            Ok(()) => self.set_status(format!("Exported {} game(s) to {path}", self.catalog.len())),
            Err(err) => self.set_error(format!("Export failed: {err:#}")),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[0]);

        self.render_catalog(frame, body[0]);
        self.render_side_pane(frame, body[1]);
        self.render_status(frame, chunks[1]);

        match self.mode {
            Mode::AddForm => self.render_add_form(frame),
            Mode::EditCell => self.render_cell_edit(frame),
            Mode::RecommendForm => self.render_recommend_form(frame),
            Mode::PromptImport => self.render_path_prompt(frame, "Import TSV from path"),
            Mode::PromptExport => self.render_path_prompt(frame, "Export TSV to path"),
            Mode::Browse => {}
        }
    }

    fn render_catalog(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(COLUMNS.iter().enumerate().map(|(idx, title)| {
            let style = if idx == self.column {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Cell::from(*title).style(style)
        }));

        let rows = self.catalog.records().iter().map(|record| {
            Row::new(vec![
                Cell::from(record.name.clone()),
                Cell::from(record.min_players.to_string()),
                Cell::from(record.max_players.to_string()),
                Cell::from(record.max_duration.to_string()),
                Cell::from(record.last_played.format(tsv::DATE_FORMAT).to_string()),
                Cell::from(record.times_played.to_string()),
            ])
        });

        let title = if self.dirty {
            "Games (unsaved changes)"
        } else {
            "Games"
        };
        let table = Table::new(
            rows,
            [
                Constraint::Min(18),
                Constraint::Length(11),
                Constraint::Length(11),
                Constraint::Length(14),
                Constraint::Length(12),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        self.clamp_cursor();
        if self.catalog.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_side_pane(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(9)])
            .split(area);

        let suggestion_lines: Vec<Line> = if self.suggestions.is_empty() {
            vec![Line::from(Span::styled(
                "Press r to get suggestions",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.suggestions
                .iter()
                .map(|suggestion| {
                    Line::from(vec![
                        Span::styled(
                            suggestion.name.clone(),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(format!("  ~{} min", suggestion.max_duration)),
                    ])
                })
                .collect()
        };
        let suggestions = Paragraph::new(suggestion_lines)
            .block(Block::default().borders(Borders::ALL).title("Suggested Games"));
        frame.render_widget(suggestions, chunks[0]);

        let help_lines = vec![
            Line::from("a add   e/Enter edit cell   d delete"),
            Line::from("arrows/hjkl move   r recommend"),
            Line::from("i import   x export   s save"),
            Line::from("q quit"),
        ];
        let help = Paragraph::new(help_lines)
            .block(Block::default().borders(Borders::ALL).title("Keys"));
        frame.render_widget(help, chunks[1]);
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect) {
        let color = match self.status_kind {
            StatusKind::Info => Color::White,
            StatusKind::Error => Color::Red,
        };
        let status = Paragraph::new(Line::from(Span::styled(
            self.status.clone(),
            Style::default().fg(color),
        )))
        .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, area);
    }

    fn render_add_form(&mut self, frame: &mut Frame) {
        let Some(form) = self.add_form.as_ref() else {
            return;
        };
        let lines: Vec<Line> = COLUMNS
            .iter()
            .zip(form.inputs.iter())
            .enumerate()
            .map(|(idx, (label, input))| {
                let marker = if idx == form.focus { "▶ " } else { "  " };
                let style = if idx == form.focus {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!("{marker}{label}: {}", input.value),
                    style,
                ))
            })
            .collect();
        self.render_modal(frame, "Add Game (Enter to confirm, Esc to cancel)", lines, 46);
    }

    fn render_cell_edit(&mut self, frame: &mut Frame) {
        let Some(edit) = self.cell_edit.as_ref() else {
            return;
        };
        let lines = vec![Line::from(format!(
            "{}: {}",
            COLUMNS[edit.column], edit.input.value
        ))];
        self.render_modal(frame, "Edit Cell (Enter to apply, Esc to cancel)", lines, 46);
    }

    fn render_recommend_form(&mut self, frame: &mut Frame) {
        let Some(form) = self.recommend_form.as_ref() else {
            return;
        };
        let toggle = |on: bool| if on { "[x]" } else { "[ ]" };
        let rows = [
            format!("Number of Players: {}", form.players.value),
            format!("Available Time (min): {}", form.minutes.value),
            format!("How many suggestions: {}", form.count.value),
            format!(
                "{} Pick games I haven't played in a while",
                toggle(form.favor_stale)
            ),
            format!(
                "{} Pick games I haven't played much",
                toggle(form.favor_underplayed)
            ),
        ];
        let lines: Vec<Line> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                let marker = if idx == form.focus { "▶ " } else { "  " };
                let style = if idx == form.focus {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!("{marker}{text}"), style))
            })
            .collect();
        self.render_modal(
            frame,
            "Recommend Games (Space toggles, Enter draws)",
            lines,
            52,
        );
    }

    fn render_path_prompt(&mut self, frame: &mut Frame, title: &str) {
        let Some(input) = self.path_prompt.as_ref() else {
            return;
        };
        let lines = vec![Line::from(input.value.clone())];
        self.render_modal(frame, title, lines, 60);
    }

    fn render_modal(&self, frame: &mut Frame, title: &str, lines: Vec<Line>, width: u16) {
        let area = frame.size();
        let height = (lines.len() as u16).saturating_add(2).min(area.height);
        let modal_area = centered_rect(width.min(area.width), height, area);
        frame.render_widget(Clear, modal_area);
        let modal = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Left);
        frame.render_widget(modal, modal_area);
    }
}

fn parse_field_value(column: usize, raw: &str) -> Result<FieldValue, String> {
    match column {
        0 => {
            if raw.is_empty() {
                Err("Name must not be empty".to_string())
            } else {
                Ok(FieldValue::Name(raw.to_string()))
            }
        }
        1 => parse_u32(raw, "min players").map(FieldValue::MinPlayers),
        2 => parse_u32(raw, "max players").map(FieldValue::MaxPlayers),
        3 => parse_u32(raw, "duration").map(FieldValue::MaxDuration),
        4 => NaiveDate::parse_from_str(raw, tsv::DATE_FORMAT)
            .map(FieldValue::LastPlayed)
            .map_err(|_| format!("Invalid date '{raw}', expected YYYY-MM-DD")),
        _ => parse_u32(raw, "times played").map(FieldValue::TimesPlayed),
    }
}

fn parse_u32(raw: &str, what: &str) -> Result<u32, String> {
    raw.parse()
        .map_err(|_| format!("Invalid {what} '{raw}', expected a non-negative number"))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parsing_matches_columns() {
        assert_eq!(
            parse_field_value(1, "3"),
            Ok(FieldValue::MinPlayers(3))
        );
        assert_eq!(
            parse_field_value(4, "2024-05-01"),
            Ok(FieldValue::LastPlayed(
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
            ))
        );
        assert!(parse_field_value(0, "").is_err());
        assert!(parse_field_value(2, "four").is_err());
        assert!(parse_field_value(4, "05/01/2024").is_err());
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(40, 10, area);
        assert!(rect.x + rect.width <= 80);
        assert!(rect.y + rect.height <= 24);

        let tiny = Rect::new(0, 0, 10, 4);
        let clamped = centered_rect(40, 10, tiny);
        assert!(clamped.width <= 10 && clamped.height <= 4);
    }
}
