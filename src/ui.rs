use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use once_cell::unsync::OnceCell;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Cell, List, ListItem, ListState, Padding, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::{Frame, Terminal};
use unicode_width::UnicodeWidthStr;

use crate::catalog::Catalog;
use crate::data::{self, CatalogSource};
use crate::download::{self, Downloader};
use crate::player::Launcher;
use crate::selector::Selector;
use crate::table::{Column, LectureRow, RowAction};
use crate::viewer::{PaneState, ViewerKind, Viewers};

const COLOR_BG: Color = Color::Rgb(30, 30, 46);
const COLOR_PANEL_BG: Color = Color::Rgb(24, 24, 36);
const COLOR_PANEL_FOCUSED_BG: Color = Color::Rgb(49, 50, 68);
const COLOR_PANEL_SELECTED_BG: Color = Color::Rgb(69, 71, 90);
const COLOR_BORDER_IDLE: Color = Color::Rgb(49, 50, 68);
const COLOR_BORDER_FOCUSED: Color = Color::Rgb(137, 180, 250);
const COLOR_TEXT_PRIMARY: Color = Color::Rgb(205, 214, 244);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
const COLOR_SUCCESS: Color = Color::Rgb(166, 227, 161);
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Pane {
    Semesters,
    Subjects,
    Lectures,
    Viewer,
}

const PANE_ORDER: [Pane; 4] = [Pane::Semesters, Pane::Subjects, Pane::Lectures, Pane::Viewer];

enum AsyncResponse {
    Catalog {
        catalog: Catalog,
    },
    Download {
        request: download::Request,
        result: Result<PathBuf>,
    },
}

struct Spinner {
    index: usize,
    last_tick: Instant,
}

impl Spinner {
    fn new() -> Self {
        Self {
            index: 0,
            last_tick: Instant::now(),
        }
    }

    fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.index % SPINNER_FRAMES.len()]
    }

    fn advance(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= Duration::from_millis(120) {
            self.index = (self.index + 1) % SPINNER_FRAMES.len();
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.index = 0;
        self.last_tick = Instant::now();
    }
}

#[derive(Clone)]
pub struct Options {
    pub status_message: String,
    pub catalog_source: Option<Arc<dyn CatalogSource + Send + Sync>>,
    pub downloader: Option<Downloader>,
    pub launcher: Arc<dyn Launcher + Send + Sync>,
    pub download_name: String,
}

pub struct Model {
    status_message: String,
    status_is_error: bool,
    catalog: OnceCell<Catalog>,
    catalog_source: Option<Arc<dyn CatalogSource + Send + Sync>>,
    catalog_loading: bool,
    selector: Selector,
    viewers: Viewers,
    focused_pane: Pane,
    semester_index: usize,
    subject_index: usize,
    row_index: usize,
    column: Column,
    downloader: Option<Downloader>,
    downloads_in_flight: usize,
    launcher: Arc<dyn Launcher + Send + Sync>,
    needs_redraw: bool,
    spinner: Spinner,
    response_tx: Sender<AsyncResponse>,
    response_rx: Receiver<AsyncResponse>,
}

impl Model {
    pub fn new(options: Options) -> Self {
        let (response_tx, response_rx) = unbounded();
        Self {
            status_message: options.status_message,
            status_is_error: false,
            catalog: OnceCell::new(),
            catalog_source: options.catalog_source,
            catalog_loading: false,
            selector: Selector::new(options.download_name),
            viewers: Viewers::default(),
            focused_pane: Pane::Semesters,
            semester_index: 0,
            subject_index: 0,
            row_index: 0,
            column: Column::Lecture,
            downloader: options.downloader,
            downloads_in_flight: 0,
            launcher: options.launcher,
            needs_redraw: true,
            spinner: Spinner::new(),
            response_tx,
            response_rx,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.queue_catalog_load();
        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(120);

        loop {
            if self.poll_async() {
                self.mark_dirty();
            }

            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(16));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key.code) {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(err) => {
                                self.set_error(format!("Error: {err}"));
                            }
                        }
                    }
                    Event::Resize(_, _) => self.mark_dirty(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                if self.is_loading() {
                    if self.spinner.advance() {
                        self.mark_dirty();
                    }
                } else {
                    self.spinner.reset();
                }
            }
        }

        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn is_loading(&self) -> bool {
        self.catalog_loading || self.downloads_in_flight > 0
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
        self.mark_dirty();
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
        self.mark_dirty();
    }

    /// Starts the one catalog fetch of the session on a background thread.
    fn queue_catalog_load(&mut self) {
        if self.catalog.get().is_some() || self.catalog_loading {
            return;
        }
        let Some(source) = self.catalog_source.clone() else {
            self.apply_catalog(Catalog::default());
            return;
        };
        self.catalog_loading = true;
        self.set_status(format!("Loading lectures from {}…", source.describe()));
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let catalog = data::load(source.as_ref());
            let _ = tx.send(AsyncResponse::Catalog { catalog });
        });
    }

    fn poll_async(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.response_rx.try_recv() {
            self.handle_async_response(message);
            changed = true;
        }
        changed
    }

    fn handle_async_response(&mut self, message: AsyncResponse) {
        match message {
            AsyncResponse::Catalog { catalog } => {
                self.catalog_loading = false;
                self.apply_catalog(catalog);
            }
            AsyncResponse::Download { request, result } => {
                self.downloads_in_flight = self.downloads_in_flight.saturating_sub(1);
                match result {
                    Ok(path) => {
                        let saved = format!("Saved {} to {}", request.file_name, path.display());
                        self.set_status(saved);
                    }
                    Err(err) => {
                        tracing::warn!(url = %request.url, "download failed: {err:#}");
                        self.set_error(format!("Download failed: {err}"));
                    }
                }
            }
        }
    }

    /// Single assignment point of the catalog.
    fn apply_catalog(&mut self, catalog: Catalog) {
        if self.catalog.set(catalog).is_err() {
            tracing::warn!("catalog already loaded; ignoring second result");
            return;
        }
        let Some(catalog) = self.catalog.get() else {
            return;
        };
        self.selector.populate(catalog);
        self.semester_index = 0;
        let count = self.selector.semesters().len();
        if count == 0 {
            self.set_status("No semesters available.");
        } else {
            self.set_status(format!(
                "Choose your semester ({count} available). Enter selects, q quits."
            ));
        }
    }

    fn visible_panes(&self) -> Vec<Pane> {
        PANE_ORDER
            .iter()
            .copied()
            .filter(|pane| self.pane_visible(*pane))
            .collect()
    }

    fn pane_visible(&self, pane: Pane) -> bool {
        match pane {
            Pane::Semesters => true,
            Pane::Subjects => self.selector.subjects_revealed(),
            Pane::Lectures => self.selector.lectures_revealed(),
            Pane::Viewer => self.viewers.active().is_some(),
        }
    }

    fn shift_focus(&mut self, delta: isize) {
        let panes = self.visible_panes();
        let Some(current) = panes.iter().position(|pane| *pane == self.focused_pane) else {
            self.focused_pane = Pane::Semesters;
            return;
        };
        let len = panes.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.focused_pane = panes[next];
    }

    fn ensure_focus_visible(&mut self) {
        if !self.pane_visible(self.focused_pane) {
            self.focused_pane = if self.pane_visible(Pane::Lectures) {
                Pane::Lectures
            } else {
                Pane::Semesters
            };
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (index, len) = match self.focused_pane {
            Pane::Semesters => (&mut self.semester_index, self.selector.semesters().len()),
            Pane::Subjects => (&mut self.subject_index, self.selector.subjects().len()),
            Pane::Lectures => (&mut self.row_index, self.selector.rows().len()),
            Pane::Viewer => return,
        };
        if len == 0 {
            *index = 0;
            return;
        }
        let max = len as isize - 1;
        *index = (*index as isize + delta).clamp(0, max) as usize;
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if let Some(kind) = self.viewers.active() {
                    self.close_viewer(kind);
                } else {
                    return Ok(true);
                }
            }
            KeyCode::Tab => self.shift_focus(1),
            KeyCode::BackTab => self.shift_focus(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::Char('G') | KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Char('h') | KeyCode::Left => {
                if self.focused_pane == Pane::Lectures && self.column != Column::Serial {
                    self.column = self.column.previous();
                } else {
                    self.shift_focus(-1);
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.focused_pane == Pane::Lectures && self.column != Column::Download {
                    self.column = self.column.next();
                } else {
                    self.shift_focus(1);
                }
            }
            KeyCode::Enter => self.commit_selection()?,
            KeyCode::Char('x') => {
                if let Some(kind) = self.viewers.active() {
                    self.close_viewer(kind);
                }
            }
            KeyCode::Char('p') if self.focused_pane == Pane::Lectures => {
                self.activate_cell(Column::Lecture)
            }
            KeyCode::Char('n') if self.focused_pane == Pane::Lectures => {
                self.activate_cell(Column::HandNotes)
            }
            KeyCode::Char('v') if self.focused_pane == Pane::Lectures => {
                self.activate_cell(Column::Video)
            }
            KeyCode::Char('r') if self.focused_pane == Pane::Lectures => {
                self.activate_cell(Column::Resources)
            }
            KeyCode::Char('d') => match self.focused_pane {
                Pane::Lectures => self.activate_cell(Column::Download),
                Pane::Viewer => self.download_from_document_pane(),
                _ => {}
            },
            KeyCode::Char('o') if self.focused_pane == Pane::Viewer => {
                self.open_viewer_externally()
            }
            _ => return Ok(false),
        }
        self.mark_dirty();
        Ok(false)
    }

    fn commit_selection(&mut self) -> Result<()> {
        match self.focused_pane {
            Pane::Semesters => {
                let Some(name) = self.selector.semesters().get(self.semester_index).cloned() else {
                    return Ok(());
                };
                let Some(catalog) = self.catalog.get() else {
                    return Ok(());
                };
                if self.selector.select_semester(catalog, &name) {
                    self.subject_index = 0;
                    self.focused_pane = Pane::Subjects;
                    self.set_status(format!("{name}: choose your subject."));
                }
            }
            Pane::Subjects => {
                let Some(name) = self.selector.subjects().get(self.subject_index).cloned() else {
                    return Ok(());
                };
                let Some(catalog) = self.catalog.get() else {
                    return Ok(());
                };
                if self.selector.select_subject(catalog, &name) {
                    self.row_index = 0;
                    self.column = Column::Lecture;
                    self.focused_pane = Pane::Lectures;
                    let count = self.selector.rows().len();
                    self.set_status(format!(
                        "{name}: {count} lecture(s). Enter opens the selected cell."
                    ));
                }
            }
            Pane::Lectures => self.activate_cell(self.column),
            Pane::Viewer => self.open_viewer_externally(),
        }
        Ok(())
    }

    fn selected_row(&self) -> Option<&LectureRow> {
        self.selector.rows().get(self.row_index)
    }

    fn activate_cell(&mut self, column: Column) {
        self.column = column;
        let Some(action) = self.selected_row().and_then(|row| row.action(column)) else {
            return;
        };
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: RowAction) {
        match action {
            RowAction::OpenDocument { source, download } => {
                if self.viewers.open_document(&source, &download) {
                    let name = self
                        .selected_row()
                        .map(|row| row.name.clone())
                        .unwrap_or_default();
                    self.set_status(format!(
                        "Viewing {name}. Enter opens it, d downloads, x closes."
                    ));
                }
            }
            RowAction::OpenVideo { source } => {
                if self.viewers.open_video(&source) {
                    self.set_status("Video ready. Enter plays it, x closes.");
                }
            }
            RowAction::OpenExternal { label, url } => {
                if url.is_empty() {
                    return;
                }
                match self.launcher.open_link(&url) {
                    Ok(()) => self.set_status(format!("Opened {label} in your browser.")),
                    Err(err) => {
                        tracing::warn!(%url, "failed to open link: {err:#}");
                        self.set_error(format!("Failed to open {label}: {err} (URL: {url})"));
                    }
                }
            }
            RowAction::Download { url, file_name } => {
                self.start_download(download::Request { url, file_name });
            }
        }

        if self.viewers.take_scroll_request().is_some() {
            self.focused_pane = Pane::Viewer;
        }
    }

    fn close_viewer(&mut self, kind: ViewerKind) {
        self.viewers.close(kind);
        self.ensure_focus_visible();
        self.set_status("Viewer closed.");
    }

    fn open_viewer_externally(&mut self) {
        let result = match (self.viewers.document(), self.viewers.video()) {
            (PaneState::Visible(source), _) => self.launcher.open_link(source),
            (_, PaneState::Visible(source)) => self.launcher.play_video(source),
            _ => return,
        };
        match result {
            Ok(()) => self.set_status("Opened outside the terminal."),
            Err(err) => {
                tracing::warn!("failed to open viewer source: {err:#}");
                self.set_error(format!("Failed to open: {err}"));
            }
        }
    }

    fn download_from_document_pane(&mut self) {
        if !self.viewers.document().is_visible() {
            return;
        }
        let Some(url) = self.viewers.download_target().map(str::to_string) else {
            return;
        };
        let file_name = self
            .selected_row()
            .map(|row| row.file_name.clone())
            .unwrap_or_else(|| crate::config::DEFAULT_DOWNLOAD_NAME.to_string());
        self.start_download(download::Request { url, file_name });
    }

    fn start_download(&mut self, request: download::Request) {
        if request.url.is_empty() {
            return;
        }
        let Some(downloader) = self.downloader.clone() else {
            self.set_error("Downloads are unavailable: no download directory configured.");
            return;
        };
        self.downloads_in_flight += 1;
        self.set_status(format!(
            "Downloading {} to {}…",
            request.file_name,
            downloader.dir().display()
        ));
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let result = downloader.fetch(&request);
            let _ = tx.send(AsyncResponse::Download { request, result });
        });
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let full = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(COLOR_BG)), full);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(full);

        let status_text = if self.is_loading() {
            format!("{} {}", self.spinner.frame(), self.status_message)
                .trim()
                .to_string()
        } else {
            self.status_message.clone()
        };
        let status_fg = if self.status_is_error {
            COLOR_ERROR
        } else {
            COLOR_TEXT_PRIMARY
        };
        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .fg(status_fg)
                .bg(COLOR_PANEL_FOCUSED_BG)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, layout[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
            .split(layout[1]);

        if self.selector.subjects_revealed() {
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(columns[0]);
            self.draw_semesters(frame, left[0]);
            self.draw_subjects(frame, left[1]);
        } else {
            self.draw_semesters(frame, columns[0]);
        }

        if self.viewers.active().is_some() {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(columns[1]);
            self.draw_lectures(frame, right[0]);
            self.draw_viewer(frame, right[1]);
        } else {
            self.draw_lectures(frame, columns[1]);
        }

        let footer = Paragraph::new(self.footer_text())
            .style(
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .bg(COLOR_PANEL_BG)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, layout[2]);
    }

    fn pane_block(&self, pane: Pane, title: String) -> Block<'static> {
        let focused = self.focused_pane == pane;
        let border_style = if focused {
            Style::default().fg(COLOR_BORDER_FOCUSED)
        } else {
            Style::default().fg(COLOR_BORDER_IDLE)
        };
        let title_style = if focused {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_SECONDARY)
        };
        Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(COLOR_PANEL_BG))
            .padding(Padding::horizontal(1))
    }

    fn draw_semesters(&self, frame: &mut Frame<'_>, area: Rect) {
        let active = self.selector.stage().semester();
        let empty_label = if self.catalog_loading {
            "Loading…"
        } else {
            "No semesters"
        };
        self.draw_option_list(
            frame,
            area,
            Pane::Semesters,
            "Semester",
            self.selector.semesters(),
            self.semester_index,
            active,
            empty_label,
        );
    }

    fn draw_subjects(&self, frame: &mut Frame<'_>, area: Rect) {
        let active = self.selector.stage().subject();
        self.draw_option_list(
            frame,
            area,
            Pane::Subjects,
            "Subject",
            self.selector.subjects(),
            self.subject_index,
            active,
            "No subjects",
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_option_list(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        pane: Pane,
        title: &str,
        options: &[String],
        selected: usize,
        active: Option<&str>,
        empty_label: &str,
    ) {
        let block = self.pane_block(pane, title.to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let focused = self.focused_pane == pane;

        if options.is_empty() {
            let placeholder = Paragraph::new(Span::styled(
                empty_label.to_string(),
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(placeholder, inner);
            return;
        }

        let items: Vec<ListItem> = options
            .iter()
            .map(|name| {
                let is_active = active == Some(name.as_str());
                let marker = if is_active { "●" } else { "○" };
                let mut style = Style::default().fg(if is_active {
                    COLOR_ACCENT
                } else {
                    COLOR_TEXT_PRIMARY
                });
                if is_active {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::from(Span::styled(format!("{marker} {name}"), style)))
            })
            .collect();

        let highlight = if focused {
            Style::default()
                .bg(COLOR_PANEL_SELECTED_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(COLOR_PANEL_FOCUSED_BG)
        };
        let list = List::new(items).highlight_style(highlight);
        let mut state = ListState::default();
        state.select(Some(selected.min(options.len() - 1)));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_lectures(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = match self.selector.rows_origin() {
            Some((semester, subject)) if self.selector.lectures_revealed() => {
                format!("Lectures · {semester} · {subject}")
            }
            _ => "Lectures".to_string(),
        };
        let block = self.pane_block(Pane::Lectures, title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.selector.lectures_revealed() {
            let hint = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Choose a semester, then a subject.",
                    Style::default().fg(COLOR_TEXT_SECONDARY),
                )),
                Line::from(Span::styled(
                    "j/k move · Enter select · Tab switch panes",
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::ITALIC),
                )),
            ]))
            .wrap(Wrap { trim: true });
            frame.render_widget(hint, inner);
            return;
        }

        let rows = self.selector.rows();
        if rows.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No lectures for this subject.",
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(empty, inner);
            return;
        }

        let focused = self.focused_pane == Pane::Lectures;
        let header = Row::new(Column::ALL.iter().map(|column| {
            Cell::from(Span::styled(
                column.title(),
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ))
        }))
        .bottom_margin(1);

        let table_rows: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let cells = Column::ALL.iter().map(|column| {
                    let mut style = Style::default().fg(cell_color(row, *column));
                    if focused && idx == self.row_index && *column == self.column {
                        style = style
                            .bg(COLOR_PANEL_SELECTED_BG)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    Cell::from(Span::styled(row.cell_text(*column).to_string(), style))
                });
                Row::new(cells)
            })
            .collect();

        let name_width = rows
            .iter()
            .map(|row| UnicodeWidthStr::width(row.name.as_str()))
            .max()
            .unwrap_or(0)
            .clamp(12, 48) as u16;
        let widths = [
            Constraint::Length(4),
            Constraint::Min(name_width),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(9),
        ];
        let table = Table::new(table_rows, widths)
            .header(header)
            .highlight_style(Style::default().bg(COLOR_PANEL_FOCUSED_BG));
        let mut state = TableState::default();
        state.select(Some(self.row_index.min(rows.len() - 1)));
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn draw_viewer(&self, frame: &mut Frame<'_>, area: Rect) {
        let (title, source, hints) = match (self.viewers.document(), self.viewers.video()) {
            (PaneState::Visible(source), _) => (
                "Document",
                source.as_str(),
                "Enter/o open in browser · d download · x close",
            ),
            (_, PaneState::Visible(source)) => {
                ("Video", source.as_str(), "Enter/o play · x close")
            }
            _ => return,
        };
        let block = self.pane_block(Pane::Viewer, title.to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label_style = Style::default()
            .fg(COLOR_TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(vec![
            Span::styled("Source   ", label_style),
            Span::styled(source.to_string(), Style::default().fg(COLOR_ACCENT)),
        ])];
        if self.viewers.document().is_visible() {
            if let Some(target) = self.viewers.download_target() {
                lines.push(Line::from(vec![
                    Span::styled("Download ", label_style),
                    Span::styled(target.to_string(), Style::default().fg(COLOR_SUCCESS)),
                ]));
            }
        }
        lines.push(Line::from(String::new()));
        lines.push(Line::from(Span::styled(
            hints,
            Style::default()
                .fg(COLOR_TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )));
        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn footer_text(&self) -> String {
        let mut parts: Vec<&str> = vec!["q quit", "Tab switch pane"];
        match self.focused_pane {
            Pane::Semesters => parts.push("Semesters: j/k move, Enter choose"),
            Pane::Subjects => parts.push("Subjects: j/k move, Enter show lectures"),
            Pane::Lectures => {
                parts.push("Lectures: j/k row, h/l column, Enter activate");
                parts.push("p pdf · n notes · v video · r resources · d download");
            }
            Pane::Viewer => parts.push("Viewer: Enter open · x/Esc close"),
        }
        if self.viewers.active().is_some() && self.focused_pane != Pane::Viewer {
            parts.push("x close viewer");
        }
        parts.join(" · ")
    }
}

fn cell_color(row: &LectureRow, column: Column) -> Color {
    match column {
        Column::Serial => COLOR_TEXT_SECONDARY,
        Column::Lecture => COLOR_TEXT_PRIMARY,
        _ if row.cell_text(column) == "-" => COLOR_BORDER_IDLE,
        Column::Video => COLOR_ERROR,
        Column::HandNotes => COLOR_SUCCESS,
        Column::Resources | Column::Download => COLOR_ACCENT,
    }
}

/// Renders the model once into any backend; used for snapshots in tests.
pub fn render_once<B: Backend>(model: &mut Model, terminal: &mut Terminal<B>) -> Result<()> {
    terminal.draw(|frame| model.draw(frame))?;
    Ok(())
}
