//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: `update`
//! folds events and API messages into state, `view` draws it. Work the
//! tables ask for is handed to the [`TaskSpawner`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::events::{Event, KeyBindings};
use crate::tasks::{ApiMessage, TaskSpawner};
use crate::ui::components::{centered_rect, TableAction, TableCommand};
use crate::ui::{render_hints, Demo, DemoPage, HelpAction, HelpView, PageSettings, Theme};

/// A one-line message in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// The main application struct that holds all state.
pub struct App {
    page: DemoPage,
    settings: PageSettings,
    bindings: KeyBindings,
    theme: &'static Theme,
    spawner: TaskSpawner,
    help: Option<HelpView>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    /// Create the application and mount the first demo.
    ///
    /// Must be called inside a tokio runtime: mounting spawns the list query.
    pub fn new(config: &Config, demo: Demo, spawner: TaskSpawner) -> Self {
        let settings = PageSettings {
            page_size: config.settings.page_size,
            fetch_policy: config.settings.fetch_policy,
        };
        let mut app = Self {
            page: DemoPage::new(demo, settings),
            settings,
            bindings: KeyBindings::new(config.settings.vim_mode),
            theme: Theme::by_name(&config.settings.theme),
            spawner,
            help: None,
            status: None,
            should_quit: false,
        };
        app.mount_page();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn page(&self) -> &DemoPage {
        &self.page
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_help_visible(&self) -> bool {
        self.help.is_some()
    }

    /// Show an error in the footer.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, "Application error");
        self.set_status(error.user_message(), true);
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    /// Switch to another demo. The old table is dropped along with any
    /// responses still in flight for it.
    pub fn switch_demo(&mut self, demo: Demo) {
        if demo == self.page.demo() {
            return;
        }
        info!(from = ?self.page.demo(), to = ?demo, "Switching demo");
        self.page = DemoPage::new(demo, self.settings);
        self.status = None;
        self.mount_page();
    }

    fn mount_page(&mut self) {
        let command = self.page.table_mut().mount();
        self.run(command);
    }

    /// Handle an application event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.page.table_mut().tick(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        if let Some(help) = &mut self.help {
            if help.handle_input(key) == Some(HelpAction::Close) {
                self.help = None;
            }
            return;
        }

        // Open dialogs own every key, including `q`.
        if !self.page.table().has_dialog() {
            match key.code {
                KeyCode::Char('q') => {
                    info!("Quit requested");
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.help = Some(HelpView::new(&self.bindings));
                    return;
                }
                KeyCode::Tab => {
                    self.switch_demo(self.page.demo().next());
                    return;
                }
                KeyCode::Char(c) => {
                    if let Some(demo) = c.to_digit(10).and_then(Demo::from_number) {
                        self.switch_demo(demo);
                        return;
                    }
                }
                _ => {}
            }
        }

        if let Some(action) = self.page.table_mut().handle_input(key, &self.bindings) {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: TableAction) {
        match action {
            TableAction::Command(command) => self.run(command),
            TableAction::RowAction(variables) => match self.page.handle_row_action(&variables) {
                Some(mutation) => {
                    let table = self.page.table();
                    self.spawner
                        .spawn_row_action(table.id(), mutation, table.list_request());
                }
                None => {
                    warn!(?variables, "Row action without an id");
                    self.set_status("This row cannot be deleted.", true);
                }
            },
        }
    }

    fn run(&mut self, command: TableCommand) {
        let table = self.page.table().id();
        debug!(%table, ?command, "Running table command");
        match command {
            TableCommand::FetchList { request, policy } => {
                self.spawner.spawn_fetch_list(table, request, policy);
            }
            TableCommand::AddRow { mutation, refetch } => {
                self.status = None;
                self.spawner.spawn_add_row(table, mutation, refetch);
            }
        }
    }

    /// Apply a message from a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        if message.table() != self.page.table().id() {
            debug!(table = %message.table(), "Discarding response for an unmounted table");
            return;
        }

        match message {
            ApiMessage::ListFetched { result, .. } => {
                self.page.table_mut().receive_list(result);
            }
            ApiMessage::AddRowCompleted { result, .. } => {
                self.page.table_mut().complete_add_row(result);
            }
            ApiMessage::RowActionCompleted { result, .. } => {
                self.page.complete_row_action();
                match result {
                    Ok(()) => self.set_status("Credential deleted.", false),
                    Err(message) => self.set_status(message, true),
                }
            }
        }
    }

    /// Draw the whole screen.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Length(2), // Demo title
                Constraint::Min(1),    // Table
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.page.demo().title(),
                self.theme.header(),
            ))),
            chunks[1],
        );
        self.page.table_mut().render(frame, chunks[2], self.theme);
        self.render_footer(frame, chunks[3]);

        if let Some(help) = &mut self.help {
            let width = 64.min(area.width);
            let height = 26.min(area.height);
            help.render(frame, centered_rect(width, height, area), self.theme);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Demo::ALL
            .iter()
            .enumerate()
            .map(|(i, demo)| Line::from(format!("{} {}", i + 1, demo.tab_label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.page.demo().index())
            .style(self.theme.muted())
            .highlight_style(self.theme.selected())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.muted())
                    .title(format!(" gqltable · {} ", self.spawner.client().transport_name())),
            );
        frame.render_widget(tabs, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        match &self.status {
            Some(status) => {
                let style = if status.is_error {
                    self.theme.error()
                } else {
                    self.theme.text().fg(self.theme.success)
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(status.text.as_str(), style)),
                    area,
                );
            }
            None => render_hints(frame, area, self.bindings.table_hints(), self.theme),
        }
    }
}
