//! The paginated data table.
//!
//! A `DataTable` owns its page and selection state, the optional add-row and
//! row-action controls, and the result of its list query. It never talks to
//! the network: it returns [`TableCommand`]s for the owner to run and accepts
//! the results back through [`DataTable::receive_list`] and friends.

use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row as TuiRow, Table, TableState, Wrap},
    Frame,
};
use tracing::{debug, warn};

use crate::api::{Document, OperationRequest, QueryResponse, Variables};
use crate::cache::{CacheStatus, FetchPolicy};
use crate::events::{KeyBindings, TableKey};
use crate::table::{Row, RowVariables, Snapshot, TableData, TableMapper};
use crate::ui::components::add_row::{AddRow, AddRowConfig};
use crate::ui::components::loading::LoadingIndicator;
use crate::ui::components::pagination::{PageChange, Pagination, DEFAULT_PAGE_SIZE};
use crate::ui::components::row_action::{RowAction, RowActionConfig};
use crate::ui::theme::Theme;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one mounted table instance.
///
/// Responses are tagged with the id of the table that asked for them, so a
/// table built later never applies an earlier table's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(u64);

impl TableId {
    fn next() -> Self {
        Self(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

/// Static configuration of a table.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub list_query: Document,
    pub query_variables: Variables,
    /// Shown verbatim instead of the table when the body is empty.
    pub empty_text: String,
    pub page_size: usize,
    pub fetch_policy: FetchPolicy,
}

impl TableConfig {
    pub fn new(list_query: Document) -> Self {
        Self {
            list_query,
            query_variables: Variables::new(),
            empty_text: "No data".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_policy: FetchPolicy::default(),
        }
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.query_variables = variables;
        self
    }

    pub fn with_empty_text(mut self, empty_text: impl Into<String>) -> Self {
        self.empty_text = empty_text.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_fetch_policy(mut self, fetch_policy: FetchPolicy) -> Self {
        self.fetch_policy = fetch_policy;
        self
    }

    /// The list query with its variables.
    pub fn list_request(&self) -> OperationRequest {
        OperationRequest::new(self.list_query.clone(), self.query_variables.clone())
    }
}

/// State of the list query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Loading,
    Ready { data: TableData, status: CacheStatus },
    Failed(String),
}

/// Work the owner must carry out for the table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    FetchList {
        request: OperationRequest,
        policy: FetchPolicy,
    },
    /// Run `mutation`, then re-fetch `refetch` on success.
    AddRow {
        mutation: OperationRequest,
        refetch: OperationRequest,
    },
}

/// Result of a key press in the table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    Command(TableCommand),
    /// A row action fired with the row's bound variables.
    RowAction(RowVariables),
}

pub struct DataTable {
    id: TableId,
    config: TableConfig,
    mapper: Box<dyn TableMapper>,
    query: QueryState,
    /// A re-fetch is in flight while stale data stays on screen.
    refreshing: bool,
    current_page: usize,
    table_state: TableState,
    add_row: Option<AddRow>,
    row_action: Option<RowAction>,
    spinner: LoadingIndicator,
}

impl std::fmt::Debug for DataTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("query", &self.query)
            .field("current_page", &self.current_page)
            .finish_non_exhaustive()
    }
}

impl DataTable {
    pub fn new(config: TableConfig, mapper: impl TableMapper + 'static) -> Self {
        Self {
            id: TableId::next(),
            config,
            mapper: Box::new(mapper),
            query: QueryState::Loading,
            refreshing: false,
            current_page: 1,
            table_state: TableState::default().with_selected(Some(0)),
            add_row: None,
            row_action: None,
            spinner: LoadingIndicator::with_message("Loading..."),
        }
    }

    pub fn with_add_row(mut self, config: AddRowConfig) -> Self {
        self.add_row = Some(AddRow::new(config));
        self
    }

    pub fn with_row_action(mut self, config: RowActionConfig) -> Self {
        self.row_action = Some(RowAction::new(config));
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn add_row(&self) -> Option<&AddRow> {
        self.add_row.as_ref()
    }

    pub fn row_action(&self) -> Option<&RowAction> {
        self.row_action.as_ref()
    }

    pub fn list_request(&self) -> OperationRequest {
        self.config.list_request()
    }

    /// Start the table's lifecycle: issue the list query.
    pub fn mount(&mut self) -> TableCommand {
        debug!(table = %self.id, "Mounting table");
        self.query = QueryState::Loading;
        self.refreshing = false;
        TableCommand::FetchList {
            request: self.list_request(),
            policy: self.config.fetch_policy,
        }
    }

    /// Accept a list query result.
    pub fn receive_list(&mut self, result: Result<QueryResponse, String>) {
        self.refreshing = false;
        match result {
            Ok(response) => {
                let data = self.mapper.map(Some(&response.data));
                debug!(
                    table = %self.id,
                    rows = data.body.len(),
                    status = response.status.text(),
                    "List received"
                );
                self.query = QueryState::Ready {
                    data,
                    status: response.status,
                };
                self.current_page = self.pagination().effective_page();
                self.clamp_selection();
            }
            Err(message) => {
                warn!(table = %self.id, error = %message, "List query failed");
                self.query = QueryState::Failed(message);
            }
        }
    }

    /// Report the outcome of an add-row mutation.
    ///
    /// On success the owner is already re-fetching the list.
    pub fn complete_add_row(&mut self, result: Result<(), String>) {
        let succeeded = result.is_ok();
        if let Some(add_row) = &mut self.add_row {
            add_row.complete(result);
        }
        if succeeded {
            self.begin_refetch();
        }
    }

    /// Flag whether the owner's row action request is in flight.
    pub fn set_row_action_loading(&mut self, loading: bool) {
        if let Some(row_action) = &mut self.row_action {
            row_action.set_loading(loading);
        }
    }

    /// Mark that the owner issued a re-fetch on the table's behalf.
    pub fn begin_refetch(&mut self) {
        match self.query {
            QueryState::Ready { .. } => self.refreshing = true,
            QueryState::Loading | QueryState::Failed(_) => self.query = QueryState::Loading,
        }
    }

    /// Whether a dialog owned by the table is open.
    pub fn has_dialog(&self) -> bool {
        self.add_row.as_ref().is_some_and(AddRow::has_dialog)
            || self.row_action.as_ref().is_some_and(RowAction::is_confirming)
    }

    pub fn tick(&mut self) {
        self.spinner.tick();
        if let Some(add_row) = &mut self.add_row {
            add_row.tick();
        }
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[Row] {
        match &self.query {
            QueryState::Ready { data, .. } => &data.body[self.pagination().slice_range()],
            QueryState::Loading | QueryState::Failed(_) => &[],
        }
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.table_state
            .selected()
            .and_then(|index| self.visible_rows().get(index))
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.config.page_size, self.total())
    }

    fn total(&self) -> usize {
        match &self.query {
            QueryState::Ready { data, .. } => data.body.len(),
            QueryState::Loading | QueryState::Failed(_) => 0,
        }
    }

    fn snapshot(&self) -> Snapshot {
        match &self.query {
            QueryState::Ready { data, .. } => data.validation.clone(),
            QueryState::Loading | QueryState::Failed(_) => Snapshot::new(),
        }
    }

    fn change_page(&mut self, change: Option<PageChange>) {
        if let Some(PageChange(page)) = change {
            debug!(table = %self.id, page, "Page changed");
            self.current_page = page;
            self.table_state.select(Some(0));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state
            .select(Some(selected.min(len.saturating_sub(1))));
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (selected + 1) % len
        } else {
            selected.checked_sub(1).unwrap_or(len - 1)
        };
        self.table_state.select(Some(next));
    }

    fn forward_row_action(&mut self, variables: RowVariables) -> TableAction {
        if let Some(add_row) = &mut self.add_row {
            add_row.clear_error();
        }
        debug!(table = %self.id, ?variables, "Forwarding row action");
        TableAction::RowAction(variables)
    }

    fn add_row_command(&self, mutation: OperationRequest) -> TableAction {
        TableAction::Command(TableCommand::AddRow {
            mutation,
            refetch: self.list_request(),
        })
    }

    /// The add-row control needs loaded data to validate against and is
    /// blocked while a row action runs.
    fn accepts_add_row(&self) -> bool {
        matches!(self.query, QueryState::Ready { .. })
            && !self.row_action.as_ref().is_some_and(RowAction::is_loading)
    }

    /// Handle a key press.
    pub fn handle_input(&mut self, key: KeyEvent, bindings: &KeyBindings) -> Option<TableAction> {
        if let Some(row_action) = self.row_action.as_mut().filter(|r| r.is_confirming()) {
            let variables = row_action.handle_input(key)?;
            return Some(self.forward_row_action(variables));
        }
        if let Some(add_row) = self.add_row.as_mut().filter(|a| a.has_dialog()) {
            let mutation = add_row.handle_input(key)?;
            return Some(self.add_row_command(mutation));
        }

        match bindings.table_key(key)? {
            TableKey::Up => self.move_selection(false),
            TableKey::Down => self.move_selection(true),
            TableKey::PreviousPage => self.change_page(self.pagination().previous()),
            TableKey::NextPage => self.change_page(self.pagination().next()),
            TableKey::AddRow => {
                if !self.accepts_add_row() {
                    debug!(table = %self.id, "Add row ignored until the list is ready");
                    return None;
                }
                let snapshot = self.snapshot();
                let mutation = self.add_row.as_mut()?.activate(&snapshot)?;
                return Some(self.add_row_command(mutation));
            }
            TableKey::RowAction => {
                let params = self.selected_row()?.action.clone();
                let variables = self.row_action.as_mut()?.activate(&params)?;
                return Some(self.forward_row_action(variables));
            }
            TableKey::Refetch => {
                self.begin_refetch();
                return Some(TableAction::Command(TableCommand::FetchList {
                    request: self.list_request(),
                    policy: FetchPolicy::NetworkOnly,
                }));
            }
        }
        None
    }

    /// Draw the table: add-row line, then body (or empty text) and pagination.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let ready = matches!(self.query, QueryState::Ready { .. });
        let body_area = match &self.add_row {
            Some(add_row) if ready => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(2), Constraint::Min(0)])
                    .split(area);
                add_row.render(frame, chunks[0], theme);
                chunks[1]
            }
            _ => area,
        };

        match &self.query {
            QueryState::Loading => self.spinner.render(frame, body_area, theme),
            QueryState::Failed(message) => {
                let lines = vec![
                    Line::from(Span::styled(
                        format!(" Failed to load: {} ", message),
                        theme.error(),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("[r]", theme.key()),
                        Span::styled(" retry", theme.muted()),
                    ]),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body_area);
            }
            QueryState::Ready { data, .. } if data.body.is_empty() => {
                frame.render_widget(
                    Paragraph::new(self.config.empty_text.as_str()).style(theme.text()),
                    body_area,
                );
            }
            QueryState::Ready { .. } => self.render_table(frame, body_area, theme),
        }

        if self.row_action.as_ref().is_some_and(RowAction::is_loading) {
            LoadingIndicator::with_message("Working...").render_overlay(frame, area, theme);
        }

        if let Some(add_row) = &self.add_row {
            add_row.render_dialog(frame, area, theme);
        }
        if let Some(row_action) = &self.row_action {
            row_action.render_dialog(frame, area, theme);
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let QueryState::Ready { data, status } = &self.query else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let mut widths: Vec<Constraint> = data.head.iter().map(|c| c.width).collect();
        let mut header: Vec<Cell> = data.head.iter().map(|c| Cell::from(c.title.as_str())).collect();
        if let Some(row_action) = &self.row_action {
            widths.push(Constraint::Length(row_action.label().chars().count() as u16 + 2));
            header.push(Cell::from("Action"));
        }

        let pagination = self.pagination();
        let rows: Vec<TuiRow> = data.body[pagination.slice_range()]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut cells: Vec<Cell> = row.cells.iter().map(|c| Cell::from(c.as_str())).collect();
                if let Some(row_action) = &self.row_action {
                    cells.push(Cell::from(row_action.cell(&row.action, theme)));
                }
                let style = if i % 2 == 1 {
                    theme.text().bg(theme.stripe_bg)
                } else {
                    theme.text()
                };
                TuiRow::new(cells).style(style)
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(TuiRow::new(header).style(theme.header()).bottom_margin(1))
            .highlight_style(theme.selected())
            .highlight_symbol("▶ ")
            .column_spacing(2);
        frame.render_stateful_widget(table, chunks[0], &mut self.table_state);

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(32)])
            .split(chunks[1]);
        let source = if self.refreshing {
            Span::styled(self.spinner.text(), theme.muted())
        } else {
            Span::styled(format!("{} {}", status.icon(), status.text()), theme.muted())
        };
        frame.render_widget(Paragraph::new(Line::from(source)), footer[0]);
        pagination.render(frame, footer[1], theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::documents;
    use crate::table::{Column, RowActionParams};
    use crate::ui::components::add_row::AddRowPhase;
    use crate::ui::components::modal::ConfirmationProps;
    use crate::validation::{FieldSchema, Schema};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, style::Modifier, Terminal};
    use serde_json::{json, Value};

    const LIMIT_MESSAGE: &str = "You can only have 5 credentials at the same time.";

    fn mapper(result: Option<&Value>) -> TableData {
        let head = vec![Column::new("Id"), Column::new("Name")];
        let Some(items) = result.and_then(|v| v.get("items")).and_then(Value::as_array) else {
            return TableData::empty(head);
        };
        let body: Vec<Row> = items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|id| {
                let vars = RowVariables::from([("id".to_string(), id.to_string())]);
                Row::new([id.to_string(), format!("name-{}", id)])
                    .with_data(vars.clone())
                    .with_action(RowActionParams::with_variables(vars))
            })
            .collect();
        let validation = TableData::count_snapshot(&body);
        TableData {
            head,
            body,
            validation,
        }
    }

    fn items(n: usize) -> QueryResponse {
        let ids: Vec<String> = (1..=n).map(|i| format!("r{}", i)).collect();
        QueryResponse {
            data: json!({ "items": ids }),
            status: CacheStatus::Fresh,
        }
    }

    fn table() -> DataTable {
        DataTable::new(
            TableConfig::new(documents::get_credentials()).with_empty_text("Nothing here yet"),
            mapper,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(table: &mut DataTable, code: KeyCode) -> Option<TableAction> {
        table.handle_input(key(code), &KeyBindings::default())
    }

    fn screen(table: &mut DataTable) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| table.render(f, f.area(), &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_mount_issues_list_query() {
        let mut t = table();
        match t.mount() {
            TableCommand::FetchList { request, policy } => {
                assert_eq!(request.document.operation_name(), "GetCredentials");
                assert_eq!(policy, FetchPolicy::CacheFirst);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(t.query_state(), &QueryState::Loading);
        assert!(screen(&mut t).contains("Loading..."));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(table().id(), table().id());
    }

    #[test]
    fn test_empty_body_renders_empty_text_only() {
        let mut t = table();
        t.mount();
        t.receive_list(Ok(items(0)));
        let text = screen(&mut t);
        assert!(text.contains("Nothing here yet"));
        assert!(!text.contains("Id"));
        assert!(!text.contains("‹"));
    }

    #[test]
    fn test_null_data_is_empty() {
        let mut t = table();
        t.receive_list(Ok(QueryResponse {
            data: Value::Null,
            status: CacheStatus::Fresh,
        }));
        assert!(screen(&mut t).contains("Nothing here yet"));
    }

    #[test]
    fn test_paging_slices_body() {
        let mut t = table();
        t.receive_list(Ok(items(25)));
        assert_eq!(t.visible_rows().len(), 10);
        assert!(screen(&mut t).contains("1–10 of 25"));

        press(&mut t, KeyCode::Right);
        press(&mut t, KeyCode::Right);
        assert_eq!(t.current_page(), 3);
        assert_eq!(t.visible_rows().len(), 5);
        assert_eq!(t.visible_rows()[0].cells[0], "r21");

        // Already on the last page.
        press(&mut t, KeyCode::Right);
        assert_eq!(t.current_page(), 3);
        assert!(screen(&mut t).contains("21–25 of 25"));
    }

    #[test]
    fn test_page_clamped_when_data_shrinks() {
        let mut t = table();
        t.receive_list(Ok(items(25)));
        press(&mut t, KeyCode::Right);
        press(&mut t, KeyCode::Right);
        t.receive_list(Ok(items(12)));
        assert_eq!(t.current_page(), 2);
        assert_eq!(t.visible_rows().len(), 2);
    }

    #[test]
    fn test_selection_wraps() {
        let mut t = table();
        t.receive_list(Ok(items(3)));
        press(&mut t, KeyCode::Up);
        assert_eq!(t.selected_row().unwrap().cells[0], "r3");
        press(&mut t, KeyCode::Down);
        assert_eq!(t.selected_row().unwrap().cells[0], "r1");
    }

    #[test]
    fn test_failed_query_is_distinct_and_retryable() {
        let mut t = table();
        t.mount();
        t.receive_list(Err("connection refused".to_string()));
        assert_eq!(
            t.query_state(),
            &QueryState::Failed("connection refused".to_string())
        );
        let text = screen(&mut t);
        assert!(text.contains("connection refused"));
        assert!(!text.contains("Nothing here yet"));

        let action = press(&mut t, KeyCode::Char('r'));
        assert!(matches!(
            action,
            Some(TableAction::Command(TableCommand::FetchList {
                policy: FetchPolicy::NetworkOnly,
                ..
            }))
        ));
        assert_eq!(t.query_state(), &QueryState::Loading);
    }

    #[test]
    fn test_failing_validation_issues_no_mutation() {
        let mut t = table().with_add_row(
            AddRowConfig::new("Generate credential", documents::create_credential()).with_validation(
                Schema::object().field("count", FieldSchema::number().less_than(5.0, LIMIT_MESSAGE)),
            ),
        );
        t.receive_list(Ok(items(5)));
        assert_eq!(press(&mut t, KeyCode::Char('a')), None);
        assert!(screen(&mut t).contains(LIMIT_MESSAGE));
    }

    #[test]
    fn test_add_row_refetches_with_list_variables() {
        let mut variables = Variables::new();
        variables.insert("owner".to_string(), json!("me"));
        let mut t = DataTable::new(
            TableConfig::new(documents::get_credentials()).with_variables(variables.clone()),
            mapper,
        )
        .with_add_row(AddRowConfig::new("Generate credential", documents::create_credential()));
        t.receive_list(Ok(items(1)));

        match press(&mut t, KeyCode::Char('a')) {
            Some(TableAction::Command(TableCommand::AddRow { mutation, refetch })) => {
                assert_eq!(mutation.document.operation_name(), "CreateCredential");
                assert_eq!(refetch.document.operation_name(), "GetCredentials");
                assert_eq!(refetch.variables, variables);
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert_eq!(t.add_row().map(AddRow::phase), Some(AddRowPhase::Submitting));

        // Second press while submitting is ignored.
        assert_eq!(press(&mut t, KeyCode::Char('a')), None);

        t.complete_add_row(Ok(()));
        assert!(t.is_refreshing());
        assert_eq!(t.add_row().map(AddRow::phase), Some(AddRowPhase::Idle));
    }

    #[test]
    fn test_row_action_forwards_variables_and_clears_add_error() {
        let mut t = table()
            .with_add_row(
                AddRowConfig::new("Generate credential", documents::create_credential())
                    .with_validation(Schema::object().field(
                        "count",
                        FieldSchema::number().less_than(2.0, LIMIT_MESSAGE),
                    )),
            )
            .with_row_action(RowActionConfig::new("Delete"));
        t.receive_list(Ok(items(3)));

        press(&mut t, KeyCode::Char('a'));
        assert!(t.add_row().and_then(AddRow::error_message).is_some());

        press(&mut t, KeyCode::Down);
        let action = press(&mut t, KeyCode::Enter);
        assert_eq!(
            action,
            Some(TableAction::RowAction(RowVariables::from([(
                "id".to_string(),
                "r2".to_string()
            )])))
        );
        assert_eq!(t.add_row().and_then(AddRow::error_message), None);
    }

    #[test]
    fn test_row_action_confirmation() {
        let mut t = table().with_row_action(
            RowActionConfig::new("Delete")
                .with_confirmation(ConfirmationProps::new("Delete credential?", "Delete")),
        );
        t.receive_list(Ok(items(2)));

        assert_eq!(press(&mut t, KeyCode::Enter), None);
        assert!(t.has_dialog());
        assert!(screen(&mut t).contains("Delete credential?"));

        // Navigation keys go to the dialog, not the table.
        assert_eq!(press(&mut t, KeyCode::Char('j')), None);
        let action = press(&mut t, KeyCode::Char('y'));
        assert!(matches!(action, Some(TableAction::RowAction(vars)) if vars["id"] == "r1"));
        assert!(!t.has_dialog());
    }

    #[test]
    fn test_loading_overlay_blocks_row_actions() {
        let mut t = table().with_row_action(RowActionConfig::new("Delete"));
        t.receive_list(Ok(items(2)));
        t.set_row_action_loading(true);

        assert_eq!(press(&mut t, KeyCode::Enter), None);

        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| t.render(f, f.area(), &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("r1"));
        assert!(text.contains("Working..."));
        assert!(buffer[(0, 0)].modifier.contains(Modifier::DIM));

        t.set_row_action_loading(false);
        assert!(press(&mut t, KeyCode::Enter).is_some());
    }

    fn limited_add_row() -> AddRowConfig {
        AddRowConfig::new("Generate credential", documents::create_credential()).with_validation(
            Schema::object().field("count", FieldSchema::number().less_than(5.0, LIMIT_MESSAGE)),
        )
    }

    #[test]
    fn test_add_row_waits_for_list_data() {
        let mut t = table().with_add_row(limited_add_row());
        t.mount();

        let text = screen(&mut t);
        assert!(text.contains("Loading..."));
        assert!(!text.contains("Generate credential"));
        assert_eq!(press(&mut t, KeyCode::Char('a')), None);
        assert_eq!(t.add_row().map(AddRow::phase), Some(AddRowPhase::Idle));

        t.receive_list(Err("boom".to_string()));
        assert!(!screen(&mut t).contains("Generate credential"));
        assert_eq!(press(&mut t, KeyCode::Char('a')), None);
        assert_eq!(t.add_row().and_then(AddRow::error_message), None);

        // The limit applies as soon as real data is in.
        t.receive_list(Ok(items(5)));
        assert!(screen(&mut t).contains("Generate credential"));
        assert_eq!(press(&mut t, KeyCode::Char('a')), None);
        assert_eq!(t.add_row().and_then(AddRow::error_message), Some(LIMIT_MESSAGE));
    }

    #[test]
    fn test_add_row_blocked_while_row_action_runs() {
        let mut t = table()
            .with_add_row(limited_add_row())
            .with_row_action(RowActionConfig::new("Delete"));
        t.receive_list(Ok(items(2)));
        t.set_row_action_loading(true);

        assert_eq!(press(&mut t, KeyCode::Char('a')), None);
        assert_eq!(t.add_row().map(AddRow::phase), Some(AddRowPhase::Idle));

        // The overlay covers the add-row line too.
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| t.render(f, f.area(), &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert!(buffer[(1, 0)].modifier.contains(Modifier::DIM));

        t.set_row_action_loading(false);
        assert!(matches!(
            press(&mut t, KeyCode::Char('a')),
            Some(TableAction::Command(TableCommand::AddRow { .. }))
        ));
    }

    #[test]
    fn test_action_column_header() {
        let mut t = table().with_row_action(RowActionConfig::new("Delete"));
        t.receive_list(Ok(items(1)));
        let text = screen(&mut t);
        assert!(text.contains("Action"));
        assert!(text.contains("Delete"));
    }

    #[test]
    fn test_hidden_action_rows() {
        let mut t = DataTable::new(TableConfig::new(documents::get_credentials()), |_: Option<&Value>| {
            TableData {
                head: vec![Column::new("Id")],
                body: vec![Row::new(["locked"]).with_action(RowActionParams::hidden())],
                validation: Snapshot::new(),
            }
        })
        .with_row_action(RowActionConfig::new("Delete"));
        t.receive_list(Ok(items(0)));
        assert_eq!(press(&mut t, KeyCode::Enter), None);
        assert!(!screen(&mut t).contains("Delete"));
    }
}
