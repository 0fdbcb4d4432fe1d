//! The table view-model and the mapping contract from query results to it.
//!
//! A [`TableMapper`] turns a raw list-query result into a [`TableData`]: the
//! column headers, one [`Row`] per entity, and the validation snapshot used
//! before a create mutation. Mappers must tolerate absent or malformed data
//! and return an empty body instead of failing.

use std::collections::BTreeMap;

use ratatui::layout::Constraint;
use serde_json::Value;

pub use crate::validation::Snapshot;

/// String variables bound to a row and handed to its row action.
pub type RowVariables = BTreeMap<String, String>;

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub width: Constraint,
}

impl Column {
    /// A column that shares the remaining width.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Constraint::Fill(1),
        }
    }

    /// A column of fixed width.
    pub fn fixed(title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            width: Constraint::Length(width),
        }
    }
}

/// Per-row row-action parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionParams {
    /// Whether the row gets an action control at all.
    pub show: bool,
    /// Variables passed to the action when it fires.
    pub variables: RowVariables,
    /// Whether the control is drawn but inert.
    pub disabled: bool,
}

impl Default for RowActionParams {
    fn default() -> Self {
        Self {
            show: true,
            variables: RowVariables::new(),
            disabled: false,
        }
    }
}

impl RowActionParams {
    /// Visible, enabled params bound to `variables`.
    pub fn with_variables(variables: RowVariables) -> Self {
        Self {
            variables,
            ..Self::default()
        }
    }

    /// Params for a row that has no action control.
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::default()
        }
    }
}

/// One body row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// Identifying data (e.g. `{id}`), opaque to the table.
    pub data: RowVariables,
    /// Display text, one entry per column.
    pub cells: Vec<String>,
    /// Row-action binding.
    pub action: RowActionParams,
}

impl Row {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: RowVariables::new(),
            cells: cells.into_iter().map(Into::into).collect(),
            action: RowActionParams::default(),
        }
    }

    pub fn with_data(mut self, data: RowVariables) -> Self {
        self.data = data;
        self
    }

    pub fn with_action(mut self, action: RowActionParams) -> Self {
        self.action = action;
        self
    }
}

/// What a mapper hands to the table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    pub head: Vec<Column>,
    pub body: Vec<Row>,
    pub validation: Snapshot,
}

impl TableData {
    /// Headers with an empty body.
    pub fn empty(head: Vec<Column>) -> Self {
        Self {
            head,
            body: Vec::new(),
            validation: Snapshot::new(),
        }
    }

    /// The common `{count: body.len()}` validation snapshot.
    pub fn count_snapshot(body: &[Row]) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert("count".to_string(), Value::from(body.len()));
        snapshot
    }
}

/// Adapter from a raw list-query result to the table view-model.
pub trait TableMapper: Send {
    /// `result` is `None` when the query produced no data yet.
    fn map(&self, result: Option<&Value>) -> TableData;
}

impl<F> TableMapper for F
where
    F: Fn(Option<&Value>) -> TableData + Send,
{
    fn map(&self, result: Option<&Value>) -> TableData {
        self(result)
    }
}
