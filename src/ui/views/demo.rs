//! The demo pages: one credentials table per feature combination.

use clap::ValueEnum;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{documents, OperationRequest, Variables};
use crate::cache::FetchPolicy;
use crate::table::RowVariables;
use crate::ui::components::{
    AddRowConfig, ConfirmationProps, DataTable, RowActionConfig, SuccessProps, TableConfig,
};
use crate::ui::views::credentials::{map_credentials, EMPTY_TEXT};
use crate::validation::{FieldSchema, Schema};

pub const CREDENTIAL_LIMIT_MESSAGE: &str = "You can only have 5 credentials at the same time.";

/// Which demo is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    #[default]
    Simple,
    AddRow,
    RowAction,
    Full,
}

impl Demo {
    pub const ALL: [Demo; 4] = [Demo::Simple, Demo::AddRow, Demo::RowAction, Demo::Full];

    pub fn title(&self) -> &'static str {
        match self {
            Demo::Simple => "Simple table with GraphQL data",
            Demo::AddRow => "With ability to add new rows",
            Demo::RowAction => "With ability to perform mutation on row data",
            Demo::Full => {
                "With ability to add new rows (including validation) and perform mutation on row data"
            }
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Demo::Simple => "Simple",
            Demo::AddRow => "Add row",
            Demo::RowAction => "Row action",
            Demo::Full => "Full",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// Demo for a `1`-based number key.
    pub fn from_number(n: u32) -> Option<Demo> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Demo {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Table settings shared by every demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub page_size: usize,
    pub fetch_policy: FetchPolicy,
}

/// A mounted demo: its table and the row action it owns.
#[derive(Debug)]
pub struct DemoPage {
    demo: Demo,
    table: DataTable,
}

impl DemoPage {
    pub fn new(demo: Demo, settings: PageSettings) -> Self {
        let config = TableConfig::new(documents::get_credentials())
            .with_empty_text(EMPTY_TEXT)
            .with_page_size(settings.page_size)
            .with_fetch_policy(settings.fetch_policy);
        let table = DataTable::new(config, map_credentials);

        let table = match demo {
            Demo::Simple => table,
            Demo::AddRow => table.with_add_row(generate_credential()),
            Demo::RowAction => table.with_row_action(RowActionConfig::new("Delete credential")),
            Demo::Full => table
                .with_add_row(
                    generate_credential()
                        .with_validation(Schema::object().field(
                            "count",
                            FieldSchema::number().less_than(5.0, CREDENTIAL_LIMIT_MESSAGE),
                        ))
                        .with_success(SuccessProps::new(
                            "Credential generated",
                            "A new credential was added to the list.",
                        )),
                )
                .with_row_action(
                    RowActionConfig::new("Delete credential").with_confirmation(
                        ConfirmationProps::new("Delete credential?", "Delete")
                            .with_content("The credential stops working immediately."),
                    ),
                ),
        };

        Self { demo, table }
    }

    pub fn demo(&self) -> Demo {
        self.demo
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable {
        &mut self.table
    }

    /// React to a forwarded row action: build the delete mutation and show
    /// the table as busy until [`DemoPage::complete_row_action`].
    pub fn handle_row_action(&mut self, variables: &RowVariables) -> Option<OperationRequest> {
        let request = delete_request(variables)?;
        info!(demo = ?self.demo, "Deleting credential");
        self.table.set_row_action_loading(true);
        Some(request)
    }

    pub fn complete_row_action(&mut self) {
        debug!(demo = ?self.demo, "Row action finished");
        self.table.set_row_action_loading(false);
    }
}

fn generate_credential() -> AddRowConfig {
    AddRowConfig::new("Generate credential", documents::create_credential())
}

/// The delete mutation for a row bound to `{id}`.
pub fn delete_request(variables: &RowVariables) -> Option<OperationRequest> {
    let id = variables.get("id")?;
    let mut mutation_variables = Variables::new();
    mutation_variables.insert("credentialId".to_string(), Value::String(id.clone()));
    Some(OperationRequest::new(
        documents::delete_credential(),
        mutation_variables,
    ))
}
