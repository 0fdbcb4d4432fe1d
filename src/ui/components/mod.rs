//! Reusable UI components.

pub mod add_row;
pub mod data_table;
mod help_bar;
mod loading;
pub mod modal;
pub mod pagination;
pub mod row_action;

pub use add_row::{AddRow, AddRowConfig, AddRowPhase, AddRowState};
pub use data_table::{DataTable, QueryState, TableAction, TableCommand, TableConfig, TableId};
pub use help_bar::render_hints;
pub use loading::LoadingIndicator;
pub use modal::{centered_rect, ConfirmationProps, SuccessProps};
pub use pagination::{PageChange, Pagination, PaginationView};
pub use row_action::{RowAction, RowActionConfig, RowActionParams, RowActionState};
