//! Row mapping for the credentials list.

use chrono::{DateTime, NaiveDate};
use ratatui::layout::Constraint;
use serde_json::Value;
use tracing::trace;

use crate::api::types::{Credential, CredentialsQueryResult};
use crate::table::{Column, Row, RowActionParams, RowVariables, Snapshot, TableData};

pub const EMPTY_TEXT: &str = "No credentials generated yet.";

fn head() -> Vec<Column> {
    vec![
        Column {
            title: "Id".to_string(),
            width: Constraint::Length(36),
        },
        Column::new("Username"),
        Column::fixed("Created at", 10),
    ]
}

/// Map a `GetCredentials` result to rows of id, username and creation date.
///
/// Absent or malformed data yields headers, no rows and an empty snapshot.
pub fn map_credentials(result: Option<&Value>) -> TableData {
    let credentials = result
        .and_then(|value| serde_json::from_value::<CredentialsQueryResult>(value.clone()).ok())
        .and_then(|result| result.get_credentials);

    let Some(credentials) = credentials else {
        trace!("No credentials in query result");
        return TableData {
            head: head(),
            body: Vec::new(),
            validation: Snapshot::new(),
        };
    };

    let body: Vec<Row> = credentials.iter().map(credential_row).collect();
    let validation = TableData::count_snapshot(&body);
    TableData {
        head: head(),
        body,
        validation,
    }
}

fn credential_row(credential: &Credential) -> Row {
    let variables = RowVariables::from([("id".to_string(), credential.id.clone())]);
    Row::new([
        credential.id.clone(),
        credential.username.clone(),
        format_date(&credential.created_at),
    ])
    .with_data(variables.clone())
    .with_action(RowActionParams::with_variables(variables))
}

/// Format a timestamp as `YYYY-MM-DD`, leaving unparseable input untouched.
pub fn format_date(raw: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format("%Y-%m-%d").to_string();
    }
    if let Some(date) = raw
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_rows() {
        let data = json!({
            "getCredentials": [
                { "id": "a1", "username": "calm_otter7", "createdAt": "2024-03-01T10:00:00+00:00" },
                { "id": "b2", "username": "witty_raven3", "createdAt": "2023-12-31T23:59:59Z" }
            ]
        });
        let table = map_credentials(Some(&data));

        let titles: Vec<&str> = table.head.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Id", "Username", "Created at"]);
        assert_eq!(table.body.len(), 2);
        assert_eq!(table.body[0].cells, ["a1", "calm_otter7", "2024-03-01"]);
        assert_eq!(table.body[1].cells[2], "2023-12-31");
        assert_eq!(table.body[1].action.variables["id"], "b2");
        assert_eq!(table.body[1].data["id"], "b2");
        assert!(table.body[0].action.show);
        assert_eq!(table.validation.get("count"), Some(&json!(2)));
    }

    #[test]
    fn test_absent_data_is_empty() {
        for data in [json!(null), json!({}), json!({ "getCredentials": null })] {
            let table = map_credentials(Some(&data));
            assert!(table.body.is_empty());
            assert!(table.validation.is_empty());
            assert_eq!(table.head.len(), 3);
        }
        assert!(map_credentials(None).body.is_empty());
    }

    #[test]
    fn test_malformed_data_is_empty() {
        let data = json!({ "getCredentials": "nope" });
        assert!(map_credentials(Some(&data)).body.is_empty());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-01T10:00:00+02:00"), "2024-03-01");
        assert_eq!(format_date("2024-03-01"), "2024-03-01");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
