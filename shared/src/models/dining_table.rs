//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::util::{lenient_i64, lenient_string};

/// Occupancy status of a table.
///
/// Parsed case-insensitively. Values the client does not know about are kept
/// verbatim in [`TableStatus::Other`] rather than rejected, so a new status on
/// the server does not break the floor view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Inactive,
    Other(String),
}

impl TableStatus {
    /// The four statuses the dashboard knows about, in legend order.
    pub const KNOWN: [TableStatus; 4] = [
        TableStatus::Available,
        TableStatus::Occupied,
        TableStatus::Reserved,
        TableStatus::Inactive,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Inactive => "inactive",
            TableStatus::Other(s) => s,
        }
    }

    /// Title-cased label used in the legend and stats.
    pub fn label(&self) -> &str {
        match self {
            TableStatus::Available => "Available",
            TableStatus::Occupied => "Occupied",
            TableStatus::Reserved => "Reserved",
            TableStatus::Inactive => "Inactive",
            TableStatus::Other(s) => s,
        }
    }

    /// Only inactive tables refuse clicks.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, TableStatus::Inactive)
    }
}

impl From<&str> for TableStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "available" => TableStatus::Available,
            "occupied" => TableStatus::Occupied,
            "reserved" => TableStatus::Reserved,
            "inactive" => TableStatus::Inactive,
            _ => TableStatus::Other(value.to_string()),
        }
    }
}

impl From<String> for TableStatus {
    fn from(value: String) -> Self {
        TableStatus::from(value.as_str())
    }
}

impl From<TableStatus> for String {
    fn from(value: TableStatus) -> Self {
        match value {
            TableStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    /// Table number as printed on the table, not necessarily numeric
    #[serde(deserialize_with = "lenient_string")]
    pub number: String,
    pub status: TableStatus,
    #[serde(deserialize_with = "lenient_i64")]
    pub floor_id: i64,
}

impl DiningTable {
    pub fn is_interactive(&self) -> bool {
        self.status.is_interactive()
    }
}

/// Table summary embedded in order list rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub number: String,
    pub status: TableStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(TableStatus::from("INACTIVE"), TableStatus::Inactive);
        assert_eq!(TableStatus::from("Occupied"), TableStatus::Occupied);
        assert_eq!(
            TableStatus::from("cleaning"),
            TableStatus::Other("cleaning".to_string())
        );
    }

    #[test]
    fn test_table_decodes_mixed_types() {
        let table: DiningTable = serde_json::from_str(
            r#"{"id":"3","number":12,"status":"Inactive","floor_id":"2"}"#,
        )
        .unwrap();
        assert_eq!(table.id, 3);
        assert_eq!(table.number, "12");
        assert_eq!(table.floor_id, 2);
        assert!(!table.is_interactive());
    }

    #[test]
    fn test_unknown_status_is_interactive_and_kept() {
        let table: DiningTable =
            serde_json::from_str(r#"{"id":1,"number":"A1","status":"Cleaning","floor_id":1}"#)
                .unwrap();
        assert!(table.is_interactive());
        assert_eq!(table.status.as_str(), "Cleaning");
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["status"], "Cleaning");
    }
}
