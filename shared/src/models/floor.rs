//! Floor Model

use serde::{Deserialize, Serialize};

use crate::util::lenient_i64;

/// Floor entity (a seating area grouping tables)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
}
