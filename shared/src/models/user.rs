//! User Model

use serde::{Deserialize, Serialize};

use crate::util::lenient_i64;

/// Role attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
}

/// Logged-in user profile, as returned by `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// User summary embedded in order list rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
}
