//! Group and user records.

use serde::{Deserialize, Serialize};

/// Reference to a user belonging to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedUserItem {
    pub id: u64,
}

/// Reference to a group a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedGroupItem {
    pub id: u64,
}

/// A user group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub alive: Option<bool>,
    #[serde(default)]
    pub users: Vec<NestedUserItem>,
}

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub alive: Option<bool>,
    #[serde(default)]
    pub groups: Vec<NestedGroupItem>,
}
