// Core record types shared by the catalogs, the selection state machine and the TUI.
// Size and last-modified are display strings on purpose: the mock source mirrors
// what a real org API would hand back for list rendering.

use serde::{Deserialize, Serialize};

/// A selectable source object type (e.g. `Account`, `Contact`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceObject {
    pub api_name: String,
    pub label: String,
    pub description: String,
}

/// One file attached to the selected source object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size: String,
    pub last_modified: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub owner: String,
}

/// Destination org availability. Only active orgs accept migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgStatus {
    Active,
    Maintenance,
}

impl OrgStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgStatus::Active => "active",
            OrgStatus::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgType {
    Production,
    Sandbox,
}

impl OrgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgType::Production => "Production",
            OrgType::Sandbox => "Sandbox",
        }
    }
}

/// A migration destination org.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationTarget {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: OrgStatus,
    #[serde(rename = "type")]
    pub org_type: OrgType,
}

impl DestinationTarget {
    pub fn is_selectable(&self) -> bool {
        self.status == OrgStatus::Active
    }
}
