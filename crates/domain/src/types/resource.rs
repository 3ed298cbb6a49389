//! Resource kinds and collection endpoints

use serde::{Deserialize, Serialize};

use crate::errors::{GoDataError, Result};
use crate::impl_str_conversions;

/// The four Go.Data resource kinds this adaptor manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Outbreak,
    Contact,
    Case,
    Location,
}

impl_str_conversions!(ResourceKind {
    Outbreak => "outbreak",
    Contact => "contact",
    Case => "case",
    Location => "location",
});

impl ResourceKind {
    /// Path segment of the collection endpoint.
    pub fn collection_segment(self) -> &'static str {
        match self {
            Self::Outbreak => "outbreaks",
            Self::Contact => "contacts",
            Self::Case => "cases",
            Self::Location => "locations",
        }
    }

    /// Contacts and cases live underneath an outbreak.
    pub fn requires_outbreak(self) -> bool {
        matches!(self, Self::Contact | Self::Case)
    }
}

/// A collection endpoint, optionally scoped to a parent outbreak.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    kind: ResourceKind,
    outbreak_id: Option<String>,
}

impl ResourceRef {
    /// `outbreaks`
    pub fn outbreaks() -> Self {
        Self { kind: ResourceKind::Outbreak, outbreak_id: None }
    }

    /// `locations`
    pub fn locations() -> Self {
        Self { kind: ResourceKind::Location, outbreak_id: None }
    }

    /// `outbreaks/{outbreak_id}/contacts`
    pub fn contacts(outbreak_id: impl Into<String>) -> Result<Self> {
        Self::scoped(ResourceKind::Contact, outbreak_id.into())
    }

    /// `outbreaks/{outbreak_id}/cases`
    pub fn cases(outbreak_id: impl Into<String>) -> Result<Self> {
        Self::scoped(ResourceKind::Case, outbreak_id.into())
    }

    fn scoped(kind: ResourceKind, outbreak_id: String) -> Result<Self> {
        if outbreak_id.trim().is_empty() {
            return Err(GoDataError::InvalidInput(format!(
                "{} require a non-empty outbreak id",
                kind.collection_segment()
            )));
        }
        check_path_segment("outbreak id", &outbreak_id)?;
        Ok(Self { kind, outbreak_id: Some(outbreak_id) })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn outbreak_id(&self) -> Option<&str> {
        self.outbreak_id.as_deref()
    }

    /// Path of the collection relative to the API root.
    pub fn collection_path(&self) -> String {
        match &self.outbreak_id {
            Some(outbreak_id) => {
                format!("outbreaks/{}/{}", outbreak_id, self.kind.collection_segment())
            }
            None => self.kind.collection_segment().to_string(),
        }
    }

    /// Path of a single record within the collection.
    pub fn member_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }
}

/// Ids are interpolated into request paths verbatim, so they must stay a
/// single segment.
pub(crate) fn check_path_segment(what: &str, id: &str) -> Result<()> {
    let escapes = id.contains(['/', '?', '#', '%', '\\'])
        || id.chars().any(char::is_control)
        || matches!(id, "." | "..");
    if escapes {
        return Err(GoDataError::InvalidInput(format!(
            "{what} '{id}' is not a valid path segment"
        )));
    }
    Ok(())
}
