//! Record payloads for the document and publication collections.

use crate::address::Collection;
use crate::error::{PubError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire payload of a `site.standard.document` record.
///
/// Optional fields are stripped from the JSON entirely when unset; the
/// remote schema rejects explicit nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Always `site.standard.document`.
    #[serde(rename = "$type")]
    pub record_type: String,
    /// at:// address of the publication this document belongs to.
    pub site: String,
    /// Document title.
    pub title: String,
    /// Original publication time.
    pub published_at: DateTime<Utc>,
    /// Short description or excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Site-relative path the document is served from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Document body (markdown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Last update time, set on overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire payload of a `site.standard.publication` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    /// Always `site.standard.publication`.
    #[serde(rename = "$type")]
    pub record_type: String,
    /// Canonical URL of the site.
    pub url: String,
    /// Human-readable site name.
    pub name: String,
    /// Short description of the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Caller-supplied fields for publishing or updating a document.
///
/// All fields are optional at the type level; [`DocumentInput::into_record`]
/// enforces the required ones before any network call is made.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    /// at:// address of the owning publication. Required.
    pub site: Option<String>,
    /// Document title. Required.
    pub title: Option<String>,
    /// Publication time. Required.
    pub published_at: Option<DateTime<Utc>>,
    /// Short description or excerpt.
    pub description: Option<String>,
    /// Site-relative path.
    pub path: Option<String>,
    /// Document body (markdown).
    pub content: Option<String>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentInput {
    /// Validates required fields and builds the wire record.
    ///
    /// # Errors
    ///
    /// Returns `PubError::InvalidInput` naming the first missing required
    /// field (`site`, `title`, or `publishedAt`).
    pub fn into_record(self) -> Result<DocumentRecord> {
        let site = self.site.ok_or_else(|| missing("site"))?;
        let title = self.title.ok_or_else(|| missing("title"))?;
        let published_at = self.published_at.ok_or_else(|| missing("publishedAt"))?;

        Ok(DocumentRecord {
            record_type: Collection::Document.nsid().to_string(),
            site,
            title,
            published_at,
            description: self.description,
            path: self.path,
            content: self.content,
            tags: self.tags,
            updated_at: self.updated_at,
        })
    }
}

/// Caller-supplied fields for publishing a publication.
#[derive(Debug, Clone, Default)]
pub struct PublicationInput {
    /// Canonical URL of the site. Required.
    pub url: Option<String>,
    /// Human-readable site name. Required.
    pub name: Option<String>,
    /// Short description of the site.
    pub description: Option<String>,
    /// Icon URL.
    pub icon: Option<String>,
}

impl PublicationInput {
    /// Validates required fields and builds the wire record.
    ///
    /// # Errors
    ///
    /// Returns `PubError::InvalidInput` naming the first missing required
    /// field (`url` or `name`).
    pub fn into_record(self) -> Result<PublicationRecord> {
        let url = self.url.ok_or_else(|| missing("url"))?;
        let name = self.name.ok_or_else(|| missing("name"))?;

        Ok(PublicationRecord {
            record_type: Collection::Publication.nsid().to_string(),
            url,
            name,
            description: self.description,
            icon: self.icon,
        })
    }
}

fn missing(field: &str) -> PubError {
    PubError::InvalidInput(format!("missing required field: {field}"))
}
