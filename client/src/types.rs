//! Domain DTOs for the paginated todo API.
//!
//! # Design
//! These types mirror the backend's wire schema but are defined independently
//! of the mock-server crate; integration tests catch any drift between the
//! two. Ids are backend-assigned sequential integers and timestamps are
//! backend-assigned ISO8601 instants — the client never fabricates either.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length accepted by the backend, checked client-side before
/// submitting so the form can reject bad input without a round-trip.
pub const MAX_TITLE_LEN: usize = 200;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of todos plus pagination metadata, as returned by the list
/// endpoint. Pages are 1-indexed; `list.len() <= page_size` and
/// `total >= list.len()` hold for every well-formed envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub list: Vec<Todo>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_page: u64,
}

/// Request payload for creating a new todo. The backend assigns the id,
/// timestamps and an initial `done = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Why a title failed the pre-submit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    Empty,
    TooLong,
}

impl fmt::Display for TitleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleError::Empty => write!(f, "title is required"),
            TitleError::TooLong => {
                write!(f, "title must be at most {MAX_TITLE_LEN} characters")
            }
        }
    }
}

impl std::error::Error for TitleError {}

/// Check a title against the backend's rules: non-empty and at most
/// [`MAX_TITLE_LEN`] characters. Whitespace is not trimmed — a title of
/// spaces is accepted, matching the backend.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TitleError::TooLong);
    }
    Ok(())
}
