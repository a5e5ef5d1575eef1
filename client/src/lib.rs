//! Synchronous API client for the paginated todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the client fully deterministic and
//! testable.
//!
//! # Design
//! - `TodoClient` is stateless — it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Types use owned `String` / `Vec` fields; DTOs are defined
//!   independently from the mock-server crate and integration tests catch
//!   schema drift.
//! - The pre-submit title rule (`validate_title`) lives next to the DTOs so
//!   every frontend shares the same check.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{validate_title, CreateTodo, Page, TitleError, Todo, UpdateTodo, MAX_TITLE_LEN};
