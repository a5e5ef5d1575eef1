//! List view controller and HTTP executor for the paginated todo demo.
//!
//! # Overview
//! `todo-client` builds requests and parses responses; this crate is the
//! host that executes them and keeps the UI state. [`ListView`] owns the
//! displayed page, orchestrates optimistic updates with snapshot-based
//! revert, and queues [`Notice`] values for the embedding UI to render.
//! [`UreqTransport`] performs the actual round-trips with a fixed
//! per-request timeout.
//!
//! All state lives in the one controller and is touched from the one UI
//! loop; there is no locking, no request cancellation and no retry.

pub mod list_view;
pub mod notice;
pub mod transport;

pub use list_view::{ListView, DEFAULT_PAGE_SIZE};
pub use notice::{Level, Notice};
pub use transport::{Transport, TransportError, UreqTransport, DEFAULT_TIMEOUT};
