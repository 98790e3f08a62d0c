//! Client core for the todo service.
//!
//! # Overview
//! Two layers, neither of which touches the network:
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values for the four API operations.
//! - `TodoApp` is the view model a front-end renders. It turns user actions
//!   into `Outbound` requests and reconciles its local copy of the collection
//!   from their outcomes.
//!
//! # Design
//! - The host executes every request, so the core is deterministic and easy
//!   to drive from tests, a terminal UI, or anything else with an HTTP client.
//! - DTOs are defined independently from the server crate; the end-to-end
//!   tests in `todo-cli` catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use app::{EditState, Intent, Notice, Outbound, TodoApp, NOTICE_DURATION};
pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Outcome};
pub use types::{Todo, TodoId, TodoInput};
