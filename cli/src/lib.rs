//! Terminal front-end for the todo service: a ureq transport for the core's
//! requests, plus command parsing and rendering.

pub mod transport;
pub mod ui;
