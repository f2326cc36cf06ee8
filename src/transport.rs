//! Time-bounded HTTP transport over a shared `reqwest::Client`.
//!
//! The host owns connection pooling; this module only bounds each exchange
//! (request plus full body read) with its own timeout.

mod http;

pub use http::{HttpReply, HttpTransport, TransportError};
