//! Integration tests against a mock Spokestack API.

mod synthesis;
mod timeouts;
