//! Offline integration suite: every scenario runs against a wiremock
//! Bookstore, so no credentials or network access are needed.

#[path = "../common/mod.rs"]
mod common;
