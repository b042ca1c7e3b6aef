//! Core types and trait definitions for the annals record keeper.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::RecordStore`]; everything that consumes
//! the records (the JSON API, the CLI, the sync adapter) goes through that
//! trait and the helpers defined here.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod bootstrap;
pub mod collection;
pub mod dates;
pub mod error;
pub mod event;
pub mod import;
pub mod links;
pub mod search;
pub mod seed;
pub mod session;
pub mod setting;
pub mod store;
pub mod topic;

pub use error::{Error, Result};
