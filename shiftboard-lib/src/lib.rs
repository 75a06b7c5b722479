//! Shiftboard client library
//!
//! An async client for the shift-scheduling backend, plus the tabular view
//! engine (search, sort, paging) and the exports built on top of it.

pub mod api;
pub mod auth;
pub mod error;
pub mod export;
pub mod form;
pub mod model;
pub mod rate_limit;
pub mod view;

mod client;

pub use client::*;
