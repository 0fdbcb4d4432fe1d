//! gqltable: a paginated terminal data table over GraphQL.
//!
//! The table lists the result of a GraphQL query, pages through it on the
//! client, and can run an add-row mutation and a per-row mutation, each
//! followed by a re-fetch of the list.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod table;
pub mod tasks;
pub mod ui;
pub mod validation;
