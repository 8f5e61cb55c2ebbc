//! Beacon: a pod-to-pod communication demo service.
//!
//! A small HTTP service meant to run as several replicas behind a cluster
//! Service. Each pod keeps the most recent greetings it received, announces
//! itself to its siblings on a fixed schedule, and renders a status page
//! showing what arrived.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;
