//! HTTP server module.
//!
//! Plain-HTTP server with graceful shutdown on SIGTERM/SIGINT. In-cluster
//! traffic rides the pod network; TLS termination belongs to the ingress.

mod server;
mod shutdown;

pub use server::start_server;
