//! Mode routing
//!
//! The service binary only has a server mode; the inventory generator is a
//! separate binary.

pub mod server;

pub use server::run_server;
