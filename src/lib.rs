//! microservice - user/product HTTP service with request metrics
//!
//! This library provides the HTTP routes, the request timing middleware and
//! metrics registry, configuration, and the Ansible inventory generator used
//! by the `generate-inventory` binary.
//!
//! # Architecture
//! - `api`: HTTP middleware, route handlers and shared state
//! - `metrics` / `metrics_core`: request counter and latency histogram
//! - `services`: in-memory user and product stores
//! - `inventory`: Terraform output → Ansible inventory
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and server mode
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod inventory;
pub mod metrics;
pub mod metrics_core;
pub mod runtime;
pub mod services;
pub mod system;
