//! # crudhubd — crudhub daemon
//!
//! Composition root that wires the service layer to its adapters and exposes
//! it on the command line.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Run the discovery pass: register host-provided repositories and services
//! - Build the lazy resolution factory over the in-memory generator, with a
//!   moka cache for the configured entity types
//! - Seed the services from a JSON fixture
//! - Run read-only commands through the read service and print JSON
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no service logic belongs here.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod hub;
pub mod seed;
