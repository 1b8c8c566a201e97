//! Core domain types
//!
//! Records returned by the AnsFlow backend. The backend is authoritative for
//! every field here; the client only reads these shapes and re-fetches them
//! after each mutation.

pub mod analytics;
pub mod ansible;
pub mod cicd;
pub mod docker;
pub mod execution;
pub mod pipeline;
pub mod project;
