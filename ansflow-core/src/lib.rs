//! AnsFlow Core
//!
//! Core types shared by the AnsFlow API client and CLI.
//!
//! This crate contains:
//! - Domain types: the records the backend returns (Pipeline, AnsibleHost, DockerRegistry, etc.)
//! - DTOs: create/update request bodies sent to the backend
//! - The pagination envelope the list endpoints may wrap their results in
//! - Client side form validation applied before a request is issued
//! - Simulated statistics used when analytics endpoints are unavailable

#[macro_use]
mod macros;

pub mod analytics;
pub mod domain;
pub mod dto;
pub mod page;
pub mod validation;

pub use page::{ListResponse, Page};
pub use validation::{Validate, ValidationError};
