// ABOUTME: Core types and constants for the LibreLinkUp glucose collector
// ABOUTME: Foundation crate with error taxonomy, wire schema models, and backend constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # LibreLinkUp Core
//!
//! Foundation crate providing shared types and constants for the LibreLinkUp
//! glucose collector. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `CollectorError` and the `ErrorKind` taxonomy
//! - **constants**: Regions, endpoints, request headers, and timeouts
//! - **models**: Backend wire schema and the canonical metric record

/// Error taxonomy for configuration, authentication, transport, and decoding failures
pub mod errors;

/// Backend constants organized by domain
pub mod constants;

/// Wire schema models and the canonical metric
pub mod models;

pub use errors::{CollectorError, CollectorResult, ErrorKind};
