// ABOUTME: LibreLinkUp API access: request codec, session store, and the REST client
// ABOUTME: Everything that talks to the backend over HTTP lives under this module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// REST client with single-shot re-authentication
pub mod client;
/// Header and body envelope construction
pub mod codec;
/// Per-collector session state
pub mod session;

pub use client::{AuthMode, LibreLinkUpClient};
pub use codec::{Envelope, RequestCodec};
pub use session::{Session, SessionStore};
