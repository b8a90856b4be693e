//! State management module
//!
//! This module handles the active session and its persistence

pub mod claims;
pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use claims::{decode_claims, TokenClaims};
pub use context::{Session, SessionContext};
pub use storage::{SessionStore, FileSessionStore, MemorySessionStore};
