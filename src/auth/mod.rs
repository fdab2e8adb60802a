//! Authentication module.
//!
//! This module provides password hashing, account registration, credential
//! header parsing and token sessions.

mod credentials;
mod password;
mod registration;
mod session;

pub use credentials::{parse_basic, parse_bearer};
pub use password::{hash_password, verify_password, PasswordError};
pub use registration::{authenticate, register, RegistrationRequest};
pub use session::{MemorySessionStore, SessionStore, DEFAULT_SESSION_TTL_SECS};
