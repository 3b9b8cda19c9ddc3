//! Face-descriptor registry operations.
//!
//! Composes the record store and the matcher into the four operations a
//! client sees: register, verify, list, delete. Every operation reloads
//! the full roster from the store, operates on it in memory, and (for
//! mutations) writes the full roster back. No state is cached between
//! operations; the persisted file is the sole source of truth.
//!
//! # Usage
//!
//! ```
//! use faceauth_registry::{Config, Registry, VerifyOutcome};
//!
//! let reg = Registry::with_memory_store(Config { threshold: 0.5 });
//! reg.register("alice", &[0.0, 0.0, 0.0]).unwrap();
//!
//! match reg.verify(&[0.0, 0.0, 0.0]).unwrap() {
//!     VerifyOutcome::Match { name, distance } => println!("{name} ({distance})"),
//!     VerifyOutcome::NoMatch { .. } => println!("no match"),
//! }
//! ```

mod error;
mod registry;

pub use error::RegistryError;
pub use registry::{Config, RegisterOutcome, Registry, VerifyOutcome};

pub use faceauth_matcher::DEFAULT_THRESHOLD;
