//! Infrastructure Layer
//!
//! In-memory store implementations. Anything durable (a database, a
//! shared session backend) would slot in here behind the same traits.

pub mod memory;

pub use memory::{ClientSession, InMemorySessionStore, InMemoryUserStore};
