//! dormhub event bus.
//!
//! Provides the in-process publish/subscribe hub behind the realtime alert
//! feed:
//!
//! - [`EventBus`] — fan-out hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the canonical event envelope.

pub mod bus;

pub use bus::{DomainEvent, EventBus};
