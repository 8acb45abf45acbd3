//! Realtime fan-out of domain events to connected admin feeds.

mod router;

pub use router::AlertRouter;
