//! Query interfaces over an in-memory position snapshot.
//!
//! Each query struct borrows the snapshot held by the
//! [`InventorySdk`](crate::InventorySdk) and returns owned or borrowed results
//! without touching the network.

pub mod positions;

pub use positions::{Page, PositionQuery};
