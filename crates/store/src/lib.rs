//! linkd record store
//!
//! Durable, append-only persistence for classified link batches:
//!
//! - A primary JSON-lines log of finished [`Record`]s.
//! - A pending JSON-lines log of [`PendingRecord`]s - batches accepted
//!   while the service was shutting down, replayed on the next startup.
//! - Startup recovery of the last used record identifier, seeding the
//!   [`IdAllocator`].
//!
//! One mutex per store serializes all file access; the allocator is owned
//! by the store and driven under that lock, so identifiers are committed in
//! log order. See [`FileStore`] for the operation contracts.
//!
//! A documented limitation carried over from the design: recovery scans
//! only the primary log, so identifiers consumed by pending records in a
//! previous run are not accounted for - replay stamps pending batches with
//! fresh identifiers and the originals are superseded.

mod alloc;
mod error;
mod record;
mod store;

pub use alloc::IdAllocator;
pub use error::{Result, StoreError};
pub use record::{LinkStatus, LinkStatuses, PendingRecord, Record};
pub use store::{FileStore, StoreConfig};
