//! linkd record processing
//!
//! The core of the service: take a batch of link strings, classify each
//! link's reachability, and hand the finished record to the store.
//!
//! # Components
//!
//! - [`Prober`]: one HEAD probe per link with a single GET fallback;
//!   transport failures become `not available`, never errors.
//! - [`Processor`]: the per-batch pipeline with two explicit cancellation
//!   scopes (service shutdown and request deadline).
//! - [`Processor::replay_pending`]: the startup drain that converts
//!   batches parked during a previous shutdown into finished records.
//!
//! # Cancellation
//!
//! Both scopes are `tokio_util::sync::CancellationToken`s passed into
//! [`Processor::process`], so tests drive each independently:
//!
//! ```ignore
//! let shutdown = CancellationToken::new();
//! let request = CancellationToken::new();
//! let outcome = processor.process(&shutdown, &request, &links).await?;
//! ```

mod error;
mod pipeline;
mod prober;
mod replay;

pub mod test_util;

pub use error::{Result, ServiceError};
pub use pipeline::{Processed, Processor};
pub use prober::{Probe, Prober};
pub use replay::ReplayStats;
