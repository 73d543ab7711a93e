#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A fixed-capacity, thread-safe object pool.
//!
//! This crate provides [`BoundedPool`], a pool that reserves a contiguous
//! block of default-constructed items at construction time and then hands out
//! exclusive [`Lease`]s to individual slots. Releasing a lease resets the slot
//! to its default value and queues it for reuse, so workloads that churn
//! through many short-lived objects of one type avoid repeated allocation
//! entirely.
//!
//! # Key features
//!
//! - **Fixed capacity**: all storage is reserved up front; the pool never
//!   grows, shrinks or relocates its slots.
//! - **Thread-safe**: any number of threads may acquire and release leases on
//!   a shared pool. Only the free queue is behind a lock; slot contents are
//!   reached through the lease without synchronization.
//! - **FIFO reuse**: slots are re-issued in the order they were released,
//!   which keeps acquisition order reproducible.
//! - **Non-blocking**: acquiring from a depleted pool fails immediately with
//!   [`PoolError::Depleted`] instead of waiting for a release.
//! - **Reset on release**: a released slot is overwritten with `T::default()`
//!   before it can be leased again, so no state leaks between leases.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```rust
//! use bounded_pool::BoundedPool;
//!
//! let pool = BoundedPool::<String>::with_capacity(4)?;
//!
//! let mut lease = pool.acquire()?;
//! lease.push_str("no allocation needed next time");
//!
//! pool.release(lease)?;
//!
//! // The slot is back in circulation, reset to an empty string.
//! let lease = pool.acquire()?;
//! assert!(lease.is_empty());
//! # pool.release(lease)?;
//! # Ok::<(), bounded_pool::PoolError>(())
//! ```
//!
//! ## Sharing a pool across threads
//!
//! ```rust
//! use std::thread;
//!
//! use bounded_pool::BoundedPool;
//!
//! let pool = BoundedPool::<Vec<u8>>::with_capacity(16)?;
//!
//! thread::scope(|s| {
//!     for worker in 0..8_u8 {
//!         let pool = &pool;
//!
//!         s.spawn(move || {
//!             let mut buffer = pool.acquire().expect("pool has a slot per worker");
//!             buffer.push(worker);
//!             pool.release(buffer).expect("lease came from this pool");
//!         });
//!     }
//! });
//!
//! assert_eq!(pool.available(), pool.capacity());
//! # Ok::<(), bounded_pool::PoolError>(())
//! ```

mod builder;
mod error;
mod lease;
mod pool;

pub use builder::*;
pub use error::PoolError;
pub(crate) use error::Result;
pub use lease::*;
pub use pool::*;
