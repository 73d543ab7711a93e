use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur when constructing or operating a [`BoundedPool`][1].
///
/// [1]: crate::BoundedPool
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PoolError {
    /// The backing storage for the requested number of slots could not be reserved.
    ///
    /// This can only happen at construction time - once built, the pool performs
    /// no further allocation.
    #[error("failed to reserve backing storage for {requested} slots")]
    AllocationFailed {
        /// The number of slots the pool attempted to reserve storage for.
        requested: usize,

        /// The reservation failure reported by the allocation substrate.
        #[source]
        source: TryReserveError,
    },

    /// Every slot of the pool is currently leased out.
    ///
    /// The operation fails immediately - the pool never waits for a slot to be
    /// released. The caller decides whether to retry, shed load or fall back to
    /// a different allocation strategy.
    #[error("all slots of the pool are currently leased out")]
    Depleted,

    /// The presented lease was not issued by this pool.
    ///
    /// This indicates a bug in the calling code: a lease was routed back to a
    /// pool other than the one that issued it. The pool that did issue the
    /// lease permanently loses the slot, as the lease is consumed by the
    /// failed release.
    #[error("the lease was issued by a different pool")]
    ForeignLease,
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`PoolError`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, PoolError>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(PoolError: Send, Sync, Debug);

    #[test]
    fn depleted_is_error() {
        let error = PoolError::Depleted;

        // Verify it is a valid error that can be used in Result context.
        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }

    #[test]
    fn display_names_the_problem() {
        assert!(PoolError::Depleted.to_string().contains("leased out"));
        assert!(
            PoolError::ForeignLease
                .to_string()
                .contains("different pool")
        );
    }
}
