use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{BoundedPool, DEFAULT_CAPACITY, Result};

/// Builder for creating an instance of [`BoundedPool`].
///
/// You only need to use this builder if you want to customize the pool
/// configuration. The default configuration used by [`BoundedPool::new()`][1]
/// is sufficient for most use cases.
///
/// # Examples
///
/// ```
/// use bounded_pool::BoundedPool;
///
/// let pool = BoundedPool::<u32>::builder().capacity(64).build()?;
///
/// assert_eq!(pool.capacity(), 64);
/// # Ok::<(), bounded_pool::PoolError>(())
/// ```
///
/// [1]: BoundedPool::new
#[must_use]
pub struct BoundedPoolBuilder<T> {
    capacity: usize,

    _item: PhantomData<T>,
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl<T> fmt::Debug for BoundedPoolBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", type_name::<T>()),
            )
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> BoundedPoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            _item: PhantomData,
        }
    }

    /// Sets the number of slots the pool preallocates.
    ///
    /// This is the one and only capacity the pool will ever have - it cannot
    /// be changed after the pool is built. Defaults to [`DEFAULT_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<u32>::builder().capacity(8).build()?;
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl<T: Default> BoundedPoolBuilder<T> {
    /// Builds the pool with the specified configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<u32>::builder().build()?;
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AllocationFailed`][1] if the backing storage
    /// cannot be reserved.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    ///
    /// [1]: crate::PoolError::AllocationFailed
    pub fn build(self) -> Result<BoundedPool<T>> {
        BoundedPool::with_capacity(self.capacity)
    }
}
