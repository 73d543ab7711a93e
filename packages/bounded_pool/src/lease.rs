use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::BoundedPool;

/// Exclusive access to one slot of a [`BoundedPool`].
///
/// A lease is created by [`BoundedPool::acquire()`] and gives the holder sole
/// access to the slot's value for as long as the lease exists. Access the
/// value through the [`Deref`]/[`DerefMut`] implementations.
///
/// A lease cannot be copied or cloned, so the slot it refers to has exactly
/// one user at any time. Returning the lease to its pool via
/// [`BoundedPool::release()`] consumes it, which also makes releasing the
/// same slot twice unrepresentable.
///
/// The lease borrows the pool, so the borrow checker guarantees that no lease
/// can outlive the pool that issued it.
///
/// # Leaking
///
/// Dropping a lease without releasing it does not return the slot to the
/// pool - the slot simply stays out of circulation until the pool itself is
/// dropped. Always route leases back through [`BoundedPool::release()`].
///
/// # Example
///
/// ```rust
/// use bounded_pool::BoundedPool;
///
/// let pool = BoundedPool::<String>::new()?;
///
/// let mut lease = pool.acquire()?;
/// lease.push_str("scratch space");
/// assert_eq!(&*lease, "scratch space");
///
/// pool.release(lease)?;
/// # Ok::<(), bounded_pool::PoolError>(())
/// ```
#[must_use = "a lease that is dropped instead of released takes its slot out of circulation"]
pub struct Lease<'pool, T> {
    /// Points directly at the slot value inside the pool's storage block.
    /// Valid for the whole lifetime of the lease because the storage is never
    /// resized or relocated while the pool is alive.
    slot: NonNull<T>,

    /// Position of the slot in the pool's storage. The pool uses this to
    /// return the slot to its free queue on release.
    index: usize,

    _pool: PhantomData<&'pool BoundedPool<T>>,
}

impl<T> Lease<'_, T> {
    #[must_use]
    pub(crate) fn new(slot: NonNull<T>, index: usize) -> Self {
        Self {
            slot,
            index,
            _pool: PhantomData,
        }
    }

    #[must_use]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub(crate) fn slot_ptr(&self) -> NonNull<T> {
        self.slot
    }
}

impl<T> Deref for Lease<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: The pool issues exactly one lease per slot and does not touch
        // slot contents while the lease is outstanding, so we are the only
        // party able to reach this value. The pointer stays valid because the
        // lease cannot outlive the pool.
        unsafe { self.slot.as_ref() }
    }
}

impl<T> DerefMut for Lease<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: As in `deref()` - the lease is the sole access path to the
        // slot, so handing out an exclusive reference cannot conflict.
        unsafe { self.slot.as_mut() }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl<T> fmt::Debug for Lease<'_, T> {
    #[cfg_attr(test, mutants::skip)] // Debug output has no contract - mutations are meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("slot", &self.slot)
            .field("index", &self.index)
            .finish()
    }
}

// SAFETY: A lease is the sole access path to its slot, equivalent to holding
// `&mut T`, so it may move to another thread whenever the value itself may.
unsafe impl<T: Send> Send for Lease<'_, T> {}

// SAFETY: A shared reference to a lease only yields `&T`, so sharing a lease
// across threads is sharing `&T`.
unsafe impl<T: Sync> Sync for Lease<'_, T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use crate::{BoundedPool, Lease};

    assert_impl_all!(Lease<'static, u32>: Send, Sync);

    // `Cell` can move between threads but cannot be shared across them, and a
    // lease of one must inherit exactly that.
    assert_impl_all!(Lease<'static, Cell<u32>>: Send);
    assert_not_impl_any!(Lease<'static, Cell<u32>>: Sync);

    #[test]
    fn reads_and_writes_reach_the_slot() {
        let pool = BoundedPool::<u32>::with_capacity(1).expect("capacity 1 must be reservable");

        let mut lease = pool.acquire().expect("fresh pool has a free slot");
        assert_eq!(*lease, 0);

        *lease = 42;
        assert_eq!(*lease, 42);

        pool.release(lease).expect("lease came from this pool");
    }
}
