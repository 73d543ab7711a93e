use std::any::type_name;
use std::cell::UnsafeCell;
use std::collections::VecDeque;
use std::fmt;
use std::ptr::{self, NonNull};

use parking_lot::Mutex;

use crate::{BoundedPoolBuilder, Lease, PoolError, Result};

/// The number of slots a pool reserves when no explicit capacity is configured.
pub const DEFAULT_CAPACITY: usize = 256;

/// A fixed-capacity thread-safe object pool.
///
/// The pool reserves a contiguous block of `capacity` default-constructed
/// values of `T` at construction time and never allocates again. Callers
/// [`acquire()`][1] exclusive [`Lease`]s to individual slots and
/// [`release()`][2] them when done, at which point the slot value is reset to
/// `T::default()` and queued for reuse. Slots are reused in FIFO order: the
/// slot released earliest is the next one handed out.
///
/// Any number of threads may operate on a shared pool. Only the free queue is
/// behind a lock; slot contents are reached through the lease without any
/// synchronization, because the lease itself guarantees exclusivity.
///
/// # Capacity
///
/// The capacity is fixed for the pool's lifetime. Acquiring from a pool with
/// no free slots fails immediately with [`PoolError::Depleted`] - the pool
/// never blocks and never grows. Choose the capacity for the peak number of
/// simultaneously outstanding leases.
///
/// # Item type requirements
///
/// `T` must implement [`Default`], which supplies both the initial value of
/// every slot and the value a slot is reset to on release. Types whose
/// default construction is cheap make the best pool items, as every release
/// pays for one. `T` must not be zero-sized.
///
/// # Example
///
/// ```rust
/// use bounded_pool::BoundedPool;
///
/// let pool = BoundedPool::<Vec<u8>>::with_capacity(2)?;
///
/// let mut first = pool.acquire()?;
/// let mut second = pool.acquire()?;
///
/// first.extend_from_slice(b"some payload");
/// second.extend_from_slice(b"another payload");
///
/// // Both slots are out on lease, so the pool is now depleted.
/// assert!(pool.acquire().is_err());
///
/// pool.release(first)?;
/// pool.release(second)?;
///
/// assert_eq!(pool.available(), pool.capacity());
/// # Ok::<(), bounded_pool::PoolError>(())
/// ```
///
/// [1]: Self::acquire
/// [2]: Self::release
pub struct BoundedPool<T> {
    /// Backing storage for every slot, allocated once at construction and
    /// never resized or relocated, so slot addresses are stable for the
    /// pool's lifetime.
    ///
    /// The values are in `UnsafeCell` to logically detach them from the pool
    /// object: leases reach slot contents through shared references to the
    /// pool, which is sound because exactly one lease per slot can exist and
    /// the pool itself never touches the contents of a leased slot.
    slots: Box<[UnsafeCell<T>]>,

    /// Indexes of the slots that are currently not leased out, in the order
    /// in which they became free. Acquisition pops the front and release
    /// pushes to the back, which is what produces the FIFO reuse order.
    free: Mutex<VecDeque<usize>>,
}

impl<T: Default> BoundedPool<T> {
    /// Creates a pool with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::{BoundedPool, DEFAULT_CAPACITY};
    ///
    /// let pool = BoundedPool::<u64>::new()?;
    ///
    /// assert_eq!(pool.capacity(), DEFAULT_CAPACITY);
    /// assert_eq!(pool.available(), DEFAULT_CAPACITY);
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AllocationFailed`] if the backing storage cannot
    /// be reserved.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a pool with exactly `capacity` slots.
    ///
    /// Every slot starts out free, holding `T::default()`. The whole backing
    /// block is reserved here; the pool performs no allocation after
    /// construction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<String>::with_capacity(16)?;
    ///
    /// assert_eq!(pool.capacity(), 16);
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AllocationFailed`] if the backing storage cannot
    /// be reserved.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        assert!(
            size_of::<T>() > 0,
            "BoundedPool must have non-zero item size"
        );

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| PoolError::AllocationFailed {
                requested: capacity,
                source,
            })?;
        slots.extend((0..capacity).map(|_| UnsafeCell::new(T::default())));

        // Seeded in ascending storage order, so a fresh pool hands out slot 0
        // first and walks the block front to back.
        let mut free = VecDeque::new();
        free.try_reserve_exact(capacity)
            .map_err(|source| PoolError::AllocationFailed {
                requested: capacity,
                source,
            })?;
        free.extend(0..capacity);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            free: Mutex::new(free),
        })
    }

    /// Starts building a new [`BoundedPool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the
    /// defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<u32>::builder().capacity(512).build()?;
    ///
    /// assert_eq!(pool.capacity(), 512);
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    pub fn builder() -> BoundedPoolBuilder<T> {
        BoundedPoolBuilder::new()
    }

    /// Returns a lease to its pool, making the slot available for reuse.
    ///
    /// The slot value is overwritten with `T::default()` before the slot
    /// re-enters the free queue, so nothing the previous holder wrote is
    /// visible to the next one. The reset happens through the lease's own
    /// exclusive access, outside the free-queue lock.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<String>::with_capacity(4)?;
    ///
    /// let mut lease = pool.acquire()?;
    /// lease.push_str("transient");
    ///
    /// pool.release(lease)?;
    /// assert_eq!(pool.available(), 4);
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ForeignLease`] if the lease was issued by a
    /// different pool. The pool is left unchanged in that case, but the lease
    /// is still consumed - the slot it referred to stays out of circulation
    /// in the pool that issued it.
    pub fn release(&self, lease: Lease<'_, T>) -> Result<()> {
        if !self.owns(&lease) {
            return Err(PoolError::ForeignLease);
        }

        // Erase whatever the caller wrote. The slot is not yet back in the
        // free queue, so the lease still has exclusive access to it.
        let mut lease = lease;
        *lease = T::default();

        // The lease must be gone before the index re-enters the queue - the
        // next acquire may hand the slot out immediately.
        let index = lease.index();
        drop(lease);

        self.free.lock().push_back(index);

        Ok(())
    }
}

impl<T> BoundedPool<T> {
    /// Leases a free slot out of the pool.
    ///
    /// Slots are handed out in the order they became free, so the slot
    /// released earliest is reused first. The returned [`Lease`] is the only
    /// access path to the slot until it is passed to [`release()`][1].
    ///
    /// This never blocks: if no slot is free at the moment of the call, the
    /// call fails immediately.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<u32>::with_capacity(8)?;
    ///
    /// let mut lease = pool.acquire()?;
    /// *lease = 7;
    ///
    /// assert_eq!(pool.available(), 7);
    /// # pool.release(lease)?;
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Depleted`] if every slot is currently leased out.
    ///
    /// [1]: Self::release
    pub fn acquire(&self) -> Result<Lease<'_, T>> {
        let index = self.free.lock().pop_front().ok_or(PoolError::Depleted)?;

        let slot = self
            .slots
            .get(index)
            .expect("free queue only ever contains indexes of slots that exist");

        // SAFETY: Pointers into a live allocation are never null.
        let slot = unsafe { NonNull::new_unchecked(slot.get()) };

        Ok(Lease::new(slot, index))
    }

    /// The total number of slots in the pool.
    ///
    /// This is fixed at construction and does not change for the pool's
    /// lifetime, regardless of lease activity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The number of slots that are currently free.
    ///
    /// Under concurrent use this is a snapshot: another thread may acquire or
    /// release a slot immediately after this returns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bounded_pool::BoundedPool;
    ///
    /// let pool = BoundedPool::<u32>::with_capacity(2)?;
    /// assert_eq!(pool.available(), 2);
    ///
    /// let lease = pool.acquire()?;
    /// assert_eq!(pool.available(), 1);
    ///
    /// pool.release(lease)?;
    /// assert_eq!(pool.available(), 2);
    /// # Ok::<(), bounded_pool::PoolError>(())
    /// ```
    #[must_use]
    pub fn available(&self) -> usize {
        self.free.lock().len()
    }

    /// Whether a lease refers to one of this pool's slots.
    ///
    /// The lease records the index it was issued for, so membership is the
    /// pair check: the index must be in range for our storage and the
    /// recorded pointer must be the address of exactly that slot. A lease
    /// from any other pool fails the pointer comparison because live
    /// allocations never overlap.
    fn owns(&self, lease: &Lease<'_, T>) -> bool {
        self.slots
            .get(lease.index())
            .is_some_and(|slot| ptr::eq(slot.get(), lease.slot_ptr().as_ptr()))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl<T> fmt::Debug for BoundedPool<T> {
    #[cfg_attr(test, mutants::skip)] // Debug output has no contract - mutations are meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("capacity", &self.capacity())
            .field("available", &self.available())
            .finish()
    }
}

// SAFETY: Slot values only cross threads inside leases, which require
// `T: Send` themselves; everything else the pool owns is plain data.
unsafe impl<T: Send> Send for BoundedPool<T> {}

// SAFETY: The free queue is guarded by the mutex and slot contents are only
// reachable through leases, of which exactly one per slot can exist. Sharing
// the pool therefore never produces conflicting access to a `T`, and the `T`s
// themselves move between threads only as `Send` permits. `T: Sync` is not
// required because no two threads can reach the same slot concurrently.
unsafe impl<T: Send> Sync for BoundedPool<T> {}
