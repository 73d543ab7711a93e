//! Basic usage of the `bounded_pool` crate:
//!
//! * Creating a pool.
//! * Acquiring leases.
//! * Working with leased values.
//! * Releasing leases back to the pool.

use bounded_pool::{BoundedPool, PoolError};

fn main() -> Result<(), PoolError> {
    // Every slot is reserved and default-constructed right here; the pool
    // will never allocate again.
    let pool = BoundedPool::<String>::with_capacity(4)?;

    println!(
        "Pool holds {} slots, {} of them free",
        pool.capacity(),
        pool.available()
    );

    // A lease is exclusive access to one slot. Use it like a `&mut String`.
    let mut greeting = pool.acquire()?;
    greeting.push_str("Hello, pool!");
    println!("Leased slot contains: {}", &*greeting);

    // Leases can be held concurrently, each referring to its own slot.
    let mut other = pool.acquire()?;
    other.push_str("Another slot entirely");
    println!(
        "Two leases outstanding, {} slots still free",
        pool.available()
    );

    // Releasing resets the slot to its default value and queues it for
    // reuse. Slots are reused in the order they were released.
    pool.release(greeting)?;
    pool.release(other)?;

    let recycled = pool.acquire()?;
    println!(
        "Recycled slot starts fresh: {:?} (empty again)",
        &*recycled
    );
    pool.release(recycled)?;

    // Acquisition never blocks. Once the pool is depleted, it says so.
    let leases = (0..pool.capacity())
        .map(|_| pool.acquire())
        .collect::<Result<Vec<_>, _>>()?;

    match pool.acquire() {
        Err(PoolError::Depleted) => println!("Pool is depleted, as expected"),
        Err(other) => println!("Unexpected error: {other}"),
        Ok(_) => println!("Unexpected spare slot"),
    }

    for lease in leases {
        pool.release(lease)?;
    }

    println!("All slots returned, {} free again", pool.available());

    Ok(())
}
