// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fork/join fan-out for the parallel phases of a tick.
//!
//! Items are split into contiguous virtual shards. Workers claim shards
//! through an atomic counter (work-stealing) and each produces results only
//! for the shards it claimed, so there is no shared mutable state. Results
//! are reassembled by shard index, which makes the output order identical
//! to the input order whatever the schedule.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of virtual shards a phase is split into.
pub const NUM_SHARDS: usize = 64;

/// Maps `f` over `items` with up to `workers` threads.
///
/// `workers` is capped at [`NUM_SHARDS`]; zero is treated as one. With a
/// single worker, or fewer than two items, the map runs on the calling
/// thread. A panic in any worker is resumed on the caller.
pub fn fan_out<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = workers.clamp(1, NUM_SHARDS);
    if workers == 1 || items.len() < 2 {
        return items.iter().map(f).collect();
    }

    let chunk = items.len().div_ceil(NUM_SHARDS);
    let shards: Vec<&[T]> = items.chunks(chunk).collect();
    let next_shard = AtomicUsize::new(0);

    let finished: Vec<Vec<(usize, Vec<R>)>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..workers.min(shards.len()))
            .map(|_| {
                let shards = &shards;
                let next_shard = &next_shard;
                let f = &f;
                s.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        let shard_id = next_shard.fetch_add(1, Ordering::Relaxed);
                        let Some(shard) = shards.get(shard_id) else {
                            break;
                        };
                        done.push((shard_id, shard.iter().map(f).collect()));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(done) => done,
                Err(e) => std::panic::resume_unwind(e),
            })
            .collect()
    });

    let mut by_shard: Vec<Vec<R>> = (0..shards.len()).map(|_| Vec::new()).collect();
    for (shard_id, results) in finished.into_iter().flatten() {
        by_shard[shard_id] = results;
    }
    by_shard.into_iter().flatten().collect()
}
