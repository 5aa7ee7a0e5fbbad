//! Backward/forward entry-speed reconciliation.

use super::block::MotionBlock;
use super::buffer::BlockRing;

/// Reassign entry speeds from the block at `last` back to the first optimal
/// (or executing) block, then forward again capping unreachable entries.
///
/// `last` is the newest block and may be the not-yet-committed pending slot.
/// Returns `true` when the forward pass started at the executing block, in
/// which case its exit speed may have changed.
pub(crate) fn recalculate<const N: usize, const CAP: usize>(
    ring: &mut BlockRing<MotionBlock<N>, CAP>,
    last: usize,
) -> bool {
    let first = ring.read_index();
    if last == first {
        return false;
    }

    let newest = ring.slot_mut(last);
    if newest.optimal {
        return false;
    }
    newest.entry_feed_sqr = if newest.is_dwell() {
        0.0
    } else {
        newest.entry_max_feed_sqr.min(newest.speed_change_sqr())
    };

    // backward pass
    let mut next = last;
    let mut block = ring.prev(last);
    while block != first && !ring.slot(block).optimal {
        let next_entry = ring.slot(next).entry_feed_sqr;
        let current = ring.slot_mut(block);
        current.entry_feed_sqr = if current.is_dwell() {
            0.0
        } else {
            current
                .entry_max_feed_sqr
                .min(next_entry + current.speed_change_sqr())
        };
        next = block;
        block = ring.prev(block);
    }

    let touched_first = block == first;
    trace!("recalculate: backward pass stopped at {}", block);

    // forward pass
    while block != last {
        let current = *ring.slot(block);
        let following = ring.slot_mut(next);
        if current.entry_feed_sqr < following.entry_feed_sqr {
            let reachable = current.entry_feed_sqr + current.speed_change_sqr();
            if reachable < following.entry_feed_sqr {
                following.entry_feed_sqr = reachable;
                following.optimal = true;
            }
        }
        block = next;
        next = ring.next(block);
    }

    touched_first
}
