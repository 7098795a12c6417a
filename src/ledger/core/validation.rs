use crate::ledger::core::block::Block;

/// Full-chain scan over blocks in index order, starting at index 1. The
/// genesis block has no predecessor and is trusted axiomatically.
///
/// Each non-genesis block must satisfy both checks:
/// - its stored hash matches a fresh recomputation over its stored fields
///   (catches in-place edits to payload, index, timestamp, or link), and
/// - its `previous_hash` matches the stored hash of the block before it
///   (catches re-linking, substitution, reordering, and deletion-and-splice).
///
/// Short-circuits on the first failure; the observable result is the same as
/// a full scan.
pub fn verify_chain(blocks: &[Block]) -> bool {
    for pair in blocks.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        if curr.hash() != curr.compute_hash() {
            return false;
        }

        if curr.previous_hash() != prev.hash() {
            return false;
        }
    }
    true
}
