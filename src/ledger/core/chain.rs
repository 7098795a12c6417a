use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{LedgerError, Result};
use crate::ledger::core::block::{canonical_timestamp, Block, GENESIS_PREVIOUS_HASH};
use crate::ledger::core::validation::verify_chain;
use crate::record::{FIELD_BOOK_TITLE, FIELD_BORROWER, FIELD_DATE_ISSUED};

/// Append-only chain of [`Block`]s. Index 0 is always the genesis block, so a
/// constructed ledger is never empty.
///
/// The ledger exclusively owns its blocks; appends extend the in-memory
/// sequence only, and persisting the result is a separate explicit step
/// through a [`LedgerStore`].
///
/// [`LedgerStore`]: crate::persistence::LedgerStore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    blocks: Vec<Block>,
}

impl Ledger {
    /// Create a ledger containing only a freshly generated genesis block.
    pub fn new() -> Self {
        Ledger {
            blocks: vec![Self::create_genesis_block()],
        }
    }

    fn create_genesis_block() -> Block {
        let now = Utc::now();
        let mut data = BTreeMap::new();
        data.insert(FIELD_BOOK_TITLE.to_string(), "Genesis Book".to_string());
        data.insert(FIELD_BORROWER.to_string(), "Library".to_string());
        data.insert(FIELD_DATE_ISSUED.to_string(), canonical_timestamp(&now));
        Block::new(0, data, now, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Rebuild a ledger from persisted blocks, trusting stored hashes as-is.
    ///
    /// An empty sequence cannot have come from a saved ledger (genesis
    /// guarantees length >= 1) and is rejected as a malformed record.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(LedgerError::MalformedRecord(
                "record contains no blocks".to_string(),
            ));
        }
        Ok(Ledger { blocks })
    }

    /// Append a new entry carrying `data`, linked to the current latest block.
    ///
    /// The core accepts any payload mapping; rejecting issues with missing
    /// required fields happens before this call, at the [`BookIssue`]
    /// boundary.
    ///
    /// [`BookIssue`]: crate::record::BookIssue
    pub fn append(&mut self, data: BTreeMap<String, String>) -> &Block {
        let latest = self.latest();
        let block = Block::new(
            latest.index() + 1,
            data,
            Utc::now(),
            latest.hash().to_string(),
        );
        self.blocks.push(block);
        self.latest()
    }

    /// The block with the highest index.
    ///
    /// Genesis construction guarantees non-emptiness; an empty ledger here is
    /// an invariant violation, not a recoverable error.
    pub fn latest(&self) -> &Block {
        self.blocks
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in index order, for display and persistence.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Full-chain integrity scan. `false` means a block's stored hash no
    /// longer matches its contents, or a link to a predecessor is broken.
    /// A failed scan does not block further reads or appends; this ledger
    /// detects tampering, it never repairs it.
    pub fn is_valid(&self) -> bool {
        verify_chain(&self.blocks)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
