use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// `previous_hash` value carried by the genesis block, which has no predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// One committed ledger entry.
///
/// A block is frozen once its hash is computed: the fields are private and
/// only constructors and readers are exposed, so nothing downstream can edit
/// an entry without the edit being visible to [`Ledger::is_valid`].
///
/// [`Ledger::is_valid`]: crate::ledger::Ledger::is_valid
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    index: u64,
    data: BTreeMap<String, String>,
    timestamp: DateTime<Utc>,
    previous_hash: String,
    hash: String,
}

impl Block {
    /// Construct a block and compute its hash over the canonical encoding.
    pub fn new(
        index: u64,
        data: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
        previous_hash: String,
    ) -> Self {
        let mut block = Block {
            index,
            data,
            timestamp,
            previous_hash,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Restore a block from persisted fields.
    ///
    /// The supplied hash is trusted verbatim and NOT recomputed here; a stale
    /// or edited hash stays in place so that a later [`Ledger::is_valid`] scan
    /// can still detect tampering of the durable record.
    ///
    /// [`Ledger::is_valid`]: crate::ledger::Ledger::is_valid
    pub fn from_parts(
        index: u64,
        data: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
        previous_hash: String,
        hash: String,
    ) -> Self {
        Block {
            index,
            data,
            timestamp,
            previous_hash,
            hash,
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Canonical string form of the creation time, as used in hashing.
    pub fn canonical_timestamp(&self) -> String {
        canonical_timestamp(&self.timestamp)
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// Hex digest stored at construction (or restored verbatim from disk).
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    /// Re-run the canonical-encode-and-hash procedure over the current stored
    /// fields. Pure; used by validation to cross-check the stored hash.
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_encoding().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Canonical encoding of the hashed fields: a single JSON object with
    /// keys sorted lexicographically at every level, so two logically
    /// identical payloads always produce byte-identical encodings regardless
    /// of insertion order.
    fn canonical_encoding(&self) -> String {
        let payload: serde_json::Map<String, serde_json::Value> = self
            .data
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        let mut doc = serde_json::Map::new();
        doc.insert("data".to_string(), serde_json::Value::Object(payload));
        doc.insert("index".to_string(), serde_json::Value::from(self.index));
        doc.insert(
            "previous_hash".to_string(),
            serde_json::Value::String(self.previous_hash.clone()),
        );
        doc.insert(
            "timestamp".to_string(),
            serde_json::Value::String(self.canonical_timestamp()),
        );
        serde_json::Value::Object(doc).to_string()
    }
}

/// RFC 3339 with microsecond precision and a `Z` suffix.
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}
