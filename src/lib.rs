//! BookLedger - A tamper-evident append-only ledger for library book issuance
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`ledger`] - Block hashing, chain construction, append, validation
//! - [`record`] - Typed book-issue payloads and boundary validation
//!
//! ## State Management
//! - [`persistence`] - Durable storage backends (JSON file, in-memory)
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! Blocks are frozen once hashed; the ledger grows monotonically from a
//! genesis block, and `is_valid` detects any retroactive edit by recomputing
//! hashes and re-checking predecessor links. Persistence is an explicit step:
//! callers load a ledger once at session start and save after each append.

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod ledger;
pub mod record;

// ============================================================================
// State Management
// ============================================================================
pub mod persistence;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
