//! Concrete adapters for consensus ports.

pub mod ledger_vote;

pub use ledger_vote::LedgerVoteSource;
