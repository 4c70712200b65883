//! # cx-01-consensus
//!
//! Checkpoint consensus protocol for the Colossus training core.
//!
//! ## Overview
//!
//! Before a training checkpoint is persisted, the cluster votes on its
//! content hash. A round snapshots the registered node set, solicits one
//! ballot per node through the [`ports::outbound::VoteSource`] port, and
//! agrees when the approving fraction meets the configured threshold
//! (`>=`, boundary inclusive).
//!
//! ```text
//! Guardian (2) ──initiate_consensus(hash, step)──→ Consensus (1)
//!                                                      │
//!                                    fan-out ballots via VoteSource
//!                                                      │
//!                                    tally ──→ Agreed / Rejected / Timeout
//! ```
//!
//! ## Failure semantics
//!
//! - Zero registered nodes resolves to a `Rejected` round with
//!   `total_nodes = 0` and `fraction = 0`: an empty quorum never
//!   silently succeeds, and never divides by zero.
//! - A node whose ballot cannot be collected counts as a dissent; only
//!   the round time budget expiring yields `Timeout`.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::LedgerVoteSource;
pub use domain::{CheckpointConsensus, CheckpointVote, ConsensusState};
pub use error::{ConsensusError, ConsensusResult};
pub use ports::inbound::ConsensusApi;
pub use ports::outbound::VoteSource;
pub use service::{ConsensusConfig, ConsensusService};
