//! Ports (hexagonal boundaries) for the consensus subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::ConsensusApi;
pub use outbound::VoteSource;
