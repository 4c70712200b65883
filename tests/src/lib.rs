//! # Colossus Training-Core Test Suite
//!
//! Unified test crate for cross-subsystem flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── checkpoint_flow.rs    # consensus ↔ guardian ↔ disk
//!     ├── verification_flow.rs  # gate ↔ verifier ↔ audit chain
//!     └── training_flow.rs      # full trainer orchestration
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cx-tests
//!
//! # By flow
//! cargo test -p cx-tests integration::checkpoint_flow
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
