//! Domain types shared by the Chaotix API server and generation worker.
//!
//! Nothing in here touches the network or the database: prompt batch
//! parsing, the batch handle codec, image filename derivation and the
//! job state vocabulary all live here so both binaries agree on them.

pub mod error;
pub mod job;
pub mod naming;
pub mod prompts;
pub mod types;
