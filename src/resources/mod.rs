//! Idempotent filesystem primitives shared by the pipeline stages.
pub mod fs;
pub mod link;
