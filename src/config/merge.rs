//! Config composition: default layer and merge orchestration.

pub(crate) mod policy;
pub mod service;
