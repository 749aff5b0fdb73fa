pub mod cli;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod store;

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
pub(crate) mod fixtures;
