pub mod catalog;
pub mod config;
pub mod cut;
pub mod error;
pub mod measurement;
pub mod report;
pub mod section;
pub mod slippage;
pub mod strands;

pub use crate::error::{ScResult, StrandCutError};
