#![allow(dead_code, unused_imports)]

pub mod fakes;
pub mod harness;

pub use fakes::*;
pub use harness::{build_engine, PipelineHarness};
