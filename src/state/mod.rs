//! State module for tracking pool progress
//!
//! # Components
//!
//! - `WorkerState`: Tracks the lifecycle of a single pool worker
//!   (idle, fetching, parsing, emitting, done)

mod worker_state;

pub use worker_state::WorkerState;
