mod queue;
mod stats;

pub use queue::DisputeQueue;
pub use stats::DisputeStats;
