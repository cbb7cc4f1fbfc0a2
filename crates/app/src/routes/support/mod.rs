mod overview;
mod queue;

pub use overview::SupportOverview;
pub use queue::SupportQueue;
