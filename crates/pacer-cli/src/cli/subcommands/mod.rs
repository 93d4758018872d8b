mod cache;
mod task;

pub use cache::CacheCommands;
pub use task::TaskCommands;
