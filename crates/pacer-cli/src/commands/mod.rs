pub mod cache;
pub mod dispatch;
pub mod rank;
pub mod shared;
pub mod stats;
pub mod task;
