//! Entity structs for all Pacer domain objects.
//!
//! Tasks and the priority cache entry are persisted as JSON in named storage
//! slots (see `pacer-db`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod draft;
mod priority_cache;
mod task;

pub use draft::TaskDraft;
pub use priority_cache::{CachedReason, PriorityCacheEntry};
pub use task::Task;
