//! Repositories over the slot storage.
//!
//! Each repository owns its slot and rewrites it wholesale on every mutation.

pub mod task;
