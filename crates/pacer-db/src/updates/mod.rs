//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields are applied; nested `Option<Option<_>>` distinguishes "leave alone"
//! from "clear".

pub mod task;

pub use task::{TaskUpdate, TaskUpdateBuilder};
