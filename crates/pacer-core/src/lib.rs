//! # pacer-core
//!
//! Core types, ID generation, and error types for Pacer.
//!
//! This crate provides the foundational types shared across all Pacer crates:
//! - Entity structs (tasks, drafts, cached rankings)
//! - Enums for priority, category, energy, status, and time of day
//! - ID prefix constants and generation
//! - Cross-cutting error types
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
