//! # deck-core
//!
//! Core types for the taskdeck board.
//!
//! This crate provides the foundational types shared across all taskdeck
//! crates:
//! - The `Task` entity
//! - Status and priority enums with the one-step status cycle
//! - ID prefix constants
//! - The aggregate stats type

pub mod entities;
pub mod enums;
pub mod ids;
pub mod stats;
