//! ID prefix constants.
//!
//! Server-generated IDs have the form `{prefix}-{8 hex chars}`, e.g.
//! `tsk-a3f8b2c1`. Callers may also supply their own IDs on create.

/// Prefix for server-generated task IDs.
pub const PREFIX_TASK: &str = "tsk";
