//! Patch types for partial task mutations.
//!
//! The patch struct enumerates every updatable field as an `Option`. Only
//! `Some` fields generate SET clauses in the dynamic UPDATE SQL, so the set
//! of updatable fields is statically checked rather than assembled by
//! runtime inspection of a loosely-typed payload.

pub mod task;
