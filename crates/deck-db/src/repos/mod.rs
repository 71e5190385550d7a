//! Repository methods, implemented as `impl DeckDb` blocks per entity.

mod task;

pub use task::NewTask;
