//! Entity structs for the taskdeck domain.

mod task;

pub use task::{SYSTEM_PUSHER, Task};
