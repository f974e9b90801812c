//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod render;
pub mod touch;

pub use render::render_task;
pub use touch::touch_task;
