//! Inter-task communication channels
//!
//! The touch task publishes into [`TOUCH`]; the render task reads the
//! snapshot, drains touch events and applies [`UI_COMMANDS`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use glint_drivers::touch::{SharedRegions, TouchShared};

use crate::ui::UiCommand;

/// Touch region slots
pub const REGION_SLOTS: usize = 8;

/// Channel capacity for classified touch events
const TOUCH_EVENT_DEPTH: usize = 16;

/// Channel capacity for UI commands from region callbacks
const UI_COMMAND_DEPTH: usize = 4;

pub type Regions = SharedRegions<'static, CriticalSectionRawMutex, REGION_SLOTS>;

/// Touch state, regions and event stream shared with the sampler
pub static TOUCH: TouchShared<'static, CriticalSectionRawMutex, REGION_SLOTS, TOUCH_EVENT_DEPTH> =
    TouchShared::new();

/// Button presses waiting for the render task
pub static UI_COMMANDS: Channel<CriticalSectionRawMutex, UiCommand, UI_COMMAND_DEPTH> =
    Channel::new();
