//! Media control screen
//!
//! Four buttons along the bottom edge. Each button is a touch region
//! whose callback only posts a [`UiCommand`]; the render task applies
//! commands and redraws, so nothing on the touch side ever reaches the
//! display bus.
//!
//! ```text
//! ┌────────────────────────┐
//! │                        │
//! │     status / cursor    │
//! │                        │
//! ├─────┬─────┬─────┬──────┤
//! │ |<< │ >|| │  [] │ >>|  │
//! └─────┴─────┴─────┴──────┘
//! ```

use defmt::*;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, Triangle};
use glint_core::touch::{Region, RegionError, ScreenPoint, TouchHandler, TouchState};

use crate::channels::{Regions, UI_COMMANDS};
use crate::config::PANEL;

/// What a button press asks the render task to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum UiCommand {
    Previous,
    PlayPause,
    Stop,
    Next,
}

impl UiCommand {
    pub fn from_region(name: &str) -> Option<Self> {
        BUTTONS
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.command)
    }
}

struct Button {
    name: &'static str,
    command: UiCommand,
    slot: u16,
}

const BUTTONS: [Button; 4] = [
    Button {
        name: "prev",
        command: UiCommand::Previous,
        slot: 0,
    },
    Button {
        name: "play",
        command: UiCommand::PlayPause,
        slot: 1,
    },
    Button {
        name: "stop",
        command: UiCommand::Stop,
        slot: 2,
    },
    Button {
        name: "next",
        command: UiCommand::Next,
        slot: 3,
    },
];

const BAR_HEIGHT: u16 = 64;
const TRACKS: u8 = 8;

const BACKGROUND: Rgb888 = Rgb888::new(0x10, 0x12, 0x18);
const BUTTON: Rgb888 = Rgb888::new(0x2A, 0x30, 0x3C);
const BUTTON_PRESSED: Rgb888 = Rgb888::new(0x3C, 0x8C, 0xDC);
const ICON: Rgb888 = Rgb888::new(0xF0, 0xF0, 0xF0);
const CURSOR: Rgb888 = Rgb888::new(0xFF, 0xB0, 0x20);

impl Button {
    fn region(&self) -> Region {
        let width = PANEL.width / BUTTONS.len() as u16;
        Region::new(
            self.slot * width,
            PANEL.height - BAR_HEIGHT,
            width,
            BAR_HEIGHT,
        )
    }
}

fn on_button(name: &str, _point: ScreenPoint) {
    if let Some(command) = UiCommand::from_region(name) {
        if UI_COMMANDS.try_send(command).is_err() {
            warn!("UI command queue full, dropped {}", command);
        }
    }
}

static ON_BUTTON: fn(&str, ScreenPoint) = on_button;

/// Register every button as a touch region
pub fn register_buttons(regions: &Regions) -> Result<(), RegionError> {
    for button in &BUTTONS {
        regions.register(button.name, button.region(), &ON_BUTTON)?;
    }
    Ok(())
}

/// Player state owned by the render task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub playing: bool,
    pub track: u8,
}

impl UiState {
    pub fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::Previous => self.track = (self.track + TRACKS - 1) % TRACKS,
            UiCommand::Next => self.track = (self.track + 1) % TRACKS,
            UiCommand::PlayPause => self.playing = !self.playing,
            UiCommand::Stop => self.playing = false,
        }
    }
}

/// Logs raw press / release on the sampling side
pub struct TouchLog;

impl TouchHandler for TouchLog {
    fn on_down(&mut self, point: ScreenPoint) {
        debug!("touch down at ({}, {})", point.x, point.y);
    }

    fn on_up(&mut self, point: ScreenPoint) {
        debug!("touch up at ({}, {})", point.x, point.y);
    }
}

/// Draw the whole screen
pub fn draw<D>(target: &mut D, state: &UiState, touch: TouchState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(BACKGROUND)?;

    // Track indicator: one pip per track, current one filled
    for i in 0..TRACKS {
        let style = if i == state.track {
            PrimitiveStyle::with_fill(ICON)
        } else {
            PrimitiveStyle::with_stroke(ICON, 1)
        };
        Circle::new(Point::new(24 + i32::from(i) * 24, 40), 12)
            .into_styled(style)
            .draw(target)?;
    }

    // Big play state glyph in the middle
    let center = Point::new(i32::from(PANEL.width) / 2, 150);
    if state.playing {
        draw_pause(target, center, 36)?;
    } else {
        draw_play(target, center, 36)?;
    }

    for button in &BUTTONS {
        let region = button.region();
        let pressed = touch.touching && region.contains(touch.point);
        let rect = Rectangle::new(
            Point::new(i32::from(region.x) + 2, i32::from(region.y) + 2),
            Size::new(u32::from(region.width) - 4, u32::from(region.height) - 4),
        );
        rect.into_styled(PrimitiveStyle::with_fill(if pressed {
            BUTTON_PRESSED
        } else {
            BUTTON
        }))
        .draw(target)?;

        let c = rect.center();
        match button.command {
            UiCommand::Previous => {
                draw_bar(target, c - Point::new(12, 0), 12)?;
                draw_arrow(target, c + Point::new(4, 0), 12, false)?;
            }
            UiCommand::PlayPause if state.playing => draw_pause(target, c, 12)?,
            UiCommand::PlayPause => draw_play(target, c, 12)?,
            UiCommand::Stop => {
                Rectangle::with_center(c, Size::new(20, 20))
                    .into_styled(PrimitiveStyle::with_fill(ICON))
                    .draw(target)?;
            }
            UiCommand::Next => {
                draw_arrow(target, c - Point::new(4, 0), 12, true)?;
                draw_bar(target, c + Point::new(12, 0), 12)?;
            }
        }
    }

    if touch.touching {
        Circle::with_center(
            Point::new(i32::from(touch.point.x), i32::from(touch.point.y)),
            9,
        )
        .into_styled(PrimitiveStyle::with_stroke(CURSOR, 2))
        .draw(target)?;
    }

    Ok(())
}

fn draw_play<D: DrawTarget<Color = Rgb888>>(t: &mut D, c: Point, r: i32) -> Result<(), D::Error> {
    draw_arrow(t, c, r, true)
}

fn draw_arrow<D: DrawTarget<Color = Rgb888>>(
    t: &mut D,
    c: Point,
    r: i32,
    right: bool,
) -> Result<(), D::Error> {
    let (tip, back) = if right { (r, -r) } else { (-r, r) };
    Triangle::new(
        c + Point::new(tip, 0),
        c + Point::new(back, -r),
        c + Point::new(back, r),
    )
    .into_styled(PrimitiveStyle::with_fill(ICON))
    .draw(t)
}

fn draw_pause<D: DrawTarget<Color = Rgb888>>(t: &mut D, c: Point, r: i32) -> Result<(), D::Error> {
    let bar = Size::new((r / 2) as u32, (r * 2) as u32);
    for dx in [-r / 2, r / 2] {
        Rectangle::with_center(c + Point::new(dx, 0), bar)
            .into_styled(PrimitiveStyle::with_fill(ICON))
            .draw(t)?;
    }
    Ok(())
}

fn draw_bar<D: DrawTarget<Color = Rgb888>>(t: &mut D, c: Point, r: i32) -> Result<(), D::Error> {
    Rectangle::with_center(c, Size::new(4, (r * 2) as u32))
        .into_styled(PrimitiveStyle::with_fill(ICON))
        .draw(t)
}
