//! Named hit regions
//!
//! Regions are kept in registration order and hit-tested first match
//! wins: when two regions overlap, the one registered earlier receives
//! the press. Re-registering a name replaces the entry in place and
//! keeps its position.

use heapless::{String, Vec};

use super::ScreenPoint;

/// Longest region name in bytes
pub const MAX_REGION_NAME: usize = 16;

/// Region callback, invoked with the region name and the press point
pub type RegionCallback<'a> = &'a (dyn Fn(&str, ScreenPoint) + Sync);

/// Region table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegionError {
    /// All slots are taken
    TableFull,
    /// Name longer than [`MAX_REGION_NAME`]
    NameTooLong,
}

/// Axis-aligned rectangle, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `x <= p.x < x + width` and likewise for y
    pub fn contains(&self, p: ScreenPoint) -> bool {
        let (px, py) = (u32::from(p.x), u32::from(p.y));
        let (x, y) = (u32::from(self.x), u32::from(self.y));
        px >= x && px < x + u32::from(self.width) && py >= y && py < y + u32::from(self.height)
    }
}

struct Entry<'a> {
    name: String<MAX_REGION_NAME>,
    region: Region,
    callback: RegionCallback<'a>,
}

/// Ordered table of up to `N` named regions
pub struct RegionTable<'a, const N: usize> {
    entries: Vec<Entry<'a>, N>,
}

impl<'a, const N: usize> RegionTable<'a, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace a region
    pub fn register(
        &mut self,
        name: &str,
        region: Region,
        callback: RegionCallback<'a>,
    ) -> Result<(), RegionError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.region = region;
            entry.callback = callback;
            return Ok(());
        }

        let mut owned = String::new();
        owned.push_str(name).map_err(|_| RegionError::NameTooLong)?;
        self.entries
            .push(Entry {
                name: owned,
                region,
                callback,
            })
            .map_err(|_| RegionError::TableFull)
    }

    /// Remove a region; returns whether it existed
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                // `remove` keeps the order of the remaining entries
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Region> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.region)
    }

    /// Names in precedence order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// First region containing `point`
    pub fn hit_test(&self, point: ScreenPoint) -> Option<(&str, RegionCallback<'a>)> {
        self.entries
            .iter()
            .find(|e| e.region.contains(point))
            .map(|e| (e.name.as_str(), e.callback))
    }

    /// Fire the first matching region's callback; returns its name
    pub fn dispatch(&self, point: ScreenPoint) -> Option<&str> {
        let (name, callback) = self.hit_test(point)?;
        callback(name, point);
        Some(name)
    }
}

impl<const N: usize> Default for RegionTable<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
