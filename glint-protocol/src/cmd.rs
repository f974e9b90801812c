//! ILI9341 command bytes
//!
//! Only the commands the driver actually issues are listed. The
//! extended power-control registers have no public names in the
//! datasheet tables most vendors ship, so they keep their register
//! labels.

pub const SWRESET: u8 = 0x01;
pub const SLPOUT: u8 = 0x11;
pub const GAMSET: u8 = 0x26;
pub const DISPOFF: u8 = 0x28;
pub const DISPON: u8 = 0x29;
pub const CASET: u8 = 0x2A;
pub const PASET: u8 = 0x2B;
pub const RAMWR: u8 = 0x2C;
pub const MADCTL: u8 = 0x36;
pub const PIXSET: u8 = 0x3A;
pub const FRMCTR1: u8 = 0xB1;
pub const PWCTR1: u8 = 0xC0;
pub const PWCTR2: u8 = 0xC1;
pub const VMCTR1: u8 = 0xC5;
pub const VMCTR2: u8 = 0xC7;
pub const PWCTRB: u8 = 0xCF;
pub const PWSEQ: u8 = 0xED;
pub const DTCA: u8 = 0xE8;
pub const DTCB: u8 = 0xEA;
pub const PWCTRA: u8 = 0xCB;
pub const PRC: u8 = 0xF7;
pub const GAMMA3_EN: u8 = 0xF2;

/// MADCTL: row/column exchange
pub const MADCTL_MV: u8 = 0x20;
/// MADCTL: BGR colour filter order
pub const MADCTL_BGR: u8 = 0x08;

/// PIXSET: 16 bits per pixel on both RGB and MCU interfaces
pub const PIXEL_FORMAT_16BPP: u8 = 0x55;
