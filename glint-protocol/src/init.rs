//! Power-on command table
//!
//! The controller is brought up by replaying this table verbatim after a
//! hardware reset. Byte values must not change: a wrong power or VCOM
//! value leaves the panel blank or washed out.

use crate::cmd;

/// One command with its parameter bytes and the delay owed afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitStep {
    pub command: u8,
    pub params: &'static [u8],
    /// Milliseconds to wait before the next command
    pub settle_ms: u32,
}

impl InitStep {
    const fn new(command: u8, params: &'static [u8]) -> Self {
        Self {
            command,
            params,
            settle_ms: 0,
        }
    }

    const fn settle(command: u8, settle_ms: u32) -> Self {
        Self {
            command,
            params: &[],
            settle_ms,
        }
    }
}

/// Settle time after software reset, sleep-out and display-on
pub const SETTLE_MS: u32 = 150;

/// ILI9341 bring-up sequence, in issue order
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::settle(cmd::SWRESET, SETTLE_MS),
    InitStep::new(cmd::DISPOFF, &[]),
    InitStep::new(cmd::PWCTRB, &[0x00, 0x83, 0x30]),
    InitStep::new(cmd::PWSEQ, &[0x64, 0x03, 0x12, 0x81]),
    InitStep::new(cmd::DTCA, &[0x85, 0x01, 0x79]),
    InitStep::new(cmd::PWCTRA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    InitStep::new(cmd::PRC, &[0x20]),
    InitStep::new(cmd::DTCB, &[0x00, 0x00]),
    InitStep::new(cmd::PWCTR1, &[0x26]),
    InitStep::new(cmd::PWCTR2, &[0x11]),
    InitStep::new(cmd::VMCTR1, &[0x35, 0x3E]),
    InitStep::new(cmd::VMCTR2, &[0xBE]),
    InitStep::new(cmd::MADCTL, &[cmd::MADCTL_MV | cmd::MADCTL_BGR]),
    InitStep::new(cmd::PIXSET, &[cmd::PIXEL_FORMAT_16BPP]),
    InitStep::new(cmd::FRMCTR1, &[0x00, 0x1B]),
    InitStep::new(cmd::GAMMA3_EN, &[0x08]),
    InitStep::new(cmd::GAMSET, &[0x01]),
    InitStep::settle(cmd::SLPOUT, SETTLE_MS),
    InitStep::settle(cmd::DISPON, SETTLE_MS),
];

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_sequence_bytes() {
        let expected: &[(u8, &[u8])] = &[
            (0x01, &[]),
            (0x28, &[]),
            (0xCF, &[0x00, 0x83, 0x30]),
            (0xED, &[0x64, 0x03, 0x12, 0x81]),
            (0xE8, &[0x85, 0x01, 0x79]),
            (0xCB, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
            (0xF7, &[0x20]),
            (0xEA, &[0x00, 0x00]),
            (0xC0, &[0x26]),
            (0xC1, &[0x11]),
            (0xC5, &[0x35, 0x3E]),
            (0xC7, &[0xBE]),
            (0x36, &[0x28]),
            (0x3A, &[0x55]),
            (0xB1, &[0x00, 0x1B]),
            (0xF2, &[0x08]),
            (0x26, &[0x01]),
            (0x11, &[]),
            (0x29, &[]),
        ];

        assert_eq!(INIT_SEQUENCE.len(), expected.len());
        for (step, (command, params)) in INIT_SEQUENCE.iter().zip(expected) {
            assert_eq!(step.command, *command);
            assert_eq!(step.params, *params);
        }
    }

    #[test]
    fn test_settle_points() {
        let settled: Vec<(u8, u32)> = INIT_SEQUENCE
            .iter()
            .filter(|s| s.settle_ms > 0)
            .map(|s| (s.command, s.settle_ms))
            .collect();
        assert_eq!(
            settled.as_slice(),
            &[
                (cmd::SWRESET, 150),
                (cmd::SLPOUT, 150),
                (cmd::DISPON, 150)
            ]
        );
    }

    #[test]
    fn test_ends_with_display_on() {
        let last = INIT_SEQUENCE.last().map(|s| s.command);
        assert_eq!(last, Some(cmd::DISPON));
    }
}
