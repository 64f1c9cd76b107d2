//! # ImageWriter command bytes
//!
//! Builders for the handful of ImageWriter / ImageWriter II commands used to
//! print bit-image graphics. Each returns the exact bytes to send.
//!
//! | Command | Bytes | Effect |
//! |---------|-------|--------|
//! | Forward feed | `ESC f` | Line feeds move the paper up |
//! | No CR before LF | `ESC l 1` | LF and FF do not return the carriage |
//! | No LF after CR | `ESC Z 0x80 0x00` | CR does not advance the paper |
//! | Line pitch | `ESC T 0 1` | One line feed is 1/144 inch |
//! | Pitch select | `ESC <code>` | Horizontal dots per inch |
//! | Graphics | `ESC G nnnn data` | Print `nnnn` columns of 8 dots |
//! | Line feeds | `US <n>` | Advance `n` lines (1 to 15) |

use crate::mode::HorizontalDpi;

/// ESC - Command prefix byte
pub const ESC: u8 = 0x1B;

/// US - Prefix for the multiple line feed command
pub const US: u8 = 0x1F;

/// CR - Return the carriage to column 0
pub const CR: u8 = 0x0D;

/// Most line feeds a single `US` command can express.
pub const MAX_LINE_FEEDS: u8 = 15;

/// Largest column count the four digit graphics header can carry.
pub const MAX_GRAPHICS_COLUMNS: usize = 9999;

const LINE_FEED_CODES: [u8; 15] = [
    b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b':', b';', b'<', b'=', b'>', b'?',
];

/// `ESC f`
pub fn forward_line_feeds() -> Vec<u8> {
    vec![ESC, b'f']
}

/// `ESC l 1`
pub fn no_carriage_return_before_feed() -> Vec<u8> {
    vec![ESC, b'l', b'1']
}

/// `ESC Z 0x80 0x00`
pub fn no_line_feed_after_carriage_return() -> Vec<u8> {
    vec![ESC, b'Z', 0x80, 0x00]
}

/// `ESC T 0 1`: line pitch of 1/144 inch.
pub fn line_pitch_144() -> Vec<u8> {
    vec![ESC, b'T', b'0', b'1']
}

pub fn select_horizontal_dpi(dpi: HorizontalDpi) -> Vec<u8> {
    vec![ESC, dpi.code()]
}

/// Everything sent once before the first graphics row, in order.
pub fn init(dpi: HorizontalDpi) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.append(&mut forward_line_feeds());
    buf.append(&mut no_carriage_return_before_feed());
    buf.append(&mut no_line_feed_after_carriage_return());
    buf.append(&mut line_pitch_144());
    buf.append(&mut select_horizontal_dpi(dpi));
    buf
}

/// `ESC G nnnn` followed by `columns` and a carriage return.
///
/// `count` is written as four zero padded decimal digits and is the number of
/// columns the printer treats as graphics.
pub fn graphics(count: usize, columns: &[u8]) -> Vec<u8> {
    let count = count.min(MAX_GRAPHICS_COLUMNS);
    let mut buf = Vec::with_capacity(columns.len() + 7);
    buf.extend_from_slice(&[ESC, b'G']);
    buf.extend_from_slice(format!("{:04}", count).as_bytes());
    buf.extend_from_slice(columns);
    buf.push(CR);
    buf
}

/// `US <code>` commands advancing `lines` in total.
///
/// Amounts over 15 are split into several commands; zero sends nothing.
pub fn line_feeds(lines: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut left = lines;
    while left > 0 {
        let n = left.min(u32::from(MAX_LINE_FEEDS));
        buf.push(US);
        buf.push(LINE_FEED_CODES[n as usize - 1]);
        left -= n;
    }
    buf
}
