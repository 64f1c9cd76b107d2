//! Resolution and quality settings, and the pass layout each one prints with.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// Horizontal resolutions the ImageWriter can select with `ESC <code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDpi {
    Dpi72,
    Dpi80,
    Dpi96,
    Dpi107,
    Dpi120,
    Dpi136,
    Dpi144,
    Dpi160,
}

impl HorizontalDpi {
    pub const ALL: [HorizontalDpi; 8] = [
        Self::Dpi72,
        Self::Dpi80,
        Self::Dpi96,
        Self::Dpi107,
        Self::Dpi120,
        Self::Dpi136,
        Self::Dpi144,
        Self::Dpi160,
    ];

    pub fn dpi(&self) -> u32 {
        match self {
            Self::Dpi72 => 72,
            Self::Dpi80 => 80,
            Self::Dpi96 => 96,
            Self::Dpi107 => 107,
            Self::Dpi120 => 120,
            Self::Dpi136 => 136,
            Self::Dpi144 => 144,
            Self::Dpi160 => 160,
        }
    }

    /// Character sent after ESC to select this pitch.
    pub fn code(&self) -> u8 {
        match self {
            Self::Dpi72 => b'n',
            Self::Dpi80 => b'N',
            Self::Dpi96 => b'E',
            Self::Dpi107 => b'e',
            Self::Dpi120 => b'q',
            Self::Dpi136 => b'Q',
            Self::Dpi144 => b'p',
            Self::Dpi160 => b'P',
        }
    }

    /// Widest line the carriage covers at this pitch, in dots (8 inches).
    pub fn max_dots(&self) -> u32 {
        self.dpi() * 8
    }
}

impl TryFrom<u32> for HorizontalDpi {
    type Error = Error;

    fn try_from(dpi: u32) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|h| h.dpi() == dpi)
            .ok_or(Error::UnsupportedHorizontalDpi(dpi))
    }
}

impl fmt::Display for HorizontalDpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dpi())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDpi {
    Dpi72,
    Dpi144,
}

impl VerticalDpi {
    pub fn dpi(&self) -> u32 {
        match self {
            Self::Dpi72 => 72,
            Self::Dpi144 => 144,
        }
    }
}

impl TryFrom<u32> for VerticalDpi {
    type Error = Error;

    fn try_from(dpi: u32) -> Result<Self, Error> {
        match dpi {
            72 => Ok(Self::Dpi72),
            144 => Ok(Self::Dpi144),
            _ => Err(Error::UnsupportedVerticalDpi(dpi)),
        }
    }
}

impl fmt::Display for VerticalDpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dpi())
    }
}

/// Print quality at 144 vertical DPI. Ignored at 72.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// 16 rows per double pass.
    Regular,
    /// 12 rows per double pass, the two halves dovetailed.
    Enhanced,
    /// 4 rows per double pass.
    Best,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Self::Regular, Self::Enhanced, Self::Best];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Enhanced => "enhanced",
            Self::Best => "best",
        }
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|q| q.name() == s)
            .ok_or_else(|| Error::UnknownQuality(s.to_string()))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One head sweep: which rows feed which pins, and how far to advance after.
///
/// Bit `i` of each column byte carries the sample at `y + offsets[i]`.
#[derive(Debug, PartialEq, Eq)]
pub struct Sweep {
    pub offsets: &'static [i64],
    /// Line feeds (in 1/144 inch) sent after the sweep, one command each.
    pub line_feeds: &'static [u8],
}

/// How an image is cut into passes for one resolution and quality.
#[derive(Debug, PartialEq, Eq)]
pub struct PassLayout {
    /// Image rows consumed per pass.
    pub stride: u32,
    /// Row the first pass is based on.
    pub start_offset: i64,
    pub sweeps: &'static [Sweep],
}

static REGULAR: PassLayout = PassLayout {
    stride: 16,
    start_offset: 0,
    sweeps: &[
        Sweep {
            offsets: &[0, 2, 4, 6, 8, 10, 12, 14],
            line_feeds: &[1],
        },
        Sweep {
            offsets: &[1, 3, 5, 7, 9, 11, 13, 15],
            line_feeds: &[15],
        },
    ],
};

// Starting four rows above the image and overlapping the halves by a row
// dovetails the dots of consecutive passes.
//
// The second sweep packs its six samples into bits 0..5 like every other
// sweep. Other ImageWriter drivers put them in bits 2..7 so that row y+5
// fires pin 2. Moving them changes where the dots land on paper, so it needs a test
// print, not just a table edit.
static ENHANCED: PassLayout = PassLayout {
    stride: 12,
    start_offset: -4,
    sweeps: &[
        Sweep {
            offsets: &[0, 2, 4, 6, 8, 10],
            line_feeds: &[1],
        },
        Sweep {
            offsets: &[5, 7, 9, 11, 13, 15],
            line_feeds: &[11],
        },
    ],
};

static BEST: PassLayout = PassLayout {
    stride: 4,
    start_offset: 0,
    sweeps: &[
        Sweep {
            offsets: &[0, 2],
            line_feeds: &[1],
        },
        Sweep {
            offsets: &[1, 3],
            line_feeds: &[3],
        },
    ],
};

// Line pitch stays at 1/144 inch, so eight 72 DPI rows take sixteen feeds.
static SINGLE_72: PassLayout = PassLayout {
    stride: 8,
    start_offset: 0,
    sweeps: &[Sweep {
        offsets: &[0, 1, 2, 3, 4, 5, 6, 7],
        line_feeds: &[8, 8],
    }],
};

/// Look up the pass layout. `quality` only matters at 144 vertical DPI.
pub fn layout(vertical: VerticalDpi, quality: Quality) -> &'static PassLayout {
    match (vertical, quality) {
        (VerticalDpi::Dpi72, _) => &SINGLE_72,
        (VerticalDpi::Dpi144, Quality::Regular) => &REGULAR,
        (VerticalDpi::Dpi144, Quality::Enhanced) => &ENHANCED,
        (VerticalDpi::Dpi144, Quality::Best) => &BEST,
    }
}
