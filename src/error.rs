//! Error types for ImageWriter print jobs.
//!
//! Configuration problems are all detected before the first byte reaches the
//! printer. Once a print has started the only thing that can fail is the
//! output sink itself.

use thiserror::Error;

/// Main error type for ImageWriter operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Horizontal resolution the printer has no selector character for.
    ///
    /// Valid values are 72, 80, 96, 107, 120, 136, 144 and 160.
    #[error("Unsupported horizontal DPI {0} (must be one of: 72, 80, 96, 107, 120, 136, 144, 160)")]
    UnsupportedHorizontalDpi(u32),

    #[error("Unsupported vertical DPI {0} (must be one of: 72, 144)")]
    UnsupportedVerticalDpi(u32),

    #[error("Unknown quality {0:?} (must be one of: regular, enhanced, best)")]
    UnknownQuality(String),

    /// Dwell between passes must be a finite, non-negative number of seconds.
    #[error("Invalid sleep duration {0}")]
    InvalidDwell(f64),

    #[error("Unsupported baud rate {0}")]
    UnsupportedBaudRate(u32),

    /// Opening or configuring the output device failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The input file could not be decoded into a raster.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Writing to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
