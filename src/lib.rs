//! ImageWriter Printer Driver
//!
//! This crate prints black and white rasters on Apple ImageWriter and
//! ImageWriter II dot-matrix printers using their bit-image graphics mode.
//!
//! # Example
//!
//! ```rust,no_run
//! use imagewriter::{Config, HorizontalDpi, Output, Printer, Quality};
//!
//! let img = image::open("drawing.png").unwrap().to_rgba8();
//! let config = Config::new(HorizontalDpi::Dpi144).quality(Quality::Best);
//! let output = Output::open("/dev/ttyUSB0", Some(9600)).unwrap();
//! let mut printer = Printer::new(config, output);
//! printer.print(&img).unwrap();
//! ```

mod encoder;
mod error;
mod mode;
mod printer;
pub mod protocol;
mod raster;
mod sequencer;
mod transport;

pub use crate::{
    encoder::{encode_column, encode_row},
    error::Error,
    mode::{layout, HorizontalDpi, PassLayout, Quality, Sweep, VerticalDpi},
    printer::{Config, Printer, DEFAULT_DWELL},
    raster::{ink, Raster},
    sequencer::{Pass, Passes, PrintJob, Row},
    transport::{Output, BAUD_RATES},
};
