//! Cuts a raster into printer passes.
//!
//! A [`PrintJob`] fixes the raster and the resolution settings; [`Passes`]
//! walks it top to bottom and yields one [`Pass`] per head advance. Nothing in
//! here touches the printer, so the output can be inspected without waiting
//! on the dwell between passes.

use log::debug;

use crate::{
    encoder::encode_row,
    mode::{layout, HorizontalDpi, PassLayout, Quality, VerticalDpi},
    raster::Raster,
};

/// Immutable description of one printout.
#[derive(Debug)]
pub struct PrintJob<'a, R: Raster + ?Sized> {
    raster: &'a R,
    horizontal: HorizontalDpi,
    vertical: VerticalDpi,
    quality: Quality,
}

impl<'a, R: Raster + ?Sized> PrintJob<'a, R> {
    pub fn new(
        raster: &'a R,
        horizontal: HorizontalDpi,
        vertical: VerticalDpi,
        quality: Quality,
    ) -> Self {
        PrintJob {
            raster,
            horizontal,
            vertical,
            quality,
        }
    }

    pub fn horizontal(&self) -> HorizontalDpi {
        self.horizontal
    }

    pub fn vertical(&self) -> VerticalDpi {
        self.vertical
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn layout(&self) -> &'static PassLayout {
        layout(self.vertical, self.quality)
    }

    /// Columns actually sent per row: the image is clipped to the carriage.
    pub fn printable_width(&self) -> u32 {
        self.horizontal.max_dots().min(self.raster.width())
    }

    /// `true` when the image is wider than the printable line.
    pub fn is_clipped(&self) -> bool {
        self.raster.width() > self.horizontal.max_dots()
    }

    /// Number of passes, including one blank over-scan pass past the bottom.
    pub fn pass_count(&self) -> u32 {
        let stride = self.layout().stride;
        self.raster.height().div_ceil(stride) + 1
    }

    pub fn passes(&self) -> Passes<'a, R> {
        Passes {
            raster: self.raster,
            layout: self.layout(),
            width: self.printable_width(),
            y: self.layout().start_offset,
            remaining: self.pass_count(),
        }
    }
}

/// One sweep's encoded columns and the line feeds that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub columns: Vec<u8>,
    pub line_feeds: &'static [u8],
}

/// Everything printed between two dwells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass {
    /// Image row the pass offsets are measured from.
    pub y: i64,
    pub rows: Vec<Row>,
}

/// Iterator over the passes of a [`PrintJob`].
#[derive(Debug)]
pub struct Passes<'a, R: Raster + ?Sized> {
    raster: &'a R,
    layout: &'static PassLayout,
    width: u32,
    y: i64,
    remaining: u32,
}

impl<'a, R: Raster + ?Sized> Iterator for Passes<'a, R> {
    type Item = Pass;

    fn next(&mut self) -> Option<Pass> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let y = self.y;
        let rows = self
            .layout
            .sweeps
            .iter()
            .map(|sweep| Row {
                columns: encode_row(self.raster, sweep.offsets, self.width, y),
                line_feeds: sweep.line_feeds,
            })
            .collect();
        debug!("Pass at y={} ({} left)", y, self.remaining);

        self.y += i64::from(self.layout.stride);
        Some(Pass { y, rows })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl<'a, R: Raster + ?Sized> ExactSizeIterator for Passes<'a, R> {}
