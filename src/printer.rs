use log::{debug, info, warn};
use std::{io::Write, thread, time::Duration};

use crate::{
    error::Error,
    mode::{HorizontalDpi, Quality, VerticalDpi},
    protocol,
    raster::Raster,
    sequencer::{Pass, PrintJob},
};

/// Pause after each pass while the head finishes its sweeps.
pub const DEFAULT_DWELL: Duration = Duration::from_millis(750);

/// Print settings.
///
/// ```
/// use imagewriter::{Config, HorizontalDpi, Quality, VerticalDpi};
///
/// let config = Config::new(HorizontalDpi::Dpi144)
///     .vertical_dpi(VerticalDpi::Dpi144)
///     .quality(Quality::Enhanced);
/// assert_eq!(config.get_quality(), Quality::Enhanced);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    horizontal: HorizontalDpi,
    vertical: VerticalDpi,
    quality: Quality,
    dwell: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(HorizontalDpi::Dpi144)
    }
}

impl Config {
    /// Initialize configuration with 144 vertical DPI, regular quality and
    /// the default dwell.
    pub fn new(horizontal: HorizontalDpi) -> Config {
        Config {
            horizontal,
            vertical: VerticalDpi::Dpi144,
            quality: Quality::Regular,
            dwell: DEFAULT_DWELL,
        }
    }

    pub fn vertical_dpi(self, vertical: VerticalDpi) -> Self {
        Config { vertical, ..self }
    }

    /// Has no effect at 72 vertical DPI.
    pub fn quality(self, quality: Quality) -> Self {
        Config { quality, ..self }
    }

    pub fn dwell(self, dwell: Duration) -> Self {
        Config { dwell, ..self }
    }

    /// Set the dwell from a number of seconds as given on the command line.
    pub fn dwell_secs(self, secs: f64) -> Result<Self, Error> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(Error::InvalidDwell(secs));
        }
        let dwell = Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidDwell(secs))?;
        Ok(self.dwell(dwell))
    }

    pub fn get_horizontal_dpi(&self) -> HorizontalDpi {
        self.horizontal
    }

    pub fn get_vertical_dpi(&self) -> VerticalDpi {
        self.vertical
    }

    pub fn get_quality(&self) -> Quality {
        self.quality
    }

    pub fn get_dwell(&self) -> Duration {
        self.dwell
    }

    /// Freeze the settings against a raster.
    pub fn job<'a, R: Raster + ?Sized>(&self, raster: &'a R) -> PrintJob<'a, R> {
        PrintJob::new(raster, self.horizontal, self.vertical, self.quality)
    }
}

/// An ImageWriter on the other end of a byte stream.
///
/// The printer never answers, so anything implementing [`Write`] will do: a
/// serial port, a file, stdout or a `Vec<u8>`.
pub struct Printer<W: Write> {
    sink: W,
    config: Config,
}

impl<W: Write> Printer<W> {
    pub fn new(config: Config, sink: W) -> Self {
        Printer { sink, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the sink, e.g. to inspect what was written.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Print a raster.
    ///
    /// Sends the setup sequence, then every pass followed by the dwell. Runs
    /// to completion unless writing to the sink fails.
    pub fn print<R: Raster + ?Sized>(&mut self, raster: &R) -> Result<(), Error> {
        let job = self.config.job(raster);

        if job.is_clipped() {
            warn!(
                "Image exceeds printable width of {} pixels; printout will be clipped",
                job.horizontal().max_dots()
            );
        }
        info!(
            "Printing {}x{} at {}x{} dpi, {} quality, {} passes",
            raster.width(),
            raster.height(),
            job.horizontal(),
            job.vertical(),
            job.quality(),
            job.pass_count()
        );

        self.initialize()?;

        let count = job.printable_width() as usize;
        for pass in job.passes() {
            self.write_pass(count, &pass)?;
            self.dwell();
        }
        debug!("Print finished");
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), Error> {
        let buf = protocol::init(self.config.horizontal);
        debug!("Init sequence: {:X?}", buf);
        self.write(&buf)
    }

    fn write_pass(&mut self, count: usize, pass: &Pass) -> Result<(), Error> {
        let mut buf: Vec<u8> = Vec::new();
        for row in &pass.rows {
            buf.append(&mut protocol::graphics(count, &row.columns));
            for &lines in row.line_feeds {
                buf.append(&mut protocol::line_feeds(u32::from(lines)));
            }
        }
        self.write(&buf)?;
        self.sink.flush()?;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.sink.write_all(buf)?;
        Ok(())
    }

    fn dwell(&self) {
        if !self.config.dwell.is_zero() {
            thread::sleep(self.config.dwell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::time::Instant;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.get_horizontal_dpi(), HorizontalDpi::Dpi144);
        assert_eq!(config.get_vertical_dpi(), VerticalDpi::Dpi144);
        assert_eq!(config.get_quality(), Quality::Regular);
        assert_eq!(config.get_dwell(), Duration::from_millis(750));
    }

    #[test]
    fn test_dwell_secs() {
        let config = Config::default().dwell_secs(0.25).unwrap();
        assert_eq!(config.get_dwell(), Duration::from_millis(250));
        assert!(matches!(
            Config::default().dwell_secs(-1.0),
            Err(Error::InvalidDwell(_))
        ));
        assert!(matches!(
            Config::default().dwell_secs(f64::NAN),
            Err(Error::InvalidDwell(_))
        ));
        assert!(matches!(
            Config::default().dwell_secs(f64::INFINITY),
            Err(Error::InvalidDwell(_))
        ));
    }

    #[test]
    fn test_print_starts_with_init() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let config = Config::new(HorizontalDpi::Dpi80).dwell(Duration::ZERO);
        let mut printer = Printer::new(config, Vec::new());
        printer.print(&img).unwrap();
        let out = printer.into_inner();
        assert!(out.starts_with(&protocol::init(HorizontalDpi::Dpi80)));
    }

    #[test]
    fn test_dwell_between_passes() {
        let img = RgbaImage::from_pixel(1, 16, Rgba([255, 255, 255, 255]));
        let config = Config::default().dwell(Duration::from_millis(5));
        let mut printer = Printer::new(config, Vec::new());
        let start = Instant::now();
        printer.print(&img).unwrap();
        // Two passes: one for the image, one over-scan.
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_propagate() {
        let img = RgbaImage::new(1, 1);
        let mut printer = Printer::new(Config::default().dwell(Duration::ZERO), Broken);
        assert!(matches!(printer.print(&img), Err(Error::Io(_))));
    }
}
