//! # imagewriter
//!
//! Prints a black and white image on an Apple ImageWriter or ImageWriter II.
//!
//! ```bash
//! # Send straight to the serial port at the default 144x144 dpi
//! imagewriter --output /dev/ttyUSB0 drawing.png
//!
//! # Or pipe it, enhanced quality, faster passes
//! imagewriter -q enhanced -s 0.5 drawing.png > /dev/ttyUSB0
//! ```
//!
//! Only exactly black pixels print. Log output goes to stderr; set
//! `RUST_LOG=debug` for per-pass detail.

use clap::Parser;
use std::{io::Write, path::PathBuf};

use imagewriter::{Config, Error, HorizontalDpi, Output, Printer, Quality, VerticalDpi, BAUD_RATES};

/// The image size and job summary are logged at `info`, so show them unless
/// `RUST_LOG` says otherwise.
const DEFAULT_LOG_FILTER: &str = "info";

/// Print a black and white image on an ImageWriter dot-matrix printer
#[derive(Parser, Debug)]
#[command(name = "imagewriter")]
#[command(author, about, long_about = None)]
struct Cli {
    /// Image file to print (PNG, GIF, BMP or JPEG)
    file: PathBuf,

    /// Horizontal DPI (one of: 72, 80, 96, 107, 120, 136, 144, 160)
    #[arg(short = 'H', long = "horizontal", value_name = "DPI", default_value_t = 144)]
    horizontal: u32,

    /// Vertical DPI (72 or 144)
    #[arg(short = 'V', long = "vertical", value_name = "DPI", default_value_t = 144)]
    vertical: u32,

    /// Print quality (one of: regular, enhanced, best); ignored at 72 vertical DPI
    #[arg(short, long, default_value = "regular")]
    quality: String,

    /// Sleep this many seconds between passes
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0.75)]
    sleep: f64,

    /// Write to this file or serial device instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Serial speed for a device given with --output
    #[arg(short, long)]
    baud: Option<u32>,
}

fn main() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = settings(&cli)?;
    log::debug!("{:?}", config);

    let img = image::open(&cli.file)?.to_rgba8();
    log::info!(
        "{}: height {}, width {}",
        cli.file.display(),
        img.height(),
        img.width()
    );

    let output = match cli.output {
        Some(path) => Output::open(path, cli.baud)?,
        None => Output::stdout(),
    };

    let mut printer = Printer::new(config, output);
    printer.print(&img)
}

/// Check every option before the image is decoded or the output opened.
fn settings(cli: &Cli) -> Result<Config, Error> {
    if let Some(rate) = cli.baud {
        if cli.output.is_none() {
            return Err(Error::Transport(
                "--baud needs a serial device given with --output".to_string(),
            ));
        }
        if !BAUD_RATES.contains(&rate) {
            return Err(Error::UnsupportedBaudRate(rate));
        }
    }

    Config::new(HorizontalDpi::try_from(cli.horizontal)?)
        .vertical_dpi(VerticalDpi::try_from(cli.vertical)?)
        .quality(cli.quality.parse::<Quality>()?)
        .dwell_secs(cli.sleep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = settings(&parse(&["imagewriter", "x.png"])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&[
            "imagewriter", "-H", "80", "-V", "72", "-q", "best", "-s", "0", "x.png",
        ]);
        let config = settings(&cli).unwrap();
        assert_eq!(config.get_horizontal_dpi(), HorizontalDpi::Dpi80);
        assert_eq!(config.get_vertical_dpi(), VerticalDpi::Dpi72);
        assert_eq!(config.get_quality(), Quality::Best);
        assert_eq!(config.get_dwell(), Duration::ZERO);
    }

    #[test]
    fn test_long_vertical_flag() {
        let cli = parse(&["imagewriter", "--vertical", "72", "x.png"]);
        assert_eq!(cli.vertical, 72);
    }

    #[test]
    fn test_bad_settings_are_rejected() {
        let cli = parse(&["imagewriter", "-V", "100", "x.png"]);
        assert!(matches!(settings(&cli), Err(Error::UnsupportedVerticalDpi(100))));

        let cli = parse(&["imagewriter", "-H", "100", "x.png"]);
        assert!(matches!(settings(&cli), Err(Error::UnsupportedHorizontalDpi(100))));

        let cli = parse(&["imagewriter", "-q", "draft", "x.png"]);
        assert!(matches!(settings(&cli), Err(Error::UnknownQuality(_))));

        let cli = parse(&["imagewriter", "--sleep=-1", "x.png"]);
        assert!(matches!(settings(&cli), Err(Error::InvalidDwell(_))));
    }

    #[test]
    fn test_baud_requires_output() {
        let cli = parse(&["imagewriter", "-b", "9600", "x.png"]);
        assert!(matches!(settings(&cli), Err(Error::Transport(_))));

        let cli = parse(&["imagewriter", "-b", "9600", "-o", "/dev/ttyUSB0", "x.png"]);
        assert!(settings(&cli).is_ok());

        let cli = parse(&["imagewriter", "-b", "115200", "-o", "/dev/ttyUSB0", "x.png"]);
        assert!(matches!(settings(&cli), Err(Error::UnsupportedBaudRate(115200))));
    }

    #[test]
    fn test_default_log_filter_shows_info() {
        let level: log::LevelFilter = DEFAULT_LOG_FILTER.parse().unwrap();
        assert!(level >= log::LevelFilter::Info);
    }
}
