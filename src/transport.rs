//! # Output transport
//!
//! The ImageWriter hangs off a serial port and never talks back, so the
//! transport is just somewhere to write bytes:
//!
//! - **stdout**, for `imagewriter image.png > /dev/ttyUSB0`
//! - a **regular file**, appended to, for capturing a job
//! - a **character device**, switched to raw 8-bit mode first
//!
//! ## TTY configuration
//!
//! Graphics rows are arbitrary binary, so the device is put in raw mode:
//! no output post-processing (a CR/LF translation would corrupt column
//! bytes), 8 data bits without parity, and XON/XOFF disabled since 0x11 and
//! 0x13 show up in graphics data.

use log::{debug, warn};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use crate::error::Error;

/// Serial speeds the ImageWriter DIP switches can be set to.
pub const BAUD_RATES: [u32; 6] = [300, 1200, 2400, 4800, 9600, 19200];

/// Where the printer stream goes.
#[derive(Debug)]
pub enum Output {
    Stdout(io::Stdout),
    File(File),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout(io::stdout())
    }

    /// Open `path` for writing.
    ///
    /// Character devices are configured for raw output and, when `baud` is
    /// given, set to that speed. Other paths are created or appended to.
    pub fn open<P: AsRef<Path>>(path: P, baud: Option<u32>) -> Result<Self, Error> {
        let path = path.as_ref();
        if let Some(rate) = baud {
            if !BAUD_RATES.contains(&rate) {
                return Err(Error::UnsupportedBaudRate(rate));
            }
        }

        if is_char_device(path) {
            let file = OpenOptions::new().write(true).open(path).map_err(|e| {
                Error::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;
            configure_tty(&file, baud)?;
            debug!("Opened serial device {}", path.display());
            Ok(Output::File(file))
        } else {
            if baud.is_some() {
                warn!("{} is not a serial device; ignoring baud rate", path.display());
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    Error::Transport(format!("Failed to open {}: {}", path.display(), e))
                })?;
            debug!("Appending to {}", path.display());
            Ok(Output::File(file))
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(out) => out.write(buf),
            Output::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.flush(),
            Output::File(file) => file.flush(),
        }
    }
}

#[cfg(unix)]
fn is_char_device(path: &Path) -> bool {
    use std::os::unix::fs::FileTypeExt;

    std::fs::metadata(path)
        .map(|meta| meta.file_type().is_char_device())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_char_device(_path: &Path) -> bool {
    false
}

#[cfg(unix)]
fn speed(rate: u32) -> Option<libc::speed_t> {
    match rate {
        300 => Some(libc::B300),
        1200 => Some(libc::B1200),
        2400 => Some(libc::B2400),
        4800 => Some(libc::B4800),
        9600 => Some(libc::B9600),
        19200 => Some(libc::B19200),
        _ => None,
    }
}

/// Put the device in raw 8-bit mode and optionally set its output speed.
///
/// IXON/IXOFF/IXANY are cleared because 0x11 (XON) and 0x13 (XOFF) are
/// ordinary column bytes in graphics rows; left on, the driver would swallow
/// them and the row would come out short.
#[cfg(unix)]
fn configure_tty(file: &File, baud: Option<u32>) -> Result<(), Error> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(Error::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios: libc::termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if let Some(rate) = baud {
        let speed = speed(rate).ok_or(Error::UnsupportedBaudRate(rate))?;
        let result = unsafe { libc::cfsetospeed(&mut termios, speed) };
        if result != 0 {
            return Err(Error::Transport(format!(
                "cfsetospeed failed: {}",
                io::Error::last_os_error()
            )));
        }
        debug!("Baud rate set to {}", rate);
    }

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(Error::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty(_file: &File, _baud: Option<u32>) -> Result<(), Error> {
    Ok(())
}
