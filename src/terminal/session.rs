//! Ownership of the terminal mode for the lifetime of a menu session.
//!
//! The mode of stdin is captured once when a [`TerminalSession`] is acquired and written
//! back exactly once: on [`TerminalSession::release`], on drop (covering error returns and
//! panic unwinding), or from the signal listener installed by
//! [`install_termination_signals`].

use crate::error::{AppError, Result};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message printed whenever a session ends.
pub const QUIT_MESSAGE: &str = "Program is quitting...";

/// Platform access to the terminal mode.
pub trait ModeOps: Send + Sync + 'static {
    /// Opaque copy of the terminal mode.
    type Mode: Clone + Send + Sync + 'static;

    /// Reads the current mode.
    fn capture(&self) -> io::Result<Self::Mode>;

    /// Writes `mode` back to the terminal.
    fn restore(&self, mode: &Self::Mode) -> io::Result<()>;
}

/// Terminal mode access through `tcgetattr`/`tcsetattr`.
#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
pub struct TermiosOps {
    fd: std::os::unix::io::RawFd,
}

#[cfg(unix)]
impl TermiosOps {
    /// Operates on the given descriptor instead of stdin.
    pub fn for_fd(fd: std::os::unix::io::RawFd) -> Self {
        Self { fd }
    }
}

#[cfg(unix)]
impl Default for TermiosOps {
    fn default() -> Self {
        Self::for_fd(libc::STDIN_FILENO)
    }
}

#[cfg(unix)]
impl ModeOps for TermiosOps {
    type Mode = libc::termios;

    fn capture(&self) -> io::Result<libc::termios> {
        let mut mode = std::mem::MaybeUninit::<libc::termios>::uninit();
        // SAFETY: `mode` points to writable storage for one termios struct.
        let ret = unsafe { libc::tcgetattr(self.fd, mode.as_mut_ptr()) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: tcgetattr succeeded, so every field has been written.
        Ok(unsafe { mode.assume_init() })
    }

    fn restore(&self, mode: &libc::termios) -> io::Result<()> {
        // SAFETY: `mode` is a valid termios previously filled in by tcgetattr.
        let ret = unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, mode) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

/// Mode access for platforms without termios. Capture always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopModeOps;

impl ModeOps for NoopModeOps {
    type Mode = ();

    fn capture(&self) -> io::Result<()> {
        Ok(())
    }

    fn restore(&self, _mode: &()) -> io::Result<()> {
        Ok(())
    }
}

/// The mode implementation used by [`crate::App::run`] on this platform.
#[cfg(unix)]
pub type PlatformModeOps = TermiosOps;

/// The mode implementation used by [`crate::App::run`] on this platform.
#[cfg(not(unix))]
pub type PlatformModeOps = NoopModeOps;

struct Captured<O: ModeOps> {
    ops: O,
    mode: O::Mode,
    restored: AtomicBool,
}

/// Cloneable handle that writes the captured mode back at most once.
pub struct ModeRestorer<O: ModeOps> {
    inner: Arc<Captured<O>>,
}

impl<O: ModeOps> Clone for ModeRestorer<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: ModeOps> ModeRestorer<O> {
    /// Restores the captured mode. Calls after the first are no-ops.
    pub fn restore(&self) -> io::Result<()> {
        if self.inner.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        debug!("Restoring terminal mode");
        self.inner.ops.restore(&self.inner.mode)
    }

    /// Whether the mode has already been written back.
    pub fn is_restored(&self) -> bool {
        self.inner.restored.load(Ordering::SeqCst)
    }

    /// The mode captured at acquisition.
    pub fn captured_mode(&self) -> &O::Mode {
        &self.inner.mode
    }
}

/// Scoped owner of the terminal mode captured at startup.
pub struct TerminalSession<O: ModeOps> {
    restorer: ModeRestorer<O>,
}

impl<O: ModeOps> TerminalSession<O> {
    /// Captures the current terminal mode.
    ///
    /// # Errors
    ///
    /// Returns `AppError::TerminalMode` if the mode cannot be read (e.g. stdin is not a tty).
    pub fn acquire(ops: O) -> Result<Self> {
        let mode = ops.capture().map_err(AppError::terminal_mode)?;
        debug!("Captured terminal mode");
        Ok(Self {
            restorer: ModeRestorer {
                inner: Arc::new(Captured {
                    ops,
                    mode,
                    restored: AtomicBool::new(false),
                }),
            },
        })
    }

    /// Returns a handle that can restore the mode from another thread.
    pub fn restorer(&self) -> ModeRestorer<O> {
        self.restorer.clone()
    }

    /// Restores the mode and ends the session.
    pub fn release(self) -> io::Result<()> {
        self.restorer.restore()
    }
}

impl<O: ModeOps> Drop for TerminalSession<O> {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Signals that end the process while a session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

/// Ends a session from the signal listener: restores the mode and writes [`QUIT_MESSAGE`]
/// on a fresh line.
pub fn finish_on_signal<O: ModeOps, W: io::Write>(
    restorer: &ModeRestorer<O>,
    signal: TerminationSignal,
    out: &mut W,
) {
    info!(?signal, "Termination signal received");
    if let Err(e) = restorer.restore() {
        warn!("Failed to restore terminal mode: {}", e);
    }
    let _ = writeln!(out, "\n{}", QUIT_MESSAGE);
    let _ = out.flush();
}

/// Running SIGINT/SIGTERM listener. Closing it (or dropping it) stops the listener
/// thread, so signals arriving after the session has ended no longer act on it.
pub struct SignalListener {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SignalListener {
    /// Stops listening and waits for the listener thread to finish.
    pub fn close(self) {
        drop(self);
    }

    /// Whether the listener has been told to stop.
    #[cfg(unix)]
    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        #[cfg(unix)]
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Signal listener thread panicked");
            }
        }
    }
}

/// Spawns a listener that, on SIGINT or SIGTERM, calls [`finish_on_signal`] and exits
/// the process with status 0, the same as every other way out of the loop.
///
/// The menu thread is usually blocked reading stdin, so the listener ends the
/// process itself instead of notifying the loop.
///
/// # Errors
///
/// Returns `AppError::Signal` if the handlers cannot be registered.
#[cfg(unix)]
pub fn install_termination_signals<O: ModeOps>(
    restorer: ModeRestorer<O>,
) -> Result<SignalListener> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(AppError::signal)?;
    let handle = signals.handle();
    let thread = std::thread::spawn(move || {
        for sig in signals.forever() {
            let signal = match sig {
                SIGINT => TerminationSignal::SigInt,
                SIGTERM => TerminationSignal::SigTerm,
                _ => continue,
            };
            finish_on_signal(&restorer, signal, &mut io::stdout());
            std::process::exit(0);
        }
        debug!("Signal listener closed");
    });
    Ok(SignalListener {
        handle,
        thread: Some(thread),
    })
}

/// Signal handling is not available here; the session relies on drop alone.
#[cfg(not(unix))]
pub fn install_termination_signals<O: ModeOps>(
    _restorer: ModeRestorer<O>,
) -> Result<SignalListener> {
    Ok(SignalListener { thread: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fake terminal holding a byte-level mode, recording every call.
    #[derive(Default)]
    struct MockOps {
        mode: Vec<u8>,
        fail_capture: bool,
        calls: Mutex<Vec<&'static str>>,
        restored_with: Mutex<Vec<Vec<u8>>>,
    }

    impl MockOps {
        fn with_mode(mode: &[u8]) -> Self {
            Self {
                mode: mode.to_vec(),
                ..Self::default()
            }
        }
    }

    impl ModeOps for Arc<MockOps> {
        type Mode = Vec<u8>;

        fn capture(&self) -> io::Result<Vec<u8>> {
            self.calls.lock().unwrap().push("capture");
            if self.fail_capture {
                return Err(io::Error::new(io::ErrorKind::Other, "not a terminal"));
            }
            Ok(self.mode.clone())
        }

        fn restore(&self, mode: &Vec<u8>) -> io::Result<()> {
            self.calls.lock().unwrap().push("restore");
            self.restored_with.lock().unwrap().push(mode.clone());
            Ok(())
        }
    }

    #[test]
    fn test_session_restores_on_drop() {
        let ops = Arc::new(MockOps::with_mode(&[1, 2, 3]));
        {
            let _session = TerminalSession::acquire(Arc::clone(&ops)).unwrap();
        }
        assert_eq!(&*ops.calls.lock().unwrap(), &["capture", "restore"]);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let ops = Arc::new(MockOps::with_mode(&[9]));
        let session = TerminalSession::acquire(Arc::clone(&ops)).unwrap();
        let restorer = session.restorer();

        assert!(!restorer.is_restored());
        restorer.restore().unwrap();
        restorer.restore().unwrap();
        session.release().unwrap();

        assert!(restorer.is_restored());
        assert_eq!(&*ops.calls.lock().unwrap(), &["capture", "restore"]);
    }

    #[test]
    fn test_restored_mode_matches_captured_mode() {
        let captured = vec![0x05, 0x00, 0xbf, 0x8a, 0x3b, 0x00];
        let ops = Arc::new(MockOps::with_mode(&captured));
        let session = TerminalSession::acquire(Arc::clone(&ops)).unwrap();
        assert_eq!(session.restorer().captured_mode(), &captured);

        session.release().unwrap();
        assert_eq!(&*ops.restored_with.lock().unwrap(), &[captured]);
    }

    #[test]
    fn test_capture_failure_is_terminal_mode_error() {
        let ops = Arc::new(MockOps {
            fail_capture: true,
            ..MockOps::default()
        });
        let err = TerminalSession::acquire(Arc::clone(&ops)).err().unwrap();
        assert!(matches!(err, AppError::TerminalMode(_)));
        assert_eq!(&*ops.calls.lock().unwrap(), &["capture"]);
    }

    #[test]
    fn test_restore_from_another_thread() {
        let ops = Arc::new(MockOps::with_mode(&[4, 2]));
        let session = TerminalSession::acquire(Arc::clone(&ops)).unwrap();
        let restorer = session.restorer();
        std::thread::spawn(move || restorer.restore().unwrap())
            .join()
            .unwrap();
        drop(session);
        assert_eq!(&*ops.calls.lock().unwrap(), &["capture", "restore"]);
    }

    #[test]
    fn test_finish_on_signal_restores_and_says_goodbye() {
        let ops = Arc::new(MockOps::with_mode(&[7, 7]));
        let session = TerminalSession::acquire(Arc::clone(&ops)).unwrap();
        let restorer = session.restorer();
        let mut out = Vec::new();

        finish_on_signal(&restorer, TerminationSignal::SigInt, &mut out);
        drop(session);

        assert_eq!(out, format!("\n{}\n", QUIT_MESSAGE).into_bytes());
        assert_eq!(&*ops.calls.lock().unwrap(), &["capture", "restore"]);
        assert_eq!(&*ops.restored_with.lock().unwrap(), &[vec![7, 7]]);
    }

    #[cfg(unix)]
    #[test]
    fn test_closed_listener_stops_its_thread() {
        let ops = Arc::new(MockOps::with_mode(&[1]));
        let session = TerminalSession::acquire(Arc::clone(&ops)).unwrap();
        let listener = install_termination_signals(session.restorer()).unwrap();
        assert!(!listener.is_closed());

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            listener.close();
            let _ = tx.send(());
        });
        assert!(rx
            .recv_timeout(std::time::Duration::from_secs(3))
            .is_ok());

        // Closing the listener never touches the terminal mode.
        assert!(!session.restorer().is_restored());
        drop(session);
        assert_eq!(&*ops.calls.lock().unwrap(), &["capture", "restore"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_termios_roundtrip_on_tty() {
        // SAFETY: isatty only inspects the descriptor.
        if unsafe { libc::isatty(libc::STDIN_FILENO) } != 1 {
            let err = TerminalSession::acquire(TermiosOps::default()).err().unwrap();
            assert!(matches!(err, AppError::TerminalMode(_)));
            return;
        }
        let ops = TermiosOps::default();
        let session = TerminalSession::acquire(ops).unwrap();
        session.release().unwrap();
        let after = ops.capture().unwrap();
        let before = TerminalSession::acquire(ops).unwrap();
        let captured = before.restorer().captured_mode().clone();
        assert_eq!(captured.c_lflag, after.c_lflag);
        assert_eq!(captured.c_iflag, after.c_iflag);
    }
}
