pub mod io;

use std::fmt;
use std::panic::Location;

/// Position in the source tree where an error was constructed.
/// Every codec and buffer error captures one of these so a failure
/// deep in a decode loop can be traced without a debugger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
    column: u32,
}

impl SourceLocation {
    /// Capture the caller's position. Constructors of error types are
    /// `#[track_caller]` so the recorded position is the raise site,
    /// not this helper.
    #[track_caller]
    pub fn capture() -> Self {
        let location = Location::caller();

        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Abort the process after printing where the impossible branch was hit.
/// Used for logic invariants (a counter outside its closed range, a state
/// the parser cannot legally enter). Never reachable from *input*, valid
/// or invalid — bad input is a recoverable error, not an abort.
#[track_caller]
pub fn unreachable_terminate() -> ! {
    let location = Location::caller();

    eprintln!(
        "reached a branch that was believed unreachable at {}:{}:{}; aborting",
        location.file(),
        location.line(),
        location.column()
    );
    std::process::abort();
}

/// Reset SIGPIPE to default behavior (SIG_DFL).
/// Rust sets SIGPIPE to SIG_IGN by default, but command-line tools are
/// expected to die quietly when their stdout pipe closes (exit code
/// 141 = 128 + 13). Called at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix.
/// The CLI prints e.g. "No such file or directory" while Rust's
/// Display impl adds " (os error 2)". This strips the suffix.
pub fn io_error_msg(e: &std::io::Error) -> String {
    if let Some(raw) = e.raw_os_error() {
        let os_err = std::io::Error::from_raw_os_error(raw);
        let msg = format!("{}", os_err);
        msg.replace(&format!(" (os error {})", raw), "")
    } else {
        format!("{}", e)
    }
}
