//! Crash reporting for fatal failure conditions
//!
//! Two independent conditions end up here: an internal invariant check
//! failing (a panic, or an explicit call to [`exceptional_condition`])
//! and an unrecoverable signal. Both funnel into the same emission: the
//! process identifier, the version string, the request being processed
//! when things went wrong (if any), and a backtrace, written to stderr
//! before the process terminates. Everything on this path is best
//! effort; a failure while emitting must not mask the failure being
//! reported.

use backtrace::Backtrace;
use std::io::{stderr, Write};
use std::panic;
use std::sync::{Mutex, MutexGuard};

pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// The request text currently being processed, recorded so a crash
/// report can say what the process was working on.
static CURRENT_REQUEST: Mutex<Option<String>> = Mutex::new(None);

pub fn set_request(text: &str) {
    *force_lock(&CURRENT_REQUEST) = Some(text.to_string());
}

pub fn clear_request() {
    *force_lock(&CURRENT_REQUEST) = None;
}

/// Lock a mutex, ignoring whether it has been poisoned. The crash path
/// runs while some other failure is already in flight, so a poisoned
/// lock must not stop the report.
fn force_lock<T>(data: &Mutex<T>) -> MutexGuard<'_, T> {
    match data.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Write the crash report to the given destination. Write errors are
/// discarded; there is nowhere else to send them.
pub fn report_crash<W: Write>(out: &mut W, reason: &str) {
    let _ = writeln!(out, "{} (PID {})", reason, std::process::id());
    let _ = writeln!(out, "version: {}", VERSION);
    match force_lock(&CURRENT_REQUEST).as_deref() {
        Some(request) => {
            let _ = writeln!(out, "request: {}", request);
        }
        None => {
            let _ = writeln!(out, "request: <none>");
        }
    }
    let _ = writeln!(out, "backtrace:");
    let _ = writeln!(out, "{:?}", Backtrace::new());
    let _ = out.flush();
}

/// Handle the failure of an internal invariant check: emit the TRAP
/// line and the crash report, then abort so a core dump is produced.
pub fn exceptional_condition(condition: &str, kind: &str, file: &str, line: u32) -> ! {
    let mut handle = stderr().lock();
    let _ = writeln!(
        handle,
        "TRAP: {}(\"{}\", File: \"{}\", Line: {}, PID: {})",
        kind,
        condition,
        file,
        line,
        std::process::id()
    );
    report_crash(&mut handle, "Assertion failure");
    drop(handle);
    std::process::abort();
}

/// Install the process-wide hooks: a panic hook for failed invariants,
/// and a SIGSEGV handler for the unrecoverable-signal case.
pub fn install() {
    panic::set_hook(Box::new(|info| {
        let mut handle = stderr().lock();
        let _ = writeln!(handle, "TRAP: {}", info);
        report_crash(&mut handle, "Panic");
        drop(handle);
        std::process::abort();
    }));

    let handler = handle_fatal_signal as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGSEGV, handler as libc::sighandler_t);
    }
}

extern "C" fn handle_fatal_signal(_signum: libc::c_int) {
    let mut handle = stderr().lock();
    report_crash(&mut handle, "Segmentation fault");
    drop(handle);
    // exit without unwinding or running atexit handlers
    unsafe { libc::_exit(1) };
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn report_carries_identity_and_backtrace() {
        let mut buffer: Vec<u8> = Vec::new();
        report_crash(&mut buffer, "Assertion failure");

        let report = String::from_utf8(buffer).unwrap();
        assert!(report.starts_with(&format!("Assertion failure (PID {})", std::process::id())));
        assert!(report.contains(&format!("version: {}", VERSION)));
        assert!(report.contains("backtrace:"));
    }

    #[test]
    fn report_includes_current_request() {
        set_request("pretty dump-of-interest.txt");

        let mut buffer: Vec<u8> = Vec::new();
        report_crash(&mut buffer, "Panic");

        let report = String::from_utf8(buffer).unwrap();
        assert!(report.contains("request: pretty dump-of-interest.txt"));

        clear_request();
    }
}
