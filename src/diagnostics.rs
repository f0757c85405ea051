use crate::config::{config, DiagnosticStyle};
use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    platform::platform,
};
use miette::Report;
use std::process;

/// Exit status for every fatal runtime condition.
pub const FATAL_EXIT_CODE: i32 = 1;

pub fn render_runtime_error(error: &RuntimeError, style: DiagnosticStyle) -> String {
    match style {
        DiagnosticStyle::Plain => format!("Runtime error: {}", error),
        DiagnosticStyle::Fancy => format!("{:?}", Report::new(error.clone())),
    }
}

pub fn report_runtime_error(error: &RuntimeError) {
    eprintln!("{}", render_runtime_error(error, config().diagnostics));
}

/// Reports `error` and terminates the process. Pending program output is
/// flushed first so it is not lost behind the diagnostic.
pub fn fatal(error: RuntimeError) -> ! {
    platform().flush_out();
    report_runtime_error(&error);
    process::exit(FATAL_EXIT_CODE)
}

pub fn or_fatal<T>(result: RuntimeResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => fatal(error),
    }
}

/// The `panic: <msg>` channel used by generated assertions.
pub fn panic_exit(message: &str) -> ! {
    platform().flush_out();
    eprintln!("panic: {}", message);
    process::exit(FATAL_EXIT_CODE)
}
