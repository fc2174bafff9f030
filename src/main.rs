//! tpl CLI entry point
//!
//! Parses the command line, runs the invocation with access to piped standard input and
//! turns failures into exit codes:
//! - usage errors: clap's own message and exit code 2
//! - fatal template-function failures: `fatal:` diagnostic, the child's exit code or 1
//! - everything else: `error:` diagnostic, exit code 1

use tpl_cli::cli::Invocation;
use tpl_cli::core::{fatal_exit, user_friendly_error};
use tpl_cli::data::read_stdin_if_piped;
use tracing_subscriber::EnvFilter;

fn main() {
    let invocation = match Invocation::try_parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => e.exit(),
    };

    init_logging(invocation.verbose());

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = invocation.execute(read_stdin_if_piped, &mut stdout) {
        if let Some(fatal) = fatal_exit(&e) {
            fatal.display();
            std::process::exit(fatal.code);
        }

        user_friendly_error(e).display();
        std::process::exit(1);
    }
}

// Logs go to stderr; stdout carries rendered output. RUST_LOG overrides --verbose.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
