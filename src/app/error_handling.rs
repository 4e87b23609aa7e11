//! Fatal error reporting.

use tracing::error;

/// Print `error` to stderr and exit with status 1.
///
/// Underlying causes are listed only at `-v` and above.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);

    eprintln!("Error: {error}");
    if verbose > 0 {
        for cause in error.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }
    }

    std::process::exit(1)
}
