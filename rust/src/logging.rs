//! Logging macros with verbosity level control.
//!
//! Nothing is printed at verbosity 0, which is the default. The algorithm
//! modules never log; only the pipeline driver and the command-line tool do.
//! - 0: SILENT
//! - 1: STAGES (stage summaries and timings)
//! - 2: DETAILS (component lists, orders, distance vectors)
//! - 3: DEBUG (per-component and per-edge internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_STAGES: u8 = 1;
pub const VERBOSITY_DETAILS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at STAGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_stages {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STAGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DETAILS level (verbosity >= 2).
#[macro_export]
macro_rules! log_details {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DETAILS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(VERBOSITY_SILENT < VERBOSITY_STAGES);
        assert!(VERBOSITY_STAGES < VERBOSITY_DETAILS);
        assert!(VERBOSITY_DETAILS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_silent() {
        let verbosity = VERBOSITY_SILENT;
        log_stages!(verbosity, "stage {}", 1);
        log_details!(verbosity, "details {}", 2);
        log_debug!(verbosity, "debug {}", 3);
    }
}
