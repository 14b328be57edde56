//! Error handling and exit codes.

use picalc_core::calculator::PiError;
use picalc_core::constants::exit_codes;
use picalc_orchestration::OrchestrationError;

/// Exit code for an engine error.
pub fn handle_error(err: &PiError) -> i32 {
    match err {
        PiError::InvalidArgument(_) => exit_codes::ERROR_CONFIG,
        PiError::ArithmeticFailure(_) => exit_codes::ERROR_GENERIC,
        PiError::Cancelled => exit_codes::ERROR_CANCELED,
        PiError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
    }
}

/// Exit code for a top-level error, from the first engine error in its chain.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            cause.downcast_ref::<PiError>().or_else(|| {
                match cause.downcast_ref::<OrchestrationError>() {
                    Some(OrchestrationError::Engine(e)) => Some(e),
                    _ => None,
                }
            })
        })
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
