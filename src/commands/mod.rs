mod batches;
mod calculate;

pub use batches::batches;
pub use calculate::{calculate, CalculateOptions};

use colored::Colorize;
use council_mandates::source::{is_municipality_code, DEFAULT_MUNICIPALITY};

/// Fall back to the default municipality when `code` is malformed.
pub fn resolve_municipality(code: &str) -> String {
    if is_municipality_code(code) {
        code.to_string()
    } else {
        eprintln!(
            "{} Organization ID: {} has wrong format. Using default one..",
            "⚠️".yellow(),
            code
        );
        DEFAULT_MUNICIPALITY.to_string()
    }
}
