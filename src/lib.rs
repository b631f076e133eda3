//! Municipal council mandate calculation for volby.cz election statements.

pub mod allocation;
pub mod formats;
pub mod model;
pub mod reports;
pub mod source;
