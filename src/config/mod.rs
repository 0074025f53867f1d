/// Configuration subsystem - Editor settings and preferences
///
/// This module handles loading configuration from .hexabyterc files and
/// applying it to an editing session.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
