// ============================================================================
// Logging
// Opt-in tracing subscriber for binaries and tests embedding this crate
// ============================================================================

use tracing::Level;

/// Install a stderr `fmt` subscriber at `level`.
///
/// Returns `false` when a global subscriber is already installed, which
/// leaves the existing one in place.
pub fn init_tracing(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // whichever call wins, only one subscriber can be installed
        let first = init_tracing(Level::DEBUG);
        let second = init_tracing(Level::TRACE);
        assert!(!(first && second));
        assert!(!second);
    }
}
