//! Logging facilities for Lattice Select.
//!
//! Lattice Select uses the `tracing` crate for instrumentation. Library code
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_select=debug")
//!         .init();
//! }
//! ```
//!
//! The constants below name the targets and spans used across the workspace,
//! so filters can be written against stable strings.

/// Span names used throughout Lattice Select for tracing.
pub mod span_names {
    /// Input handling span (click / key press on an option).
    pub const INPUT: &str = "lattice_select::input";
    /// Slot content re-resolution span.
    pub const TEXT: &str = "lattice_select::text";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "lattice_select_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_select_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "lattice_select_core::property";
    /// Display / typeahead text resolution target.
    pub const TEXT: &str = "lattice_select::text";
    /// Pointer and keyboard intent mapping target.
    pub const INPUT: &str = "lattice_select::input";
    /// Accessibility attribute computation target.
    pub const ACCESSIBILITY: &str = "lattice_select::accessibility";
    /// Option controller and host element target.
    pub const OPTION: &str = "lattice_select::option";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_crate_prefixes() {
        for target in [targets::SIGNAL, targets::PROPERTY] {
            assert!(target.starts_with(targets::CORE), "{target}");
        }
        for target in [
            targets::TEXT,
            targets::INPUT,
            targets::ACCESSIBILITY,
            targets::OPTION,
        ] {
            assert!(target.starts_with("lattice_select::"), "{target}");
        }
    }
}
