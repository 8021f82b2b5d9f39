use alloc::string::String;

/// Errors reported before a layout pass is allowed to run.
///
/// The engine has no I/O and no transient failure modes; data-shape
/// anomalies (degenerate size hints, out-of-range queries) are recovered
/// locally and never surface here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutError {
    /// A resolved column count was zero. The pass divides the available
    /// width by the column count, so this is rejected up front instead of
    /// producing a nonsensical layout.
    #[error("{}", invalid_configuration_message(.section))]
    InvalidConfiguration {
        /// The offending section, or `None` when the global column count is
        /// itself invalid.
        section: Option<usize>,
    },
}

fn invalid_configuration_message(section: &Option<usize>) -> String {
    match section {
        Some(s) => {
            alloc::format!("invalid configuration: column count for section {s} must be at least 1")
        }
        None => String::from("invalid configuration: column count must be at least 1"),
    }
}
