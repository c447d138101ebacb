/// ProgressReporter port for user-facing progress messages
///
/// Implementations write to stderr (or capture messages in tests) so that
/// stdout stays reserved for the rendered graph.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a batch operation
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Total number of items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
