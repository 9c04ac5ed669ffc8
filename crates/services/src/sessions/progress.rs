/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen; equals `total` once finished.
    pub position: usize,
    pub total: usize,
    pub correct: u64,
    pub answered: u64,
    pub is_complete: bool,
}
