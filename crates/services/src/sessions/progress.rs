/// Header numbers for the question screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub score: usize,
    /// How far through the quiz the current question is, `position / total` as a percent.
    pub percent: u32,
    pub is_complete: bool,
}
