#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptySession,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptySession => {
                "No questions available with the selected criteria. Please try different settings."
            }
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ViewError {}
