/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choice ids to select (or toggle, for multiple-choice questions).
    Select(Vec<String>),
    Submit,
    Next,
    Review,
    Restart,
    Help,
    Quit,
    /// A blank line: submit if possible, otherwise move on.
    Empty,
}

impl Command {
    /// Keywords are matched case-insensitively; anything else is a list of choice ids
    /// separated by whitespace or commas.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "submit" => Self::Submit,
            "next" => Self::Next,
            "review" => Self::Review,
            "restart" => Self::Restart,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Select(
                line.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <ids>     select choices by id, e.g. `B` or `A C` (toggles on multiple-choice)
  submit    grade the current selection (a blank line also submits)
  next      go to the next question or the results (a blank line also works)
  review    show every question with the correct answers (after the quiz)
  restart   start a new quiz with the same settings (after the quiz)
  quit      leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(Command::parse(" Submit "), Command::Submit);
        assert_eq!(Command::parse("NEXT"), Command::Next);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn other_input_is_choice_ids() {
        assert_eq!(
            Command::parse("a, C  d"),
            Command::Select(vec!["a".into(), "C".into(), "d".into()])
        );
    }
}
