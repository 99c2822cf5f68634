/// Button and icon set of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Yes/No question. `true` means Yes.
    YesNo,
    /// Yes/No with a warning icon, used before destructive actions.
    YesNoWarning,
    /// Yes/No with an information icon.
    YesNoInfo,
    /// Single OK button with a warning icon.
    OkWarning,
    /// Single OK button with an error icon.
    OkError,
}

/// Asks the user to confirm something.
///
/// For OK-only kinds the return value is `true` once acknowledged.
pub trait Prompt {
    fn confirm(&self, message: &str, kind: PromptKind) -> bool;
}

/// Message shown before the window closes.
pub const QUIT_MESSAGE: &str = "You sure to quit?";

/// Message shown before selected entries are removed.
pub const REMOVE_MESSAGE: &str = "Are you sure to delete all selected entries?";

/// Message shown when Remove is pressed with nothing selected.
pub const SELECT_FIRST_MESSAGE: &str = "Select the items first.";

/// Message shown by the About button.
pub const ABOUT_MESSAGE: &str = "Elevator marks programs to always run as administrator.\n\
Do you want to visit the homepage for the latest updates?";

/// Homepage opened when the About prompt is accepted.
pub const HOMEPAGE: &str = "https://github.com/larukedi/AdminElevator";

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Answers every prompt with a fixed value and records what was asked.
    pub struct ScriptedPrompt {
        pub answer: bool,
        pub asked: RefCell<Vec<(String, PromptKind)>>,
    }

    impl ScriptedPrompt {
        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn confirm(&self, message: &str, kind: PromptKind) -> bool {
            self.asked.borrow_mut().push((message.to_string(), kind));
            match kind {
                PromptKind::OkWarning | PromptKind::OkError => true,
                _ => self.answer,
            }
        }
    }
}
