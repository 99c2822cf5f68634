use elevator_core::{Prompt, PromptKind};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONQUESTION, MB_ICONWARNING, MB_OK, MB_YESNO,
    MESSAGEBOX_STYLE, MessageBoxW,
};
use windows::core::PCWSTR;

use crate::wide;

/// Modal `MessageBoxW` prompt owned by the chrome window.
pub struct MessageBoxPrompt {
    owner: Option<HWND>,
    caption: Vec<u16>,
}

impl MessageBoxPrompt {
    pub fn new(owner: Option<HWND>, caption: &str) -> Self {
        Self {
            owner,
            caption: wide(caption),
        }
    }
}

impl Prompt for MessageBoxPrompt {
    fn confirm(&self, message: &str, kind: PromptKind) -> bool {
        let text = wide(message);
        let style = style_for(kind);
        // SAFETY: both strings are NUL-terminated and outlive the call.
        let result = unsafe {
            MessageBoxW(
                self.owner,
                PCWSTR(text.as_ptr()),
                PCWSTR(self.caption.as_ptr()),
                style,
            )
        };
        match kind {
            PromptKind::OkWarning | PromptKind::OkError => true,
            _ => result == IDYES,
        }
    }
}

fn style_for(kind: PromptKind) -> MESSAGEBOX_STYLE {
    match kind {
        PromptKind::YesNo => MB_YESNO | MB_ICONQUESTION,
        PromptKind::YesNoWarning => MB_YESNO | MB_ICONWARNING,
        PromptKind::YesNoInfo => MB_YESNO | MB_ICONINFORMATION,
        PromptKind::OkWarning => MB_OK | MB_ICONWARNING,
        PromptKind::OkError => MB_OK | MB_ICONERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_kinds_have_a_single_button() {
        assert_eq!(style_for(PromptKind::OkError), MB_OK | MB_ICONERROR);
        assert_eq!(style_for(PromptKind::OkWarning), MB_OK | MB_ICONWARNING);
    }

    #[test]
    fn destructive_questions_warn() {
        assert_eq!(style_for(PromptKind::YesNoWarning), MB_YESNO | MB_ICONWARNING);
    }
}
