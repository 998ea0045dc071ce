//! Security notice shown to accounts still on a temporary password.
//!
//! Whether to show it is the parent's call (see
//! [`Profile::requires_password_change`](crate::core::profile::Profile::requires_password_change));
//! the notice itself holds no state and always renders the same content.

/// Default change-password destination.
pub const DEFAULT_SETTINGS_PATH: &str = "/settings";

const TITLE: &str = "Actualiza tu contraseña";
const BODY: &str = "Estás usando una contraseña temporal. Por seguridad, cámbiala antes de continuar.";
const ACTION_LABEL: &str = "Cambiar contraseña";

/// Static content of the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeView {
    /// Heading
    pub title: &'static str,
    /// Explanation
    pub body: &'static str,
    /// Label of the single action
    pub action_label: &'static str,
}

/// Password-change prompt wired to a navigation callback.
pub struct SecurityNotice<F>
where
    F: Fn(),
{
    on_go_to_settings: F,
}

impl<F> SecurityNotice<F>
where
    F: Fn(),
{
    /// Creates the notice; `on_go_to_settings` runs when the user picks the action.
    pub const fn new(on_go_to_settings: F) -> Self {
        Self { on_go_to_settings }
    }

    /// Content to display. Identical on every call.
    #[must_use]
    pub const fn view(&self) -> NoticeView {
        NoticeView {
            title: TITLE,
            body: BODY,
            action_label: ACTION_LABEL,
        }
    }

    /// The user chose to change their password.
    pub fn go_to_settings(&self) {
        (self.on_go_to_settings)();
    }
}
