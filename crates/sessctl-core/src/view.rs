//! Pure state-to-view reconciliation.
//!
//! Maps the session state to the set of visible sections and the profile
//! card contents, with no knowledge of any rendering technology.

use crate::session::AuthState;

/// A visible section of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Login/register forms (anonymous only).
    Auth,
    /// The main authenticated area.
    Main,
    /// The signed-in user banner.
    UserInfo,
    /// Password-set form, for external-identity accounts without a password.
    SetPassword,
}

/// Profile card derived from the user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Name, falling back to the email address.
    pub display_name: String,
    pub email: String,
    pub password_set: bool,
    pub google_connected: bool,
}

/// Everything a renderer needs for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub sections: Vec<Section>,
    pub profile: Option<Profile>,
}

impl ViewModel {
    pub fn is_visible(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}

/// Computes the view model for a session state.
pub fn reconcile(state: &AuthState) -> ViewModel {
    match state {
        AuthState::Anonymous => ViewModel {
            sections: vec![Section::Auth],
            profile: None,
        },
        AuthState::Authenticated(session) => {
            let user = &session.user;
            let mut sections = vec![Section::Main, Section::UserInfo];
            // The flags stay independent; only this combination adds a
            // section.
            if user.uid.is_some() && !user.has_password {
                sections.push(Section::SetPassword);
            }

            let display_name = if user.name.is_empty() {
                user.email.clone()
            } else {
                user.name.clone()
            };

            ViewModel {
                sections,
                profile: Some(Profile {
                    display_name,
                    email: user.email.clone(),
                    password_set: user.has_password,
                    google_connected: user.uid.is_some(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, User};

    fn authenticated(has_password: bool, uid: Option<&str>) -> AuthState {
        AuthState::Authenticated(Session {
            user: User {
                id: "u-1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                has_password,
                uid: uid.map(str::to_string),
            },
            token: "tok".to_string(),
        })
    }

    #[test]
    fn anonymous_shows_only_auth_section() {
        let vm = reconcile(&AuthState::Anonymous);
        assert_eq!(vm.sections, vec![Section::Auth]);
        assert!(vm.profile.is_none());
    }

    #[test]
    fn authenticated_shows_main_and_user_info() {
        let vm = reconcile(&authenticated(true, None));
        assert!(vm.is_visible(Section::Main));
        assert!(vm.is_visible(Section::UserInfo));
        assert!(!vm.is_visible(Section::Auth));
        assert!(!vm.is_visible(Section::SetPassword));
    }

    #[test]
    fn set_password_visible_only_for_passwordless_external_accounts() {
        assert!(reconcile(&authenticated(false, Some("ext-1"))).is_visible(Section::SetPassword));
        assert!(!reconcile(&authenticated(true, Some("ext-1"))).is_visible(Section::SetPassword));
        assert!(!reconcile(&authenticated(false, None)).is_visible(Section::SetPassword));
        assert!(!reconcile(&authenticated(true, None)).is_visible(Section::SetPassword));
    }

    #[test]
    fn profile_flags_follow_the_user_record() {
        let vm = reconcile(&authenticated(false, Some("ext-1")));
        let profile = vm.profile.unwrap();
        assert!(!profile.password_set);
        assert!(profile.google_connected);
        assert_eq!(profile.display_name, "Ada");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let state = AuthState::Authenticated(Session {
            user: User {
                id: "u-2".to_string(),
                name: String::new(),
                email: "noname@example.com".to_string(),
                has_password: true,
                uid: None,
            },
            token: "tok".to_string(),
        });
        let vm = reconcile(&state);
        assert_eq!(vm.profile.unwrap().display_name, "noname@example.com");
    }
}
