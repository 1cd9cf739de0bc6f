//! Session
//!
//! Explicit application state for the presentation layer: which screen is
//! showing and who is signed in. Role mapping here is a mock, not an auth
//! system — the prototype routes on the email address alone.

use thiserror::Error;

/// Errors raised by session navigation.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// The current role may not open the requested view.
    #[error("{role:?} may not open {view:?}")]
    AccessDenied {
        /// The signed-in role, if any.
        role: Option<Role>,
        /// The view that was requested.
        view: View,
    },
}

/// Who is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A student or staff customer.
    Student,
    /// A stall operator.
    StallOwner,
    /// A system administrator.
    Admin,
}

impl Role {
    /// The view this role lands on straight after login.
    #[must_use]
    pub fn landing_view(self) -> View {
        match self {
            Self::Student => View::Menu,
            Self::StallOwner => View::Tracking,
            Self::Admin => View::Reports,
        }
    }

    /// Whether this role may open the given view.
    #[must_use]
    pub fn may_view(self, view: View) -> bool {
        if view.is_public() {
            return true;
        }

        match self {
            Self::Student => matches!(view, View::Menu | View::MyOrders | View::Confirmation),
            Self::StallOwner => matches!(view, View::Tracking | View::MenuManage),
            // Admins also see the operator views.
            Self::Admin => matches!(
                view,
                View::Reports | View::Stalls | View::Tracking | View::MenuManage
            ),
        }
    }
}

/// Maps a login email to a role.
///
/// Mocked on purpose: an address containing "admin" is an administrator, one
/// containing "owner" is a stall operator, anything else is a student.
#[must_use]
pub fn role_for_email(email: &str) -> Role {
    if email.contains("admin") {
        Role::Admin
    } else if email.contains("owner") {
        Role::StallOwner
    } else {
        Role::Student
    }
}

/// The screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Landing page.
    Home,
    /// Login/registration screen.
    Login,
    /// Menu browsing and cart.
    Menu,
    /// The customer's own orders.
    MyOrders,
    /// Post-checkout confirmation.
    Confirmation,
    /// Operator order-tracking dashboard.
    Tracking,
    /// Operator menu management.
    MenuManage,
    /// Admin sales reports.
    Reports,
    /// Admin stall management.
    Stalls,
    /// Public stall listing.
    Shops,
    /// About page.
    About,
}

impl View {
    /// Whether the view is reachable without signing in.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::Shops | Self::About)
    }
}

/// Per-process application state, passed to the presentation layer instead of
/// living in a global.
#[derive(Debug)]
pub struct Session {
    role: Option<Role>,
    view: View,
}

impl Session {
    /// Creates a signed-out session on the home view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            role: None,
            view: View::Home,
        }
    }

    /// Signs in with the given email, routing to the role's landing view.
    pub fn login(&mut self, email: &str) -> Role {
        let role = role_for_email(email);

        self.role = Some(role);
        self.view = role.landing_view();

        role
    }

    /// Signs out and returns to the home view.
    pub fn logout(&mut self) {
        self.role = None;
        self.view = View::Home;
    }

    /// Opens a view, subject to the capability check for the current role.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::AccessDenied`] if the current role (or a
    /// signed-out session) may not open the view.
    pub fn navigate(&mut self, view: View) -> Result<(), SessionError> {
        let allowed = match self.role {
            Some(role) => role.may_view(view),
            None => view.is_public(),
        };

        if !allowed {
            return Err(SessionError::AccessDenied {
                role: self.role,
                view,
            });
        }

        self.view = view;

        Ok(())
    }

    /// The signed-in role, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// The view currently showing.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_map_to_roles() {
        assert_eq!(role_for_email("admin@adnu.edu.ph"), Role::Admin);
        assert_eq!(role_for_email("owner@adnu.edu.ph"), Role::StallOwner);
        assert_eq!(role_for_email("maria.santos@adnu.edu.ph"), Role::Student);
    }

    #[test]
    fn login_routes_to_landing_view() {
        let mut session = Session::new();

        assert_eq!(session.login("owner@adnu.edu.ph"), Role::StallOwner);
        assert_eq!(session.view(), View::Tracking);

        assert_eq!(session.login("admin@adnu.edu.ph"), Role::Admin);
        assert_eq!(session.view(), View::Reports);

        assert_eq!(session.login("maria.santos@adnu.edu.ph"), Role::Student);
        assert_eq!(session.view(), View::Menu);
    }

    #[test]
    fn students_cannot_open_operator_views() {
        let mut session = Session::new();
        session.login("maria.santos@adnu.edu.ph");

        assert!(matches!(
            session.navigate(View::Tracking),
            Err(SessionError::AccessDenied {
                role: Some(Role::Student),
                view: View::Tracking,
            })
        ));

        // A rejected navigation leaves the view unchanged.
        assert_eq!(session.view(), View::Menu);
    }

    #[test]
    fn signed_out_sessions_only_reach_public_views() {
        let mut session = Session::new();

        assert!(session.navigate(View::About).is_ok());
        assert_eq!(session.view(), View::About);

        assert!(matches!(
            session.navigate(View::Menu),
            Err(SessionError::AccessDenied { role: None, .. })
        ));
    }

    #[test]
    fn logout_clears_role_and_returns_home() {
        let mut session = Session::new();

        session.login("owner@adnu.edu.ph");
        session.logout();

        assert_eq!(session.role(), None);
        assert_eq!(session.view(), View::Home);
    }

    #[test]
    fn admins_see_operator_views_too() {
        let mut session = Session::new();
        session.login("admin@adnu.edu.ph");

        assert!(session.navigate(View::Stalls).is_ok());
        assert!(session.navigate(View::Tracking).is_ok());
        assert!(matches!(
            session.navigate(View::MyOrders),
            Err(SessionError::AccessDenied { .. })
        ));
    }
}
