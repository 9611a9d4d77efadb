use std::fmt;

use crate::models::{Role, User};

/// Where the caller should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Events,
    Event(String),
    Order(String),
    ManageEvents,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Login => f.write_str("/auth/login"),
            Route::Events => f.write_str("/events"),
            Route::Event(id) => write!(f, "/events/{}", id),
            Route::Order(id) => write!(f, "/orders/{}", id),
            Route::ManageEvents => f.write_str("/dashboard/events"),
        }
    }
}

/// Pages that need an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    MyTickets,
    Profile,
    Purchase,
    CreateEvent,
    ManageEvents,
    ManageTickets,
    CreateVenue,
}

const STAFF: &[Role] = &[Role::Admin, Role::Organizer];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Page {
    /// `None` means any logged-in user.
    fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Page::MyTickets | Page::Profile | Page::Purchase => None,
            Page::Dashboard | Page::CreateEvent | Page::ManageEvents => Some(STAFF),
            Page::ManageTickets | Page::CreateVenue => Some(ADMIN_ONLY),
        }
    }

    fn fallback(&self) -> Route {
        match self.allowed_roles() {
            None => Route::Login,
            Some(_) => Route::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Access<'a> {
    Granted(&'a User),
    Redirect(Route),
}

impl<'a> Access<'a> {
    pub fn user(&self) -> Option<&'a User> {
        match self {
            Access::Granted(user) => Some(user),
            Access::Redirect(_) => None,
        }
    }
}

/// Decides access before anything is fetched, so a refused page never renders.
pub fn authorize(user: Option<&User>, page: Page) -> Access<'_> {
    match (user, page.allowed_roles()) {
        (None, _) => Access::Redirect(page.fallback()),
        (Some(user), None) => Access::Granted(user),
        (Some(user), Some(roles)) if user.has_role(roles) => Access::Granted(user),
        (Some(_), Some(_)) => Access::Redirect(page.fallback()),
    }
}
