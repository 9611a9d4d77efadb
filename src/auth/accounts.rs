use crate::models::{Role, User, UserStatus};

/// Password shared by every seeded account. Credentials are checked locally, never by the backend.
pub const SEEDED_PASSWORD: &str = "password";

struct SeededAccount {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    role: Role,
}

const SEEDED_ACCOUNTS: [SeededAccount; 3] = [
    SeededAccount {
        id: "1",
        name: "Admin User",
        email: "admin@example.com",
        role: Role::Admin,
    },
    SeededAccount {
        id: "2",
        name: "Event Organizer",
        email: "organizer@example.com",
        role: Role::Organizer,
    },
    SeededAccount {
        id: "3",
        name: "John Customer",
        email: "customer@example.com",
        role: Role::Customer,
    },
];

pub fn authenticate(email: &str, password: &str) -> Option<User> {
    if password != SEEDED_PASSWORD {
        return None;
    }

    SEEDED_ACCOUNTS
        .iter()
        .find(|account| account.email == email.trim())
        .map(|account| User {
            id: account.id.to_string(),
            name: account.name.to_string(),
            email: account.email.to_string(),
            phone: None,
            role: account.role,
            status: UserStatus::Active,
            registration_date: None,
        })
}
