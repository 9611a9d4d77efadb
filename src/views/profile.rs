use tracing::warn;

use crate::api::ApiClient;
use crate::auth::Page;
use crate::models::User;
use crate::views::{format_date, gate, Gated};

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: User,
    /// False when the backend lookup failed and the saved session is shown instead.
    pub fresh: bool,
}

impl Profile {
    pub fn member_since(&self) -> String {
        format_date(self.user.registration_date)
    }

    pub fn phone(&self) -> &str {
        self.user.phone.as_deref().unwrap_or("")
    }
}

pub async fn load_profile(api: &ApiClient, user: Option<&User>) -> Gated<Profile> {
    let session_user = gate!(user, Page::Profile);

    match api.get_user(&session_user.id).await {
        Ok(user) => Gated::Ready(Profile { user, fresh: true }),
        Err(err) => {
            warn!(user_id = %session_user.id, error = %err, "Profile lookup failed, using session");
            Gated::Ready(Profile {
                user: session_user.clone(),
                fresh: false,
            })
        }
    }
}
