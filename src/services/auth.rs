use crate::domain::auth::AuthenticatedUser;

use super::{ServiceError, ServiceResult};

/// Gate for the seller dashboard.
///
/// No identity yields [`ServiceError::Unauthorized`] so the caller can show a
/// sign-in prompt; a signed-in user without the admin role gets
/// [`ServiceError::NotFound`] so the dashboard stays hidden.
pub fn ensure_admin(user: Option<&AuthenticatedUser>) -> ServiceResult<&AuthenticatedUser> {
    match user {
        None => Err(ServiceError::Unauthorized),
        Some(user) if user.is_admin() => Ok(user),
        Some(user) => {
            log::warn!("User {} without admin role requested the dashboard", user.sub);
            Err(ServiceError::NotFound)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ADMIN_ROLE;
    use crate::domain::auth::UserMetadata;

    pub(crate) fn user_with_role(role: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user_1".into(),
            email: Some("seller@example.com".into()),
            name: Some("Seller".into()),
            public_metadata: UserMetadata {
                role: role.map(str::to_string),
            },
        }
    }

    #[test]
    fn anonymous_visitors_must_sign_in() {
        assert_eq!(ensure_admin(None), Err(ServiceError::Unauthorized));
    }

    #[test]
    fn non_admins_see_not_found() {
        let user = user_with_role(Some("customer"));
        assert_eq!(ensure_admin(Some(&user)), Err(ServiceError::NotFound));
        let user = user_with_role(None);
        assert_eq!(ensure_admin(Some(&user)), Err(ServiceError::NotFound));
    }

    #[test]
    fn admins_pass() {
        let user = user_with_role(Some(ADMIN_ROLE));
        assert_eq!(ensure_admin(Some(&user)).unwrap().sub, "user_1");
    }
}
