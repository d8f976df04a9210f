//! Request extractor for the signed-in user.
//!
//! The identity provider shares the session cookie key and stores the user's
//! profile as JSON in the session identity. Handlers that only need to know
//! whether someone is signed in take `Option<AuthenticatedUser>`.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::auth::AuthenticatedUser;

fn user_from_request(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|e| ErrorUnauthorized(e.to_string()))?;
    let profile = identity.id().map_err(|e| ErrorUnauthorized(e.to_string()))?;
    serde_json::from_str(&profile).map_err(|e| {
        log::warn!("Session identity is not a valid user profile: {e}");
        ErrorUnauthorized("invalid identity")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(user_from_request(req))
    }
}
