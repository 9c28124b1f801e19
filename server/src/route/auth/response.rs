use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{SessionDto, UserDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    message: &'static str,
    token: String,
    user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    user: UserResponse,
}

pub struct RegisteredResponse(SessionResponse);

impl IntoResponse for RegisteredResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Session for a freshly created account.
pub struct Registered(pub SessionDto);

pub struct Presenter;

impl Exhaust<Registered> for Presenter {
    type To = RegisteredResponse;
    fn emit(&self, input: Registered) -> Self::To {
        let SessionDto { user, token } = input.0;
        RegisteredResponse(SessionResponse {
            message: "User registered successfully",
            token,
            user: user.into(),
        })
    }
}

impl Exhaust<SessionDto> for Presenter {
    type To = Json<SessionResponse>;
    fn emit(&self, input: SessionDto) -> Self::To {
        Json(SessionResponse {
            message: "Login successful",
            token: input.token,
            user: input.user.into(),
        })
    }
}

impl Exhaust<UserDto> for Presenter {
    type To = Json<ProfileResponse>;
    fn emit(&self, input: UserDto) -> Self::To {
        Json(ProfileResponse { user: input.into() })
    }
}
