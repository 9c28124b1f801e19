use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;

use application::service::{GetUserService, LoginService, RegisterUserService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{Authenticated, ValidJson};
use crate::handler::AppModule;
use crate::route::auth::request::{LoginRequest, RegisterRequest, Transformer};
use crate::route::auth::response::{Presenter, Registered};

mod request;
mod response;

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl AuthRouter for Router<AppModule> {
    fn route_auth(self) -> Self {
        self.route(
            "/auth/register",
            post(
                |State(module): State<AppModule>, ValidJson(req): ValidJson<RegisterRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.register_user(dto).await.map(Registered) })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth/login",
            post(
                |State(module): State<AppModule>, ValidJson(req): ValidJson<LoginRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.login(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth/me",
            get(
                |State(module): State<AppModule>, Authenticated(principal): Authenticated| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.get_user(&principal).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
