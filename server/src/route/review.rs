use axum::extract::State;
use axum::routing::{get, post, put};
use axum::Router;
use uuid::Uuid;

use application::service::{
    CreateReviewService, DeleteReviewService, GetBookReviewsService, GetUserReviewsService,
    UpdateReviewService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::{Authenticated, ValidJson, ValidPath};
use crate::handler::AppModule;
use crate::route::review::request::{
    CreateRequest, DeleteRequest, GetByBookRequest, Transformer, UpdateRequest,
};
use crate::route::review::response::{Created, Presenter, Updated};

mod request;
pub(in crate::route) mod response;

pub trait ReviewRouter {
    fn route_review(self) -> Self;
}

impl ReviewRouter for Router<AppModule> {
    fn route_review(self) -> Self {
        self.route(
            "/books/:id/reviews",
            get(
                |State(module): State<AppModule>, ValidPath(id): ValidPath<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetByBookRequest::new(id))
                        .handle(|dto| async move { module.get_book_reviews(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reviews",
            post(
                |State(module): State<AppModule>,
                 Authenticated(principal): Authenticated,
                 ValidJson(req): ValidJson<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move {
                            module.create_review(&principal, dto).await.map(Created)
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reviews/mine",
            get(
                |State(module): State<AppModule>, Authenticated(principal): Authenticated| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.get_user_reviews(&principal).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reviews/:id",
            put(
                |State(module): State<AppModule>,
                 Authenticated(principal): Authenticated,
                 ValidPath(id): ValidPath<Uuid>,
                 ValidJson(req): ValidJson<UpdateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move {
                            module.update_review(&principal, dto).await.map(Updated)
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Authenticated(principal): Authenticated,
                 ValidPath(id): ValidPath<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteRequest::new(id))
                        .handle(|dto| async move { module.delete_review(&principal, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
