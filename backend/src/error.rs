use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::AddPostErrors;
use thiserror::Error;

use crate::poststore;

#[derive(Error, Debug)]
pub enum InternalError {
    #[error("Invalid Post Input")]
    Validation(AddPostErrors),

    #[error("Posts DB Error: {0}")]
    PostsDB(#[from] poststore::Error),
}

impl IntoResponse for InternalError {
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                tracing::info!("invalid post input: {errors:?}");
                (StatusCode::BAD_REQUEST, "invalid post input").into_response()
            }

            //Note: do not trace these as error
            Self::PostsDB(e) if matches!(e, poststore::Error::ItemNotFound) => {
                tracing::info!("item not found: {e}");
                (StatusCode::NOT_FOUND, "").into_response()
            }

            Self::PostsDB(e) if matches!(e, poststore::Error::Conflict) => {
                tracing::info!("duplicate slug: {e}");

                (
                    StatusCode::CONFLICT,
                    String::from("a post with this title already exists"),
                )
                    .into_response()
            }

            Self::PostsDB(e) if matches!(e, poststore::Error::Concurrency) => {
                tracing::info!("concurrency collision: {e}");

                (
                    StatusCode::CONFLICT,
                    String::from("DB: Conditional write failed"),
                )
                    .into_response()
            }

            Self::PostsDB(e) => convert_error(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, InternalError>;

fn convert_error<E: std::error::Error>(e: E) -> Response {
    tracing::error!("convert_error: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, "").into_response()
}
