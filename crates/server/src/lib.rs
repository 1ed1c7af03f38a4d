use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use notify::{NotificationSink, TracingNotifier};
pub use server::{CurrentUser, ServerState, router, run_with_listener, spawn_with_listener};
pub use store::{ExpenseStore, Group, GroupDirectory, Member, MemoryStore};

mod expenses;
mod groups;
mod notify;
mod server;
mod settlements;
mod store;

pub mod types {
    pub mod group {
        pub use api_types::group::{
            GroupCreated, GroupDetail, GroupNew, GroupUpdate, MemberUpsert, MemberView,
        };
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseCreated, ExpenseNew, ExpenseView, ShareNew, ShareView};
    }

    pub mod settlement {
        pub use api_types::settlement::{
            BalanceView, BalancesResponse, GroupSummary, SettlementResponse, SummaryResponse,
            TransferView, TransfersResponse,
        };
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Forbidden(String),
    Conflict(String),
    Invalid(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        ApiError::Conflict(_) => StatusCode::CONFLICT,
        ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::Generic(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(&self);
        let error = match self {
            ApiError::NotFound(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::Generic(msg) => msg,
            ApiError::Invalid(err) => err.to_string(),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(value: EngineError) -> Self {
        Self::Invalid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let res = ApiError::NotFound("group not exists".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let res = ApiError::Forbidden("not an admin".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_maps_to_409() {
        let res = ApiError::Conflict("member already exists".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res =
            ApiError::from(EngineError::InvalidExpense("bad".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ApiError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
