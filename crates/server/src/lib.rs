use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

#[cfg(test)]
mod api_tests;
mod budget;
mod intake;
mod payments;
mod retainer;
mod server;

pub mod types {
    pub mod case {
        pub use api_types::case::{CaseCreated, CaseNew};
    }

    pub mod invoice {
        pub use api_types::invoice::{InvoiceBalanceResponse, InvoiceCreated, InvoiceNew};
    }

    pub mod finance_entry {
        pub use api_types::finance_entry::{
            FinanceEntryCreated, FinanceEntryKind, FinanceEntryNew,
        };
    }

    pub mod payment {
        pub use api_types::payment::{
            PaymentNew, PaymentRecorded, PaymentView, RetainerApplication,
        };
    }

    pub mod retainer {
        pub use api_types::retainer::{
            DepositCreated, DepositNew, RetainerEntryView, RetainerLedgerResponse,
        };
    }

    pub mod budget {
        pub use api_types::budget::{BudgetSummaryResponse, WindowQuery};
        pub use api_types::classify::{
            BudgetClassifyQuery, BudgetClassifyResponse, PaymentClassifyQuery,
            PaymentClassifyResponse,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::ConcurrentModification(_) => {
            StatusCode::CONFLICT
        }
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InsufficientRetainerFunds(_)
        | EngineError::PaymentExceedsBalance(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res =
            ServerError::from(EngineError::ConcurrentModification("x".to_string()))
                .into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ServerError::from(EngineError::PaymentExceedsBalance("x".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ServerError::from(EngineError::InsufficientRetainerFunds("x".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
