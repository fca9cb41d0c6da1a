// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_session, SESSION_HEADER},
    error::ErrorBody,
    state::AppState,
    wallet::HistoryFilter,
};

pub mod deposits;
pub mod extract;
pub mod history;
pub mod session;
pub mod wallet;
pub mod withdrawals;

/// All gateway routes behind the session middleware.
///
/// The middleware wraps the fallback too, so unknown paths without a valid
/// session answer 401 rather than 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .route("/balances", get(wallet::balances))
        .route("/sign", post(wallet::sign))
        .route("/verify", post(wallet::verify))
        .route("/tokens", get(wallet::tokens))
        .route("/deposit/estimate", post(deposits::estimate_deposit))
        .route("/deposit", post(deposits::deposit))
        .route("/withdraw", post(withdrawals::withdraw))
        .route("/deposits", get(history::deposits))
        .route("/transfers", get(history::transfers))
        .route("/transactions", get(history::transactions))
        .route("/pending-withdrawals", get(withdrawals::pending_withdrawals))
        .route("/claim-withdrawals", post(withdrawals::claim_withdrawals))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}

/// The served application: routes, optional API docs and the HTTP layers.
pub fn app(state: AppState, enable_docs: bool) -> Router {
    let mut app = router(state);

    if enable_docs {
        app = app.merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CorsLayer::permissive()),
    )
}

struct SessionHeaderAddon;

impl Modify for SessionHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(SESSION_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        session::login,
        session::logout,
        wallet::balances,
        wallet::sign,
        wallet::verify,
        wallet::tokens,
        deposits::estimate_deposit,
        deposits::deposit,
        withdrawals::withdraw,
        withdrawals::pending_withdrawals,
        withdrawals::claim_withdrawals,
        history::deposits,
        history::transfers,
        history::transactions
    ),
    components(
        schemas(
            ErrorBody,
            HistoryFilter,
            session::LoginRequest,
            session::LoginResponse,
            session::StatusResponse,
            wallet::BalancesResponse,
            wallet::TokensResponse,
            wallet::SignRequest,
            wallet::SignResponse,
            wallet::VerifyRequest,
            wallet::VerifyResponse,
            deposits::DepositRequest,
            deposits::GasEstimateResponse,
            deposits::DepositResponse,
            withdrawals::WithdrawRequest,
            withdrawals::WithdrawResponse,
            withdrawals::PendingWithdrawalsResponse,
            withdrawals::ClaimWithdrawalsRequest,
            withdrawals::ClaimWithdrawalsResponse,
            history::DepositsResponse,
            history::TransfersResponse,
            history::TransactionsResponse
        )
    ),
    modifiers(&SessionHeaderAddon),
    tags(
        (name = "Session", description = "Login and logout"),
        (name = "Wallet", description = "Balances, tokens and message signing"),
        (name = "Deposits", description = "L1 to INTMAX deposits"),
        (name = "Withdrawals", description = "INTMAX to L1 withdrawals"),
        (name = "History", description = "Deposit, transfer and transaction history")
    )
)]
pub struct ApiDoc;
