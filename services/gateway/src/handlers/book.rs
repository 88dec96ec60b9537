use crate::error::AppError;
use crate::models::{QuoteResponse, SnapshotResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;

pub async fn liveness() -> &'static str {
    "matching service is up"
}

/// `GET /book/{MARKET}` — aggregated depth snapshot
pub async fn snapshot(
    State(state): State<AppState>,
    Path(market): Path<String>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let market = state
        .dispatcher
        .registered_market_name(&market)
        .ok_or(AppError::UnknownMarket(market))?;

    let levels = state.dispatcher.snapshot(&market, state.depth)?;
    Ok(Json(SnapshotResponse {
        market: market.to_string(),
        levels,
    }))
}

/// `GET /quote/{MARKET}` — best prices, mid-quote, and relative spread
pub async fn quote(
    State(state): State<AppState>,
    Path(market): Path<String>,
) -> Result<Json<QuoteResponse>, AppError> {
    let market = state
        .dispatcher
        .registered_market_name(&market)
        .ok_or(AppError::UnknownMarket(market))?;

    let top = state.dispatcher.top_of_book(&market)?;
    Ok(Json(QuoteResponse::from_top(market.to_string(), top)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::order::submit_order;
    use matching_engine::router::Dispatcher;
    use matching_engine::telemetry::NoopTelemetry;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use types::ids::MarketId;
    use types::order::Side;

    fn test_state() -> AppState {
        let dispatcher = Arc::new(Dispatcher::new(
            &[MarketId::new("BTC_USD")],
            1,
            Arc::new(NoopTelemetry),
        ));
        AppState::new(dispatcher, 10)
    }

    async fn submit(state: &AppState, side: &str, price: &str, qty: &str) {
        submit_order(
            State(state.clone()),
            Path((
                side.to_string(),
                "BTC_USD".to_string(),
                price.to_string(),
                qty.to_string(),
            )),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_quote_over_routed_orders() {
        let state = test_state();
        submit(&state, "BUY", "99", "1").await;
        submit(&state, "SELL", "100", "1").await;

        let Json(response) = quote(State(state.clone()), Path("btc_usd".to_string()))
            .await
            .unwrap();
        assert_eq!(response.best_buy, Decimal::from(99));
        assert_eq!(response.best_sell, Decimal::from(100));
        assert_eq!(response.quote, Decimal::from_str_exact("99.5").unwrap());
        assert_eq!(response.spread, Decimal::from_str_exact("0.01").unwrap());

        state.dispatcher.shutdown();
    }

    #[tokio::test]
    async fn test_snapshot_shape() {
        let state = test_state();
        submit(&state, "BUY", "99", "1").await;
        submit(&state, "SELL", "101", "4").await;

        let Json(response) = snapshot(State(state.clone()), Path("BTC_USD".to_string()))
            .await
            .unwrap();
        assert_eq!(response.levels.len(), 2);
        assert_eq!(response.levels[0].side, Side::Buy);
        assert_eq!(response.levels[1].side, Side::Sell);

        state.dispatcher.shutdown();
    }

    #[tokio::test]
    async fn test_unknown_market_rejected() {
        let state = test_state();
        let result = quote(State(state.clone()), Path("NOPE".to_string())).await;
        assert!(matches!(result, Err(AppError::UnknownMarket(_))));
        state.dispatcher.shutdown();
    }
}
