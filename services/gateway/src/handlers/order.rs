use crate::error::AppError;
use crate::models::CancelResponse;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use types::numeric::{Price, Quantity};
use types::order::{now_nanos, Order, Side};

/// Prices are scaled to a fixed number of decimal places before they become
/// tree keys, so lexically different inputs collapse to one price level.
const PRICE_DP: u32 = 4;

fn parse_price(raw: &str) -> Result<Price, AppError> {
    let decimal = Decimal::from_str(raw)
        .map_err(|_| AppError::BadRequest(format!("malformed price: {raw}")))?;
    let scaled = decimal.round_dp_with_strategy(PRICE_DP, RoundingStrategy::MidpointAwayFromZero);
    Price::try_new(scaled).ok_or_else(|| AppError::BadRequest(format!("invalid price: {raw}")))
}

fn parse_quantity(raw: &str) -> Result<Quantity, AppError> {
    let decimal = Decimal::from_str(raw)
        .map_err(|_| AppError::BadRequest(format!("malformed quantity: {raw}")))?;
    Quantity::try_new(decimal)
        .ok_or_else(|| AppError::BadRequest(format!("invalid quantity: {raw}")))
}

/// `POST /{SIDE}/{MARKET}/{PRICE}/{QUANTITY}`
///
/// Accepted orders answer 200 with no body; anything malformed answers 400
/// before the order reaches the engine.
pub async fn submit_order(
    State(state): State<AppState>,
    Path((side, market, price, quantity)): Path<(String, String, String, String)>,
) -> Result<StatusCode, AppError> {
    let side: Side = side
        .parse()
        .map_err(|err: types::errors::OrderError| AppError::BadRequest(err.to_string()))?;
    let market = state
        .dispatcher
        .registered_market_name(&market)
        .ok_or(AppError::UnknownMarket(market))?;
    let price = parse_price(&price)?;
    let quantity = parse_quantity(&quantity)?;

    let order = Order::new(
        state.next_order_id(),
        market,
        side,
        price,
        quantity,
        now_nanos(),
    );
    state.dispatcher.send(order)?;
    Ok(StatusCode::OK)
}

/// `DELETE /orders/{MARKET}/{SIDE}/{PRICE}/{ORDER_ID}`
///
/// The cancel is routed through the market's consumer; `cancelled: false`
/// means no such order rested at that price level.
pub async fn cancel_order(
    State(state): State<AppState>,
    Path((market, side, price, order_id)): Path<(String, String, String, u64)>,
) -> Result<Json<CancelResponse>, AppError> {
    let side: Side = side
        .parse()
        .map_err(|err: types::errors::OrderError| AppError::BadRequest(err.to_string()))?;
    let market = state
        .dispatcher
        .registered_market_name(&market)
        .ok_or(AppError::UnknownMarket(market))?;
    let price = parse_price(&price)?;

    let cancelled = state
        .dispatcher
        .cancel(&market, order_id.into(), side, price)?;
    Ok(Json(CancelResponse { cancelled }))
}
