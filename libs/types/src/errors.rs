//! Error taxonomy
//!
//! Input validation fails fast at the ingress boundary; in-engine operations
//! never fail on well-formed input. A cancel that finds nothing returns
//! `false` rather than an error.

use thiserror::Error;

/// Order input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("unknown side: {0}")]
    UnknownSide(String),
}

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    #[error("unknown market: {symbol}")]
    UnknownMarket { symbol: String },

    #[error("engine is shutting down")]
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_display() {
        let err = OrderError::InvalidQuantity("0".to_string());
        assert_eq!(err.to_string(), "invalid quantity: 0");
    }

    #[test]
    fn test_engine_error_from_order_error() {
        let err: EngineError = OrderError::UnknownSide("HOLD".to_string()).into();
        assert!(matches!(err, EngineError::Order(_)));
    }

    #[test]
    fn test_unknown_market_display() {
        let err = EngineError::UnknownMarket {
            symbol: "XYZ_ABC".to_string(),
        };
        assert!(err.to_string().contains("XYZ_ABC"));
    }
}
