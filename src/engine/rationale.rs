use serde::{Deserialize, Serialize};
use std::fmt;

//why the target strategy did (or did not) trade on a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeRationale {
    InitialEntry {
        capital: f64,
        leverage: f64,
    },
    //bought: notional fell below target
    AddOnDecline {
        price_delta: f64,
        quantity: i64,
        leverage: f64,
    },
    //sold: notional rose above target
    ReduceOnRise {
        price_delta: f64,
        quantity: i64,
        leverage: f64,
    },
    Hold {
        price_delta: f64,
        leverage: f64,
    },
}

impl TradeRationale {
    //classifies a post-entry step by the sign of its trade
    pub fn classify(trade: i64, price_delta: f64, leverage: f64) -> Self {
        match trade.signum() {
            1 => TradeRationale::AddOnDecline {
                price_delta,
                quantity: trade,
                leverage,
            },
            -1 => TradeRationale::ReduceOnRise {
                price_delta,
                quantity: -trade,
                leverage,
            },
            _ => TradeRationale::Hold {
                price_delta,
                leverage,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradeRationale::InitialEntry { .. } => "initial entry",
            TradeRationale::AddOnDecline { .. } => "add on decline",
            TradeRationale::ReduceOnRise { .. } => "reduce on rise",
            TradeRationale::Hold { .. } => "hold",
        }
    }
}

impl fmt::Display for TradeRationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeRationale::InitialEntry { capital, leverage } => write!(
                f,
                "initial entry: capital {:.0} x leverage {} = invest {:.0}",
                capital,
                leverage,
                capital * leverage
            ),
            TradeRationale::AddOnDecline {
                price_delta,
                quantity,
                leverage,
            } => write!(
                f,
                "add on decline: price {:+.0} -> leverage short of target -> buy {} to hold {:.2}x",
                price_delta, quantity, leverage
            ),
            TradeRationale::ReduceOnRise {
                price_delta,
                quantity,
                leverage,
            } => write!(
                f,
                "reduce on rise: price {:+.0} -> leverage above target -> sell {} to hold {:.2}x",
                price_delta, quantity, leverage
            ),
            TradeRationale::Hold {
                price_delta,
                leverage,
            } => write!(f, "hold: price {:+.0} -> leverage at {:.2}x", price_delta, leverage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_displays_delta_and_leverage() {
        let hold = TradeRationale::classify(0, -12.0, 0.4987);
        assert_eq!(hold.label(), "hold");
        assert_eq!(hold.to_string(), "hold: price -12 -> leverage at 0.50x");
    }

    #[test]
    fn test_classify_by_trade_sign() {
        assert_eq!(TradeRationale::classify(5, -3.0, 0.5).label(), "add on decline");
        assert_eq!(TradeRationale::classify(-5, 3.0, 0.5).label(), "reduce on rise");
    }
}
