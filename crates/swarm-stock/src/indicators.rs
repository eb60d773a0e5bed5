//! Technical indicator computation over a daily price series

use serde::{Deserialize, Serialize};
use ta::indicators::{
    ExponentialMovingAverage, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
    SimpleMovingAverage,
};
use ta::Next;

use crate::error::{Result, StockError};
use crate::market::Candle;

/// One bar enriched with the derived indicator values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: String,
    pub close: f64,
    pub volume: u64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub ema_20: f64,
    pub rsi_14: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
}

/// Compute SMA-20/50, EMA-20, RSI-14 and the 12/26/9 MACD triple over a
/// candle series, one enriched row per input bar.
pub fn enrich(candles: &[Candle]) -> Result<Vec<IndicatorRow>> {
    let mut sma_20 = SimpleMovingAverage::new(20)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    let mut sma_50 = SimpleMovingAverage::new(50)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    let mut ema_20 = ExponentialMovingAverage::new(20)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    let mut rsi_14 = RelativeStrengthIndex::new(14)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    let mut macd = MovingAverageConvergenceDivergence::new(12, 26, 9)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;

    Ok(candles
        .iter()
        .map(|candle| {
            let macd_out = macd.next(candle.close);
            IndicatorRow {
                date: candle.timestamp.format("%Y-%m-%d").to_string(),
                close: candle.close,
                volume: candle.volume,
                sma_20: sma_20.next(candle.close),
                sma_50: sma_50.next(candle.close),
                ema_20: ema_20.next(candle.close),
                rsi_14: rsi_14.next(candle.close),
                macd: macd_out.macd,
                macd_signal: macd_out.signal,
                macd_hist: macd_out.histogram,
            }
        })
        .collect())
}

/// The most recent `n` rows of an enriched series.
///
/// The technical analyst passes only this window to the model to bound the
/// prompt size.
pub fn recent_window(rows: &[IndicatorRow], n: usize) -> &[IndicatorRow] {
    &rows[rows.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn flat_series(len: usize, close: f64) -> Vec<Candle> {
        let start = Utc::now() - Duration::days(len as i64);
        (0..len)
            .map(|i| Candle {
                symbol: "TEST.NS".to_string(),
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect()
    }

    #[test]
    fn test_enrich_row_per_candle() {
        let candles = flat_series(60, 100.0);
        let rows = enrich(&candles).unwrap();
        assert_eq!(rows.len(), 60);
    }

    #[test]
    fn test_flat_series_converges_to_price() {
        let candles = flat_series(60, 100.0);
        let rows = enrich(&candles).unwrap();
        let last = rows.last().unwrap();

        // On a constant series every average equals the price and the MACD
        // lines collapse to zero.
        assert!((last.sma_20 - 100.0).abs() < 1e-9);
        assert!((last.sma_50 - 100.0).abs() < 1e-9);
        assert!((last.ema_20 - 100.0).abs() < 1e-9);
        assert!(last.macd.abs() < 1e-9);
        assert!(last.macd_hist.abs() < 1e-9);
    }

    #[test]
    fn test_rsi_saturates_on_monotonic_rise() {
        let start = Utc::now() - Duration::days(60);
        let candles: Vec<Candle> = (0..60)
            .map(|i| {
                let close = 100.0 + f64::from(i);
                Candle {
                    symbol: "TEST.NS".to_string(),
                    timestamp: start + Duration::days(i64::from(i)),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1_000,
                }
            })
            .collect();

        let rows = enrich(&candles).unwrap();
        assert!(rows.last().unwrap().rsi_14 > 90.0);
    }

    #[test]
    fn test_recent_window() {
        let candles = flat_series(60, 100.0);
        let rows = enrich(&candles).unwrap();

        assert_eq!(recent_window(&rows, 10).len(), 10);
        assert_eq!(recent_window(&rows, 100).len(), 60);
        assert_eq!(
            recent_window(&rows, 10).first().map(|r| r.date.clone()),
            Some(rows[50].date.clone())
        );
    }
}
