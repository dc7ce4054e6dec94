use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Price series is empty")]
    Empty,
    #[error("Invalid price {price} on {date} (row {index}): prices must be finite and positive")]
    NonPositivePrice {
        index: usize,
        date: NaiveDate,
        price: f64,
    },
    #[error("Dates not strictly increasing at row {index}: {previous} followed by {current}")]
    Unordered {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Unparseable date '{value}' at line {line}")]
    InvalidDate { value: String, line: usize },
    #[error("Unparseable price '{value}' at line {line}")]
    InvalidPrice { value: String, line: usize },
}

//a single daily close
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }
}

//non-empty, strictly date-ascending closes, all positive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    //validates points that are expected to already be in order
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DataError> {
        if points.is_empty() {
            return Err(DataError::Empty);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(DataError::NonPositivePrice {
                    index,
                    date: point.date,
                    price: point.close,
                });
            }
        }

        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(DataError::Unordered {
                    index: index + 1,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }

        Ok(PriceSeries { points })
    }

    //sorts by date before validating; duplicate dates are still rejected
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Result<Self, DataError> {
        points.sort_by_key(|p| p.date);
        Self::new(points)
    }

    //convenience for tests and demos: consecutive calendar days from `start`
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self, DataError> {
        let points = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| PricePoint::new(date, close))
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    //always false for a constructed series, kept for api symmetry
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }
}
