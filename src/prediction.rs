//! Scoring a feature record and bucketing the result into a health label.

use std::fmt;

use crate::model::{FeatureRecord, PredictionError, Predictor};

/// Upper bound (inclusive) of the `Good` bucket.
pub const GOOD_MAX: f64 = 50.0;
/// Upper bound (inclusive) of the `Moderate` bucket.
pub const MODERATE_MAX: f64 = 100.0;

/// Three-tier qualitative AQI label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiBucket {
    Good,
    Moderate,
    Unhealthy,
}

impl AqiBucket {
    /// `score <= 50` is Good, `50 < score <= 100` Moderate, anything else Unhealthy.
    pub fn classify(score: f64) -> Self {
        if score <= GOOD_MAX {
            AqiBucket::Good
        } else if score <= MODERATE_MAX {
            AqiBucket::Moderate
        } else {
            AqiBucket::Unhealthy
        }
    }

    /// Message shown under the predicted score.
    pub fn message(self) -> &'static str {
        match self {
            AqiBucket::Good => "Good Air Quality",
            AqiBucket::Moderate => "Moderate Air Quality",
            AqiBucket::Unhealthy => "Unhealthy Air Quality",
        }
    }
}

impl fmt::Display for AqiBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AqiBucket::Good => "Good",
            AqiBucket::Moderate => "Moderate",
            AqiBucket::Unhealthy => "Unhealthy",
        })
    }
}

/// A scored record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub score: f64,
    pub bucket: AqiBucket,
}

impl Prediction {
    /// `Predicted AQI: <score>` with the score rounded to two decimals.
    pub fn headline(&self) -> String {
        format!("Predicted AQI: {}", format_score(self.score))
    }
}

/// Run the predictor and classify its score. Non-finite readings never reach the model.
pub fn predict_and_classify(
    predictor: &dyn Predictor,
    record: &FeatureRecord,
) -> Result<Prediction, PredictionError> {
    if let Some(pollutant) = record.first_non_finite(predictor.features()) {
        return Err(PredictionError::NonFiniteInput(pollutant));
    }
    let score = predictor.predict(record)?;
    if !score.is_finite() {
        return Err(PredictionError::NonFiniteScore);
    }
    Ok(Prediction {
        score,
        bucket: AqiBucket::classify(score),
    })
}

/// Round to two decimals, keeping one decimal place for whole numbers (`42.0`, `42.57`).
pub fn format_score(score: f64) -> String {
    let rounded = (score * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pollutant::Pollutant;

    struct Fixed(f64);

    impl Predictor for Fixed {
        fn features(&self) -> &[Pollutant] {
            &Pollutant::ALL
        }

        fn predict(&self, _record: &FeatureRecord) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    #[test]
    fn thresholds_are_inclusive_on_the_lower_bucket() {
        assert_eq!(AqiBucket::classify(-3.0), AqiBucket::Good);
        assert_eq!(AqiBucket::classify(50.0), AqiBucket::Good);
        assert_eq!(AqiBucket::classify(50.000_1), AqiBucket::Moderate);
        assert_eq!(AqiBucket::classify(100.0), AqiBucket::Moderate);
        assert_eq!(AqiBucket::classify(100.01), AqiBucket::Unhealthy);
    }

    #[test]
    fn classification_agrees_with_score() {
        for score in [0.0, 12.5, 50.0, 75.0, 100.0, 180.0, 499.0] {
            let prediction =
                predict_and_classify(&Fixed(score), &FeatureRecord::default()).unwrap();
            assert_eq!(prediction.score, score);
            assert_eq!(prediction.bucket, AqiBucket::classify(score));
        }
    }

    #[test]
    fn non_finite_score_is_a_failure() {
        let err = predict_and_classify(&Fixed(f64::NAN), &FeatureRecord::default()).unwrap_err();
        assert_eq!(err, PredictionError::NonFiniteScore);
    }

    #[test]
    fn non_finite_reading_is_rejected_before_scoring() {
        let record = FeatureRecord::default().with(Pollutant::So2, f64::INFINITY);
        let err = predict_and_classify(&Fixed(10.0), &record).unwrap_err();
        assert_eq!(err, PredictionError::NonFiniteInput(Pollutant::So2));
    }

    #[test]
    fn default_description_counts_features() {
        assert_eq!(Fixed(1.0).describe(), "7 pollutant features");
    }

    #[test]
    fn headline_rounds_to_two_decimals() {
        let prediction = Prediction {
            score: 42.0,
            bucket: AqiBucket::Good,
        };
        assert_eq!(prediction.headline(), "Predicted AQI: 42.0");
        assert_eq!(format_score(42.567), "42.57");
        assert_eq!(format_score(119.999), "120.0");
        assert_eq!(format_score(-0.5), "-0.5");
    }
}
