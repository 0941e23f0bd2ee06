//! Min-max normalization with bounds captured at fit time.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Rescales every feature dimension to [0, 1] using the minimum and maximum
/// observed when fitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxScaler;

impl MinMaxScaler {
    pub fn fit(data: &Array2<f64>) -> Result<FittedMinMaxScaler, PipelineError> {
        if data.nrows() == 0 {
            return Err(PipelineError::EmptyData);
        }

        let n_features = data.ncols();
        let mut min = vec![f64::INFINITY; n_features];
        let mut max = vec![f64::NEG_INFINITY; n_features];

        for row in data.rows() {
            for (j, &v) in row.iter().enumerate() {
                min[j] = min[j].min(v);
                max[j] = max[j].max(v);
            }
        }

        // A constant feature has zero range; scale by 1 so it maps to 0
        // instead of dividing by zero.
        let scale = min
            .iter()
            .zip(&max)
            .map(|(&lo, &hi)| if hi > lo { 1.0 / (hi - lo) } else { 1.0 })
            .collect();

        Ok(FittedMinMaxScaler { min, scale })
    }
}

/// Fitted scaler ready for inference.
#[derive(Debug, Clone)]
pub struct FittedMinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
}

/// Serializable parameters of a [`FittedMinMaxScaler`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxParams {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FittedMinMaxScaler {
    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    /// Scale a full matrix, one row per sample.
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PipelineError> {
        if data.ncols() != self.n_features() {
            return Err(PipelineError::FeatureMismatch {
                expected: self.n_features(),
                got: data.ncols(),
            });
        }

        let mut scaled = data.clone();
        for mut row in scaled.rows_mut() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (*v - self.min[j]) * self.scale[j];
            }
        }
        Ok(scaled)
    }

    /// Scale a single feature vector in place.
    pub fn transform_row(&self, row: &mut [f64]) -> Result<(), PipelineError> {
        if row.len() != self.n_features() {
            return Err(PipelineError::FeatureMismatch {
                expected: self.n_features(),
                got: row.len(),
            });
        }

        for (j, v) in row.iter_mut().enumerate() {
            *v = (*v - self.min[j]) * self.scale[j];
        }
        Ok(())
    }

    pub fn params(&self) -> MinMaxParams {
        MinMaxParams {
            min: self.min.clone(),
            scale: self.scale.clone(),
        }
    }

    pub fn from_params(params: MinMaxParams) -> Self {
        Self {
            min: params.min,
            scale: params.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scales_to_unit_range() {
        let data = array![[0.0, 1.0], [0.0, 1.0], [1.0, 3.0]];
        let fitted = MinMaxScaler::fit(&data).unwrap();

        let scaled = fitted.transform(&data).unwrap();
        assert!((scaled[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((scaled[[2, 0]] - 1.0).abs() < 1e-12);
        assert!((scaled[[0, 1]] - 0.0).abs() < 1e-12);
        assert!((scaled[[2, 1]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reuses_fit_time_bounds() {
        let train = array![[0.0], [10.0]];
        let fitted = MinMaxScaler::fit(&train).unwrap();

        // A value outside the fit-time range scales past 1 rather than
        // shifting the bounds.
        let test = array![[20.0]];
        let scaled = fitted.transform(&test).unwrap();
        assert!((scaled[[0, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_feature_maps_to_zero() {
        let data = array![[5.0, 1.0], [5.0, 2.0]];
        let fitted = MinMaxScaler::fit(&data).unwrap();

        let scaled = fitted.transform(&data).unwrap();
        assert!((scaled[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((scaled[[1, 0]] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn feature_mismatch_fails() {
        let data = array![[0.0, 1.0], [1.0, 2.0]];
        let fitted = MinMaxScaler::fit(&data).unwrap();

        let wrong = array![[0.0, 1.0, 2.0]];
        let result = fitted.transform(&wrong);
        assert!(matches!(
            result,
            Err(PipelineError::FeatureMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn empty_data_fails() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            MinMaxScaler::fit(&data),
            Err(PipelineError::EmptyData)
        ));
    }

    #[test]
    fn params_round_trip() {
        let data = array![[0.0, 1.0], [4.0, 3.0]];
        let fitted = MinMaxScaler::fit(&data).unwrap();
        let restored = FittedMinMaxScaler::from_params(fitted.params());

        let a = fitted.transform(&data).unwrap();
        let b = restored.transform(&data).unwrap();
        assert_eq!(a, b);
    }
}
