//! Estimator orchestration: fitting, scoring, and cross-validation.
//!
//! The regression estimator itself comes from `linfa-elasticnet`, run as a
//! ridge fit; this module only arranges data around it. The light L2
//! penalty keeps the fit well-posed on the one-hot design, where the
//! indicator blocks are collinear with the intercept. Prices are
//! non-negative and right-skewed, so the estimator is fit on
//! log1p-transformed targets and predictions map back through expm1, which
//! also keeps them positive.

use anyhow::{anyhow, bail, Context, Result};
use linfa::prelude::*;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use linfa_elasticnet::ElasticNet;

use crate::config::TrainingConfig;
use crate::data::{train_test_split, CarListing};
use crate::model::PriceModel;
use crate::pipeline::FeaturePipeline;

/// R² on the train and held-out partitions, reported separately; a large
/// gap between the two signals overfitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub train_r2: f64,
    pub test_r2: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Per-fold and mean R² from k-fold cross-validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub fold_r2: Vec<f64>,
    pub mean_r2: f64,
}

/// A trained model together with its evaluation report.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: PriceModel,
    pub report: EvaluationReport,
}

/// Train a price model on a single shuffled split.
///
/// The feature pipeline is fit on the training partition only; the same
/// fitted parameters score the held-out partition.
pub fn train_price_model(rows: &[CarListing], config: &TrainingConfig) -> Result<TrainingOutcome> {
    config.validate()?;
    if rows.is_empty() {
        bail!("cannot train on an empty dataset");
    }

    let (train, test) = train_test_split(rows, config.test_fraction, config.seed);
    if train.is_empty() || test.is_empty() {
        bail!(
            "split produced an empty partition ({} train / {} test rows)",
            train.len(),
            test.len()
        );
    }

    info!(
        "training on {} rows, holding out {} for evaluation",
        train.len(),
        test.len()
    );

    let mut model = fit(&train, config).context("model training failed")?;

    let report = EvaluationReport {
        train_r2: score(&model, &train)?,
        test_r2: score(&model, &test)?,
        train_rows: train.len(),
        test_rows: test.len(),
    };
    info!(
        "train R²: {:.4} | test R²: {:.4}",
        report.train_r2, report.test_r2
    );

    model.set_metrics(report.clone());
    Ok(TrainingOutcome { model, report })
}

/// Estimate generalization by scoring each of `config.folds` held-out folds
/// with a model fit on the remaining rows. Pipeline and estimator are refit
/// from scratch per fold.
pub fn cross_validate(rows: &[CarListing], config: &TrainingConfig) -> Result<CrossValidationReport> {
    config.validate()?;
    if rows.len() < config.folds {
        bail!(
            "cross-validation needs at least {} rows, got {}",
            config.folds,
            rows.len()
        );
    }

    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let fold_size = rows.len() / config.folds;
    let mut fold_r2 = Vec::with_capacity(config.folds);

    for k in 0..config.folds {
        let start = k * fold_size;
        // The last fold absorbs the remainder rows.
        let end = if k == config.folds - 1 {
            rows.len()
        } else {
            start + fold_size
        };

        let held_out: Vec<CarListing> = indices[start..end].iter().map(|&i| rows[i].clone()).collect();
        let remainder: Vec<CarListing> = indices[..start]
            .iter()
            .chain(&indices[end..])
            .map(|&i| rows[i].clone())
            .collect();

        let model = fit(&remainder, config).with_context(|| format!("fold {k} training failed"))?;
        let r2 = score(&model, &held_out)?;
        debug!("fold {k}: held-out R² {r2:.4}");
        fold_r2.push(r2);
    }

    let mean_r2 = fold_r2.iter().sum::<f64>() / fold_r2.len() as f64;
    info!("cross-validated R² over {} folds: {mean_r2:.4}", config.folds);

    Ok(CrossValidationReport { fold_r2, mean_r2 })
}

/// Fit the pipeline and estimator on the given rows.
fn fit(rows: &[CarListing], config: &TrainingConfig) -> Result<PriceModel> {
    let pipeline = FeaturePipeline::fit(rows)?;
    let features = pipeline.transform(rows)?;
    let targets: Array1<f64> = rows.iter().map(|r| r.price.ln_1p()).collect();

    if features.nrows() < features.ncols() {
        bail!(
            "regression requires more samples than features: {} samples, {} features",
            features.nrows(),
            features.ncols()
        );
    }

    let dataset = Dataset::new(features, targets);
    let fitted = ElasticNet::params()
        .penalty(config.penalty)
        .l1_ratio(0.0)
        .max_iterations(config.max_iterations)
        .tolerance(config.tolerance)
        .fit(&dataset)
        .map_err(|e| anyhow!("regression training failed: {e}"))?;

    Ok(PriceModel::new(
        pipeline,
        fitted.hyperplane().to_owned(),
        fitted.intercept(),
    ))
}

/// R² of the model's price-scale predictions over the given rows.
fn score(model: &PriceModel, rows: &[CarListing]) -> Result<f64> {
    let mut predicted = Vec::with_capacity(rows.len());
    for row in rows {
        predicted.push(model.predict(&row.to_request())?);
    }
    let actual: Vec<f64> = rows.iter().map(|r| r.price).collect();
    Ok(r_squared(&actual, &predicted))
}

/// Coefficient of determination: 1 − SS_res / SS_tot.
///
/// Returns 0.0 when the labels have no variance, since no model can explain
/// a constant any better than its mean.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len());

    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;

    let ss_tot: f64 = actual.iter().map(|&y| (y - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(&y, &p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_squared_perfect_fit() {
        let y = [1.0, 2.0, 3.0];
        assert!((r_squared(&y, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn r_squared_mean_predictor_is_zero() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        assert!(r_squared(&actual, &predicted).abs() < 1e-12);
    }

    #[test]
    fn r_squared_constant_labels() {
        let actual = [5.0, 5.0, 5.0];
        let predicted = [4.0, 5.0, 6.0];
        assert_eq!(r_squared(&actual, &predicted), 0.0);
    }

    #[test]
    fn training_rejects_empty_dataset() {
        let result = train_price_model(&[], &TrainingConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn cross_validation_rejects_tiny_dataset() {
        let rows = vec![CarListing {
            year: 2015,
            mileage: 40_000.0,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            price: 18_000.0,
        }];
        let result = cross_validate(&rows, &TrainingConfig::default());
        assert!(result.is_err());
    }
}
