//! One-hot encoding for string-valued categorical columns.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Learns the vocabulary of a categorical column at fit time.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Fit the encoder over the distinct values observed in `values`.
    ///
    /// Categories are sorted so a given input always produces the same
    /// column ordering.
    pub fn fit<'a, I>(values: I) -> Result<FittedOneHotEncoder, PipelineError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        if distinct.is_empty() {
            return Err(PipelineError::EmptyData);
        }

        let categories: Vec<String> = distinct.into_iter().map(str::to_owned).collect();
        Ok(FittedOneHotEncoder::from_categories(categories))
    }
}

/// Fitted encoder holding the vocabulary observed at fit time.
#[derive(Debug, Clone)]
pub struct FittedOneHotEncoder {
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

/// Serializable parameters of a [`FittedOneHotEncoder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotParams {
    pub categories: Vec<String>,
}

impl FittedOneHotEncoder {
    fn from_categories(categories: Vec<String>) -> Self {
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { categories, index }
    }

    /// Number of indicator columns this encoder produces.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// The vocabulary, in output-column order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Write the indicator vector for `value` into `out`.
    ///
    /// `out` must be `width()` long and zeroed by the caller. A value never
    /// seen at fit time leaves the slice all zero; this is deliberate so
    /// inference on unknown categories degrades instead of failing.
    pub fn encode_into(&self, value: &str, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.width());
        if let Some(&i) = self.index.get(value) {
            out[i] = 1.0;
        }
    }

    pub fn params(&self) -> OneHotParams {
        OneHotParams {
            categories: self.categories.clone(),
        }
    }

    pub fn from_params(params: OneHotParams) -> Self {
        Self::from_categories(params.categories)
    }
}
