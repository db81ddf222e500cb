//all the methods of calculating averages and variances etc.

use serde::{Serialize, Deserialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MyVariance
{
    pub mean: f64,
    pub var: f64
}

impl MyVariance{

    pub fn mean(&self) -> f64
    {
        self.mean
    }

    pub fn variance(&self) -> f64
    {
        self.var
    }

    /// standard error of the mean
    pub fn mean_err(&self, samples: usize) -> f64
    {
        (self.var / samples as f64).sqrt()
    }

    /// `None` for an empty slice.
    /// With `frac = Some(n)` all values are divided by `n`, e.g. to get
    /// fractions of the population
    pub fn from_slice(slice: &[usize], frac: Option<f64>) -> Option<Self>
    {
        if slice.is_empty() {
            return None;
        }
        let mean = calc_average(slice, frac);
        let var = calc_variance(slice, mean, frac);
        Some(
            Self{
                mean,
                var
            }
        )
    }
}

/// slice must not be empty
pub fn calc_average(slice: &[usize], frac: Option<f64>) -> f64
{
    let mut sum = 0_u128;
    for val in slice
    {
        sum += *val as u128;
    }

    // integer division first, keeps precision for large sums
    let len = slice.len() as u128;
    let rest = sum % len;
    let div = sum / len;

    let res = div as f64 + (rest as f64) / (len as f64);
    match frac{
        None => res,
        Some(f) => res / f
    }
}

/// population variance, slice must not be empty
pub fn calc_variance(slice: &[usize], average: f64, frac: Option<f64>) -> f64
{
    let scale = frac.unwrap_or(1.0);
    let var_sum: f64 = slice.iter()
        .map(
            |&val|
            {
                let dif = average - val as f64 / scale;
                dif * dif
            }
        ).sum();

    var_sum / slice.len() as f64
}
