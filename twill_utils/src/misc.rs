use std::str::FromStr;

use rand::Rng;

/// Attempt to turn a `&str` into a `T`
#[inline]
pub fn parse_result<T: FromStr>(x: &str) -> Result<Option<T>, T::Err> {
    // For csv, empty cells are considered missing regardless of type
    if x.is_empty() {
        Ok(None)
    } else {
        x.parse::<T>().map(Some)
    }
}

/// Numerically stable `log(sum(exp(xs))`
#[inline]
pub fn logsumexp(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        panic!("Empty container");
    } else if xs.len() == 1 {
        xs[0]
    } else {
        let maxval_res = xs.iter().max_by(|x, y| x.partial_cmp(y).unwrap());
        let maxval = match maxval_res {
            Some(val) => val,
            None => panic!("Could not find maxval of {:?}", xs),
        };
        xs.iter()
            .fold(0.0_f64, |acc, x| acc + (x - maxval).exp())
            .ln()
            + maxval
    }
}

/// Draw one index from the categorical distribution defined by a vector of
/// unnormalized log weights, using the uniform draw `u` in `[0, 1)`.
///
/// The weights are normalized with [`logsumexp`] and the index is chosen by
/// inverting the cumulative distribution, so sequential and data-parallel
/// resampling code paths that share the same `u` choose the same index.
#[inline]
pub fn ln_pflip_with(ln_weights: &[f64], u: f64) -> usize {
    let z = logsumexp(ln_weights);
    let mut cum = 0.0;
    for (ix, &lw) in ln_weights.iter().enumerate() {
        cum += (lw - z).exp();
        if u < cum {
            return ix;
        }
    }
    // Roundoff can leave the total cumulative mass slightly below one
    ln_weights.len() - 1
}

/// Draw one index from the categorical distribution defined by a vector of
/// unnormalized log weights.
#[inline]
pub fn ln_pflip<R: Rng>(ln_weights: &[f64], rng: &mut R) -> usize {
    ln_pflip_with(ln_weights, rng.gen::<f64>())
}

/// Returns the smallest non-negative integer absent from `active`, which must
/// be sorted ascending.
///
/// Because at most `active.len()` ids are in use, the scan never has to look
/// past `active.len()`.
///
/// # Example
///
/// ```rust
/// # use twill_utils::smallest_unused_label;
/// assert_eq!(smallest_unused_label(&[0, 1, 3]), 2);
/// assert_eq!(smallest_unused_label(&[1, 2, 3]), 0);
/// assert_eq!(smallest_unused_label(&[0, 1, 2]), 3);
/// ```
#[inline]
pub fn smallest_unused_label(active: &[usize]) -> usize {
    let mut used = vec![false; active.len() + 1];
    for &z in active {
        if z < used.len() {
            used[z] = true;
        }
    }
    used.iter().position(|&u| !u).unwrap_or(active.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const TOL: f64 = 1E-10;

    // parse_result
    // ------------
    #[test]
    fn parse_result_f64() {
        {
            let res: Option<f64> = parse_result("1.23").unwrap();
            assert!(res.unwrap() == 1.23);
        }
        {
            let res: Option<f64> = parse_result(".23").unwrap();
            assert!(res.unwrap() == 0.23);
        }
    }

    #[test]
    fn parse_empty_is_none() {
        let res: Option<f64> = parse_result("").unwrap();
        assert!(res.is_none());
    }

    // logsumexp
    // ---------
    #[test]
    fn logsumexp_on_vector_of_zeros() {
        let xs: Vec<f64> = vec![0.0; 5];
        // should be about log(5)
        assert_relative_eq!(
            logsumexp(&xs),
            1.609_437_912_434_100_3,
            epsilon = TOL
        );
    }

    #[test]
    fn logsumexp_on_random_values() {
        let xs: Vec<f64> = vec![
            0.304_153_86,
            -0.070_722_96,
            -1.042_870_19,
            0.278_554_07,
            -0.818_967_65,
        ];
        assert_relative_eq!(
            logsumexp(&xs),
            1.482_000_789_426_305_9,
            epsilon = TOL
        );
    }

    #[test]
    fn logsumexp_returns_only_value_on_one_element_container() {
        let xs: Vec<f64> = vec![0.304_153_86];
        assert_relative_eq!(logsumexp(&xs), 0.304_153_86, epsilon = TOL);
    }

    #[test]
    #[should_panic]
    fn logsumexp_should_panic_on_empty() {
        let xs: Vec<f64> = Vec::new();
        logsumexp(&xs);
    }

    // ln_pflip
    // --------
    #[test]
    fn ln_pflip_with_picks_by_cumulative_mass() {
        let lws = vec![0.5_f64.ln(), 0.25_f64.ln(), 0.25_f64.ln()];
        assert_eq!(ln_pflip_with(&lws, 0.1), 0);
        assert_eq!(ln_pflip_with(&lws, 0.49), 0);
        assert_eq!(ln_pflip_with(&lws, 0.6), 1);
        assert_eq!(ln_pflip_with(&lws, 0.99), 2);
    }

    #[test]
    fn ln_pflip_with_unnormalized_weights() {
        // same distribution as above, shifted by a constant in log space
        let lws = vec![2.0_f64.ln(), 1.0_f64.ln(), 1.0_f64.ln()];
        assert_eq!(ln_pflip_with(&lws, 0.1), 0);
        assert_eq!(ln_pflip_with(&lws, 0.6), 1);
        assert_eq!(ln_pflip_with(&lws, 0.99), 2);
    }

    #[test]
    fn ln_pflip_equal_weights_split_evenly() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let lws = vec![-1.2, -1.2];
        let n: usize = 50_000;
        let n_first = (0..n)
            .filter(|_| ln_pflip(&lws, &mut rng) == 0)
            .count();
        let frac = n_first as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.01);
    }

    // smallest_unused_label
    // ---------------------
    #[test]
    fn smallest_unused_label_on_empty_is_zero() {
        assert_eq!(smallest_unused_label(&[]), 0);
    }

    #[test]
    fn smallest_unused_label_fills_gap() {
        assert_eq!(smallest_unused_label(&[0, 2, 3]), 1);
    }

    #[test]
    fn smallest_unused_label_appends_when_dense() {
        assert_eq!(smallest_unused_label(&[0, 1, 2, 3]), 4);
    }

    #[test]
    fn smallest_unused_label_ignores_large_ids() {
        assert_eq!(smallest_unused_label(&[0, 1, 100]), 2);
    }
}
