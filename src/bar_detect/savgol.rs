use crate::bar_detect::detect_error_kind::BarDetectError;

/// Savitzky-Golay smoothing filter.
///
/// Fits a least-squares polynomial of the configured degree to every
/// window-sized slice of the input and replaces each point with the fitted
/// value. This suppresses single-column noise spikes while keeping the broad
/// shape of the signal, which is what the slope-based edge detection needs:
/// differentiating the raw profile would pick up noise instead of the bar
/// transition.
///
/// Interior points are smoothed with the window centred on them. Points
/// within half a window of either end take their value from the polynomial
/// fitted to the first (or last) full window, evaluated at the off-centre
/// offset, so the output has exactly the same length as the input.
#[derive(Debug, Clone)]
pub struct SavgolFilter {
    window: usize,
    //weights[t] dotted with a window of samples evaluates that window's
    //fitted polynomial at offset t (t == window/2 is the centred case)
    weights: Vec<Vec<f64>>,
}

impl SavgolFilter {
    pub fn from_cfg(window: usize, degree: usize) -> Result<Self, BarDetectError> {
        if window % 2 == 0 || window <= degree {
            return Err(BarDetectError::BadFilterCfg { window, degree });
        }

        Ok(Self {
            window,
            weights: projection_weights(window, degree),
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Smooth `values`, preserving length. Fails if the input is shorter
    /// than the window; that is a configuration/input problem the caller
    /// must be told about, not something to paper over.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>, BarDetectError> {
        let len = values.len();
        if len < self.window {
            return Err(BarDetectError::ProfileTooShort {
                profile_len: len,
                window: self.window,
            });
        }

        let half = self.window / 2;
        let mut out = vec![0.0; len];

        let center = &self.weights[half];
        for i in half..len - half {
            out[i] = dot(center, &values[i - half..=i + half]);
        }

        //the first and last half-window evaluate the edge windows' fits off-centre
        for t in 0..half {
            out[t] = dot(&self.weights[t], &values[..self.window]);
        }
        for t in half + 1..self.window {
            out[len - self.window + t] = dot(&self.weights[t], &values[len - self.window..]);
        }

        Ok(out)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

//rows of the least-squares projection matrix A (AᵀA)⁻¹ Aᵀ, where A is the
//window×(degree+1) Vandermonde matrix over offsets centred on the window
//midpoint. row t of the projection evaluates the fitted polynomial at
//offset t, so the matrix maps raw samples directly to smoothed samples.
fn projection_weights(window: usize, degree: usize) -> Vec<Vec<f64>> {
    let n = degree + 1;
    let half = (window / 2) as f64;

    //gram[j][k] = Σ_i x_i^(j+k)
    let mut gram = vec![vec![0.0; n]; n];
    for i in 0..window {
        let p = power_row(i as f64 - half, n);
        for j in 0..n {
            for k in 0..n {
                gram[j][k] += p[j] * p[k];
            }
        }
    }

    //coeff_cols[i] = (AᵀA)⁻¹ · powers(x_i): sample i's contribution to the
    //fitted polynomial coefficients
    let coeff_cols = (0..window)
        .map(|i| solve(gram.clone(), power_row(i as f64 - half, n)))
        .collect::<Vec<_>>();

    (0..window)
        .map(|t| {
            let pt = power_row(t as f64 - half, n);
            coeff_cols.iter().map(|c| dot(&pt, c)).collect()
        })
        .collect()
}

fn power_row(x: f64, n: usize) -> Vec<f64> {
    let mut ret = Vec::with_capacity(n);
    let mut acc = 1.0;
    for _ in 0..n {
        ret.push(acc);
        acc *= x;
    }
    ret
}

//gaussian elimination with partial pivoting. The systems here are tiny
//((degree+1)²) and symmetric positive definite, so this is plenty.
fn solve(mut m: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Vec<f64> {
    let n = rhs.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap();
        m.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..n {
                m[row][k] -= factor * m[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for k in row + 1..n {
            acc -= m[row][k] * x[k];
        }
        x[row] = acc / m[row][row];
    }

    x
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rejects_even_window_and_low_window() {
        assert!(matches!(
            SavgolFilter::from_cfg(50, 4),
            Err(BarDetectError::BadFilterCfg { window: 50, degree: 4 })
        ));
        assert!(matches!(
            SavgolFilter::from_cfg(3, 4),
            Err(BarDetectError::BadFilterCfg { window: 3, degree: 4 })
        ));
    }

    #[test]
    fn test_rejects_short_input() {
        let filter = SavgolFilter::from_cfg(51, 4).unwrap();
        let act = filter.apply(&vec![1.0; 50]);

        assert!(matches!(
            act,
            Err(BarDetectError::ProfileTooShort { profile_len: 50, window: 51 })
        ));
    }

    #[test]
    fn test_preserves_length() {
        let filter = SavgolFilter::from_cfg(7, 2).unwrap();

        for len in [7usize, 8, 20, 100] {
            let values = (0..len).map(|i| (i as f64 * 0.7).sin()).collect::<Vec<_>>();
            let act = filter.apply(&values).unwrap();
            assert_eq!(act.len(), len);
        }
    }

    #[test]
    fn test_constant_input_is_unchanged() {
        let filter = SavgolFilter::from_cfg(9, 3).unwrap();
        let values = vec![4.25; 30];

        let act = filter.apply(&values).unwrap();
        for v in act {
            assert!((v - 4.25).abs() < 1e-9);
        }
    }

    //fitting a degree-d polynomial to data that already is one of degree <= d
    //must reproduce the data exactly, edge windows included
    #[test]
    fn test_polynomial_input_is_reproduced() {
        let poly = |x: f64| 2.0 - 3.0 * x + 0.5 * x * x - 0.01 * x * x * x;

        let filter = SavgolFilter::from_cfg(11, 3).unwrap();
        let values = (0..40).map(|i| poly(i as f64)).collect::<Vec<_>>();

        let act = filter.apply(&values).unwrap();
        for (exp, act) in values.iter().zip(&act) {
            assert!((exp - act).abs() < 1e-6, "exp {exp}, act {act}");
        }
    }

    #[test]
    fn test_spike_is_suppressed() {
        let filter = SavgolFilter::from_cfg(11, 2).unwrap();

        let mut values = vec![10.0; 41];
        values[20] = 100.0;

        let act = filter.apply(&values).unwrap();

        //the single-sample spike must be spread out well below its raw height
        assert!(act[20] < 50.0);
        //but total mass in the window stays in the same ballpark
        assert!(act[20] > 10.0);
    }

    #[test]
    fn test_solve_small_system() {
        // 2x + y = 5; x - y = 1  =>  x = 2, y = 1
        let m = vec![vec![2.0, 1.0], vec![1.0, -1.0]];
        let act = solve(m, vec![5.0, 1.0]);

        assert!((act[0] - 2.0).abs() < 1e-12);
        assert!((act[1] - 1.0).abs() < 1e-12);
    }
}
