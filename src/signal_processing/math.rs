/// Linearly interpolate `ys` sampled at strictly increasing `xs`
///
/// Values of `x` outside the sampled range are clamped to the end points.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n == 0 {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    // First index with xs[i] > x; guaranteed to be in 1..n by the checks above
    let hi = xs.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}

/// Root-mean-square of a signal; zero for an empty slice
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64).sqrt()
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_interpolate() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 30.0];
        assert_abs_diff_eq!(interpolate(&xs, &ys, 0.5), 5.0);
        assert_abs_diff_eq!(interpolate(&xs, &ys, 1.0), 10.0);
        assert_abs_diff_eq!(interpolate(&xs, &ys, 1.5), 20.0);
        assert_abs_diff_eq!(interpolate(&xs, &ys, -1.0), 0.0);
        assert_abs_diff_eq!(interpolate(&xs, &ys, 3.0), 30.0);
    }

    #[test]
    fn test_rms() {
        assert_abs_diff_eq!(rms(&[3.0, -3.0, 3.0, -3.0]), 3.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_linspace_end_points_exact() {
        let grid = linspace(0.0, 1.0, 1000);
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[999], 1.0);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(0.25, 1.0, 1), vec![0.25]);
    }
}
