use super::model::{ComparisonStats, TimeSeries};

// ---------------------------------------------------------------------------
// Windowing
// ---------------------------------------------------------------------------

/// Index of the sample whose time is closest to `target`. The first of
/// several equally close samples wins. `None` for an empty axis.
pub fn nearest_index(time: &[f64], target: f64) -> Option<usize> {
    time.iter()
        .enumerate()
        .filter(|(_, t)| !t.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &t)| {
            let d = (t - target).abs();
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            }
        })
        .map(|(i, _)| i)
}

/// Inclusive index range `[nearest(t0), nearest(t1)]`.
///
/// The bounds snap to the nearest samples, so the window may start slightly
/// after `t0` or end slightly before `t1`; it does not guarantee to bracket
/// the requested interval. A reversed request gives an empty range.
pub fn window(time: &[f64], t0: f64, t1: f64) -> std::ops::Range<usize> {
    match (nearest_index(time, t0), nearest_index(time, t1)) {
        (Some(a), Some(b)) if a <= b => a..b + 1,
        _ => 0..0,
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Piecewise-linear value of (`xs`, `ys`) at `x`. `xs` must be increasing.
/// `None` outside `[xs[0], xs[last]]`.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n == 0 || x.is_nan() || x < xs[0] || x > xs[n - 1] {
        return None;
    }
    if n == 1 {
        return Some(ys[0]);
    }
    // First index with xs[i] >= x; x is within range so 0 <= i < n.
    let i = xs[..n].partition_point(|&v| v < x);
    if i == 0 {
        return Some(ys[0]);
    }
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    if x1 == x0 {
        return Some(y1);
    }
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

// ---------------------------------------------------------------------------
// Comparison against the gauge
// ---------------------------------------------------------------------------

/// Residuals (gauge − simulation) at every gauge sample inside the
/// simulation's time extent, with the simulation interpolated onto the gauge
/// time stamps. Missing values on either side are dropped.
pub fn residuals(simulation: &TimeSeries, gauge: &TimeSeries) -> Vec<f64> {
    gauge
        .time
        .iter()
        .zip(&gauge.elevation)
        .filter_map(|(&t, &g)| {
            let s = interpolate(&simulation.time, &simulation.elevation, t)?;
            let d = g - s;
            (!d.is_nan()).then_some(d)
        })
        .collect()
}

/// Bias and RMSE of `simulation` against `gauge`; `None` when the two have
/// no usable overlap.
pub fn compare(simulation: &TimeSeries, gauge: &TimeSeries) -> Option<ComparisonStats> {
    let diffs = residuals(simulation, gauge);
    if diffs.is_empty() {
        return None;
    }
    let n = diffs.len() as f64;
    let bias = diffs.iter().sum::<f64>() / n;
    let rmse = (diffs.iter().map(|d| d * d).sum::<f64>() / n).sqrt();
    Some(ComparisonStats {
        bias,
        rmse,
        samples: diffs.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_picks_closest_sample() {
        let t = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert_eq!(nearest_index(&t, 0.3), Some(1));
        assert_eq!(nearest_index(&t, 0.4), Some(2));
        assert_eq!(nearest_index(&t, -5.0), Some(0));
        assert_eq!(nearest_index(&t, 9.0), Some(4));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn nearest_tie_goes_to_earlier_sample() {
        assert_eq!(nearest_index(&[0.0, 1.0], 0.5), Some(0));
    }

    #[test]
    fn window_snaps_to_nearest_not_bracketing() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        // 1.4 snaps down to 1.0, 2.6 snaps up to 3.0.
        assert_eq!(window(&t, 1.4, 2.6), 1..4);
        // 1.6 snaps up to 2.0: the sample at 1.0 is excluded.
        assert_eq!(window(&t, 1.6, 2.4), 2..3);
        assert_eq!(window(&t, 3.0, 1.0), 0..0);
        assert_eq!(window(&[], 0.0, 1.0), 0..0);
    }

    #[test]
    fn interpolate_inside_and_outside() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 0.0];
        assert_eq!(interpolate(&xs, &ys, 0.0), Some(0.0));
        assert_eq!(interpolate(&xs, &ys, 0.5), Some(5.0));
        assert_eq!(interpolate(&xs, &ys, 1.5), Some(5.0));
        assert_eq!(interpolate(&xs, &ys, 2.0), Some(0.0));
        assert_eq!(interpolate(&xs, &ys, 2.1), None);
        assert_eq!(interpolate(&xs, &ys, -0.1), None);
        assert_eq!(interpolate(&[], &[], 0.0), None);
    }

    #[test]
    fn compare_ignores_missing_and_out_of_range() {
        let sim = TimeSeries {
            time: vec![0.0, 1.0, 2.0],
            elevation: vec![0.0, 1.0, 2.0],
        };
        let gauge = TimeSeries {
            time: vec![0.0, 0.5, 1.0, 1.5, 3.0],
            elevation: vec![0.5, f64::NAN, 1.5, 2.5, 100.0],
        };
        // Residuals at 0.0, 1.0 and 1.5: 0.5, 0.5 and 1.0; the NaN and the
        // sample past the simulation end are skipped.
        let stats = compare(&sim, &gauge).unwrap();
        assert_eq!(stats.samples, 3);
        assert!((stats.bias - 2.0 / 3.0).abs() < 1e-12);
        let rmse = ((0.25 + 0.25 + 1.0) / 3.0_f64).sqrt();
        assert!((stats.rmse - rmse).abs() < 1e-12);
    }

    #[test]
    fn no_overlap_means_no_adjustment() {
        let sim = TimeSeries::uniform(1.0, vec![1.0, 2.0]);
        let gauge = TimeSeries {
            time: vec![5.0, 6.0],
            elevation: vec![1.0, 1.0],
        };
        assert!(compare(&sim, &gauge).is_none());
        assert!(compare(&TimeSeries::default(), &gauge).is_none());
    }
}
