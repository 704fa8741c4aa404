//! Uniform sampling and piecewise-linear lookup over sampled profiles.

/// `count` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Piecewise-linear interpolation of `(xs, ys)` at `x`.
///
/// `xs` must be non-decreasing. Outside `[xs[0], xs[last]]` the end values are
/// held constant. Returns `0.0` for empty input.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    // First index whose abscissa exceeds x; always in 1..n here.
    let hi = xs[..n].partition_point(|&v| v <= x);
    let lo = hi - 1;
    let dx = xs[hi] - xs[lo];
    if dx <= 0.0 {
        return ys[hi];
    }
    let f = (x - xs[lo]) / dx;
    ys[lo] + f * (ys[hi] - ys[lo])
}
