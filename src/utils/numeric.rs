use crate::errors::BallisticsError;

// Evenly spaced values from start to stop inclusive.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

// Trapezoidal integral of ys over xs.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> Result<f64, BallisticsError> {
    if xs.len() != ys.len() {
        return Err(BallisticsError::domain(format!(
            "trapezoid needs matching lengths, got {} and {}",
            xs.len(),
            ys.len()
        )));
    }

    Ok(xs
        .windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum())
}
