//! Principal component analysis for embedding reduction.
//!
//! Reduces the high-dimensional semantic vectors of the animal catalog to
//! a small fixed dimension at startup. Computed from scratch on every
//! startup, so component orientation (sign and rotation) is only stable
//! within one build; relative distances are what downstream code relies
//! on.
//!
//! With far fewer rows than columns the eigenproblem is solved on the
//! row Gram matrix (`X Xᵀ`, n×n) instead of the covariance matrix, via
//! power iteration with deflation. The iteration starts from a fixed
//! vector, so a given input always produces the same projection.

use logoguide_core::{Error, Result};

const POWER_ITERATIONS: usize = 500;
const CONVERGENCE_EPS: f64 = 1e-12;

/// Project each input row onto its first `n_components` principal
/// coordinates.
///
/// Rows must share one dimension; at least two rows are required for the
/// centering step to be meaningful. Components beyond the rank of the
/// centered data come out as zero coordinates.
pub fn principal_components(rows: &[Vec<f32>], n_components: usize) -> Result<Vec<Vec<f32>>> {
    let n = rows.len();
    if n < 2 {
        return Err(Error::InvalidConfig(format!(
            "PCA requires at least 2 rows, got {}",
            n
        )));
    }
    let dim = rows[0].len();
    if dim == 0 {
        return Err(Error::InvalidConfig("PCA rows are zero-dimensional".to_string()));
    }
    for row in rows {
        if row.len() != dim {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: row.len(),
            });
        }
    }
    if n_components == 0 || n_components > dim {
        return Err(Error::InvalidConfig(format!(
            "cannot extract {} components from {}-dimensional rows",
            n_components, dim
        )));
    }

    // Center columns.
    let mut means = vec![0.0f64; dim];
    for row in rows {
        for (mean, value) in means.iter_mut().zip(row.iter()) {
            *mean += f64::from(*value);
        }
    }
    for mean in &mut means {
        *mean /= n as f64;
    }
    let centered: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(means.iter())
                .map(|(value, mean)| f64::from(*value) - mean)
                .collect()
        })
        .collect();

    // Row Gram matrix X Xᵀ; its eigenvectors u and eigenvalues λ give
    // the principal coordinates directly as u √λ.
    let mut gram = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in i..n {
            let dot = centered[i]
                .iter()
                .zip(centered[j].iter())
                .map(|(a, b)| a * b)
                .sum();
            gram[i][j] = dot;
            gram[j][i] = dot;
        }
    }

    let mut scores = vec![vec![0.0f32; n_components]; n];
    for component in 0..n_components {
        let Some((eigenvalue, eigenvector)) = dominant_eigenpair(&gram) else {
            // Rank exhausted; remaining coordinates stay zero.
            break;
        };

        let scale = eigenvalue.sqrt();
        for (row_scores, u) in scores.iter_mut().zip(eigenvector.iter()) {
            row_scores[component] = (u * scale) as f32;
        }

        // Deflate so the next iteration converges to the next component.
        for i in 0..n {
            for j in 0..n {
                gram[i][j] -= eigenvalue * eigenvector[i] * eigenvector[j];
            }
        }
    }

    Ok(scores)
}

/// Power iteration for the dominant eigenpair of a symmetric PSD matrix.
/// Returns `None` when the matrix is (numerically) zero.
fn dominant_eigenpair(matrix: &[Vec<f64>]) -> Option<(f64, Vec<f64>)> {
    let n = matrix.len();

    // Fixed start vectors, tried in order: a ramp, then each canonical
    // basis direction. The all-ones direction is always in the kernel of
    // a centered Gram matrix, and any single start can land in the kernel
    // after deflation, so a start that immediately annihilates is skipped
    // rather than reported as rank exhaustion.
    'starts: for start in 0..=n {
        let mut v: Vec<f64> = if start == 0 {
            (0..n).map(|i| i as f64 + 1.0).collect()
        } else {
            let mut basis = vec![0.0f64; n];
            basis[start - 1] = 1.0;
            basis
        };
        let mean = v.iter().sum::<f64>() / n as f64;
        for x in &mut v {
            *x -= mean;
        }
        let start_norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if start_norm < CONVERGENCE_EPS {
            continue;
        }
        for x in &mut v {
            *x /= start_norm;
        }

        let mut eigenvalue = 0.0f64;
        for iteration in 0..POWER_ITERATIONS {
            let mut w = vec![0.0f64; n];
            for (wi, row) in w.iter_mut().zip(matrix.iter()) {
                *wi = row.iter().zip(v.iter()).map(|(m, x)| m * x).sum();
            }
            let norm = w.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm < CONVERGENCE_EPS {
                if iteration == 0 {
                    continue 'starts;
                }
                return None;
            }
            for x in &mut w {
                *x /= norm;
            }

            let delta: f64 = w
                .iter()
                .zip(v.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            v = w;
            eigenvalue = norm;
            if delta < CONVERGENCE_EPS {
                break;
            }
        }

        return Some((eigenvalue, v));
    }

    None
}
