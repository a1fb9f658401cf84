//! Dense matrices over a field, stored as a `Vec` of rows.

use std::fmt;

use crate::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InverseError {
    /// The matrix has no inverse over any field containing the coefficients.
    Singular,
    /// No entry of a pivot column is a unit of the coefficient ring. `pivot` is the first nonzero
    /// one.
    NotInvertible { pivot: String },
}

impl fmt::Display for InverseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular => write!(f, "matrix is singular"),
            Self::NotInvertible { pivot } => {
                write!(f, "{pivot} is not invertible in the coefficient ring")
            }
        }
    }
}

impl std::error::Error for InverseError {}

/// Computes the inverse of the square matrix `matrix` by Gauss-Jordan elimination.
///
/// # Panics
/// If `matrix` is not square.
pub fn inverse<R: Field>(matrix: &[Vec<R>]) -> Result<Vec<Vec<R>>, InverseError> {
    let n = matrix.len();
    assert!(
        matrix.iter().all(|row| row.len() == n),
        "inverse requires a square matrix"
    );

    // Augment with the identity and row reduce the left half.
    let mut rows: Vec<Vec<R>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut augmented = row.clone();
            augmented.extend((0..n).map(|j| if i == j { R::one() } else { R::zero() }));
            augmented
        })
        .collect();

    for column in 0..n {
        // Over a field this is the first nonzero entry. Over a ring prefer a unit.
        let (pivot, scale) = match (column..n)
            .find_map(|r| rows[r][column].reciprocal().map(|scale| (r, scale)))
        {
            Some(found) => found,
            None => {
                return Err(match (column..n).find(|&r| !rows[r][column].is_zero()) {
                    Some(r) => InverseError::NotInvertible {
                        pivot: rows[r][column].to_string(),
                    },
                    None => InverseError::Singular,
                })
            }
        };
        rows.swap(column, pivot);
        for entry in rows[column].iter_mut() {
            *entry = entry.clone() * scale.clone();
        }

        let pivot_row = rows[column].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r == column || row[column].is_zero() {
                continue;
            }
            let factor = row[column].clone();
            for (entry, p) in row.iter_mut().zip(&pivot_row) {
                *entry = entry.clone() - factor.clone() * p.clone();
            }
        }
    }

    Ok(rows.into_iter().map(|row| row[n..].to_vec()).collect())
}
