use linear::{LinearCombination, Zero};

use crate::{BracketError, LieAlgebra};

/// The Gram matrix of the Killing form `κ(x, y) = tr(ad x ad y)` with respect to `basis`, which
/// should be a basis of the (finite dimensional) algebra.
pub fn killing_form<L: LieAlgebra>(
    lie_algebra: &L,
    basis: &[L::Index],
) -> Result<Vec<Vec<L::Coefficient>>, BracketError> {
    let n = basis.len();
    let mut form = vec![vec![L::Coefficient::zero(); n]; n];
    for i in 0..n {
        for j in 0..i {
            form[i][j] = form[j][i].clone();
        }
        for j in i..n {
            let x = LinearCombination::monomial(basis[i].clone());
            let mut trace = L::Coefficient::zero();
            for z in basis {
                let inner = lie_algebra.bracket_on_basis(&basis[j], z)?;
                trace = trace + lie_algebra.bracket(&x, &inner)?.coefficient(z);
            }
            form[i][j] = trace;
        }
    }
    Ok(form)
}
