//! Some familiar finite dimensional Lie algebras, given by their structure constants.

use linear::{from_integer, LinearCombination, Scalar};

use crate::StructureConstants;

fn with_basis<R: Scalar>(name: &str, basis: Vec<String>) -> StructureConstants<R> {
    // Names are generated here and always valid.
    match StructureConstants::new(name, basis) {
        Ok(algebra) => algebra,
        Err(e) => unreachable!("{e}"),
    }
}

/// `sl_2` with basis `E, F, H` and `[E, F] = H`, `[H, E] = 2E`, `[H, F] = -2F`.
pub fn sl2<R: Scalar>() -> StructureConstants<R> {
    let mut result = with_basis("sl2", vec!["E".into(), "F".into(), "H".into()]);
    let e = || LinearCombination::monomial("E".to_string());
    let f = || LinearCombination::monomial("F".to_string());
    let h = || LinearCombination::monomial("H".to_string());
    result.insert_bracket(0, 1, h());
    result.insert_bracket(2, 0, e().scale(&from_integer(2)));
    result.insert_bracket(2, 1, f().scale(&from_integer(-2)));
    result
}

/// `R^3` with the cross product, i.e. `so_3`. The basis is `X, Y, Z` with `[X, Y] = Z`,
/// `[Y, Z] = X` and `[Z, X] = Y`.
pub fn cross_product<R: Scalar>() -> StructureConstants<R> {
    let names = ["X", "Y", "Z"];
    let mut result = with_basis("so3", names.iter().map(|s| s.to_string()).collect());
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        result.insert_bracket(i, j, LinearCombination::monomial(names[k].to_string()));
    }
    result
}

/// `gl_n` with the basis of elementary matrices `E{i}{j}` in row major order, where
/// `[E_ij, E_kl] = δ_jk E_il - δ_li E_kj`.
///
/// # Panics
/// If `n > 10`, since the names would be ambiguous.
pub fn gl<R: Scalar>(n: usize) -> StructureConstants<R> {
    assert!(n <= 10, "gl(n) is only supported for n <= 10");
    let name = |i: usize, j: usize| format!("E{i}{j}");
    let mut result = with_basis(
        &format!("gl{n}"),
        (0..n)
            .flat_map(|i| (0..n).map(move |j| name(i, j)))
            .collect(),
    );
    for a in 0..n * n {
        for b in a + 1..n * n {
            let (i, j) = (a / n, a % n);
            let (k, l) = (b / n, b % n);
            let mut value = LinearCombination::zero();
            if j == k {
                value.add_basis_element(name(i, l), R::one());
            }
            if l == i {
                value.add_basis_element(name(k, j), -R::one());
            }
            result.insert_bracket(a, b, value);
        }
    }
    result
}

/// The abelian Lie algebra on the given basis.
pub fn abelian<R: Scalar>(basis: &[&str]) -> anyhow::Result<StructureConstants<R>> {
    StructureConstants::new(
        format!("abelian Lie algebra on {}", basis.len()),
        basis.iter().map(|s| s.to_string()).collect(),
    )
}
