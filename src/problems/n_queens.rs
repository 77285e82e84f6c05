use itertools::iproduct;

use crate::{
    error::Result,
    solver::{constraint::Constraint, csp::Csp, variable::Variable},
};

/// Builds an n-queens CSP: one variable per column holding the queen's row
/// (1-based), with a binary table constraint per column pair forbidding
/// shared rows and diagonals.
pub fn n_queens(n: usize) -> Result<Csp<i64>> {
    let domain: Vec<i64> = (1..=n as i64).collect();
    let mut csp = Csp::new(format!("{n}-Queens"));

    let vars: Vec<_> = (1..=n)
        .map(|i| csp.add_variable(Variable::new(format!("Q{i}"), domain.clone())))
        .collect();

    for qi in 0..n {
        for qj in (qi + 1)..n {
            let mut con = Constraint::new(
                format!("C(Q{},Q{})", qi + 1, qj + 1),
                vec![vars[qi], vars[qj]],
            );
            let tuples = iproduct!(domain.iter(), domain.iter())
                .filter(|&(&i, &j)| compatible(qi, qj, i, j))
                .map(|(&i, &j)| vec![i, j]);
            con.add_satisfying_tuples(tuples)?;
            csp.add_constraint(con)?;
        }
    }
    Ok(csp)
}

/// Rows `i` and `j` are compatible for the queens in columns `qi` and `qj`.
fn compatible(qi: usize, qj: usize, i: i64, j: i64) -> bool {
    i != j && (i - j).abs() != (qj as i64 - qi as i64).abs()
}
