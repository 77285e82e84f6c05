//! Futoshiki: fill an n×n grid with 1..=n so that no row or column repeats a
//! value and every order sign between adjacent cells holds.
//!
//! Boards are given row by row, alternating cells with the relation between
//! horizontally adjacent cells, e.g. a 3×3 row `1 < _ . _` is
//! `[Given(1), Lt, Blank, NoRel, Blank]`.
//!
//! Two models are provided: one using only binary not-equal tables, and one
//! using n-ary all-different (permutation) tables for rows and columns.

use itertools::{iproduct, Itertools};

use crate::{
    error::{Error, Result},
    solver::{
        constraint::Constraint,
        csp::{Csp, VariableId},
        variable::Variable,
    },
};

/// One entry of a board row: cells at even positions, relations at odd ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Given(i64),
    Blank,
    /// The cell to the left is smaller than the cell to the right.
    Lt,
    /// The cell to the left is greater than the cell to the right.
    Gt,
    /// No relation between the adjacent cells.
    NoRel,
}

/// Futoshiki over binary constraints only: pairwise not-equal tables for rows
/// and columns plus the inequality tables.
pub fn binary_model(board: &[Vec<Entry>]) -> Result<(Csp<i64>, Vec<Vec<VariableId>>)> {
    let size = board.len();
    let mut csp = Csp::new("Futoshiki (binary)");
    let grid = cell_variables(&mut csp, board);

    for (i, j) in iproduct!(0..size, 0..size) {
        // Each unordered pair once: rightwards along the row, downwards
        // along the column.
        for col in (j + 1)..size {
            add_pair_table(&mut csp, grid[i][j], grid[i][col], |x, y| x != y, "!=")?;
        }
        for row in (i + 1)..size {
            add_pair_table(&mut csp, grid[i][j], grid[row][j], |x, y| x != y, "!=")?;
        }
    }

    add_inequalities(&mut csp, board, &grid)?;
    Ok((csp, grid))
}

/// Futoshiki over n-ary all-different tables: one permutation table per row
/// and per column, plus the binary inequality tables.
pub fn all_diff_model(board: &[Vec<Entry>]) -> Result<(Csp<i64>, Vec<Vec<VariableId>>)> {
    let size = board.len();
    let domain: Vec<i64> = (1..=size as i64).collect();
    let mut csp = Csp::new("Futoshiki (all-different)");
    let grid = cell_variables(&mut csp, board);

    for i in 0..size {
        let mut con = Constraint::new(format!("diffRow{i}"), grid[i].clone());
        con.add_satisfying_tuples(permutation_tuples(&domain))?;
        csp.add_constraint(con)?;
    }
    for j in 0..size {
        let scope: Vec<VariableId> = (0..size).map(|i| grid[i][j]).collect();
        let mut con = Constraint::new(format!("diffCol{j}"), scope);
        con.add_satisfying_tuples(permutation_tuples(&domain))?;
        csp.add_constraint(con)?;
    }

    add_inequalities(&mut csp, board, &grid)?;
    Ok((csp, grid))
}

/// One variable per cell; a given cell gets a singleton domain.
fn cell_variables(csp: &mut Csp<i64>, board: &[Vec<Entry>]) -> Vec<Vec<VariableId>> {
    let size = board.len();
    let domain: Vec<i64> = (1..=size as i64).collect();
    let mut grid = Vec::with_capacity(size);
    for (i, row) in board.iter().enumerate() {
        let mut cells = Vec::with_capacity(size);
        for (j, entry) in row.iter().enumerate() {
            let cell_domain = match entry {
                Entry::Given(value) => vec![*value],
                Entry::Blank => domain.clone(),
                _ => continue,
            };
            let name = format!("({i},{})", j / 2);
            cells.push(csp.add_variable(Variable::new(name, cell_domain)));
        }
        grid.push(cells);
    }
    grid
}

fn add_pair_table(
    csp: &mut Csp<i64>,
    a: VariableId,
    b: VariableId,
    keep: impl Fn(i64, i64) -> bool,
    op: &str,
) -> Result<()> {
    let name = format!("({} {op} {})", csp.var(a).name(), csp.var(b).name());
    let tuples: Vec<Vec<i64>> = iproduct!(
        csp.var(a).domain().to_vec(),
        csp.var(b).domain().to_vec()
    )
    .filter(|&(x, y)| keep(x, y))
    .map(|(x, y)| vec![x, y])
    .collect();

    let mut con = Constraint::new(name, vec![a, b]);
    con.add_satisfying_tuples(tuples)?;
    csp.add_constraint(con)?;
    Ok(())
}

/// Reads the order signs between horizontally adjacent cells; a `Lt` sign is
/// modelled as greater-than with the scope flipped.
fn add_inequalities(
    csp: &mut Csp<i64>,
    board: &[Vec<Entry>],
    grid: &[Vec<VariableId>],
) -> Result<()> {
    for (i, row) in board.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            let (greater, smaller) = match entry {
                // Signs only belong at odd positions, between two cells.
                Entry::Gt | Entry::Lt if j % 2 == 0 => {
                    return Err(Error::MisplacedSign { row: i, position: j });
                }
                Entry::Gt => ((j - 1) / 2, (j + 1) / 2),
                Entry::Lt => ((j + 1) / 2, (j - 1) / 2),
                _ => continue,
            };
            add_pair_table(csp, grid[i][greater], grid[i][smaller], |x, y| x > y, ">")?;
        }
    }
    Ok(())
}

fn permutation_tuples(domain: &[i64]) -> Vec<Vec<i64>> {
    domain
        .iter()
        .copied()
        .permutations(domain.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        propagate::Propagator,
        search::{BacktrackingSearch, SearchOutcome},
    };
    use super::Entry::{Blank as B, Given, Gt, Lt, NoRel as N};

    type Model = fn(&[Vec<Entry>]) -> crate::error::Result<(Csp<i64>, Vec<Vec<VariableId>>)>;

    fn solvable_board() -> Vec<Vec<Entry>> {
        vec![
            vec![Given(1), Lt, B, N, B],
            vec![B, N, B, N, Given(2)],
            vec![Given(2), N, B, Gt, B],
        ]
    }

    fn unsolvable_board() -> Vec<Vec<Entry>> {
        vec![
            vec![Given(1), Gt, B, N, Given(3)],
            vec![B, N, B, N, B],
            vec![Given(3), Lt, B, N, Given(1)],
        ]
    }

    fn read_grid(csp: &Csp<i64>, grid: &[Vec<VariableId>]) -> Vec<i64> {
        grid.iter()
            .flatten()
            .map(|&id| *csp.var(id).assigned_value().unwrap())
            .collect()
    }

    #[test]
    fn binary_model_finds_the_unique_solution() {
        let (mut csp, grid) = binary_model(&solvable_board()).unwrap();
        let (outcome, _) = BacktrackingSearch::new(Propagator::BacktrackOnly)
            .solve(&mut csp)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Satisfied);
        assert_eq!(read_grid(&csp, &grid), vec![1, 2, 3, 3, 1, 2, 2, 3, 1]);
    }

    #[test]
    fn all_diff_model_finds_the_unique_solution() {
        let (mut csp, grid) = all_diff_model(&solvable_board()).unwrap();
        let (outcome, _) = BacktrackingSearch::new(Propagator::GeneralisedArcConsistency)
            .solve(&mut csp)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Satisfied);
        assert_eq!(read_grid(&csp, &grid), vec![1, 2, 3, 3, 1, 2, 2, 3, 1]);
    }

    #[test]
    fn conflicting_signs_leave_every_cell_unassigned() {
        for model in [binary_model as Model, all_diff_model] {
            let (mut csp, grid) = model(&unsolvable_board()).unwrap();
            let (outcome, _) = BacktrackingSearch::new(Propagator::ForwardChecking)
                .solve(&mut csp)
                .unwrap();
            assert_eq!(outcome, SearchOutcome::Exhausted);
            for &id in grid.iter().flatten() {
                assert!(csp.var(id).assigned_value().is_none());
            }
        }
    }

    #[test]
    fn a_sign_at_a_cell_position_is_rejected() {
        let board = vec![vec![Gt, B, B], vec![B, N, B]];
        for model in [binary_model as Model, all_diff_model] {
            let err = model(&board).unwrap_err();
            assert_eq!(err.to_string(), "board row 0 has a relation sign at cell position 0");
        }
    }

    #[test]
    fn binary_model_constraint_count() {
        // 3 pairs per row and per column, 6 rows+columns, plus two signs.
        let (csp, grid) = binary_model(&solvable_board()).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(csp.constraints().len(), 3 * 3 + 3 * 3 + 2);
    }
}
