use queen_dd::{Bitmap, Branch, DdSpec, Step};
use std::collections::BTreeSet;

/// Install a test logger once per test binary.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Return every solution of the plain puzzle as the column chosen in each
/// row, found by plain backtracking.
#[allow(dead_code)]
pub fn brute_force_solutions(side_length: usize, diagonals: bool) -> BTreeSet<Vec<usize>> {
    fn extend(
        columns: &mut Vec<usize>,
        side_length: usize,
        diagonals: bool,
        out: &mut BTreeSet<Vec<usize>>,
    ) {
        let row = columns.len();
        if row == side_length {
            out.insert(columns.clone());
            return;
        }

        for column in 0..side_length {
            let attacked = columns.iter().enumerate().any(|(other_row, &other_column)| {
                other_column == column
                    || (diagonals && other_column.abs_diff(column) == row - other_row)
            });
            if !attacked {
                columns.push(column);
                extend(columns, side_length, diagonals, out);
                columns.pop();
            }
        }
    }

    let mut out = BTreeSet::new();
    extend(&mut Vec::new(), side_length, diagonals, &mut out);
    out
}

/// Return every partition of the board into `side_length` plain solutions,
/// labelled so that color `c` sits on column `c` of the top row. Each
/// partition is listed as the solution (columns per row) of every color.
#[allow(dead_code)]
pub fn brute_force_partitions(side_length: usize, diagonals: bool) -> BTreeSet<Vec<Vec<usize>>> {
    fn extend(
        chosen: &mut Vec<Vec<usize>>,
        occupied: &mut Vec<Bitmap>,
        candidates: &[Vec<usize>],
        side_length: usize,
        out: &mut BTreeSet<Vec<Vec<usize>>>,
    ) {
        let color = chosen.len();
        if color == side_length {
            out.insert(chosen.clone());
            return;
        }

        for solution in candidates {
            if solution[side_length - 1] != color {
                continue;
            }
            let fits = solution
                .iter()
                .enumerate()
                .all(|(row, &column)| occupied[row] & (1 << column) == 0);
            if !fits {
                continue;
            }

            for (row, &column) in solution.iter().enumerate() {
                occupied[row] |= 1 << column;
            }
            chosen.push(solution.clone());
            extend(chosen, occupied, candidates, side_length, out);
            chosen.pop();
            for (row, &column) in solution.iter().enumerate() {
                occupied[row] &= !(1 << column);
            }
        }
    }

    let candidates: Vec<_> = brute_force_solutions(side_length, diagonals)
        .into_iter()
        .collect();
    let mut out = BTreeSet::new();
    extend(
        &mut Vec::new(),
        &mut vec![0; side_length],
        &candidates,
        side_length,
        &mut out,
    );
    out
}

/// A single call to [`DdSpec::child`] observed by [`for_each_transition`].
#[allow(dead_code)]
pub struct Transition<'a> {
    pub before: &'a [Bitmap],
    pub level: usize,
    pub branch: Branch,
    pub after: &'a [Bitmap],
    pub step: Step,
}

/// Call `visit` for every transition reachable from the root of `spec`.
#[allow(dead_code)]
pub fn for_each_transition<S: DdSpec>(spec: &S, mut visit: impl FnMut(&Transition)) {
    fn descend<S: DdSpec>(
        spec: &S,
        state: &[Bitmap],
        level: usize,
        visit: &mut impl FnMut(&Transition),
    ) {
        for branch in Branch::ALL {
            let mut after = state.to_vec();
            let step = spec.child(&mut after, level, branch);

            visit(&Transition {
                before: state,
                level,
                branch,
                after: &after,
                step,
            });

            if let Step::Level(next) = step {
                descend(spec, &after, next, visit);
            }
        }
    }

    let mut root = vec![0; spec.array_size()];
    if let Step::Level(level) = spec.root(&mut root) {
        descend(spec, &root, level, &mut visit);
    }
}
