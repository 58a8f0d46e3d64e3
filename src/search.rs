//! Recursive branch enumerator with a budgeted thread fan-out.
//!
//! The search fixes one lattice coordinate per depth: the simplex
//! optimizer yields the tight rational range of the next coordinate given
//! everything fixed so far, and the enumerator fans out over the integers
//! inside it. Each branch value may run on a freshly spawned thread while
//! the shared budget allows it, or synchronously in the calling thread
//! otherwise.

use std::sync::Arc;
use std::thread;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::error::SolveError;
use crate::linsolve;
use crate::matrix::Matrix;
use crate::simplex;

/// Hook invoked for every discovered lattice point, while the results lock
/// is held; implementations must therefore be quick and must not call back
/// into the search.
pub trait PointObserver: Send + Sync {
    fn on_point(&self, point: &[BigInt]);
}

/// No-op observer for callers that only want the collected results.
impl PointObserver for () {
    fn on_point(&self, _point: &[BigInt]) {}
}

/// Search tuning knobs.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of branches running as separate threads at once.
    pub threads: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threads: num_cpus::get().max(1),
        }
    }
}

/// State shared by every frame: the results collection and the thread
/// budget, both behind one lock.
struct State {
    results: Vec<Vec<BigInt>>,
    available: usize,
}

/// Read-only transform data plus the synchronized shared state, passed to
/// every frame as an explicit reference-counted handle.
struct SearchContext {
    size: usize,
    transform: Matrix,
    offset: Matrix,
    state: Mutex<State>,
    finished: Condvar,
    observer: Arc<dyn PointObserver>,
}

/// Per-recursion-node scratch. Cloned in full when a branch moves to its
/// own thread; mutated in place and restored for synchronous siblings.
#[derive(Clone)]
struct Frame {
    depth: usize,
    fixed: Vec<BigInt>,
    table: Matrix,
    x: Vec<BigRational>,
}

/// Enumerate every integer coefficient vector `v` such that
/// `lower <= basis·v <= upper`, collecting the results in no particular
/// order.
pub fn enumerate(
    basis: &Matrix,
    lower: &[BigRational],
    upper: &[BigRational],
    options: &SearchOptions,
) -> Result<Vec<Vec<BigInt>>, SolveError> {
    enumerate_with(basis, lower, upper, options, Arc::new(()))
}

/// [`enumerate`], reporting each point to `observer` as it is found.
pub fn enumerate_with(
    basis: &Matrix,
    lower: &[BigRational],
    upper: &[BigRational],
    options: &SearchOptions,
    observer: Arc<dyn PointObserver>,
) -> Result<Vec<Vec<BigInt>>, SolveError> {
    let size = basis.rows();
    assert_eq!(size, basis.cols());
    assert_eq!(size, lower.len());
    assert_eq!(size, upper.len());

    // transform = basis⁻¹ and offset = basis⁻¹·lower, sharing one
    // factorization; a singular basis aborts here, before any search
    let mut factors = basis.clone();
    let perm = linsolve::factorize(&mut factors)?;

    let mut transform = Matrix::identity(size);
    let mut offset = Matrix::zeros(size, 1);
    for i in 0..size {
        offset[(i, 0)] = lower[i].clone();
    }
    linsolve::solve(&mut transform, &factors, &perm);
    linsolve::solve(&mut offset, &factors, &perm);

    // box rows of the tableau fragment: z_i <= upper_i - lower_i
    let mut table = Matrix::zeros(2 * size + 1, size + 1);
    for i in 0..size {
        table[(1 + i, i)] = BigRational::one();
        table[(1 + i, size)] = &upper[i] - &lower[i];
    }

    let context = Arc::new(SearchContext {
        size,
        transform,
        offset,
        state: Mutex::new(State {
            results: Vec::new(),
            available: options.threads.max(1),
        }),
        finished: Condvar::new(),
        observer,
    });

    let root = Frame {
        depth: 0,
        fixed: vec![BigInt::zero(); size],
        table,
        x: vec![BigRational::zero(); size],
    };

    run_to_completion(&context, root);

    let mut state = context.state.lock();
    Ok(std::mem::take(&mut state.results))
}

/// Reserve one budget slot for the whole search, launch it as a single
/// asynchronous unit of work, and block until the budget returns to its
/// initial maximum, at which point every spawned subtree has finished.
fn run_to_completion(context: &Arc<SearchContext>, root: Frame) {
    let mut state = context.state.lock();
    let initial = state.available;
    state.available -= 1;

    spawn_subtree(context, root);

    while state.available < initial {
        context.finished.wait(&mut state);
    }
}

/// Run one subtree on a fresh detached thread, returning its budget slot
/// and waking waiters when it completes.
fn spawn_subtree(context: &Arc<SearchContext>, mut frame: Frame) {
    let context = Arc::clone(context);
    thread::spawn(move || {
        search(&mut frame, &context);

        let mut state = context.state.lock();
        state.available += 1;
        context.finished.notify_all();
    });
}

fn search(frame: &mut Frame, context: &Arc<SearchContext>) {
    let size = context.size;

    if frame.depth == size {
        let mut state = context.state.lock();
        state.results.push(frame.fixed.clone());
        context.observer.on_point(&frame.fixed);
        return;
    }

    let depth = frame.depth;

    // tight integer range of coordinate `depth`, given the fixed prefix:
    // minimize and maximize transform.row(depth)·z over the current region
    for col in 0..size {
        frame.table[(0, col)] = -&context.transform[(depth, col)];
    }
    simplex::optimize(&mut frame.x, &frame.table, size, depth);
    let min = coordinate_value(context, depth, &frame.x).ceil().to_integer();

    for col in 0..size {
        frame.table[(0, col)] = context.transform[(depth, col)].clone();
    }
    simplex::optimize(&mut frame.x, &frame.table, size, depth);
    let max = coordinate_value(context, depth, &frame.x).floor().to_integer();

    debug!(depth, min = %min, max = %max, "coordinate range");

    let offset = context.offset[(depth, 0)].clone();
    let branch_row = 1 + size + depth;

    let mut value = min;
    while value <= max {
        let rational = BigRational::from_integer(value.clone());

        // equality row for "coordinate depth = value", oriented so the
        // right-hand side stays non-negative
        if rational <= offset {
            for col in 0..size {
                frame.table[(branch_row, col)] = -&context.transform[(depth, col)];
            }
            frame.table[(branch_row, size)] = &offset - &rational;
        } else {
            for col in 0..size {
                frame.table[(branch_row, col)] = context.transform[(depth, col)].clone();
            }
            frame.table[(branch_row, size)] = &rational - &offset;
        }

        frame.fixed[depth] = value.clone();
        frame.depth += 1;

        let mut state = context.state.lock();
        if state.available > 0 {
            state.available -= 1;
            drop(state);
            spawn_subtree(context, frame.clone());
        } else {
            drop(state);
            search(frame, context);
        }

        frame.depth -= 1;
        value += 1u32;
    }
}

/// Value of coordinate `depth` at the structural point `x`:
/// `offset[depth] + transform.row(depth)·x`.
fn coordinate_value(context: &SearchContext, depth: usize, x: &[BigRational]) -> BigRational {
    let mut value = context.offset[(depth, 0)].clone();
    for col in 0..context.size {
        value += &context.transform[(depth, col)] * &x[col];
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(n.into())
    }

    fn ratq(n: i64, d: i64) -> BigRational {
        BigRational::new(n.into(), d.into())
    }

    fn sorted(mut points: Vec<Vec<BigInt>>) -> Vec<Vec<BigInt>> {
        points.sort();
        points
    }

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    fn single_threaded() -> SearchOptions {
        SearchOptions { threads: 1 }
    }

    #[test]
    fn unit_basis_enumerates_the_integer_range() {
        let basis = Matrix::identity(1);
        let points = enumerate(&basis, &[rat(0)], &[rat(3)], &single_threaded()).unwrap();

        assert_eq!(
            sorted(points),
            vec![ints(&[0]), ints(&[1]), ints(&[2]), ints(&[3])]
        );
    }

    #[test]
    fn scaled_basis_thins_the_range() {
        // 2v must land in [0, 3], so v is 0 or 1
        let mut basis = Matrix::identity(1);
        basis[(0, 0)] = rat(2);
        let points = enumerate(&basis, &[rat(0)], &[rat(3)], &single_threaded()).unwrap();

        assert_eq!(sorted(points), vec![ints(&[0]), ints(&[1])]);
    }

    #[test]
    fn rational_bounds_clip_to_interior_integers() {
        let basis = Matrix::identity(1);
        let points =
            enumerate(&basis, &[ratq(1, 2)], &[ratq(5, 2)], &single_threaded()).unwrap();

        assert_eq!(sorted(points), vec![ints(&[1]), ints(&[2])]);
    }

    #[test]
    fn negative_ranges_are_covered() {
        let basis = Matrix::identity(1);
        let points = enumerate(&basis, &[rat(-2)], &[rat(1)], &single_threaded()).unwrap();

        assert_eq!(
            sorted(points),
            vec![ints(&[-2]), ints(&[-1]), ints(&[0]), ints(&[1])]
        );
    }

    #[test]
    fn unit_square_has_four_corners() {
        let basis = Matrix::identity(2);
        let points = enumerate(
            &basis,
            &[rat(0), rat(0)],
            &[rat(1), rat(1)],
            &single_threaded(),
        )
        .unwrap();

        assert_eq!(
            sorted(points),
            vec![ints(&[0, 0]), ints(&[0, 1]), ints(&[1, 0]), ints(&[1, 1])]
        );
    }

    #[test]
    fn singular_basis_is_rejected_before_searching() {
        let basis = Matrix::zeros(2, 2);
        let result = enumerate(
            &basis,
            &[rat(0), rat(0)],
            &[rat(1), rat(1)],
            &single_threaded(),
        );

        assert_eq!(result, Err(SolveError::NonInvertible { column: 0 }));
    }

    #[test]
    fn empty_box_yields_no_points() {
        let basis = Matrix::identity(1);
        let points =
            enumerate(&basis, &[ratq(1, 3)], &[ratq(2, 3)], &single_threaded()).unwrap();

        assert!(points.is_empty());
    }
}
