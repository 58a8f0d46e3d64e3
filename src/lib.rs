//! Latbox - exact enumeration of lattice points inside a rational box.
//!
//! Given a non-singular integer basis `B` and rational bounds
//! `lower <= B·v <= upper`, latbox finds every integer coefficient vector
//! `v` satisfying the box, with no floating-point error anywhere: all
//! arithmetic is over arbitrary-precision rationals.
//!
//! # Architecture
//!
//! The pipeline runs in three stages:
//!
//! - **[`linsolve`]** - exact LU factorization with row pivoting, used
//!   once to invert the basis and express the box in the search's working
//!   coordinates.
//! - **[`simplex`]** - an exact two-phase simplex optimizer, called at
//!   every search node to bound the next coordinate given the ones
//!   already fixed.
//! - **[`search`]** - a recursive branch enumerator that fans out over
//!   the admissible integers per coordinate, offloading branches to
//!   additional threads under a shared budget.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration and logging setup
//! - [`cli`] - command definitions and runners
//! - [`error`] - error types for the crate
//! - [`input`] - problem-description parsing
//! - [`matrix`] - dense rational matrix primitive
//!
//! # Example
//!
//! ```
//! use latbox::matrix::Matrix;
//! use latbox::search::{self, SearchOptions};
//! use num_rational::BigRational;
//!
//! let basis = Matrix::identity(2);
//! let lower = vec![BigRational::from_integer(0.into()); 2];
//! let upper = vec![BigRational::from_integer(1.into()); 2];
//!
//! let points = search::enumerate(&basis, &lower, &upper, &SearchOptions { threads: 1 }).unwrap();
//! assert_eq!(points.len(), 4);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod linsolve;
pub mod matrix;
pub mod search;
pub mod simplex;
