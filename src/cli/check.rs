//! The `check` command: validate a problem description without searching.

use super::CheckArgs;
use crate::error::Result;
use crate::input::Problem;
use crate::linsolve;

pub fn run(args: &CheckArgs) -> Result<()> {
    let problem = match &args.input {
        Some(path) => Problem::from_path(path)?,
        None => Problem::from_stdin()?,
    };

    let mut factors = problem.basis.clone();
    linsolve::factorize(&mut factors)?;

    println!("ok: dimension {}, basis invertible", problem.size);
    Ok(())
}
