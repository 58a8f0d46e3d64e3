//! Problem-description parsing.
//!
//! The textual format is line-oriented: the dimension, a header line, one
//! line per basis column, two separator lines, then the lower and upper
//! bound rows. Rational entries are `[sign]numerator[/denominator]`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::InputError;
use crate::matrix::Matrix;

/// A parsed enumeration problem: a lattice basis and a rational box.
#[derive(Debug, Clone)]
pub struct Problem {
    pub size: usize,
    /// Input file row `i` is column `i` of the basis.
    pub basis: Matrix,
    pub lower: Vec<BigRational>,
    pub upper: Vec<BigRational>,
}

impl Problem {
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(InputError::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_stdin() -> Result<Self, InputError> {
        Self::from_reader(io::stdin().lock())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, InputError> {
        let mut lines = NumberedLines::new(reader);

        let header = lines.next_line()?;
        let size: usize = header.trim().parse().map_err(|_| InputError::Malformed {
            line: lines.number,
            reason: format!("invalid dimension '{}'", header.trim()),
        })?;
        if size < 1 {
            return Err(InputError::Malformed {
                line: lines.number,
                reason: "dimension must be at least 1".into(),
            });
        }

        lines.next_line()?;

        let mut basis = Matrix::zeros(size, size);
        for col in 0..size {
            let entries = parse_row(&lines.next_line()?, lines.number, size)?;
            for (row, value) in entries.into_iter().enumerate() {
                basis[(row, col)] = value;
            }
        }

        lines.next_line()?;
        lines.next_line()?;

        let lower = parse_row(&lines.next_line()?, lines.number, size)?;
        let upper = parse_row(&lines.next_line()?, lines.number, size)?;

        Ok(Self {
            size,
            basis,
            lower,
            upper,
        })
    }
}

struct NumberedLines<R> {
    reader: R,
    number: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, number: 0 }
    }

    fn next_line(&mut self) -> Result<String, InputError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(InputError::Io)?;
        self.number += 1;
        if read == 0 {
            return Err(InputError::Malformed {
                line: self.number,
                reason: "unexpected end of input".into(),
            });
        }
        Ok(line)
    }
}

fn parse_row(line: &str, number: usize, expected: usize) -> Result<Vec<BigRational>, InputError> {
    let mut entries = Vec::with_capacity(expected);
    for token in line.split_whitespace() {
        entries.push(parse_rational(token, number)?);
    }
    if entries.len() != expected {
        return Err(InputError::Malformed {
            line: number,
            reason: format!("expected {expected} entries, found {}", entries.len()),
        });
    }
    Ok(entries)
}

fn parse_rational(token: &str, number: usize) -> Result<BigRational, InputError> {
    let malformed = |reason: String| InputError::Malformed {
        line: number,
        reason,
    };

    let (numer, denom) = match token.split_once('/') {
        Some((n, d)) => (n, Some(d)),
        None => (token, None),
    };

    let numer: BigInt = numer
        .parse()
        .map_err(|_| malformed(format!("invalid rational entry '{token}'")))?;
    let denom: BigInt = match denom {
        Some(d) => d
            .parse()
            .map_err(|_| malformed(format!("invalid rational entry '{token}'")))?,
        None => BigInt::one(),
    };
    if denom.is_zero() {
        return Err(malformed(format!("zero denominator in '{token}'")));
    }

    Ok(BigRational::new(numer, denom))
}
