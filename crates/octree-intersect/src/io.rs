//! Text input and output.
//!
//! Input is a whitespace-separated token stream: the shape count `n`, then
//! `n` groups of nine coordinates, three per vertex. Each group becomes one
//! shape through [`Shape::from_vertices`], indexed by its position in the
//! stream. Output is one intersecting pair per line, `"<a> <b>"`.

use std::io::{self, Read, Write};

use nalgebra::Point3;

use crate::Shape;

const COORDS_PER_SHAPE: usize = 9;

/// Errors raised while parsing shape input.
///
/// Token positions are 1-based and count the shape count token.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum InputError {
    /// The input contains no tokens at all.
    #[error("missing shape count")]
    MissingCount,

    /// The first token is not a non-negative integer.
    #[error("invalid shape count {token:?}")]
    InvalidCount { token: String },

    /// The input ended before every announced shape was read.
    #[error("unexpected end of input: expected {expected} shapes, shape {shape} is incomplete")]
    UnexpectedEof { expected: usize, shape: usize },

    /// A coordinate is not a finite number.
    #[error("invalid number {token:?} at token {position}")]
    InvalidNumber { token: String, position: usize },

    /// The reader failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Parses shapes from text, collapsing degenerate triangles with `epsilon`.
///
/// Tokens after the last announced shape are ignored.
pub fn parse_shapes(input: &str, epsilon: f64) -> Result<Vec<Shape>, InputError> {
    let mut tokens = input.split_whitespace();

    let count_token = tokens.next().ok_or(InputError::MissingCount)?;
    let count: usize = count_token.parse().map_err(|_| InputError::InvalidCount {
        token: count_token.to_string(),
    })?;

    // The count is untrusted; cap the reservation by what the text can hold
    let mut shapes = Vec::with_capacity(count.min(input.len() / (2 * COORDS_PER_SHAPE) + 1));
    let mut position = 1;

    for index in 0..count {
        let mut coords = [0.0; COORDS_PER_SHAPE];
        for coord in &mut coords {
            let token = tokens.next().ok_or(InputError::UnexpectedEof {
                expected: count,
                shape: index,
            })?;
            position += 1;
            *coord = parse_coordinate(token, position)?;
        }

        let vertices = [
            Point3::new(coords[0], coords[1], coords[2]),
            Point3::new(coords[3], coords[4], coords[5]),
            Point3::new(coords[6], coords[7], coords[8]),
        ];
        shapes.push(Shape::from_vertices(index, vertices, epsilon));
    }

    Ok(shapes)
}

/// Reads the whole of `reader` and parses it with [`parse_shapes`].
pub fn read_shapes<R: Read>(mut reader: R, epsilon: f64) -> Result<Vec<Shape>, InputError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_shapes(&input, epsilon)
}

fn parse_coordinate(token: &str, position: usize) -> Result<f64, InputError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::InvalidNumber {
            token: token.to_string(),
            position,
        })
}

/// Formats pairs as one `"<a> <b>"` line each.
pub fn format_pairs(pairs: &[(usize, usize)]) -> String {
    pairs.iter().map(|(a, b)| format!("{a} {b}\n")).collect()
}

/// Writes one `"<a> <b>"` line per pair.
pub fn write_pairs<W: Write>(pairs: &[(usize, usize)], mut writer: W) -> io::Result<()> {
    for (a, b) in pairs {
        writeln!(writer, "{a} {b}")?;
    }
    writer.flush()
}

/// Writes one index per line.
pub fn write_indices<W, I>(indices: I, mut writer: W) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = usize>,
{
    for index in indices {
        writeln!(writer, "{index}")?;
    }
    writer.flush()
}
