//! Line-oriented text format for mazes.
//!
//! ```text
//! 3 2
//! S.#
//! #.G
//! ```
//!
//! The header holds `columns rows`, followed by one line of cell symbols per
//! row. Solver progress is not stored; a loaded maze is always unexplored.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::grids::{CellKind, Maze, Point};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("missing `columns rows` header")]
    MissingHeader,
    #[display("header must hold exactly 2 numbers, found {found} tokens")]
    HeaderTokenCount { found: usize },
    #[display("column count `{token}` is not a non-negative integer")]
    InvalidColumns { token: String },
    #[display("row count `{token}` is not a non-negative integer")]
    InvalidRows { token: String },
    #[display("maze must have at least one row and one column, got {columns}x{rows}")]
    ZeroDimension { columns: usize, rows: usize },
    #[display("line {line}, column {column}: unknown cell symbol {symbol:?}")]
    UnknownCell {
        line: usize,
        column: usize,
        symbol: char,
    },
    #[display("line {line}: expected {expected} cells, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[display("line {line}: second start cell, only one is allowed")]
    MultipleStarts { line: usize },
    #[display("maze has no start cell")]
    MissingStart,
    #[display("line {line}: second goal cell, only one is allowed")]
    MultipleGoals { line: usize },
    #[display("maze has no goal cell")]
    MissingGoal,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("cannot read maze file: {_0}")]
    Io(#[from] io::Error),
    #[display("malformed maze file: {_0}")]
    Parse(#[from] ParseError),
}

/// Line number of the header, rows follow it.
const HEADER_LINE: usize = 1;

fn parse_header(line: &str) -> Result<(usize, usize), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [columns, rows] = tokens[..] else {
        return Err(ParseError::HeaderTokenCount {
            found: tokens.len(),
        });
    };

    let columns: usize = columns.parse().map_err(|_| ParseError::InvalidColumns {
        token: columns.to_owned(),
    })?;
    let rows: usize = rows.parse().map_err(|_| ParseError::InvalidRows {
        token: rows.to_owned(),
    })?;

    if columns == 0 || rows == 0 {
        return Err(ParseError::ZeroDimension { columns, rows });
    }

    Ok((columns, rows))
}

/// Parses a whole maze. Nothing is returned unless every line is valid.
pub fn parse_maze(text: &str) -> Result<Maze, ParseError> {
    let mut lines = text.lines().map(str::trim);
    let header = lines
        .next()
        .filter(|line| !line.is_empty())
        .ok_or(ParseError::MissingHeader)?;
    let (columns, rows) = parse_header(header)?;

    let mut body: Vec<&str> = lines.collect();
    while body.last().is_some_and(|line| line.is_empty()) {
        body.pop();
    }
    if body.len() != rows {
        return Err(ParseError::RowCount {
            expected: rows,
            found: body.len(),
        });
    }

    let mut kinds = Vec::with_capacity(rows * columns);
    let mut start = None;
    let mut goal = None;

    for (row, text) in body.iter().enumerate() {
        let line = HEADER_LINE + 1 + row;
        let found = text.chars().count();
        if found != columns {
            return Err(ParseError::RowLength {
                line,
                expected: columns,
                found,
            });
        }

        for (column, symbol) in text.chars().enumerate() {
            let kind = CellKind::try_from(symbol).map_err(|_| ParseError::UnknownCell {
                line,
                column: column + 1,
                symbol,
            })?;

            let point = Point::new(column, row);
            match kind {
                CellKind::Start if start.is_some() => {
                    return Err(ParseError::MultipleStarts { line })
                }
                CellKind::Start => start = Some(point),
                CellKind::Goal if goal.is_some() => {
                    return Err(ParseError::MultipleGoals { line })
                }
                CellKind::Goal => goal = Some(point),
                CellKind::Wall | CellKind::Open => {}
            }
            kinds.push((point, kind));
        }
    }

    if start.is_none() {
        return Err(ParseError::MissingStart);
    }
    if goal.is_none() {
        return Err(ParseError::MissingGoal);
    }

    let mut maze = Maze::filled(rows, columns);
    for (point, kind) in kinds {
        if kind != CellKind::Wall {
            maze.set_cell(point, kind);
        }
    }

    debug!("parsed {}x{} maze", rows, columns);
    Ok(maze)
}

/// Header and symbol rows, every line newline-terminated.
pub fn serialize_maze(maze: &Maze) -> String {
    format!("{} {}\n{}", maze.columns(), maze.rows(), maze)
}

impl FromStr for Maze {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_maze(text)
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<Maze, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let maze = parse_maze(&text)?;

    info!(
        "loaded {}x{} maze from {}",
        maze.rows(),
        maze.columns(),
        path.display()
    );
    Ok(maze)
}

pub fn save(maze: &Maze, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    fs::write(path, serialize_maze(maze))?;

    info!(
        "saved {}x{} maze to {}",
        maze.rows(),
        maze.columns(),
        path.display()
    );
    Ok(())
}
