//! Graph-store error type.
//!
//! Every variant is fatal at startup: the input files are configuration, and
//! the fix is to correct them and restart.  There is no retry path.

use std::fmt;

use thiserror::Error;

/// Which of the two companion input files an error refers to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InputFile {
    /// Vertex coordinates (`.co`).
    Coordinates,
    /// Weighted directed arcs (`.gr`).
    Arcs,
}

impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFile::Coordinates => f.write_str("coordinate"),
            InputFile::Arcs        => f.write_str("arc"),
        }
    }
}

/// Errors produced by `sp-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cannot read {file} file: {source}")]
    FileAccess {
        file: InputFile,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {file} file at line {line}: {reason}")]
    MalformedInput {
        file: InputFile,
        line: usize,
        reason: String,
    },

    #[error(
        "coordinate file declares {coordinate_vertices} vertices \
         but arc file declares {arc_vertices}"
    )]
    InconsistentGraph {
        coordinate_vertices: usize,
        arc_vertices: usize,
    },
}

impl GraphError {
    pub(crate) fn malformed(file: InputFile, line: usize, reason: impl Into<String>) -> Self {
        GraphError::MalformedInput { file, line, reason: reason.into() }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
