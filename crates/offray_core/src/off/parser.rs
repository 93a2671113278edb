//! Line-oriented OFF parser.

use std::collections::VecDeque;
use std::str::{FromStr, SplitWhitespace};

use offray_math::Vec3;
use thiserror::Error;

/// Errors that can occur during OFF parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Missing OFF header (found {0:?})")]
    MissingHeader(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of file: expected {0}")]
    UnexpectedEof(&'static str),

    #[error("Invalid number at line {line}: {token:?}")]
    InvalidNumber { line: usize, token: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Raw contents of an OFF file, with polygons already triangulated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[usize; 3]>,
    /// Edge count from the header; carried but unused
    pub edge_count: usize,
}

/// OFF file parser.
pub struct OffParser {
    /// Significant lines (comments stripped, blanks dropped) with 1-based numbers
    lines: VecDeque<(usize, String)>,
    current_line: usize,
}

impl OffParser {
    /// Create a new parser from file contents.
    pub fn new(content: &str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let code = line.split('#').next().unwrap_or("").trim();
                (!code.is_empty()).then(|| (i + 1, code.to_string()))
            })
            .collect();

        Self {
            lines,
            current_line: 0,
        }
    }

    /// Parse the whole file.
    pub fn parse(&mut self) -> ParseResult<OffData> {
        let (vertex_count, face_count, edge_count) = self.parse_header()?;

        // Header counts are untrusted; never reserve more than the remaining lines.
        let mut vertices = Vec::with_capacity(vertex_count.min(self.lines.len()));
        for _ in 0..vertex_count {
            vertices.push(self.parse_vertex()?);
        }

        let mut faces = Vec::with_capacity(face_count.min(self.lines.len()));
        for _ in 0..face_count {
            self.parse_face(&mut faces)?;
        }

        if !self.lines.is_empty() {
            log::debug!(
                "Ignoring {} trailing line(s) after the face list",
                self.lines.len()
            );
        }

        Ok(OffData {
            vertices,
            faces,
            edge_count,
        })
    }

    fn next_line(&mut self, expected: &'static str) -> ParseResult<String> {
        let (number, line) = self
            .lines
            .pop_front()
            .ok_or(ParseError::UnexpectedEof(expected))?;
        self.current_line = number;
        Ok(line)
    }

    /// Parse `OFF` and the `vertices faces [edges]` counts.
    fn parse_header(&mut self) -> ParseResult<(usize, usize, usize)> {
        let header = self.next_line("OFF header")?;
        let mut tokens = header.split_whitespace();
        match tokens.next() {
            Some("OFF") => {}
            other => return Err(ParseError::MissingHeader(other.unwrap_or("").to_string())),
        }

        // Counts may share the header line
        let rest: Vec<&str> = tokens.collect();
        let counts_line = if rest.is_empty() {
            self.next_line("vertex/face/edge counts")?
        } else {
            rest.join(" ")
        };

        let mut tokens = counts_line.split_whitespace();
        let vertex_count = self.next_number(&mut tokens, "vertex count")?;
        let face_count = self.next_number(&mut tokens, "face count")?;
        let edge_count = match tokens.next() {
            Some(token) => self.number(token)?,
            None => 0,
        };

        Ok((vertex_count, face_count, edge_count))
    }

    fn parse_vertex(&mut self) -> ParseResult<Vec3> {
        let line = self.next_line("vertex")?;
        let mut tokens = line.split_whitespace();

        let x = self.next_number(&mut tokens, "x coordinate")?;
        let y = self.next_number(&mut tokens, "y coordinate")?;
        let z = self.next_number(&mut tokens, "z coordinate")?;

        Ok(Vec3::new(x, y, z))
    }

    /// Parse one `n i0 i1 ... i(n-1)` face, fan-triangulating polygons.
    fn parse_face(&mut self, faces: &mut Vec<[usize; 3]>) -> ParseResult<()> {
        let line = self.next_line("face")?;
        let mut tokens = line.split_whitespace();

        let corner_count: usize = self.next_number(&mut tokens, "face vertex count")?;
        if corner_count < 3 {
            return Err(ParseError::Parse {
                line: self.current_line,
                message: format!("Face has {} vertices, at least 3 required", corner_count),
            });
        }

        let mut corners = Vec::with_capacity(corner_count);
        for _ in 0..corner_count {
            corners.push(self.next_number(&mut tokens, "face vertex index")?);
        }

        if corner_count > 3 {
            log::debug!(
                "Fan-triangulating {}-gon at line {}",
                corner_count,
                self.current_line
            );
        }

        for k in 1..corner_count - 1 {
            faces.push([corners[0], corners[k], corners[k + 1]]);
        }

        Ok(())
    }

    fn next_number<T: FromStr>(
        &self,
        tokens: &mut SplitWhitespace<'_>,
        what: &str,
    ) -> ParseResult<T> {
        let token = tokens.next().ok_or_else(|| ParseError::Parse {
            line: self.current_line,
            message: format!("Missing {}", what),
        })?;
        self.number(token)
    }

    fn number<T: FromStr>(&self, token: &str) -> ParseResult<T> {
        token.parse::<T>().map_err(|_| ParseError::InvalidNumber {
            line: self.current_line,
            token: token.to_string(),
        })
    }
}

/// Parse an OFF string into raw vertex and triangle data.
pub fn parse_off(content: &str) -> ParseResult<OffData> {
    let mut parser = OffParser::new(content);
    parser.parse()
}
