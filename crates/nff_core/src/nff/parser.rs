//! NFF text parser.
//!
//! Produces one [`NffStatement`] per record. Multi-line records (`p`, `pp`)
//! consume their vertex lines and come out as a single statement tagged with
//! the line of the keyword.

use std::collections::VecDeque;

use nff_math::DVec3;
use thiserror::Error;

use crate::scene::{Color, Material};

/// Errors that can occur during NFF parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number at line {line}: {token:?}")]
    InvalidNumber { line: usize, token: String },

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("Surface at line {line} has no material (no preceding `f` record)")]
    MissingMaterial { line: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A single NFF record.
#[derive(Debug, Clone, PartialEq)]
pub enum NffRecord {
    Background(Color),
    /// Start of a viewing block
    View,
    From(DVec3),
    At(DVec3),
    Up(DVec3),
    Angle(f64),
    Hither(f64),
    Resolution(u32, u32),
    Light { position: DVec3, color: Color },
    Fill(Material),
    Sphere { center: DVec3, radius: f64 },
    Polygon { vertices: Vec<DVec3> },
    PolygonPatch { vertices: Vec<DVec3>, normals: Vec<DVec3> },
}

/// A record and the (1-based) line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct NffStatement {
    pub line: usize,
    pub record: NffRecord,
}

/// NFF file parser.
pub struct NffParser {
    lines: VecDeque<(usize, String)>,
}

impl NffParser {
    /// Create a new parser from file contents.
    pub fn new(content: &str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(i, s)| (i + 1, s.to_string()))
            .collect();

        Self { lines }
    }

    /// Parse every record in the file.
    pub fn parse(&mut self) -> ParseResult<Vec<NffStatement>> {
        let mut statements = Vec::new();

        while let Some((line, text)) = self.next_content_line() {
            let tokens: Vec<&str> = text.split_whitespace().collect();
            if let Some(record) = self.parse_record(line, &tokens)? {
                statements.push(NffStatement { line, record });
            }
        }

        log::debug!("Parsed {} NFF records", statements.len());
        Ok(statements)
    }

    /// Next line that is neither blank nor a comment.
    fn next_content_line(&mut self) -> Option<(usize, String)> {
        while let Some((num, line)) = self.lines.pop_front() {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                return Some((num, trimmed.to_string()));
            }
        }
        None
    }

    fn parse_record(&mut self, line: usize, tokens: &[&str]) -> ParseResult<Option<NffRecord>> {
        let (keyword, args) = match tokens.split_first() {
            Some(split) => split,
            None => return Ok(None),
        };

        let record = match *keyword {
            "b" => NffRecord::Background(parse_vec3(line, keyword, args)?),
            "v" => NffRecord::View,
            "from" => NffRecord::From(parse_vec3(line, keyword, args)?),
            "at" => NffRecord::At(parse_vec3(line, keyword, args)?),
            "up" => NffRecord::Up(parse_vec3(line, keyword, args)?),
            "angle" => NffRecord::Angle(parse_floats::<1>(line, keyword, args)?[0]),
            "hither" => NffRecord::Hither(parse_floats::<1>(line, keyword, args)?[0]),
            "resolution" => {
                expect_count(line, keyword, args, 2)?;
                NffRecord::Resolution(parse_int(line, args[0])?, parse_int(line, args[1])?)
            }
            "l" => {
                let position = parse_vec3(line, keyword, args)?;
                // Color is optional; a light without one is white
                let color = if args.len() >= 6 {
                    parse_vec3(line, keyword, &args[3..])?
                } else {
                    Color::ONE
                };
                NffRecord::Light { position, color }
            }
            "f" => {
                let [r, g, b, kd, ks, shine, transmittance, refraction_index] =
                    parse_floats::<8>(line, keyword, args)?;
                NffRecord::Fill(Material {
                    color: Color::new(r, g, b),
                    kd,
                    ks,
                    shine,
                    transmittance,
                    refraction_index,
                })
            }
            "s" => {
                let [x, y, z, radius] = parse_floats::<4>(line, keyword, args)?;
                NffRecord::Sphere {
                    center: DVec3::new(x, y, z),
                    radius,
                }
            }
            "p" => {
                let count = parse_vertex_count(line, keyword, args)?;
                let mut vertices = Vec::with_capacity(count);
                for _ in 0..count {
                    let (num, text) = self.next_content_line().ok_or(ParseError::UnexpectedEof)?;
                    let fields: Vec<&str> = text.split_whitespace().collect();
                    vertices.push(parse_vec3(num, "vertex", &fields)?);
                }
                NffRecord::Polygon { vertices }
            }
            "pp" => {
                let count = parse_vertex_count(line, keyword, args)?;
                let mut vertices = Vec::with_capacity(count);
                let mut normals = Vec::with_capacity(count);
                for _ in 0..count {
                    let (num, text) = self.next_content_line().ok_or(ParseError::UnexpectedEof)?;
                    let fields: Vec<&str> = text.split_whitespace().collect();
                    let [x, y, z, nx, ny, nz] = parse_floats::<6>(num, "patch vertex", &fields)?;
                    vertices.push(DVec3::new(x, y, z));
                    normals.push(DVec3::new(nx, ny, nz));
                }
                NffRecord::PolygonPatch { vertices, normals }
            }
            other => {
                log::warn!("Skipping unsupported NFF record {:?} at line {}", other, line);
                return Ok(None);
            }
        };

        Ok(Some(record))
    }
}

fn expect_count(line: usize, keyword: &str, args: &[&str], count: usize) -> ParseResult<()> {
    if args.len() < count {
        return Err(ParseError::Parse {
            line,
            message: format!("`{}` expects {} values, found {}", keyword, count, args.len()),
        });
    }
    Ok(())
}

fn parse_float(line: usize, token: &str) -> ParseResult<f64> {
    token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_int(line: usize, token: &str) -> ParseResult<u32> {
    token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Parse the first `N` arguments as floats. Extra trailing fields are ignored.
fn parse_floats<const N: usize>(line: usize, keyword: &str, args: &[&str]) -> ParseResult<[f64; N]> {
    expect_count(line, keyword, args, N)?;
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(args) {
        *value = parse_float(line, token)?;
    }
    Ok(values)
}

fn parse_vec3(line: usize, keyword: &str, args: &[&str]) -> ParseResult<DVec3> {
    let [x, y, z] = parse_floats::<3>(line, keyword, args)?;
    Ok(DVec3::new(x, y, z))
}

fn parse_vertex_count(line: usize, keyword: &str, args: &[&str]) -> ParseResult<usize> {
    expect_count(line, keyword, args, 1)?;
    args[0].parse::<usize>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: args[0].to_string(),
    })
}

/// Parse NFF content from a string.
pub fn parse_nff(content: &str) -> ParseResult<Vec<NffStatement>> {
    NffParser::new(content).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_block() {
        let nff = r#"
v
from 0 0 5
at 0 0 0
up 0 1 0
angle 45
hither 1
resolution 16 8
"#;
        let statements = parse_nff(nff).unwrap();
        let records: Vec<_> = statements.iter().map(|s| s.record.clone()).collect();

        assert_eq!(
            records,
            vec![
                NffRecord::View,
                NffRecord::From(DVec3::new(0.0, 0.0, 5.0)),
                NffRecord::At(DVec3::ZERO),
                NffRecord::Up(DVec3::Y),
                NffRecord::Angle(45.0),
                NffRecord::Hither(1.0),
                NffRecord::Resolution(16, 8),
            ]
        );
        assert_eq!(statements[0].line, 2);
    }

    #[test]
    fn test_parse_material_and_surfaces() {
        let nff = r#"# a comment
f 1 0.5 0 0.7 0.3 20 0 1.5
s 1 2 3 0.5
p 3
0 0 0
1 0 0

0 1 0
pp 3
0 0 0 0 0 1
1 0 0 0 0 1
0 1 0 0 0 1
"#;
        let statements = parse_nff(nff).unwrap();
        assert_eq!(statements.len(), 4);

        match &statements[0].record {
            NffRecord::Fill(m) => {
                assert_eq!(m.color, Color::new(1.0, 0.5, 0.0));
                assert_eq!(m.kd, 0.7);
                assert_eq!(m.ks, 0.3);
                assert_eq!(m.shine, 20.0);
                assert_eq!(m.refraction_index, 1.5);
            }
            other => panic!("expected fill, got {:?}", other),
        }
        assert_eq!(
            statements[1].record,
            NffRecord::Sphere {
                center: DVec3::new(1.0, 2.0, 3.0),
                radius: 0.5
            }
        );
        match &statements[2].record {
            NffRecord::Polygon { vertices } => assert_eq!(vertices.len(), 3),
            other => panic!("expected polygon, got {:?}", other),
        }
        assert_eq!(statements[2].line, 4);
        match &statements[3].record {
            NffRecord::PolygonPatch { vertices, normals } => {
                assert_eq!(vertices[1], DVec3::X);
                assert_eq!(normals[2], DVec3::Z);
            }
            other => panic!("expected patch, got {:?}", other),
        }
    }

    #[test]
    fn test_light_color_defaults_to_white() {
        let statements = parse_nff("l 1 2 3\nl 0 0 0 0.5 0.5 0.5\n").unwrap();

        assert_eq!(
            statements[0].record,
            NffRecord::Light {
                position: DVec3::new(1.0, 2.0, 3.0),
                color: Color::ONE
            }
        );
        assert_eq!(
            statements[1].record,
            NffRecord::Light {
                position: DVec3::ZERO,
                color: Color::splat(0.5)
            }
        );
    }

    #[test]
    fn test_unknown_records_are_skipped() {
        let statements = parse_nff("c 0 0 0 1\nb 0.1 0.2 0.3\n").unwrap();

        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].record, NffRecord::Background(Color::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_nff("b 0 zero 0"),
            Err(ParseError::InvalidNumber { line: 1, .. })
        ));
        assert!(matches!(
            parse_nff("\ns 0 0 0"),
            Err(ParseError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_nff("p 4\n0 0 0\n1 0 0\n"),
            Err(ParseError::UnexpectedEof)
        ));
        assert!(matches!(
            parse_nff("resolution 16.5 16"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }
}
