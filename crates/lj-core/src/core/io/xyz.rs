use crate::core::io::traits::FrameFile;
use crate::core::models::cell::{CellError, UnitCell};
use crate::core::models::system::{SystemError, SystemSnapshot};
use crate::core::models::types::AtomType;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    /// The comment line of every frame, in file order.
    pub comments: Vec<String>,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Invalid cell on line {line}: {source}")]
    Cell { line: usize, source: CellError },
    #[error("Invalid frame starting on line {line}: {source}")]
    System { line: usize, source: SystemError },
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidAtomCount(String),
    #[error("Frame header is not followed by a comment line")]
    MissingComment,
    #[error("File ended after {found} of {expected} atom lines")]
    UnexpectedEof { expected: usize, found: usize },
    #[error("Atom line needs a type and three coordinates")]
    MissingColumns,
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("Unknown atom type '{0}'")]
    UnknownType(String),
    #[error("Lattice needs nine numbers, got '{0}'")]
    InvalidLattice(String),
    #[error("pbc needs three booleans, got '{0}'")]
    InvalidPbc(String),
}

struct LineCursor<I> {
    lines: I,
    line: usize,
}

impl<I: Iterator<Item = io::Result<String>>> LineCursor<I> {
    fn next(&mut self) -> io::Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line += 1;
                line.map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_non_blank(&mut self) -> io::Result<Option<String>> {
        while let Some(line) = self.next()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

/// Plain and extended XYZ files.
///
/// Each frame is an atom count, a comment line and one `type x y z` line per
/// atom, where `type` is an element symbol or an integer atom type and extra
/// columns are ignored. A comment carrying `Lattice="ax ay az bx by bz cx cy cz"`
/// attaches a periodic cell, with per-axis periodicity taken from
/// `pbc="T T T"` (default: fully periodic).
pub struct XyzFile;

impl FrameFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(Vec<SystemSnapshot>, Self::Metadata), Self::Error> {
        let mut cursor = LineCursor {
            lines: reader.lines(),
            line: 0,
        };
        let mut frames = Vec::new();
        let mut metadata = XyzMetadata::default();

        while let Some(count_line) = cursor.next_non_blank()? {
            let frame_start = cursor.line;
            let n_atoms: usize = count_line.trim().parse().map_err(|_| XyzError::Parse {
                line: frame_start,
                kind: XyzParseErrorKind::InvalidAtomCount(count_line.trim().to_string()),
            })?;

            let comment = cursor.next()?.ok_or(XyzError::Parse {
                line: frame_start + 1,
                kind: XyzParseErrorKind::MissingComment,
            })?;
            let cell = parse_cell(&parse_comment_properties(&comment)).map_err(|e| match e {
                CellParseError::Kind(kind) => XyzError::Parse {
                    line: cursor.line,
                    kind,
                },
                CellParseError::Cell(source) => XyzError::Cell {
                    line: cursor.line,
                    source,
                },
            })?;

            // the header count is untrusted; grow as lines actually arrive
            let mut positions = Vec::new();
            let mut types = Vec::new();
            for found in 0..n_atoms {
                let line = cursor.next()?.ok_or(XyzError::Parse {
                    line: cursor.line + 1,
                    kind: XyzParseErrorKind::UnexpectedEof {
                        expected: n_atoms,
                        found,
                    },
                })?;
                let (atom_type, position) =
                    parse_atom_line(&line).map_err(|kind| XyzError::Parse {
                        line: cursor.line,
                        kind,
                    })?;
                types.push(atom_type);
                positions.push(position);
            }

            let mut system = SystemSnapshot::new(positions, types).map_err(|source| {
                XyzError::System {
                    line: frame_start,
                    source,
                }
            })?;
            if let Some(cell) = cell {
                system = system.with_cell(cell);
            }
            frames.push(system);
            metadata.comments.push(comment);
        }

        Ok((frames, metadata))
    }
}

fn parse_atom_line(line: &str) -> Result<(AtomType, Point3<f64>), XyzParseErrorKind> {
    let mut fields = line.split_whitespace();
    let type_str = fields.next().ok_or(XyzParseErrorKind::MissingColumns)?;
    let atom_type: AtomType = type_str
        .parse()
        .map_err(|_| XyzParseErrorKind::UnknownType(type_str.to_string()))?;

    let mut coords = [0.0; 3];
    for coord in &mut coords {
        let value = fields.next().ok_or(XyzParseErrorKind::MissingColumns)?;
        *coord = value
            .parse()
            .map_err(|_| XyzParseErrorKind::InvalidCoordinate(value.to_string()))?;
    }
    Ok((atom_type, Point3::new(coords[0], coords[1], coords[2])))
}

enum CellParseError {
    Kind(XyzParseErrorKind),
    Cell(CellError),
}

fn parse_cell(properties: &HashMap<String, String>) -> Result<Option<UnitCell>, CellParseError> {
    let Some(lattice) = properties.get("lattice") else {
        return Ok(None);
    };
    let values: Vec<f64> = lattice
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| CellParseError::Kind(XyzParseErrorKind::InvalidLattice(lattice.clone())))?;
    if values.len() != 9 {
        return Err(CellParseError::Kind(XyzParseErrorKind::InvalidLattice(
            lattice.clone(),
        )));
    }

    let periodic = match properties.get("pbc") {
        Some(pbc) => parse_pbc(pbc).map_err(CellParseError::Kind)?,
        None => [true; 3],
    };
    if periodic.iter().all(|p| !p) {
        return Ok(None);
    }

    let cell = UnitCell::new(
        Vector3::new(values[0], values[1], values[2]),
        Vector3::new(values[3], values[4], values[5]),
        Vector3::new(values[6], values[7], values[8]),
    )
    .map_err(CellParseError::Cell)?;
    Ok(Some(cell.with_periodicity(periodic)))
}

fn parse_pbc(value: &str) -> Result<[bool; 3], XyzParseErrorKind> {
    let flags: Vec<bool> = value
        .split_whitespace()
        .map(|flag| match flag.to_ascii_lowercase().as_str() {
            "t" | "true" | "1" => Ok(true),
            "f" | "false" | "0" => Ok(false),
            _ => Err(()),
        })
        .collect::<Result<_, _>>()
        .map_err(|_| XyzParseErrorKind::InvalidPbc(value.to_string()))?;
    <[bool; 3]>::try_from(flags).map_err(|_| XyzParseErrorKind::InvalidPbc(value.to_string()))
}

/// Splits an extended XYZ comment into lowercase `key=value` properties.
///
/// Values may be double-quoted to contain spaces; bare keys map to an empty value.
fn parse_comment_properties(comment: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    let mut chars = comment.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            key.push(c);
        }
        let value = if chars.next_if_eq(&'=').is_some() {
            read_property_value(&mut chars)
        } else {
            String::new()
        };
        if !key.is_empty() {
            properties.insert(key.to_ascii_lowercase(), value);
        }
    }
    properties
}

fn read_property_value(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    if chars.next_if_eq(&'"').is_some() {
        for c in chars.by_ref() {
            if c == '"' {
                break;
            }
            value.push(c);
        }
    } else {
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            value.push(c);
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TOLERANCE: f64 = 1e-9;

    fn read(content: &str) -> Result<(Vec<SystemSnapshot>, XyzMetadata), XyzError> {
        XyzFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_single_plain_frame() {
        let (frames, metadata) =
            read("3\nwater\nO 0.0 0.0 0.0\nH 0.757 0.586 0.0\nH -0.757 0.586 0.0\n").unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(metadata.comments, vec!["water".to_string()]);

        let water = &frames[0];
        assert_eq!(water.types(), &[AtomType(8), AtomType(1), AtomType(1)]);
        assert!((water.positions()[1].x - 0.757).abs() < TOLERANCE);
        assert!(water.cell().is_none());
    }

    #[test]
    fn reads_multiple_frames_with_blank_separators() {
        let content = "1\nfirst\nAr 0 0 0\n\n2\nsecond\n18 0 0 0\n18 3.8 0 0 extra columns\n\n";
        let (frames, metadata) = read(content).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].len(), 1);
        assert_eq!(frames[1].len(), 2);
        assert_eq!(frames[1].types(), &[AtomType(18), AtomType(18)]);
        assert_eq!(metadata.comments[1], "second");
    }

    #[test]
    fn reads_lattice_and_pbc_from_extended_comment() {
        let content = "1\nLattice=\"10.0 0.0 0.0 0.0 12.0 0.0 0.0 0.0 14.0\" Properties=species:S:1:pos:R:3 pbc=\"T T F\"\nC 1.0 2.0 3.0\n";
        let (frames, _) = read(content).unwrap();
        let cell = frames[0].cell().unwrap();
        assert!((cell.volume() - 1680.0).abs() < TOLERANCE);
        assert_eq!(cell.periodicity(), [true, true, false]);
        assert_eq!(cell.lattice_vector(1), Vector3::new(0.0, 12.0, 0.0));
    }

    #[test]
    fn lattice_without_pbc_is_fully_periodic() {
        let content = "1\nlattice=\"5 0 0 0 5 0 0 0 5\"\nC 0 0 0\n";
        let (frames, _) = read(content).unwrap();
        assert_eq!(frames[0].cell().unwrap().periodicity(), [true; 3]);
    }

    #[test]
    fn non_periodic_pbc_drops_the_cell() {
        let content = "1\nLattice=\"5 0 0 0 5 0 0 0 5\" pbc=\"F F F\"\nC 0 0 0\n";
        let (frames, _) = read(content).unwrap();
        assert!(frames[0].cell().is_none());
    }

    #[test]
    fn invalid_atom_count_is_reported_with_line() {
        let result = read("two\ncomment\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidAtomCount(_)
            })
        ));
    }

    #[test]
    fn truncated_frame_is_reported() {
        let result = read("3\ncomment\nH 0 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 4,
                kind: XyzParseErrorKind::UnexpectedEof {
                    expected: 3,
                    found: 1
                }
            })
        ));
    }

    #[test]
    fn huge_atom_count_is_truncation_not_allocation() {
        let result = read("18446744073709551615\ncomment\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::UnexpectedEof {
                    expected: usize::MAX,
                    found: 0
                }
            })
        ));
    }

    #[test]
    fn missing_comment_is_reported() {
        let result = read("1");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 2,
                kind: XyzParseErrorKind::MissingComment
            })
        ));
    }

    #[test]
    fn unknown_element_is_reported() {
        let result = read("1\ncomment\nXq 0 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::UnknownType(_)
            })
        ));
    }

    #[test]
    fn missing_coordinates_are_reported() {
        let result = read("1\ncomment\nH 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                kind: XyzParseErrorKind::MissingColumns,
                ..
            })
        ));
    }

    #[test]
    fn malformed_lattice_is_reported() {
        let result = read("1\nLattice=\"5 0 0 0 5 0\"\nC 0 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 2,
                kind: XyzParseErrorKind::InvalidLattice(_)
            })
        ));
    }

    #[test]
    fn degenerate_lattice_is_reported() {
        let result = read("1\nLattice=\"5 0 0 0 5 0 5 5 0\"\nC 0 0 0\n");
        assert!(matches!(
            result,
            Err(XyzError::Cell {
                line: 2,
                source: CellError::Degenerate { .. }
            })
        ));
    }

    #[test]
    fn comment_properties_handle_quotes_and_bare_keys() {
        let properties = parse_comment_properties("  energy=-1.5 Lattice=\"1 2 3\" flag  ");
        assert_eq!(properties.get("energy").map(String::as_str), Some("-1.5"));
        assert_eq!(properties.get("lattice").map(String::as_str), Some("1 2 3"));
        assert_eq!(properties.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frames.xyz");
        fs::write(&path, "2\n\nNe 0 0 0\nNe 3.1 0 0\n").unwrap();
        let (frames, metadata) = XyzFile::read_from_path(&path).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(metadata.comments, vec![String::new()]);
        assert_eq!(frames[0].types(), &[AtomType(10), AtomType(10)]);
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = XyzFile::read_from_path(dir.path().join("missing.xyz"));
        assert!(matches!(result, Err(XyzError::Io(_))));
    }
}
