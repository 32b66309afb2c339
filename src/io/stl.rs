//! STL output for generated meshes.
//!
//! # ASCII
//!
//! ```text
//! solid name
//!   facet normal nx ny nz
//!     outer loop
//!       vertex x y z
//!       vertex x y z
//!       vertex x y z
//!     endloop
//!   endfacet
//! endsolid name
//! ```
//!
//! Numbers are written with the shortest representation that parses back to
//! the same `f64`, so [`read_ascii`] recovers a mesh written at scale 1
//! exactly.
//!
//! # Binary
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! Both writers use the normal stored on each triangle and never recompute it.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{StlError, StlResult};
use crate::math::{Point3, Vector3};
use crate::mesh::{Mesh, Triangle};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlFormat {
    #[default]
    Ascii,
    Binary,
}

/// Options applied when writing.
#[derive(Debug, Clone, PartialEq)]
pub struct StlOptions {
    /// Factor applied to every vertex coordinate. Normals are left alone.
    pub scale: f64,
    /// Name written after `solid` and `endsolid`.
    pub solid_name: String,
}

impl StlOptions {
    /// Rejects a scale that would collapse or mirror the mesh.
    ///
    /// # Errors
    ///
    /// Returns [`StlError::InvalidScale`] if the scale is not a finite,
    /// positive number.
    pub fn validate(&self) -> StlResult<()> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(())
        } else {
            Err(StlError::InvalidScale(self.scale))
        }
    }
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            solid_name: "output".to_owned(),
        }
    }
}

/// Writes `mesh` as ASCII STL.
///
/// # Errors
///
/// Returns [`StlError::InvalidScale`] for a bad scale, or [`StlError::Io`]
/// if the writer fails.
pub fn write_ascii<W: Write>(mesh: &Mesh, options: &StlOptions, mut writer: W) -> StlResult<()> {
    options.validate()?;
    writeln!(writer, "solid {}", options.solid_name)?;
    for triangle in mesh {
        let n = triangle.normal();
        writeln!(writer, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in triangle.vertices() {
            let s = options.scale;
            writeln!(writer, "      vertex {} {} {}", v.x * s, v.y * s, v.z * s)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", options.solid_name)?;
    Ok(())
}

/// Writes `mesh` as binary STL.
///
/// The solid name is placed at the start of the header, truncated to fit.
///
/// # Errors
///
/// Returns [`StlError::InvalidScale`] for a bad scale,
/// [`StlError::TooManyTriangles`] if the count does not fit in a `u32`, or
/// [`StlError::Io`] if the writer fails.
pub fn write_binary<W: Write>(mesh: &Mesh, options: &StlOptions, mut writer: W) -> StlResult<()> {
    options.validate()?;
    let count = u32::try_from(mesh.len()).map_err(|_| StlError::TooManyTriangles(mesh.len()))?;

    let mut header = [b' '; HEADER_SIZE];
    let name = options.solid_name.as_bytes();
    let len = name.len().min(HEADER_SIZE);
    header[..len].copy_from_slice(&name[..len]);
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    for triangle in mesh {
        write_f32_triple(&mut writer, &triangle.normal().into(), 1.0)?;
        for v in triangle.vertices() {
            write_f32_triple(&mut writer, &v.coords.into(), options.scale)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn write_f32_triple<W: Write>(writer: &mut W, values: &[f64; 3], scale: f64) -> StlResult<()> {
    for value in values {
        writer.write_all(&((value * scale) as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Parses ASCII STL into a mesh, keeping each facet's normal.
///
/// Blank lines and unknown keywords are skipped. Reading stops at `endsolid`;
/// a missing `endsolid` is tolerated, but a facet left open is not.
///
/// # Errors
///
/// Returns [`StlError::Parse`] for malformed numbers, misplaced keywords or a
/// facet without exactly three vertices, and [`StlError::Io`] if reading
/// fails.
pub fn read_ascii<R: BufRead>(reader: R) -> StlResult<Mesh> {
    let mut mesh = Mesh::new();
    let mut normal: Option<Vector3> = None;
    let mut in_loop = false;
    let mut vertices: Vec<Point3> = Vec::with_capacity(3);
    let mut number = 0;

    for line in reader.lines() {
        let line = line?;
        number += 1;
        let parse_error = |message: &str| StlError::Parse {
            line: number,
            message: message.to_owned(),
        };

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let rest: Vec<&str> = parts.collect();

        match keyword {
            "facet" => {
                if normal.is_some() {
                    return Err(parse_error("facet opened inside another facet"));
                }
                match rest.split_first() {
                    Some((&"normal", values)) => {
                        normal = Some(Vector3::from(parse_triple(values, number)?));
                    }
                    _ => return Err(parse_error("expected `facet normal nx ny nz`")),
                }
            }
            "outer" => {
                if normal.is_none() || in_loop {
                    return Err(parse_error("`outer loop` outside a facet"));
                }
                in_loop = true;
                vertices.clear();
            }
            "vertex" => {
                if !in_loop {
                    return Err(parse_error("vertex outside `outer loop`"));
                }
                vertices.push(Point3::from(parse_triple(&rest, number)?));
            }
            "endloop" => {
                if !in_loop {
                    return Err(parse_error("`endloop` without `outer loop`"));
                }
                in_loop = false;
            }
            "endfacet" => {
                let Some(n) = normal.take() else {
                    return Err(parse_error("`endfacet` without `facet`"));
                };
                if in_loop {
                    return Err(parse_error("`endfacet` inside `outer loop`"));
                }
                let [a, b, c] = &vertices[..] else {
                    return Err(parse_error(&format!(
                        "facet has {} vertices, expected 3",
                        vertices.len()
                    )));
                };
                mesh.push(Triangle::new(*a, *b, *c, n));
            }
            "endsolid" => {
                if normal.is_some() {
                    return Err(parse_error("`endsolid` inside an open facet"));
                }
                break;
            }
            _ => {}
        }
    }

    if normal.is_some() {
        return Err(StlError::Parse {
            line: number,
            message: "input ends inside an open facet".to_owned(),
        });
    }
    Ok(mesh)
}

/// Parses exactly three floats.
fn parse_triple(values: &[&str], line: usize) -> StlResult<[f64; 3]> {
    let [x, y, z] = values else {
        return Err(StlError::Parse {
            line,
            message: format!("expected 3 numbers, found {}", values.len()),
        });
    };
    let mut out = [0.0; 3];
    for (slot, text) in out.iter_mut().zip([x, y, z]) {
        *slot = text.parse().map_err(|_| StlError::Parse {
            line,
            message: format!("invalid number `{text}`"),
        })?;
    }
    Ok(out)
}

/// Writes `mesh` to a file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an [`StlError`] if the file cannot be created or written.
pub fn save<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    options: &StlOptions,
    format: StlFormat,
) -> StlResult<()> {
    options.validate()?;
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        StlFormat::Ascii => write_ascii(mesh, options, &mut writer)?,
        StlFormat::Binary => write_binary(mesh, options, &mut writer)?,
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        ?format,
        triangles = mesh.len(),
        "wrote STL"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::config::ShelfConfig;
    use crate::operations::panel::BuildSidePanel;

    fn sample() -> Mesh {
        BuildSidePanel::new(&ShelfConfig::default(), 3.3, 2, 1)
            .execute()
            .unwrap()
    }

    fn ascii(mesh: &Mesh, options: &StlOptions) -> String {
        let mut buf = Vec::new();
        write_ascii(mesh, options, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn parse_err(text: &str) -> (usize, String) {
        match read_ascii(text.as_bytes()) {
            Err(StlError::Parse { line, message }) => (line, message),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    // ── ASCII ──────────────────────────────────────────────────

    #[test]
    fn ascii_round_trip_is_exact() {
        let mesh = sample();
        let text = ascii(&mesh, &StlOptions::default());
        let parsed = read_ascii(text.as_bytes()).unwrap();
        assert_eq!(parsed, mesh);
    }

    #[test]
    fn ascii_envelope_and_facet_layout() {
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.5, 0.0),
            Vector3::z(),
        ));
        let options = StlOptions {
            solid_name: "shelf".to_owned(),
            ..StlOptions::default()
        };
        let text = ascii(&mesh, &options);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "solid shelf");
        assert_eq!(lines[1], "  facet normal 0 0 1");
        assert_eq!(lines[2], "    outer loop");
        assert_eq!(lines[5], "      vertex 0 1.5 0");
        assert_eq!(lines[7], "  endfacet");
        assert_eq!(lines[8], "endsolid shelf");
    }

    #[test]
    fn scale_applies_to_vertices_only() {
        let mesh = sample();
        let options = StlOptions {
            scale: 0.01,
            ..StlOptions::default()
        };
        let parsed = read_ascii(ascii(&mesh, &options).as_bytes()).unwrap();
        for (got, original) in parsed.iter().zip(&mesh) {
            assert_eq!(got.normal(), original.normal());
            for (v, w) in got.vertices().iter().zip(original.vertices()) {
                assert_eq!(v.x, w.x * 0.01);
            }
        }
    }

    #[test]
    fn empty_mesh_is_just_the_envelope() {
        assert_eq!(ascii(&Mesh::new(), &StlOptions::default()), "solid output\nendsolid output\n");
    }

    #[test]
    fn bad_number_reports_line() {
        let text = "solid x\n  facet normal 0 0 1\n    outer loop\n      vertex 0 zero 0\n";
        let (line, message) = parse_err(text);
        assert_eq!(line, 4);
        assert!(message.contains("zero"));
    }

    #[test]
    fn facet_with_two_vertices_is_rejected() {
        let text = "solid x\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid x\n";
        let (line, message) = parse_err(text);
        assert_eq!(line, 7);
        assert!(message.contains("2 vertices"));
    }

    #[test]
    fn input_cut_off_mid_facet_is_rejected() {
        let text = "solid x\n facet normal 0 0 1\n outer loop\n vertex 0 0 0\n vertex 1 0 0\n";
        let (line, message) = parse_err(text);
        assert_eq!(line, 5);
        assert!(message.contains("open facet"));
    }

    #[test]
    fn endsolid_inside_facet_is_rejected() {
        let text = "solid x\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nendsolid x\n";
        let (line, _) = parse_err(text);
        assert_eq!(line, 5);
    }

    #[test]
    fn truncated_output_does_not_parse_as_shorter_mesh() {
        let text = ascii(&sample(), &StlOptions::default());
        let cut = &text[..text[..text.len() / 2].rfind("endloop").unwrap()];
        assert!(matches!(read_ascii(cut.as_bytes()), Err(StlError::Parse { .. })));
    }

    #[test]
    fn vertex_outside_loop_is_rejected() {
        let (line, _) = parse_err("solid x\nvertex 0 0 0\n");
        assert_eq!(line, 2);
    }

    #[test]
    fn bad_scales_are_rejected_before_writing() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let options = StlOptions {
                scale,
                ..StlOptions::default()
            };
            let mut buf = Vec::new();
            assert!(matches!(
                write_ascii(&sample(), &options, &mut buf),
                Err(StlError::InvalidScale(_))
            ));
            assert!(matches!(
                write_binary(&sample(), &options, &mut buf),
                Err(StlError::InvalidScale(_))
            ));
            assert!(buf.is_empty());
        }
    }

    // ── Binary ─────────────────────────────────────────────────

    #[test]
    fn binary_layout() {
        let mesh = sample();
        let mut buf = Vec::new();
        write_binary(&mesh, &StlOptions::default(), &mut buf).unwrap();

        assert_eq!(buf.len(), HEADER_SIZE + 4 + 50 * mesh.len());
        assert!(buf.starts_with(b"output "));
        let count = u32::from_le_bytes([buf[80], buf[81], buf[82], buf[83]]);
        assert_eq!(count as usize, mesh.len());

        let first = &mesh.triangles()[0];
        let f = |at: usize| f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        assert_eq!(f64::from(f(84)), first.normal().x);
        assert_eq!(f(96), first.vertices()[0].x as f32);
        assert_eq!(&buf[84 + 48..84 + 50], &[0, 0]);
    }

    #[test]
    fn save_writes_file() {
        let path = std::env::temp_dir().join(format!("rackshelf-save-{}.stl", std::process::id()));
        let mesh = sample();
        save(&mesh, &path, &StlOptions::default(), StlFormat::Ascii).unwrap();
        let file = std::io::BufReader::new(File::open(&path).unwrap());
        assert_eq!(read_ascii(file).unwrap(), mesh);
        std::fs::remove_file(&path).unwrap();
    }
}
