//! Legacy ASCII VTK reader, restricted to what an edge graph needs:
//! POLYDATA with POINTS plus topology sections, or UNSTRUCTURED_GRID with
//! CELLS and CELL_TYPES. Binary files and the XML formats are rejected.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;

use crate::mesh::{Cell, CellKind, PolyMesh};

/// VTK cell type codes used by the legacy format.
const VTK_VERTEX: u32 = 1;
const VTK_LINE: u32 = 3;
const VTK_POLY_LINE: u32 = 4;
const VTK_TRIANGLE_STRIP: u32 = 6;
const VTK_POLYGON: u32 = 7;

pub fn load_vtk_file(path: &Path) -> Result<PolyMesh> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_vtk(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse the legacy ASCII format from memory.
pub fn parse_vtk(text: &str) -> Result<PolyMesh> {
    let mut lines = text.lines();

    let header = lines.next().context("empty file")?;
    if !header.starts_with("# vtk DataFile") {
        bail!("not a legacy VTK file (header: {:?})", header);
    }
    let _title = lines.next().context("missing title line")?;
    let format = lines.next().context("missing format line")?.trim();
    if !format.eq_ignore_ascii_case("ASCII") {
        bail!("only ASCII files are supported (found {:?})", format);
    }
    let dataset_line = lines.next().context("missing DATASET line")?.trim();
    let dataset = dataset_line
        .strip_prefix("DATASET")
        .with_context(|| format!("expected DATASET, found {:?}", dataset_line))?
        .trim();
    if dataset != "POLYDATA" && dataset != "UNSTRUCTURED_GRID" {
        bail!("unsupported dataset type {:?}", dataset);
    }

    // Everything after the four header lines is whitespace-delimited.
    let body: Vec<&str> = lines.flat_map(|line| line.split_whitespace()).collect();
    let mut tokens = Tokens::new(body);
    let mut points: Vec<Vec3> = Vec::new();
    let mut cells: Vec<Cell> = Vec::new();
    let mut cell_records: Vec<Vec<u32>> = Vec::new();

    while let Some(keyword) = tokens.next() {
        match keyword {
            "POINTS" => {
                let count: usize = tokens.parse("point count")?;
                let _dtype = tokens.next().context("missing POINTS data type")?;
                points.reserve(count);
                for _ in 0..count {
                    let x: f32 = tokens.parse("point coordinate")?;
                    let y: f32 = tokens.parse("point coordinate")?;
                    let z: f32 = tokens.parse("point coordinate")?;
                    points.push(Vec3::new(x, y, z));
                }
            }
            "VERTICES" | "LINES" | "POLYGONS" | "TRIANGLE_STRIPS" => {
                let count: usize = tokens.parse("cell count")?;
                let _total: usize = tokens.parse("cell value count")?;
                for _ in 0..count {
                    let ids = tokens.read_record()?;
                    cells.push(Cell {
                        kind: polydata_kind(keyword, ids.len()),
                        point_ids: ids,
                    });
                }
            }
            "CELLS" => {
                let count: usize = tokens.parse("cell count")?;
                let _total: usize = tokens.parse("cell value count")?;
                for _ in 0..count {
                    cell_records.push(tokens.read_record()?);
                }
            }
            "CELL_TYPES" => {
                let count: usize = tokens.parse("cell type count")?;
                if count != cell_records.len() {
                    bail!(
                        "CELL_TYPES lists {} entries but CELLS held {}",
                        count,
                        cell_records.len()
                    );
                }
                for record in cell_records.drain(..) {
                    let code: u32 = tokens.parse("cell type code")?;
                    cells.push(Cell {
                        kind: unstructured_kind(code),
                        point_ids: record,
                    });
                }
            }
            // Attribute data trails the geometry; nothing there is needed.
            "POINT_DATA" | "CELL_DATA" => break,
            other => bail!("unsupported section {:?}", other),
        }
    }

    if !cell_records.is_empty() {
        bail!("CELLS section without a matching CELL_TYPES section");
    }

    log::info!(
        "VTK mesh: {} points, {} cells",
        points.len(),
        cells.len()
    );
    Ok(PolyMesh::new(points, cells))
}

fn polydata_kind(section: &str, arity: usize) -> CellKind {
    match section {
        "VERTICES" => CellKind::Vertex,
        // A two-point record is a line; longer records are polylines.
        "LINES" if arity == 2 => CellKind::Line,
        "LINES" => CellKind::PolyLine,
        "POLYGONS" => CellKind::Polygon,
        "TRIANGLE_STRIPS" => CellKind::TriangleStrip,
        _ => CellKind::Other,
    }
}

fn unstructured_kind(code: u32) -> CellKind {
    match code {
        VTK_VERTEX => CellKind::Vertex,
        VTK_LINE => CellKind::Line,
        VTK_POLY_LINE => CellKind::PolyLine,
        VTK_TRIANGLE_STRIP => CellKind::TriangleStrip,
        VTK_POLYGON => CellKind::Polygon,
        _ => CellKind::Other,
    }
}

/// Whitespace token cursor over the body of the file.
struct Tokens<'a> {
    inner: std::vec::IntoIter<&'a str>,
}

impl<'a> Tokens<'a> {
    fn new(tokens: Vec<&'a str>) -> Self {
        Self {
            inner: tokens.into_iter(),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    fn parse<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self
            .next()
            .with_context(|| format!("unexpected end of file while reading {}", what))?;
        token
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {} {:?}", what, token))
    }

    /// One connectivity record: a count followed by that many point ids.
    fn read_record(&mut self) -> Result<Vec<u32>> {
        let arity: usize = self.parse("cell point count")?;
        let mut ids = Vec::with_capacity(arity);
        for _ in 0..arity {
            ids.push(self.parse("cell point index")?);
        }
        Ok(ids)
    }
}
