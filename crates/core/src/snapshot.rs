//! Header-labelled tabular text codec.
//!
//! One format serves both pipelines: the generator embeds the encoded
//! field in the configuration document, and the analyzer reads solver
//! snapshots written in the same layout. Columns are located by header
//! name, and leading/trailing whitespace around every cell is tolerated.

use std::fs;
use std::path::Path;

use crate::error::{BenchError, BenchResult};
use crate::particle::{Particle, ParticleField, ParticleType};

/// Column header shared by generated fields and solver snapshots
pub const FIELD_HEADER: &str = "Type, x, z, u, w, p, n";

/// Serialize a field into the header-plus-rows blob embedded in the
/// configuration document.
pub fn encode_field(field: &ParticleField) -> String {
    let mut out = String::with_capacity(32 * (field.len() + 1));
    out.push_str(FIELD_HEADER);
    out.push('\n');
    for p in field.iter() {
        out.push_str(&format!(
            "{}, {}, {}, {}, {}, {}, {}\n",
            p.kind.code(),
            p.x,
            p.z,
            p.u,
            p.w,
            p.p,
            p.n
        ));
    }
    out
}

fn locate(header: &[&str], name: &str, origin: &Path) -> BenchResult<usize> {
    header
        .iter()
        .position(|column| *column == name)
        .ok_or_else(|| BenchError::schema(origin, 1, format!("missing column '{name}'")))
}

fn cell<'a>(row: &[&'a str], column: usize, line: usize, origin: &Path) -> BenchResult<&'a str> {
    row.get(column).copied().ok_or_else(|| {
        BenchError::schema(
            origin,
            line,
            format!("row has {} columns, column {} expected", row.len(), column + 1),
        )
    })
}

fn number(raw: &str, line: usize, origin: &Path) -> BenchResult<f64> {
    raw.parse::<f64>()
        .map_err(|_| BenchError::schema(origin, line, format!("malformed number '{raw}'")))
}

/// Parse one particle table. `origin` names the source in errors.
pub fn parse_field(content: &str, origin: &Path) -> BenchResult<Vec<Particle>> {
    let mut lines = content.lines().enumerate();
    let header = lines
        .next()
        .map(|(_, line)| line)
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| BenchError::schema(origin, 1, "header row missing"))?;
    let header: Vec<&str> = header.split(',').map(str::trim).collect();

    let c_type = locate(&header, "Type", origin)?;
    let c_x = locate(&header, "x", origin)?;
    let c_z = locate(&header, "z", origin)?;
    let c_u = locate(&header, "u", origin)?;
    let c_w = locate(&header, "w", origin)?;
    let c_p = locate(&header, "p", origin)?;
    let c_n = locate(&header, "n", origin)?;

    let mut particles = Vec::new();
    for (index, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let row: Vec<&str> = raw.split(',').map(str::trim).collect();

        let code = cell(&row, c_type, line, origin)?;
        let code = code
            .parse::<u8>()
            .ok()
            .and_then(ParticleType::from_code)
            .ok_or_else(|| {
                BenchError::schema(origin, line, format!("unknown particle type code '{code}'"))
            })?;

        particles.push(Particle {
            kind: code,
            x: number(cell(&row, c_x, line, origin)?, line, origin)?,
            z: number(cell(&row, c_z, line, origin)?, line, origin)?,
            u: number(cell(&row, c_u, line, origin)?, line, origin)?,
            w: number(cell(&row, c_w, line, origin)?, line, origin)?,
            p: number(cell(&row, c_p, line, origin)?, line, origin)?,
            n: number(cell(&row, c_n, line, origin)?, line, origin)?,
        });
    }
    Ok(particles)
}

/// Read one standalone snapshot file.
pub fn read_snapshot(path: &Path) -> BenchResult<Vec<Particle>> {
    let content = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    parse_field(&content, path)
}

/// Parse a two-column literature table with a `t,z` header row.
pub fn parse_reference_table(content: &str, origin: &Path) -> BenchResult<Vec<(f64, f64)>> {
    let mut lines = content.lines().enumerate();
    let header = lines
        .next()
        .map(|(_, line)| line)
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| BenchError::schema(origin, 1, "header row missing"))?;
    let header: Vec<&str> = header.split(',').map(str::trim).collect();
    let c_t = locate(&header, "t", origin)?;
    let c_z = locate(&header, "z", origin)?;

    let mut points = Vec::new();
    for (index, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let row: Vec<&str> = raw.split(',').map(str::trim).collect();
        points.push((
            number(cell(&row, c_t, line, origin)?, line, origin)?,
            number(cell(&row, c_z, line, origin)?, line, origin)?,
        ));
    }
    if points.is_empty() {
        return Err(BenchError::schema(origin, 1, "no data rows"));
    }
    Ok(points)
}

/// Read one literature reference table.
pub fn read_reference_table(path: &Path) -> BenchResult<Vec<(f64, f64)>> {
    let content = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    parse_reference_table(&content, path)
}
