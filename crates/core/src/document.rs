//! Configuration document assembly.
//!
//! One tab-indented XML file with three sections: `condition` (solver run
//! controls), `environment` (physical constants plus the bounding box
//! appended after generation) and `particles` (the csv-tagged field blob).
//! Pure structural assembly, no value transformation. The file is written
//! to a temp sibling and renamed, so a failed write never leaves a partial
//! document behind as authoritative.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{BenchError, BenchResult};
use crate::params::{Environment, SolverConditions};
use crate::particle::{Particle, ParticleField};
use crate::snapshot;

/// Serialize the full configuration document to `path`.
pub fn write_document(
    path: &Path,
    condition: &SolverConditions,
    environment: &Environment,
    field: &ParticleField,
) -> BenchResult<()> {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    let staged = PathBuf::from(staged);

    let file = File::create(&staged).map_err(|e| BenchError::io(&staged, e))?;
    let mut writer = BufWriter::new(file);
    write_into(&mut writer, condition, environment, field)
        .map_err(|e| BenchError::io(&staged, e))?;

    fs::rename(&staged, path).map_err(|e| BenchError::io(path, e))?;
    info!(path = %path.display(), particles = field.len(), "wrote configuration document");
    Ok(())
}

fn write_into<W: Write>(
    writer: &mut W,
    condition: &SolverConditions,
    environment: &Environment,
    field: &ParticleField,
) -> io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" ?>"#)?;
    writeln!(writer, "<openmps>")?;

    writeln!(writer, "\t<condition>")?;
    for (key, value) in condition.entries() {
        writeln!(writer, "\t\t<{key} value=\"{value}\"/>")?;
    }
    writeln!(writer, "\t</condition>")?;

    writeln!(writer, "\t<environment>")?;
    for (key, value) in environment.entries() {
        writeln!(writer, "\t\t<{key} value=\"{value}\"/>")?;
    }
    // Domain extent, appended after the particle pass
    let bounds = field.bounds();
    writeln!(writer, "\t\t<minX value=\"{}\"/>", bounds.min_x)?;
    writeln!(writer, "\t\t<minZ value=\"{}\"/>", bounds.min_z)?;
    writeln!(writer, "\t\t<maxX value=\"{}\"/>", bounds.max_x)?;
    writeln!(writer, "\t\t<maxZ value=\"{}\"/>", bounds.max_z)?;
    writeln!(writer, "\t</environment>")?;

    write!(
        writer,
        "\t<particles type=\"csv\">{}",
        snapshot::encode_field(field)
    )?;
    writeln!(writer, "</particles>")?;

    writeln!(writer, "</openmps>")?;
    writer.flush()
}

/// A re-parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub condition: Vec<(String, f64)>,
    pub environment: Vec<(String, f64)>,
    pub particles: Vec<Particle>,
}

impl Document {
    fn lookup(entries: &[(String, f64)], key: &str) -> Option<f64> {
        entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| *value)
    }

    /// Environment value by key, bounding-box entries included
    pub fn environment_value(&self, key: &str) -> Option<f64> {
        Self::lookup(&self.environment, key)
    }

    pub fn condition_value(&self, key: &str) -> Option<f64> {
        Self::lookup(&self.condition, key)
    }
}

/// Read back a configuration document written by [`write_document`].
pub fn read_document(path: &Path) -> BenchResult<Document> {
    let content = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    parse_document(&content, path)
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Condition,
    Environment,
}

fn parse_document(content: &str, origin: &Path) -> BenchResult<Document> {
    let mut condition = Vec::new();
    let mut environment = Vec::new();
    let mut blob: Option<String> = None;
    let mut section = Section::None;

    let mut lines = content.lines().enumerate();
    while let Some((index, raw)) = lines.next() {
        let line = raw.trim();
        match line {
            "<condition>" => section = Section::Condition,
            "<environment>" => section = Section::Environment,
            "</condition>" | "</environment>" => section = Section::None,
            _ if line.starts_with("<particles") => {
                if !line.contains("type=\"csv\"") {
                    return Err(BenchError::schema(
                        origin,
                        index + 1,
                        "particles section is not csv-encoded",
                    ));
                }
                blob = Some(particles_text(line, &mut lines));
            }
            _ if section != Section::None && line.starts_with('<') => {
                if let Some((key, value)) = parse_entry(line, index + 1, origin)? {
                    match section {
                        Section::Condition => condition.push((key, value)),
                        Section::Environment => environment.push((key, value)),
                        Section::None => unreachable!(),
                    }
                }
            }
            _ => {}
        }
    }

    let blob = blob.ok_or_else(|| BenchError::schema(origin, 1, "particles section missing"))?;
    let particles = snapshot::parse_field(&blob, origin)?;
    Ok(Document {
        condition,
        environment,
        particles,
    })
}

/// Collect the body text of the particles element, which starts on the
/// opening-tag line and runs until the closing tag.
fn particles_text<'a>(
    opening: &'a str,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> String {
    let mut text = String::new();
    if let Some(start) = opening.find('>') {
        text.push_str(&opening[start + 1..]);
        text.push('\n');
    }
    for (_, raw) in lines {
        if let Some(end) = raw.find("</particles>") {
            text.push_str(&raw[..end]);
            break;
        }
        text.push_str(raw);
        text.push('\n');
    }
    text
}

/// Parse `<key value="number"/>`. Lines without a `value` attribute are
/// skipped.
fn parse_entry(line: &str, number: usize, origin: &Path) -> BenchResult<Option<(String, f64)>> {
    let Some(rest) = line.strip_prefix('<') else {
        return Ok(None);
    };
    let key: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '>' && *c != '/')
        .collect();
    let Some(value_start) = line.find("value=\"") else {
        return Ok(None);
    };
    let value = &line[value_start + 7..];
    let Some(value_end) = value.find('"') else {
        return Err(BenchError::schema(
            origin,
            number,
            "unterminated value attribute",
        ));
    };
    let raw = &value[..value_end];
    let value = raw.parse::<f64>().map_err(|_| {
        BenchError::schema(origin, number, format!("malformed value '{raw}' for '{key}'"))
    })?;
    Ok(Some((key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_field, FieldParams};
    use std::path::PathBuf;

    fn render(field: &ParticleField) -> String {
        let mut out = Vec::new();
        write_into(
            &mut out,
            &SolverConditions::default(),
            &Environment::default(),
            field,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let field = generate_field(&FieldParams::new(2, 2, 1.0)).unwrap();
        let text = render(&field);
        assert!(text.starts_with("<?xml version=\"1.0\" ?>\n<openmps>\n"));
        assert!(text.contains("\t<condition>\n\t\t<startTime value=\"0\"/>"));
        assert!(text.contains("\t\t<eps value=\"0.0000000001\"/>"));
        assert!(text.contains("\t<particles type=\"csv\">Type, x, z, u, w, p, n\n"));
        assert!(text.ends_with("</particles>\n</openmps>\n"));
    }

    #[test]
    fn test_bounding_box_follows_environment_entries() {
        let field = generate_field(&FieldParams::new(2, 2, 1.0)).unwrap();
        let text = render(&field);
        let surface = text.find("surfaceRatio").unwrap();
        let min_x = text.find("<minX").unwrap();
        assert!(surface < min_x);
        assert!(text.contains("<minX value=\"-4\"/>"));
        assert!(text.contains("<maxX value=\"5\"/>"));
    }

    #[test]
    fn test_parse_recovers_sections() {
        let field = generate_field(&FieldParams::new(3, 2, 0.5)).unwrap();
        let text = render(&field);
        let doc = parse_document(&text, &PathBuf::from("test.xml")).unwrap();

        assert_eq!(doc.particles.len(), field.len());
        assert_eq!(doc.condition.len(), 4);
        // environment entries plus the four bounds
        assert_eq!(doc.environment.len(), 12);
        assert_eq!(doc.condition_value("endTime"), Some(0.5));
        assert_eq!(doc.environment_value("minX"), Some(field.bounds().min_x));
        assert_eq!(doc.environment_value("maxZ"), Some(field.bounds().max_z));
    }

    #[test]
    fn test_non_csv_particles_rejected() {
        let text = "<openmps>\n\t<particles type=\"binary\">x</particles>\n</openmps>\n";
        assert!(matches!(
            parse_document(text, &PathBuf::from("test.xml")),
            Err(BenchError::Schema { .. })
        ));
    }
}
