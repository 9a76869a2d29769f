//! End-to-end checks of the field generator and the configuration
//! document: layer counts, bounds, and the write/read round trip.

use std::fs;
use std::path::PathBuf;

use mps_bench_core::{
    generate_field, read_document, write_document, BoundingBox, Environment, FieldParams,
    ParticleType, SolverConditions,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mps_bench_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_generated_field_counts_and_invariants() {
    let field = generate_field(&FieldParams::new(5, 5, 1.0)).unwrap();

    let fluid = field.iter().filter(|p| p.kind == ParticleType::Fluid).count();
    let wall = field.iter().filter(|p| p.kind == ParticleType::Wall).count();
    let dummy = field.iter().filter(|p| p.kind == ParticleType::Dummy).count();

    assert_eq!(fluid, 25);
    assert_eq!(wall, 19);
    assert_eq!(dummy, 81);
    assert_eq!(field.len(), 125);

    let bounds = field.bounds();
    for p in field.iter() {
        assert!(bounds.contains(p.x, p.z), "({}, {}) escapes the box", p.x, p.z);
        assert_eq!(p.u, 0.0);
        assert_eq!(p.w, 0.0);
        assert_eq!(p.p, 0.0);
        assert_eq!(p.n, 0.0);
    }
}

#[test]
fn test_document_round_trip() {
    let dir = temp_dir("round_trip");
    let path = dir.join("test.xml");

    let condition = SolverConditions::default();
    let environment = Environment::default();
    let field = generate_field(&FieldParams::new(5, 5, environment.l_0)).unwrap();
    write_document(&path, &condition, &environment, &field).unwrap();

    let doc = read_document(&path).unwrap();

    // Same particle count, same records
    assert_eq!(doc.particles.len(), field.len());
    assert_eq!(doc.particles, field.particles());

    // Same condition and environment key sets, in order
    let condition_keys: Vec<&str> = doc.condition.iter().map(|(k, _)| k.as_str()).collect();
    let expected: Vec<&str> = condition.entries().iter().map(|(k, _)| *k).collect();
    assert_eq!(condition_keys, expected);

    let environment_keys: Vec<&str> = doc.environment.iter().map(|(k, _)| k.as_str()).collect();
    let mut expected: Vec<&str> = environment.entries().iter().map(|(k, _)| *k).collect();
    expected.extend(["minX", "minZ", "maxX", "maxZ"]);
    assert_eq!(environment_keys, expected);

    // Identical bounding box, both as written and as re-derived
    let bounds = field.bounds();
    assert_eq!(doc.environment_value("minX"), Some(bounds.min_x));
    assert_eq!(doc.environment_value("minZ"), Some(bounds.min_z));
    assert_eq!(doc.environment_value("maxX"), Some(bounds.max_x));
    assert_eq!(doc.environment_value("maxZ"), Some(bounds.max_z));

    let mut rederived = BoundingBox::new();
    for p in &doc.particles {
        rederived.include(p.x, p.z);
    }
    assert_eq!(rederived, bounds);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_write_failure_leaves_no_document() {
    let dir = temp_dir("write_failure");
    let missing = dir.join("no_such_dir").join("test.xml");

    let field = generate_field(&FieldParams::new(2, 2, 1.0)).unwrap();
    let result = write_document(
        &missing,
        &SolverConditions::default(),
        &Environment::default(),
        &field,
    );

    assert!(result.is_err());
    assert!(!missing.exists());

    let _ = fs::remove_dir_all(&dir);
}
