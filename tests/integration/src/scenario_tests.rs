//! End-to-end scenarios: manifest files -> tree -> rendered units on disk.

use std::fs;
use std::path::PathBuf;

use cfgbind_core::{CheckStatus, Error, GenerationEngine};
use cfgbind_fs::NormalizedPath;
use cfgbind_meta::{DiTarget, GeneratorConfig};
use cfgbind_render::{DirectorySink, MemorySink, UnitId};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn fixture(name: &str) -> NormalizedPath {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/manifests")
        .join(name);
    NormalizedPath::new(path)
}

fn engine(target: DiTarget, output_dir: &std::path::Path) -> GenerationEngine {
    let mut config = GeneratorConfig::default();
    config.generator.target = target;
    config.generator.output_dir = NormalizedPath::new(output_dir).as_str().to_string();
    GenerationEngine::new(config)
}

fn unit_files(root: &std::path::Path) -> Vec<String> {
    fn walk(dir: &std::path::Path, root: &std::path::Path, files: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, files);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                files.push(NormalizedPath::new(relative).as_str().to_string());
            }
        }
    }
    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

#[test]
fn test_disjoint_leaves_join_at_common_ancestor() {
    let temp = TempDir::new().unwrap();
    let engine = engine(DiTarget::Dagger, temp.path());
    let records = GenerationEngine::load_records(&[fixture("disjoint_leaves.toml")]).unwrap();

    let mut sink = DirectorySink::new(temp.path());
    let report = engine.generate(&records, &mut sink).unwrap();

    assert!(report.success);
    assert_eq!(
        unit_files(temp.path()),
        vec![
            "a/b/ConfigDaggerModule.java",
            "a/b/sub1/ConfigDaggerModule.java",
            "a/b/sub2/sub/ConfigDaggerModule.java",
        ]
    );

    let join = fs::read_to_string(temp.path().join("a/b/ConfigDaggerModule.java")).unwrap();
    assert!(join.contains(
        "@Module(includes = {a.b.sub1.ConfigDaggerModule.class, a.b.sub2.sub.ConfigDaggerModule.class})"
    ));
    assert!(!join.contains("@Provides"));
}

#[test]
fn test_mixed_accessibility_end_to_end() {
    let temp = TempDir::new().unwrap();
    let engine = engine(DiTarget::Guice, temp.path());
    let records = GenerationEngine::load_records(&[fixture("mixed_accessibility.toml")]).unwrap();

    let mut sink = DirectorySink::new(temp.path());
    let report = engine.generate(&records, &mut sink).unwrap();
    assert!(report.success);

    assert_eq!(
        unit_files(temp.path()),
        vec![
            "x/ConfigGuiceModule.java",
            "x/others/ConfigGuiceModule.java",
            "x/things/ConfigGuiceModule.java",
        ]
    );

    let ancestor = fs::read_to_string(temp.path().join("x/ConfigGuiceModule.java")).unwrap();
    assert!(ancestor.contains("    install(new x.others.ConfigGuiceModule());\n    install(new x.things.ConfigGuiceModule());\n"));
    assert!(ancestor.contains("bindConfigSupplier_f1(supplierBinder);"));
    assert!(ancestor.contains("bindConfigSupplier_f2(supplierBinder);"));
    assert!(ancestor.contains("bindConfigSupplier_flag2(supplierBinder);"));
    assert!(ancestor.contains("ConfigSupplier.simple(description, x.others.O.f1));"));
    assert!(ancestor.contains("ConfigSupplier.reflective(description));"));
    assert!(ancestor.contains("  @com.bdl.config.DummyQualifier(\"flag2\")\n  @Nullable\n"));

    let things = fs::read_to_string(temp.path().join("x/things/ConfigGuiceModule.java")).unwrap();
    assert!(things.contains("bindConfigSupplier_alternate_name(supplierBinder);"));
    assert!(things.contains("ConfigSupplier.simple(description, T1.flag1));"));
    assert!(things.contains(".specifiedName(\"alternate_name\")"));

    let others = fs::read_to_string(temp.path().join("x/others/ConfigGuiceModule.java")).unwrap();
    assert!(others.contains("bindConfigSupplier_f3(supplierBinder);"));
    assert!(!others.contains("bindConfigSupplier_f1"));

    let check = engine.check(&records, &NormalizedPath::new(temp.path())).unwrap();
    assert_eq!(check.status, CheckStatus::Healthy);
}

#[test]
fn test_root_namespace_unit() {
    let engine = engine(DiTarget::Dagger, std::path::Path::new("unused"));
    let records = GenerationEngine::load_records(&[fixture("root_join.json")]).unwrap();

    let sink: MemorySink = engine.render(&records).unwrap();
    let units: Vec<String> = sink.units().map(|(id, _)| id.to_string()).collect();
    assert_eq!(
        units,
        vec![
            "ConfigDaggerModule",
            "com.acme.ConfigDaggerModule",
            "org.example.ConfigDaggerModule",
        ]
    );

    let root = sink
        .get(&UnitId::new(Default::default(), "ConfigDaggerModule"))
        .unwrap();
    assert!(root.starts_with("import com.bdl.config.ConfigDescription;"));
    assert!(root.contains(
        "@Module(includes = {com.acme.ConfigDaggerModule.class, org.example.ConfigDaggerModule.class})"
    ));
    assert!(root.contains("ConfigSupplier.simple(description, Main.verbose);"));
    assert!(root.contains("configuration.get(\"Main.verbose\")"));
}

#[rstest]
#[case(DiTarget::Dagger)]
#[case(DiTarget::Guice)]
fn test_name_conflict_fixture_aborts(#[case] target: DiTarget) {
    let temp = TempDir::new().unwrap();
    let engine = engine(target, temp.path());
    let records = GenerationEngine::load_records(&[fixture("name_conflict.yaml")]).unwrap();

    let mut sink = DirectorySink::new(temp.path());
    let err = engine.generate(&records, &mut sink).unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, Error::Tree(_)));
    assert!(message.contains("x.a.A:timeout"), "{message}");
    assert!(message.contains("x.b.B:timeout"), "{message}");
    assert!(unit_files(temp.path()).is_empty());
}

#[test]
fn test_manifests_combine_across_formats() {
    let records = GenerationEngine::load_records(&[
        fixture("disjoint_leaves.toml"),
        fixture("root_join.json"),
    ])
    .unwrap();
    assert_eq!(records.len(), 5);

    let engine = engine(DiTarget::Dagger, std::path::Path::new("unused"));
    let plan = engine.plan(&records).unwrap();
    let root = plan.last().unwrap();
    assert_eq!(root.namespace, "");
    assert_eq!(root.includes, vec!["a.b", "com.acme", "org.example"]);
}
