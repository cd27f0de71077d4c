use std::fs;

use cfgbind_core::{CheckStatus, Error, GenerationEngine, Severity};
use cfgbind_fs::NormalizedPath;
use cfgbind_meta::{Accessibility, ConfigRecord, DiTarget, GeneratorConfig};
use cfgbind_render::{DirectorySink, MemorySink, UnitId, UnitSink, WriteOutcome};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn record(origin: &str, accessibility: Accessibility) -> ConfigRecord {
    ConfigRecord::builder(origin.parse().unwrap(), accessibility, "String").build()
}

fn mixed_records() -> Vec<ConfigRecord> {
    vec![
        record("x.things.T1:flag1", Accessibility::PackageScoped),
        record("x.things.T2:flag2", Accessibility::Public),
        record("x.others.O:f1", Accessibility::Public),
        record("x.others.O:f2", Accessibility::Private),
        record("x.others.O:f3", Accessibility::PackageScoped),
    ]
}

fn engine(target: DiTarget) -> GenerationEngine {
    let mut config = GeneratorConfig::default();
    config.generator.target = target;
    GenerationEngine::new(config)
}

/// Sink that refuses units in one namespace and keeps the rest.
struct FailingSink {
    fail_for: String,
    inner: MemorySink,
}

impl UnitSink for FailingSink {
    fn write_unit(&mut self, unit: &UnitId, content: &str) -> cfgbind_render::Result<WriteOutcome> {
        if unit.namespace.as_str() == self.fail_for {
            return Err(cfgbind_render::Error::SinkRejected {
                unit: unit.to_string(),
                message: "disk full".to_string(),
            });
        }
        self.inner.write_unit(unit, content)
    }
}

#[test]
fn test_generate_writes_children_before_parents() {
    let mut sink = MemorySink::new();
    let report = engine(DiTarget::Dagger)
        .generate(&mixed_records(), &mut sink)
        .unwrap();

    assert!(report.success);
    let units: Vec<&str> = report.units.iter().map(|u| u.unit.as_str()).collect();
    assert_eq!(
        units,
        vec![
            "x.others.ConfigDaggerModule",
            "x.things.ConfigDaggerModule",
            "x.ConfigDaggerModule",
        ]
    );
    assert_eq!(report.units[2].records.len(), 3);
    assert_eq!(report.units[2].includes, vec!["x.others", "x.things"]);
    assert_eq!(sink.len(), 3);
}

#[rstest]
#[case(DiTarget::Dagger, "ConfigDaggerModule", "@Module(includes")]
#[case(DiTarget::Guice, "ConfigGuiceModule", "extends AbstractModule")]
fn test_target_selects_renderer(
    #[case] target: DiTarget,
    #[case] unit_name: &str,
    #[case] marker: &str,
) {
    let sink = engine(target).render(&mixed_records()).unwrap();
    let root = UnitId::new("x".into(), unit_name);
    let text = sink.get(&root).unwrap();
    assert!(text.contains(marker), "{text}");
}

#[test]
fn test_sink_failure_is_reported_and_traversal_continues() {
    let mut sink = FailingSink {
        fail_for: "x.others".to_string(),
        inner: MemorySink::new(),
    };
    let report = engine(DiTarget::Dagger)
        .generate(&mixed_records(), &mut sink)
        .unwrap();

    assert!(!report.success);
    assert_eq!(sink.inner.len(), 2);

    let errors: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].unit, "x.others.ConfigDaggerModule");
    assert!(errors[0].message.contains("disk full"));

    let dangling: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].unit, "x.ConfigDaggerModule");
    assert!(dangling[0].message.contains("x.others.ConfigDaggerModule"));
}

#[test]
fn test_name_conflict_aborts_generation() {
    let records = vec![
        record("x.a.A:timeout", Accessibility::Public),
        record("x.b.B:timeout", Accessibility::Public),
    ];
    let mut sink = MemorySink::new();

    let err = engine(DiTarget::Dagger)
        .generate(&records, &mut sink)
        .unwrap_err();

    assert!(matches!(err, Error::Tree(cfgbind_tree::Error::NameConflicts(_))));
    assert!(sink.is_empty());
}

#[test]
fn test_duplicate_origin_across_manifests_is_rejected() {
    let records = vec![
        record("x.a.A:timeout", Accessibility::Public),
        record("x.a.A:timeout", Accessibility::Public),
    ];
    let err = engine(DiTarget::Dagger).plan(&records).unwrap_err();
    assert!(matches!(err, Error::Tree(cfgbind_tree::Error::DuplicateRecord { .. })));
}

#[test]
fn test_plan_lists_units_without_writing() {
    let plan = engine(DiTarget::Guice).plan(&mixed_records()).unwrap();

    let paths: Vec<&str> = plan.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "x/others/ConfigGuiceModule.java",
            "x/things/ConfigGuiceModule.java",
            "x/ConfigGuiceModule.java",
        ]
    );
    assert_eq!(plan[0].records, vec!["x.others.O:f3"]);
}

#[test]
fn test_check_tracks_generated_files() {
    let temp = tempfile::tempdir().unwrap();
    let out = NormalizedPath::new(temp.path());
    let engine = engine(DiTarget::Dagger);
    let records = mixed_records();

    let report = engine.check(&records, &out).unwrap();
    assert_eq!(report.status, CheckStatus::Missing);
    assert_eq!(report.missing.len(), 3);

    let mut sink = DirectorySink::new(temp.path());
    let generated = engine.generate(&records, &mut sink).unwrap();
    assert_eq!(generated.count(WriteOutcome::Written), 3);

    let report = engine.check(&records, &out).unwrap();
    assert_eq!(report.status, CheckStatus::Healthy);
    assert_eq!(report.checked, 3);

    let file = temp.path().join("x/things/ConfigDaggerModule.java");
    fs::write(&file, "// edited by hand\n").unwrap();
    let report = engine.check(&records, &out).unwrap();
    assert_eq!(report.status, CheckStatus::Drifted);
    assert_eq!(report.drifted[0].unit, "x.things.ConfigDaggerModule");

    let regenerated = engine.generate(&records, &mut sink).unwrap();
    assert_eq!(regenerated.count(WriteOutcome::Written), 1);
    assert_eq!(regenerated.count(WriteOutcome::Unchanged), 2);
}

#[test]
fn test_load_records_from_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let manifest = temp.path().join("records.toml");
    fs::write(
        &manifest,
        r#"
[[record]]
origin = "x.things.T1:flag1"
accessibility = "package_scoped"
type = "String"

[[record]]
origin = "x.others.O:f1"
accessibility = "public"
type = "int"
name = "first"
"#,
    )
    .unwrap();

    let records = GenerationEngine::load_records(&[NormalizedPath::new(&manifest)]).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].effective_name(), "first");
}

#[test]
fn test_no_configured_manifests() {
    let err = engine(DiTarget::Dagger)
        .load_configured_records()
        .unwrap_err();
    assert!(matches!(err, Error::NoManifests));
}

#[test]
fn test_report_serializes_outcomes() {
    let report = engine(DiTarget::Dagger)
        .generate(&mixed_records(), &mut MemorySink::new())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["units"][0]["outcome"], "written");
}
