//! GenerationEngine implementation

use cfgbind_fs::NormalizedPath;
use cfgbind_fs::checksum::{compute_content_checksum, compute_file_checksum};
use cfgbind_meta::{ConfigRecord, DiTarget, GeneratorConfig, Namespace, RecordManifest};
use cfgbind_render::{MemorySink, RendererRegistry, UnitRenderer, UnitSink};
use cfgbind_tree::NamespaceTree;

use crate::check::{CheckReport, DriftItem};
use crate::error::{Error, Result};
use crate::report::{Diagnostic, GenerationReport, PlannedUnit, UnitSummary};

/// Engine turning config records into generated units
///
/// Every operation builds a fresh tree from the records it is given:
/// insert, compact once, then reject co-located duplicate names before
/// anything is rendered.
pub struct GenerationEngine {
    config: GeneratorConfig,
    renderers: RendererRegistry,
}

impl GenerationEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        let renderers = RendererRegistry::from_config(&config);
        Self { config, renderers }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn target(&self) -> DiTarget {
        self.config.generator.target
    }

    /// Directory generated units are written below.
    pub fn output_dir(&self) -> NormalizedPath {
        NormalizedPath::new(&self.config.generator.output_dir)
    }

    /// The renderer for the configured target.
    pub fn renderer(&self) -> &dyn UnitRenderer {
        self.renderers.get(self.target())
    }

    /// Read and validate every record in the given manifests.
    pub fn load_records(paths: &[NormalizedPath]) -> Result<Vec<ConfigRecord>> {
        let mut records = Vec::new();
        for path in paths {
            let loaded = RecordManifest::load(path)?.into_records()?;
            tracing::debug!(path = %path, records = loaded.len(), "loaded records");
            records.extend(loaded);
        }
        tracing::info!(manifests = paths.len(), records = records.len(), "loaded config records");
        Ok(records)
    }

    /// Load the records of the manifests listed in the configuration.
    pub fn load_configured_records(&self) -> Result<Vec<ConfigRecord>> {
        let paths: Vec<NormalizedPath> = self
            .config
            .input
            .manifests
            .iter()
            .map(NormalizedPath::new)
            .collect();
        if paths.is_empty() {
            return Err(Error::NoManifests);
        }
        Self::load_records(&paths)
    }

    /// Insert every record, compact, and check for clashing names.
    pub fn build_tree(&self, records: &[ConfigRecord]) -> Result<NamespaceTree> {
        let mut tree = NamespaceTree::from_records(records.iter().cloned())?;
        tree.compact();
        tree.check_names()?;
        Ok(tree)
    }

    /// The units `generate` would write, children before parents.
    pub fn plan(&self, records: &[ConfigRecord]) -> Result<Vec<PlannedUnit>> {
        let tree = self.build_tree(records)?;
        let renderer = self.renderer();

        Ok(tree
            .plan()
            .into_iter()
            .map(|plan| {
                let unit = renderer.unit_id(&plan.namespace);
                PlannedUnit {
                    unit: unit.to_string(),
                    namespace: plan.namespace.as_str().to_string(),
                    path: unit.relative_path(),
                    records: plan.records.iter().map(|r| r.name.origin()).collect(),
                    includes: plan.includes.iter().map(|ns| ns.as_str().to_string()).collect(),
                }
            })
            .collect())
    }

    /// Render every unit into memory.
    pub fn render(&self, records: &[ConfigRecord]) -> Result<MemorySink> {
        let mut sink = MemorySink::new();
        self.generate(records, &mut sink)?;
        Ok(sink)
    }

    /// Render every materialized unit and hand it to `sink`.
    ///
    /// A unit the sink fails to write becomes an error diagnostic and the
    /// remaining units are still written. A written unit that includes a
    /// failed one gets a warning naming the dangling include.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be arranged into a tree,
    /// e.g. when two records end up sharing a name in one unit.
    pub fn generate(
        &self,
        records: &[ConfigRecord],
        sink: &mut dyn UnitSink,
    ) -> Result<GenerationReport> {
        let tree = self.build_tree(records)?;
        let renderer = self.renderer();
        let mut units = Vec::new();

        let traversal = tree.traverse(|plan| -> cfgbind_render::Result<()> {
            let unit = renderer.unit_id(&plan.namespace);
            let content = renderer.render(plan);
            let outcome = sink.write_unit(&unit, &content)?;

            units.push(UnitSummary {
                unit: unit.to_string(),
                namespace: plan.namespace.as_str().to_string(),
                path: unit.relative_path(),
                records: plan.records.iter().map(|r| r.name.origin()).collect(),
                includes: plan.includes.iter().map(|ns| ns.as_str().to_string()).collect(),
                outcome,
            });
            Ok(())
        });

        let mut diagnostics = Vec::new();
        for failure in &traversal.failures {
            let unit = renderer.unit_id(&failure.namespace);
            tracing::warn!(unit = %unit, error = %failure.error, "failed to write unit");
            diagnostics.push(Diagnostic::error(unit.to_string(), failure.error.to_string()));
        }
        for summary in &units {
            for include in &summary.includes {
                let namespace = Namespace::parse(include);
                if traversal.failed(&namespace) {
                    let included = renderer.unit_id(&namespace);
                    tracing::warn!(unit = %summary.unit, include = %included, "unit includes a unit that failed");
                    diagnostics.push(Diagnostic::warning(
                        summary.unit.clone(),
                        format!("includes {included}, which failed to generate"),
                    ));
                }
            }
        }

        let report = GenerationReport::new(units, diagnostics);
        tracing::info!(
            di_target = %self.target(),
            units = report.units.len(),
            failed = traversal.failures.len(),
            "generated config units"
        );
        Ok(report)
    }

    /// Compare the units the records render to with the files under `output_dir`.
    pub fn check(&self, records: &[ConfigRecord], output_dir: &NormalizedPath) -> Result<CheckReport> {
        let expected = self.render(records)?;
        let mut missing = Vec::new();
        let mut drifted = Vec::new();

        for (unit, content) in expected.units() {
            let path = output_dir.join(&unit.relative_path());
            let item = |description: &str| DriftItem {
                unit: unit.to_string(),
                file: path.as_str().to_string(),
                description: description.to_string(),
            };

            if !path.is_file() {
                tracing::debug!(unit = %unit, "unit missing");
                missing.push(item("unit has not been generated"));
                continue;
            }

            let on_disk = compute_file_checksum(&path.to_native())
                .map_err(|e| cfgbind_fs::Error::io(path.to_native(), e))?;
            if on_disk != compute_content_checksum(content) {
                tracing::debug!(unit = %unit, "unit drifted");
                drifted.push(item("content differs from the rendered unit"));
            }
        }

        Ok(CheckReport::new(expected.len(), missing, drifted))
    }
}
