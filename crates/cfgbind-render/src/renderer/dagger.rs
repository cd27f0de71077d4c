//! Dagger `@Module` renderer

use cfgbind_meta::{DiTarget, Namespace};
use cfgbind_tree::UnitPlan;

use super::java::{self, Source};
use super::traits::UnitRenderer;

const DAGGER_IMPORTS: &[&str] = &[
    "import dagger.Module;",
    "import dagger.Provides;",
    "import dagger.multibindings.IntoSet;",
];

/// Renders units as Dagger modules with static `@Provides` methods.
#[derive(Debug, Clone)]
pub struct DaggerRenderer {
    unit_name: String,
}

impl DaggerRenderer {
    pub fn new() -> Self {
        Self::with_unit_name(DiTarget::Dagger.default_unit_name())
    }

    pub fn with_unit_name(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
        }
    }

    fn include(&self, namespace: &Namespace) -> String {
        format!("{}.class", namespace.qualify(&self.unit_name))
    }
}

impl Default for DaggerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRenderer for DaggerRenderer {
    fn target(&self) -> DiTarget {
        DiTarget::Dagger
    }

    fn unit_name(&self) -> &str {
        &self.unit_name
    }

    fn render(&self, plan: &UnitPlan<'_>) -> String {
        let mut out = Source::default();
        java::write_preamble(&mut out, plan, DAGGER_IMPORTS, "Dagger");

        if plan.includes.is_empty() {
            out.line("@Module");
        } else {
            let includes: Vec<String> = plan.includes.iter().map(|ns| self.include(ns)).collect();
            out.line(format!("@Module(includes = {{{}}})", includes.join(", ")));
        }
        out.line(format!("public class {} {{", self.unit_name));

        for record in &plan.records {
            let name = record.effective_name();
            out.blank();
            out.line(format!(
                "  /** Adds a ConfigSupplier for config {name} ({}) to the set multibinder. */",
                record.name.declaration_name()
            ));
            out.line("  @Provides");
            out.line("  @IntoSet");
            out.line(format!(
                "  public static ConfigSupplier provideConfigSupplier_{name}() {{"
            ));
            java::write_description(&mut out, record);
            out.line(format!(
                "    return {};",
                java::supplier_expression(record, &plan.namespace)
            ));
            out.line("  }");

            let doc_annotation = record
                .value_key()
                .map(java::annotation_simple_name)
                .unwrap_or("ConfigValue");
            java::write_value_binding(&mut out, record, doc_annotation, "public static ");
        }

        out.line("}");
        out.finish()
    }
}
