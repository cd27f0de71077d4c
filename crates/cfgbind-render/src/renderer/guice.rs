//! Guice `AbstractModule` renderer

use cfgbind_meta::DiTarget;
use cfgbind_tree::UnitPlan;

use super::java::{self, Source};
use super::traits::UnitRenderer;

const GUICE_IMPORTS: &[&str] = &[
    "import com.google.inject.AbstractModule;",
    "import com.google.inject.Provides;",
    "import com.google.inject.multibindings.Multibinder;",
];

/// Renders units as Guice modules that install their includes and
/// register suppliers through a `Multibinder`.
#[derive(Debug, Clone)]
pub struct GuiceRenderer {
    unit_name: String,
}

impl GuiceRenderer {
    pub fn new() -> Self {
        Self::with_unit_name(DiTarget::Guice.default_unit_name())
    }

    pub fn with_unit_name(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
        }
    }
}

impl Default for GuiceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRenderer for GuiceRenderer {
    fn target(&self) -> DiTarget {
        DiTarget::Guice
    }

    fn unit_name(&self) -> &str {
        &self.unit_name
    }

    fn render(&self, plan: &UnitPlan<'_>) -> String {
        let mut out = Source::default();
        java::write_preamble(&mut out, plan, GUICE_IMPORTS, "Guice");
        out.line(format!(
            "public class {} extends AbstractModule {{",
            self.unit_name
        ));

        out.blank();
        out.line("  @Override");
        out.line("  protected void configure() {");
        for include in &plan.includes {
            out.line(format!(
                "    install(new {}());",
                include.qualify(&self.unit_name)
            ));
        }
        if !plan.includes.is_empty() {
            out.blank();
        }
        out.line(
            "    Multibinder<ConfigSupplier> supplierBinder = Multibinder.newSetBinder(binder(), ConfigSupplier.class);",
        );
        for record in &plan.records {
            out.line(format!(
                "    bindConfigSupplier_{}(supplierBinder);",
                record.effective_name()
            ));
        }
        out.line("  }");

        for record in &plan.records {
            let name = record.effective_name();
            out.blank();
            out.line(format!(
                "  /** Binds a ConfigSupplier for config {name} ({}) to the set multibinder. */",
                record.name.declaration_name()
            ));
            out.line(format!(
                "  private void bindConfigSupplier_{name}(Multibinder<ConfigSupplier> binder) {{"
            ));
            java::write_description(&mut out, record);
            out.line("    binder.addBinding().toInstance(");
            out.line(format!(
                "        {});",
                java::supplier_expression(record, &plan.namespace)
            ));
            out.line("  }");

            java::write_value_binding(&mut out, record, "ConfigValue", "");
        }

        out.line("}");
        out.finish()
    }
}
