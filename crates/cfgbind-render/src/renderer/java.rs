//! Source text shared by the Java renderers

use cfgbind_meta::{ConfigRecord, Namespace};
use cfgbind_tree::UnitPlan;

const CONFIG_IMPORTS: &[&str] = &[
    "import com.bdl.config.ConfigDescription;",
    "import com.bdl.config.ConfigException;",
    "import com.bdl.config.ConfigSupplier;",
    "import com.bdl.config.ConfigValue;",
    "import com.bdl.config.Configuration;",
];

/// Accumulates generated source one line at a time.
#[derive(Debug, Default)]
pub(crate) struct Source {
    text: String,
}

impl Source {
    pub(crate) fn line(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.text.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

/// Escape text for use inside a Java string literal.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Package line, imports and the class doc comment.
pub(crate) fn write_preamble(
    out: &mut Source,
    plan: &UnitPlan<'_>,
    framework_imports: &[&str],
    framework: &str,
) {
    if !plan.namespace.is_root() {
        out.line(format!("package {};", plan.namespace.as_str()));
        out.blank();
    }
    for import in CONFIG_IMPORTS {
        out.line(import);
    }
    out.blank();
    for import in framework_imports {
        out.line(import);
    }
    out.blank();
    if plan.records.iter().any(|r| !r.has_default) {
        out.line("import javax.annotation.Nullable;");
        out.blank();
    }

    if plan.namespace.is_root() {
        out.line(format!(
            "/** {framework} module for binding configs in the root package. */"
        ));
    } else {
        out.line(format!(
            "/** {framework} module for binding configs in the {} package. */",
            plan.namespace.as_str()
        ));
    }
}

/// The `ConfigDescription` builder chain, assigned to `description`.
pub(crate) fn write_description(out: &mut Source, record: &ConfigRecord) {
    out.line("    ConfigDescription description = ConfigDescription.builder()");
    out.line(format!(
        "        .packageName(\"{}\")",
        escape(record.origin_namespace().as_str())
    ));
    out.line(format!("        .className(\"{}\")", escape(&record.name.container)));
    out.line(format!("        .fieldName(\"{}\")", escape(&record.name.member)));
    out.line(format!("        .type(\"{}\")", escape(&record.declared_type)));
    if let Some(short_name) = &record.short_name {
        out.line(format!("        .specifiedName(\"{}\")", escape(short_name)));
    }
    if let Some(description) = &record.description {
        out.line(format!("        .description(\"{}\")", escape(description)));
    }
    out.line("        .build();");
}

/// The expression handing the declaration to `ConfigSupplier`.
///
/// Private declarations are read reflectively. Anything else is
/// referenced directly, by its local name when the unit lives in the
/// declaration's own namespace.
pub(crate) fn supplier_expression(record: &ConfigRecord, unit_namespace: &Namespace) -> String {
    if record.accessibility.needs_reflection() {
        "ConfigSupplier.reflective(description)".to_string()
    } else if record.origin_namespace() == unit_namespace {
        format!(
            "ConfigSupplier.simple(description, {})",
            record.name.declaration_name()
        )
    } else {
        format!(
            "ConfigSupplier.simple(description, {})",
            record.fully_qualified_name()
        )
    }
}

/// The `@Provides` method resolving the configured value at runtime.
pub(crate) fn write_value_binding(
    out: &mut Source,
    record: &ConfigRecord,
    doc_annotation: &str,
    modifiers: &str,
) {
    let name = record.effective_name();
    out.blank();
    out.line(format!(
        "  /** Binds the type of the config with a {doc_annotation} annotation to the Configurable's value. */"
    ));
    out.line("  @Provides");
    match record.value_key() {
        Some(key) => out.line(format!("  {key}")),
        None => out.line(format!("  @ConfigValue(\"{}\")", escape(name))),
    }
    if !record.has_default {
        out.line("  @Nullable");
    }
    out.line(format!(
        "  {modifiers}{} provideConfigValue_{name}(Configuration configuration) {{",
        record.declared_type
    ));
    out.line("    try {");
    out.line(format!(
        "      return ({}) configuration.get(\"{}\");",
        record.declared_type,
        escape(&record.fully_qualified_name())
    ));
    out.line("    } catch (ConfigException ex) {");
    out.line("      throw ex.wrap();");
    out.line("    }");
    out.line("  }");
}

/// Simple name of an annotation: `@com.x.Dummy("a")` becomes `Dummy`.
pub(crate) fn annotation_simple_name(annotation: &str) -> &str {
    let bare = annotation.trim().trim_start_matches('@');
    let bare = bare.split('(').next().unwrap_or(bare).trim();
    bare.rsplit('.').next().unwrap_or(bare)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("say \"hi\"", "say \\\"hi\\\"")]
    #[case("C:\\temp", "C:\\\\temp")]
    #[case("two\nlines", "two\\nlines")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[rstest]
    #[case("@Dummy", "Dummy")]
    #[case("@com.bdl.DummyQualifier(\"flag2\")", "DummyQualifier")]
    #[case("@javax.inject.Named(\"x.y\")", "Named")]
    fn test_annotation_simple_name(#[case] annotation: &str, #[case] expected: &str) {
        assert_eq!(annotation_simple_name(annotation), expected);
    }
}
