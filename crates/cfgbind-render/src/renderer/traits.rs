//! UnitRenderer trait

use cfgbind_meta::{DiTarget, Namespace};
use cfgbind_tree::UnitPlan;

use crate::sink::UnitId;

/// Renders planned units as source text for one DI framework.
pub trait UnitRenderer: Send + Sync {
    /// The framework this renderer writes for.
    fn target(&self) -> DiTarget;

    /// Class name of every unit this renderer produces.
    fn unit_name(&self) -> &str;

    /// Render the complete source of one unit.
    fn render(&self, plan: &UnitPlan<'_>) -> String;

    /// Identify the unit generated for `namespace`.
    fn unit_id(&self, namespace: &Namespace) -> UnitId {
        UnitId::new(namespace.clone(), self.unit_name())
    }
}
