//! Hover markdown for operation calls (spec §6: "description, parameters
//! with required/optional and types, requires/provides lists").

use eligian_types::OperationSignature;
use std::fmt::Write as _;

#[must_use]
pub fn hover_for_operation(name: &str) -> Option<String> {
    let sig = eligian_types::lookup_operation(name)?;
    Some(render(sig))
}

fn render(sig: &OperationSignature) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "**{}**", sig.name);
    let _ = writeln!(md);
    let _ = writeln!(md, "{}", sig.description);
    if !sig.params.is_empty() {
        let _ = writeln!(md);
        let _ = writeln!(md, "**Parameters**");
        for p in &sig.params {
            let required = if p.required { "required" } else { "optional" };
            let _ = writeln!(md, "- `{}` ({required}, `{}`) — {}", p.name, p.ty, p.description);
        }
    }
    if !sig.dependencies.is_empty() {
        let _ = writeln!(md);
        let _ = writeln!(md, "**Requires:** {}", sig.dependencies.join(", "));
    }
    if !sig.provides.is_empty() {
        let _ = writeln!(md);
        let _ = writeln!(md, "**Provides:** {}", sig.provides.join(", "));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_select_element_signature() {
        let md = hover_for_operation("selectElement").unwrap();
        assert!(md.contains("selectElement"));
        assert!(md.contains("selector"));
        assert!(md.contains("Provides:"));
    }

    #[test]
    fn unknown_operation_has_no_hover() {
        assert!(hover_for_operation("notAnOperation").is_none());
    }
}
