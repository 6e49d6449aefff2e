//! On-type formatting (spec §6: "typing the second `*` in `/**` on the line
//! above an action auto-inserts a JSDoc template").

use eligian_parser::ast::{ActionDecl, TypeAnnotation};

/// `line_above` is the text of the line the client just typed `/**` into,
/// trimmed. Returns the JSDoc block to insert above `action`, or `None` if
/// the line isn't a bare `/**` opener.
#[must_use]
pub fn jsdoc_template_for_action(line_above: &str, action: &ActionDecl) -> Option<String> {
    if line_above.trim() != "/**" {
        return None;
    }
    let mut lines = vec![" * ".to_string()];
    for param in &action.params {
        let ty = param.ty.map_or("*", type_annotation_str);
        lines.push(format!(" * @param {{{ty}}} {}", param.name));
    }
    lines.push(" */".to_string());
    Some(lines.join("\n"))
}

fn type_annotation_str(ty: TypeAnnotation) -> &'static str {
    match ty {
        TypeAnnotation::String => "string",
        TypeAnnotation::Number => "number",
        TypeAnnotation::Boolean => "boolean",
        TypeAnnotation::Object => "object",
        TypeAnnotation::Array => "array",
        TypeAnnotation::Unknown => "*",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_action(src: &str) -> ActionDecl {
        let doc = eligian_parser::parse(src).unwrap();
        let eligian_parser::ast::Document::Program(program) = doc else { panic!("expected a program") };
        program.actions().next().unwrap().clone()
    }

    #[test]
    fn builds_param_tags_for_each_declared_parameter() {
        let action = parse_action(
            "action fadeIn(selector: string, duration: number) { log(selector); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { fadeIn(\".x\", 1); } }",
        );
        let template = jsdoc_template_for_action("/**", &action).unwrap();
        assert!(template.contains("@param {string} selector"));
        assert!(template.contains("@param {number} duration"));
    }

    #[test]
    fn ignores_lines_that_are_not_a_bare_opener() {
        let action = parse_action(
            "action noop() { log(\"hi\"); }\ntimeline \"t\" in \"#s\" using raf { at 0s..1s { noop(); } }",
        );
        assert!(jsdoc_template_for_action("/** already has text", &action).is_none());
    }
}
