//! The built-in operation signature registry (spec §4.4: "loaded from a
//! registry generated once from external metadata").

use crate::types::Type;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// A kind that narrows validation of an `array`-typed parameter beyond the
/// primitive lattice (spec §4.4: "for array parameters of special kinds").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrayElementKind {
    /// Each element must exist in the locales registry.
    TranslationKeyList,
}

#[derive(Clone, Debug)]
pub struct OperationParam {
    pub name: &'static str,
    pub ty: Type,
    pub required: bool,
    pub default_value: Option<serde_json::Value>,
    pub description: &'static str,
    /// Non-empty only for enum-valued parameters: the literal must be one of
    /// these (spec §4.4: "enum-valued parameters accept only literals in the
    /// enum").
    pub enum_values: &'static [&'static str],
    pub array_element_kind: Option<ArrayElementKind>,
}

impl OperationParam {
    const fn required(name: &'static str, ty: Type, description: &'static str) -> Self {
        Self { name, ty, required: true, default_value: None, description, enum_values: &[], array_element_kind: None }
    }

    const fn optional(name: &'static str, ty: Type, description: &'static str) -> Self {
        Self { name, ty, required: false, default_value: None, description, enum_values: &[], array_element_kind: None }
    }
}

#[derive(Clone, Debug)]
pub struct OperationSignature {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<OperationParam>,
    pub dependencies: &'static [&'static str],
    pub provides: &'static [&'static str],
    pub category: &'static str,
    /// DSL control-flow syntax, not a real emitted operation: filtered out of
    /// completion (spec §6: "filtering out DSL syntax operations like
    /// `forEach`/`ifCondition`").
    pub is_syntax_only: bool,
}

/// Lazily-initialized, process-wide immutable table (spec §9: "The operation
/// registry is loaded once and cached").
pub static OPERATIONS: Lazy<FxHashMap<&'static str, OperationSignature>> = Lazy::new(build_registry);

#[must_use]
pub fn lookup(name: &str) -> Option<&'static OperationSignature> {
    OPERATIONS.get(name)
}

#[must_use]
pub fn all() -> impl Iterator<Item = &'static OperationSignature> {
    OPERATIONS.values()
}

fn build_registry() -> FxHashMap<&'static str, OperationSignature> {
    let mut map = FxHashMap::default();
    let mut insert = |sig: OperationSignature| {
        map.insert(sig.name, sig);
    };

    insert(OperationSignature {
        name: "selectElement",
        description: "Selects one or more DOM elements by CSS selector and stores the selection as the operation context.",
        params: vec![OperationParam::required("selector", Type::String, "CSS selector to select")],
        dependencies: &[],
        provides: &["selectedElement"],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "deselectElement",
        description: "Clears the current element selection.",
        params: vec![],
        dependencies: &["selectedElement"],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "addClass",
        description: "Adds a class to the currently selected element(s).",
        params: vec![
            OperationParam::required("selector", Type::String, "CSS selector"),
            OperationParam::required("className", Type::String, "class to add"),
        ],
        dependencies: &[],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "removeClass",
        description: "Removes a class from the currently selected element(s).",
        params: vec![
            OperationParam::required("selector", Type::String, "CSS selector"),
            OperationParam::required("className", Type::String, "class to remove"),
        ],
        dependencies: &[],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "toggleClass",
        description: "Toggles a class on the currently selected element(s).",
        params: vec![
            OperationParam::required("selector", Type::String, "CSS selector"),
            OperationParam::required("className", Type::String, "class to toggle"),
        ],
        dependencies: &[],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "setElementContent",
        description: "Sets the text or HTML content of the currently selected element.",
        params: vec![
            OperationParam::required("selector", Type::String, "CSS selector"),
            OperationParam::required("content", Type::String, "content to set"),
            OperationParam::optional("insertionType", Type::String, "how the content is inserted"),
        ],
        dependencies: &[],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "setStyle",
        description: "Sets a CSS property on the currently selected element.",
        params: vec![
            OperationParam::required("propertyName", Type::String, "CSS property"),
            OperationParam::required("propertyValue", Type::String, "value"),
        ],
        dependencies: &[],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "wait",
        description: "Delays subsequent operations by a number of milliseconds.",
        params: vec![OperationParam::required("milliseconds", Type::Number, "delay in milliseconds")],
        dependencies: &[],
        provides: &[],
        category: "timing",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "log",
        description: "Writes a message to the console for debugging.",
        params: vec![OperationParam::required("message", Type::Unknown, "value to log")],
        dependencies: &[],
        provides: &[],
        category: "debug",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "getControllerInstance",
        description: "Looks up a registered controller by system name.",
        params: vec![OperationParam::required("systemName", Type::String, "controller system name")],
        dependencies: &["selectedElement"],
        provides: &["controllerInstance"],
        category: "controller",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "addControllerToElement",
        description: "Attaches a controller instance to the selected element with JSON configuration.",
        params: vec![OperationParam::required("json", Type::Object, "controller configuration")],
        dependencies: &["selectedElement", "controllerInstance"],
        provides: &[],
        category: "controller",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "requestAction",
        description: "Requests an action by system name, preparing it for a start call.",
        params: vec![OperationParam::required("systemName", Type::String, "action name")],
        dependencies: &[],
        provides: &["requestedAction"],
        category: "action",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "startAction",
        description: "Starts the requested action with the given operation data.",
        params: vec![OperationParam::required("actionOperationData", Type::Object, "arguments for the action")],
        dependencies: &["requestedAction"],
        provides: &[],
        category: "action",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "endAction",
        description: "Ends a previously started endable action.",
        params: vec![OperationParam::required("systemName", Type::String, "action name")],
        dependencies: &[],
        provides: &[],
        category: "action",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "broadcastEvent",
        description: "Broadcasts a named event with optional arguments.",
        params: vec![
            OperationParam::required("eventName", Type::String, "event name"),
            OperationParam::optional("eventArgs", Type::Array, "event arguments"),
            OperationParam::optional("eventTopic", Type::String, "event topic"),
        ],
        dependencies: &[],
        provides: &[],
        category: "event",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "setGlobalData",
        description: "Writes a value into the shared global data object.",
        params: vec![OperationParam::required("properties", Type::Object, "properties to merge")],
        dependencies: &[],
        provides: &[],
        category: "data",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "setOperationData",
        description: "Sets arbitrary key/value pairs on the current operation context.",
        params: vec![OperationParam::required("properties", Type::Object, "properties to set")],
        dependencies: &[],
        provides: &[],
        category: "data",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "animateWithClass",
        description: "Adds a class and waits for its animation/transition to finish before continuing.",
        params: vec![
            OperationParam::required("selector", Type::String, "CSS selector"),
            OperationParam::required("className", Type::String, "animation class"),
        ],
        dependencies: &[],
        provides: &[],
        category: "dom",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "addControllerFromLabel",
        description: "Attaches a label controller for the given translation keys.",
        params: vec![OperationParam {
            name: "labelKeys",
            ty: Type::Array,
            required: true,
            default_value: None,
            description: "translation keys to bind",
            enum_values: &[],
            array_element_kind: Some(ArrayElementKind::TranslationKeyList),
        }],
        dependencies: &["selectedElement"],
        provides: &[],
        category: "controller",
        is_syntax_only: false,
    });
    insert(OperationSignature {
        name: "addController",
        description: "DSL-only sugar lowered into selectElement + getControllerInstance + addControllerToElement; never emitted as an operation.",
        params: vec![
            OperationParam::required("systemName", Type::String, "controller system name"),
            OperationParam::required("args", Type::Object, "controller configuration"),
        ],
        dependencies: &["selectedElement"],
        provides: &[],
        category: "syntax",
        is_syntax_only: true,
    });
    insert(OperationSignature {
        name: "forEach",
        description: "DSL-only control-flow syntax lowered directly from `for`; never emitted as an operation.",
        params: vec![],
        dependencies: &[],
        provides: &[],
        category: "syntax",
        is_syntax_only: true,
    });
    insert(OperationSignature {
        name: "ifCondition",
        description: "DSL-only control-flow syntax lowered directly from `if`; never emitted as an operation.",
        params: vec![],
        dependencies: &[],
        provides: &[],
        category: "syntax",
        is_syntax_only: true,
    });

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_operation() {
        let sig = lookup("selectElement").unwrap();
        assert_eq!(sig.params.len(), 1);
        assert!(sig.params[0].required);
    }

    #[test]
    fn syntax_only_operations_are_marked() {
        assert!(lookup("forEach").unwrap().is_syntax_only);
        assert!(!lookup("selectElement").unwrap().is_syntax_only);
    }

    #[test]
    fn unknown_operation_is_none() {
        assert!(lookup("notARealOperation").is_none());
    }
}
