//! Custom kinds used for hover/completion, orthogonal to the primitive type
//! lattice (spec §4.4, GLOSSARY: "Kind").

use eligian_parser::ast::ProviderKind;

#[derive(Clone, Debug)]
pub struct TimelineType {
    pub provider: ProviderKind,
    pub container_selector: String,
    pub source: Option<String>,
    pub event_count: usize,
}

#[derive(Clone, Debug)]
pub enum TimelineEventType {
    Timed { start_seconds: f64, end_seconds: f64 },
    Sequence { duration_seconds: f64 },
    Stagger { delay_seconds: f64 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssetType {
    Css,
    Html,
    Media,
}

#[derive(Clone, Debug)]
pub struct ImportType {
    pub asset_type: AssetType,
    pub is_default: bool,
}

#[derive(Clone, Debug)]
pub struct LanguagesType {
    pub count: usize,
    pub default_code: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LabelGroup {
    pub keys: Vec<TranslationKey>,
}

#[derive(Clone, Debug)]
pub struct TranslationKey {
    pub dotted_path: String,
    pub locale_codes: Vec<String>,
}
