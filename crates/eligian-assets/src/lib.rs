//! CSS, HTML, and locales side-registries (spec §4.3).

pub mod css;
pub mod did_you_mean;
pub mod html;
pub mod locales;
pub mod registry;

pub use css::{is_valid_selector_syntax, parse_css, CssMetadata};
pub use did_you_mean::suggest;
pub use html::{parse_html, HtmlMetadata};
pub use locales::{parse_locales, LocalesMetadata, LocalesParseError};
pub use registry::{AssetImport, AssetRegistries};
