//! Configuration constants and default value functions.

use serde::{Deserialize, Deserializer};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "bara-sync.yaml";

// Default value functions for serde
pub(crate) fn default_branch() -> String {
    "main".to_string()
}
pub(crate) fn default_image_name() -> String {
    "olivr/copybara".to_string()
}
pub(crate) fn default_image_tag() -> String {
    "latest".to_string()
}
pub(crate) fn default_message() -> String {
    "Imported from ${DESTINATION_REPO_REF}".to_string()
}
pub(crate) fn default_template() -> String {
    "${PR_MESSAGE}".to_string()
}

/// Accept either a YAML string or a number and keep it as a string.
///
/// PR numbers are usually written bare (`pr_number: 42`).
pub(crate) fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => s,
        Some(StringOrNumber::Int(n)) => n.to_string(),
        Some(StringOrNumber::Float(n)) => n.to_string(),
        None => String::new(),
    })
}
