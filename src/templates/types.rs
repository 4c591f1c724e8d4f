//! Template catalog type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named preset bundling the configuration for one model category.
///
/// Templates are reconciled across upgrades by `id`, never by field copy:
/// the identifier is assigned at creation and never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Stable unique identifier.
    pub id: String,

    /// Display name shown in selection lists.
    pub name: String,

    /// Version counter for the template's own content, independent of the
    /// document schema version.
    pub file_version: u32,

    /// Whether the template shipped with the application or belongs to the user.
    pub group: TemplateGroup,

    /// Kind of model the preset configures.
    pub category: ModelCategory,

    /// Model files and runtime selection.
    pub model: ModelSpec,

    /// Free-form preset parameters (sampling knobs, prompt defaults, etc.).
    #[serde(default)]
    pub parameters: toml::Table,

    /// Set when reconciliation found newer shipped content for this template.
    /// Cleared by the caller once the user acknowledges the notice.
    #[serde(default)]
    pub update_available: bool,
}

/// Provenance of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateGroup {
    /// Shipped with the application; refreshed from the vendor catalog on upgrade.
    Builtin,
    /// Created or imported by the user; never touched by reconciliation.
    User,
}

/// Model category a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    /// Speech recognition and transcription models.
    Speech,
    /// Image and vision models.
    Vision,
    /// Text generation models.
    Text,
}

/// Model files and runtime selection for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Path to the model file.
    pub path: PathBuf,

    /// Optional labels file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<PathBuf>,

    /// Runtime format identifier (e.g. "onnx", "gguf").
    pub format: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_template_round_trips_through_toml() {
        let template = Template {
            id: "whisper-base".into(),
            name: "Whisper Base".into(),
            file_version: 2,
            group: TemplateGroup::Builtin,
            category: ModelCategory::Speech,
            model: ModelSpec {
                path: "/models/whisper-base.onnx".into(),
                labels: None,
                format: "onnx".into(),
            },
            parameters: toml::Table::new(),
            update_available: false,
        };

        let serialized = toml::to_string(&template).unwrap();
        let decoded: Template = toml::from_str(&serialized).unwrap();
        assert_eq!(decoded, template);
    }

    #[test]
    fn test_update_available_defaults_to_false() {
        let toml_str = r#"
            id = "custom"
            name = "Custom"
            file_version = 1
            group = "user"
            category = "text"

            [model]
            path = "/models/custom.gguf"
            format = "gguf"
        "#;

        let template: Template = toml::from_str(toml_str).unwrap();
        assert!(!template.update_available);
        assert!(template.parameters.is_empty());
        assert_eq!(template.group, TemplateGroup::User);
    }

    #[test]
    fn test_group_and_category_serialize_lowercase() {
        let template = Template {
            id: "resnet".into(),
            name: "ResNet".into(),
            file_version: 1,
            group: TemplateGroup::Builtin,
            category: ModelCategory::Vision,
            model: ModelSpec {
                path: "/models/resnet.onnx".into(),
                labels: Some("/models/imagenet.txt".into()),
                format: "onnx".into(),
            },
            parameters: toml::Table::new(),
            update_available: false,
        };

        let serialized = toml::to_string(&template).unwrap();
        assert!(serialized.contains("group = \"builtin\""));
        assert!(serialized.contains("category = \"vision\""));
    }
}
