use serde::Deserialize;

use crate::structured_content::StructuredContent;

/// Single definition of a term.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Definition {
    /// Plain text definition.
    Text(String),
    /// Definition with a `type` discriminator.
    Detailed(Box<DetailedDefinition>),
    /// Deinflection of the term to an uninflected term.
    Deinflection(Deinflection),
    /// Anything else a dictionary may contain. Kept so one odd definition
    /// does not make the whole entry unreadable.
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DetailedDefinition {
    Text(TextDefinition),
    Image(ImageDefinition),
    StructuredContent(StructuredContentDefinition),
}

/// `[uninflected term, [inflection rules...]]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deinflection(pub String, pub Vec<String>);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextDefinition {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDefinition {
    /// Path to the image file in the dictionary archive.
    pub path: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Hover text for the image.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pixelated: bool,
    /// Supersedes `pixelated` when present.
    #[serde(default)]
    pub image_rendering: Option<String>,
    /// `"auto"` or `"monochrome"`.
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default = "default_true")]
    pub background: bool,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default = "default_true")]
    pub collapsible: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredContentDefinition {
    #[serde(alias = "structuredContent")]
    pub content: StructuredContent,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Definition {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_definition_shapes() {
        assert_eq!(parse(r#""to eat""#), Definition::Text("to eat".to_string()));

        assert!(matches!(
            parse(r#"{"type": "text", "text": "to eat"}"#),
            Definition::Detailed(detailed) if matches!(*detailed, DetailedDefinition::Text(_))
        ));

        assert_eq!(
            parse(r#"["食べる", ["passive", "negative"]]"#),
            Definition::Deinflection(Deinflection(
                "食べる".to_string(),
                vec!["passive".to_string(), "negative".to_string()]
            ))
        );

        assert!(matches!(
            parse(r#"{"type": "audio", "path": "a.mp3"}"#),
            Definition::Unrecognized(_)
        ));
    }

    #[test]
    fn test_structured_content_alias() {
        let definition = parse(r#"{"type": "structured-content", "structuredContent": "x"}"#);
        let Definition::Detailed(detailed) = definition else {
            panic!("expected detailed definition");
        };
        let DetailedDefinition::StructuredContent(structured) = *detailed else {
            panic!("expected structured content");
        };
        assert_eq!(structured.content, StructuredContent::from("x"));
    }

    #[test]
    fn test_image_definition_defaults() {
        let definition = parse(r#"{"type": "image", "path": "a.png"}"#);
        let Definition::Detailed(detailed) = definition else {
            panic!("expected detailed definition");
        };
        let DetailedDefinition::Image(image) = *detailed else {
            panic!("expected image");
        };
        assert!(image.background);
        assert!(image.collapsible);
        assert_eq!(image.appearance, None);
    }
}
