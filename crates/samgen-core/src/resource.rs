//! Typed resource declarations and their rendering.
//!
//! Synthesizers build a [`ResourceDocument`] out of [`Resource`] nodes and
//! render it once. Nesting depth decides indentation, so a property can only
//! ever land at the level its position in the tree dictates.
//!
//! ```
//! use samgen_core::resource::{Resource, ResourceDocument};
//!
//! let mut doc = ResourceDocument::new();
//! doc.push(
//!     Resource::new("MyIPFunction", "AWS::Serverless::Function")
//!         .property("FunctionName", "nway-MyIP"),
//! );
//! assert_eq!(
//!     doc.render(),
//!     "\n\n  MyIPFunction:\n    Type: AWS::Serverless::Function\n    Properties:\n      FunctionName: nway-MyIP\n\n"
//! );
//! ```

use crate::utils::indent;

/// Indentation level of a resource's logical id inside the `Resources` section
const RESOURCE_LEVEL: usize = 1;

/// A property value: either a scalar written after `key: `, or a nested map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    Map(Vec<(String, Node)>),
}

impl Node {
    /// Build a nested map node from key/value pairs
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn render_into(&self, key: &str, level: usize, out: &mut String) {
        match self {
            Node::Scalar(value) => {
                out.push_str(&indent(level, &format!("{key}: {value}")));
                out.push('\n');
            }
            Node::Map(entries) => {
                out.push_str(&indent(level, &format!("{key}:")));
                out.push('\n');
                for (child_key, child) in entries {
                    child.render_into(child_key, level + 1, out);
                }
            }
        }
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.to_string())
    }
}

/// One infrastructure declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Logical id, the key under `Resources`
    pub logical_id: String,
    /// Resource type, e.g. `AWS::Lambda::Version`
    pub resource_type: String,
    /// Ordered properties
    pub properties: Vec<(String, Node)>,
    /// Logical ids this resource waits on
    pub depends_on: Vec<String>,
}

impl Resource {
    pub fn new(logical_id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            resource_type: resource_type.into(),
            properties: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    /// Append a property
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Append a dependency on another logical id
    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    /// Look up a top-level scalar property
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.properties.iter().find_map(|(k, v)| match v {
            Node::Scalar(s) if k == key => Some(s.as_str()),
            _ => None,
        })
    }

    fn render_into(&self, out: &mut String) {
        out.push('\n');
        out.push_str(&indent(RESOURCE_LEVEL, &format!("{}:", self.logical_id)));
        out.push('\n');
        Node::from(self.resource_type.as_str()).render_into("Type", RESOURCE_LEVEL + 1, out);
        Node::Map(self.properties.clone()).render_into("Properties", RESOURCE_LEVEL + 1, out);
        if !self.depends_on.is_empty() {
            out.push_str(&indent(RESOURCE_LEVEL + 1, "DependsOn:"));
            out.push('\n');
            for dep in &self.depends_on {
                out.push_str(&indent(RESOURCE_LEVEL + 2, &format!("- {dep}")));
                out.push('\n');
            }
        }
        out.push('\n');
    }
}

/// Ordered set of declarations, rendered as a fragment of a `Resources` map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDocument {
    resources: Vec<Resource>,
}

impl ResourceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Find a declaration by logical id
    pub fn get(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }

    /// Serialize the document.
    ///
    /// Output starts with a newline so it can follow a marker comment on the
    /// placeholder line, and every declaration is surrounded by blank lines.
    pub fn render(&self) -> String {
        let mut out = String::from("\n");
        for resource in &self.resources {
            resource.render_into(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_map() {
        let resource = Resource::new("CheckStatusAPIMethod", "AWS::ApiGateway::Method")
            .property("HttpMethod", "POST")
            .property("Integration", Node::map([("Type", "AWS_PROXY")]));
        let mut doc = ResourceDocument::new();
        doc.push(resource);

        let expected = "\n\n  CheckStatusAPIMethod:\n    Type: AWS::ApiGateway::Method\n    Properties:\n      HttpMethod: POST\n      Integration:\n        Type: AWS_PROXY\n\n";
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn test_render_depends_on() {
        let resource = Resource::new("ProdDeployment", "AWS::ApiGateway::Deployment")
            .property("RestApiId", "!Ref nWAYApi")
            .depends_on("AAPIMethod")
            .depends_on("BAPIMethod");
        let mut doc = ResourceDocument::new();
        doc.push(resource);

        let expected = "\n\n  ProdDeployment:\n    Type: AWS::ApiGateway::Deployment\n    Properties:\n      RestApiId: !Ref nWAYApi\n    DependsOn:\n      - AAPIMethod\n      - BAPIMethod\n\n";
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn test_empty_document() {
        let doc = ResourceDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.render(), "\n");
    }

    #[test]
    fn test_lookup() {
        let mut doc = ResourceDocument::new();
        doc.push(Resource::new("X", "T").property("Name", "staging"));
        assert_eq!(doc.get("X").and_then(|r| r.scalar("Name")), Some("staging"));
        assert!(doc.get("Y").is_none());
    }
}
