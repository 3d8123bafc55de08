//! Core API schema documents.
//!
//! The CloudLaunch API describes itself with a Core API JSON document served
//! at `{base_url}/schema/`. The document is a tree of objects whose leaves
//! are links; each link names the URL template, the HTTP method and the
//! parameters of one action. Actions are addressed by the keys leading to
//! their link, for example `["deployments", "tasks", "create"]`.
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::clients::{Document, FieldLocation, HttpMethod};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "_type": "document",
//!     "_meta": {"url": "http://localhost:8000/api/v1/schema/", "title": "CloudLaunch API"},
//!     "deployments": {
//!         "read": {
//!             "_type": "link",
//!             "url": "/api/v1/deployments/{id}/",
//!             "action": "get",
//!             "fields": [{"name": "id", "required": true, "location": "path"}]
//!         }
//!     }
//! });
//!
//! let document = Document::from_value(&schema).unwrap();
//! let link = document.lookup_link(&["deployments", "read"]).unwrap();
//! assert_eq!(link.action, HttpMethod::Get);
//! assert_eq!(link.fields[0].location, FieldLocation::Path);
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::errors::TransportError;
use super::http_request::HttpMethod;

/// Encoding used for form bodies when a link does not declare one.
pub const DEFAULT_ENCODING: &str = "application/json";

/// Where a link field is placed in the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldLocation {
    /// Interpolated into the URL template.
    Path,
    /// Appended to the query string.
    Query,
    /// One key of the request body.
    Form,
    /// The entire request body.
    Body,
    /// Not declared; the HTTP method decides.
    Unspecified,
}

impl FieldLocation {
    fn parse(location: &str) -> Self {
        match location {
            "path" => Self::Path,
            "query" => Self::Query,
            "form" => Self::Form,
            "body" => Self::Body,
            _ => Self::Unspecified,
        }
    }
}

/// A parameter declared by a [`Link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkField {
    /// Parameter name.
    pub name: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Where the parameter goes in the request.
    pub location: FieldLocation,
}

/// One action described by the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// URL template, relative to the document URL, with `{name}` placeholders.
    pub url: String,
    /// HTTP method.
    pub action: HttpMethod,
    /// Content type for form bodies.
    pub encoding: String,
    /// Declared parameters.
    pub fields: Vec<LinkField>,
}

impl Link {
    /// Returns the declared field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&LinkField> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, TransportError> {
        let url = map
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let action = match map.get("action").and_then(Value::as_str) {
            Some(action) if !action.is_empty() => action
                .parse()
                .map_err(|reason| TransportError::Decode(format!("link '{url}': {reason}")))?,
            _ => HttpMethod::Get,
        };
        let encoding = map
            .get("encoding")
            .and_then(Value::as_str)
            .filter(|encoding| !encoding.is_empty())
            .unwrap_or(DEFAULT_ENCODING)
            .to_string();
        let fields = map
            .get("fields")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(parse_field).collect())
            .unwrap_or_default();

        Ok(Self {
            url,
            action,
            encoding,
            fields,
        })
    }
}

fn parse_field(value: &Value) -> Option<LinkField> {
    let field = value.as_object()?;
    Some(LinkField {
        name: field.get("name")?.as_str()?.to_string(),
        required: field
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        location: FieldLocation::parse(
            field
                .get("location")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        ),
    })
}

/// A node of the schema tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A nested group of nodes.
    Object(BTreeMap<String, Node>),
    /// An action.
    Link(Link),
}

/// A parsed Core API schema document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    url: Option<String>,
    title: String,
    content: BTreeMap<String, Node>,
}

impl Document {
    /// Creates a document from its parts.
    #[must_use]
    pub fn new(url: Option<String>, content: BTreeMap<String, Node>) -> Self {
        Self {
            url,
            title: String::new(),
            content,
        }
    }

    /// Parses a Core API JSON document.
    ///
    /// Keys starting with `_` are metadata and skipped. Values that are
    /// neither links nor objects carry no actions and are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] if `value` is not a document or a
    /// link declares an unsupported HTTP method.
    pub fn from_value(value: &Value) -> Result<Self, TransportError> {
        let map = value
            .as_object()
            .filter(|map| node_type(map) == Some("document"))
            .ok_or_else(|| TransportError::Decode("schema is not a Core API document".into()))?;

        let meta = map.get("_meta").and_then(Value::as_object);
        let meta_str = |key: &str| {
            meta.and_then(|meta| meta.get(key))
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        };

        Ok(Self {
            url: meta_str("url"),
            title: meta_str("title").unwrap_or_default(),
            content: parse_content(map)?,
        })
    }

    /// Returns the document URL, which link URLs are relative to.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Sets the document URL when the schema does not state one.
    pub fn set_url_if_missing(&mut self, url: impl Into<String>) {
        if self.url.is_none() {
            self.url = Some(url.into());
        }
    }

    /// Returns the document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the top-level nodes.
    #[must_use]
    pub const fn content(&self) -> &BTreeMap<String, Node> {
        &self.content
    }

    /// Walks `keys` through the document and returns the link at the end.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::LinkNotFound`] if a key is missing, or if
    /// the path ends anywhere other than at a link.
    pub fn lookup_link(&self, keys: &[&str]) -> Result<&Link, TransportError> {
        let not_found = |reason: String| TransportError::LinkNotFound {
            keys: keys.join("."),
            reason,
        };

        let mut nodes = &self.content;
        for (index, key) in keys.iter().enumerate() {
            match nodes.get(*key) {
                Some(Node::Object(children)) => nodes = children,
                Some(Node::Link(link)) if index + 1 == keys.len() => return Ok(link),
                Some(Node::Link(_)) => {
                    return Err(not_found(format!("'{key}' is a link, not a group")));
                }
                None => return Err(not_found(format!("key '{key}' not found"))),
            }
        }

        Err(not_found("keys do not reference a link".to_string()))
    }
}

fn node_type(map: &Map<String, Value>) -> Option<&str> {
    map.get("_type").and_then(Value::as_str)
}

fn parse_content(map: &Map<String, Value>) -> Result<BTreeMap<String, Node>, TransportError> {
    let mut content = BTreeMap::new();
    for (key, value) in map {
        if key.starts_with('_') {
            continue;
        }
        let Some(child) = value.as_object() else {
            continue;
        };
        let node = if node_type(child) == Some("link") {
            Node::Link(Link::from_map(child)?)
        } else {
            Node::Object(parse_content(child)?)
        };
        content.insert(key.clone(), node);
    }
    Ok(content)
}
