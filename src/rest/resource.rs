//! The generic resource wrapper.
//!
//! A [`Resource`] wraps one JSON object returned by the CloudLaunch API.
//! Its fields are read and written through explicit accessors, nested
//! objects declared by the kind's data mappings are wrapped into child
//! resources, and an attached [`Endpoint`] lets the resource persist itself.
//!
//! # Data mappings
//!
//! When a resource is constructed, every field named in
//! [`ResourceKind::data_mappings`] whose value is an object (or a list of
//! objects) is replaced by a nested `Resource` of the mapped kind.
//! [`Resource::to_map`] unwraps them again, so constructing a resource and
//! converting it back yields the original data.
//!
//! # Example
//!
//! ```rust
//! use cloudlaunch::rest::{Resource, ResourceKind};
//! use serde_json::json;
//!
//! let data = json!({
//!     "id": 12,
//!     "name": "galaxy",
//!     "latest_task": {"id": 3, "action": "LAUNCH", "status": "SUCCESS"}
//! });
//!
//! let mut deployment = Resource::from_value(ResourceKind::Deployment, data.clone()).unwrap();
//! assert_eq!(deployment.nested("latest_task").unwrap().kind(), ResourceKind::Task);
//! assert_eq!(deployment.to_value(), data);
//!
//! deployment.set("archived", true).unwrap();
//! assert_eq!(deployment.value("archived").unwrap(), &json!(true));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::endpoint::Endpoint;
use super::errors::ResourceError;
use super::kind::ResourceKind;
use crate::clients::Params;

/// The identifier of a resource: a number or a slug.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// A numeric primary key.
    Number(i64),
    /// A string identifier such as a slug.
    Slug(String),
}

impl ResourceId {
    /// Reads an identifier from a JSON value.
    ///
    /// Returns `None` for anything other than an integer or a non-empty
    /// string.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) if !s.is_empty() => Some(Self::Slug(s.clone())),
            _ => None,
        }
    }

    /// Converts the identifier to a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Slug(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Slug(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Slug(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Slug(value)
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(value: &ResourceId) -> Self {
        value.clone()
    }
}

/// The value of one resource field.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// Plain JSON.
    Value(Value),
    /// A nested resource from a data mapping.
    Resource(Box<Resource>),
    /// A list of nested resources from a data mapping.
    Resources(Vec<Resource>),
}

impl Field {
    /// Wraps `value` into resources of `kind` when it is an object or a
    /// list of objects, and keeps it as plain JSON otherwise.
    fn mapped(kind: ResourceKind, value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Resource(Box::new(Resource::new(kind, map))),
            Value::Array(items) if items.iter().all(Value::is_object) => Self::Resources(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(Resource::new(kind, map)),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Self::Value(other),
        }
    }

    /// Converts the field back to plain JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Resource(resource) => resource.to_value(),
            Self::Resources(resources) => {
                Value::Array(resources.iter().map(Resource::to_value).collect())
            }
        }
    }
}

/// A CloudLaunch API object.
///
/// The identifier is read from the kind's identifier field when the
/// resource is constructed and cannot be changed afterwards. All other
/// fields are mutable with [`Resource::set`].
///
/// The attached update endpoint is not part of the resource's data: it is
/// skipped by [`Resource::to_map`] and by equality.
#[derive(Clone, Debug)]
pub struct Resource {
    kind: ResourceKind,
    id: Option<ResourceId>,
    data: BTreeMap<String, Field>,
    update_endpoint: Option<Endpoint>,
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.id == other.id && self.data == other.data
    }
}

impl Resource {
    /// Creates a resource of `kind` from a JSON object, applying the
    /// kind's data mappings.
    #[must_use]
    pub fn new(kind: ResourceKind, data: Map<String, Value>) -> Self {
        let id = data.get(kind.id_field()).and_then(ResourceId::from_value);
        let data = data
            .into_iter()
            .map(|(name, value)| {
                let field = match kind.mapping_for(&name) {
                    Some(mapped) => Field::mapped(mapped, value),
                    None => Field::Value(value),
                };
                (name, field)
            })
            .collect();

        Self {
            kind,
            id,
            data,
            update_endpoint: None,
        }
    }

    /// Creates a resource of `kind` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedResponse`] if `value` is not an
    /// object.
    pub fn from_value(kind: ResourceKind, value: Value) -> Result<Self, ResourceError> {
        match value {
            Value::Object(map) => Ok(Self::new(kind, map)),
            other => Err(ResourceError::MalformedResponse(format!(
                "expected a {kind} object, got {other}"
            ))),
        }
    }

    /// Returns the resource kind.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the identifier, fixed at construction.
    #[must_use]
    pub const fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    /// Returns `true` if the data contains `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Returns the field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Returns the field `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldNotFound`] if the field is absent.
    pub fn get(&self, name: &str) -> Result<&Field, ResourceError> {
        self.data
            .get(name)
            .ok_or_else(|| ResourceError::FieldNotFound {
                resource: self.kind.name(),
                field: name.to_string(),
            })
    }

    /// Returns the plain JSON value of field `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldNotFound`] if the field is absent, or
    /// [`ResourceError::FieldType`] if it holds nested resources.
    pub fn value(&self, name: &str) -> Result<&Value, ResourceError> {
        match self.get(name)? {
            Field::Value(value) => Ok(value),
            Field::Resource(_) | Field::Resources(_) => Err(ResourceError::FieldType {
                resource: self.kind.name(),
                field: name.to_string(),
                reason: "field holds nested resources".to_string(),
            }),
        }
    }

    /// Returns field `name` if it is a non-empty string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.value(name).ok().and_then(Value::as_str)
    }

    /// Returns the nested resource in field `name`, if it holds one.
    #[must_use]
    pub fn nested(&self, name: &str) -> Option<&Self> {
        match self.data.get(name) {
            Some(Field::Resource(resource)) => Some(resource.as_ref()),
            _ => None,
        }
    }

    /// Returns the nested resources in field `name`, if it holds a list.
    #[must_use]
    pub fn nested_list(&self, name: &str) -> Option<&[Self]> {
        match self.data.get(name) {
            Some(Field::Resources(resources)) => Some(resources.as_slice()),
            _ => None,
        }
    }

    /// Deserializes field `name` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldNotFound`] if the field is absent, or
    /// [`ResourceError::FieldType`] if it does not deserialize into `T`.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, ResourceError> {
        let value = self.get(name)?.to_value();
        serde_json::from_value(value).map_err(|e| ResourceError::FieldType {
            resource: self.kind.name(),
            field: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sets field `name`, wrapping the value if the field is data mapped.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ImmutableIdentifier`] for the identifier
    /// field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ResourceError> {
        let id_field = self.kind.id_field();
        if name == id_field {
            return Err(ResourceError::ImmutableIdentifier {
                resource: self.kind.name(),
                field: id_field,
            });
        }

        let value = value.into();
        let field = match self.kind.mapping_for(name) {
            Some(mapped) => Field::mapped(mapped, value),
            None => Field::Value(value),
        };
        self.data.insert(name.to_string(), field);
        Ok(())
    }

    /// Converts the resource back to a plain JSON object, unwrapping nested
    /// resources.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        self.data
            .iter()
            .map(|(name, field)| (name.clone(), field.to_value()))
            .collect()
    }

    /// Converts the resource back to a plain JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Returns the endpoint this resource persists through.
    #[must_use]
    pub const fn update_endpoint(&self) -> Option<&Endpoint> {
        self.update_endpoint.as_ref()
    }

    /// Attaches the endpoint used by [`update`](Self::update),
    /// [`partial_update`](Self::partial_update) and [`delete`](Self::delete).
    ///
    /// Nested resources from data mappings get the matching subroute of
    /// `endpoint` scoped to this resource's id, when there is one.
    pub fn register_update_endpoint(&mut self, endpoint: Endpoint) {
        for (name, kind) in self.kind.data_mappings() {
            let Some(field) = self.data.get_mut(*name) else {
                continue;
            };
            let Some(child) = endpoint.subroute_for(*kind, self.id.clone()) else {
                continue;
            };
            match field {
                Field::Resource(resource) => resource.register_update_endpoint(child),
                Field::Resources(resources) => {
                    for resource in resources {
                        resource.register_update_endpoint(child.clone());
                    }
                }
                Field::Value(_) => {}
            }
        }
        self.update_endpoint = Some(endpoint);
    }

    /// Returns the named subroute of the update endpoint, scoped to this
    /// resource.
    #[must_use]
    pub fn subroute(&self, name: &str) -> Option<Endpoint> {
        self.update_endpoint
            .as_ref()?
            .subroute(name, self.id.clone())
    }

    /// Returns the subroute of the update endpoint serving `kind`, scoped
    /// to this resource.
    #[must_use]
    pub fn subroute_for(&self, kind: ResourceKind) -> Option<Endpoint> {
        self.update_endpoint
            .as_ref()?
            .subroute_for(kind, self.id.clone())
    }

    /// Saves the current state overlaid with `params`.
    ///
    /// The full current data (including local changes made with
    /// [`set`](Self::set)) is sent without the identifier field, and the
    /// response replaces this resource's data.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoEndpoint`] if no endpoint is attached,
    /// [`ResourceError::MissingIdentifier`] if the resource has no id, or
    /// whatever the endpoint call fails with.
    pub async fn update(&mut self, params: Params) -> Result<&Self, ResourceError> {
        let (endpoint, id) = self.persistence("update")?;

        let mut data = self.to_map();
        data.extend(params);
        data.remove(self.kind.id_field());

        let response = endpoint.update(id, data).await?;
        self.data = response.data;
        Ok(self)
    }

    /// Sends only `params` and replaces this resource's data with the
    /// response.
    ///
    /// Local changes made with [`set`](Self::set) are not sent.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn partial_update(&mut self, params: Params) -> Result<&Self, ResourceError> {
        let (endpoint, id) = self.persistence("partial_update")?;

        let response = endpoint.partial_update(id, params).await?;
        self.data = response.data;
        Ok(self)
    }

    /// Deletes this resource on the server.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn delete(&self) -> Result<(), ResourceError> {
        let (endpoint, id) = self.persistence("delete")?;
        endpoint.delete(id).await
    }

    fn persistence(&self, operation: &'static str) -> Result<(Endpoint, ResourceId), ResourceError> {
        let endpoint = self
            .update_endpoint
            .clone()
            .ok_or(ResourceError::NoEndpoint {
                operation,
                resource: self.kind.name(),
            })?;
        let id = self.id.clone().ok_or(ResourceError::MissingIdentifier {
            resource: self.kind.name(),
            field: self.kind.id_field(),
        })?;
        Ok((endpoint, id))
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
