//! HTTP request construction from schema links.
//!
//! This module turns a [`Link`] plus a parameter map into an
//! [`HttpRequest`]: it validates the parameters against the link's declared
//! fields, sorts them into path, query and body, and expands the URL template.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use url::Url;

use super::document::{FieldLocation, Link};
use super::errors::{ParameterError, TransportError, REQUIRED_PARAMETER, UNKNOWN_PARAMETER};
use super::transport::Params;

/// Encoding that sends form parameters as `application/x-www-form-urlencoded`.
pub const URL_ENCODED_FORM: &str = "application/x-www-form-urlencoded";

/// HTTP methods a schema link can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if undeclared parameters belong in the query string.
    #[must_use]
    pub const fn sends_params_in_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(format!("unsupported HTTP method '{s}'")),
        }
    }
}

/// Body of an [`HttpRequest`].
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document.
    Json(Value),
    /// URL-encoded form pairs.
    Form(Vec<(String, String)>),
}

/// A request ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// Absolute URL with path parameters expanded.
    pub url: Url,
    /// Query parameters to append to the URL.
    pub query: Vec<(String, String)>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Builds the request for `link`, resolving its URL against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Parameters`] if validation is requested and
    /// fails, or if a parameter cannot be encoded at its location.
    /// Returns [`TransportError::InvalidUrl`] if the expanded URL cannot be
    /// joined onto `base`.
    pub fn from_link(
        base: &Url,
        link: &Link,
        params: &Params,
        validate: bool,
    ) -> Result<Self, TransportError> {
        if validate {
            validate_parameters(link, params)?;
        }

        let mut errors = ParameterError::default();
        let mut path = BTreeMap::new();
        let mut query = Vec::new();
        let mut form = Map::new();
        let mut body = None;

        for (key, value) in params {
            let location = match link.field(key).map(|field| field.location) {
                Some(location) if location != FieldLocation::Unspecified => location,
                _ if link.action.sends_params_in_query() => FieldLocation::Query,
                _ => FieldLocation::Form,
            };

            match location {
                FieldLocation::Path => match path_param(value) {
                    Ok(value) => {
                        path.insert(key.as_str(), value);
                    }
                    Err(message) => errors.insert(key.as_str(), message),
                },
                FieldLocation::Query => match query_param(value) {
                    Ok(values) => query.extend(values.into_iter().map(|v| (key.clone(), v))),
                    Err(message) => errors.insert(key.as_str(), message),
                },
                FieldLocation::Body => body = Some(value.clone()),
                FieldLocation::Form | FieldLocation::Unspecified => {
                    form.insert(key.clone(), value.clone());
                }
            }
        }

        let body = match body {
            Some(body) => {
                if !form.is_empty() {
                    tracing::warn!(
                        "Ignoring form parameters {:?} for {}: a body parameter was given",
                        form.keys().collect::<Vec<_>>(),
                        link.url
                    );
                }
                Some(RequestBody::Json(body))
            }
            None if form.is_empty() => None,
            None if link.encoding == URL_ENCODED_FORM => {
                let mut pairs = Vec::new();
                for (key, value) in &form {
                    match query_param(value) {
                        Ok(values) => pairs.extend(values.into_iter().map(|v| (key.clone(), v))),
                        Err(message) => errors.insert(key.as_str(), message),
                    }
                }
                Some(RequestBody::Form(pairs))
            }
            None => Some(RequestBody::Json(Value::Object(form))),
        };

        errors.into_result()?;

        let expanded = expand_template(&link.url, &path);
        let url = base
            .join(&expanded)
            .map_err(|e| TransportError::InvalidUrl {
                url: expanded.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            method: link.action,
            url,
            query,
            body,
        })
    }
}

/// Checks `params` against the fields `link` declares.
///
/// Every required field must be present and every parameter must be
/// declared. All problems are reported together.
///
/// # Errors
///
/// Returns a [`ParameterError`] naming each missing or unknown parameter.
pub fn validate_parameters(link: &Link, params: &Params) -> Result<(), ParameterError> {
    let mut errors = ParameterError::default();

    for field in link.fields.iter().filter(|field| field.required) {
        if !params.contains_key(&field.name) {
            errors.insert(field.name.as_str(), REQUIRED_PARAMETER);
        }
    }
    for key in params.keys() {
        if link.field(key).is_none() {
            errors.insert(key.as_str(), UNKNOWN_PARAMETER);
        }
    }

    errors.into_result()
}

/// Expands `{name}` placeholders with percent-encoded values.
///
/// Placeholders without a value expand to nothing.
#[must_use]
pub fn expand_template(template: &str, values: &BTreeMap<&str, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let name = &rest[start + 1..start + len];
        if let Some(value) = values.get(name) {
            result.push_str(&urlencoding::encode(value));
        }
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);

    result
}

fn primitive(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn path_param(value: &Value) -> Result<String, &'static str> {
    match primitive(value) {
        Some(value) if value.is_empty() => Err("May not be empty."),
        Some(value) => Ok(value),
        None => Err("Must be a primitive type."),
    }
}

fn query_param(value: &Value) -> Result<Vec<String>, &'static str> {
    const MESSAGE: &str = "Must be a primitive type or list of primitives.";
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| primitive(item).ok_or(MESSAGE))
            .collect(),
        other => primitive(other).map(|value| vec![value]).ok_or(MESSAGE),
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpMethod>();
    assert_send_sync::<HttpRequest>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::document::LinkField;
    use serde_json::json;

    fn field(name: &str, required: bool, location: FieldLocation) -> LinkField {
        LinkField {
            name: name.to_string(),
            required,
            location,
        }
    }

    fn link(url: &str, action: HttpMethod, fields: Vec<LinkField>) -> Link {
        Link {
            url: url.to_string(),
            action,
            encoding: "application/json".to_string(),
            fields,
        }
    }

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    fn base() -> Url {
        Url::parse("http://localhost:8000/api/v1/schema/").unwrap()
    }

    #[test]
    fn test_http_method_parses_case_insensitively() {
        assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("patch".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert!("options".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_validation_reports_missing_and_unknown_together() {
        let link = link(
            "/api/v1/deployments/{id}/",
            HttpMethod::Get,
            vec![field("id", true, FieldLocation::Path)],
        );
        let error = validate_parameters(&link, &params(json!({"colour": "blue"}))).unwrap_err();
        assert_eq!(error.errors["id"], REQUIRED_PARAMETER);
        assert_eq!(error.errors["colour"], UNKNOWN_PARAMETER);
    }

    #[test]
    fn test_path_params_are_percent_encoded() {
        let link = link(
            "/api/v1/infrastructure/clouds/{slug}/",
            HttpMethod::Get,
            vec![field("slug", true, FieldLocation::Path)],
        );
        let request =
            HttpRequest::from_link(&base(), &link, &params(json!({"slug": "a b/c"})), true)
                .unwrap();
        assert_eq!(
            request.url.as_str(),
            "http://localhost:8000/api/v1/infrastructure/clouds/a%20b%2Fc/"
        );
    }

    #[test]
    fn test_empty_path_param_is_rejected() {
        let link = link(
            "/api/v1/deployments/{id}/",
            HttpMethod::Delete,
            vec![field("id", true, FieldLocation::Path)],
        );
        let result = HttpRequest::from_link(&base(), &link, &params(json!({"id": ""})), true);
        assert!(matches!(result, Err(TransportError::Parameters(_))));
    }

    #[test]
    fn test_undeclared_params_go_to_query_for_get() {
        let link = link("/api/v1/deployments/", HttpMethod::Get, vec![]);
        let request = HttpRequest::from_link(
            &base(),
            &link,
            &params(json!({"archived": true, "status": ["a", "b"]})),
            false,
        )
        .unwrap();
        assert_eq!(
            request.query,
            vec![
                ("archived".to_string(), "true".to_string()),
                ("status".to_string(), "a".to_string()),
                ("status".to_string(), "b".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_undeclared_params_go_to_form_for_put() {
        let link = link(
            "/api/v1/deployments/{id}/",
            HttpMethod::Put,
            vec![field("id", true, FieldLocation::Path)],
        );
        let request = HttpRequest::from_link(
            &base(),
            &link,
            &params(json!({"id": 7, "archived": true, "name": "x"})),
            false,
        )
        .unwrap();
        assert_eq!(request.url.path(), "/api/v1/deployments/7/");
        assert!(request.query.is_empty());
        assert_eq!(
            request.body,
            Some(RequestBody::Json(json!({"archived": true, "name": "x"})))
        );
    }

    #[test]
    fn test_body_location_becomes_whole_body() {
        let link = link(
            "/api/v1/things/",
            HttpMethod::Post,
            vec![field("data", true, FieldLocation::Body)],
        );
        let request =
            HttpRequest::from_link(&base(), &link, &params(json!({"data": [1, 2]})), true)
                .unwrap();
        assert_eq!(request.body, Some(RequestBody::Json(json!([1, 2]))));
    }

    #[test]
    fn test_url_encoded_form_encoding() {
        let mut link = link(
            "/api/v1/things/",
            HttpMethod::Post,
            vec![field("name", true, FieldLocation::Form)],
        );
        link.encoding = URL_ENCODED_FORM.to_string();
        let request =
            HttpRequest::from_link(&base(), &link, &params(json!({"name": "x"})), true).unwrap();
        assert_eq!(
            request.body,
            Some(RequestBody::Form(vec![("name".to_string(), "x".to_string())]))
        );
    }

    #[test]
    fn test_object_query_param_is_rejected() {
        let link = link("/api/v1/deployments/", HttpMethod::Get, vec![]);
        let result =
            HttpRequest::from_link(&base(), &link, &params(json!({"filter": {"a": 1}})), false);
        let Err(TransportError::Parameters(error)) = result else {
            panic!("expected parameter error");
        };
        assert!(error.errors.contains_key("filter"));
    }

    #[test]
    fn test_expand_template_drops_missing_placeholders() {
        let mut values = BTreeMap::new();
        values.insert("deployment_pk", "12".to_string());
        assert_eq!(
            expand_template("/deployments/{deployment_pk}/tasks/{id}/", &values),
            "/deployments/12/tasks//"
        );
    }

    #[test]
    fn test_absolute_link_url_replaces_base() {
        let link = link("https://other.example.org/api/v1/x/", HttpMethod::Get, vec![]);
        let request = HttpRequest::from_link(&base(), &link, &Params::new(), true).unwrap();
        assert_eq!(request.url.as_str(), "https://other.example.org/api/v1/x/");
    }
}
