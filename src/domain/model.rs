use crate::core::path::PathTemplate;
use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(ClientError::InvalidConfigValueError {
                field: "http_method".to_string(),
                value: other.to_string(),
                reason: "Unsupported HTTP method".to_string(),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Where an argument ends up in the request. Unbound parameters are the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamBinding {
    Path,
    Query,
    Header,
    #[default]
    Body,
}

impl fmt::Display for ParamBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamBinding::Path => "path",
            ParamBinding::Query => "query",
            ParamBinding::Header => "header",
            ParamBinding::Body => "body",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestParameter {
    pub name: String,
    pub index: usize,
    pub binding: ParamBinding,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestParameters {
    params: Vec<RestParameter>,
}

impl RestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter at the next argument index.
    pub fn push(&mut self, name: impl Into<String>, binding: ParamBinding) -> Result<()> {
        let name = name.into();
        if binding == ParamBinding::Body && self.body_parameter().is_some() {
            return Err(ClientError::InvalidConfigValueError {
                field: "parameters".to_string(),
                value: name,
                reason: "A method can have at most one body parameter".to_string(),
            });
        }
        let index = self.params.len();
        self.params.push(RestParameter {
            name,
            index,
            binding,
        });
        Ok(())
    }

    pub fn with(mut self, name: impl Into<String>, binding: ParamBinding) -> Result<Self> {
        self.push(name, binding)?;
        Ok(self)
    }

    pub fn body_parameter(&self) -> Option<&RestParameter> {
        self.params.iter().find(|p| p.binding == ParamBinding::Body)
    }

    pub fn path_parameter(&self, name: &str) -> Option<&RestParameter> {
        self.params
            .iter()
            .find(|p| p.binding == ParamBinding::Path && p.name == name)
    }

    pub fn by_binding(&self, binding: ParamBinding) -> impl Iterator<Item = &RestParameter> {
        self.params.iter().filter(move |p| p.binding == binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RestParameter> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    Void,
    Text,
    #[default]
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestMethodMetadata {
    pub name: String,
    pub http_method: HttpMethod,
    pub path: PathTemplate,
    pub parameters: RestParameters,
    pub returns: ReturnType,
}

impl RestMethodMetadata {
    pub fn new(name: impl Into<String>, http_method: HttpMethod, path: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            http_method,
            path: PathTemplate::parse(path)?,
            parameters: RestParameters::new(),
            returns: ReturnType::default(),
        })
    }

    pub fn param(mut self, name: impl Into<String>, binding: ParamBinding) -> Result<Self> {
        self.parameters.push(name, binding)?;
        Ok(self)
    }

    pub fn returns(mut self, returns: ReturnType) -> Self {
        self.returns = returns;
        self
    }
}

/// Metadata of all methods of one service API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServiceMetadata {
    api: String,
    root_path: PathTemplate,
    methods: Vec<RestMethodMetadata>,
}

impl RestServiceMetadata {
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            root_path: PathTemplate::default(),
            methods: Vec::new(),
        }
    }

    pub fn with_root_path(mut self, root_path: &str) -> Result<Self> {
        self.root_path = PathTemplate::parse(root_path)?;
        Ok(self)
    }

    /// Registers a method; its path is prefixed with the service root path.
    pub fn add_method(&mut self, mut method: RestMethodMetadata) -> Result<()> {
        if self.methods.iter().any(|m| m.name == method.name) {
            return Err(ClientError::InvalidConfigValueError {
                field: "methods".to_string(),
                value: method.name,
                reason: "Duplicate method name".to_string(),
            });
        }
        method.path = PathTemplate::join(&self.root_path, &method.path);
        self.methods.push(method);
        Ok(())
    }

    pub fn with_method(mut self, method: RestMethodMetadata) -> Result<Self> {
        self.add_method(method)?;
        Ok(self)
    }

    pub fn method(&self, name: &str) -> Result<&RestMethodMetadata> {
        self.methods
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ClientError::UnknownMethod {
                api: self.api.clone(),
                method: name.to_string(),
            })
    }

    pub fn methods(&self) -> impl Iterator<Item = &RestMethodMetadata> {
        self.methods.iter()
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    pub fn root_path(&self) -> &PathTemplate {
        &self.root_path
    }
}
