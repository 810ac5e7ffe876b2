use crate::config::service::ServiceConfig;
use crate::core::path::PathTemplate;
use crate::domain::model::{
    HttpMethod, ParamBinding, RestMethodMetadata, RestServiceMetadata, ReturnType,
};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique_names, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A service API described in TOML: connection settings plus the metadata of
/// every method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub service: ServiceInfo,
    pub connection: ServiceConfig,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub description: Option<String>,
    pub root_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub returns: ReturnType,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(default)]
    pub binding: ParamBinding,
}

impl ServiceDefinition {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ClientError::config(format!("env substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                format!("${{{}}}", var_name)
            })
        });

        Ok(result.to_string())
    }

    pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Builds the runtime metadata the client stubs work from.
    pub fn to_metadata(&self) -> Result<RestServiceMetadata> {
        let mut metadata = RestServiceMetadata::new(self.service.name.clone());
        if let Some(root) = &self.service.root_path {
            metadata = metadata.with_root_path(root)?;
        }
        for method in &self.methods {
            metadata.add_method(method.to_metadata()?)?;
        }
        Ok(metadata)
    }
}

impl MethodDefinition {
    pub fn to_metadata(&self) -> Result<RestMethodMetadata> {
        let http_method: HttpMethod = self.http_method.parse()?;
        let mut metadata =
            RestMethodMetadata::new(self.name.clone(), http_method, &self.path)?.returns(self.returns);
        for param in &self.parameters {
            metadata.parameters.push(param.name.clone(), param.binding)?;
        }
        Ok(metadata)
    }

    fn validate_bindings(&self) -> Result<()> {
        let template = PathTemplate::parse(&self.path)?;
        let field = format!("methods.{}.path", self.name);

        for variable in template.variables() {
            let bound = self
                .parameters
                .iter()
                .any(|p| p.binding == ParamBinding::Path && p.name == variable);
            if !bound {
                return Err(ClientError::InvalidConfigValueError {
                    field,
                    value: self.path.clone(),
                    reason: format!("Placeholder {{{}}} has no path parameter", variable),
                });
            }
        }

        for param in self.parameters.iter().filter(|p| p.binding == ParamBinding::Path) {
            if !template.variables().any(|v| v == param.name) {
                return Err(ClientError::InvalidConfigValueError {
                    field,
                    value: self.path.clone(),
                    reason: format!("Path parameter '{}' does not occur in the path", param.name),
                });
            }
        }

        let bodies = self
            .parameters
            .iter()
            .filter(|p| p.binding == ParamBinding::Body)
            .count();
        if bodies > 1 {
            return Err(ClientError::InvalidConfigValueError {
                field: format!("methods.{}.parameters", self.name),
                value: bodies.to_string(),
                reason: "A method can have at most one body parameter".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for ServiceDefinition {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;
        self.connection.validate()?;
        if let Some(root) = &self.service.root_path {
            PathTemplate::parse(root)?;
        }

        validate_unique_names("methods", self.methods.iter().map(|m| m.name.as_str()))?;
        for method in &self.methods {
            validate_non_empty_string("methods.name", &method.name)?;
            method.http_method.parse::<HttpMethod>()?;
            validate_unique_names(
                &format!("methods.{}.parameters", method.name),
                method.parameters.iter().map(|p| p.name.as_str()),
            )?;
            method.validate_bindings()?;
        }
        Ok(())
    }
}
