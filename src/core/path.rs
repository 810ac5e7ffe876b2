use crate::domain::invocation::Invocation;
use crate::domain::model::{ParamBinding, RestMethodMetadata};
use crate::utils::error::{ClientError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A JAX-RS style path template such as `/pets/{id}/toys/{toy: \d+}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Vec<Segment>>,
}

fn variable_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*(?::[^{}]*(?:\{[^{}]*\}[^{}]*)*)?\}")
            .expect("static path variable regex")
    })
}

impl PathTemplate {
    /// Variables are matched on the whole template first, so a regex like
    /// `{path: .+/.+}` may contain `/`.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        let mut last = 0;
        for caps in variable_regex().captures_iter(template) {
            let (start, end) = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
            Self::push_literal(template, &template[last..start], &mut current, &mut segments)?;
            current.push(Segment::Variable(caps[1].to_string()));
            last = end;
        }
        Self::push_literal(template, &template[last..], &mut current, &mut segments)?;
        if !current.is_empty() {
            segments.push(current);
        }
        Ok(Self { segments })
    }

    /// Appends literal text, closing the current segment at every `/`.
    fn push_literal(
        template: &str,
        text: &str,
        current: &mut Vec<Segment>,
        segments: &mut Vec<Vec<Segment>>,
    ) -> Result<()> {
        let mut pieces = text.split('/');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                current.push(Segment::Literal(Self::literal(template, first)?));
            }
        }
        for piece in pieces {
            if !current.is_empty() {
                segments.push(std::mem::take(current));
            }
            if !piece.is_empty() {
                current.push(Segment::Literal(Self::literal(template, piece)?));
            }
        }
        Ok(())
    }

    fn literal(template: &str, text: &str) -> Result<String> {
        if text.contains('{') || text.contains('}') {
            return Err(ClientError::InvalidConfigValueError {
                field: "path".to_string(),
                value: template.to_string(),
                reason: "Unbalanced braces in path template".to_string(),
            });
        }
        Ok(text.to_string())
    }

    /// Concatenates a service root path and a method path.
    pub fn join(root: &PathTemplate, path: &PathTemplate) -> PathTemplate {
        let mut segments = root.segments.clone();
        segments.extend(path.segments.iter().cloned());
        PathTemplate { segments }
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().flatten().filter_map(|s| match s {
            Segment::Variable(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Builds the request URL for `invocation`: base URL, path with every
    /// variable substituted, then the query parameters.
    pub fn resolve(
        &self,
        base_url: &str,
        method: &RestMethodMetadata,
        invocation: &Invocation,
    ) -> Result<String> {
        let mut url = Url::parse(base_url)?;

        let mut resolved = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let mut text = String::new();
            for part in segment {
                match part {
                    Segment::Literal(s) => text.push_str(s),
                    Segment::Variable(name) => {
                        text.push_str(&Self::path_value(name, method, invocation)?)
                    }
                }
            }
            resolved.push(text);
        }

        {
            let mut path =
                url.path_segments_mut()
                    .map_err(|_| ClientError::InvalidConfigValueError {
                        field: "url".to_string(),
                        value: base_url.to_string(),
                        reason: "URL cannot be used as a base".to_string(),
                    })?;
            path.pop_if_empty();
            for segment in &resolved {
                path.push(segment);
            }
        }

        let query: Vec<(String, String)> = method
            .parameters
            .by_binding(ParamBinding::Query)
            .filter_map(|p| {
                invocation
                    .parameter(p.index)
                    .as_param_string()
                    .map(|v| (p.name.clone(), v))
            })
            .collect();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url.into())
    }

    fn path_value(
        name: &str,
        method: &RestMethodMetadata,
        invocation: &Invocation,
    ) -> Result<String> {
        let missing = || ClientError::MissingArgument {
            method: method.name.clone(),
            name: name.to_string(),
            binding: ParamBinding::Path.to_string(),
        };
        let param = method.parameters.path_parameter(name).ok_or_else(missing)?;
        invocation
            .parameter(param.index)
            .as_param_string()
            .ok_or_else(missing)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            f.write_str("/")?;
            for part in segment {
                match part {
                    Segment::Literal(s) => f.write_str(s)?,
                    Segment::Variable(name) => write!(f, "{{{}}}", name)?,
                }
            }
        }
        Ok(())
    }
}
