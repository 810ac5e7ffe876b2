use crate::core::context::ServiceContext;
use crate::domain::invocation::{ArgValue, Invocation};
use crate::domain::model::{ParamBinding, RestMethodMetadata};
use crate::domain::ports::{RequestBody, RequestSpec};
use crate::utils::error::{ClientError, Result};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Turns a method call into the HTTP request that represents it.
pub fn build_request<S: ?Sized>(
    context: &ServiceContext<S>,
    method: &RestMethodMetadata,
    invocation: &Invocation,
) -> Result<RequestSpec> {
    let url = method.path.resolve(context.base_url(), method, invocation)?;

    let (body, content_type) = match method.parameters.body_parameter() {
        Some(param) => create_body(&param.name, invocation.parameter(param.index))?,
        None => (None, None),
    };

    let headers = method
        .parameters
        .by_binding(ParamBinding::Header)
        .filter_map(|p| {
            invocation
                .parameter(p.index)
                .as_param_string()
                .map(|v| (p.name.clone(), v))
        })
        .collect();

    Ok(RequestSpec {
        method: method.http_method.into(),
        url,
        headers,
        body,
        content_type,
    })
}

/// Scalars are sent as their text form without a content type, files as
/// octet stream, everything else as JSON.
fn create_body(
    name: &str,
    value: &ArgValue,
) -> Result<(Option<RequestBody>, Option<&'static str>)> {
    let (body, content_type) = match value {
        ArgValue::Null | ArgValue::Json(serde_json::Value::Null) => return Ok((None, None)),
        ArgValue::Text(_)
        | ArgValue::Number(_)
        | ArgValue::Bool(_)
        | ArgValue::Temporal(_)
        | ArgValue::Date(_) => (
            RequestBody::Text(value.as_param_string().unwrap_or_default()),
            None,
        ),
        ArgValue::File(path) => {
            if !path.is_file() {
                return Err(ClientError::InvalidArgument {
                    name: name.to_string(),
                    reason: format!("file not found: {}", path.display()),
                });
            }
            (RequestBody::File(path.clone()), Some(APPLICATION_OCTET_STREAM))
        }
        ArgValue::Json(json) => (
            RequestBody::Text(serde_json::to_string(json)?),
            Some(APPLICATION_JSON),
        ),
    };
    Ok((Some(body), content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::service::ServiceConfig;
    use crate::domain::model::HttpMethod;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn context() -> ServiceContext<()> {
        ServiceContext::new("PetApi", ServiceConfig::new("http://localhost:8080"))
    }

    fn update_method() -> RestMethodMetadata {
        RestMethodMetadata::new("update_pet", HttpMethod::Put, "/pets/{id}")
            .unwrap()
            .param("id", ParamBinding::Path)
            .unwrap()
            .param("X-Request-Id", ParamBinding::Header)
            .unwrap()
            .param("pet", ParamBinding::Body)
            .unwrap()
    }

    #[test]
    fn test_json_body() {
        let invocation = Invocation::new("update_pet")
            .arg(3u32)
            .arg("req-1")
            .arg(json!({"name": "Rex"}));
        let request = build_request(&context(), &update_method(), &invocation).unwrap();

        assert_eq!(request.method, reqwest::Method::PUT);
        assert_eq!(request.url, "http://localhost:8080/pets/3");
        assert_eq!(
            request.headers,
            vec![("X-Request-Id".to_string(), "req-1".to_string())]
        );
        assert_eq!(
            request.body,
            Some(RequestBody::Text(r#"{"name":"Rex"}"#.to_string()))
        );
        assert_eq!(request.content_type, Some(APPLICATION_JSON));
    }

    #[test]
    fn test_scalar_body_has_no_content_type() {
        let invocation = Invocation::new("update_pet").arg(3u32).arg(None::<String>).arg(12.5);
        let request = build_request(&context(), &update_method(), &invocation).unwrap();
        assert_eq!(request.body, Some(RequestBody::Text("12.5".to_string())));
        assert_eq!(request.content_type, None);
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_bool_and_temporal_bodies_are_text() {
        let cases: Vec<(ArgValue, &str)> = vec![
            (true.into(), "true"),
            (
                DateTime::parse_from_rfc3339("2024-05-01T10:30:00+02:00")
                    .unwrap()
                    .into(),
                "2024-05-01T10:30:00+02:00",
            ),
            (
                Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap().into(),
                "2024-05-01T08:30:00Z",
            ),
            (
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().into(),
                "2024-02-29",
            ),
        ];
        for (value, expected) in cases {
            let invocation = Invocation::new("update_pet")
                .arg(3u32)
                .arg(None::<String>)
                .arg(value);
            let request = build_request(&context(), &update_method(), &invocation).unwrap();
            assert_eq!(request.body, Some(RequestBody::Text(expected.to_string())));
            assert_eq!(request.content_type, None);
        }
    }

    #[test]
    fn test_null_body_is_omitted() {
        let invocation = Invocation::new("update_pet").arg(3u32);
        let request = build_request(&context(), &update_method(), &invocation).unwrap();
        assert_eq!(request.body, None);
        assert_eq!(request.content_type, None);
    }

    #[test]
    fn test_file_body() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"binary").unwrap();
        let invocation = Invocation::new("update_pet")
            .arg(3u32)
            .arg(None::<String>)
            .arg(file.path());
        let request = build_request(&context(), &update_method(), &invocation).unwrap();
        assert_eq!(request.body, Some(RequestBody::File(file.path().to_path_buf())));
        assert_eq!(request.content_type, Some(APPLICATION_OCTET_STREAM));
    }

    #[test]
    fn test_missing_file_is_invalid_argument() {
        let invocation = Invocation::new("update_pet")
            .arg(3u32)
            .arg(None::<String>)
            .arg(std::path::PathBuf::from("/definitely/not/here.bin"));
        match build_request(&context(), &update_method(), &invocation) {
            Err(ClientError::InvalidArgument { name, .. }) => assert_eq!(name, "pet"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
