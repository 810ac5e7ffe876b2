use clap::Parser;
use rest_stub::config::cli::{parse_named_arg, Command};
use rest_stub::domain::model::{ParamBinding, RestMethodMetadata};
use rest_stub::utils::error::ErrorCategory;
use rest_stub::utils::{logger, validation::Validate};
use rest_stub::{
    ArgValue, ClientError, CliConfig, Decoded, Invocation, Result, ServiceClientStub,
    ServiceContext, ServiceDefinition,
};
use std::collections::HashMap;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!("{} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Invocation => 3,
            ErrorCategory::Network => 4,
            ErrorCategory::Data | ErrorCategory::Server => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> Result<()> {
    config.validate()?;

    let mut definition = ServiceDefinition::from_file(&config.definition)?;
    if let Some(url) = &config.url {
        definition.connection.url = url.clone();
    }
    definition.validate()?;
    let metadata = definition.to_metadata()?;
    tracing::info!(
        "Loaded service {} with {} methods",
        metadata.api(),
        definition.methods.len()
    );

    match config.command {
        Command::List => {
            for method in metadata.methods() {
                println!("{}", describe(method));
            }
            Ok(())
        }
        Command::Invoke {
            method,
            args,
            body,
            body_file,
        } => {
            let invocation = {
                let method = metadata.method(&method)?;
                build_invocation(method, &args, body, body_file)?
            };
            let context = ServiceContext::<()>::new(
                definition.service.name.clone(),
                definition.connection.clone(),
            );
            let stub = ServiceClientStub::connect(context, metadata)?;
            match stub.invoke(invocation).await? {
                Decoded::Empty => tracing::info!("Call completed without content"),
                Decoded::Text(text) => println!("{}", text),
                Decoded::Json(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            }
            Ok(())
        }
    }
}

fn describe(method: &RestMethodMetadata) -> String {
    let params: Vec<String> = method
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.binding))
        .collect();
    format!(
        "{} {} {} ({}) -> {:?}",
        method.name,
        method.http_method,
        method.path,
        params.join(", "),
        method.returns
    )
}

/// Orders the named CLI arguments by the method's parameter list.
fn build_invocation(
    method: &RestMethodMetadata,
    args: &[String],
    body: Option<String>,
    body_file: Option<PathBuf>,
) -> Result<Invocation> {
    let mut named: HashMap<String, ArgValue> = HashMap::new();
    for raw in args {
        let (name, value) = parse_named_arg(raw)?;
        named.insert(name, value);
    }

    let body_value = match (body, body_file) {
        (Some(text), _) => Some(ArgValue::from(serde_json::from_str::<serde_json::Value>(&text)?)),
        (None, Some(path)) => Some(ArgValue::File(path)),
        (None, None) => None,
    };
    if body_value.is_some() && method.parameters.body_parameter().is_none() {
        return Err(ClientError::InvalidArgument {
            name: "body".to_string(),
            reason: format!("{} takes no body parameter", method.name),
        });
    }

    let mut invocation = Invocation::new(method.name.clone());
    for param in method.parameters.iter() {
        let value = match (param.binding, &body_value) {
            (ParamBinding::Body, Some(value)) => value.clone(),
            _ => named.remove(&param.name).unwrap_or(ArgValue::Null),
        };
        invocation = invocation.arg(value);
    }

    if let Some(unknown) = named.keys().next() {
        return Err(ClientError::InvalidArgument {
            name: unknown.clone(),
            reason: format!("{} has no such parameter", method.name),
        });
    }
    Ok(invocation)
}
