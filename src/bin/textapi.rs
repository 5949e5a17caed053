//! textapi: command-line front end for the Text Analysis API
//!
//! Usage:
//!   textapi <operation> [VALUE] [--param key=value]... [--list key=a,b]... [--lenient]
//!   textapi endpoints                 List supported operations
//!   textapi rate-limits               Show the current quota
//!   textapi version                   Show version information

use anyhow::{bail, Context};
use aylien_textapi::{Config, Endpoint, Input, Params, TextApiClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "endpoints" => {
            cmd_endpoints();
            Ok(())
        }
        "rate-limits" => cmd_rate_limits(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        operation => cmd_call(operation, &args[2..]).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"textapi: Text Analysis API command-line client

USAGE:
    textapi <OPERATION> [VALUE] [OPTIONS]
    textapi <COMMAND>

OPERATIONS:
    extract, classify, classify_by_taxonomy, concepts, hashtags, entities,
    language, sentiment, summarize, related, microformats,
    unsupervised_classify, combined, image_tags

OPTIONS:
    --param key=value           Add a request parameter (repeatable)
    --list key=a,b,c            Add a list parameter (repeatable)
    --lenient                   Print null instead of failing on remote errors
    --config <file.yaml>        Load app_id/app_key/base_uri/method/user_agent

COMMANDS:
    endpoints                   List supported operations and their paths
    rate-limits                 Show the current rate-limit quota
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    TEXTAPI_APP_ID, TEXTAPI_APP_KEY, TEXTAPI_BASE_URI, TEXTAPI_METHOD,
    TEXTAPI_USER_AGENT          Client settings (overridden by --config)
    RUST_LOG                    Log filter, e.g. aylien_textapi=debug"#
    );
}

fn cmd_version() {
    println!("textapi {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_endpoints() {
    for ep in Endpoint::ALL {
        println!("{:<24} {}", ep.name(), ep.path_template());
    }
}

struct CallArgs {
    value: Option<String>,
    params: Params,
    lenient: bool,
    config: Option<String>,
}

fn parse_call_args(args: &[String]) -> anyhow::Result<CallArgs> {
    let mut out = CallArgs {
        value: None,
        params: Params::new(),
        lenient: false,
        config: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lenient" => out.lenient = true,
            "--config" => {
                let path = iter.next().context("--config needs a file path")?;
                out.config = Some(path.clone());
            }
            "--param" => {
                let kv = iter.next().context("--param needs key=value")?;
                let (k, v) = kv
                    .split_once('=')
                    .with_context(|| format!("expected key=value, got '{kv}'"))?;
                out.params.insert(k, v);
            }
            "--list" => {
                let kv = iter.next().context("--list needs key=a,b")?;
                let (k, v) = kv
                    .split_once('=')
                    .with_context(|| format!("expected key=a,b, got '{kv}'"))?;
                let items: Vec<String> = v
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                out.params.insert(k, items);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            value => {
                if out.value.is_some() {
                    bail!("only one positional VALUE is accepted");
                }
                out.value = Some(value.to_string());
            }
        }
    }
    Ok(out)
}

fn build_client(config_path: Option<&str>) -> anyhow::Result<aylien_textapi::TextApiClient> {
    let mut builder = TextApiClientBuilder::from_env()?;
    if let Some(path) = config_path {
        let cfg = Config::from_yaml_file(path)
            .with_context(|| format!("loading configuration from {path}"))?;
        builder = builder.config(cfg);
    }
    Ok(builder.build()?)
}

async fn cmd_call(operation: &str, args: &[String]) -> anyhow::Result<()> {
    let endpoint: Endpoint = operation.parse()?;
    let call = parse_call_args(args)?;
    let client = build_client(call.config.as_deref())?;

    let input = match call.value {
        Some(v) => Input::ValueWithParams(v, call.params),
        None => Input::Params(call.params),
    };

    let output = if call.lenient {
        client
            .call_lenient(endpoint, input)
            .await?
            .unwrap_or(serde_json::Value::Null)
    } else {
        client.call(endpoint, input).await?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn cmd_rate_limits(args: &[String]) -> anyhow::Result<()> {
    let call = parse_call_args(args)?;
    let client = build_client(call.config.as_deref())?;
    match client.rate_limits().await? {
        Some(rl) => println!("{}", serde_json::to_string_pretty(&rl)?),
        None => println!("no rate-limit information reported by the service"),
    }
    Ok(())
}
