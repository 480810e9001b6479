use clap::{Parser, ValueEnum};
use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use serde_json::json;

#[derive(Parser)]
#[command(name = "enforce-probe")]
#[command(about = "Send one request to an HTTPS-enforcing server and report the outcome", long_about = None)]
struct Cli {
    /// Target URL, e.g. http://localhost:8087/ssl
    url: String,

    #[arg(short, long, value_enum, default_value_t = ProbeMethod::Get)]
    method: ProbeMethod,

    /// Value sent as X-Forwarded-Proto.
    #[arg(short = 'p', long)]
    forwarded_proto: Option<String>,

    /// Form field sent with POST, as key=value. Repeatable.
    #[arg(short, long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Follow redirects instead of reporting the first response.
    #[arg(short = 'L', long)]
    follow: bool,

    /// Accept self-signed certificates on the HTTPS side.
    #[arg(short = 'k', long)]
    insecure: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProbeMethod {
    Get,
    Head,
    Post,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .redirect(if cli.follow { Policy::limited(10) } else { Policy::none() })
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;

    let mut headers = HeaderMap::new();
    if let Some(proto) = &cli.forwarded_proto {
        headers.insert("x-forwarded-proto", HeaderValue::from_str(proto)?);
    }

    let request = match cli.method {
        ProbeMethod::Get => client.get(&cli.url),
        ProbeMethod::Head => client.head(&cli.url),
        ProbeMethod::Post => client.post(&cli.url).form(&cli.fields),
    };

    let res = request.headers(headers).send().await?;

    let status = res.status();
    let final_url = res.url().to_string();
    let location = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = res.text().await?;

    let report = json!({
        "status": status.as_u16(),
        "final_url": final_url,
        "location": location,
        "body": body,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if status.is_client_error() || status.is_server_error() {
        std::process::exit(1);
    }
    Ok(())
}
