use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{API_TIMEOUT_VAR, API_URL_VAR};
use services::{ClientConfig, HttpPracticeApi, InMemoryPracticeApi, PracticeApi};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    api: Arc<dyn PracticeApi>,
    server_label: String,
}

impl UiApp for DesktopApp {
    fn api(&self) -> Arc<dyn PracticeApi> {
        Arc::clone(&self.api)
    }

    fn server_label(&self) -> String {
        self.server_label.clone()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    api_url: Option<String>,
    timeout_secs: Option<String>,
    demo: bool,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => parsed.api_url = Some(require_value(&mut args, "--api-url")?),
                "--timeout" => parsed.timeout_secs = Some(require_value(&mut args, "--timeout")?),
                "--demo" => parsed.demo = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    /// Environment first, flags on top.
    fn client_config(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let mut config = ClientConfig::from_env()?;
        if let Some(raw) = &self.api_url {
            config = config.with_base_url(raw)?;
        }
        if let Some(raw) = &self.timeout_secs {
            config = config.with_timeout_secs(raw)?;
        }
        Ok(config)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--timeout <secs>] [--demo]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url   practice server, default http://127.0.0.1:5000/");
    eprintln!("  --timeout   request timeout in seconds, default 10");
    eprintln!("  --demo      use built-in sample data instead of a server");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  {API_URL_VAR}, {API_TIMEOUT_VAR}, RUST_LOG");
}

fn build_app(args: &Args) -> Result<DesktopApp, Box<dyn std::error::Error>> {
    if args.demo {
        log::info!("running against built-in demo data");
        return Ok(DesktopApp {
            api: Arc::new(InMemoryPracticeApi::with_demo_data()),
            server_label: "Offline demo".to_string(),
        });
    }

    let config = args.client_config()?;
    log::info!(
        "using practice server {} (timeout {:?})",
        config.base_url(),
        config.timeout()
    );
    Ok(DesktopApp {
        api: Arc::new(HttpPracticeApi::new(&config)?),
        server_label: config.base_url().to_string(),
    })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).inspect_err(|_| print_usage())?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let app: Arc<dyn UiApp> = Arc::new(build_app(&args)?);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Lingua")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env is fine; real environment variables still apply.
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    if let Err(err) = run().await {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(raw.iter().map(ToString::to_string))
    }

    #[test]
    fn parses_flags() {
        let parsed = args(&["--api-url", "http://10.0.0.5:5000", "--timeout", "3", "--demo"])
            .unwrap();
        assert_eq!(parsed.api_url.as_deref(), Some("http://10.0.0.5:5000"));
        assert_eq!(parsed.timeout_secs.as_deref(), Some("3"));
        assert!(parsed.demo);
    }

    #[test]
    fn flag_without_value_is_an_error() {
        let err = args(&["--api-url"]).unwrap_err();
        assert_eq!(err.to_string(), "--api-url requires a value");
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(matches!(args(&["--db"]), Err(ArgsError::UnknownArg(arg)) if arg == "--db"));
    }

    #[test]
    fn demo_mode_needs_no_server_config() {
        let app = build_app(&Args {
            demo: true,
            ..Args::default()
        })
        .unwrap();
        assert_eq!(app.server_label(), "Offline demo");
    }
}
