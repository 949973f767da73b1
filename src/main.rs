use clap::{value_parser, Arg, ArgAction, Command};

mod commands;
mod config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("TOML configuration file");

    Command::new("snsguard")
        .version(VERSION)
        .about("Authenticating webhook endpoint for SNS push notifications")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("serve")
                .about("Run the webhook endpoint")
                .arg(config_arg.clone())
                .arg(
                    Arg::new("topic-arn")
                        .short('t')
                        .long("topic-arn")
                        .value_name("ARN")
                        .help("Only accept messages published to this topic"),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Host address to bind to"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(value_parser!(u16))
                        .help("Port to bind the server to"),
                )
                .arg(
                    Arg::new("path")
                        .long("path")
                        .value_name("PATH")
                        .help("Route the provider delivers to"),
                ),
        )
        .subcommand(
            Command::new("check-cert-url")
                .about("Check a signing-certificate URL against the origin policy")
                .arg(
                    Arg::new("url")
                        .value_name("URL")
                        .required(true)
                        .help("Certificate URL to check"),
                )
                .arg(config_arg),
        )
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let result = match matches.subcommand() {
        Some(("serve", sub_matches)) => commands::serve::run(sub_matches),
        Some(("check-cert-url", sub_matches)) => commands::check_cert_url::run(sub_matches),
        _ => {
            println!("snsguard v{}", VERSION);
            println!("Use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
