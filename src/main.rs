use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use index_template_probe::config::{DEFAULT_SERVICE, ENDPOINT_VAR, REGION_VAR, SERVICE_VAR};
use index_template_probe::{APP_NAME, Config, probe_index_templates_with_config, set_up_logger};
use log::debug;

#[derive(Debug)]
struct Args {
    verbose: bool,
    endpoint: Option<String>,
    region: Option<String>,
    service: String,
}

fn parse_args() -> Args {
    let matches = Command::new("index-template-probe")
        .version("0.1")
        .author("Jacob Luszcz")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Verbose mode. Outputs DEBUG and higher log messages."),
        )
        .arg(
            Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .env(ENDPOINT_VAR)
                .help("OpenSearch domain endpoint, as host or host:port."),
        )
        .arg(
            Arg::new("region")
                .short('r')
                .long("region")
                .env(REGION_VAR)
                .help("AWS region used to sign requests."),
        )
        .arg(
            Arg::new("service")
                .short('s')
                .long("service")
                .env(SERVICE_VAR)
                .default_value(DEFAULT_SERVICE)
                .help("Signing service name."),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let endpoint = matches.get_one::<String>("endpoint").cloned();
    let region = matches.get_one::<String>("region").cloned();
    let service = matches
        .get_one::<String>("service")
        .expect("service has a default value")
        .to_string();

    Args {
        verbose,
        endpoint,
        region,
        service,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args();
    set_up_logger(APP_NAME, module_path!(), args.verbose)?;
    debug!("{:?}", args);

    let config = Config::new(args.endpoint, args.region, Some(args.service));
    let response = probe_index_templates_with_config(&config).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
