use std::time::Duration;

use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use currency_rates::{ClientConfig, RateClient, RateError, Timeout};

fn cli() -> Command {
    Command::new("currency-rates")
        .about("Query free daily exchange rates and convert between currencies")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64))
                .help("Request timeout in whole seconds"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an amount between two currencies")
                .arg(
                    Arg::new("amount")
                        .required(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(Arg::new("from").required(true))
                .arg(Arg::new("to").required(true))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("list")
                .about("List all rates for a base currency")
                .arg(Arg::new("base"))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("currencies")
                .about("List every supported currency code")
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("history")
                .about("Show rates for every day in an inclusive date range")
                .arg(Arg::new("start").required(true).value_name("YYYY-MM-DD"))
                .arg(Arg::new("end").required(true).value_name("YYYY-MM-DD"))
                .arg(Arg::new("base").long("base"))
                .arg(
                    Arg::new("symbols")
                        .long("symbols")
                        .value_name("CODES")
                        .help("Comma-separated currency codes, e.g. eur,gbp,jpy"),
                ),
        )
}

async fn run(matches: &ArgMatches) -> Result<(), RateError> {
    let mut config = ClientConfig::default();
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config.timeout = Timeout::Total(Duration::from_secs(*seconds));
    }
    let mut client = RateClient::new(config);

    match matches.subcommand() {
        Some(("convert", sub)) => {
            let amount = *sub.get_one::<f64>("amount").expect("required");
            let from = sub.get_one::<String>("from").expect("required");
            let to = sub.get_one::<String>("to").expect("required");
            let date = sub.get_one::<String>("date").map(String::as_str);
            let converted = client
                .convert(amount, to, Some(from.as_str()), date)
                .await?;
            println!("{amount} {from} is {converted} {to}");
        }
        Some(("list", sub)) => {
            let base = sub.get_one::<String>("base").map(String::as_str);
            let date = sub.get_one::<String>("date").map(String::as_str);
            let rates = client.get_rates(base, date, None).await?;
            let shown_base = base
                .map(str::to_lowercase)
                .unwrap_or_else(|| client.config().base_currency.clone());
            println!("Exchange rates for {shown_base}:");
            let mut codes: Vec<&String> = rates.keys().collect();
            codes.sort();
            for code in codes {
                println!("{code}: {}", rates[code]);
            }
        }
        Some(("currencies", sub)) => {
            let date = sub.get_one::<String>("date").map(String::as_str);
            for code in client.available_currencies(date).await? {
                println!("{code}");
            }
        }
        Some(("history", sub)) => {
            let start = sub.get_one::<String>("start").expect("required").as_str();
            let end = sub.get_one::<String>("end").expect("required").as_str();
            let base = sub.get_one::<String>("base").map(String::as_str);
            let symbols: Option<Vec<&str>> = sub
                .get_one::<String>("symbols")
                .map(|codes| codes.split(',').map(str::trim).collect());
            let series = client
                .get_historical_rates(start, end, base, symbols.as_deref())
                .await?;
            for (date, rates) in &series {
                println!("{date}:");
                let mut codes: Vec<&String> = rates.keys().collect();
                codes.sort();
                for code in codes {
                    println!("  {code}: {}", rates[code]);
                }
            }
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = cli().get_matches();
    let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");
    if let Err(error) = runtime.block_on(run(&matches)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
