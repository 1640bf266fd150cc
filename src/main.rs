//! # snorlax
//!
//! Command line front end for the snorlax HTTP client. It performs a single
//! request and prints the response.
//!
//! ```text,no_run
//! $ snorlax -b https://pokeapi.co/api/v2 -q limit=1 /pokemon
//! HTTP/1.1 200 OK
//! content-type: application/json; charset=utf-8
//!
//! {
//!   "count": 1302,
//!   ...
//! }
//! ```
//!
//! Settings shared between invocations (base url, headers, credentials,
//! proxy) can be kept in a JSON file and passed with `-c`. Flags given on the
//! command line take precedence over the file.

use anyhow::{anyhow, bail, Context as _, Result};
use clap::{App, Arg, ArgMatches};
use snorlax::{hooks, BoxError, Client, ClientConfig, Context, Method, Query, Request, Settings};
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::output::print::FormattedOutputter;
use crate::output::{parse_format, Outputter};

mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let matches = App::new("snorlax")
        .version(VERSION)
        .about("Performs an HTTP request against a RESTful API")
        .author("Brian Payne")
        .arg(Arg::with_name("TARGET").required(true).index(1).help(
            "The path appended to the base url, or a full url when no base url is set",
        ))
        .arg(
            Arg::with_name("METHOD")
                .short("X")
                .long("request")
                .default_value("GET")
                .possible_values(&["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS"])
                .case_insensitive(true)
                .help("The request method"),
        )
        .arg(
            Arg::with_name("BASE_URL")
                .short("b")
                .long("base-url")
                .takes_value(true)
                .help("A url prepended to the target"),
        )
        .arg(
            Arg::with_name("HEADER")
                .short("H")
                .long("header")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("A header to send, written as 'Name: value'"),
        )
        .arg(
            Arg::with_name("QUERY")
                .short("q")
                .long("query")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("A query parameter, written as 'key=value'"),
        )
        .arg(
            Arg::with_name("DATA")
                .short("d")
                .long("data")
                .takes_value(true)
                .help("The request body"),
        )
        .arg(
            Arg::with_name("USER")
                .short("u")
                .long("user")
                .takes_value(true)
                .help("Basic authentication credentials, written as 'user:password'"),
        )
        .arg(
            Arg::with_name("PROXY")
                .short("x")
                .long("proxy")
                .takes_value(true)
                .help("Sends the request through this proxy"),
        )
        .arg(
            Arg::with_name("CONFIG")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("A JSON file with client settings"),
        )
        .arg(
            Arg::with_name("MAX_TIME")
                .short("m")
                .long("max-time")
                .takes_value(true)
                .validator(is_valid_seconds)
                .help("Maximum time in seconds the request may take"),
        )
        .arg(
            Arg::with_name("FAIL")
                .short("f")
                .long("fail")
                .help("Exits with an error when the response status is not 2XX"),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .short("v")
                .multiple(true)
                .help("Logs more details, repeat for more"),
        )
        .arg(
            Arg::with_name("RESPONSE_OUTPUT_FORMAT")
                .long("response-output-format")
                .short("s")
                .default_value("%R\n%H\n%B\n")
                .hide_default_value(true)
                .help("Define the format for print the response, possible options %R response line, %H headers, %B body \n[default: %R\\n%H\\n%B\\n]")
        )
        .arg(
            Arg::with_name("REQUEST_OUTPUT_FORMAT")
                .long("request-output-format")
                .short("r")
                .default_value("")
                .hide_default_value(true)
                .help("Define the format for print the request, possible options %R request line, %H headers, %B body \n[default: prints nothing]")
        )
        .usage("snorlax [OPTIONS] <TARGET>")
        .get_matches();

    init_tracing(matches.occurrences_of("VERBOSE"));

    let client = Client::new(client_config(&matches)?);

    let method: Method = matches
        .value_of("METHOD")
        .unwrap_or("GET")
        .parse()
        .map_err(|e| anyhow!("{}", e))?;
    let target = matches.value_of("TARGET").unwrap_or_default();
    let query = query(&matches)?;
    let body = matches.value_of("DATA").map(snorlax::Body::from);
    let ctx = match matches.value_of("MAX_TIME") {
        Some(secs) => Context::with_timeout(Duration::from_secs(secs.parse()?)),
        None => Context::background(),
    };

    let request_format = parse_format(matches.value_of("REQUEST_OUTPUT_FORMAT").unwrap_or(""))?;
    let response_format =
        parse_format(matches.value_of("RESPONSE_OUTPUT_FORMAT").unwrap_or("%R\n%H\n%B\n"))?;

    let mut stdout = stdout();
    let outputter = Mutex::new(FormattedOutputter::new(
        &mut stdout,
        request_format,
        response_format,
    ));
    let print_request = |request: &mut Request| -> std::result::Result<(), BoxError> {
        let mut outputter = outputter.lock().map_err(|_| "outputter lock poisoned")?;
        outputter.request(request)?;
        Ok(())
    };

    let mut response = client
        .call(
            &ctx,
            method,
            target,
            Some(&query),
            body,
            &[&print_request],
        )
        .with_context(|| format!("Failed performing {} {}", method, target))?;

    let mut outputter = outputter
        .into_inner()
        .map_err(|_| anyhow!("outputter lock poisoned"))?;
    outputter
        .response(&mut response)
        .with_context(|| format!("Failed outputting response for {} {}", method, target))?;

    if matches.is_present("FAIL") && !response.is_success() {
        bail!("{} {} returned {}", method, target, response.status());
    }
    Ok(())
}

fn client_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let mut config = match matches.value_of("CONFIG") {
        Some(path) => Settings::from_file(Path::new(path))?.into_config()?,
        None => ClientConfig::default(),
    };

    if let Some(base_url) = matches.value_of("BASE_URL") {
        config.set_base_url(base_url)?;
    }
    for header in matches.values_of("HEADER").into_iter().flatten() {
        let (key, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid header '{}', expected 'Name: value'", header))?;
        config.add_header(key.trim(), value.trim())?;
    }
    if let Some(user) = matches.value_of("USER") {
        let (username, password) = user.split_once(':').unwrap_or((user, ""));
        config.add_request_hook(hooks::with_basic_auth(username, password));
    }
    if let Some(proxy) = matches.value_of("PROXY") {
        config.set_proxy(proxy)?;
    }
    if matches.occurrences_of("VERBOSE") > 0 {
        config.add_response_hook(hooks::trace_response());
    }
    Ok(config)
}

fn query(matches: &ArgMatches) -> Result<Query> {
    let mut query = Query::new();
    for pair in matches.values_of("QUERY").into_iter().flatten() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid query parameter '{}', expected 'key=value'", pair))?;
        query.add(key, value);
    }
    Ok(query)
}

fn init_tracing(verbosity: u64) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("snorlax=debug"),
        _ => EnvFilter::new("snorlax=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_valid_seconds(secs: String) -> std::result::Result<(), String> {
    match secs.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("Must be a whole number of seconds")),
    }
}
