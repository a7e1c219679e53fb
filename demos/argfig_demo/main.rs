//! # argfig demo application
//!
//! Loads a document, overrides parts of it from prefixed flags, and prints
//! the resolved settings. It exists to exercise argfig by hand.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example argfig_demo -- -demo.file=demos/argfig_demo/demo.yaml
//! cargo run --example argfig_demo -- -demo.file demos/argfig_demo/demo.yaml -demo.server.port=9000
//! RUST_LOG=argfig=debug cargo run --example argfig_demo -- -demo.key.alg=ecdsa
//! ```
//!
//! Flags without the `demo.` prefix are ignored, so `-verbose 1` can sit next
//! to them without tripping the parser.

use argfig::{ArgfigError, CommandlineConfig, Config, DocumentConfig, LayeredConfig};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct ServerSettings {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
struct KeySettings {
    alg: String,
    size: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ArgfigError> {
    let mut flags = CommandlineConfig::from_env("demo");
    flags.parse()?;

    let mut config = LayeredConfig::new();
    if let Some(path) = flags.get("file").try_string() {
        let file = DocumentConfig::load(path)?;
        println!("{file}");
        config.push(&file);
    }
    config.push(&flags);
    println!("{config}\n");

    println!("cn     = {}", config.get("cn").to_string("unnamed"));
    match config.get("server").unmarshal::<ServerSettings>() {
        Ok(server) => println!("server = {}:{}", server.host, server.port),
        Err(e) => println!("server = <unset> ({e})"),
    }
    match config.get("key").unmarshal::<KeySettings>() {
        Ok(key) => println!("key    = {} ({} bits)", key.alg, key.size),
        Err(e) => println!("key    = <unset> ({e})"),
    }
    if let Some(names) = config.get("DNSs").try_list() {
        let names: Vec<&str> = names.iter().filter_map(|v| v.try_string()).collect();
        println!("dns    = {}", names.join(", "));
    }
    Ok(())
}
