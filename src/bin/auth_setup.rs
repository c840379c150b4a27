// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interactive walkthrough of the three-legged OAuth flow.
//!
//! Obtains a request token, prints the authorization URL, waits for the
//! verifier and user ID from the callback, exchanges them for access
//! credentials, and optionally persists everything to the config file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use withings_api::client::WithingsClient;
use withings_api::config::ClientConfig;

#[derive(Parser)]
#[command(name = "withings-auth-setup")]
#[command(about = "Set up OAuth access credentials for the Withings API")]
struct Cli {
    /// Consumer key (falls back to config file or WITHINGS_CONSUMER_KEY)
    #[arg(long)]
    consumer_key: Option<String>,

    /// Consumer secret (falls back to config file or WITHINGS_CONSUMER_SECRET)
    #[arg(long)]
    consumer_secret: Option<String>,

    /// Callback URL registered with the Withings application
    #[arg(long)]
    callback_url: Option<String>,

    /// Config file path (default: ~/.config/withings-api/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Persist the resulting credentials to the config file
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match (cli.consumer_key, cli.consumer_secret) {
        (Some(key), Some(secret)) => ClientConfig::new(key, secret),
        _ => ClientConfig::load(cli.config.as_deref())
            .context("no consumer credentials on the command line and none loadable")?,
    };
    if let Some(callback_url) = cli.callback_url {
        config = config.with_callback_url(callback_url);
    }

    let client = WithingsClient::new(config.clone());

    info!("requesting OAuth request token");
    let request_token = client.request_token().await?;

    println!("\nPlease visit this URL to authorize the application:");
    println!("{}\n", client.authorize_url(&request_token)?);
    println!("After authorizing, the callback receives `oauth_verifier` and `userid`.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Enter oauth_verifier:");
    let verifier = lines
        .next_line()
        .await?
        .context("stdin closed before a verifier was entered")?;

    println!("Enter userid:");
    let user_id = lines
        .next_line()
        .await?
        .context("stdin closed before a user ID was entered")?;

    let access = client
        .exchange_access_token(&request_token, verifier.trim())
        .await?;

    println!("\nAuthentication successful!");
    println!("access token:        {}", access.token);
    println!("access token secret: {}", access.secret);
    println!("user ID:             {}", user_id.trim());

    if cli.save {
        let config = config
            .with_access_token(access.token, access.secret)
            .with_user_id(user_id.trim());
        let path = config.save(cli.config.as_deref())?;
        info!("credentials written to {:?}", path);
    }

    Ok(())
}
