//! Login command - store credentials for the task service.

use anyhow::Result;
use clap::Args;

use tabstash_auth::{DEFAULT_TOKEN_URL, StoredCredentials};

use super::Context;

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Current access token (may be omitted; one is refreshed on first use)
    #[arg(long, default_value = "")]
    pub access_token: String,

    /// Long-lived refresh token
    #[arg(long)]
    pub refresh_token: String,

    /// OAuth client id
    #[arg(long, env = "TABSTASH_CLIENT_ID")]
    pub client_id: String,

    /// OAuth client secret, when the registration requires one
    #[arg(long, env = "TABSTASH_CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// OAuth token endpoint
    #[arg(long, default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,
}

/// Run the login command.
pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    let source = ctx.credential_source();

    source
        .store(StoredCredentials {
            access_token: args.access_token,
            refresh_token: args.refresh_token,
            token_url: args.token_url,
            client_id: args.client_id,
            client_secret: args.client_secret,
        })
        .await?;

    println!(
        "Credentials saved to {}",
        source.credential_path().display()
    );
    Ok(())
}
