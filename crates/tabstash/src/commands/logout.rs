//! Logout command - delete stored credentials.

use anyhow::Result;

use super::Context;

/// Run the logout command.
pub async fn run(ctx: &Context) -> Result<()> {
    let source = ctx.credential_source();

    if !source.has_credentials() {
        println!("No stored credentials");
        return Ok(());
    }

    source.delete().await?;
    println!("Credentials deleted");
    Ok(())
}
