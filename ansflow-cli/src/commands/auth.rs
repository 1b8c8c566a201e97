//! Login and logout

use ansflow_client::AnsflowClient;
use anyhow::{Context, Result};
use colored::*;

use crate::output::print_success;

pub async fn login(client: &AnsflowClient, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => inquire::Password::new("Password:")
            .without_confirmation()
            .prompt()?,
    };

    client
        .login(username, &password)
        .await
        .context("Login failed")?;

    print_success(&format!("Logged in to {} as {}", client.base_url(), username.bold()));
    Ok(())
}

pub fn logout(client: &AnsflowClient) -> Result<()> {
    client.logout().context("Failed to clear stored token")?;
    print_success("Logged out");
    Ok(())
}
