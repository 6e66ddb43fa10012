//! Small CLI over `AuthClient`, handy for poking a running server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use showcase_be::client::AuthClient;
use showcase_be::dtos::auth::{LoginIn, SignupIn};

#[derive(Parser)]
#[command(name = "auth-cli", about = "Sign up, log in and inspect the current user")]
struct Cli {
    /// Server origin; requests go to <server>/auth/...
    #[arg(long, env = "SHOWCASE_SERVER", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOWCASE_PASSWORD")]
        password: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOWCASE_PASSWORD")]
        password: String,
    },
    Me {
        #[arg(long, env = "SHOWCASE_TOKEN")]
        token: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let client = AuthClient::new(&cli.server)
        .with_context(|| format!("cannot build client for {}", cli.server))?;

    match cli.command {
        Command::Signup { email, password, username, full_name } => {
            let out = client
                .signup(&SignupIn { email, password, username, full_name })
                .await
                .context("signup failed")?;
            print_json(&out)
        }
        Command::Login { email, password } => {
            let out = client
                .login(&LoginIn { email, password })
                .await
                .context("login failed")?;
            print_json(&out)
        }
        Command::Me { token } => {
            let out = client.me(&token).await.context("request failed")?;
            print_json(&out)
        }
    }
}
