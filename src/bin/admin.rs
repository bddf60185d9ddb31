//! Terminal admin console for a running storefront API.

use dotenvy::dotenv;
use storefront::{
    config,
    console::{
        ApiClient, Dashboard, MemoryStorage, Session, StaticPassphrase, execute, parse_command,
    },
    errors::Result,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenv().ok();
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    let mut session = Session::new(
        StaticPassphrase::new(app_config.console.passphrase.clone()),
        MemoryStorage::default(),
    );
    let mut dashboard = Dashboard::new(ApiClient::new(app_config.console.api_url.clone()));
    info!("Admin console targeting {}", app_config.console.api_url);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print(&mut stdout, "Storefront admin console. Log in with: login <passphrase>\n").await?;
    loop {
        let prompt = if session.is_logged_in() { "admin> " } else { "login> " };
        print(&mut stdout, prompt).await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                print(&mut stdout, &format!("{e}\n")).await?;
                continue;
            }
        };
        let Some(output) = execute(command, &mut session, &mut dashboard).await else {
            break;
        };
        print(&mut stdout, &output).await?;
    }
    Ok(())
}

async fn print(stdout: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
