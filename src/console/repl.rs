//! Command dispatch for the interactive console.
//!
//! Only `login`, `help` and `quit` are honoured while the session is locked.

use super::{
    command::{Command, HELP},
    dashboard::{Dashboard, Tab},
    session::{CredentialCheck, Session, SessionStorage},
};

/// Shown for any dashboard command issued before logging in.
pub const LOGIN_REQUIRED: &str = "Log in first: login <passphrase>\n";

/// Runs one command and returns the text to show, or `None` when the console
/// should exit.
pub async fn execute<C, S>(
    command: Command,
    session: &mut Session<C, S>,
    dashboard: &mut Dashboard,
) -> Option<String>
where
    C: CredentialCheck,
    S: SessionStorage,
{
    match command {
        Command::Quit => return None,
        Command::Help => return Some(format!("{HELP}\n")),
        Command::Login(passphrase) => {
            if let Err(e) = session.login(&passphrase) {
                return Some(format!("{e}\n"));
            }
            dashboard.load_all().await;
        }
        _ if !session.is_logged_in() => return Some(LOGIN_REQUIRED.to_string()),
        Command::Logout => {
            session.logout();
            return Some("Logged out\n".to_string());
        }
        Command::Stats => {
            return Some(match dashboard.client().stats().await {
                Ok(stats) => format!(
                    "Products: {} | Orders: {} | Revenue: ${:.2} | Logs: {}\n",
                    stats.total_products, stats.total_orders, stats.total_revenue, stats.total_logs
                ),
                Err(e) => format!("ERROR: Could not load stats: {e}\n"),
            });
        }
        Command::Tab(tab) => {
            dashboard.switch_tab(tab);
            dashboard.refresh(tab).await;
        }
        Command::Add(input) => dashboard.add_product(input).await,
        Command::Edit { id, patch } => dashboard.edit_product(&id, patch).await,
        Command::Delete(id) => match dashboard.active_tab() {
            Tab::Products => dashboard.delete_product(&id).await,
            Tab::Orders => dashboard.delete_order(&id).await,
            Tab::Logs => {
                return Some(
                    "Log entries cannot be deleted one by one, use clear-logs\n".to_string(),
                );
            }
        },
        Command::ClearLogs => dashboard.clear_logs().await,
        Command::Refresh => {
            let tab = dashboard.active_tab();
            dashboard.refresh(tab).await;
        }
    }
    let rendered = dashboard.render();
    dashboard.take_banner();
    Some(rendered)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::console::{ApiClient, MemoryStorage, StaticPassphrase};

    fn console() -> (Session<StaticPassphrase, MemoryStorage>, Dashboard) {
        (
            Session::new(StaticPassphrase::new("L1_TRIANGLE"), MemoryStorage::default()),
            // Nothing listens on port 9; every fetch fails fast.
            Dashboard::new(ApiClient::new("http://127.0.0.1:9/api")),
        )
    }

    #[tokio::test]
    async fn test_quit_ends_the_console() {
        let (mut session, mut dashboard) = console();
        assert!(execute(Command::Quit, &mut session, &mut dashboard).await.is_none());
    }

    #[tokio::test]
    async fn test_locked_console_only_accepts_login_and_help() {
        let (mut session, mut dashboard) = console();

        for command in [Command::Tab(Tab::Orders), Command::ClearLogs, Command::Stats] {
            let output = execute(command, &mut session, &mut dashboard).await.unwrap();
            assert_eq!(output, LOGIN_REQUIRED);
        }
        assert_eq!(dashboard.active_tab(), Tab::Products);

        let help = execute(Command::Help, &mut session, &mut dashboard).await.unwrap();
        assert!(help.contains("clear-logs"));

        let rejected = execute(
            Command::Login("wrong".to_string()),
            &mut session,
            &mut dashboard,
        )
        .await
        .unwrap();
        assert!(rejected.contains("Invalid passphrase"));
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_renders_dashboard_and_reports_fetch_failures() {
        let (mut session, mut dashboard) = console();

        let output = execute(
            Command::Login("L1_TRIANGLE".to_string()),
            &mut session,
            &mut dashboard,
        )
        .await
        .unwrap();
        assert!(session.is_logged_in());
        assert!(output.contains("[Products]"));
        assert!(output.contains("ERROR:"));

        let output = execute(Command::Delete("l1".to_string()), &mut session, &mut dashboard)
            .await
            .unwrap();
        assert!(output.contains("[Products]"));
        assert!(output.contains("Could not delete product"));
        assert!(dashboard.banner().is_none());

        execute(Command::Logout, &mut session, &mut dashboard).await.unwrap();
        assert!(!session.is_logged_in());
    }
}
