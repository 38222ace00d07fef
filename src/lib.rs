//! Menu Planner Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - services: Cross-menu aggregation
//! - workflow: Screen state machine
//! - commands: Request handlers for the presentation layer

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

pub mod domain;
pub mod repository;
pub mod services;
pub mod workflow;
pub mod commands;
pub mod config;

use commands::Response;
use config::AppConfig;
use domain::Catalog;
use repository::{init_db, DbState, Store};
use workflow::{Workflow, WorkflowSettings};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub store: Store,
    pub workflow: Mutex<Workflow>,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(db_state: DbState, settings: WorkflowSettings) -> Self {
        let store = Store::sqlite(&db_state);
        Self {
            workflow: Mutex::new(Workflow::new(store.clone(), settings)),
            store,
            catalog: Catalog::builtin(),
            db_state,
        }
    }
}

/// Answer JSON requests line by line until the reader is exhausted.
///
/// A line that is not UTF-8 gets an error response like any other bad request.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> Result<(), String>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| format!("Failed to read request: {}", e))?;
        if read == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                commands::handle_line(state, line).await
            }
            Err(e) => {
                log::warn!("Rejected request line that is not UTF-8: {}", e);
                Response::error(format!("Invalid request: {}", e))
            }
        };
        let mut out = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        out.push('\n');
        writer
            .write_all(out.as_bytes())
            .await
            .map_err(|e| format!("Failed to write response: {}", e))?;
        writer.flush().await.map_err(|e| format!("Failed to write response: {}", e))?;
    }
    Ok(())
}

pub async fn run() -> Result<(), String> {
    let config_path = AppConfig::resolve_path(std::env::args().nth(1));
    let mut config = AppConfig::load(&config_path).await?;
    config.resolve_relative(&config_path);

    rolling_logger::init_logger_with(
        &config.log_dir,
        "MenuPlanner",
        rolling_logger::LoggerConfig {
            level: config.log_level.clone(),
            ..Default::default()
        },
    )?;
    let _ = rolling_logger::info(&format!("Config loaded from {}", config_path.display()));

    let db_state = match init_db(&config.db_path).await {
        Ok(db_state) => db_state,
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            return Err(e);
        }
    };

    let state = AppState::new(db_state, config.workflow_settings());
    let served = serve(&state, tokio::io::stdin(), tokio::io::stdout()).await;
    state.db_state.close().await;
    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_serve_answers_each_line() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let state = AppState::new(db_state, WorkflowSettings::default());

        let input = "{\"cmd\":\"view\"}\n\n{\"cmd\":\"intent\",\"intent\":\"startList\"}\nbogus\n";
        let mut output = Vec::new();
        serve(&state, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["data"]["screen"], "home");
        assert_eq!(responses[1]["data"]["screen"], "menuCount");
        assert_eq!(responses[1]["data"]["count"], 0);
        assert_eq!(responses[2]["ok"], false);
    }

    #[tokio::test]
    async fn test_serve_continues_after_non_utf8_line() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let state = AppState::new(db_state, WorkflowSettings::default());

        let mut input = b"{\"cmd\":\"view\"}\n".to_vec();
        input.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        input.extend_from_slice(b"{\"cmd\":\"view\"}");
        let mut output = Vec::new();
        serve(&state, input.as_slice(), &mut output).await.unwrap();

        let responses: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["ok"], true);
        assert_eq!(responses[1]["ok"], false);
        assert!(responses[1]["error"].as_str().unwrap().starts_with("Invalid request"));
        assert_eq!(responses[2]["data"]["screen"], "home");
    }

    #[tokio::test]
    async fn test_huge_menu_count_is_an_error_response() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let state = AppState::new(db_state, WorkflowSettings::default());

        let input = "{\"cmd\":\"intent\",\"intent\":\"startList\"}\n\
                     {\"cmd\":\"intent\",\"intent\":\"setCount\",\"count\":9223372036854775807}\n\
                     {\"cmd\":\"view\"}\n";
        let mut output = Vec::new();
        serve(&state, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[1]["ok"], false);
        assert!(responses[1]["error"].as_str().unwrap().starts_with("Invalid input"));
        assert_eq!(responses[2]["data"]["count"], 0);
    }
}
