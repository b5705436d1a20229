//! Common test utilities for hotelagg integration tests
//!
//! - [`TestEnv`] - isolated config directory plus a runner for the binary
//! - [`StubSupplierServer`] - local HTTP server answering supplier requests

// Not every test file uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Canned answer for one stub route.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    /// 200 with a JSON body.
    pub fn json(body: &serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    /// Arbitrary status and raw body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Minimal HTTP/1.1 server serving one canned response per path.
///
/// Unknown paths answer 404. Every request is counted per path.
pub struct StubSupplierServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    handle: JoinHandle<()>,
}

impl StubSupplierServer {
    /// Bind to an ephemeral local port and start serving `routes`.
    pub async fn start(routes: HashMap<String, StubResponse>) -> Result<Self> {
        let listener =
            TcpListener::bind("127.0.0.1:0").await.context("Failed to bind stub server")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let routes = Arc::new(routes);
        let hits = Arc::new(Mutex::new(HashMap::new()));

        let handle = tokio::spawn({
            let hits = Arc::clone(&hits);
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let routes = Arc::clone(&routes);
                    let hits = Arc::clone(&hits);
                    tokio::spawn(async move {
                        let _ = serve(stream, &routes, &hits).await;
                    });
                }
            }
        });

        Ok(Self {
            base_url,
            hits,
            handle,
        })
    }

    /// Full URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap_or_else(PoisonError::into_inner).get(path).copied().unwrap_or(0)
    }
}

impl Drop for StubSupplierServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, StubResponse>,
    hits: &Mutex<HashMap<String, usize>>,
) -> Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    *hits.lock().unwrap_or_else(PoisonError::into_inner).entry(path.clone()).or_insert(0) += 1;

    let response = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| StubResponse::status(404, "{\"message\":\"not found\"}"));
    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        if response.status == 200 { "OK" } else { "Error" },
        response.body.len(),
        response.body
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Isolated environment for running the `hotelagg` binary.
///
/// The config path points into a private temp directory, so the user's
/// `~/.hotelagg/config.toml` is never read.
pub struct TestEnv {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        Ok(Self {
            _temp_dir: temp_dir,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        std::fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write config to {}", self.config_path.display()))
    }

    /// Point every built-in supplier at `server`, under `/<name>`.
    pub fn use_stub_suppliers(&self, server: &StubSupplierServer) -> Result<()> {
        self.write_config(&format!(
            "[suppliers]\nacme = \"{}\"\npatagonia = \"{}\"\npaperflies = \"{}\"\n",
            server.url("/acme"),
            server.url("/patagonia"),
            server.url("/paperflies"),
        ))
    }

    /// Run hotelagg with `args` and capture its output.
    pub async fn run_hotelagg(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_hotelagg"))
            .args(args)
            .env("HOTELAGG_CONFIG_PATH", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .await
            .context("Failed to run hotelagg")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Parse stdout as a JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}
