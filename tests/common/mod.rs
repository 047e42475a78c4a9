use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use clipwatch::model::RemoteConfig;
use clipwatch::remote::RemoteClient;

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    pub media_dir: PathBuf,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[allow(dead_code)]
impl ServerGuard {
    pub fn remote(&self) -> RemoteConfig {
        RemoteConfig::new(self.base_url.clone())
    }

    pub fn client(&self) -> Result<RemoteClient> {
        RemoteClient::new(self.remote(), self.token.clone()).context("create remote client")
    }

    /// Records a clip the way the capture backend would.
    pub fn record_clip(&self, body: serde_json::Value) -> Result<serde_json::Value> {
        let resp = reqwest::blocking::Client::new()
            .post(format!("{}/api/clips", self.base_url))
            .header(reqwest::header::AUTHORIZATION, auth_header(&self.token))
            .json(&body)
            .send()
            .context("POST /api/clips")?
            .error_for_status()
            .context("POST /api/clips status")?;
        resp.json().context("parse recorded clip")
    }
}

#[allow(dead_code)]
pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with(&[])
}

#[allow(dead_code)]
pub fn spawn_server_with(extra_args: &[&str]) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;

    let token = "dev".to_string();

    let addr_file = data_dir.path().join("addr.txt");
    let media_dir = data_dir.path().join("media");

    let child = Command::new(env!("CARGO_BIN_EXE_clipwatch-server"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--media-dir",
            media_dir.to_str().unwrap(),
            "--dev-token",
            &token,
            "--heartbeat-ms",
            "100",
        ])
        .args(extra_args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn clipwatch-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token,
        media_dir,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Polls `check` until it returns true or five seconds pass.
#[allow(dead_code)]
pub fn wait_until(mut check: impl FnMut() -> bool) -> Result<()> {
    let start = Instant::now();
    while !check() {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("condition not reached within 5s");
        }
        thread::sleep(Duration::from_millis(20));
    }
    Ok(())
}
