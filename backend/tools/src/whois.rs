//! WHOIS lookup via the Team Cymru IP-to-ASN whois service.
//!
//! The verbose reply is a pipe-separated table:
//!
//! ```text
//! AS      | IP               | BGP Prefix          | CC | Registry | Allocated  | AS Name
//! 15169   | 8.8.8.8          | 8.8.8.0/24          | US | arin     | 2023-12-28 | GOOGLE, US
//! ```
//!
//! The `AS Name` column is the ASN description.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use ipscout_core::{LookupTool, ScoutError, ToolId};

use crate::NOT_AVAILABLE;

pub const DEFAULT_WHOIS_SERVER: &str = "whois.cymru.com:43";
const VERBOSE_COLUMNS: usize = 7;

pub struct WhoisTool {
    server: String,
}

impl WhoisTool {
    pub fn new() -> Self {
        Self {
            server: DEFAULT_WHOIS_SERVER.to_string(),
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    async fn query(&self, ip: &str) -> Result<String> {
        let mut stream = TcpStream::connect(&self.server)
            .await
            .with_context(|| format!("could not connect to {}", self.server))?;

        stream
            .write_all(format!(" -v {ip}\r\n").as_bytes())
            .await
            .context("failed to send whois query")?;

        let mut reply = Vec::new();
        stream
            .read_to_end(&mut reply)
            .await
            .context("failed to read whois reply")?;

        Ok(String::from_utf8_lossy(&reply).into_owned())
    }
}

impl Default for WhoisTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the ASN description from a verbose Cymru reply.
///
/// Unannounced space (an `NA` row, e.g. private or reserved ranges) and a
/// reply without any data row are failures. `Ok(None)` means the ASN is
/// known but has no name.
pub fn parse_asn_description(reply: &str) -> Result<Option<String>, ScoutError> {
    for line in reply.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(msg) = line.strip_prefix("Error:") {
            return Err(ScoutError::Whois(msg.trim().to_string()));
        }
        if line.starts_with("Bulk mode") {
            continue;
        }

        let columns: Vec<&str> = line.split('|').map(str::trim).collect();
        if columns.len() < VERBOSE_COLUMNS || columns[0] == "AS" {
            continue;
        }

        if columns[0] == "NA" {
            return Err(ScoutError::Whois(format!(
                "{} is not in announced address space",
                columns[1]
            )));
        }

        let name = columns[VERBOSE_COLUMNS - 1..].join("|");
        let name = name.trim();
        if name.is_empty() || name == "NA" {
            return Ok(None);
        }
        return Ok(Some(name.to_string()));
    }
    Err(ScoutError::Whois("reply carried no ASN data".into()))
}

#[async_trait]
impl LookupTool for WhoisTool {
    fn id(&self) -> ToolId {
        ToolId::Whois
    }

    fn description(&self) -> &str {
        "Find who owns an IP address (registered ASN and organization)"
    }

    fn failure_label(&self) -> &str {
        "WHOIS lookup failed"
    }

    async fn lookup(&self, ip: &str) -> Result<String> {
        debug!(server = %self.server, ip = %ip, "Querying whois");
        let reply = self.query(ip).await?;
        let description = parse_asn_description(&reply)?;
        Ok(format!(
            "WHOIS: {}",
            description.as_deref().unwrap_or(NOT_AVAILABLE)
        ))
    }
}
