//! Built-in demo queries: one good forced choice, two bad ones.

use anyhow::Result;
use tracing::info;

use ipscout_agent::{CyberAgent, DecisionMode, QueryRequest};
use ipscout_core::LogRecord;

pub struct DemoCase {
    pub query: &'static str,
    pub expected: &'static str,
    pub ip: &'static str,
    pub force: &'static str,
}

pub const DEMO_CASES: [DemoCase; 3] = [
    DemoCase {
        query: "Where is this IP located?",
        expected: "geoip_lookup",
        ip: "8.8.8.8",
        force: "geoip_lookup",
    },
    DemoCase {
        query: "Is this IP malicious?",
        expected: "reputation_check",
        ip: "123.45.67.89",
        force: "geoip_lookup",
    },
    DemoCase {
        query: "Which country is this IP from?",
        expected: "geoip_lookup",
        ip: "1.1.1.1",
        force: "whois_lookup",
    },
];

impl DemoCase {
    /// The request for this case under `mode`; inferred mode drops the
    /// forced and expected tools.
    pub fn request(&self, mode: DecisionMode) -> QueryRequest {
        match mode {
            DecisionMode::Explicit => {
                QueryRequest::explicit(self.query, self.ip, self.force, self.expected)
            }
            DecisionMode::Inferred => QueryRequest::inferred(self.query, self.ip),
        }
    }
}

/// Run every demo case through `agent`, printing each record.
pub async fn run(agent: &CyberAgent) -> Result<Vec<LogRecord>> {
    let mut records = Vec::with_capacity(DEMO_CASES.len());
    for case in &DEMO_CASES {
        let record = agent.handle_query(&case.request(agent.mode())).await;
        print_record(&record)?;
        records.push(record);
    }

    let correct = records.iter().filter(|r| r.correct).count();
    info!(
        session_id = %agent.session_id(),
        correct,
        total = records.len(),
        mode = %agent.mode(),
        "Demo complete"
    );
    Ok(records)
}

pub fn print_record(record: &LogRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
