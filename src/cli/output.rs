use serde::Serialize;

use crate::core::Result;
use crate::core::types::Usage;
use crate::providers::ProviderKind;

use super::args::OutputFormat;

/// Everything a completed run reports.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub provider: ProviderKind,
    pub model: String,
    pub query: String,
    pub answer: String,
    pub usage: UsageReport,
}

/// Usage block of the report. `requests` stays at 1; the tool sends a
/// single completion per invocation.
#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub requests: u32,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl From<Usage> for UsageReport {
    fn from(usage: Usage) -> Self {
        Self {
            requests: 1,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            total_tokens: usage.total(),
        }
    }
}

impl RunReport {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        format!(
            "Using provider: {provider}\n\
             Query: {query}\n\
             \n\
             Result:\n\
             {answer}\n\
             \n\
             Usage:\n\
             requests={requests} input_tokens={input} output_tokens={output} total_tokens={total}",
            provider = self.provider.as_str(),
            query = self.query,
            answer = self.answer,
            requests = self.usage.requests,
            input = self.usage.input_tokens,
            output = self.usage.output_tokens,
            total = self.usage.total_tokens,
        )
    }
}
