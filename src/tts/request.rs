//! GraphQL request construction.

use super::types::SynthesisMode;
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single synthesis call, resolved against the client's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub message: String,
    pub voice: String,
    pub mode: SynthesisMode,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: String,
    variables: BTreeMap<&'static str, &'a str>,
}

impl SynthesisRequest {
    pub fn new(message: impl Into<String>, voice: impl Into<String>, mode: SynthesisMode) -> Self {
        Self {
            message: message.into(),
            voice: voice.into(),
            mode,
        }
    }

    pub fn operation_name(&self) -> &'static str {
        self.mode.operation_name()
    }

    /// GraphQL document selecting the stream URL of the mode's operation.
    pub fn query(&self) -> String {
        let mode = self.mode.as_str();
        format!(
            concat!(
                "query Synthesize($voice: String!, ${mode}: String!) {{\n",
                "  {op}(voice: $voice, {mode}: ${mode}) {{\n",
                "    url\n",
                "  }}\n",
                "}}\n",
            ),
            mode = mode,
            op = self.operation_name(),
        )
    }

    /// Serialized body: `{"query": ..., "variables": {"voice": ..., "<mode>": message}}`.
    pub fn to_body(&self) -> Result<String> {
        let mut variables = BTreeMap::new();
        variables.insert("voice", self.voice.as_str());
        variables.insert(self.mode.as_str(), self.message.as_str());
        let request = GraphqlRequest {
            query: self.query(),
            variables,
        };
        Ok(serde_json::to_string(&request)?)
    }
}
