//! Chat-completions client for structured CBT analysis
//!
//! The service contract lives in the system prompt: the model must answer
//! with one JSON object matching [`AnalysisResponse`]. Models wrap that
//! object in prose or code fences often enough that the reply goes through
//! an extract-and-repair pass before parsing: take the outermost `{...}`
//! block, drop control characters, and double any backslash that does not
//! start a valid JSON escape.

use std::time::Duration;

use regex::Regex;

use crate::config::ApiConfig;
use crate::error::{Result, SolaceError};
use crate::record::AnalysisResponse;

use super::{
    env_override, read_body, require_key, user_agent, ANALYSIS_ENDPOINT_ENV, ANALYSIS_MODEL_ENV,
    API_KEY_ENV,
};

const SERVICE: &str = "analysis service";

const SYSTEM_PROMPT: &str = r#"You are a highly experienced psychologist specializing in Cognitive Behavioral Therapy (CBT). Your role is to provide clear, structured therapeutic insights that help users understand and change their thought patterns.

IMPORTANT: You must respond in valid JSON format following this exact structure. Use **bold** formatting to emphasize key points and important concepts. Be selective with bold formatting - only use it for the most important takeaways and key terms.

{
  "severity": number (1-5, where:
    1 = Mild concern with minimal impact on daily life
    2 = Moderate concern affecting some situations
    3 = Significant concern impacting regular activities
    4 = Severe concern causing substantial life limitations
    5 = Critical concern requiring immediate professional help),
  "summary": string (a very brief 3-7 word phrase capturing the core concern),
  "explanation": string (a brief, compassionate overview with key points in **bold**),
  "explanations": [
    {
      "title": string (a clear, supportive statement),
      "content": string (2-3 sentences expanding on the title. Use **bold** for key insights and important statistics)
    }
  ],
  "cbtAnalysis": {
    "thoughtPatterns": [
      {
        "pattern": string (identify a specific thought pattern),
        "impact": string (explain impact with key terms in **bold**),
        "solution": string (provide specific technique with key steps in **bold**)
      }
    ],
    "copingStrategies": [
      {
        "strategy": string (name of the coping strategy),
        "explanation": string (why this strategy works, with key concepts in **bold**),
        "howTo": string (step-by-step instructions, separated by ||)
      }
    ]
  },
  "rebuttals": [
    {
      "concern": string (frame common worries as questions),
      "response": string (provide evidence-based responses with key points in **bold**)
    }
  ] (optional)
}

Guidelines for bold formatting:
- Use **bold** sparingly for:
  - Key therapeutic concepts
  - Important statistics
  - Critical insights
  - Main takeaways
  - Essential action steps

Remember to:
- Keep formatting minimal and purposeful
- Only bold the most important information
- Maintain readability
- Be consistent in what you choose to emphasize

Always connect thoughts, emotions, and behaviors together in your explanations, showing how they influence each other and how changing one affects the others."#;

/// Client for the analysis endpoint
pub struct AnalysisClient {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
    user_agent: String,
}

impl AnalysisClient {
    /// Build a client from store config plus environment overrides.
    ///
    /// Fails when `SOLACE_API_KEY` is unset; the key never comes from the
    /// config file.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            endpoint: env_override(ANALYSIS_ENDPOINT_ENV)
                .unwrap_or_else(|| config.analysis_endpoint.clone()),
            model: env_override(ANALYSIS_MODEL_ENV)
                .unwrap_or_else(|| config.analysis_model.clone()),
            api_key: require_key(API_KEY_ENV)?,
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: user_agent(),
        })
    }

    /// Analyze one concern and return the validated, normalized response.
    ///
    /// Nothing is persisted here; callers save only after this returns.
    #[tracing::instrument(skip(self, content), fields(chars = content.len()))]
    pub fn analyze(&self, content: &str, include_rebuttals: bool) -> Result<AnalysisResponse> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt(content, include_rebuttals) },
            ],
            "temperature": 0.7,
        });

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "requesting analysis");
        let result = ureq::post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("User-Agent", &self.user_agent)
            .timeout(self.timeout)
            .send_string(&payload.to_string());
        let body = read_body(result, SERVICE)?;

        let completion = completion_content(&body)?;
        let mut response = parse_response(&completion)?;
        response.validate()?;
        response.normalize_steps();
        Ok(response)
    }
}

fn user_prompt(content: &str, include_rebuttals: bool) -> String {
    let rebuttal_clause = if include_rebuttals {
        "Include potential rebuttals and responses to them, focusing on evidence-based coping strategies."
    } else {
        "Do not include the rebuttals field in the response."
    };
    format!(
        "Please analyze the following concern, providing a structured therapeutic response \
         that combines validation with practical steps. Respond in the specified JSON \
         format:\n\n{}\n\n{}",
        content, rebuttal_clause
    )
}

/// Pull the assistant message out of the chat-completions envelope
fn completion_content(body: &str) -> Result<String> {
    let envelope: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SolaceError::Api(format!("{} returned malformed JSON: {}", SERVICE, e)))?;
    let content = envelope["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default();
    if content.is_empty() {
        return Err(SolaceError::InvalidResponse {
            reason: "empty completion".to_string(),
        });
    }
    Ok(content.to_string())
}

/// Extract the JSON block from a completion and parse it
fn parse_response(completion: &str) -> Result<AnalysisResponse> {
    let block = extract_json_block(completion)?.ok_or_else(|| SolaceError::InvalidResponse {
        reason: "no JSON object in completion".to_string(),
    })?;
    let cleaned = fix_invalid_escapes(&strip_control_chars(block));
    if cleaned != block {
        tracing::warn!(chars = block.len(), "repaired malformed analysis payload");
    }
    serde_json::from_str(&cleaned).map_err(|e| SolaceError::InvalidResponse {
        reason: format!("malformed analysis payload: {}", e),
    })
}

/// The outermost `{...}` span: first `{` through last `}`
fn extract_json_block(completion: &str) -> Result<Option<&str>> {
    let block_re = Regex::new(r"\{[\s\S]*\}")
        .map_err(|e| SolaceError::Other(format!("invalid JSON extraction pattern: {}", e)))?;
    Ok(block_re.find(completion).map(|m| m.as_str()))
}

/// Drop control characters (U+0000-U+001F, U+007F-U+009F).
///
/// Raw newlines inside string literals are the common offender; between
/// tokens the removal is harmless whitespace stripping.
fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(u32::from(*c), 0x00..=0x1F | 0x7F..=0x9F))
        .collect()
}

/// Double any backslash that does not start a valid JSON escape.
///
/// Valid escape pairs pass through untouched; a stray `\x` or trailing
/// `\` becomes a literal backslash instead of a parse error.
fn fix_invalid_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next)
                if matches!(
                    next,
                    '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u'
                ) =>
            {
                out.push('\\');
                out.push(next);
                chars.next();
            }
            _ => {
                out.push('\\');
                out.push('\\');
            }
        }
    }
    out
}
