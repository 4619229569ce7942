//! Series classifier using an LLM.
//!
//! Sends a folder name and its directory tree to the chat API and extracts:
//! - Clean series name (release tags removed)
//! - Release year, if identifiable
//! - Season/episode numbers and a canonical file name per video file

use crate::models::series::SeriesStructure;
use crate::services::deepseek::{ChatMessage, DeepSeekClient};
use crate::Result;
use regex::Regex;
use std::sync::OnceLock;

const SYSTEM_PROMPT: &str = r#"You are a TV series file organizer. Analyze the directory structure and return ONLY a valid JSON object with this exact structure:
{
    "series_name": "Clean series name without tags",
    "year": 2023 or null,
    "episodes": [
        {
            "original_filename": "exact filename from tree",
            "new_filename": "Series Name S01E01.mkv",
            "season": 1,
            "episode": 1
        }
    ]
}

Rules:
- Only include video files (.mkv, .mp4, .avi)
- year can be integer or null
- season and episode must be integers
- Return ONLY the JSON, no other text"#;

/// Series classifier.
pub struct SeriesClassifier {
    client: DeepSeekClient,
}

impl SeriesClassifier {
    /// Create a classifier on top of a configured client.
    pub fn new(client: DeepSeekClient) -> Self {
        Self { client }
    }

    /// Generate the user prompt for a folder.
    pub fn generate_prompt(folder_name: &str, directory_tree: &str) -> String {
        format!(
            r#"Analyze this TV series folder structure and organize it properly.

Folder name: {folder_name}
Directory tree:
{directory_tree}

Extract:
1. Series name (clean, without tags like [AniLibria.TV])
2. Release year (if identifiable, otherwise null)
3. For each video file (.mkv, .mp4, .avi):
   - Season number (if not clear, assume Season 01)
   - Episode number(s)
   - New standardized filename in format: "Series Name S##E##.ext"
   - Original file path relative to the folder (include subfolders)

Rules:
- Use Season 00 for specials/OVA
- For multi-episode files use S##E##-E## format
- Keep extra info (like "Part 1") at the end
- Include all video files only (.mkv, .mp4, .avi)
- Use absolute numbering if seasons unclear

Return structured JSON."#
        )
    }

    /// Classify a folder from its directory tree.
    pub async fn classify(&self, folder_name: &str, directory_tree: &str) -> Result<SeriesStructure> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(Self::generate_prompt(folder_name, directory_tree)),
        ];

        tracing::debug!("Classifying folder: {}", folder_name);
        let start = std::time::Instant::now();

        let response = self
            .client
            .chat(&messages, true)
            .await
            .map_err(|e| match e {
                crate::Error::Classifier(_) => e,
                other => crate::Error::Classifier(other.to_string()),
            })?;

        tracing::debug!(
            "Classifier answered in {:.1}s: {}",
            start.elapsed().as_secs_f32(),
            response
        );

        parse_response(&response)
    }
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid fence regex")
    })
}

/// Parse and validate a classifier reply.
///
/// A reply wrapped in a Markdown code fence is unwrapped; anything else that
/// does not match the structure exactly is an error.
pub fn parse_response(response: &str) -> Result<SeriesStructure> {
    let body = code_fence()
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(response);

    let structure: SeriesStructure = serde_json::from_str(body)
        .map_err(|e| crate::Error::Classifier(format!("malformed response: {}", e)))?;

    let problems = structure.problems();
    if !problems.is_empty() {
        return Err(crate::Error::Classifier(format!(
            "invalid response: {}",
            problems.join("; ")
        )));
    }

    Ok(structure)
}
