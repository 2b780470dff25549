//! Standalone demo: chunk a document and summarize one chunk with a
//! cloud-hosted chat model.
//!
//! Reads `MODEL_API_BASE` (default OpenAI-compatible), `MODEL_API_KEY`, and
//! `MODEL_ID` from the environment. The model endpoint is an opaque
//! collaborator here; the request carries a model id, a message list, and
//! inference parameters, and the response yields generated text plus usage
//! metrics.

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use textchunk::engine::ChunkingEngine;
use textchunk::types::{ChunkOverrides, ChunkerConfig};

const SAMPLE_TEXT: &str = "Retrieval-augmented generation pairs a language model \
with a document index. Documents are first split into chunks. Each chunk is \
embedded into a vector space! The query retrieves its nearest chunks. Retrieved \
chunks are placed into the model's context. The model then answers with the \
retrieved evidence at hand. Chunk size tuning matters a great deal? Overly \
large chunks dilute relevance. Overly small chunks lose context.";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let api_base =
        env::var("MODEL_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    let api_key = env::var("MODEL_API_KEY").context("MODEL_API_KEY not set")?;
    let model = env::var("MODEL_ID").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    // Chunk the sample document by sentences, then hand one chunk to the model
    let engine = ChunkingEngine::new(ChunkerConfig::default());
    let chunks = engine.split_by_sentence(SAMPLE_TEXT, Some(&ChunkOverrides::size(160)))?;
    if chunks.is_empty() {
        bail!("sample text produced no chunks");
    }

    println!("Split sample text into {} chunks", chunks.len());
    let first = &chunks[0];
    println!("Summarizing chunk 0 ({} chars):\n{}\n", first.len(), first.content);

    let messages = [
        ChatMessage {
            role: "system".to_string(),
            content: "You summarize text in one sentence.".to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: format!("Summarize this passage:\n\n{}", first.content),
        },
    ];

    let request = ChatRequest {
        model: &model,
        messages: &messages,
        max_tokens: 128,
        temperature: 0.2,
        top_p: 0.9,
    };

    let http = Client::builder().timeout(Duration::from_secs(60)).build()?;
    let response = http
        .post(format!("{api_base}/chat/completions"))
        .bearer_auth(&api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("model endpoint returned {status}: {body}");
    }

    let chat: ChatResponse = response.json().await?;
    let Some(choice) = chat.choices.first() else {
        bail!("model endpoint returned no choices");
    };

    println!("Model output:\n{}\n", choice.message.content);

    if let Some(usage) = chat.usage {
        println!(
            "Usage: prompt={} completion={} total={}",
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
            usage.total_tokens.unwrap_or(0),
        );
    }

    Ok(())
}
