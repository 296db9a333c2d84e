//! # Map-Reduce Chain Tests
//!
//! Drives `MapReduceSummarizer` with a programmable `MockAiProvider` and checks
//! how many model calls each stage makes and what they receive.

use anyhow::Result;
use textsum::{
    chain::{ChainConfig, MapReduceSummarizer, Summarizer},
    errors::PromptError,
    types::Document,
};
use textsum_test_utils::MockAiProvider;

fn docs(contents: &[&str]) -> Vec<Document> {
    contents.iter().map(|c| Document::new(*c)).collect()
}

#[tokio::test]
async fn test_single_document_maps_then_combines() -> Result<()> {
    let llm = MockAiProvider::new();
    llm.add_response("alpha document", "partial alpha");
    llm.add_response("partial alpha", "final alpha");

    let summarizer = MapReduceSummarizer::default();
    let summary = summarizer
        .summarize(&docs(&["the alpha document body"]), &llm)
        .await?;

    assert_eq!(summary, "final alpha");
    let calls = llm.get_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].1.starts_with("Write a concise summary of the following:"));
    assert!(calls[0].1.contains("\"the alpha document body\""));
    assert!(calls[0].1.ends_with("CONCISE SUMMARY:"));
    assert!(calls[1].1.contains("partial alpha"));
    Ok(())
}

#[tokio::test]
async fn test_partial_summaries_are_combined_in_document_order() -> Result<()> {
    let llm = MockAiProvider::new();
    // The combined prompt is matched first; map prompts never contain it.
    llm.add_response("P1\n\nP2\n\nP3", "FINAL");
    llm.add_response("doc one body", "P1");
    llm.add_response("doc two body", "P2");
    llm.add_response("doc three body", "P3");

    let summarizer = MapReduceSummarizer::default();
    let summary = summarizer
        .summarize(&docs(&["doc one body", "doc two body", "doc three body"]), &llm)
        .await?;

    assert_eq!(summary, "FINAL");
    let calls = llm.get_calls();
    assert_eq!(calls.len(), 4, "three map calls and one combine call");

    let map_prompts: Vec<&String> = calls[..3].iter().map(|(_, user)| user).collect();
    for body in ["doc one body", "doc two body", "doc three body"] {
        assert!(map_prompts.iter().any(|p| p.contains(body)));
    }
    assert!(calls[3].1.contains("P1\n\nP2\n\nP3"));
    Ok(())
}

#[tokio::test]
async fn test_sequential_map_stage_gives_same_result() -> Result<()> {
    let llm = MockAiProvider::new();
    llm.add_response("P1\n\nP2", "FINAL");
    llm.add_response("first", "P1");
    llm.add_response("second", "P2");

    let summarizer = MapReduceSummarizer::new(ChainConfig {
        map_concurrency: 1,
        ..ChainConfig::default()
    });
    let summary = summarizer.summarize(&docs(&["first", "second"]), &llm).await?;

    assert_eq!(summary, "FINAL");
    let calls = llm.get_calls();
    assert!(calls[0].1.contains("first"));
    assert!(calls[1].1.contains("second"));
    Ok(())
}

/// Each partial summary is 40 characters, i.e. 11 estimated tokens.
fn partial(i: usize) -> String {
    format!("partial-{i}-{}", "z".repeat(30))
}

fn collapsing_mock() -> MockAiProvider {
    let llm = MockAiProvider::new();
    for i in 1..=4 {
        llm.add_response(&format!("document-{i}"), &partial(i));
    }
    llm.add_response("partial-1-", "C12");
    llm.add_response("partial-3-", "C34");
    llm.add_response("C12\n\nC34", "FINAL");
    llm
}

#[tokio::test]
async fn test_oversized_partials_are_collapsed_before_combining() -> Result<()> {
    let llm = collapsing_mock();
    let summarizer = MapReduceSummarizer::new(ChainConfig {
        token_max: 30,
        ..ChainConfig::default()
    });

    let summary = summarizer
        .summarize(
            &docs(&["document-1", "document-2", "document-3", "document-4"]),
            &llm,
        )
        .await?;

    assert_eq!(summary, "FINAL");
    let calls = llm.get_calls();
    // 4 map calls, 2 collapse calls, 1 final combine call.
    assert_eq!(calls.len(), 7);
    assert!(calls[4].1.contains(&partial(1)) && calls[4].1.contains(&partial(2)));
    assert!(calls[5].1.contains(&partial(3)) && calls[5].1.contains(&partial(4)));
    assert!(calls[6].1.contains("C12\n\nC34"));
    Ok(())
}

#[tokio::test]
async fn test_collapse_round_limit_is_enforced() {
    let llm = collapsing_mock();
    let summarizer = MapReduceSummarizer::new(ChainConfig {
        token_max: 30,
        max_collapse_rounds: 0,
        ..ChainConfig::default()
    });

    let err = summarizer
        .summarize(
            &docs(&["document-1", "document-2", "document-3", "document-4"]),
            &llm,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PromptError::CollapseLimit {
            rounds: 0,
            token_max: 30
        }
    ));
}

#[tokio::test]
async fn test_single_partial_larger_than_token_max_fails() {
    let llm = collapsing_mock();
    let summarizer = MapReduceSummarizer::new(ChainConfig {
        token_max: 5,
        ..ChainConfig::default()
    });

    let err = summarizer
        .summarize(&docs(&["document-1"]), &llm)
        .await
        .unwrap_err();
    assert!(matches!(err, PromptError::DocumentTooLong { .. }));
}

#[tokio::test]
async fn test_empty_document_list_is_an_error() {
    let llm = MockAiProvider::new();
    let err = MapReduceSummarizer::default()
        .summarize(&[], &llm)
        .await
        .unwrap_err();
    assert!(matches!(err, PromptError::NoDocuments));
    assert!(llm.get_calls().is_empty());
}

#[tokio::test]
async fn test_model_failure_aborts_the_chain() {
    // Nothing is programmed, so the first map call fails.
    let llm = MockAiProvider::new();
    let err = MapReduceSummarizer::default()
        .summarize(&docs(&["some text"]), &llm)
        .await
        .unwrap_err();
    assert!(matches!(err, PromptError::AiApi(_)));
}
