use serde::Deserialize;

use crate::errors::VmxError;

/// The subset of an Amazon Transcribe output document we read.
#[derive(Debug, Deserialize)]
struct TranscribeOutput {
    results: TranscribeResults,
}

#[derive(Debug, Deserialize)]
struct TranscribeResults {
    transcripts: Vec<TranscriptEntry>,
}

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    transcript: String,
}

/// Text of the first transcript in a Transcribe output document.
///
/// # Errors
///
/// Returns `TranscriptError` if the document does not parse or holds no transcript.
pub fn first_transcript(document: &str) -> Result<String, VmxError> {
    let output: TranscribeOutput = serde_json::from_str(document)
        .map_err(|e| VmxError::TranscriptError(format!("transcript document: {e}")))?;

    output
        .results
        .transcripts
        .into_iter()
        .next()
        .map(|entry| entry.transcript)
        .ok_or_else(|| VmxError::TranscriptError("document has no transcripts".to_string()))
}
