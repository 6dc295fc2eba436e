use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use relay::summary::remote::{RemoteClient, RemoteError, RemoteSummarizer};
use relay::summary::{SummarizationRequest, SummarizeError, Summarizer};

const MEETING: &str =
    "This is a long meeting about quarterly goals and budget planning for next year's initiatives.";

/// Returns canned prose and counts how often it was asked.
struct StubRemote {
    calls: AtomicUsize,
    reply: Result<String, fn() -> RemoteError>,
}

impl StubRemote {
    fn ok(prose: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: Ok(prose.to_string()),
        })
    }

    fn failing(make: fn() -> RemoteError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: Err(make),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSummarizer for StubRemote {
    async fn summarize(&self, _text: &str) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(prose) => Ok(prose.clone()),
            Err(make) => Err(make()),
        }
    }
}

fn request(text: &str, hint: Option<&str>) -> SummarizationRequest {
    SummarizationRequest::new(text, hint.map(str::to_string))
}

#[tokio::test]
async fn remote_success_is_styled_and_not_fallback() {
    let remote = StubRemote::ok("Budgets were approved. Hiring resumes in May.");
    let summarizer = Summarizer::new(Some(remote.clone()));

    let result = summarizer
        .summarize(&request(MEETING, Some("bullet points please")))
        .await
        .unwrap();

    assert!(!result.used_fallback);
    assert_eq!(
        result.summary,
        "Key Points:\n• Budgets were approved.\n• Hiring resumes in May."
    );
    assert_eq!(result.summary_length, result.summary.chars().count());
    assert_eq!(result.original_length, MEETING.chars().count());
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn remote_failures_fall_back_silently() {
    let failures: [fn() -> RemoteError; 3] = [
        || RemoteError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "loading".to_string(),
        },
        || RemoteError::Parse(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
        || RemoteError::NoSummary,
    ];

    for make in failures {
        let summarizer = Summarizer::new(Some(StubRemote::failing(make)));
        let result = summarizer.summarize(&request(MEETING, None)).await.unwrap();
        assert!(result.used_fallback);
        assert_eq!(result.summary, MEETING);
    }
}

#[tokio::test]
async fn network_failure_falls_back() {
    let remote = Arc::new(RemoteClient::new(
        "http://127.0.0.1:1/models/summarizer".to_string(),
        "key".to_string(),
    ));
    let summarizer = Summarizer::new(Some(remote));

    let result = summarizer
        .summarize(&request(MEETING, Some("executive")))
        .await
        .unwrap();
    assert!(result.used_fallback);
    assert_eq!(result.summary, format!("Executive Summary:\n\n{MEETING}"));
}

#[tokio::test]
async fn blank_text_is_rejected_before_any_summarization() {
    let remote = StubRemote::ok("unused");
    let summarizer = Summarizer::new(Some(remote.clone()));

    for text in ["", "   ", "\n\t"] {
        let err = summarizer.summarize(&request(text, None)).await.unwrap_err();
        assert_eq!(err, SummarizeError::Validation("Text is required".to_string()));
    }
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn without_remote_plain_meeting_text_round_trips() {
    let summarizer = Summarizer::new(None);
    assert!(!summarizer.remote_enabled());

    let result = summarizer.summarize(&request(MEETING, None)).await.unwrap();
    assert!(result.used_fallback);
    assert_eq!(result.summary, MEETING);
    assert!(!result.summary.contains(':'));
    assert_eq!(result.summary_length, MEETING.chars().count());
}

#[tokio::test]
async fn fragments_only_yield_an_empty_summary() {
    let summarizer = Summarizer::new(None);
    let result = summarizer
        .summarize(&request("A. B. C. D. E. F.", None))
        .await
        .unwrap();
    assert!(result.used_fallback);
    assert_eq!(result.summary, "");
    assert_eq!(result.summary_length, 0);
    assert_eq!(result.original_length, 17);
}

#[tokio::test]
async fn summary_length_matches_for_any_style() {
    let summarizer = Summarizer::new(None);
    let text = "Ünïcode notes from the design review are here. \
        The caching layer needs a second look before launch! \
        Who owns the migration runbook for the billing service?";

    for hint in [None, Some("bullets"), Some("action items"), Some("executive"), Some("casual")] {
        let result = summarizer.summarize(&request(text, hint)).await.unwrap();
        assert_eq!(result.summary_length, result.summary.chars().count(), "hint {hint:?}");
        assert!(!result.summary.is_empty());
    }
}

#[tokio::test]
async fn bullet_keyword_outranks_executive() {
    let summarizer = Summarizer::new(None);
    let result = summarizer
        .summarize(&request(MEETING, Some("Executive BULLET summary")))
        .await
        .unwrap();
    assert!(result.summary.starts_with("Key Points:\n• "));
}
