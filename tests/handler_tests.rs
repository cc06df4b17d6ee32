use async_trait::async_trait;
use jina_sum::core::models::{ContextType, InboundEvent, Reply, ReplyKind};
use jina_sum::errors::JinaSumError;
use jina_sum::plugin::{ACK_MESSAGE, CANONICAL_FAILURE_MESSAGE, MAX_RETRIES};
use jina_sum::{JinaSum, LlmClient, PageReader, PluginConfig, ReplyChannel, Summarizer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Reader that fails the first `failures` calls, then returns `text`.
struct ScriptedReader {
    failures: usize,
    text: String,
    urls: Mutex<Vec<String>>,
}

impl ScriptedReader {
    fn new(failures: usize, text: &str) -> Arc<Self> {
        Arc::new(Self {
            failures,
            text: text.to_string(),
            urls: Mutex::new(Vec::new()),
        })
    }

    fn always_failing() -> Arc<Self> {
        Self::new(usize::MAX, "")
    }

    fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageReader for ScriptedReader {
    async fn fetch_page_text(&self, reader_url: &str) -> Result<String, JinaSumError> {
        let call = {
            let mut urls = self.urls.lock().unwrap();
            urls.push(reader_url.to_string());
            urls.len()
        };
        if call <= self.failures {
            return Err(JinaSumError::FetchError(format!("HTTP 503 on call {call}")));
        }
        Ok(self.text.clone())
    }
}

#[derive(Default)]
struct EchoSummarizer {
    calls: AtomicUsize,
}

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, page_text: &str) -> Result<String, JinaSumError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("summary of: {page_text}"))
    }
}

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<Reply>>,
}

impl RecordingChannel {
    fn sent(&self) -> Vec<Reply> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyChannel for RecordingChannel {
    async fn send(&self, reply: Reply, _event: &InboundEvent) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(reply);
        Ok(())
    }
}

struct BrokenChannel;

#[async_trait]
impl ReplyChannel for BrokenChannel {
    async fn send(&self, _reply: Reply, _event: &InboundEvent) -> anyhow::Result<()> {
        anyhow::bail!("channel closed")
    }
}

fn plugin(reader: Arc<ScriptedReader>, summarizer: Arc<EchoSummarizer>) -> JinaSum {
    JinaSum::new(PluginConfig::default(), reader, summarizer)
}

fn share(content: &str) -> InboundEvent {
    InboundEvent::new(ContextType::Sharing, content)
}

#[tokio::test]
async fn test_success_returns_summary_after_single_ack() {
    let reader = ScriptedReader::new(0, "page body");
    let summarizer = Arc::new(EchoSummarizer::default());
    let channel = RecordingChannel::default();

    let reply = plugin(reader.clone(), summarizer.clone())
        .handle_shared_content(&share("https://example.com/post"), &channel)
        .await;

    assert_eq!(reply, Some(Reply::text("summary of: page body")));
    assert_eq!(channel.sent(), vec![Reply::text(ACK_MESSAGE)]);
    assert_eq!(
        reader.urls(),
        vec!["https://r.jina.ai/https://example.com/post".to_string()]
    );
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_always_failing_tries_four_times_and_acks_once() {
    let reader = ScriptedReader::always_failing();
    let summarizer = Arc::new(EchoSummarizer::default());
    let channel = RecordingChannel::default();

    let reply = plugin(reader.clone(), summarizer.clone())
        .handle_shared_content(&share("https://example.com/post"), &channel)
        .await;

    assert_eq!(reader.calls(), MAX_RETRIES + 1);
    assert_eq!(reader.calls(), 4);
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    assert_eq!(channel.sent(), vec![Reply::text(ACK_MESSAGE)]);

    let reply = reply.expect("a failure reply");
    assert_eq!(reply.kind, ReplyKind::Error);
    assert_eq!(reply.content, CANONICAL_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_recovers_on_a_later_attempt() {
    let reader = ScriptedReader::new(2, "third time lucky");
    let summarizer = Arc::new(EchoSummarizer::default());
    let channel = RecordingChannel::default();

    let reply = plugin(reader.clone(), summarizer)
        .handle_shared_content(&share("https://example.com/post"), &channel)
        .await;

    assert_eq!(reader.calls(), 3);
    assert_eq!(reply, Some(Reply::text("summary of: third time lucky")));
    assert_eq!(channel.sent().len(), 1);
}

#[tokio::test]
async fn test_succeeds_on_last_allowed_attempt() {
    let reader = ScriptedReader::new(MAX_RETRIES, "finally");
    let summarizer = Arc::new(EchoSummarizer::default());

    let reply = plugin(reader.clone(), summarizer)
        .handle_shared_content(&share("https://example.com/post"), &RecordingChannel::default())
        .await;

    assert_eq!(reader.calls(), 4);
    assert_eq!(reply, Some(Reply::text("summary of: finally")));
}

#[tokio::test]
async fn test_non_shareable_content_is_ignored() {
    let reader = ScriptedReader::new(0, "page");
    let summarizer = Arc::new(EchoSummarizer::default());
    let channel = RecordingChannel::default();
    let jina = plugin(reader.clone(), summarizer.clone());

    for context_type in [
        ContextType::Image,
        ContextType::Voice,
        ContextType::File,
        ContextType::Video,
    ] {
        let event = InboundEvent::new(context_type, "https://example.com/post");
        assert_eq!(jina.handle_shared_content(&event, &channel).await, None);
    }

    assert_eq!(reader.calls(), 0);
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_plain_text_link_is_handled() {
    let reader = ScriptedReader::new(0, "page");
    let event = InboundEvent::new(ContextType::Text, "https://example.com/post");

    let reply = plugin(reader, Arc::new(EchoSummarizer::default()))
        .handle_shared_content(&event, &RecordingChannel::default())
        .await;

    assert_eq!(reply, Some(Reply::text("summary of: page")));
}

#[tokio::test]
async fn test_rejected_links_are_silent() {
    let reader = ScriptedReader::new(0, "page");
    let channel = RecordingChannel::default();
    let jina = plugin(reader.clone(), Arc::new(EchoSummarizer::default()));

    for content in [
        "just chatting",
        "ftp://example.com/file",
        "https://support.weixin.qq.com/video/123",
    ] {
        assert_eq!(jina.handle_shared_content(&share(content), &channel).await, None);
    }

    assert_eq!(reader.calls(), 0);
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_escaped_content_is_unescaped_before_fetch() {
    let reader = ScriptedReader::new(0, "page");

    plugin(reader.clone(), Arc::new(EchoSummarizer::default()))
        .handle_shared_content(
            &share("https://example.com/?a=1&amp;b=2"),
            &RecordingChannel::default(),
        )
        .await;

    assert_eq!(
        reader.urls(),
        vec!["https://r.jina.ai/https://example.com/?a=1&b=2".to_string()]
    );
}

#[tokio::test]
async fn test_surrounding_whitespace_never_reaches_reader_url() {
    let reader = ScriptedReader::new(0, "page");

    let reply = plugin(reader.clone(), Arc::new(EchoSummarizer::default()))
        .handle_shared_content(
            &share("  https://example.com/?a=1&amp;b=2 \n"),
            &RecordingChannel::default(),
        )
        .await;

    assert_eq!(reply, Some(Reply::text("summary of: page")));
    assert_eq!(
        reader.urls(),
        vec!["https://r.jina.ai/https://example.com/?a=1&b=2".to_string()]
    );
}

#[tokio::test]
async fn test_configured_reader_base_is_used() {
    let reader = ScriptedReader::new(0, "page");
    let config = PluginConfig {
        jina_reader_base: "http://reader.local".to_string(),
        ..PluginConfig::default()
    };

    JinaSum::new(config, reader.clone(), Arc::new(EchoSummarizer::default()))
        .handle_shared_content(&share("https://example.com/x"), &RecordingChannel::default())
        .await;

    assert_eq!(
        reader.urls(),
        vec!["http://reader.local/https://example.com/x".to_string()]
    );
}

#[tokio::test]
async fn test_failed_ack_does_not_abort_summary() {
    let reader = ScriptedReader::new(0, "page");

    let reply = plugin(reader.clone(), Arc::new(EchoSummarizer::default()))
        .handle_shared_content(&share("https://example.com/post"), &BrokenChannel)
        .await;

    assert_eq!(reader.calls(), 1);
    assert_eq!(reply, Some(Reply::text("summary of: page")));
}

#[tokio::test]
async fn test_missing_api_key_exhausts_retries() {
    let reader = ScriptedReader::new(0, "page");
    let config = PluginConfig::default();
    let summarizer = Arc::new(LlmClient::new(config.clone()).unwrap());
    let channel = RecordingChannel::default();

    let reply = JinaSum::new(config, reader.clone(), summarizer)
        .handle_shared_content(&share("https://example.com/post"), &channel)
        .await;

    assert_eq!(reader.calls(), 4);
    assert_eq!(reply, Some(Reply::error(CANONICAL_FAILURE_MESSAGE)));
    assert_eq!(channel.sent().len(), 1);
}

#[tokio::test]
async fn test_concurrent_events_share_one_plugin() {
    let reader = ScriptedReader::new(0, "page");
    let jina = Arc::new(plugin(reader.clone(), Arc::new(EchoSummarizer::default())));

    let mut handles = Vec::new();
    for i in 0..8 {
        let jina = Arc::clone(&jina);
        handles.push(tokio::spawn(async move {
            let event = share(&format!("https://example.com/post/{i}"));
            jina.handle_shared_content(&event, &RecordingChannel::default())
                .await
        }));
    }

    for handle in handles {
        assert_eq!(
            handle.await.unwrap(),
            Some(Reply::text("summary of: page"))
        );
    }
    assert_eq!(reader.calls(), 8);
}
