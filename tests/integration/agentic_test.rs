//! Agentic Orchestrator Integration Tests
//!
//! Exercises the public orchestration surface with scripted backends:
//! phase lifecycle, progress event ordering, the thinking-step fallback,
//! configuration fail-fast, and busy rejection.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use codesense_core::{
    CodeContext, GenerationContext, ProgressEvent, SettingsStore, StaticSettings,
};
use codesense_llm::{GenerationOutput, LlmError, LlmResult, TextGenerationBackend};
use codesense_desktop::services::agentic::BackendFactory;
use codesense_desktop::{AgentPhase, AgenticOrchestrator, AgenticRequest, AppError};

/// Minimal scripted backend for driving the orchestrator.
struct ReplayBackend {
    replies: Mutex<VecDeque<LlmResult<GenerationOutput>>>,
}

impl ReplayBackend {
    fn new(replies: Vec<LlmResult<GenerationOutput>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from(replies)),
        })
    }

    fn ok(content: &str) -> LlmResult<GenerationOutput> {
        Ok(GenerationOutput {
            content: content.to_string(),
            provider: "Replay".to_string(),
            usage: None,
        })
    }
}

#[async_trait]
impl TextGenerationBackend for ReplayBackend {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn label(&self) -> String {
        "Replay".to_string()
    }

    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _code: &str,
        _context: &GenerationContext,
    ) -> LlmResult<GenerationOutput> {
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(LlmError::Other {
                message: "script exhausted".to_string(),
            })
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }
}

fn settings() -> Arc<dyn SettingsStore> {
    Arc::new(StaticSettings::new("openai", "gpt-4").with_api_key("openai", "sk-test"))
}

fn orchestrator_with(backend: Arc<ReplayBackend>) -> AgenticOrchestrator {
    let factory: BackendFactory =
        Box::new(move |_| Arc::clone(&backend) as Arc<dyn TextGenerationBackend>);
    AgenticOrchestrator::with_backend_factory(settings(), factory)
}

fn request() -> AgenticRequest {
    AgenticRequest {
        prompt: "Add retries to this\n```\nfetch(url)\n```\nand keep it readable".to_string(),
        code: "fetch(url)".to_string(),
        context: CodeContext {
            language: Some("javascript".to_string()),
            lines: 1,
            characters: 10,
        },
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_run_reports_progress_in_order() {
    let backend = ReplayBackend::new(vec![
        ReplayBackend::ok(r#"[{"message": "inspect", "focus": "analysis"}, {"message": "rewrite", "focus": "solution"}]"#),
        ReplayBackend::ok("final text"),
    ]);
    let orchestrator = orchestrator_with(backend);
    let (tx, mut rx) = mpsc::channel(64);

    let response = orchestrator
        .run(request(), tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.generated, "final text");
    assert_eq!(response.metadata.code_blocks_extracted, 1);
    assert_eq!(response.metadata.instructions_processed, 2);
    assert_eq!(response.metadata.thinking_steps_count, 2);

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    // Announcement, two step reveals, generating announcement.
    assert_eq!(events.len(), 4);
    let progresses: Vec<u8> = events.iter().map(|e| e.progress()).collect();
    assert_eq!(progresses, vec![0, 50, 100, 0]);
    assert!(matches!(events[3], ProgressEvent::Generating { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_thinking_json_uses_four_step_fallback() {
    let backend = ReplayBackend::new(vec![
        ReplayBackend::ok("{ definitely not an array"),
        ReplayBackend::ok("generated anyway"),
    ]);
    let orchestrator = orchestrator_with(backend);
    let (tx, _rx) = mpsc::channel(64);

    let response = orchestrator
        .run(request(), tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.generated, "generated anyway");
    assert_eq!(response.metadata.thinking_steps_count, 4);
    assert_eq!(response.thinking_steps.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_failed_run_still_ends_idle() {
    let backend = ReplayBackend::new(vec![
        ReplayBackend::ok(r#"[{"message": "inspect", "focus": "analysis"}]"#),
        Err(LlmError::NetworkError {
            message: "connection refused".to_string(),
        }),
    ]);
    let orchestrator = orchestrator_with(backend);
    let (tx, _rx) = mpsc::channel(64);

    let err = orchestrator
        .run(request(), tx, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Backend(_)));
    assert_eq!(orchestrator.phase(), AgentPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_unconfigured_backend_is_rejected_without_io() {
    let factory: BackendFactory = Box::new(|_| unreachable!("no backend may be built"));
    let orchestrator = AgenticOrchestrator::with_backend_factory(
        Arc::new(StaticSettings::new("gemini", "gemini-pro")),
        factory,
    );
    let (tx, _rx) = mpsc::channel(8);

    // Gemini requires a key and none is configured.
    let err = orchestrator
        .run(request(), tx, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn test_second_concurrent_run_is_busy() {
    let backend = ReplayBackend::new(vec![
        ReplayBackend::ok(r#"[{"message": "inspect", "focus": "analysis"}]"#),
        ReplayBackend::ok("first wins"),
    ]);
    let orchestrator = Arc::new(orchestrator_with(backend));
    let (tx, _rx) = mpsc::channel(64);

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        let tx = tx.clone();
        tokio::spawn(async move { orchestrator.run(request(), tx, CancellationToken::new()).await })
    };
    tokio::task::yield_now().await;

    let err = orchestrator
        .run(request(), tx, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Busy));

    assert!(first.await.unwrap().is_ok());
}
