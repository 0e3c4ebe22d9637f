//! Agentic Orchestrator
//!
//! Drives one generation run through its two phases: a thinking phase that
//! extracts code/instructions from the prompt, synthesizes reasoning steps,
//! and reveals them incrementally with paced progress events, then a
//! generating phase that issues the final backend request.
//!
//! Phases are published on a watch channel (`idle -> thinking ->
//! generating -> idle`); a drop guard restores `idle` on every exit path,
//! success or failure. Runs on one orchestrator are serialized: a second
//! concurrent `run` is rejected with a busy error rather than queued.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch, Mutex, RwLock};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use codesense_analysis::CodeInstructionExtractor;
use codesense_core::{
    CodeContext, GenerationContext, ProgressEvent, SettingsStore, ThinkingStep,
};
use codesense_llm::{
    create_backend, BackendConfig, BackendKind, TextGenerationBackend, UsageStats,
};

use super::thinking::{build_thinking_prompt, fallback_steps, parse_thinking_steps};
use crate::utils::error::{AppError, AppResult};

/// Base pacing delay between revealed thinking steps
const STEP_DELAY_BASE_MS: u64 = 800;

/// Random jitter added to the base pacing delay
const STEP_DELAY_JITTER_MS: u64 = 400;

/// Orchestration phase, observable while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentPhase {
    /// No run in progress (initial and terminal)
    Idle,
    /// Synthesizing and revealing thinking steps
    Thinking,
    /// Producing the final generation
    Generating,
}

impl std::fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentPhase::Idle => write!(f, "idle"),
            AgentPhase::Thinking => write!(f, "thinking"),
            AgentPhase::Generating => write!(f, "generating"),
        }
    }
}

/// Input for one orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgenticRequest {
    /// The user's natural-language request, possibly with embedded code
    pub prompt: String,
    /// The code being worked on
    pub code: String,
    /// Caller-declared facts about the code
    #[serde(default)]
    pub context: CodeContext,
}

/// Extraction-derived counts attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgenticMetadata {
    /// Code blocks extracted from the prompt
    pub code_blocks_extracted: usize,
    /// Instruction fragments extracted from the prompt
    pub instructions_processed: usize,
    /// Thinking steps revealed during the run
    pub thinking_steps_count: usize,
}

/// A completed orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgenticResponse {
    /// The generated text
    pub generated: String,
    /// Human-facing provider label
    pub provider: String,
    /// Token usage, when the backend reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageStats>,
    /// The full thinking-step sequence
    pub thinking_steps: Vec<ThinkingStep>,
    /// Extraction-derived counts
    pub metadata: AgenticMetadata,
}

/// Factory mapping a resolved configuration to a backend instance.
///
/// Injected so tests can substitute scripted backends; defaults to
/// [`create_backend`].
pub type BackendFactory =
    Box<dyn Fn(BackendConfig) -> Arc<dyn TextGenerationBackend> + Send + Sync>;

/// Restores the phase to `Idle` when dropped, covering every exit path.
struct PhaseGuard {
    tx: watch::Sender<AgentPhase>,
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        self.tx.send_replace(AgentPhase::Idle);
    }
}

/// Two-phase generation orchestrator.
pub struct AgenticOrchestrator {
    settings: Arc<dyn SettingsStore>,
    factory: BackendFactory,
    extractor: CodeInstructionExtractor,
    phase_tx: watch::Sender<AgentPhase>,
    run_gate: Mutex<()>,
    last_response: RwLock<Option<AgenticResponse>>,
    last_steps: RwLock<Vec<ThinkingStep>>,
}

impl AgenticOrchestrator {
    /// Create an orchestrator using the standard backend factory.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_backend_factory(settings, Box::new(create_backend))
    }

    /// Create an orchestrator with an injected backend factory.
    pub fn with_backend_factory(settings: Arc<dyn SettingsStore>, factory: BackendFactory) -> Self {
        let (phase_tx, _) = watch::channel(AgentPhase::Idle);
        Self {
            settings,
            factory,
            extractor: CodeInstructionExtractor::new(),
            phase_tx,
            run_gate: Mutex::new(()),
            last_response: RwLock::new(None),
            last_steps: RwLock::new(Vec::new()),
        }
    }

    /// The current phase.
    pub fn phase(&self) -> AgentPhase {
        *self.phase_tx.borrow()
    }

    /// Subscribe to phase transitions.
    pub fn subscribe_phase(&self) -> watch::Receiver<AgentPhase> {
        self.phase_tx.subscribe()
    }

    /// The most recent completed response, if any.
    pub async fn last_response(&self) -> Option<AgenticResponse> {
        self.last_response.read().await.clone()
    }

    /// The step sequence from the most recent run.
    pub async fn last_thinking_steps(&self) -> Vec<ThinkingStep> {
        self.last_steps.read().await.clone()
    }

    /// Run one thinking-then-generating cycle.
    ///
    /// Progress events are sent on `progress` in order and never awaited for
    /// a reply. The cancellation token is honored at every suspension point
    /// (pacing delays and backend awaits); a cancelled run returns
    /// [`AppError::Cancelled`] with the phase restored to idle.
    ///
    /// # Errors
    /// - [`AppError::Busy`] when a run is already in flight
    /// - [`AppError::Config`] for an unrecognized backend identifier or a
    ///   missing credential, before any network activity
    /// - [`AppError::Backend`] when the final generation request fails
    pub async fn run(
        &self,
        request: AgenticRequest,
        progress: mpsc::Sender<ProgressEvent>,
        cancel: CancellationToken,
    ) -> AppResult<AgenticResponse> {
        let _run_gate = self.run_gate.try_lock().map_err(|_| AppError::Busy)?;

        let backend = self.resolve_backend()?;

        let _phase_guard = PhaseGuard {
            tx: self.phase_tx.clone(),
        };

        // Phase 1: thinking
        self.phase_tx.send_replace(AgentPhase::Thinking);
        let _ = progress
            .send(ProgressEvent::Thinking {
                message: "Analyzing your code and request...".to_string(),
                progress: 0,
                steps: Vec::new(),
            })
            .await;

        let extraction = self.extractor.extract(&request.prompt);
        let context = GenerationContext::assemble(
            &request.code,
            &request.context,
            extraction.code_blocks,
            extraction.instructions,
        );
        debug!(
            content_type = %context.content_type,
            code_blocks = context.code_blocks.len(),
            instructions = context.instructions.len(),
            "assembled generation context"
        );

        let steps = self
            .synthesize_thinking_steps(backend.as_ref(), &context, &cancel)
            .await?;
        self.reveal_thinking_steps(&progress, &steps, &cancel).await?;
        *self.last_steps.write().await = steps.clone();

        // Phase 2: generating
        self.phase_tx.send_replace(AgentPhase::Generating);
        let _ = progress
            .send(ProgressEvent::Generating {
                message: "Generating your solution...".to_string(),
                progress: 0,
            })
            .await;

        let system_prompt = build_system_prompt(&context);
        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            result = backend.generate(
                &system_prompt,
                &context.user_request,
                &request.code,
                &context,
            ) => result?,
        };

        let response = AgenticResponse {
            generated: output.content,
            provider: output.provider,
            usage: output.usage,
            metadata: AgenticMetadata {
                code_blocks_extracted: context.code_blocks.len(),
                instructions_processed: context.instructions.len(),
                thinking_steps_count: steps.len(),
            },
            thinking_steps: steps,
        };

        *self.last_response.write().await = Some(response.clone());
        info!(provider = %response.provider, "generation run completed");
        Ok(response)
    }

    /// Resolve settings into a backend, failing fast before any I/O.
    fn resolve_backend(&self) -> AppResult<Arc<dyn TextGenerationBackend>> {
        let backend_id = self.settings.active_backend();
        let kind: BackendKind = backend_id.parse().map_err(AppError::config)?;

        let api_key = self.settings.api_key(&backend_id);
        if kind.requires_api_key() && api_key.is_none() {
            return Err(AppError::config(format!(
                "API key not configured for {}. Please add your API key in settings.",
                backend_id
            )));
        }

        Ok((self.factory)(BackendConfig {
            kind,
            api_key,
            base_url: None,
            model: self.settings.model(),
            temperature: self.settings.temperature(),
            ..BackendConfig::default()
        }))
    }

    /// Ask the backend for thinking steps, degrading to the local fallback
    /// on any backend or parse failure. Only cancellation is an error here.
    async fn synthesize_thinking_steps(
        &self,
        backend: &dyn TextGenerationBackend,
        context: &GenerationContext,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ThinkingStep>> {
        let prompt = build_thinking_prompt(context);
        let scratch = GenerationContext::assemble("", &CodeContext::default(), vec![], vec![]);

        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            result = backend.generate(&prompt, "", "", &scratch) => result,
        };

        let steps = match reply {
            Ok(output) => match parse_thinking_steps(&output.content) {
                Some(steps) => steps,
                None => {
                    warn!("thinking-step reply not parseable, using fallback steps");
                    fallback_steps()
                }
            },
            Err(err) => {
                warn!(error = %err, "thinking-step request failed, using fallback steps");
                fallback_steps()
            }
        };

        Ok(steps)
    }

    /// Reveal steps one at a time with paced progress events.
    async fn reveal_thinking_steps(
        &self,
        progress: &mpsc::Sender<ProgressEvent>,
        steps: &[ThinkingStep],
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        let total = steps.len();

        for (index, step) in steps.iter().enumerate() {
            let percent = ((index + 1) as f64 * 100.0 / total as f64).round() as u8;
            let _ = progress
                .send(ProgressEvent::Thinking {
                    message: step.message.clone(),
                    progress: percent,
                    steps: steps[..=index].to_vec(),
                })
                .await;

            let delay_ms =
                STEP_DELAY_BASE_MS + rand::thread_rng().gen_range(0..STEP_DELAY_JITTER_MS);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AppError::Cancelled),
                _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {}
            }
        }

        Ok(())
    }
}

/// System prompt for the final generation request.
fn build_system_prompt(context: &GenerationContext) -> String {
    format!(
        r#"You are an expert software engineer and intelligent coding assistant with deep knowledge across all programming languages and frameworks.

You have just completed a thorough analysis of the user's code and request. Now provide a comprehensive, production-ready solution.

Your Response Should Include:
1. Clear explanation of what you're doing
2. Well-formatted, commented code
3. Any important considerations or notes
4. Brief summary of improvements made

Code Context:
- Language: {}
- Lines: {}
- User Request: {}

Provide your response in a conversational, helpful tone as if you're pair programming with the user."#,
        context.language, context.lines, context.user_request
    )
}
