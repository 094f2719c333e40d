//! Demo WebSocket — the scripted "processing" session.
//!
//! DESIGN
//! ======
//! On upgrade, the handler enters a `select!` loop over the socket and the
//! active run's event channel. A `query` message classifies the text,
//! records it in the session transcript, and spawns the pipeline runner
//! task, which feeds progress events into a channel created for that run.
//! The loop owns all outbound sends and the transcript; the runner never
//! touches the socket. The channel lives and dies with its run: tearing a
//! run down drops the receiver, so events the runner had already buffered
//! can never reach the client after a reset or a superseding query.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → loop
//! 2. `query` → abort any active run → `chat` + `accepted` → spawn runner
//! 3. Runner emits `step_started`/`step_completed`/`completed`, then the
//!    report after a short delay
//! 4. `reset` or close → abort the runner — no events after teardown
//!
//! A faked pipeline on real timers is easy to leak; aborting the runner
//! task on every exit path is what guarantees the socket never sees stale
//! progress from a previous run.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::chat::{ChatLog, ChatMessage, Role};
use crate::services::classify::{QueryKind, classify};
use crate::services::pipeline::{Phase, Pipeline, PipelineEvent};
use crate::services::report::{AnalysisReport, build_report};
use crate::state::{AppState, DemoConfig};

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Messages a demo client may send.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemoRequest {
    Query { text: String },
    Reset,
}

/// Events streamed back to the demo client.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemoEvent {
    Accepted { kind: QueryKind },
    Chat { message: ChatMessage },
    StepStarted { index: usize, label: String, progress: f64 },
    StepCompleted { index: usize, progress: f64 },
    Completed { progress: f64 },
    Report { report: AnalysisReport },
    ResetDone,
    Error { message: String },
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, state))
}

// =============================================================================
// ACTIVE RUN
// =============================================================================

/// A pipeline run in flight: the runner task plus the receiving end of its
/// dedicated event channel. Dropping this aborts nothing by itself — the
/// session aborts the task — but dropping the receiver guarantees any
/// events the runner already buffered are discarded with the run.
struct ActiveRun {
    task: JoinHandle<()>,
    rx: mpsc::Receiver<DemoEvent>,
}

/// Receive the next runner event, or pend forever when no run is active.
async fn next_run_event(run: &mut Option<ActiveRun>) -> Option<DemoEvent> {
    match run {
        Some(active) => active.rx.recv().await,
        None => std::future::pending().await,
    }
}

// =============================================================================
// SESSION LOOP
// =============================================================================

async fn run_session(mut socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    let mut chat = ChatLog::default();
    let mut run: Option<ActiveRun> = None;

    info!(%session_id, "demo: session connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let events = handle_request(&state, &mut chat, &mut run, text.as_str());
                        for event in events {
                            if send_event(&mut socket, &event).await.is_err() {
                                abort_run(&mut run);
                                return;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            event = next_run_event(&mut run) => {
                let Some(event) = event else {
                    // Runner finished and its channel drained; retire the run.
                    run = None;
                    continue;
                };
                // The runner delivers the report here so the transcript
                // update and the report reach the client in order.
                let events = match event {
                    DemoEvent::Report { report } => {
                        let message = chat.push(Role::Assistant, assistant_summary(&report));
                        vec![DemoEvent::Chat { message }, DemoEvent::Report { report }]
                    }
                    other => vec![other],
                };
                for event in events {
                    if send_event(&mut socket, &event).await.is_err() {
                        abort_run(&mut run);
                        return;
                    }
                }
            }
        }
    }

    abort_run(&mut run);
    info!(%session_id, "demo: session closed");
}

/// Handle one inbound message; returns events to send to the client now.
/// Runner-produced events arrive later through the active run's channel.
fn handle_request(
    state: &AppState,
    chat: &mut ChatLog,
    run: &mut Option<ActiveRun>,
    text: &str,
) -> Vec<DemoEvent> {
    let request: DemoRequest = match serde_json::from_str(text) {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e, "demo: unparseable request");
            return vec![DemoEvent::Error { message: "unrecognized message".into() }];
        }
    };

    match request {
        DemoRequest::Query { text } => {
            // A new query supersedes any run in progress, buffered events
            // included: the old channel dies with the old run.
            abort_run(run);

            let kind = classify(&text);
            let message = chat.push(Role::User, text);
            info!(kind = kind.as_str(), "demo: query accepted");

            let (tx, rx) = mpsc::channel::<DemoEvent>(64);
            let task = tokio::spawn(run_pipeline(state.demo.clone(), kind, tx));
            *run = Some(ActiveRun { task, rx });

            vec![DemoEvent::Chat { message }, DemoEvent::Accepted { kind }]
        }
        DemoRequest::Reset => {
            abort_run(run);
            chat.clear();
            vec![DemoEvent::ResetDone]
        }
    }
}

fn abort_run(run: &mut Option<ActiveRun>) {
    if let Some(active) = run.take() {
        active.task.abort();
    }
}

async fn send_event(socket: &mut WebSocket, event: &DemoEvent) -> Result<(), axum::Error> {
    let json = serde_json::to_string(event).unwrap_or_default();
    socket.send(Message::Text(json.into())).await
}

fn assistant_summary(report: &AnalysisReport) -> String {
    format!("{} complete — {}", report.title, report.summary)
}

// =============================================================================
// PIPELINE RUNNER
// =============================================================================

/// Drive the simulation to completion, emitting events on every boundary,
/// then deliver the report after the fixed completion delay. Stops silently
/// when the receiver is gone. Cancellation is external: the session loop
/// aborts this task on reset, superseding query, or disconnect.
pub(crate) async fn run_pipeline(config: DemoConfig, kind: QueryKind, tx: mpsc::Sender<DemoEvent>) {
    let mut pipeline = Pipeline::new(config.steps.clone());

    for event in pipeline.start() {
        if tx.send(to_wire(&event, &pipeline)).await.is_err() {
            return;
        }
    }

    let mut interval = tokio::time::interval(config.tick);
    interval.tick().await; // first tick resolves immediately
    while matches!(pipeline.phase(), Phase::Running(_)) {
        interval.tick().await;
        for event in pipeline.tick(config.tick) {
            if tx.send(to_wire(&event, &pipeline)).await.is_err() {
                return;
            }
        }
    }

    tokio::time::sleep(config.completion_delay).await;
    let report = build_report(kind);
    let _ = tx.send(DemoEvent::Report { report }).await;
}

fn to_wire(event: &PipelineEvent, pipeline: &Pipeline) -> DemoEvent {
    let progress = pipeline.progress();
    match event {
        PipelineEvent::StepStarted { index, label } => {
            DemoEvent::StepStarted { index: *index, label: (*label).to_string(), progress }
        }
        PipelineEvent::StepCompleted { index } => DemoEvent::StepCompleted { index: *index, progress },
        PipelineEvent::Completed => DemoEvent::Completed { progress },
    }
}

#[cfg(test)]
#[path = "demo_test.rs"]
mod tests;
