//! One client connection = one dashboard session.
//!
//! The session task owns its `SessionState` outright. A single `select!` loop
//! interleaves request handling with the render timer, so cycles never overlap
//! and state needs no lock. The timer is re-armed only after a cycle finishes:
//! a slow render (or a slow client) delays the next frame instead of queueing.

use crate::error::DaemonError;
use quaytwin::dashboard::Dashboard;
use quaytwin::protocol::{Request, Response, ScenarioEntry};
use quaytwin::session::SessionState;
use quaytwin::svg::{scene_to_svg, DEFAULT_HEIGHT_PX, DEFAULT_WIDTH_PX};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const SVG_MIN_PX: u32 = 16;
const SVG_MAX_PX: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Client closed its side.
    Disconnected,
    /// Daemon shutdown.
    Cancelled,
}

/// Shared, read-only inputs for every session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub dashboard: Arc<Dashboard>,
    pub frame_delay: Duration,
    /// Root token; cancelling it stops the whole daemon.
    pub shutdown: CancellationToken,
}

pub struct Session {
    peer: String,
    ctx: SessionContext,
    state: SessionState,
    watching: bool,
}

impl Session {
    pub fn new(peer: impl Into<String>, ctx: SessionContext) -> Self {
        Self {
            peer: peer.into(),
            ctx,
            state: SessionState::new(),
            watching: false,
        }
    }

    pub async fn run<R, W>(mut self, reader: R, mut writer: W) -> Result<SessionEnd, DaemonError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let cancel = self.ctx.shutdown.child_token();
        let mut reader = BufReader::new(reader);
        // Partial lines survive a select turn that another arm wins.
        let mut buf = Vec::new();

        let timer = time::sleep(self.ctx.frame_delay);
        tokio::pin!(timer);

        loop {
            let response = tokio::select! {
                biased;

                _ = cancel.cancelled() => return Ok(self.cancelled()),

                () = &mut timer => {
                    let frame = if self.watching {
                        let (view, next) = self.ctx.dashboard.cycle(self.state);
                        self.state = next;
                        Some(Response::Frame(Box::new(view)))
                    } else {
                        // Nobody is looking; keep the clock running.
                        self.state.tick();
                        None
                    };
                    timer.as_mut().reset(Instant::now() + self.ctx.frame_delay);
                    frame
                }

                read = reader.read_until(b'\n', &mut buf) => {
                    if read? == 0 && buf.is_empty() {
                        return Ok(SessionEnd::Disconnected);
                    }
                    let line = std::mem::take(&mut buf);
                    self.handle_line(&line)
                }
            };

            let Some(response) = response else {
                continue;
            };
            // A reply that fits goes out even after cancel (the `Shutdown`
            // acknowledgement). A write stalled on a client that stopped
            // reading yields to cancellation.
            tokio::select! {
                biased;

                written = write_response(&mut writer, &response) => written?,
                _ = cancel.cancelled() => return Ok(self.cancelled()),
            }
        }
    }

    fn cancelled(&self) -> SessionEnd {
        debug!("[{}] session cancelled at frame {}", self.peer, self.state.frame());
        SessionEnd::Cancelled
    }

    /// `None` for blank lines. Bytes that are not valid JSON (or not UTF-8)
    /// get an error reply.
    fn handle_line(&mut self, line: &[u8]) -> Option<Response> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        Some(match serde_json::from_slice::<Request>(line) {
            Ok(req) => self.handle(req),
            Err(e) => Response::Error {
                message: format!("Invalid request: {}", e),
            },
        })
    }

    fn handle(&mut self, req: Request) -> Response {
        match req {
            Request::ListScenarios => Response::Scenarios {
                entries: ScenarioEntry::catalog(),
            },
            Request::GetView => Response::View(Box::new(self.ctx.dashboard.render(&self.state))),
            Request::GetSvg { width, height } => {
                let view = self.ctx.dashboard.render(&self.state);
                let w = width.unwrap_or(DEFAULT_WIDTH_PX).clamp(SVG_MIN_PX, SVG_MAX_PX);
                let h = height.unwrap_or(DEFAULT_HEIGHT_PX).clamp(SVG_MIN_PX, SVG_MAX_PX);
                Response::Svg {
                    frame: view.frame,
                    svg: scene_to_svg(&view.scene, w, h),
                }
            }
            Request::SelectScenario { scenario } => {
                self.state.select_scenario(scenario);
                info!("[{}] scenario -> {}", self.peer, scenario.key());
                Response::Success {
                    message: format!("Scenario set to {}", scenario.label()),
                }
            }
            Request::SetOptimize { enabled } => {
                self.state.set_ai_active(enabled);
                info!("[{}] AI optimization {}", self.peer, if enabled { "on" } else { "off" });
                Response::Success {
                    message: format!(
                        "AI optimization {} (effective scenario: {})",
                        if enabled { "enabled" } else { "disabled" },
                        self.state.effective_scenario().label()
                    ),
                }
            }
            Request::Watch { enabled } => {
                self.watching = enabled;
                debug!("[{}] watching = {}", self.peer, enabled);
                Response::Success {
                    message: format!("Watch {}", if enabled { "started" } else { "stopped" }),
                }
            }
            Request::Shutdown => {
                info!("[{}] shutdown requested", self.peer);
                self.ctx.shutdown.cancel();
                Response::Success {
                    message: "Shutting down".to_string(),
                }
            }
        }
    }
}

async fn write_response<W>(writer: &mut W, response: &Response) -> Result<(), DaemonError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quaytwin::scenario::{Benchmark, Scenario};
    use tokio::io::{DuplexStream, Lines, ReadHalf, WriteHalf};
    use tokio::task::JoinHandle;

    struct Client {
        lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
        shutdown: CancellationToken,
        task: JoinHandle<Result<SessionEnd, DaemonError>>,
    }

    impl Client {
        fn start() -> Self {
            Self::with(1 << 20, Duration::from_millis(5))
        }

        fn with(buffer: usize, frame_delay: Duration) -> Self {
            let (client, server) = tokio::io::duplex(buffer);
            let (sr, sw) = tokio::io::split(server);
            let shutdown = CancellationToken::new();
            let ctx = SessionContext {
                dashboard: Arc::new(Dashboard::new(None)),
                frame_delay,
                shutdown: shutdown.clone(),
            };
            let task = tokio::spawn(Session::new("test", ctx).run(sr, sw));

            let (cr, cw) = tokio::io::split(client);
            Self {
                lines: BufReader::new(cr).lines(),
                writer: cw,
                shutdown,
                task,
            }
        }

        async fn send_bytes(&mut self, line: &[u8]) {
            self.writer.write_all(line).await.unwrap();
            self.writer.write_all(b"\n").await.unwrap();
        }

        async fn send_raw(&mut self, line: &str) {
            self.send_bytes(line.as_bytes()).await;
        }

        async fn send(&mut self, req: &Request) {
            let line = serde_json::to_string(req).unwrap();
            self.send_raw(&line).await;
        }

        async fn recv(&mut self) -> Response {
            let line = time::timeout(Duration::from_secs(5), self.lines.next_line())
                .await
                .expect("timed out waiting for a response")
                .unwrap()
                .expect("session closed");
            serde_json::from_str(&line).unwrap()
        }

        /// Next response that is not a streamed frame.
        async fn reply(&mut self) -> Response {
            loop {
                match self.recv().await {
                    Response::Frame(_) => continue,
                    other => return other,
                }
            }
        }
    }

    #[tokio::test]
    async fn select_then_view_shows_scenario_kpis() {
        let mut c = Client::start();

        c.send(&Request::SelectScenario {
            scenario: Benchmark::Productivo,
        })
        .await;
        assert!(matches!(c.reply().await, Response::Success { .. }));

        c.send(&Request::GetView).await;
        match c.reply().await {
            Response::View(v) => {
                assert_eq!(v.scenario, Scenario::Productivo);
                assert_eq!(v.kpis.metrics[0].value, 45.85);
                assert_eq!(v.kpis.metrics[1].value, 44.42);
                assert_eq!(v.kpis.metrics[2].value, 14676.0);
                assert!(v.explanation.is_none());
            }
            other => panic!("expected View, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn optimize_overrides_selection() {
        let mut c = Client::start();

        c.send(&Request::SelectScenario {
            scenario: Benchmark::Ambiental,
        })
        .await;
        c.reply().await;
        c.send(&Request::SetOptimize { enabled: true }).await;
        assert!(matches!(c.reply().await, Response::Success { .. }));

        c.send(&Request::GetView).await;
        match c.reply().await {
            Response::View(v) => {
                assert_eq!(v.scenario, Scenario::OptimizadoIa);
                assert_eq!(v.selector.selected, Benchmark::Ambiental);
                assert!(v.explanation.is_some());
            }
            other => panic!("expected View, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_keeps_session_alive() {
        let mut c = Client::start();

        c.send_raw("this is not json").await;
        match c.reply().await {
            Response::Error { message } => assert!(message.starts_with("Invalid request")),
            other => panic!("expected Error, got {other:?}"),
        }

        c.send(&Request::ListScenarios).await;
        match c.reply().await {
            Response::Scenarios { entries } => assert_eq!(entries.len(), 5),
            other => panic!("expected Scenarios, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_utf8_line_keeps_session_alive() {
        let mut c = Client::start();

        c.send_bytes(b"{\"type\":\"GetView\xff\"}").await;
        match c.reply().await {
            Response::Error { message } => assert!(message.starts_with("Invalid request")),
            other => panic!("expected Error, got {other:?}"),
        }

        c.send(&Request::GetView).await;
        assert!(matches!(c.reply().await, Response::View(_)));
    }

    #[tokio::test]
    async fn blank_lines_get_no_reply() {
        let mut c = Client::start();

        c.send_raw("   ").await;
        c.send(&Request::ListScenarios).await;
        assert!(matches!(c.reply().await, Response::Scenarios { .. }));
    }

    #[tokio::test]
    async fn request_burst_does_not_stall_clock() {
        let mut c = Client::with(1 << 20, Duration::from_millis(1));
        const BURST: usize = 300;

        // Queue every request before reading any reply.
        for _ in 0..BURST {
            c.send(&Request::GetView).await;
        }
        let mut frames = Vec::with_capacity(BURST);
        for _ in 0..BURST {
            match c.reply().await {
                Response::View(v) => frames.push(v.frame),
                other => panic!("expected View, got {other:?}"),
            }
        }
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames[BURST - 1] > frames[0]);
    }

    #[tokio::test]
    async fn stalled_watcher_still_honours_shutdown() {
        // Small pipe and a client that never reads: the first frame cannot be
        // written in full.
        let c = Client::with(4096, Duration::from_millis(5));
        let Client {
            lines,
            mut writer,
            shutdown,
            task,
        } = c;
        let line = serde_json::to_string(&Request::Watch { enabled: true }).unwrap();
        writer.write_all(line.as_bytes()).await.unwrap();
        writer.write_all(b"\n").await.unwrap();

        time::sleep(Duration::from_millis(200)).await;
        assert!(!task.is_finished());
        shutdown.cancel();

        let end = time::timeout(Duration::from_secs(2), task)
            .await
            .expect("session ignored cancellation")
            .unwrap();
        assert_eq!(end.unwrap(), SessionEnd::Cancelled);
        drop((lines, writer));
    }

    #[tokio::test]
    async fn watched_frames_advance_by_one() {
        let mut c = Client::start();

        c.send(&Request::Watch { enabled: true }).await;
        assert!(matches!(c.recv().await, Response::Success { .. }));

        let mut frames = Vec::new();
        while frames.len() < 5 {
            if let Response::Frame(v) = c.recv().await {
                frames.push(v.frame);
            }
        }
        for w in frames.windows(2) {
            assert_eq!(w[1], w[0] + 1);
        }
    }

    #[tokio::test]
    async fn svg_request_is_clamped_and_rendered() {
        let mut c = Client::start();

        c.send(&Request::GetSvg {
            width: Some(1),
            height: None,
        })
        .await;
        match c.reply().await {
            Response::Svg { svg, .. } => {
                assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="600""#));
            }
            other => panic!("expected Svg, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn shutdown_cancels_session() {
        let mut c = Client::start();

        c.send(&Request::Shutdown).await;
        assert!(matches!(c.reply().await, Response::Success { .. }));
        assert!(c.shutdown.is_cancelled());

        let end = time::timeout(Duration::from_secs(5), c.task).await.unwrap().unwrap();
        assert_eq!(end.unwrap(), SessionEnd::Cancelled);
    }

    #[tokio::test]
    async fn disconnect_ends_session() {
        let c = Client::start();
        let Client {
            lines,
            writer,
            task,
            ..
        } = c;
        drop(writer);
        drop(lines);

        let end = time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
        assert_eq!(end.unwrap(), SessionEnd::Disconnected);
    }
}
