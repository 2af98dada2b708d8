//! quaytwind - scenario dashboard host
//!
//! Serves the container-terminal dashboard over newline-delimited JSON on TCP.
//! Every connection gets its own session: its own scenario selection, AI
//! override and frame clock, advanced every `frame_delay_ms` until the client
//! disconnects or the daemon shuts down.
//!
//! Configuration:
//! - Linux: ~/.local/share/quaytwin/config.json
//! - Windows: %APPDATA%\quaytwin\config.json
//! - MacOS: ~/Library/Application Support/quaytwin/config.json
//!
//! Flags: `--addr host:port`, `--frame-delay-ms N`, `--logo path`.

use quaytwin::dashboard::Dashboard;
use quaytwin::logo::LogoAsset;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};

mod config;
mod error;
mod paths;
mod session;

use config::DaemonConfig;
use paths::AppPaths;
use session::{Session, SessionContext, SessionEnd};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let paths = AppPaths::new()?;
    let mut config = DaemonConfig::load(&paths.config_file())?;
    config.apply_args(std::env::args().skip(1))?;
    info!(
        "Config loaded (data dir {}; frame delay {:?})",
        paths.data_dir().display(),
        config.frame_delay()
    );

    // The logo is decoration; without it the header simply has no image.
    let logo = LogoAsset::probe(&config.logo_path);
    match &logo {
        Some(l) => info!("Header logo: {}", l.path.display()),
        None => debug!("No logo at {}; header renders without it", config.logo_path.display()),
    }

    let ctx = SessionContext {
        dashboard: Arc::new(Dashboard::new(logo)),
        frame_delay: config.frame_delay(),
        shutdown: CancellationToken::new(),
    };

    // Ctrl-C stops accepting and cancels every session.
    {
        let shutdown = ctx.shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C: shutting down");
                shutdown.cancel();
            }
        });
    }

    let listener = TcpListener::bind(&config.addr).await?;
    info!("quaytwind listening on {}", config.addr);

    serve(listener, ctx).await;
    info!("quaytwind stopped");
    Ok(())
}

/// Accept clients until the root token is cancelled, then wait for every
/// session to finish.
async fn serve(listener: TcpListener, ctx: SessionContext) {
    let sessions = TaskTracker::new();

    loop {
        tokio::select! {
            _ = ctx.shutdown.cancelled() => break,
            accepted = listener.accept() => {
                let (stream, addr) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        // EMFILE, ECONNABORTED and friends; keep serving.
                        error!("Accept failed: {}", e);
                        continue;
                    }
                };
                info!("Client connected: {}", addr);

                let session = Session::new(addr.to_string(), ctx.clone());
                sessions.spawn(async move {
                    let (reader, writer) = stream.into_split();
                    match session.run(reader, writer).await {
                        Ok(SessionEnd::Disconnected) => info!("Client disconnected: {}", addr),
                        Ok(SessionEnd::Cancelled) => debug!("Session closed by shutdown: {}", addr),
                        Err(e) => error!("Client handler error ({}): {}", addr, e),
                    }
                });
            }
        }
    }

    sessions.close();
    sessions.wait().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use quaytwin::protocol::{Request, Response};
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpStream;
    use tokio::time;

    async fn start() -> (std::net::SocketAddr, CancellationToken, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let ctx = SessionContext {
            dashboard: Arc::new(Dashboard::new(None)),
            frame_delay: Duration::from_millis(5),
            shutdown: CancellationToken::new(),
        };
        let shutdown = ctx.shutdown.clone();
        (addr, shutdown, tokio::spawn(serve(listener, ctx)))
    }

    async fn send(stream: &mut TcpStream, req: &Request) {
        let mut line = serde_json::to_vec(req).unwrap();
        line.push(b'\n');
        stream.write_all(&line).await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_request_stops_the_daemon() {
        let (addr, _, server) = start().await;

        let mut other = TcpStream::connect(addr).await.unwrap();
        send(&mut other, &Request::GetView).await;

        let mut stream = TcpStream::connect(addr).await.unwrap();
        send(&mut stream, &Request::Shutdown).await;
        let mut lines = BufReader::new(&mut stream).lines();
        let reply = lines.next_line().await.unwrap().unwrap();
        assert!(matches!(
            serde_json::from_str::<Response>(&reply).unwrap(),
            Response::Success { .. }
        ));

        time::timeout(Duration::from_secs(5), server)
            .await
            .expect("daemon kept running")
            .unwrap();
    }

    #[tokio::test]
    async fn watcher_that_never_reads_does_not_block_shutdown() {
        let (addr, shutdown, server) = start().await;

        let mut stream = TcpStream::connect(addr).await.unwrap();
        send(&mut stream, &Request::Watch { enabled: true }).await;
        // Frames pile up unread.
        time::sleep(Duration::from_millis(500)).await;

        shutdown.cancel();
        time::timeout(Duration::from_secs(5), server)
            .await
            .expect("daemon waited on a stalled session")
            .unwrap();
        drop(stream);
    }
}
