use anyhow::{Context, Result};
use axum::{routing::get, Router};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers::{
    delay_async_handler, delay_handler, home_handler, not_found_handler, timer_handler,
};
use crate::routes;
use crate::state::AppState;
use crate::variant::Variant;

const LISTEN_BACKLOG: i32 = 1024;

/// Build the router for one variant.
///
/// Only GET is routed; anything else, including other methods on a known
/// path, falls through to 404.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new().route(
        routes::HOME,
        get(home_handler).fallback(not_found_handler),
    );

    let router = match state.variant {
        Variant::Basic | Variant::Cluster => router
            .route(routes::DELAY, get(delay_handler).fallback(not_found_handler))
            .route(
                routes::DELAY_ASYNC,
                get(delay_async_handler).fallback(not_found_handler),
            ),
        Variant::Timer => {
            router.route(routes::TIMER, get(timer_handler).fallback(not_found_handler))
        }
    };

    router
        .fallback(not_found_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// A bound, not yet serving, HTTP dispatcher.
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Bind the configured address and prepare the router.
    ///
    /// With `reuse_port` set, several processes may bind the same port and
    /// the kernel spreads incoming connections across them.
    pub async fn bind(config: Config, variant: Variant, reuse_port: bool) -> Result<Self> {
        let bind_address = config.bind_address();
        let addr = tokio::net::lookup_host(bind_address.as_str())
            .await
            .with_context(|| format!("Failed to resolve bind address {}", bind_address))?
            .next()
            .with_context(|| format!("Bind address {} resolved to nothing", bind_address))?;

        let listener = bind_listener(addr, reuse_port)?;
        let router = build_router(AppState::new(config, variant));

        Ok(Server { listener, router })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    /// Serve until the process dies.
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        tracing::info!("Server listening on port {}", addr.port());

        axum::serve(self.listener, self.router)
            .await
            .context("HTTP server failed")
    }
}

fn bind_listener(addr: SocketAddr, reuse_port: bool) -> Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
        .context("Failed to create listening socket")?;

    socket
        .set_reuse_address(true)
        .context("Failed to set SO_REUSEADDR")?;

    if reuse_port {
        set_reuse_port(&socket)?;
    }

    socket
        .bind(&addr.into())
        .with_context(|| format!("Failed to bind {} (is the port already in use?)", addr))?;
    socket
        .listen(LISTEN_BACKLOG)
        .with_context(|| format!("Failed to listen on {}", addr))?;
    socket
        .set_nonblocking(true)
        .context("Failed to make listener non-blocking")?;

    TcpListener::from_std(socket.into()).context("Failed to register listener with the runtime")
}

#[cfg(unix)]
fn set_reuse_port(socket: &Socket) -> Result<()> {
    socket
        .set_reuse_port(true)
        .context("Failed to set SO_REUSEPORT")
}

#[cfg(not(unix))]
fn set_reuse_port(_socket: &Socket) -> Result<()> {
    anyhow::bail!("Port sharing across processes requires SO_REUSEPORT, which this platform lacks")
}
