use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use error_stack::ResultExt;
use tokio::net::TcpListener;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use kernel::KernelError;

use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::{AuthRouter, BookRouter, HealthRouter, ReviewRouter};

mod controller;
mod error;
mod extract;
mod handler;
mod route;

static SERVER_BIND: &str = "SERVER_BIND";

/// Requests a single client address may make per [`RATE_WINDOW`].
const RATE_LIMIT: u32 = 100;
const RATE_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Seconds between two quota refills, so a drained client regains the
/// whole limit over one window.
fn refill_interval() -> u64 {
    RATE_WINDOW.as_secs() / u64::from(RATE_LIMIT)
}

fn bind_address() -> error_stack::Result<SocketAddr, KernelError> {
    let bind = driver::env_opt(SERVER_BIND).unwrap_or_else(|| "0.0.0.0:8080".to_string());
    bind.parse::<SocketAddr>()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Invalid {SERVER_BIND}: {bind}"))
}

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let app = AppModule::new().await?;

    let governor = GovernorConfigBuilder::default()
        .per_second(refill_interval())
        .burst_size(RATE_LIMIT)
        .finish()
        .ok_or(KernelError::Internal)
        .attach_printable("Invalid rate limit quota")?;

    let router = axum::Router::new()
        .route_health()
        .route_auth()
        .route_book()
        .route_review()
        .layer(GovernorLayer {
            config: Arc::new(governor),
        })
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(app);

    let bind = bind_address()?;
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!("Listening on {}", bind);

    axum::serve(
        tcp,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use tower_governor::governor::GovernorConfigBuilder;

    use super::{refill_interval, RATE_LIMIT, RATE_WINDOW};

    #[test]
    fn quota_spans_the_window() {
        assert_eq!(refill_interval(), 9);
        assert_eq!(refill_interval() * u64::from(RATE_LIMIT), RATE_WINDOW.as_secs());
        assert!(GovernorConfigBuilder::default()
            .per_second(refill_interval())
            .burst_size(RATE_LIMIT)
            .finish()
            .is_some());
    }
}
