// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Development host for the tessera browser runtime.
//!
//! Serves the host page, the wasm-bindgen output of `tessera-web` under
//! `/pkg`, and a demo server app behind `POST /api/render` and `POST /hcc`.
//!
//! ```text
//! wasm-pack build crates/tessera-web --target web --out-dir pkg
//! cargo run -p tessera-devhost -- --pkg-dir crates/tessera-web/pkg
//! ```

mod demo;
mod page;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::server::{router, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "tessera development host")]
struct Args {
    /// TCP listener for the browser (e.g. 127.0.0.1:8080)
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,
    /// Directory holding the wasm-bindgen output (tessera_web.js + .wasm)
    #[arg(long, default_value = "crates/tessera-web/pkg")]
    pkg_dir: PathBuf,
    /// Page and demo app title
    #[arg(long, default_value = "Tessera demo")]
    title: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    if !args.pkg_dir.join("tessera_web.js").is_file() {
        warn!(
            pkg_dir = %args.pkg_dir.display(),
            "wasm bundle not found; the page will stay on its loading indicator"
        );
    }

    let app = router(AppState::new(&args.title), &args.pkg_dir);
    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("bind {}", args.listen))?;
    info!(addr = %listener.local_addr()?, "devhost listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    info!("devhost stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
