use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use gemini_gateway::args::Args;
use gemini_gateway::runtime::{self, RuntimeConfig};
use gemini_gateway::{
    Gateway, GeminiServer, GemtextConverter, HttpUpstream, ResourceCache, Upstream, logging, tls,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the file writer alive until exit
    let _log_guard = logging::init_logging(args.log_file.as_deref());

    let rt = RuntimeConfig::from_args(&args).build_runtime()?;
    rt.block_on(run_gateway(args))
}

async fn run_gateway(args: Args) -> Result<()> {
    let (config, _source) = runtime::load_and_log_config(args.config.as_path())?;

    let acceptor = tls::acceptor_from_pem(
        config.server.cert_path.as_path(),
        config.server.key_path.as_path(),
    )?;

    let upstream: Arc<dyn Upstream> = Arc::new(HttpUpstream::new(&config.upstream)?);
    let cache = Arc::new(ResourceCache::new(
        upstream,
        GemtextConverter::new(config.converter),
    ));
    runtime::spawn_cache_stats_logger(&cache);

    let server = Arc::new(GeminiServer::new(
        Gateway::new(cache),
        acceptor,
        config.server.request_timeout,
    ));

    let listener = runtime::bind_listener(&args.listen_addr(&config)).await?;

    server
        .run(listener, async {
            runtime::shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await
}
