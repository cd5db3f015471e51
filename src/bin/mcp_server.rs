//! Keypoint-highlight MCP Server
//!
//! This binary provides a Model Context Protocol (MCP) server for keypoint highlighting.
//! It exposes page tools (load, summarize, highlight, export) to AI assistants and other MCP clients.

use clap::{Parser, ValueEnum};
use keypoint_highlight::mcp::HighlightServer;
use keypoint_highlight::{HighlightOptions, MatchMode, ServiceOptions};
use rmcp::{ServiceExt, transport::stdio};
use std::time::Duration;

use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "keypoint-highlight-mcp")]
#[command(version)]
#[command(about = "Keypoint highlighting MCP server", long_about = None)]
struct Cli {
    /// Base URL of the summarization service
    #[arg(long, value_name = "URL", default_value = keypoint_highlight::config::DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Service request timeout in seconds
    #[arg(long, value_name = "SECS", default_value = "30")]
    timeout: u64,

    /// Output language forwarded to the service
    #[arg(long)]
    language: Option<String>,

    /// Summary length forwarded to the service
    #[arg(long)]
    length: Option<String>,

    /// Answer with simulated results when the service is unreachable
    #[arg(long)]
    simulate: bool,

    /// Refuse to send text shorter than this many characters (the stock service needs 50)
    #[arg(long, value_name = "CHARS", default_value = "0")]
    min_length: usize,

    /// Match keypoints case-insensitively
    #[arg(long, short = 'i')]
    case_insensitive: bool,

    /// Treat whitespace runs in keypoints and text as a single space
    #[arg(long, short = 'w')]
    collapse_whitespace: bool,

    /// Class set on highlight markers
    #[arg(long, default_value = keypoint_highlight::config::DEFAULT_MARKER_CLASS)]
    marker_class: String,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn service_options(&self) -> ServiceOptions {
        let mut options = ServiceOptions::new()
            .base_url(self.service_url.clone())
            .timeout(Duration::from_secs(self.timeout))
            .simulate_on_failure(self.simulate)
            .min_text_length(self.min_length);
        options.language = self.language.clone();
        options.length = self.length.clone();
        options
    }

    fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions::new()
            .marker_class(self.marker_class.clone())
            .match_mode(MatchMode {
                case_insensitive: self.case_insensitive,
                collapse_whitespace: self.collapse_whitespace,
            })
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let service_options = cli.service_options();
    let highlight_options = cli.highlight_options();

    log::info!("Keypoint-highlight MCP Server v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Summarization service: {}", service_options.base_url);
    if service_options.simulate_on_failure {
        log::info!("Simulated responses enabled when the service is unreachable");
    }
    log::info!("Match mode: {:?}", highlight_options.match_mode);

    // Route to appropriate transport
    match cli.transport {
        Transport::Stdio => {
            log::info!("Transport: stdio");
            let service = HighlightServer::with_options(service_options, highlight_options);
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);
        }
        Transport::Sse => {
            log::info!("Transport: SSE on port {} (path {}, post path {})", cli.port, cli.sse_path, cli.sse_post_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);

            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.sse_path);

            // Every connection gets its own page session
            let _cancellation_token = sse_server.with_service(move || {
                HighlightServer::with_options(service_options.clone(), highlight_options.clone())
            });

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            log::info!("Transport: HTTP streamable on port {} (path {})", cli.port, cli.http_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let service_factory = move || {
                Ok::<_, std::io::Error>(HighlightServer::with_options(
                    service_options.clone(),
                    highlight_options.clone(),
                ))
            };

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.http_path);

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
