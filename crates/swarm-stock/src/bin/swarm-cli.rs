//! Interactive analysis swarm CLI
//!
//! Streams node completions as they happen, then prints the verdict.
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! cargo run --bin swarm-cli -p swarm-stock
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use swarm_core::TradingState;
use swarm_graph::AnalysisGraph;
use swarm_llm::providers::GeminiProvider;
use swarm_stock::{agents, api, SwarmConfig};
use tokio::sync::mpsc;

fn print_banner() {
    println!(
        r"
==============================================================
                 Trade Today - Analysis Swarm
==============================================================
  Ask about an Indian stock in natural language:
    'Should I buy RELIANCE.NS?'
    'Is TCS worth holding right now?'

  Commands:
    /exit  - quit
==============================================================
"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    print_banner();

    let config = Arc::new(SwarmConfig::builder().with_env().build()?);
    let provider = Arc::new(GeminiProvider::from_env()?);
    let market = Arc::new(api::YahooFinanceClient::new(&config)?);
    let news = Arc::new(api::DuckDuckGoClient::new(config.news_rate_limit)?);

    println!("Initializing swarm graph...");
    let graph = Arc::new(agents::build_graph(
        provider,
        market,
        news,
        Arc::clone(&config),
    )?);
    println!("Nodes: {}", graph.node_names().join(" -> "));
    println!("Ready!\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("query> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let query = input.trim();
        if query.is_empty() {
            continue;
        }
        if query == "/exit" {
            println!("Goodbye!");
            break;
        }

        run_query(Arc::clone(&graph), query).await;
    }

    Ok(())
}

/// Run one query, printing node completions as they stream in.
async fn run_query(graph: Arc<AnalysisGraph>, query: &str) {
    let initial = TradingState::from_query(query);
    let (tx, mut rx) = mpsc::channel(16);

    let run = tokio::spawn(async move { graph.stream(initial, tx).await });

    while let Some(event) = rx.recv().await {
        match event.node.as_str() {
            "supervisor" => {
                let ticker = event.update.ticker.as_deref().unwrap_or("Unknown");
                println!("[supervisor] identified ticker: {ticker}");
            }
            "technical_analyst" => {
                print_section("Technical Analysis", event.update.technical_analysis.as_deref());
            }
            "fundamental_analyst" => {
                print_section(
                    "Fundamental Analysis",
                    event.update.fundamental_analysis.as_deref(),
                );
            }
            "sentiment_analyst" => {
                print_section("Sentiment Analysis", event.update.sentiment_analysis.as_deref());
            }
            "risk_analyst" => {
                print_section("Risk Analysis", event.update.risk_analysis.as_deref());
            }
            "judge" => {
                println!("\n========== THE VERDICT ==========");
                println!(
                    "{}",
                    event.update.final_recommendation.as_deref().unwrap_or("")
                );
                println!("=================================\n");
            }
            other => println!("[{other}] completed"),
        }
    }

    match run.await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => eprintln!("\nAnalysis failed: {e}\n"),
        Err(e) => eprintln!("\nAnalysis task failed: {e}\n"),
    }
}

fn print_section(title: &str, body: Option<&str>) {
    println!("\n--- {title} ---");
    println!("{}", body.unwrap_or(""));
}
