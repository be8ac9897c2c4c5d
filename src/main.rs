use opinion_forum::ai::ClaudeClient;
use opinion_forum::config::Config;
use opinion_forum::db::Repository;
use opinion_forum::error::{AppError, Result};
use opinion_forum::feed::FeedFetcher;
use opinion_forum::models::Category;
use opinion_forum::pipeline::Pipeline;

const USAGE: &str = "Usage: opinion-forum --seed | --crawl | --analyze <topic-id> | --prepare <topic-id> | --topics [category] | --show <topic-id>";

#[tokio::main]
async fn main() -> Result<()> {
    // Only show warnings and errors by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    let config = Config::load()?;
    let repository = Repository::new(&config.db_path).await?;
    let claude = ClaudeClient::from_config(&config)?;
    let model = claude.is_configured().then(|| claude.model_version().to_string());
    let pipeline = Pipeline::new(
        &config,
        repository,
        FeedFetcher::from_config(&config)?,
        claude,
    );

    match command {
        "--seed" => {
            pipeline.initialize_system().await?;
            println!(
                "Seeded {} sources and {} agents",
                pipeline.sources().await?.len(),
                pipeline.agents().await?.len()
            );
        }
        "--crawl" => {
            let topics = pipeline.run_ingest_and_cluster().await?;
            println!("Created {} topics", topics.len());
            for topic in &topics {
                let marker = if topic.is_featured { "*" } else { " " };
                println!("{} [{}] {} ({})", marker, topic.id, topic.title, topic.category);
            }
        }
        "--analyze" => {
            let Some(model) = &model else {
                return Err(AppError::NoApiKey);
            };
            let topic_id = topic_id_arg(&args)?;
            println!("Analyzing topic {} with {}", topic_id, model);
            pipeline.initialize_system().await?;
            let run = pipeline.run_analysis_pipeline(topic_id).await?;

            println!("{} ({:?})", run.topic.title, run.status);
            for analysis in &run.analyses {
                println!("- {}: {}", analysis.agent_id, analysis.stance);
            }
            for reason in &run.degraded {
                eprintln!("degraded: {}", reason);
            }
        }
        "--prepare" => {
            let topic_id = topic_id_arg(&args)?;
            let prepared = pipeline.prepare_analysis(topic_id).await?;
            for (agent_id, prompt) in &prepared.agent_prompts {
                println!("=== {} ===\n{}\n", agent_id, prompt);
            }
            println!("=== summary ===\n{}", prepared.summary_prompt);
        }
        "--topics" => {
            let category = args.get(2).map(|c| c.parse::<Category>()).transpose()?;
            for entry in pipeline.topics_with_counts(category).await? {
                println!(
                    "[{}] {} ({}) - {} opinions, {} analyses",
                    entry.topic.id,
                    entry.topic.title,
                    entry.topic.category,
                    entry.opinions_count,
                    entry.analyses_count
                );
            }
        }
        "--show" => {
            let topic_id = topic_id_arg(&args)?;
            let detail = pipeline.topic_detail(topic_id).await?;
            println!("{}", detail.topic.title);
            if let Some(summary) = &detail.topic.summary {
                println!("{}", summary);
            }
            for item in &detail.opinions {
                println!(
                    "- {} ({}, {})",
                    item.opinion.title,
                    item.source_name,
                    item.opinion.author_or_unknown()
                );
            }
            for entry in pipeline.topic_analyses(topic_id).await? {
                println!("\n{} {}: {}", entry.agent.avatar, entry.agent.name, entry.analysis.stance);
            }
            if let Some(summary) = pipeline.topic_summary(topic_id).await? {
                println!("\nPro:");
                for point in &summary.pro_points {
                    println!("  + {}", point);
                }
                println!("Con:");
                for point in &summary.con_points {
                    println!("  - {}", point);
                }
                println!("\n{}", summary.neutral_context);
            }
        }
        _ => eprintln!("{}", USAGE),
    }

    Ok(())
}

fn topic_id_arg(args: &[String]) -> Result<i64> {
    args.get(2)
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| AppError::Config(USAGE.to_string()))
}
