use clap::Parser;
use hosting_toolkit::config::cli::{Command, RecommendArgs};
use hosting_toolkit::core::project_types::ProjectType;
use hosting_toolkit::domain::ports::Storage;
use hosting_toolkit::utils::output::render_json;
use hosting_toolkit::utils::shutdown::{ctrl_c, until_cancelled};
use hosting_toolkit::utils::{logger, validation::validate_path};
use hosting_toolkit::{
    build_utm_url, generate_spf_record, BucketTable, CliConfig, GraphqlCatalog, LocalStorage,
    Recommendation, Recommender, Result,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hosting-toolkit");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<()> {
    match &cli.command {
        Command::Spf(args) => {
            let record = generate_spf_record(&args.to_config());
            if record.is_empty() {
                tracing::warn!(
                    "⚠️ '{}' is not a valid domain, no SPF record generated",
                    args.domain
                );
            }
            emit(&record, args.output.as_deref()).await
        }
        Command::Utm(args) => {
            let url = build_utm_url(&args.to_params());
            emit(&url, args.output.as_deref()).await
        }
        Command::Buckets => {
            let config = cli.load_app_config()?;
            print_table(&config.traffic_table()?);
            print_table(&config.budget_table()?);
            Ok(())
        }
        Command::ProjectTypes { json, output } => {
            let config = cli.load_app_config()?;
            let recommender = Recommender::new(
                GraphqlCatalog::new(config.clone()),
                config.traffic_table()?,
                config.budget_table()?,
            );

            let request = recommender.project_types();
            let Some(types) = until_cancelled(request, ctrl_c()).await? else {
                return Ok(());
            };
            let rendered = render_project_types(&types, *json)?;
            emit(&rendered, output.as_deref()).await
        }
        Command::Recommend(args) => recommend(cli, args).await,
    }
}

async fn recommend(cli: &CliConfig, args: &RecommendArgs) -> Result<()> {
    let config = cli.load_app_config()?;
    let recommender = Recommender::new(
        GraphqlCatalog::new(config.clone()),
        config.traffic_table()?,
        config.budget_table()?,
    );

    let selection = args.selection();
    let request = recommender.recommend(&selection);
    let Some(recommendation) = until_cancelled(request, ctrl_c()).await? else {
        return Ok(());
    };

    let rendered = if args.json {
        render_json(&recommendation)?
    } else {
        render_recommendation(&recommendation)
    };
    emit(&rendered, args.output.as_deref()).await
}

async fn emit(text: &str, output: Option<&str>) -> Result<()> {
    println!("{}", text);

    if let Some(path) = output {
        validate_path("output", path)?;
        let storage = LocalStorage::new(".".to_string());
        storage.write_file(path, format!("{}\n", text).as_bytes()).await?;
        tracing::info!("📁 Output saved to: {}", path);
    }

    Ok(())
}

fn print_table(table: &BucketTable) {
    println!("{} ranges:", table.family());
    for bucket in table.buckets() {
        println!("  {:<10} {} - {}", bucket.label, bucket.min, bucket.max);
    }
}

fn render_project_types(types: &[ProjectType], json: bool) -> Result<String> {
    if json {
        return render_json(types);
    }

    Ok(types
        .iter()
        .map(|t| format!("{:<20} {}", t.label, t.tag))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn render_recommendation(recommendation: &Recommendation) -> String {
    match &recommendation.plan {
        Some(plan) => format!(
            "✅ Recommended plan: {}\n   Price: {}\n   Link:  {}",
            plan.title, plan.price, plan.link
        ),
        None => format!(
            "No plan matches '{}' for traffic {} and budget {} ({} candidates)",
            recommendation.selection.project_type,
            recommendation.selection.traffic,
            recommendation.selection.budget,
            recommendation.candidate_count
        ),
    }
}
