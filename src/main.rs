use clap::Parser;
use std::time::Duration;
use store_assess::{cli, client, config, error, evaluate, preview};
use store_assess_common::ReportConfig;
use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let report_config = ReportConfig::default();
    let today = chrono::Local::now().format("%Y/%m/%d").to_string();

    match cli.command {
        Commands::Evaluate { fields, output, endpoint } => {
            println!("🏪 store-assess - 店面評估\n");

            let endpoint = endpoint.unwrap_or_else(|| config.endpoint());
            let evaluator = client::HttpEvaluator::new(endpoint, config.timeout())?;
            if cli.verbose {
                println!("送信先: {}", evaluator.endpoint());
            }
            let view = evaluate::run(
                &evaluator,
                fields,
                &output,
                Duration::from_millis(report_config.step_interval_ms.into()),
                cli.verbose,
            )
            .await?;

            println!("{}", preview::render_text(&view, &today));
            println!("\n✅ 完了");
        }

        Commands::Preview { input, json } => {
            let view = preview::load(&input, &report_config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", preview::render_text(&view, &today));
            }
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
                changed = true;
                println!("✔ 送信先を設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                changed = true;
                println!("✔ タイムアウトを設定しました");
            }

            if changed {
                config.save()?;
            }

            if show {
                println!("設定:");
                println!("  送信先: {}", config.endpoint());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
