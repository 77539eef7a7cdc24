use crate::di::UseCases;
use dnscope_domain::{BenchmarkReport, TargetLatency};

fn cell(latency: &TargetLatency) -> String {
    match latency {
        TargetLatency::Millis(ms) => format!("{:.2}", ms),
        TargetLatency::TimedOut => "-1".to_string(),
        TargetLatency::Failed(reason) => format!("Err: {}", reason),
    }
}

pub async fn run_bench(use_cases: &UseCases, json: bool) -> anyhow::Result<()> {
    let rows = match use_cases.run_benchmark.execute().await {
        BenchmarkReport::Rows(rows) => rows,
        BenchmarkReport::Declined(message) => {
            println!("{}", message);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<32} {:>12} {:>12} {:>12}",
        "DOMAIN", "LOCAL (ms)", "GOOGLE (ms)", "CLOUDFLARE (ms)"
    );
    for row in &rows {
        println!(
            "{:<32} {:>12} {:>12} {:>12}",
            row.domain.to_string(),
            cell(&row.local),
            cell(&row.google),
            cell(&row.cloudflare)
        );
    }
    Ok(())
}
