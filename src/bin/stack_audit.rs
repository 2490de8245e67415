use std::path::PathBuf;

use anyhow::Context;
use stackguard::{
    engine::EvaluationReport, template, Evaluator, ReferenceResolver, NIST_800_53_R5,
};

// Check synthesized templates against the NIST 800-53 R5 catalogue.
// Usage: stack_audit <template.json>... [--verbose] [--json]
// Each template is an independent stack. Exits with status 1 when any
// error-level violation is found.
fn main() -> anyhow::Result<()> {
    stackguard::utils::load_env()?;
    let mut settings = stackguard::utils::settings_from_env()?;

    let mut json = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => settings.verbose = true,
            "--json" => json = true,
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    if paths.is_empty() {
        anyhow::bail!("usage: stack_audit <template.json>... [--verbose] [--json]");
    }

    let default_filter = if settings.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let resolver = ReferenceResolver::default();
    let evaluator = Evaluator::new(&NIST_800_53_R5, &resolver, &settings);

    let mut failed = false;
    let mut reports = Vec::new();
    for path in &paths {
        let graph = template::load_file(path)
            .with_context(|| format!("failed to load template {}", path.display()))?;
        let sink = evaluator.evaluate(&graph);
        failed |= sink.has_errors();
        reports.push(EvaluationReport::new(graph.name(), sink, settings.report_suppressed));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("stack={} | violations={}", report.stack, report.violations.len());
            for v in &report.violations {
                println!(
                    "  [{}/{}] {} | {}",
                    v.level.as_str(),
                    v.kind.as_str(),
                    v.resource_id,
                    v.message
                );
            }
            for s in &report.suppressed {
                println!("  [suppressed] {} | {} | {}", s.resource_id, s.rule_id, s.reason);
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
