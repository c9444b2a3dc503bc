use anyhow::Context;
use colored::Colorize;
use ulog_sdk::{
    FilePreview, GitPublisher, PreviewLine, PublishOutcome, Publisher, RunConfig, RunOutcome,
    RunReport, SplicePosition, UnreleasedLog,
};

pub fn run(config: &RunConfig) -> anyhow::Result<()> {
    println!("{}", "Unreleased Changelog Generation Started".bold());
    println!("{}", "-".repeat(49));
    println!("Merging Unreleased Release Note Files");

    let report = UnreleasedLog::new(config.clone())
        .run()
        .context("merge aborted, no files were written")?;

    if report.outcome == RunOutcome::NothingToDo {
        println!(
            "{} No unreleased note fragments in {}",
            "✓".green(),
            config.files_dir.display().to_string().bold()
        );
        return Ok(());
    }

    print_report(config, &report);
    println!("\n{}", "Unreleased Changelog Generation Complete".bold());

    if config.publish && !config.dry_run {
        publish(config)?;
    }
    Ok(())
}

fn print_report(config: &RunConfig, report: &RunReport) {
    for path in &report.fragments {
        println!("  {} {}", "merged:".green(), path.display());
    }
    for conflict in &report.conflicts {
        println!("  {} {conflict}", "conflict:".yellow());
    }

    println!("Creating Markdown Section for Unreleased Changes");
    if report.document.is_empty() {
        println!("  {}", "fragments contain no notes, nothing to write".dimmed());
    }

    for preview in &report.previews {
        print_preview(preview);
    }
    for path in &report.written {
        println!("  {} {}", "wrote:".green(), path.display());
    }
    match report.changelog {
        Some(SplicePosition::Before { line }) => {
            println!("  notes inserted before line {}", (line + 1).to_string().bold())
        }
        Some(SplicePosition::NoMarker) => {
            println!("  {}", "no release heading, changelog left unchanged".yellow())
        }
        Some(SplicePosition::Skipped) | None => {}
    }

    for warning in &report.warnings {
        eprintln!("{} {warning}", "*** Error".red().bold());
    }

    if config.dry_run {
        println!("  {}", "dry run, fragments kept".dimmed());
    } else if !report.cleanup.removed.is_empty() {
        println!("  {} {} fragment(s)", "removed:".green(), report.cleanup.removed.len());
    }
    for (path, error) in &report.cleanup.failed {
        eprintln!("{} could not remove {}: {error}", "warning:".yellow().bold(), path.display());
    }
}

fn print_preview(preview: &FilePreview) {
    if preview.is_unchanged() {
        println!("  {} {}", "unchanged:".dimmed(), preview.path.display());
        return;
    }
    println!(
        "  {} {} (+{} -{})",
        "would write:".cyan(),
        preview.path.display(),
        preview.additions(),
        preview.deletions()
    );
    for hunk in &preview.hunks {
        println!("{}", hunk.header().cyan());
        for line in &hunk.lines {
            let text = line.to_string();
            match line {
                PreviewLine::Context(_) => println!("{text}"),
                PreviewLine::Added(_) => println!("{}", text.green()),
                PreviewLine::Removed(_) => println!("{}", text.red()),
            }
        }
    }
}

fn publish(config: &RunConfig) -> anyhow::Result<()> {
    let publisher = GitPublisher::from_env(&config.output_dir, config.committer())
        .context("cannot publish")?;
    match publisher.publish().context("publish failed")? {
        PublishOutcome::NoChanges => println!("No changes."),
        PublishOutcome::Pushed { branch } => {
            println!("{} Pushed notes to {}", "✓".green().bold(), branch.yellow())
        }
    }
    Ok(())
}
