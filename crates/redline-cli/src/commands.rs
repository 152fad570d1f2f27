use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use redline_engine::{ApplyOutcome, EngineConfig, RevisionEngine};
use redline_server::{RedlineServer, ServerConfig};
use redline_store::{FsDocumentStore, FsStoreConfig};
use redline_types::{ChangeBlock, ChangeDescriptor, UpdateMetadata};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, format, root, .. } = cli;
    match command {
        Command::Seed(args) => cmd_seed(&root, &format, args),
        Command::Propose(args) => cmd_propose(&root, &format, args),
        Command::Show(args) => cmd_show(&root, &format, args),
        Command::Accept(args) => cmd_accept(&root, &format, args),
        Command::Reject(args) => cmd_reject(&root, &format, args),
        Command::AcceptBlock(args) => cmd_accept_block(&root, &format, args),
        Command::Check(args) => cmd_check(&root, &format, args),
        Command::Delta(args) => cmd_delta(&root, &format, args),
        Command::List(_) => cmd_list(&root, &format),
        Command::Serve(args) => cmd_serve(&root, args),
    }
}

fn open_engine(root: &str) -> anyhow::Result<RevisionEngine> {
    let store = FsDocumentStore::open(FsStoreConfig::new(root))?;
    Ok(RevisionEngine::new(Arc::new(store), EngineConfig::default()))
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn report_outcome(verb: &str, service: &str, outcome: ApplyOutcome, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({
                "service": service,
                "converged": outcome.converged,
                "remaining": outcome.remaining,
            }));
        }
        OutputFormat::Text => {
            if outcome.converged {
                println!(
                    "{} {} for {}; revisions converged, pair retired.",
                    "✓".green().bold(), verb, service.bold()
                );
            } else {
                println!(
                    "{} {} for {}. Open changes: {}",
                    "✓".green(), verb, service.bold(),
                    outcome.remaining.to_string().yellow()
                );
            }
        }
    }
}

fn cmd_seed(root: &str, format: &OutputFormat, args: SeedArgs) -> anyhow::Result<()> {
    let text = read_input(&args.file)?;
    let engine = open_engine(root)?;
    let changes = engine.save_baseline(&args.service, &text)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({
                "service": args.service,
                "open_changes": changes.len(),
            }));
        }
        OutputFormat::Text => {
            println!("{} Baseline saved for {}", "✓".green().bold(), args.service.bold());
            if !changes.is_empty() {
                println!("  Open changes: {}", changes.len().to_string().yellow());
            }
        }
    }
    Ok(())
}

fn cmd_propose(root: &str, format: &OutputFormat, args: ProposeArgs) -> anyhow::Result<()> {
    let text = read_input(&args.file)?;
    let metadata = if args.reason.is_none() && args.summary.is_none() && args.link.is_none() {
        None
    } else {
        let mut record = UpdateMetadata::new(
            args.reason.unwrap_or_default(),
            args.summary.unwrap_or_default(),
        );
        if let Some(link) = args.link {
            record = record.with_reference(link);
        }
        Some(record)
    };

    let engine = open_engine(root)?;
    let changes = engine.propose_update(&args.service, &text, metadata.as_ref())?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({
                "service": args.service,
                "open_changes": changes.len(),
                "converged": changes.is_empty(),
            }));
        }
        OutputFormat::Text => {
            if changes.is_empty() {
                println!(
                    "{} Proposal matches the baseline for {}; pair retired.",
                    "✓".green().bold(), args.service.bold()
                );
            } else {
                println!("{} Proposal recorded for {}", "✓".green().bold(), args.service.bold());
                println!("  Open changes: {}", changes.len().to_string().yellow());
            }
        }
    }
    Ok(())
}

fn cmd_show(root: &str, format: &OutputFormat, args: ShowArgs) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let view = engine.assessment(&args.service)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            if view.is_converged() {
                println!("{} {} has no open proposal.", "✓".green(), args.service.bold());
            } else {
                let baseline = view.current_assessment.lines().count();
                let proposal = view
                    .updated_assessment
                    .as_deref()
                    .map_or(0, |text| text.lines().count());
                println!("{}", args.service.bold());
                println!("  Baseline: {} lines", baseline);
                println!("  Proposal: {} lines", proposal);
                println!("  Open changes: {}", view.changes.len().to_string().yellow());
                for (index, change) in view.changes.iter().enumerate() {
                    println!(
                        "    {}: current {}..{} → updated {}..{}",
                        index + 1,
                        change.current_start, change.current_end,
                        change.updated_start, change.updated_end,
                    );
                }
            }
        }
    }
    Ok(())
}

fn cmd_accept(root: &str, format: &OutputFormat, args: AcceptArgs) -> anyhow::Result<()> {
    let descriptor = ChangeDescriptor::new(
        args.current_start,
        args.current_end,
        args.updated_start,
        args.updated_end,
    );
    let engine = open_engine(root)?;
    let outcome = engine.accept_change(&args.service, descriptor)?;
    report_outcome("Change accepted", &args.service, outcome, format);
    Ok(())
}

fn cmd_reject(root: &str, format: &OutputFormat, args: RejectArgs) -> anyhow::Result<()> {
    let descriptor = ChangeDescriptor::new(
        args.current_start,
        args.current_end,
        args.updated_start,
        args.updated_end,
    );
    let engine = open_engine(root)?;
    let outcome = engine.reject_change(&args.service, descriptor)?;
    report_outcome("Change rejected", &args.service, outcome, format);
    Ok(())
}

fn cmd_accept_block(root: &str, format: &OutputFormat, args: AcceptBlockArgs) -> anyhow::Result<()> {
    let block: ChangeBlock = serde_json::from_str(&args.block)?;
    let engine = open_engine(root)?;
    let outcome = engine.accept_block(&args.service, &block)?;
    report_outcome("Block accepted", &args.service, outcome, format);
    Ok(())
}

fn cmd_check(root: &str, format: &OutputFormat, args: CheckArgs) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let converged = engine.check_convergence(&args.service)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({
                "service": args.service,
                "converged": converged,
            }));
        }
        OutputFormat::Text => {
            if converged {
                println!("{} {} has converged.", "✓".green().bold(), args.service.bold());
            } else {
                println!("{} still has open changes.", args.service.bold());
            }
        }
    }
    Ok(())
}

fn cmd_delta(root: &str, format: &OutputFormat, args: DeltaArgs) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let delta = engine.snapshot_delta(&args.from, &args.to)?;
    if let OutputFormat::Json = format {
        println!("{}", serde_json::json!({ "delta": delta }));
        return Ok(());
    }
    if delta.is_empty() {
        println!("No differences.");
        return Ok(());
    }
    for line in delta.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with('@') {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_list(root: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let engine = open_engine(root)?;
    let services = engine.services()?;
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }
    if services.is_empty() {
        println!("No tracked services.");
        return Ok(());
    }
    for service in &services {
        let view = engine.assessment(service)?;
        if view.is_converged() {
            println!("  {}", service);
        } else {
            println!(
                "  {} ({} open)",
                service.bold(),
                view.changes.len().to_string().yellow()
            );
        }
    }
    Ok(())
}

fn cmd_serve(root: &str, args: ServeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ServerConfig::from_file(Path::new(path))?,
        None => ServerConfig {
            bind_addr: args.bind.parse()?,
            store_root: root.into(),
            ..ServerConfig::default()
        },
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(RedlineServer::new(config).serve())?;
    Ok(())
}
