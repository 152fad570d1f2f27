use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "redline",
    about = "Track and selectively apply document revision changes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the document store
    #[arg(long, global = true, default_value = ".")]
    pub root: String,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Save or replace the baseline document for a service
    Seed(SeedArgs),
    /// Propose an updated document for review
    Propose(ProposeArgs),
    /// Show the review state of a service
    Show(ShowArgs),
    /// Accept one change by its line ranges
    Accept(AcceptArgs),
    /// Reject one change by its line ranges
    Reject(RejectArgs),
    /// Accept a group of changes in one step
    AcceptBlock(AcceptBlockArgs),
    /// Retire the pair if its revisions have converged
    Check(CheckArgs),
    /// Print a unified diff between two stored documents
    Delta(DeltaArgs),
    /// List services with a tracked revision pair
    List(ListArgs),
    /// Start the Redline HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct SeedArgs {
    pub service: String,
    /// Path to the baseline text, or '-' for stdin
    pub file: String,
}

#[derive(Args)]
pub struct ProposeArgs {
    pub service: String,
    /// Path to the proposed text, or '-' for stdin
    pub file: String,
    #[arg(long)]
    pub reason: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub service: String,
}

#[derive(Args)]
pub struct AcceptArgs {
    pub service: String,
    pub current_start: usize,
    pub current_end: usize,
    pub updated_start: usize,
    pub updated_end: usize,
}

#[derive(Args)]
pub struct RejectArgs {
    pub service: String,
    pub current_start: usize,
    pub current_end: usize,
    pub updated_start: usize,
    pub updated_end: usize,
}

#[derive(Args)]
pub struct AcceptBlockArgs {
    pub service: String,
    /// JSON array of change descriptors
    pub block: String,
}

#[derive(Args)]
pub struct CheckArgs {
    pub service: String,
}

#[derive(Args)]
pub struct DeltaArgs {
    pub from: String,
    pub to: String,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub bind: String,
    /// TOML config file; overrides --bind and --root
    #[arg(long)]
    pub config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seed() {
        let cli = Cli::try_parse_from(["redline", "seed", "billing", "notes.md"]).unwrap();
        if let Command::Seed(args) = cli.command {
            assert_eq!(args.service, "billing");
            assert_eq!(args.file, "notes.md");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_propose_with_provenance() {
        let cli = Cli::try_parse_from([
            "redline", "propose", "billing", "draft.md",
            "--reason", "quarterly refresh",
            "--summary", "new thresholds",
            "--link", "https://example.com/source",
        ]).unwrap();
        if let Command::Propose(args) = cli.command {
            assert_eq!(args.service, "billing");
            assert_eq!(args.reason, Some("quarterly refresh".into()));
            assert_eq!(args.summary, Some("new thresholds".into()));
            assert_eq!(args.link, Some("https://example.com/source".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["redline", "show", "billing"]).unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
    }

    #[test]
    fn parse_accept_ranges() {
        let cli = Cli::try_parse_from(["redline", "accept", "billing", "3", "5", "3", "6"]).unwrap();
        if let Command::Accept(args) = cli.command {
            assert_eq!(args.current_start, 3);
            assert_eq!(args.current_end, 5);
            assert_eq!(args.updated_start, 3);
            assert_eq!(args.updated_end, 6);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_reject_ranges() {
        let cli = Cli::try_parse_from(["redline", "reject", "billing", "0", "1", "0", "1"]).unwrap();
        if let Command::Reject(args) = cli.command {
            assert_eq!(args.current_start, 0);
            assert_eq!(args.updated_end, 1);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_accept_block() {
        let cli = Cli::try_parse_from([
            "redline", "accept-block", "billing",
            r#"[{"currentStartLine":1,"currentEndLine":2,"updatedStartLine":1,"updatedEndLine":3}]"#,
        ]).unwrap();
        if let Command::AcceptBlock(args) = cli.command {
            assert!(args.block.starts_with('['));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["redline", "check", "billing"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_delta() {
        let cli = Cli::try_parse_from(["redline", "delta", "billing/current.md", "billing/updated.md"]).unwrap();
        if let Command::Delta(args) = cli.command {
            assert_eq!(args.from, "billing/current.md");
            assert_eq!(args.to, "billing/updated.md");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["redline", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["redline", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, "0.0.0.0:8080");
            assert_eq!(args.config, None);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_root() {
        let cli = Cli::try_parse_from(["redline", "list", "--root", "/var/docs"]).unwrap();
        assert_eq!(cli.root, "/var/docs");
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["redline", "--verbose", "list"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["redline", "--format", "json", "show", "billing"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn accept_requires_all_four_boundaries() {
        assert!(Cli::try_parse_from(["redline", "accept", "billing", "3", "5"]).is_err());
    }
}
