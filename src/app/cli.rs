use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Start the key agent, flush DNS and bulk-update SVN checkouts"
)]
pub struct Cli {
    /// Directory whose immediate subdirectories are scanned for SVN checkouts
    #[arg(short = 'd', long = "scan-dir", value_name = "DIR")]
    pub scan_dirs: Vec<PathBuf>,

    /// Text file listing one project path per line
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub list_files: Vec<PathBuf>,

    /// Keep the update dialog open after a successful update
    #[arg(long)]
    pub no_close: bool,

    /// Print the update command instead of running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Directory holding mordate.json (defaults to the executable's directory)
    #[arg(long, env = "MORDATE_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatable_flags_keep_their_order() {
        let cli = Cli::parse_from([
            "mordate", "-d", "/w/a", "--list", "one.txt", "--scan-dir", "/w/b", "-l", "two.txt",
        ]);
        assert_eq!(cli.scan_dirs, vec![PathBuf::from("/w/a"), PathBuf::from("/w/b")]);
        assert_eq!(
            cli.list_files,
            vec![PathBuf::from("one.txt"), PathBuf::from("two.txt")]
        );
        assert!(!cli.no_close);
    }

    #[test]
    fn verbose_and_quiet_pick_filter() {
        assert_eq!(Cli::parse_from(["mordate"]).log_filter(), "info");
        assert_eq!(Cli::parse_from(["mordate", "-v"]).log_filter(), "debug");
        assert_eq!(Cli::parse_from(["mordate", "--quiet"]).log_filter(), "warn");
        assert!(Cli::try_parse_from(["mordate", "-v", "-q"]).is_err());
    }
}
