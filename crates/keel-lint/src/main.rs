//! Keel Profile Linter CLI
//!
//! Validates Clash-family profile documents before loading them into the
//! client, catching structural problems the routing engine would otherwise
//! reject at startup.
//!
//! Usage:
//!   keel-lint <directory_or_file> [OPTIONS]

use clap::Parser;
use keel_lint::{lint_file, LintIssue, LintOptions, LintResult, Severity};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const RULE_LINE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Keel Profile Linter
#[derive(Parser, Debug)]
#[command(name = "keel-lint")]
#[command(
    author,
    version,
    about = "Validate Clash-family profile documents before loading them"
)]
struct Args {
    /// Path to a profile file or directory containing profile files
    #[arg(required = true)]
    path: PathBuf,

    /// Output format: text (default), json
    #[arg(short, long, default_value = "text")]
    output: String,

    /// Only show errors (hide warnings)
    #[arg(short = 'e', long)]
    errors_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Strict mode - treat warnings as errors
    #[arg(short, long)]
    strict: bool,
}

fn main() {
    let args = Args::parse();

    let options = LintOptions {
        verbose: args.verbose,
    };

    let files = collect_profile_files(&args.path);
    if files.is_empty() {
        println!(
            "{YELLOW}Warning:{RESET} No profile files found in {:?}",
            args.path
        );
        std::process::exit(0);
    }

    let mut result = LintResult::default();
    for file in &files {
        result.merge(lint_file(file, &options));
    }

    if args.output == "json" {
        let rendered = serde_json::to_string_pretty(&result).unwrap();
        println!("{rendered}");
    } else {
        print_report(&result, &args);
    }

    let failed = result.errors > 0 || (args.strict && result.warnings > 0);
    std::process::exit(if failed { 1 } else { 0 });
}

fn collect_profile_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_profile_file(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_file() && is_profile_file(&entry_path) {
                    files.push(entry_path);
                }
            }
        }
    }

    files.sort();
    files
}

fn is_profile_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json")
}

fn print_report(result: &LintResult, args: &Args) {
    println!("{BOLD}{CYAN}Keel Profile Linter{RESET}");
    println!("{DIM}{RULE_LINE}{RESET}\n");

    // Issues grouped by file, files in path order.
    let mut by_file: BTreeMap<&PathBuf, Vec<&LintIssue>> = BTreeMap::new();
    for issue in &result.issues {
        if args.errors_only && issue.severity != Severity::Error {
            continue;
        }
        by_file.entry(&issue.file).or_default().push(issue);
    }

    if by_file.is_empty() {
        println!("{GREEN}{BOLD}No issues found!{RESET}");
    }

    for (file, issues) in &by_file {
        let errors = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let status = if errors > 0 {
            format!("{RED}FAIL{RESET}")
        } else {
            format!("{YELLOW}WARN{RESET}")
        };
        let file_name = file.file_name().unwrap_or_default().to_string_lossy();
        println!(
            "{status} {BOLD}{CYAN}{file_name}{RESET} {DIM}({errors} error(s), {} warning(s)){RESET}",
            issues.len() - errors
        );

        for issue in issues {
            print_issue(issue);
        }
        println!();
    }

    println!("{DIM}{RULE_LINE}{RESET}");
    println!(
        "  {DIM}Files checked:{RESET} {BOLD}{}{RESET}",
        result.files_checked
    );
    println!(
        "  {DIM}Errors:{RESET}        {BOLD}{}{}{RESET}",
        if result.errors > 0 { RED } else { GREEN },
        result.errors
    );
    println!(
        "  {DIM}Warnings:{RESET}      {BOLD}{}{}{RESET}",
        if result.warnings > 0 { YELLOW } else { DIM },
        result.warnings
    );
    println!();

    if result.errors == 0 && result.warnings == 0 {
        println!("{GREEN}{BOLD}All checks passed!{RESET}");
    } else if result.errors == 0 {
        println!("{YELLOW}{BOLD}Passed with warnings{RESET}");
    } else {
        println!("{RED}{BOLD}Linting failed with errors{RESET}");
    }
}

fn print_issue(issue: &LintIssue) {
    let color = severity_color(&issue.severity);
    let marker = format!("{color}|{RESET}");

    let location = issue
        .location
        .as_ref()
        .map(|l| format!("{DIM}[{RESET}{CYAN}{l}{RESET}{DIM}]{RESET} "))
        .unwrap_or_default();

    println!(
        "  {marker} {location}{BOLD}{color}{}{RESET}: {} {DIM}({}{}{DIM}){RESET}",
        issue.severity.label(),
        issue.message,
        color,
        issue.code
    );

    if let Some(suggestion) = &issue.suggestion {
        println!("  {marker}   {GREEN}-> {suggestion}{RESET}");
    }
}

fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
        Severity::Info => CYAN,
    }
}
