mod ast;
mod parser;
mod report;
mod token;

use std::any::Any;
use std::env;
use std::io::Read;
use std::panic;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use tracing::{debug, info, trace};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() -> anyhow::Result<()> {
    initialize_logging();

    let synac = Synac::parse();

    match synac.subcmd {
        SynacSubcommand::Analyze(opts) => analyze_source(opts),
        SynacSubcommand::Parse(opts) => parse_report_file(opts),
        SynacSubcommand::BuildLexer(opts) => build_lexer(opts),
    }
}

fn analyze_source(opts: AnalyzeOpts) -> anyhow::Result<()> {
    let source_path = Path::new(&opts.source);
    let report_text = run_lexer(&opts.lexer, source_path)?;

    println!("TOKENS");
    println!("------");
    print!("{report_text}");
    println!();

    run_report(&report_text)
}

fn parse_report_file(opts: ParseOpts) -> anyhow::Result<()> {
    let report_text = if opts.report == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&opts.report)?
    };

    run_report(&report_text)
}

/// Runs the external lexical scanner on the source file and captures its
/// token report from stdout.
fn run_lexer(lexer: &str, source_path: &Path) -> anyhow::Result<String> {
    trace!(lexer, source = %source_path.display(), "Running lexical scanner");

    let output = std::process::Command::new(lexer).arg(source_path).output()?;
    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "lexical scanner failed: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let report_text = String::from_utf8_lossy(&output.stdout).into_owned();
    if report_text.trim().is_empty() {
        return Err(anyhow::anyhow!("lexical scanner produced no output"));
    }

    Ok(report_text)
}

/// Adapter → parser → presentation, with per-stage JSON artifacts under
/// `target/synac/`.
fn run_report(report_text: &str) -> anyhow::Result<()> {
    let target_dir = env::current_dir()?.join("target").join("synac");
    std::fs::create_dir_all(&target_dir)?;

    let tokens = report::parse_report(report_text)?;
    let tokens_path = write_stage_artifact(&target_dir, "tokens.json", &tokens)?;
    trace!(tokens_path = %tokens_path.display(), token_count = tokens.len(), "Adapted lexer report");

    let (tree, diagnostics) = run_analysis(tokens)?;

    if let Some(program) = &tree {
        let ast_path = write_stage_artifact(&target_dir, "ast.json", program)?;
        debug!(ast_path = %ast_path.display(), "Parsed token sequence");
    }

    print!("{}", presentation(&tree, &diagnostics));

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "syntax analysis reported {} diagnostic(s)",
            diagnostics.len()
        ))
    }
}

/// Panic boundary around the parse: engine faults are a distinct fatal
/// category, never mixed into the ordinary diagnostics.
fn run_analysis(
    tokens: Vec<token::Token>,
) -> anyhow::Result<(Option<ast::Program>, Vec<String>)> {
    match panic::catch_unwind(move || parser::analyze(tokens)) {
        Ok(result) => Ok(result),
        Err(payload) => Err(anyhow::anyhow!(
            "internal error during analysis: {}",
            panic_message(payload)
        )),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        message.to_string()
    } else {
        "panic with non-string payload".to_string()
    }
}

fn presentation(tree: &Option<ast::Program>, diagnostics: &[String]) -> String {
    let mut out = String::new();
    if diagnostics.is_empty() {
        out.push_str("SYNTAX OK\n\n");
        match tree {
            Some(program) => out.push_str(&ast::render(program)),
            None => out.push_str("(empty tree)\n"),
        }
    } else {
        out.push_str("SYNTAX ERRORS\n\n");
        for diagnostic in diagnostics {
            out.push_str("  • ");
            out.push_str(diagnostic);
            out.push('\n');
        }
    }
    out
}

fn write_stage_artifact<T: serde::Serialize>(
    target_dir: &Path,
    name: &str,
    value: &T,
) -> anyhow::Result<PathBuf> {
    let path = target_dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}

fn build_lexer(opts: BuildLexerOpts) -> anyhow::Result<()> {
    let flex_output = std::process::Command::new("flex")
        .arg(&opts.definition)
        .output()?;
    if !flex_output.status.success() {
        return Err(anyhow::anyhow!(
            "flex failed: {}",
            String::from_utf8_lossy(&flex_output.stderr)
        ));
    }
    debug!("flex generated lex.yy.c");

    let cc_output = std::process::Command::new("cc")
        .arg("lex.yy.c")
        .arg("-o")
        .arg(&opts.output)
        .arg("-lfl")
        .output()?;
    if !cc_output.status.success() {
        return Err(anyhow::anyhow!(
            "cc failed: {}",
            String::from_utf8_lossy(&cc_output.stderr)
        ));
    }

    info!(lexer = %opts.output, "Lexical scanner compiled");
    Ok(())
}

fn initialize_logging() {
    let env_filter = env::var("RUST_LOG").unwrap_or_default();

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(EnvFilter::from_str(&env_filter).unwrap()))
        .init();
}

#[derive(clap::Parser)]
#[clap(
    name = "synac",
    about = "Syntactic analyzer for a small expression/assignment language."
)]
struct Synac {
    #[clap(subcommand)]
    subcmd: SynacSubcommand,
}

#[derive(clap::Subcommand)]
enum SynacSubcommand {
    /// Run the lexical scanner on a source file, then parse its token report.
    Analyze(AnalyzeOpts),
    /// Parse an already-produced `KIND:TEXT` token report (`-` reads stdin).
    Parse(ParseOpts),
    /// Compile the flex lexer definition into the scanner executable.
    BuildLexer(BuildLexerOpts),
}

#[derive(clap::Parser)]
struct AnalyzeOpts {
    /// Source file handed to the lexical scanner.
    source: String,

    /// Path to the lexical scanner executable.
    #[clap(long, default_value = "./lexer")]
    lexer: String,
}

#[derive(clap::Parser)]
struct ParseOpts {
    /// Token report file, or `-` for stdin.
    report: String,
}

#[derive(clap::Parser)]
struct BuildLexerOpts {
    /// Flex lexer definition file.
    definition: String,

    /// Output path for the scanner executable.
    #[clap(short, long, default_value = "./lexer")]
    output: String,
}

#[cfg(test)]
mod tests {
    use super::{presentation, run_analysis, write_stage_artifact};
    use crate::report::parse_report;
    use crate::token::{Token, TokenKind};

    #[test]
    fn presentation_renders_success_banner_and_tree() {
        let tokens = parse_report("NUMBER:3\nPLUS:+\nNUMBER:5\n").expect("report");
        let (tree, diagnostics) = run_analysis(tokens).expect("analysis");

        let text = presentation(&tree, &diagnostics);
        assert!(text.starts_with("SYNTAX OK\n"));
        assert!(text.contains("BinaryOp: +"));
        assert!(text.contains("└─ Number: 5"));
    }

    #[test]
    fn presentation_renders_failure_banner_with_bullets() {
        let tokens = parse_report("NUMBER:3\nPLUS:+\n").expect("report");
        let (tree, diagnostics) = run_analysis(tokens).expect("analysis");

        assert_eq!(tree, None);
        let text = presentation(&tree, &diagnostics);
        assert!(text.starts_with("SYNTAX ERRORS\n"));
        assert!(text.contains("  • expected a term after `+`\n"));
    }

    #[test]
    fn stage_artifacts_are_written_as_json() {
        let target_dir = tempfile::tempdir().expect("tempdir");
        let tokens = vec![Token::new(TokenKind::Number, "3")];

        let path = write_stage_artifact(target_dir.path(), "tokens.json", &tokens)
            .expect("artifact written");
        let contents = std::fs::read_to_string(path).expect("artifact readable");
        assert!(contents.contains("\"NUMBER\""));
        assert!(contents.contains("\"3\""));
    }
}
