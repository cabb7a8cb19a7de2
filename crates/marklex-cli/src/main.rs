use anyhow::{Context, Result};
use clap::Parser;
use marklex_config::Config;
use marklex_syntax::{LineEndings, ScanOptions, Scanner, Token, TokenKind, stream};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Print the block-level token stream of a markdown file.
#[derive(Debug, Parser)]
#[command(name = "marklex", version, about)]
struct Cli {
    /// Markdown file to scan
    file: PathBuf,

    /// Config file to use instead of ~/.config/marklex/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only treat CRLF as a line ending
    #[arg(long)]
    crlf_only: bool,

    /// Scan on a worker thread and receive tokens over a channel
    #[arg(long)]
    threaded: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Scan the file and print one token per line. Returns true if the stream
/// ended in an error token.
fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    let options = load_options(cli)?;
    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    log::info!(
        "Scanning {} ({} bytes, {:?})",
        cli.file.display(),
        source.len(),
        options
    );

    let failed = if cli.threaded {
        print_tokens(stream::spawn(source, options), out)?
    } else {
        print_tokens(Scanner::with_options(&source, options), out)?
    };
    Ok(failed)
}

fn load_options(cli: &Cli) -> Result<ScanOptions> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file not found: {}", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };

    let mut options = config.scan_options();
    if cli.crlf_only {
        options = options.with_line_endings(LineEndings::Crlf);
    }
    Ok(options)
}

fn print_tokens<'a>(
    tokens: impl IntoIterator<Item = Token<'a>>,
    out: &mut impl Write,
) -> io::Result<bool> {
    let mut failed = false;
    for token in tokens {
        writeln!(out, "{token}")?;
        failed = token.kind == TokenKind::ERROR;
    }
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn cli_for(file: &Path, config: &Path) -> Cli {
        Cli {
            file: file.to_path_buf(),
            config: Some(config.to_path_buf()),
            crlf_only: false,
            threaded: false,
        }
    }

    fn setup(markdown: &str, config: &str) -> (TempDir, Cli) {
        let temp_dir = TempDir::new().unwrap();
        let md_path = temp_dir.path().join("test.md");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&md_path, markdown).unwrap();
        std::fs::write(&config_path, config).unwrap();
        let cli = cli_for(&md_path, &config_path);
        (temp_dir, cli)
    }

    fn output(cli: &Cli) -> (bool, String) {
        let mut out = Vec::new();
        let failed = run(cli, &mut out).unwrap();
        (failed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn prints_one_token_per_line() {
        let (_dir, cli) = setup("# Title\r\n- item\r\n", "");
        let (failed, text) = output(&cli);
        assert!(!failed);
        assert_eq!(text, "H1 \"Title\"\nLIST_ITEM \"item\"\nEOF\n");
    }

    #[test]
    fn threaded_output_matches() {
        let (_dir, mut cli) = setup("one  \r\ntwo\r\n", "");
        let (_, direct) = output(&cli);
        cli.threaded = true;
        let (_, threaded) = output(&cli);
        assert_eq!(direct, threaded);
    }

    #[test]
    fn error_stream_is_reported() {
        let (_dir, cli) = setup("# no line ending", "");
        let (failed, text) = output(&cli);
        assert!(failed);
        assert!(text.starts_with("ERROR: "));
    }

    #[test]
    fn config_file_sets_options() {
        let (_dir, cli) = setup("# no line ending", "[scan]\nunterminated_header = \"accept\"\n");
        let (failed, text) = output(&cli);
        assert!(!failed);
        assert_eq!(text, "H1 \"no line ending\"\nEOF\n");
    }

    #[test]
    fn crlf_only_flag_overrides_config() {
        let (_dir, mut cli) = setup("a\nb\n", "");
        cli.crlf_only = true;
        let (_, text) = output(&cli);
        assert_eq!(text, "PARAGRAPH \"a\\nb\\n\"\nEOF\n");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let md_path = temp_dir.path().join("test.md");
        std::fs::write(&md_path, "text").unwrap();
        let cli = cli_for(&md_path, &temp_dir.path().join("missing.toml"));

        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn missing_markdown_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();
        let cli = cli_for(&temp_dir.path().join("nope.md"), &config_path);

        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
