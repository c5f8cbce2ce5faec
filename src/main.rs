//! PHOTON-128 CLI.
//!
//! `digest` and `verify` read a JSON request on stdin and print a JSON
//! envelope on stdout: `{"ok":{...}}` with exit code 0, or
//! `{"err":{"code":N,"name":"..."}}` with exit code 1.

use clap::{Parser, Subcommand, ValueEnum};
use photon128::conformance::{CorpusRunner, TestResult};
use photon128::{photon, Digest, ErrorCode, Limits, PhotonResult, Strategy};
use serde::Deserialize;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photon")]
#[command(about = "PHOTON-128 hash", long_about = None)]
#[command(version)]
struct Cli {
    /// GF(16) multiplier backing the permutation
    #[arg(long, value_enum, global = true, default_value_t = MultiplierArg::Eager)]
    multiplier: MultiplierArg,

    /// Use lenient input limits
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Hash a message read as JSON from stdin
    Digest,

    /// Hash a message and compare against an expected digest
    Verify,

    /// Run one of the demonstration inputs
    Demo {
        #[arg(value_enum)]
        input: DemoInput,
    },

    /// Run a conformance corpus file
    Corpus {
        /// Path to the corpus JSON
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MultiplierArg {
    Eager,
    Lazy,
}

impl From<MultiplierArg> for Strategy {
    fn from(arg: MultiplierArg) -> Self {
        match arg {
            MultiplierArg::Eager => Strategy::Eager,
            MultiplierArg::Lazy => Strategy::Lazy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoInput {
    /// 16 zero bytes, digest printed in decimal
    Zeros,
    /// Eight 'a' bytes, digest printed in hex
    Letters,
}

#[derive(Deserialize)]
struct DigestRequest {
    message: String,
    #[serde(default)]
    length: Option<i64>,
}

#[derive(Deserialize)]
struct VerifyRequest {
    message: String,
    #[serde(default)]
    length: Option<i64>,
    expected_digest: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PHOTON_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let strategy = Strategy::from(cli.multiplier);
    let limits = if cli.lenient {
        Limits::lenient()
    } else {
        Limits::standard()
    };

    match cli.command {
        Some(Commands::Version) | None => {
            println!("PHOTON-128 v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
        Some(Commands::Digest) => respond(run_digest(strategy, &limits)),
        Some(Commands::Verify) => match run_verify(strategy, &limits) {
            Ok((valid, body)) => {
                println!("{}", json!({ "ok": body }));
                if valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => respond(Err(e)),
        },
        Some(Commands::Demo { input }) => {
            run_demo(strategy, input);
            ExitCode::SUCCESS
        }
        Some(Commands::Corpus { path }) => run_corpus(strategy, limits, &path),
    }
}

/// Print a JSON envelope and map it to an exit code.
fn respond(result: PhotonResult<serde_json::Value>) -> ExitCode {
    match result {
        Ok(body) => {
            println!("{}", json!({ "ok": body }));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", json!({ "err": { "code": e.code(), "name": e.name() } }));
            ExitCode::FAILURE
        }
    }
}

fn read_stdin(limits: &Limits) -> PhotonResult<String> {
    let mut input = String::new();
    std::io::stdin()
        .take(limits.max_input_size + 1)
        .read_to_string(&mut input)
        .map_err(|e| match e.kind() {
            // Not UTF-8, so not JSON either.
            std::io::ErrorKind::InvalidData => ErrorCode::E100_InvalidJSON,
            _ => ErrorCode::E900_InternalError(e.to_string()),
        })?;
    limits.check_input(input.len())?;
    Ok(input)
}

fn hash_message(
    strategy: Strategy,
    limits: &Limits,
    message_hex: &str,
    length: Option<i64>,
) -> PhotonResult<Digest> {
    let message_hex = message_hex.strip_prefix("0x").unwrap_or(message_hex);
    let message = hex::decode(message_hex).map_err(|_| ErrorCode::E103_InvalidHex)?;
    limits.check_message(message.len())?;
    let length = match length {
        Some(n) => photon::validate_length(n, message.len())?,
        None => message.len(),
    };
    debug!(bytes = length, %strategy, "hashing");
    Ok(photon::hash_with(strategy, &message[..length]))
}

fn run_digest(strategy: Strategy, limits: &Limits) -> PhotonResult<serde_json::Value> {
    let input = read_stdin(limits)?;
    let request: DigestRequest =
        serde_json::from_str(&input).map_err(|_| ErrorCode::E100_InvalidJSON)?;
    let digest = hash_message(strategy, limits, &request.message, request.length)?;
    Ok(json!({
        "digest": digest.to_hex(),
        "decimal": digest.to_decimal_string(),
    }))
}

fn run_verify(strategy: Strategy, limits: &Limits) -> PhotonResult<(bool, serde_json::Value)> {
    let input = read_stdin(limits)?;
    let request: VerifyRequest =
        serde_json::from_str(&input).map_err(|_| ErrorCode::E100_InvalidJSON)?;
    let computed = hash_message(strategy, limits, &request.message, request.length)?;

    // A malformed expected digest is reported as a mismatch, not an error.
    let valid = Digest::from_hex(&request.expected_digest)
        .map(|expected| expected == computed)
        .unwrap_or(false);

    Ok((
        valid,
        json!({
            "valid": valid,
            "computed_digest": computed.to_hex(),
            "expected_digest": request.expected_digest,
        }),
    ))
}

fn run_demo(strategy: Strategy, input: DemoInput) {
    match input {
        DemoInput::Zeros => {
            let text = [0u8; 16];
            let digest = photon::hash_with(strategy, &text);
            let text_decimal: String = text.iter().map(|b| b.to_string()).collect();
            println!("Input text is: {}", text_decimal);
            println!("Hashed result is: {}", digest.to_decimal_string());
        }
        DemoInput::Letters => {
            let text = [b'a'; 8];
            let digest = photon::hash_with(strategy, &text);
            println!("Input text is: {}", hex::encode(text));
            println!("Hashed result is: {}", digest.to_hex());
        }
    }
}

fn run_corpus(strategy: Strategy, limits: Limits, path: &Path) -> ExitCode {
    let runner = match CorpusRunner::load_with_limits(path, limits) {
        Ok(r) => r.with_strategy(strategy),
        Err(e) => {
            eprintln!("Failed to load corpus {:?}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    if !runner.manifest().matches_parameters() {
        eprintln!(
            "Corpus {} targets different parameters; running anyway",
            runner.manifest().hash
        );
    }

    let results = runner.run_all();
    for (id, result) in &results.details {
        match result {
            TestResult::Fail { expected, actual } => {
                println!("FAIL {} - expected: {}, actual: {}", id, expected, actual)
            }
            TestResult::Error { message } => println!("ERROR {} - {}", id, message),
            TestResult::Skip { reason } => println!("SKIP {} - {}", id, reason),
            TestResult::Pass => {}
        }
    }
    println!("{}", results.summary());

    if results.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
