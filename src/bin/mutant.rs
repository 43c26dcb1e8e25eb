//! mutant CLI: classify DNA samples against a deduplicating verdict store
//!
//! Commands:
//!   mutant check       classify rows given on the command line
//!   mutant check-file  classify a {"dna": [...]} JSON sample
//!   mutant batch       classify a JSON array of samples concurrently
//!   mutant stats       show mutant/human counts and ratio
//!   mutant demo        run the reference scenarios on an in-memory store
//!
//! Exit codes: 0 mutant, 1 human, 2 invalid DNA, 3 store/config failure.

use mutant_core::service::verdict_name;
use mutant_core::{
    ClassificationService, ClassifyError, DnaSample, MemoryStore, Outcome, ServiceConfig,
};
use std::env;
use std::sync::Arc;

const CONFIG_FILE: &str = "mutant.json";

const EXIT_OK: i32 = 0;
const EXIT_MUTANT: i32 = 0;
const EXIT_HUMAN: i32 = 1;
const EXIT_INVALID: i32 = 2;
const EXIT_FAILURE: i32 = 3;

fn print_usage() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║        mutant v0.1 - Mutant DNA Detector                     ║
║        single-pass scanner + fingerprint dedup store         ║
╚══════════════════════════════════════════════════════════════╝

Usage: mutant <command> [options]

Commands:
  check      <row> <row> ...        Classify an NxN matrix given as rows
  check-file <sample.json>          Classify a {{"dna": [...]}} sample
  batch      <samples.json>         Classify a JSON array of samples concurrently
  stats                             Show mutant/human counts and ratio
  demo                              Run reference scenarios (in-memory store)

Config: ./{CONFIG_FILE} or $MUTANT_CONFIG
  {{"store": {{"kind": "file", "path": "mutant-store.json"}}, "log_filter": "info"}}

Exit codes: 0 mutant | 1 human | 2 invalid DNA | 3 store/config failure

Examples:
  mutant check ATGCGA CAGTGC TTATGT AGAAGG CCCCTA TCACTG
  mutant check-file sample.json
  mutant stats
"#
    );
}

#[tokio::main]
async fn main() {
    let config_path = env::var("MUTANT_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
    let config = match ServiceConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("  {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter.as_str()))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let code = match args[1].as_str() {
        "check" => cmd_check(&config, &args[2..]),
        "check-file" => cmd_check_file(&config, &args[2..]),
        "batch" => cmd_batch(&config, &args[2..]).await,
        "stats" => cmd_stats(&config),
        "demo" => cmd_demo(),
        "help" | "--help" | "-h" => {
            print_usage();
            EXIT_OK
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            EXIT_INVALID
        }
    };
    std::process::exit(code);
}

/// Open the configured store and wrap it in a service
fn open_service(config: &ServiceConfig) -> Option<ClassificationService> {
    match config.open_store() {
        Ok(store) => Some(ClassificationService::new(store)),
        Err(e) => {
            eprintln!("  Failed to open store: {}", e);
            None
        }
    }
}

fn report(result: Result<bool, ClassifyError>) -> i32 {
    match result {
        Ok(true) => {
            println!("  MUTANT");
            EXIT_MUTANT
        }
        Ok(false) => {
            println!("  HUMAN");
            EXIT_HUMAN
        }
        Err(ClassifyError::Invalid(e)) => {
            eprintln!("  Invalid DNA: {}", e);
            EXIT_INVALID
        }
        Err(ClassifyError::Store(e)) => {
            eprintln!("  Store failure: {}", e);
            EXIT_FAILURE
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    serde_json::from_str(&json).map_err(|e| format!("Failed to parse '{}': {}", path, e))
}

fn cmd_check(config: &ServiceConfig, args: &[String]) -> i32 {
    if args.is_empty() {
        eprintln!("Usage: mutant check <row> <row> ...");
        return EXIT_INVALID;
    }
    let Some(svc) = open_service(config) else {
        return EXIT_FAILURE;
    };
    report(svc.classify(args))
}

fn cmd_check_file(config: &ServiceConfig, args: &[String]) -> i32 {
    let Some(path) = args.first() else {
        eprintln!("Usage: mutant check-file <sample.json>");
        return EXIT_INVALID;
    };
    let sample: DnaSample = match read_json(path) {
        Ok(sample) => sample,
        Err(e) => {
            eprintln!("  {}", e);
            return EXIT_INVALID;
        }
    };
    let Some(svc) = open_service(config) else {
        return EXIT_FAILURE;
    };
    report(svc.classify_sample(sample))
}

async fn cmd_batch(config: &ServiceConfig, args: &[String]) -> i32 {
    let Some(path) = args.first() else {
        eprintln!("Usage: mutant batch <samples.json>");
        return EXIT_INVALID;
    };
    let samples: Vec<DnaSample> = match read_json(path) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("  {}", e);
            return EXIT_INVALID;
        }
    };
    let Some(svc) = open_service(config) else {
        return EXIT_FAILURE;
    };
    let svc = Arc::new(svc);

    let tasks = samples.into_iter().map(|sample| {
        let svc = svc.clone();
        tokio::task::spawn_blocking(move || svc.classify_sample(sample))
    });
    let results = futures::future::join_all(tasks).await;

    let (mut mutants, mut humans, mut invalid, mut failed) = (0usize, 0usize, 0usize, 0usize);
    println!("\n  Batch results ({}):", results.len());
    println!("  {}", "-".repeat(40));
    for (i, joined) in results.into_iter().enumerate() {
        match joined {
            Ok(Ok(is_mutant)) => {
                if is_mutant { mutants += 1 } else { humans += 1 }
                println!("  [{:>4}] {}", i, verdict_name(is_mutant));
            }
            Ok(Err(ClassifyError::Invalid(e))) => {
                invalid += 1;
                println!("  [{:>4}] invalid: {}", i, e);
            }
            Ok(Err(ClassifyError::Store(e))) => {
                failed += 1;
                println!("  [{:>4}] store failure: {}", i, e);
            }
            Err(e) => {
                failed += 1;
                println!("  [{:>4}] task failed: {}", i, e);
            }
        }
    }
    println!(
        "  {} mutant | {} human | {} invalid | {} failed",
        mutants, humans, invalid, failed
    );

    if failed > 0 { EXIT_FAILURE } else { EXIT_OK }
}

fn cmd_stats(config: &ServiceConfig) -> i32 {
    let Some(svc) = open_service(config) else {
        return EXIT_FAILURE;
    };
    match svc.stats() {
        Ok(stats) => match serde_json::to_string_pretty(&stats) {
            Ok(json) => {
                println!("{}", json);
                EXIT_OK
            }
            Err(e) => {
                eprintln!("  Failed to serialize stats: {}", e);
                EXIT_FAILURE
            }
        },
        Err(e) => {
            eprintln!("  Failed to read stats: {}", e);
            EXIT_FAILURE
        }
    }
}

fn cmd_demo() -> i32 {
    let svc = ClassificationService::new(Arc::new(MemoryStore::new()));

    let scenarios: [(&str, &[&str]); 5] = [
        ("mutant 6x6", &["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]),
        ("human 6x6", &["ATGCGA", "CAGTGC", "TTATGT", "AGACGG", "GCGTCA", "TCACTG"]),
        ("non-square", &["ATGCGA", "CAGTGC", "TTAT"]),
        ("minimum 4x4", &["AAAA", "CCCC", "TATA", "GAGA"]),
        ("repeat mutant", &["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]),
    ];

    println!("\n  === Demo: mutant detection ===");
    for (name, rows) in scenarios {
        match svc.analyze(rows) {
            Ok(analysis) => {
                let source = match analysis.outcome {
                    Outcome::Computed => "scanned",
                    Outcome::Cached => "cached",
                    Outcome::RaceRecovered => "race-recovered",
                };
                println!(
                    "  {:<14} -> {:<6} ({}, {})",
                    name,
                    verdict_name(analysis.is_mutant),
                    source,
                    analysis.fingerprint.short()
                );
            }
            Err(e) => println!("  {:<14} -> rejected: {}", name, e),
        }
    }

    match svc.stats() {
        Ok(stats) => {
            println!("\n  {}", stats.summary());
            EXIT_OK
        }
        Err(e) => {
            eprintln!("  Failed to read stats: {}", e);
            EXIT_FAILURE
        }
    }
}
