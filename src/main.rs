use clap::{Arg, Command};
use log::LevelFilter;
use seoscan::analyzer::AnalyzerEngine;
use seoscan::config::Config;
use seoscan::report;
use seoscan::scanner::Scanner;
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = Command::new("seoscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Static SEO compliance scoring for HTML/PHP directory trees")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Root directory to scan")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("seoscan.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keyword")
                .short('k')
                .long("keyword")
                .value_name("WORD")
                .help("Target keyword for density scoring (overrides configuration)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the report to a file instead of stdout")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Report format (html, json)")
                .default_value("html"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-criterion detail")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if let Some(keyword) = matches.get_one::<String>("keyword") {
        config.keyword = keyword.clone();
    }

    if matches.get_flag("test-config") {
        println!("Testing configuration...");
        println!("Number of criteria: {}", config.criteria.len());
        for (i, spec) in config.criteria.iter().enumerate() {
            println!("  Criterion {}: {} (weight {})", i + 1, spec.key, spec.weight);
        }
        println!("Maximum score: {}", config.max_score());
        match AnalyzerEngine::new(config.clone()) {
            Ok(_) => println!("All patterns compiled successfully."),
            Err(e) => {
                println!("Configuration validation failed: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let engine = match AnalyzerEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    let root = PathBuf::from(matches.get_one::<String>("path").unwrap());
    let scanner = Scanner::new(root, engine.config().extensions.clone());
    let scan_report = match scanner.scan(&engine) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Scan failed: {e}");
            process::exit(1);
        }
    };

    let format = matches.get_one::<String>("format").unwrap();
    let rendered = match report::render(format, &scan_report) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Report rendering failed: {e}");
            process::exit(1);
        }
    };

    match matches.get_one::<String>("output") {
        Some(output_path) => {
            if let Err(e) = std::fs::write(output_path, rendered) {
                eprintln!("Error writing report to {output_path}: {e}");
                process::exit(1);
            }
            println!(
                "Analyzed {} files (average score {:.2}%, {} skipped); report written to {output_path}",
                scan_report.files.len(),
                scan_report.average_percentage(),
                scan_report.skipped.len()
            );
        }
        None => println!("{rendered}"),
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(Config::default())
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}
