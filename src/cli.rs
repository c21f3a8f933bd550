use std::path::PathBuf;
use std::sync::Arc;

use crate::checks::{CheckContext, ValidationRunner};
use crate::config::{ValidatorConfig, CONFIG_FILE_NAME};
use crate::image::PngLogoValidator;
use crate::repo::{DiskProbe, RepoLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Check,
    Steps,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("check") => Some(Command::Check),
        Some("steps") => Some(Command::Steps),
        _ => None,
    }
}

pub async fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Check) => handle_check(args).await,
        Some(Command::Steps) => handle_steps(),
        None => {
            eprintln!("usage: assetlint <check|steps> [args]");
            2
        }
    }
}

#[derive(Debug, Default)]
struct CheckOptions {
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
    concurrency: Option<usize>,
}

impl CheckOptions {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = CheckOptions::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => options.json = true,
                // consumed by main for tracing setup
                "--verbose" => {}
                "--config" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--config requires a path".to_string())?;
                    options.config = Some(PathBuf::from(value));
                }
                "--concurrency" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--concurrency requires a number".to_string())?;
                    let parsed = value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid concurrency '{value}'"))?;
                    if parsed == 0 {
                        return Err("concurrency must be at least 1".to_string());
                    }
                    options.concurrency = Some(parsed);
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown flag '{flag}'"));
                }
                positional => {
                    if options.root.is_some() {
                        return Err(format!("unexpected argument '{positional}'"));
                    }
                    options.root = Some(PathBuf::from(positional));
                }
            }
        }
        Ok(options)
    }
}

async fn handle_check(args: &[String]) -> i32 {
    let options = match CheckOptions::parse(&args[2..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!(
                "usage: assetlint check [repo_root] [--config <path>] [--json] [--concurrency N] [--verbose]"
            );
            return 2;
        }
    };
    let root = options.root.unwrap_or_else(|| PathBuf::from("."));

    let config_path = options
        .config
        .clone()
        .or_else(|| {
            let default_path = root.join(CONFIG_FILE_NAME);
            default_path.is_file().then_some(default_path)
        });
    let mut config = match config_path {
        Some(path) => match ValidatorConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("config error: {err}");
                return 1;
            }
        },
        None => ValidatorConfig::default(),
    };
    if let Some(concurrency) = options.concurrency {
        config.concurrency = concurrency;
    }

    let logos = PngLogoValidator::new(config.logo_policy.clone());
    let ctx = CheckContext::new(
        config,
        RepoLayout::new(&root),
        Arc::new(DiskProbe),
        Arc::new(logos),
    );

    let runner = ValidationRunner::with_default_steps();
    let mut report = runner.run(&ctx).await;
    report.normalize();

    if options.json {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize report: {err}");
                return 1;
            }
        }
    } else {
        print!("{}", report.render_text());
    }

    if report.has_errors() {
        1
    } else {
        0
    }
}

fn handle_steps() -> i32 {
    let runner = ValidationRunner::with_default_steps();
    for name in runner.step_names() {
        println!("{name}");
    }
    0
}
