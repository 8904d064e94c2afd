use anyhow::Context;
use clap::Parser;
use monty::*;
use std::io::{self, BufRead, Write};
use tracing::Level;

/// 用随机模拟比较三门问题中改变选择与坚持选择的胜率
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// 每种抉择进行的轮数，不指定时从标准输入读取
    #[arg(short = 'n', long)]
    trials: Option<String>,

    /// 随机数种子，用于复现结果
    #[arg(short, long)]
    seed: Option<u64>,

    /// 最后以 JSON 输出对比结果
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(io::stderr)
        .init();

    let input = match args.trials {
        Some(trials) => trials,
        None => prompt_trials()?,
    };
    let count = parse_trial_count(&input).context("failed to read the number of trials")?;

    let mut simulator = match args.seed {
        Some(seed) => {
            tracing::debug!(seed, "seeded simulator");
            Simulator::seeded(seed)
        }
        None => Simulator::from_entropy(),
    };

    let comparison = simulator.compare(count, |progress| match progress {
        Progress::Started { strategy, count } => println!("{strategy}ing {count} times"),
        Progress::Finished(result) => println!("{result}"),
    })?;
    println!("to {} is the best option", comparison.best());

    if args.json {
        println!("{}", serde_json::to_string(&comparison)?);
    }

    Ok(())
}

fn prompt_trials() -> anyhow::Result<String> {
    println!("how many times do you want to test?");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line)
}
