use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{
    error,
    info
};
use tracing_subscriber::EnvFilter;

use lorenzgini::chart::lorenzchart::LorenzChart;
use lorenzgini::configuration::Configuration;
use lorenzgini::lorenz::curvebuilder::{
    CurveBuilder,
    CurveInput
};
use lorenzgini::lorenz::inequalityanalyzer::InequalityAnalyzer;

/// 從 stdin 讀取測度序列，輸出 Lorenz-Gini-P 圖表描述（JSON）
#[derive(Parser, Debug)]
#[command(
    name = "lorenzgini",
    version,
    about = "Lorenz curve, Gini coefficient and balanced inequality ratio P"
)]
struct Cli {
    /// stdin 為兩行累積比例（母體、測度），而非原始測度值
    #[arg(long)]
    cumulative: bool,

    /// JSON 設定檔
    #[arg(name = "CONFIG")]
    config: Option<PathBuf>,
}

fn parse_numbers(line: &str) -> Result<Vec<f64>, std::num::ParseFloatError> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse::<f64>)
        .collect()
}

/// raw 模式：stdin 全部為測度值；cumulative 模式：第一行母體比例、第二行測度比例。
fn read_input(cumulative: bool, text: &str) -> Result<CurveInput, Box<dyn Error>> {
    if cumulative {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let population_share = parse_numbers(lines.next().ok_or("missing population share line")?)?;
        let measure_share = parse_numbers(lines.next().ok_or("missing measure share line")?)?;
        Ok(CurveInput::Cumulative { population_share, measure_share })
    } else {
        Ok(CurveInput::Raw(parse_numbers(text)?))
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let configuration = match cli.config {
        Some(path) => Configuration::from_reader(path)?,
        None => Configuration::default(),
    };

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    let input = read_input(cli.cumulative, &text)?;

    let curve = CurveBuilder::new().build_from(input)?;
    let analyzer = InequalityAnalyzer::new(*configuration.analyzer())?;
    let report = analyzer.analyze(&curve)?;
    info!(
        population = curve.population_size(),
        gini = report.gini().coefficient(),
        p = ?report.balanced_ratio().map(|ratio| ratio.value()),
        "analysis finished"
    );

    let chart = LorenzChart::new(&curve, &report, configuration.display());
    println!("{}", chart.to_json()?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("statistics unavailable: {}", err);
            eprintln!("statistics unavailable: {}", err);
            ExitCode::FAILURE
        }
    }
}
