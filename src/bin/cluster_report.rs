use geocluster::data_format::{Cluster, DataTable};
use geocluster::evaluation::{hierarchical_distortion_curve, kmeans_distortion_curve, DistortionPoint};
use geocluster::utils::RandomSampler;
use geocluster::{
    compute_distortion, compute_weighted_distortion, ClusteringConfig, ClusteringMethod, ClusteringStrategy,
};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
struct Args {
    data_csv: Option<PathBuf>,
    data_json: Option<PathBuf>,
    config: Option<PathBuf>,
    method: Option<ClusteringMethod>,
    clusters: Option<usize>,
    iterations: Option<usize>,
    synthetic: usize,
    seed: u64,
    sweep: Option<(usize, usize)>,
    json_logs: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            data_csv: None,
            data_json: None,
            config: None,
            method: None,
            clusters: None,
            iterations: None,
            synthetic: 1_000,
            seed: 42,
            sweep: None,
            json_logs: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClusteringReport {
    dataset: String,
    method: ClusteringMethod,
    num_entities: usize,
    num_clusters: usize,
    num_iterations: usize,
    total_population: u64,
    cluster_seconds: f64,
    distortion: f64,
    weighted_distortion: f64,
}

#[derive(Debug, Serialize)]
struct SweepReport {
    dataset: String,
    num_entities: usize,
    num_iterations: usize,
    hierarchical: Vec<DistortionPoint>,
    kmeans: Vec<DistortionPoint>,
    sweep_seconds: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    init_tracing(args.json_logs);

    let mut config = match &args.config {
        Some(path) => ClusteringConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => ClusteringConfig::default(),
    };
    if let Some(method) = args.method {
        config = config.with_method(method);
    }
    if let Some(clusters) = args.clusters {
        config = config.with_num_clusters(clusters);
    }
    if let Some(iterations) = args.iterations {
        config = config.with_num_iterations(iterations);
    }
    config.validate()?;

    let (table, dataset) = load_table(&args)?;
    tracing::info!(dataset = %dataset, entities = table.len(), "loaded data table");

    if let Some((min, max)) = args.sweep {
        return run_sweep(&table, dataset, min, max, config.num_iterations);
    }

    let strategy = config.build_strategy()?;
    let singletons = table.singletons();

    let start = Instant::now();
    let clusters = strategy.cluster(&singletons)?;
    let cluster_seconds = start.elapsed().as_secs_f64();

    let report = ClusteringReport {
        dataset,
        method: config.method,
        num_entities: table.len(),
        num_clusters: clusters.len(),
        num_iterations: config.num_iterations,
        total_population: clusters.iter().map(Cluster::population).sum(),
        cluster_seconds,
        distortion: compute_distortion(&clusters, &table)?,
        weighted_distortion: compute_weighted_distortion(&clusters, &table)?,
    };

    println!("=== clustering report ===");
    println!("dataset: {}", report.dataset);
    println!("method: {}", strategy.name());
    println!("entities/clusters: {}/{}", report.num_entities, report.num_clusters);
    if config.method == ClusteringMethod::KMeans {
        println!("iterations: {}", report.num_iterations);
    }
    println!("total_population: {}", report.total_population);
    println!("cluster_seconds: {:.6}", report.cluster_seconds);
    println!("distortion: {:.6e}", report.distortion);
    println!("weighted_distortion: {:.6e}", report.weighted_distortion);
    for (i, cluster) in clusters.iter().enumerate() {
        println!(
            "  #{i:<3} members={:<5} center=({:.3}, {:.3}) population={} risk={:.3e}",
            cluster.len(),
            cluster.horiz_center(),
            cluster.vert_center(),
            cluster.population(),
            cluster.risk()
        );
    }
    println!("json: {}", serde_json::to_string(&report)?);

    Ok(())
}

fn run_sweep(
    table: &DataTable,
    dataset: String,
    min: usize,
    max: usize,
    iterations: usize,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let hierarchical = hierarchical_distortion_curve(table, min, max)?;
    let kmeans = kmeans_distortion_curve(table, min, max, iterations)?;
    let report = SweepReport {
        dataset,
        num_entities: table.len(),
        num_iterations: iterations,
        hierarchical,
        kmeans,
        sweep_seconds: start.elapsed().as_secs_f64(),
    };

    println!("=== distortion sweep ===");
    println!("dataset: {}", report.dataset);
    println!("{:>8} {:>16} {:>16}", "clusters", "hierarchical", "kmeans");
    for (h, k) in report.hierarchical.iter().zip(report.kmeans.iter()) {
        println!("{:>8} {:>16.6e} {:>16.6e}", h.num_clusters, h.distortion, k.distortion);
    }
    println!("sweep_seconds: {:.6}", report.sweep_seconds);
    println!("json: {}", serde_json::to_string(&report)?);

    Ok(())
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_table(args: &Args) -> Result<(DataTable, String), Box<dyn Error>> {
    if let Some(path) = &args.data_csv {
        let table = DataTable::from_csv_str(&fs::read_to_string(path)?)?;
        return Ok((table, path.display().to_string()));
    }
    if let Some(path) = &args.data_json {
        let table = DataTable::from_json_str(&fs::read_to_string(path)?)?;
        return Ok((table, path.display().to_string()));
    }

    let table = RandomSampler::with_seed(args.seed).clustered_table(args.synthetic, 12, 1000.0, 600.0, 40.0)?;
    Ok((table, format!("synthetic_n{}_s{}", args.synthetic, args.seed)))
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);

    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--json-logs" => {
                args.json_logs = true;
                continue;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }

        let value = it.next();
        match flag.as_str() {
            "--data-csv" => {
                let v = required_value(&flag, value)?;
                args.data_csv = Some(PathBuf::from(v));
            }
            "--data-json" => {
                let v = required_value(&flag, value)?;
                args.data_json = Some(PathBuf::from(v));
            }
            "--config" => {
                let v = required_value(&flag, value)?;
                args.config = Some(PathBuf::from(v));
            }
            "--method" => {
                let v = required_value(&flag, value)?;
                args.method = Some(ClusteringMethod::from_str(&v)?);
            }
            "--clusters" => {
                let v = required_value(&flag, value)?;
                args.clusters = Some(v.parse()?);
            }
            "--iterations" => {
                let v = required_value(&flag, value)?;
                args.iterations = Some(v.parse()?);
            }
            "--synthetic" => {
                let v = required_value(&flag, value)?;
                args.synthetic = v.parse()?;
            }
            "--seed" => {
                let v = required_value(&flag, value)?;
                args.seed = v.parse()?;
            }
            "--sweep" => {
                let v = required_value(&flag, value)?;
                args.sweep = Some(parse_range(&v)?);
            }
            _ => {
                return Err(format!("unknown argument: {flag}").into());
            }
        }
    }

    Ok(args)
}

fn required_value(flag: &str, value: Option<String>) -> Result<String, Box<dyn Error>> {
    value.ok_or_else(|| format!("missing value for {flag}").into())
}

fn parse_range(s: &str) -> Result<(usize, usize), Box<dyn Error>> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <min>:<max>, got {s}"))?;
    Ok((min.trim().parse()?, max.trim().parse()?))
}

fn print_help() {
    println!(
        "cluster_report\n\
        Cluster a table of weighted entities and report distortion.\n\n\
        Usage:\n\
          cargo run --release --bin cluster_report -- [options]\n\n\
        Options:\n\
          --data-csv <path>     CSV lines: id,horiz,vert,population,risk\n\
          --data-json <path>    JSON array of records\n\
          --config <path>       JSON clustering config\n\
          --method <name>       hierarchical|kmeans|sequential (default: hierarchical)\n\
          --clusters <int>      number of clusters (default: 15)\n\
          --iterations <int>    k-means rounds (default: 5)\n\
          --synthetic <int>     entities in synthetic mode (default: 1000)\n\
          --seed <int>          RNG seed for synthetic mode (default: 42)\n\
          --sweep <min:max>     distortion of both methods for each count\n\
          --json-logs           emit logs as JSON\n\
          --help                print this help\n"
    );
}

#[cfg(test)]
mod tests {
    use super::parse_range;

    #[test]
    fn parse_range_basic() {
        assert_eq!(parse_range("6:20").unwrap(), (6, 20));
        assert_eq!(parse_range(" 1 : 3 ").unwrap(), (1, 3));
        assert!(parse_range("6-20").is_err());
    }
}
