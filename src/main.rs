use std::env;
use std::error::Error;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| String::from("linkage.csv"));
    let contents = fs::read_to_string(&path)?;
    let table = contents.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|num| num.trim().parse::<f64>()).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;

    let relabelled = treeviz::relabel(&table)?;
    for row in relabelled {
        let line = row.iter().map(|value| value.to_string()).collect::<Vec<_>>().join(",");
        println!("{line}");
    }
    Ok(())
}
