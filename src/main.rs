use std::{
    fs::{self, File, OpenOptions},
    io::{prelude::*, BufWriter},
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use route_opt::{
    optimize, DistanceMatrix, EngineError, GreatCircle, Result, RouteReport, RoutingTable,
    Selection, Settings,
};

fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_name = std::env::args().nth(1).unwrap_or_else(|| "Config".to_string());
    let settings = Settings::load(&config_name)?;

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build_global()
    {
        warn!("Could not size the thread pool: {}", e);
    }

    let instance = match &settings.instance {
        Some(instance) => instance,
        None => {
            return Err(EngineError::Config(config::ConfigError::NotFound(
                "instance".to_string(),
            )))
        }
    };

    let selection = Selection::load(instance, settings.max_cities())?;
    info!("Loaded {} cities from {}", selection.len(), instance);

    // The matrix has to be complete before any solver can run
    let dm = match &settings.routing_table {
        Some(path) => DistanceMatrix::build(&selection, &RoutingTable::load(path)?)?,
        None => DistanceMatrix::build(&selection, &GreatCircle)?,
    };

    let report = optimize(&selection, &dm, &settings)?;
    println!("{}", report);

    if let Some(results_folder) = &settings.results_folder {
        let results_folder = PathBuf::new().join(results_folder);
        print_report(&results_folder, &report)?;
    }

    Ok(())
}

fn print_report(folder: &Path, report: &RouteReport) -> std::io::Result<()> {
    let file_name = format!("route_{}.txt", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let mut file = get_file(folder, &file_name)?;

    writeln!(file, "{}", report)?;
    writeln!(file)?;

    for (stop, id) in report.stops.iter().zip(&report.route) {
        writeln!(file, "{},{},{}", id + 1, stop.lat, stop.lng)?;
    }

    info!("Wrote route to {:?}", folder.join(&file_name));

    Ok(())
}

fn get_file(folder: &Path, file: &str) -> std::io::Result<BufWriter<File>> {
    fs::create_dir_all(folder)?;
    let path = folder.join(file);

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    Ok(BufWriter::new(file))
}
