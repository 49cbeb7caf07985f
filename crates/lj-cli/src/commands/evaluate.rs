use crate::cli::EvaluateArgs;
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use ljbaseline::core::io::{traits::FrameFile, xyz::XyzFile};
use ljbaseline::core::models::system::SystemSnapshot;
use ljbaseline::workflows::{self, evaluate::FrameEnergy};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct EnergyRecord {
    frame: usize,
    n_atoms: usize,
    energy: f64,
    energy_per_atom: Option<f64>,
}

#[derive(Debug, Serialize)]
struct AtomEnergyRecord {
    frame: usize,
    atom: usize,
    atom_type: i32,
    energy: f64,
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading input frames from {:?}", &args.input);
    let (frames, _) = XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    if frames.is_empty() {
        warn!("Input file {:?} contains no frames.", &args.input);
    }

    let results = workflows::evaluate::run(&frames, &config)?;
    print_summary(&results, &config.energy_unit);

    if let Some(path) = &args.output {
        info!("Writing per-frame energies to {:?}", path);
        write_energies(path, &results)?;
    }
    if let Some(path) = &args.per_atom_output {
        info!("Writing per-atom energies to {:?}", path);
        write_atom_energies(path, &frames, &results)?;
    }
    Ok(())
}

fn print_summary(results: &[FrameEnergy], unit: &str) {
    println!("{:>8} {:>8} {:>20}", "frame", "n_atoms", format!("energy [{unit}]"));
    for result in results {
        println!(
            "{:>8} {:>8} {:>20.10}",
            result.index, result.n_atoms, result.energy
        );
    }
}

fn write_energies(path: &Path, results: &[FrameEnergy]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(EnergyRecord {
            frame: result.index,
            n_atoms: result.n_atoms,
            energy: result.energy,
            energy_per_atom: result.energy_per_atom(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_atom_energies(
    path: &Path,
    frames: &[SystemSnapshot],
    results: &[FrameEnergy],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (frame, result) in frames.iter().zip(results) {
        let Some(per_atom) = &result.per_atom else {
            continue;
        };
        for (atom, (&atom_type, &energy)) in frame.types().iter().zip(per_atom).enumerate() {
            writer.serialize(AtomEnergyRecord {
                frame: result.index,
                atom,
                atom_type: atom_type.code(),
                energy,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}
