use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use wavepacket::{
    config::Params,
    propagate::Propagator,
    snapshot::SnapshotWriter,
};

// evolve a gaussian wavepacket between two hard walls, writing the probability
// density every few thousand steps

#[derive(Debug, Parser)]
#[command(about = "Wavepacket between two rectangular walls")]
struct Cli {
    /// TOML parameter file; unset fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the output directory.
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// Check the norm after every step.
    #[arg(long)]
    verify: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut params: Params
        = match cli.config.as_ref() {
            Some(path) => Params::from_toml_file(path)
                .with_context(|| format!("loading {path:?}"))?,
            None => Params::default(),
        };
    if let Some(outdir) = cli.outdir { params.outdir = outdir; }
    params.verify_every_step |= cli.verify;
    log::debug!("{params:#?}");

    let mut writer = SnapshotWriter::from_params(&params)?;
    let mut propagator = Propagator::new(params)?;
    let summary = propagator.run(&mut writer);
    let report = writer.finish();

    println!("steps:     {}", summary.steps);
    println!("final norm: {:.12}", summary.final_norm);
    if summary.checks > 0 {
        println!("norm checks flagged: {} / {}", summary.flagged, summary.checks);
    }
    println!("snapshots: {} written, {} failed",
        report.written.len(), report.failed.len());
    Ok(())
}
