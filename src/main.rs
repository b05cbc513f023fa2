//! Wave Lab - headless harmonic wave field simulator
//!
//! Places wave sources on a plane of point oscillators and prints how the
//! ripples spread and interfere, frame by frame.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wavelab::cli::{Args, Command, FieldArgs, OscillatorArgs};
use wavelab::field::WaveField;
use wavelab::report;

/// How long a headless run waits for the distance worker
const SYNC_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match &args.command {
        Command::Field(field_args) => run_field(field_args),
        Command::Oscillator(osc_args) => run_oscillator(osc_args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Simulate a field on a fixed-step clock
fn run_field(args: &FieldArgs) -> Result<()> {
    let lattice_config = args.lattice_config();
    let wave_config = args.wave_config();
    let playback = args.playback_config();
    playback.validate()?;

    let wave = wave_config.to_wave().context("Invalid wave parameters")?;
    let lattice = lattice_config
        .build()
        .context("Invalid lattice parameters")?;

    // Resolve sources to lattice indices with their activation times
    let mut schedule = Vec::new();
    for (i, &(x, z)) in args.source_coords(&lattice_config).iter().enumerate() {
        let Some(index) = lattice.index_of(x, z) else {
            bail!(
                "Source ({}, {}) is outside the {}x{} lattice",
                x,
                z,
                lattice.x_count(),
                lattice.z_count()
            );
        };
        schedule.push((index, i as f64 * args.stagger.max(0.0)));
    }

    info!(
        "Lattice: {}x{} oscillators, {} m apart",
        lattice.x_count(),
        lattice.z_count(),
        lattice.spacing()
    );
    info!(
        "Wave: ŷ = {} m, f = {} Hz, c = {} m/s, λ = {:.4} m",
        wave.oscillation().amplitude(),
        wave.oscillation().frequency(),
        wave.speed(),
        wave.wavelength()
    );

    let mut field = WaveField::new(lattice)?;
    let print_every = args.print_every.unwrap_or(playback.fps as usize).max(1);
    let scale_m = wave.oscillation().amplitude() * schedule.len() as f64;
    let mut pending = schedule.into_iter().peekable();

    for frame in 0..playback.total_frames() {
        let time_s = playback.frame_time(frame);

        // Activate every source whose start time has been reached
        while let Some(&(index, at_time)) = pending.peek() {
            if at_time > time_s {
                break;
            }
            pending.next();
            if let Some(id) = field.activate(index, wave, at_time)? {
                debug!(index, wave_id = id.0, "source activated");
            }
            if !args.no_sync {
                field.sync_distances(SYNC_TIMEOUT)?;
            }
        }

        field.advance(time_s);

        if frame % print_every == 0 {
            println!(
                "t = {:>7.3} s  peak = {:.4} m  sources = {}{}",
                time_s,
                report::peak_displacement(field.lattice()),
                field.active_waves().len(),
                if field.distances_settled() { "" } else { "  (distances pending)" }
            );
            print!("{}", report::height_map(field.lattice(), scale_m));
        }
    }

    if let Some(path) = &args.dump {
        let vertices = field.lattice().vertices();
        std::fs::write(path, bytemuck::cast_slice::<_, u8>(&vertices))
            .with_context(|| format!("Failed to write vertex dump to {}", path))?;
        info!("Wrote {} vertices to {}", vertices.len(), path);
    }

    Ok(())
}

/// Print one period of a single oscillator's motion
fn run_oscillator(args: &OscillatorArgs) -> Result<()> {
    let oscillation = args
        .oscillation_config()
        .build()
        .context("Invalid oscillation parameters")?;

    info!(
        "Oscillation: ŷ = {} m, f = {} Hz, T = {:.4} s, ω = {:.4} 1/s",
        oscillation.amplitude(),
        oscillation.frequency(),
        oscillation.period(),
        oscillation.angular_speed()
    );
    println!(
        "v̂ = {:.5} m/s, â = {:.5} m/s²",
        oscillation.peak_velocity(),
        oscillation.peak_acceleration()
    );
    print!("{}", report::motion_table(&oscillation, args.samples));

    Ok(())
}
