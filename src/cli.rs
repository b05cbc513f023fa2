//! Command-line argument parsing.

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::error::Result;
use crate::params::{LatticeConfig, OscillationConfig, PlaybackConfig, WaveConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavelab")]
#[command(about = "Headless harmonic wave field simulator", long_about = None)]
pub struct Args {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate waves spreading across a plane of oscillators
    Field(FieldArgs),

    /// Tabulate displacement, velocity and acceleration of one oscillator
    Oscillator(OscillatorArgs),
}

/// Options for `wavelab field`
#[derive(ClapArgs, Debug, Default)]
pub struct FieldArgs {
    /// Oscillators along the x-axis [default: 30]
    #[arg(long, value_name = "COUNT")]
    pub x_count: Option<usize>,

    /// Oscillators along the z-axis [default: 30]
    #[arg(long, value_name = "COUNT")]
    pub z_count: Option<usize>,

    /// Distance between oscillator centres [default: 0.06]
    #[arg(long, value_name = "METERS")]
    pub spacing: Option<f64>,

    /// Source amplitude [default: 0.3]
    #[arg(long, value_name = "METERS")]
    pub amplitude: Option<f64>,

    /// Source frequency [default: 0.6]
    #[arg(long, value_name = "HZ")]
    pub frequency: Option<f64>,

    /// Propagation speed [default: 0.9]
    #[arg(long, value_name = "M_PER_S")]
    pub speed: Option<f64>,

    /// Source oscillator grid coordinates, repeatable (default: the centre)
    #[arg(long = "source", value_name = "X,Z", value_parser = parse_grid_coord)]
    pub sources: Vec<(usize, usize)>,

    /// Delay between successive source activations
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub stagger: f64,

    /// Simulated duration [default: 5]
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Simulation frame rate [default: 60]
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Print a height map every N frames (default: once per simulated second)
    #[arg(long, value_name = "FRAMES")]
    pub print_every: Option<usize>,

    /// Do not wait for distance recomputation (behave like a render loop)
    #[arg(long)]
    pub no_sync: bool,

    /// Write the final (x, y, z) f32 vertex buffer to this file
    #[arg(long, value_name = "PATH")]
    pub dump: Option<String>,
}

impl FieldArgs {
    /// Lattice layout with command-line overrides applied
    pub fn lattice_config(&self) -> LatticeConfig {
        let defaults = LatticeConfig::default();
        LatticeConfig {
            x_count: self.x_count.unwrap_or(defaults.x_count),
            z_count: self.z_count.unwrap_or(defaults.z_count),
            spacing_m: self.spacing.unwrap_or(defaults.spacing_m),
        }
    }

    /// Wave parameters with command-line overrides applied
    pub fn wave_config(&self) -> WaveConfig {
        let defaults = WaveConfig::default();
        WaveConfig {
            amplitude_m: self.amplitude.unwrap_or(defaults.amplitude_m),
            frequency_hz: self.frequency.unwrap_or(defaults.frequency_hz),
            speed_m_per_s: self.speed.unwrap_or(defaults.speed_m_per_s),
        }
    }

    /// Playback clock with command-line overrides applied
    pub fn playback_config(&self) -> PlaybackConfig {
        let defaults = PlaybackConfig::default();
        PlaybackConfig {
            duration_s: self.duration.unwrap_or(defaults.duration_s),
            fps: self.fps.unwrap_or(defaults.fps),
        }
    }

    /// Source coordinates, falling back to the lattice centre
    pub fn source_coords(&self, lattice: &LatticeConfig) -> Vec<(usize, usize)> {
        if self.sources.is_empty() {
            vec![(lattice.x_count / 2, lattice.z_count / 2)]
        } else {
            self.sources.clone()
        }
    }
}

/// Options for `wavelab oscillator`
#[derive(ClapArgs, Debug, Default)]
pub struct OscillatorArgs {
    /// Amplitude [default: 0.02]
    #[arg(long, value_name = "METERS")]
    pub amplitude: Option<f64>,

    /// Frequency [default: 0.5]
    #[arg(long, value_name = "HZ", conflicts_with_all = ["period", "angular_speed"])]
    pub frequency: Option<f64>,

    /// Period, instead of a frequency
    #[arg(long, value_name = "SECONDS", conflicts_with = "angular_speed")]
    pub period: Option<f64>,

    /// Angular speed, instead of a frequency
    #[arg(long, value_name = "RAD_PER_S")]
    pub angular_speed: Option<f64>,

    /// Initial phase
    #[arg(long, value_name = "RAD", default_value = "0")]
    pub phase: f64,

    /// Rows to print over one period
    #[arg(long, default_value = "12")]
    pub samples: usize,
}

impl OscillatorArgs {
    /// Oscillation parameters, whichever time component was given
    pub fn oscillation_config(&self) -> OscillationConfig {
        let defaults = OscillationConfig::default();
        let frequency_hz = match (self.frequency, self.period, self.angular_speed) {
            (Some(f), _, _) => f,
            (_, Some(period), _) => 1.0 / period,
            (_, _, Some(omega)) => omega / std::f64::consts::TAU,
            _ => defaults.frequency_hz,
        };

        OscillationConfig {
            amplitude_m: self.amplitude.unwrap_or(defaults.amplitude_m),
            frequency_hz,
            phase_rad: self.phase,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.oscillation_config().validate()
    }
}

/// Parse `X,Z` grid coordinates
pub fn parse_grid_coord(value: &str) -> std::result::Result<(usize, usize), String> {
    let (x, z) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Z but got '{}'", value))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x coordinate '{}': {}", x, e))?;
    let z = z
        .trim()
        .parse()
        .map_err(|e| format!("invalid z coordinate '{}': {}", z, e))?;
    Ok((x, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid_coord() {
        assert_eq!(parse_grid_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_grid_coord(" 0 , 29 "), Ok((0, 29)));
        assert!(parse_grid_coord("3").is_err());
        assert!(parse_grid_coord("a,1").is_err());
        assert!(parse_grid_coord("-1,1").is_err());
    }

    #[test]
    fn test_field_args_parse() {
        let args = Args::try_parse_from([
            "wavelab", "field", "--x-count", "9", "--source", "0,0", "--source", "8,8",
            "--speed", "2",
        ])
        .unwrap();

        let Command::Field(field) = args.command else {
            panic!("expected field command");
        };
        assert_eq!(field.sources, vec![(0, 0), (8, 8)]);

        let lattice = field.lattice_config();
        assert_eq!(lattice.x_count, 9);
        assert_eq!(lattice.z_count, LatticeConfig::default().z_count);
        assert_eq!(field.wave_config().speed_m_per_s, 2.0);
    }

    #[test]
    fn test_default_source_is_centre() {
        let field = FieldArgs::default();
        let lattice = LatticeConfig {
            x_count: 5,
            z_count: 3,
            spacing_m: 1.0,
        };
        assert_eq!(field.source_coords(&lattice), vec![(2, 1)]);
    }

    #[test]
    fn test_oscillator_time_components_exclusive() {
        let result = Args::try_parse_from([
            "wavelab", "oscillator", "--frequency", "1", "--period", "2",
        ]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["wavelab", "oscillator", "--period", "4"]).unwrap();
        let Command::Oscillator(osc) = args.command else {
            panic!("expected oscillator command");
        };
        assert!((osc.oscillation_config().frequency_hz - 0.25).abs() < 1e-12);
        assert!(osc.validate().is_ok());
    }
}
