use clap::Parser;
use odestep::{
  adaptive_step, display_trajectory, fixed_step,
  ode::{IntegratorType, State, SwappableIntegrator},
  AdaptiveSettings, Spring,
};
use std::error::Error;
use std::io;

#[derive(Parser)]
#[command(version = "1.0", author = "Ryan G.")]
#[command(about = "Integrates a mass-spring-damper and prints the trajectory")]
struct Opts {
  /// Spring constant
  #[arg(short = 'k', default_value_t = 1.0)]
  k: f64,

  /// Mass
  #[arg(short = 'm', default_value_t = 1.0)]
  m: f64,

  /// Damping coefficient
  #[arg(short = 'b', default_value_t = 1.0)]
  b: f64,

  #[arg(long, default_value_t = -0.5, allow_negative_numbers = true)]
  x0: f64,

  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  v0: f64,

  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  t0: f64,

  #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
  tmax: f64,

  /// Step size (initial step size when adaptive)
  #[arg(long = "time-step", default_value_t = 0.25)]
  time_step: f64,

  /// Minimum step size; enables adaptive stepping
  #[arg(long = "min-step")]
  min_step: Option<f64>,

  #[arg(long, default_value_t = 0.005)]
  shrink: f64,

  #[arg(long, default_value_t = 0.0005)]
  grow: f64,

  #[arg(long = "max-attempts", default_value_t = 5)]
  max_attempts: usize,

  #[command(subcommand)]
  integrator: IntegratorType,
}

fn main() -> Result<(), Box<dyn Error>> {
  let opts: Opts = Opts::parse();

  let system = Spring::new(opts.k, opts.m, opts.b).system();
  let initial = State::from_vec(vec![opts.x0, opts.v0]);
  let integrator = SwappableIntegrator::new(opts.integrator);

  let stdout = io::stdout();
  let mut out = stdout.lock();

  if let Some(min_step) = opts.min_step {
    let settings = AdaptiveSettings {
      min_step,
      shrink_threshold: opts.shrink,
      grow_threshold: opts.grow,
      max_attempts: opts.max_attempts,
    };

    let run = adaptive_step(
      &integrator,
      &system,
      &initial,
      opts.t0,
      opts.tmax,
      opts.time_step,
      &settings,
    )?;

    display_trajectory(&mut out, &["x", "v"], &run.trajectory)?;

    let stats = run.stats;
    eprintln!(
      "{} steps, {} attempts ({} shrinks, {} grows, {} at floor, {} \
       exhausted), next step {}",
      stats.steps,
      stats.attempts,
      stats.shrinks,
      stats.grows,
      stats.floor_accepts,
      stats.exhausted,
      run.next_step
    );
  } else {
    let trajectory = fixed_step(
      &integrator,
      &system,
      &initial,
      opts.t0,
      opts.tmax,
      opts.time_step,
    )?;

    display_trajectory(&mut out, &["x", "v"], &trajectory)?;
  }

  Ok(())
}
