use crate::ode::Real;
use crate::Trajectory;
use std::io::{self, Write};

/// Writes one row per record: time, each state component, then each
/// component's applied rate.
pub fn display_trajectory<S: Real, W: Write>(
  out: &mut W,
  names: &[&str],
  trajectory: &Trajectory<S>,
) -> io::Result<()> {
  write!(out, "{:>9}", "t")?;
  for name in names {
    write!(out, " {:>9}", name)?;
  }
  for name in names {
    write!(out, " {:>9}", format!("{}'", name))?;
  }
  writeln!(out)?;

  for record in trajectory {
    write!(out, "{:9.3}", record.time)?;
    for value in record.state.iter().chain(record.rate.iter()) {
      write!(out, " {:9.2}", value)?;
    }
    writeln!(out)?;
  }

  Ok(())
}

#[test]
fn header_and_rows() {
  use crate::ode::State;

  let mut trajectory = Trajectory::new();
  trajectory.append(
    0.0,
    &State::from_vec(vec![-0.5, 0.0]),
    0.25,
    &State::from_vec(vec![0.0, 0.125]),
  );

  let mut out = Vec::new();
  display_trajectory(&mut out, &["x", "v"], &trajectory).unwrap();

  assert_eq!(
    String::from_utf8(out).unwrap(),
    "        t         x         v        x'        v'\n    \
     0.000     -0.50      0.00      0.00      0.50\n"
  );
}
