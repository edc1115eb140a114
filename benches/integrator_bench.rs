use criterion::{black_box, criterion_group, criterion_main, Criterion};
use odestep::ode::{
  EulerSettings, Integrator, IntegratorType, MidpointSettings, RK4Settings,
  State, SwappableIntegrator,
};
use odestep::{adaptive_step, fixed_step, AdaptiveSettings, Spring};

fn integrator_types() -> [IntegratorType; 3] {
  [
    IntegratorType::Euler(EulerSettings {}),
    IntegratorType::Midpoint(MidpointSettings {}),
    IntegratorType::RK4(RK4Settings {}),
  ]
}

fn increment(c: &mut Criterion) {
  let system = Spring::new(1.0, 1.0, 1.0).system();
  let state = State::from_vec(vec![-0.5, 0.0]);

  for integrator_type in integrator_types().iter() {
    let integrator = SwappableIntegrator::new(integrator_type.clone());

    c.bench_function(&format!("increment {:?}", integrator_type), |b| {
      b.iter(|| {
        integrator.increment(
          black_box(&system),
          black_box(&state),
          black_box(0.0),
          black_box(0.25),
        )
      })
    });
  }
}

fn drivers(c: &mut Criterion) {
  let system = Spring::new(1.0, 1.0, 1.0).system();
  let initial = State::from_vec(vec![-0.5, 0.0]);
  let settings = AdaptiveSettings::new(1e-4);

  for integrator_type in integrator_types().iter() {
    let integrator = SwappableIntegrator::new(integrator_type.clone());

    c.bench_function(&format!("fixed {:?}", integrator_type), |b| {
      b.iter(|| {
        fixed_step(&integrator, &system, black_box(&initial), 0.0, 30.0, 0.01)
      })
    });

    c.bench_function(&format!("adaptive {:?}", integrator_type), |b| {
      b.iter(|| {
        adaptive_step(
          &integrator,
          &system,
          black_box(&initial),
          0.0,
          30.0,
          0.25,
          &settings,
        )
      })
    });
  }
}

criterion_group!(benches, increment, drivers);
criterion_main!(benches);
