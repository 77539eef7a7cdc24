mod run_benchmark;

pub use run_benchmark::{BenchmarkSettings, RunBenchmarkUseCase};
