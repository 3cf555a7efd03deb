use crate::config::*;
use crate::error::Error;
use crate::order::*;
use crate::priority_queue::*;
use crate::util::*;
use clap::builder::{StringValueParser, TypedValueParser, ValueParser};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use hashbrown::HashMap;
use pbr::ProgressBar;
use rand::{thread_rng, Rng, RngCore, SeedableRng};
use std::env;
use thiserror::Error;

#[derive(Parser, Clone)]
#[clap(author = clap::crate_authors!(", "))]
#[clap(version = env!("CARGO_PKG_VERSION"))]
#[clap(about = "Updatable priority queue backed by an indexed binary heap")]
#[clap(color = clap::ColorChoice::Auto)]
#[clap(propagate_version = true)]
#[clap(subcommand_required = true)]
#[clap(arg_required_else_help = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// benchmark enqueue, priority update and dequeue
    Benchmark(BenchmarkParameters),
    /// built-in tests
    Test {
        #[clap(subcommand)]
        command: TestCommands,
    },
}

#[derive(Parser, Clone)]
pub struct BenchmarkParameters {
    /// number of items enqueued and dequeued in each round
    #[clap(value_parser)]
    n: usize,
    /// number of random `set_priority` calls between filling and draining the queue
    #[clap(short = 'u', long, default_value_t = 0)]
    updates: usize,
    /// the number of rounds to run
    #[clap(short = 'r', long, default_value_t = 100)]
    total_rounds: usize,
    /// the configuration of the queue, e.g. {"max_priority":true}
    #[clap(long, default_value_t = json!({}), value_parser = ValueParser::new(SerdeJsonParser))]
    queue_config: serde_json::Value,
    /// message on the progress bar
    #[clap(long, default_value_t = format!(""))]
    pb_message: String,
    /// use deterministic seed for debugging purpose (round number is the seed)
    #[clap(long, action)]
    use_deterministic_seed: bool,
    /// apply a deterministic seed for debugging purposes
    #[clap(long, action)]
    apply_deterministic_seed: Option<u64>,
    /// the benchmark profile output file path
    #[clap(long)]
    benchmark_profiler_output: Option<String>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum TestCommands {
    /// random operation sequences checked against a reference map
    Random {
        /// the number of rounds, each starting from an empty queue
        #[clap(short = 'r', long, default_value_t = 100)]
        total_rounds: usize,
        /// operations per round
        #[clap(short = 'o', long, default_value_t = 1000)]
        operations: usize,
        /// test a max priority queue instead of a min priority queue
        #[clap(long, action)]
        max_priority: bool,
        /// the seed of the first round; random if not given
        #[clap(long)]
        seed: Option<u64>,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid queue config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("queue operation failed: {0}")]
    Queue(#[from] Error),
    #[error("inconsistent queue with seed {seed}: {message}")]
    Inconsistent { seed: u64, message: String },
}

#[derive(Clone)]
struct SerdeJsonParser;
impl TypedValueParser for SerdeJsonParser {
    type Value = serde_json::Value;
    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let inner = StringValueParser::new();
        let val = inner.parse_ref(cmd, arg, value)?;
        match serde_json::from_str::<serde_json::Value>(&val) {
            Ok(vector) => Ok(vector),
            Err(error) => {
                let mut err = clap::Error::new(ErrorKind::ValueValidation).with_cmd(cmd);
                if let Some(arg) = arg {
                    err.insert(ContextKind::InvalidArg, ContextValue::String(arg.to_string()));
                }
                err.insert(
                    ContextKind::InvalidValue,
                    ContextValue::String(format!("should be like {{\"a\":1}}, parse error: {error}")),
                );
                Err(err)
            }
        }
    }
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Benchmark(parameters) => parameters.run(),
            Commands::Test { command } => match command {
                TestCommands::Random {
                    total_rounds,
                    operations,
                    max_priority,
                    seed,
                } => {
                    let first_seed = seed.unwrap_or_else(|| thread_rng().gen());
                    let heap_type = HeapType::from_max_priority(max_priority);
                    for round in 0..total_rounds as u64 {
                        let seed = first_seed.wrapping_add(round);
                        random_operations(heap_type, operations, seed)
                            .map_err(|message| CliError::Inconsistent { seed, message })?;
                    }
                    println!("{total_rounds} rounds of {operations} operations passed, first seed {first_seed}");
                    Ok(())
                }
            },
        }
    }
}

impl BenchmarkParameters {
    fn run(self) -> Result<(), CliError> {
        let BenchmarkParameters {
            n,
            updates,
            total_rounds,
            queue_config,
            pb_message,
            use_deterministic_seed,
            apply_deterministic_seed,
            benchmark_profiler_output,
        } = self;
        // whether to disable progress bar, useful when running jobs in background
        let disable_progress_bar = env::var("DISABLE_PROGRESS_BAR").is_ok();
        let config = QueueConfig::from_json(queue_config.clone())?;
        let mut benchmark_profiler = BenchmarkProfiler::new(&queue_config, benchmark_profiler_output)?;
        // prepare progress bar display
        let mut pb = if !disable_progress_bar {
            let mut pb = ProgressBar::on(std::io::stderr(), total_rounds as u64);
            pb.message(format!("{pb_message} ").as_str());
            Some(pb)
        } else {
            if !pb_message.is_empty() {
                print!("{pb_message} ");
            }
            None
        };
        let seed = match apply_deterministic_seed {
            Some(seed) => seed,
            None => thread_rng().gen::<u64>(),
        };
        let mut seed_rng = DeterministicRng::seed_from_u64(seed);
        let mut queue = PriorityQueue::<usize, f64>::from_config(&config);
        for round in 0..total_rounds as u64 {
            if let Some(pb) = pb.as_mut() {
                pb.set(round);
            }
            let round_seed = if use_deterministic_seed { round } else { seed_rng.next_u64() };
            let mut rng = DeterministicRng::seed_from_u64(round_seed);
            let priorities: Vec<f64> = (0..n).map(|_| rng.next_f64()).collect();
            let changes: Vec<(usize, f64)> = (0..updates)
                .map(|_| (rng.gen_range(0..n.max(1)), rng.next_f64()))
                .collect();
            benchmark_profiler.begin(n, updates);
            for (item, &priority) in priorities.iter().enumerate() {
                queue.enqueue(item, priority)?;
            }
            benchmark_profiler.event("enqueued");
            for &(item, priority) in changes.iter() {
                if item < n {
                    queue.set_priority(&item, priority)?;
                }
            }
            benchmark_profiler.event("updated");
            let mut dequeued = 0;
            while queue.dequeue().is_ok() {
                dequeued += 1;
            }
            benchmark_profiler.event("dequeued");
            benchmark_profiler.end()?;
            if dequeued != n {
                return Err(CliError::Inconsistent {
                    seed: round_seed,
                    message: format!("enqueued {n} items but dequeued {dequeued}"),
                });
            }
            if let Some(pb) = pb.as_mut() {
                if pb_message.is_empty() {
                    pb.message(format!("{} ", benchmark_profiler.brief()).as_str());
                }
            }
        }
        if disable_progress_bar {
            // always print out brief
            println!("{}", benchmark_profiler.brief());
        } else {
            if let Some(pb) = pb.as_mut() {
                pb.finish()
            }
            println!();
        }
        eprintln!("total round time {:?}", benchmark_profiler.sum_round_time);
        Ok(())
    }
}

/// Run random operations on a fresh queue, checking every result against a plain map and every
/// intermediate queue with [`PriorityQueue::sanity_check`].
pub fn random_operations(heap_type: HeapType, operations: usize, seed: u64) -> Result<(), String> {
    let mut rng = DeterministicRng::seed_from_u64(seed);
    let mut queue = PriorityQueue::with_order(heap_type);
    let mut expected: HashMap<usize, f64> = HashMap::new();
    let item_range = operations / 4 + 1;
    for step in 0..operations {
        let item = rng.gen_range(0..item_range);
        // coarse priorities so that ties happen
        let priority = (rng.next_f64() * 64.).floor();
        match rng.gen_range(0..4) {
            0 => match (queue.enqueue(item, priority), expected.contains_key(&item)) {
                (Ok(()), false) => {
                    expected.insert(item, priority);
                }
                (Err(Error::DuplicateItem), true) => {}
                (result, present) => return Err(format!("step {step}: enqueue {item} gave {result:?}, present {present}")),
            },
            1 => match queue.dequeue_with_priority() {
                Ok((item, priority)) => {
                    if expected.remove(&item) != Some(priority) {
                        return Err(format!("step {step}: dequeued unexpected ({item}, {priority})"));
                    }
                    if let Some(better) = expected.values().find(|other| heap_type.ranks_better(*other, &priority)) {
                        return Err(format!("step {step}: dequeued {priority} while {better} ranks better"));
                    }
                }
                Err(error) => {
                    if !expected.is_empty() {
                        return Err(format!("step {step}: dequeue failed with {error} on a non-empty queue"));
                    }
                }
            },
            2 => match queue.set_priority(&item, priority) {
                Ok(old_priority) => {
                    if expected.insert(item, priority) != Some(old_priority) {
                        return Err(format!("step {step}: set_priority {item} returned stale {old_priority}"));
                    }
                }
                Err(error) => {
                    if expected.contains_key(&item) {
                        return Err(format!("step {step}: set_priority {item} failed with {error}"));
                    }
                }
            },
            _ => match queue.remove(&item) {
                Ok((removed, priority)) => {
                    if removed != item || expected.remove(&item) != Some(priority) {
                        return Err(format!("step {step}: removed unexpected ({removed}, {priority})"));
                    }
                }
                Err(error) => {
                    if expected.contains_key(&item) {
                        return Err(format!("step {step}: remove {item} failed with {error}"));
                    }
                }
            },
        }
        queue.sanity_check().map_err(|message| format!("step {step}: {message}"))?;
        if queue.len() > item_range {
            return Err(format!("step {step}: {} items exceed the {item_range} distinct items", queue.len()));
        }
        if queue.len() != expected.len() {
            return Err(format!("step {step}: queue has {} items, expected {}", queue.len(), expected.len()));
        }
    }
    Ok(())
}
