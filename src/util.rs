use rand::RngCore;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

#[allow(dead_code)]
/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    /// uniform in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}

/// timing of benchmark rounds; each round is one fill-update-drain cycle of a queue
#[derive(Debug)]
pub struct BenchmarkProfiler {
    /// each record corresponds to a different round
    pub records: Vec<BenchmarkProfilerEntry>,
    /// summation of all round time
    pub sum_round_time: f64,
    /// summation of all items enqueued
    pub sum_items: usize,
    /// summation of all priority updates
    pub sum_updates: usize,
    /// the file to output the profiler results
    pub benchmark_profiler_output: Option<File>,
}

impl BenchmarkProfiler {
    pub fn new(queue_config: &serde_json::Value, detail_log_file: Option<String>) -> std::io::Result<Self> {
        let benchmark_profiler_output = match detail_log_file {
            Some(filename) => {
                let mut file = File::create(filename)?;
                file.write_all(serde_json::to_string(&json!({ "queue_config": queue_config }))?.as_bytes())?;
                file.write_all(b"\n")?;
                Some(file)
            }
            None => None,
        };
        Ok(Self {
            records: vec![],
            sum_round_time: 0.,
            sum_items: 0,
            sum_updates: 0,
            benchmark_profiler_output,
        })
    }
    /// record the beginning of a round
    pub fn begin(&mut self, items: usize, updates: usize) {
        // sanity check last entry, if exists, is complete
        if let Some(last_entry) = self.records.last() {
            assert!(
                last_entry.is_complete(),
                "the last benchmark profiler entry is not complete, make sure to call `begin` and `end` in pairs"
            );
        }
        let mut entry = BenchmarkProfilerEntry::new(items, updates);
        entry.record_begin();
        self.records.push(entry);
    }
    pub fn event(&mut self, event_name: &str) {
        let last_entry = self
            .records
            .last_mut()
            .expect("last entry not exists, call `begin` before `event`");
        last_entry.record_event(event_name.to_string());
    }
    /// record the ending of a round
    pub fn end(&mut self) -> std::io::Result<()> {
        let last_entry = self
            .records
            .last_mut()
            .expect("last entry not exists, call `begin` before `end`");
        let round_time = last_entry.record_end();
        self.sum_round_time += round_time;
        self.sum_items += last_entry.items;
        self.sum_updates += last_entry.updates;
        if let Some(file) = self.benchmark_profiler_output.as_mut() {
            let mut events = serde_json::Map::new();
            for (event_name, time) in last_entry.events.iter() {
                events.insert(event_name.clone(), json!(time));
            }
            let value = json!({
                "round_time": round_time,
                "items": last_entry.items,
                "updates": last_entry.updates,
                "events": events,
            });
            file.write_all(serde_json::to_string(&value)?.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }
    /// print out a brief one-line statistics
    pub fn brief(&self) -> String {
        let per_round = self.sum_round_time / (self.records.len() as f64);
        let per_item = self.sum_round_time / (self.sum_items as f64);
        format!("round: {per_round:.3e}, item: {per_item:.3e}, updates: {},", self.sum_updates)
    }
}

#[derive(Debug)]
pub struct BenchmarkProfilerEntry {
    /// items enqueued in this round
    pub items: usize,
    /// `set_priority` calls in this round
    pub updates: usize,
    /// the time of beginning a round
    begin_time: Option<Instant>,
    /// record additional events
    pub events: Vec<(String, f64)>,
    /// interval between calling [`Self::record_begin`] to calling [`Self::record_end`]
    pub round_time: Option<f64>,
}

impl BenchmarkProfilerEntry {
    pub fn new(items: usize, updates: usize) -> Self {
        Self {
            items,
            updates,
            begin_time: None,
            events: vec![],
            round_time: None,
        }
    }
    /// record the beginning of a round
    pub fn record_begin(&mut self) {
        assert_eq!(self.begin_time, None, "do not call `record_begin` twice on the same entry");
        self.begin_time = Some(Instant::now());
    }
    /// record the ending of a round, returning the round time in seconds
    pub fn record_end(&mut self) -> f64 {
        let begin_time = self
            .begin_time
            .as_ref()
            .expect("make sure to call `record_begin` before calling `record_end`");
        let round_time = begin_time.elapsed().as_secs_f64();
        self.round_time = Some(round_time);
        round_time
    }
    pub fn record_event(&mut self, event_name: String) {
        let begin_time = self
            .begin_time
            .as_ref()
            .expect("make sure to call `record_begin` before calling `record_event`");
        self.events.push((event_name, begin_time.elapsed().as_secs_f64()));
    }
    pub fn is_complete(&self) -> bool {
        self.round_time.is_some()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use more_asserts::*;
    use rand::SeedableRng;

    #[test]
    fn util_next_f64_in_unit_interval() {
        // cargo test util_next_f64_in_unit_interval -- --nocapture
        let mut rng = DeterministicRng::seed_from_u64(0);
        for _ in 0..1000 {
            let value = rng.next_f64();
            assert_ge!(value, 0.);
            assert_lt!(value, 1.);
        }
        let mut same_seed = DeterministicRng::seed_from_u64(0);
        let mut rng = DeterministicRng::seed_from_u64(0);
        assert_eq!(rng.next_f64(), same_seed.next_f64());
    }

    #[test]
    fn util_benchmark_profiler_rounds() {
        // cargo test util_benchmark_profiler_rounds -- --nocapture
        let mut profiler = BenchmarkProfiler::new(&json!({}), None).unwrap();
        for round in 0..3 {
            profiler.begin(10, round);
            profiler.event("enqueued");
            profiler.end().unwrap();
        }
        assert_eq!(profiler.records.len(), 3);
        assert_eq!(profiler.sum_items, 30);
        assert_eq!(profiler.sum_updates, 3);
        assert!(profiler.records.iter().all(|entry| entry.is_complete() && entry.events.len() == 1));
        println!("{}", profiler.brief());
    }
}
