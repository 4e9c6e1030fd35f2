use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use typed_log_sink::{args, memory_sink::MemorySink, pipeline::Pipeline, registry::Registry};

fn main() {
    let sink = Arc::new(MemorySink::new());
    let registry = Registry::new(Arc::new(Pipeline::new(sink.clone())));
    let logger = registry.get_logger("load", serde_json::Map::new());

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger.error(args![
            "load test error",
            json!({"iteration": i, "ratio": i as f64 / 3.0, "tags": ["a", "b"], "user": {"id": i}})
        ]);
    }

    let elapsed = start.elapsed();
    println!("sent {} events in {:?} (~{:.0} ev/s), captured {}",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64(),
        sink.len()
    );
}
