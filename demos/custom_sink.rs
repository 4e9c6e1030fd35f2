use std::sync::Arc;

use serde_json::json;
use typed_log_sink::{
    args,
    error::BoxError,
    pipeline::Pipeline,
    registry::Registry,
    sink::LogSink,
    SinkMethod,
};

/// Example of integrating a completely custom backend by implementing
/// the `LogSink` trait directly. Imagine this appends to some
/// proprietary store for which this crate does not provide a sink.
struct MyCustomDbSink;

impl LogSink for MyCustomDbSink {
    fn write(&self, method: SinkMethod, line: &str) -> Result<(), BoxError> {
        // Here you would call your own client library for the target DB.
        // For the sake of example we just print the line.
        println!("[my-custom-db:{:?}] {}", method, line);
        Ok(())
    }
}

fn main() {
    let sink: Arc<dyn LogSink> = Arc::new(MyCustomDbSink);
    let registry = Registry::new(Arc::new(Pipeline::new(sink)));

    let mut context = serde_json::Map::new();
    context.insert("db".into(), json!("my-custom-db"));
    let logger = registry.get_logger("custom-backend", context);

    logger.info(args!["custom backend example started"]);
    logger
        .update(serde_json::Map::from_iter([("request_id".to_string(), json!("r-17"))]))
        .error(args!["simulated error", json!({"attempt": 3, "latency_ms": 12.5})]);
}
