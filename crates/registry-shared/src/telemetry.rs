//! Telemetry setup

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_telemetry(format: LogFormat) {
    // stdout belongs to command output
    if build_subscriber(format, std::io::stderr).try_init().is_err() {
        tracing::debug!("Telemetry already initialised");
    }
}

fn build_subscriber<W>(format: LogFormat, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => Box::new(
            registry.with(fmt::layer().json().with_target(true).with_writer(writer)),
        ),
        LogFormat::Compact => Box::new(registry.with(fmt::layer().compact().with_writer(writer))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_format_writes_to_the_given_writer() {
        for format in [LogFormat::Json, LogFormat::Compact] {
            let capture = Capture::default();
            let sink = capture.clone();
            let subscriber = build_subscriber(format, move || sink.clone());

            tracing::subscriber::with_default(subscriber, || tracing::info!("table follows"));

            let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
            assert!(out.contains("table follows"), "{:?} wrote nothing: {}", format, out);
        }
    }
}
