use tracing_subscriber::EnvFilter;

/// Installs the global stderr subscriber. `--debug` forces crate-level
/// debug traces; otherwise `RUST_LOG` is honored with an `info` fallback.
/// Logs go to stderr so stdout stays clean for the rendered answer.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("llmq=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("llmq=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Captures formatted log output for assertions in unit tests.
#[cfg(test)]
pub(crate) mod capture {
    #![allow(clippy::expect_used)]

    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::subscriber::DefaultGuard;
    use tracing_subscriber::EnvFilter;

    pub type Logs = Arc<Mutex<Vec<u8>>>;

    #[derive(Clone)]
    struct Sink(Logs);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .expect("log buffer poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Installs a thread-local subscriber running `filter` and returns the
    /// guard plus the buffer the output lands in.
    pub fn install(filter: &str) -> (DefaultGuard, Logs) {
        let logs: Logs = Arc::new(Mutex::new(Vec::new()));
        let sink = Sink(logs.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();
        (tracing::subscriber::set_default(subscriber), logs)
    }

    pub fn output(logs: &Logs) -> String {
        String::from_utf8(logs.lock().expect("log buffer poisoned").clone())
            .expect("log output is utf8")
    }
}
