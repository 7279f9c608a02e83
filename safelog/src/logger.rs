//! Logger bootstrap for the safelog binary.
//!
//! The process logger writes through a `LogScrubber`, so the tool's own
//! diagnostics get the same treatment as the streams it filters. The scrubber is
//! handed to `env_logger` as its pipe target rather than installed globally on
//! its own; env_logger serialises writers on that target.
//!
//! License: MIT OR Apache-2.0

use std::io::{self, Write};

use env_logger::{Builder, Env, Target, WriteStyle};
use log::LevelFilter;
use safelog_core::LogScrubber;

/// Builds an `env_logger` builder whose output passes through a scrubber
/// wrapping `sink`.
///
/// `RUST_LOG` sets the filter unless `level` overrides it.
pub fn scrubbing_builder<W>(level: Option<LevelFilter>, sink: W) -> Builder
where
    W: Write + Send + 'static,
{
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(LogScrubber::new(sink))));
    builder
}

/// Installs the global logger, writing scrubbed records to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let _ = scrubbing_builder(level, io::stderr()).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_records_are_scrubbed() {
        let buf = SharedBuf::default();
        let logger = scrubbing_builder(Some(LevelFilter::Info), buf.clone())
            .format(|out, record| writeln!(out, "{}: {}", record.level(), record.args()))
            .build();

        logger.log(
            &Record::builder()
                .args(format_args!("accepted connection from 203.0.113.9:51234"))
                .level(Level::Info)
                .target("safelog::test")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped [2001:db8::7]:443"))
                .level(Level::Debug)
                .target("safelog::test")
                .build(),
        );
        logger.flush();

        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "INFO: accepted connection from [scrubbed]\n");
    }
}
