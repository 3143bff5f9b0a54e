//! tracing setup: coloured console output plus a plain-text run log.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{Stamp, log_file_path, strip_ansi};

/// Target marking stage headers such as `Compiling 3 file(s)`.
pub(super) const STAGE_TARGET: &str = "maker::stage";

/// How an event is rendered, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match *metadata.level() {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if metadata.target() == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Terminal rendering of `msg`.
    fn paint(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }

    /// Marker written between the timestamp and the message in the log file.
    const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::Error => "    [error] ",
            Self::Warn => "    [warn] ",
            Self::Info => "    ",
            Self::Debug => "    [debug] ",
        }
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
struct Message(String);

impl tracing::field::Visit for Message {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut message = Message::default();
    event.record(&mut message);
    message.0
}

/// Layer appending every event to the run log, timestamped and without
/// colour codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the run log for `command` in the cache directory.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::open(&log_file_path(command)?, command)
    }

    /// Start a fresh run log at `path`, headed by the maker version, the
    /// command and the start time.
    pub(super) fn open(path: &Path, command: &str) -> Option<Self> {
        let version =
            option_env!("MAKER_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let mut file = fs::File::create(path).ok()?;
        writeln!(
            file,
            "# maker {version} {command}, started {} UTC",
            Stamp::Full.now()
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let kind = Kind::of(event.metadata());
        let line = format!(
            "[{}] {}{}",
            Stamp::Clock.now(),
            kind.tag(),
            strip_ansi(&message_of(event))
        );
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console event format: stage arrows, coloured warnings and errors.
struct ConsoleFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let kind = Kind::of(event.metadata());
        writeln!(writer, "{}", kind.paint(&message_of(event)))
    }
}

/// Install the global subscriber for one maker run.
///
/// The console shows info and above (debug too when `verbose`), with
/// warnings and errors on stderr. The run log for `command` always receives
/// debug and above. Call once, before anything is logged.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));
    let console = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(writer)
        .with_filter(console_level);
    let run_log = FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(run_log)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_tags_are_plain_text() {
        for kind in [Kind::Stage, Kind::Error, Kind::Warn, Kind::Info, Kind::Debug] {
            assert_eq!(strip_ansi(kind.tag()), kind.tag());
        }
    }

    #[test]
    fn painted_messages_strip_back_to_their_text() {
        assert_eq!(strip_ansi(&Kind::Stage.paint("Summary")), "==> Summary");
        assert_eq!(strip_ansi(&Kind::Error.paint("boom")), "ERROR boom");
        assert_eq!(strip_ansi(&Kind::Debug.paint("detail")), "  detail");
    }

    #[test]
    fn run_log_header_names_command() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        FileLayer::open(&path, "build").unwrap();
        let header = fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("# maker "));
        assert!(header.contains(" build, started "));
    }
}
