//! Logging helpers shared by the seqlist crates.
//!
//! The crates emit their events through `tracing`. This crate knows the
//! tracing targets of the workspace, turns `RUST_LOG` style directives into a
//! [`Targets`] filter and provides a compact single-line event format.

use std::{env, fmt};

use ansiterm::{Color, Style};
use log::{level_filters::LevelFilter, Event, Level, Subscriber};
use time::format_description::well_known::Iso8601;
use tracing_log::NormalizeEvent;
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        format::Writer,
        time::{FormatTime, UtcTime},
        FmtContext, FormatEvent, FormatFields, FormattedFields,
    },
    registry::LookupSpan,
};

/// Tracing targets of all workspace crates.
pub static SEQLIST_MODULES: &[&str] = &[
    "seqlist_collections",
    "seqlist_log",
    "seqlist_test_log",
];

/// Pseudo target that expands to every entry of [`SEQLIST_MODULES`].
pub const SEQLIST_TARGET: &str = "seqlist";

pub const ENV: &str = "RUST_LOG";

/// A single `target=level` (or bare `level`) filter directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub target: Option<String>,
    pub level: LevelFilter,
}

/// Parses a comma separated list of directives.
///
/// Directives with an unknown level are skipped.
pub fn parse_directives(directives: &str) -> Vec<Directive> {
    directives
        .split(',')
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .filter_map(|dir| {
            let (target, level) = match dir.split_once('=') {
                Some((target, level)) => (Some(target.to_owned()), level),
                None => (None, dir),
            };
            let level = level.parse().ok()?;
            Some(Directive { target, level })
        })
        .collect()
}

pub trait TargetsExt {
    fn with_seqlist_targets(self, level: LevelFilter) -> Self;
    fn with_directives(self, directives: &str) -> Self;
    fn with_env(self) -> Self;
}

impl TargetsExt for Targets {
    fn with_seqlist_targets(self, level: LevelFilter) -> Targets {
        SEQLIST_MODULES
            .iter()
            .fold(self, |targets, &module| targets.with_target(module, level))
    }

    fn with_directives(self, directives: &str) -> Targets {
        parse_directives(directives)
            .into_iter()
            .fold(self, |targets, directive| match directive.target {
                Some(target) if target == SEQLIST_TARGET => {
                    targets.with_seqlist_targets(directive.level)
                }
                Some(target) => targets.with_target(target, directive.level),
                None => targets.with_default(directive.level),
            })
    }

    fn with_env(self) -> Targets {
        match env::var(ENV) {
            Ok(directives) => self.with_directives(&directives),
            Err(env::VarError::NotPresent) => self,
            Err(env::VarError::NotUnicode(_)) => panic!("env var {ENV} contains non-UTF-8 value"),
        }
    }
}

const MAX_MODULE_WIDTH: usize = 20;

/// Shortens a target to its last path segment and fits it into
/// `MAX_MODULE_WIDTH - 1` columns. The second value is the padding indicator.
fn short_target(target: &str) -> (&str, &'static str) {
    let mut target = match target.rfind("::") {
        Some(pos) => &target[pos + 2..],
        None => target,
    };
    if target.len() > MAX_MODULE_WIDTH {
        let mut end = MAX_MODULE_WIDTH - 1;
        while !target.is_char_boundary(end) {
            end -= 1;
        }
        target = &target[..end];
        return (target, "…");
    }
    let indicator = if target.len() < MAX_MODULE_WIDTH {
        " "
    } else {
        ""
    };
    (target, indicator)
}

fn level_color(level: &Level) -> Color {
    match *level {
        Level::TRACE => Color::Purple,
        Level::DEBUG => Color::Blue,
        Level::INFO => Color::Green,
        Level::WARN => Color::Yellow,
        Level::ERROR => Color::Red,
    }
}

/// Event formatter writing `<time> <LEVEL> <module> | <fields>, <spans>`.
pub struct Formatting<T: FormatTime>(pub T);

impl<S, N, T: FormatTime> FormatEvent<S, N> for Formatting<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let ansi = writer.has_ansi_escapes();
        let plain = Style::default();
        let (bold, dim) = if ansi {
            (plain.bold(), plain.dimmed())
        } else {
            (plain, plain)
        };

        write!(&mut writer, "{}", dim.prefix())?;
        self.0.format_time(&mut writer)?;
        write!(&mut writer, "{}", dim.suffix())?;

        // Events bridged from the `log` crate carry their real metadata in fields.
        let normalized_metadata = event.normalized_metadata();
        let metadata = normalized_metadata
            .as_ref()
            .unwrap_or_else(|| event.metadata());

        let color = if ansi {
            Style::from(level_color(metadata.level()))
        } else {
            plain
        };
        let (target, indicator) = short_target(metadata.target());

        write!(
            &mut writer,
            " {}{:5}{} {}{:width$}{}{} | ",
            color.prefix(),
            metadata.level(),
            color.suffix(),
            dim.prefix(),
            target,
            indicator,
            dim.suffix(),
            width = MAX_MODULE_WIDTH - 1,
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, ", {}{}{{{}", bold.prefix(), span.name(), bold.suffix())?;

                let ext = span.extensions();
                let fields = &ext
                    .get::<FormattedFields<N>>()
                    .expect("will never be `None`");
                if !fields.is_empty() {
                    write!(writer, "{}{}}}{}", fields, bold.prefix(), bold.suffix())?;
                }
            }
        }

        writeln!(writer)
    }
}

/// Writes an ISO 8601 UTC timestamp, or nothing if disabled.
pub struct MaybeSystemTime(pub bool);

impl FormatTime for MaybeSystemTime {
    fn format_time(&self, w: &mut Writer) -> fmt::Result {
        if self.0 {
            UtcTime::new(Iso8601::DEFAULT).format_time(w)
        } else {
            ().format_time(w)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_directives() {
        let directives = parse_directives("info, seqlist=trace,foo::bar=warn,bogus=loud,");
        assert_eq!(
            directives,
            vec![
                Directive {
                    target: None,
                    level: LevelFilter::INFO,
                },
                Directive {
                    target: Some("seqlist".to_owned()),
                    level: LevelFilter::TRACE,
                },
                Directive {
                    target: Some("foo::bar".to_owned()),
                    level: LevelFilter::WARN,
                },
            ]
        );
    }

    #[test]
    fn it_expands_the_seqlist_target() {
        let targets = Targets::new().with_directives("seqlist=debug");
        for &module in SEQLIST_MODULES {
            assert!(targets.would_enable(module, &Level::DEBUG));
            assert!(!targets.would_enable(module, &Level::TRACE));
        }
        assert!(!targets.would_enable("other_crate", &Level::ERROR));
    }

    #[test]
    fn it_shortens_targets() {
        assert_eq!(
            short_target("seqlist_collections::contiguous_list"),
            ("contiguous_list", " ")
        );
        assert_eq!(short_target("abcdefghijklmnopqrst"), ("abcdefghijklmnopqrst", ""));
        assert_eq!(
            short_target("a::abcdefghijklmnopqrstuvwxyz"),
            ("abcdefghijklmnopqrs", "…")
        );
    }
}
