//! Writing statistics with a specific prefix and closing line.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;

use convert_case::Case;
use convert_case::Casing;

/// Where and how statistics are written: every statistic goes on its own line of the form
/// `{prefix} {name}={value}`, optionally followed by a closing line once all have been written.
pub struct StatisticOptions<'a> {
    statistic_prefix: &'a str,
    // A closing line which is printed after all of the statistics have been printed
    after_statistics: Option<&'a str>,
    statistics_casing: Option<Case>,
    statistics_writer: Box<dyn Write + 'a>,
}

impl Debug for StatisticOptions<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("after_statistics", &self.after_statistics)
            .field("statistics_casing", &self.statistics_casing)
            .field("statistics_writer", &"<Writer>")
            .finish()
    }
}

impl<'a> StatisticOptions<'a> {
    pub fn new(prefix: &'a str, writer: Box<dyn Write + 'a>) -> Self {
        StatisticOptions {
            statistic_prefix: prefix,
            after_statistics: None,
            statistics_casing: None,
            statistics_writer: writer,
        }
    }

    /// Converts the names of the statistics to the given casing.
    pub fn with_casing(mut self, casing: Case) -> Self {
        self.statistics_casing = Some(casing);
        self
    }

    pub fn with_after_statistics(mut self, after: &'a str) -> Self {
        self.after_statistics = Some(after);
        self
    }

    /// Logs the statistic with name `name` and value `value`.
    pub fn log_statistic(&mut self, name: impl Display, value: impl Display) {
        let name = if let Some(casing) = &self.statistics_casing {
            name.to_string().to_case(*casing)
        } else {
            name.to_string()
        };
        let prefix = self.statistic_prefix;
        let _ = writeln!(self.statistics_writer, "{prefix} {name}={value}");
    }

    /// Logs the closing line of the statistics (if it has been set).
    pub fn log_statistic_postfix(&mut self) {
        if let Some(post_fix) = self.after_statistics {
            let _ = writeln!(self.statistics_writer, "{post_fix}");
        }
    }
}
