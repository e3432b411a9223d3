use std::fmt::Display;

use super::StatisticOptions;

/// Logs statistics under a name prefix; nested statistics extend the prefix.
#[derive(Debug)]
pub struct StatisticLogger<'options, 'writer> {
    /// The prefix which will be attached to the statistic name
    name_prefix: String,
    options: &'options mut StatisticOptions<'writer>,
}

impl<'options, 'writer> StatisticLogger<'options, 'writer> {
    pub fn new(
        name_prefix: impl Display,
        options: &'options mut StatisticOptions<'writer>,
    ) -> Self {
        Self {
            name_prefix: name_prefix.to_string(),
            options,
        }
    }

    pub fn attach_to_prefix(
        &mut self,
        addition_to_prefix: impl Display,
    ) -> StatisticLogger<'_, 'writer> {
        StatisticLogger {
            name_prefix: format!("{}_{}", self.name_prefix, addition_to_prefix),
            options: &mut *self.options,
        }
    }
}

impl std::fmt::Write for StatisticLogger<'_, '_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.options.log_statistic(&self.name_prefix, s);
        Ok(())
    }
}
