use super::summary::SummaryMetric;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Builds the terminal table of summary metrics.
    pub fn summary_table(metrics: &[SummaryMetric]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["METRIC", "VALUE"]);
        for metric in metrics {
            table.add_row(row![metric.label, metric.value]);
        }
        table
    }

    pub fn summary(metrics: &[SummaryMetric]) {
        Self::summary_table(metrics).printstd();
    }
}
