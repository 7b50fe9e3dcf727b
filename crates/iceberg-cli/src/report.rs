use std::io::{self, Write};

use colored::{Color, Colorize};
use iceberg_core::{
    risk_buckets, sector_display_name, ExposureBand, RiskBuckets, RiskLevel, RiskTable,
    ScoreResult, SectorCounts,
};
use iceberg_tables::{CENSUS_TABLE, RISK_TABLE_SOURCE};
use serde::Serialize;

use crate::cli::OutputFormat;

const TITLE: &str = "The Iceberg Index: Local AI Disruption Map";
const BAR_WIDTH: u64 = 30;

/// Everything the terminal and JSON views show for one zip code.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub zip: String,
    pub index_score: f64,
    pub band: ExposureBand,
    pub total_workers: u64,
    pub dominant_sector: Option<String>,
    pub buckets: RiskBuckets,
    pub raw_data: SectorCounts,
}

impl Report {
    pub fn new(zip: impl Into<String>, result: ScoreResult, risk_table: &RiskTable) -> Self {
        let band = result.band();
        let buckets = risk_buckets(&result.counts, risk_table);
        Self {
            zip: zip.into(),
            index_score: result.index_score,
            band,
            total_workers: result.total_workers,
            dominant_sector: result.dominant_sector,
            buckets,
            raw_data: result.counts,
        }
    }

    pub fn dominant_label(&self) -> String {
        self.dominant_sector
            .as_deref()
            .map_or_else(|| "None".to_string(), sector_display_name)
    }
}

pub fn write_report(
    report: &Report,
    format: OutputFormat,
    color: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(report, color, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::from)?;
            writeln!(out)
        }
    }
}

pub fn render_text(report: &Report, color: bool, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", paint(TITLE, Color::Cyan, color))?;
    writeln!(out, "Zip code {}", report.zip)?;
    writeln!(out)?;

    writeln!(
        out,
        "  {:<24} {:.1}/100",
        "Disruption Index Score", report.index_score
    )?;
    writeln!(out, "  {:<24} {}", "Dominant Sector", report.dominant_label())?;
    writeln!(
        out,
        "  {:<24} {}",
        "Total Workforce",
        group_thousands(report.total_workers)
    )?;
    writeln!(out)?;

    let analysis = paint(report.band.analysis(), band_color(report.band), color);
    writeln!(out, "Analysis: {analysis}")?;
    writeln!(out)?;

    writeln!(out, "Job Composition")?;
    let composition = report.raw_data.composition();
    let widest = composition
        .iter()
        .map(|(sector, _)| sector.len())
        .max()
        .unwrap_or(0);
    let largest = composition.first().map_or(0, |(_, count)| *count);
    for (sector, count) in &composition {
        writeln!(
            out,
            "  {:<widest$}  {:>9}  {}",
            sector_display_name(sector),
            group_thousands(*count),
            bar(*count, largest)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Workforce Exposure Breakdown")?;
    let levels = report.buckets.levels();
    let largest = levels.iter().map(|(_, count)| *count).max().unwrap_or(0);
    for (level, count) in levels {
        writeln!(
            out,
            "  {:<30}  {:>9}  {}",
            level.label(),
            group_thousands(count),
            paint(&bar(count, largest), level_color(level), color)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Raw Census Data")?;
    for (key, count) in report.raw_data.iter() {
        writeln!(out, "  {key}: {count}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Data sources: US Census ACS 5-year table {CENSUS_TABLE}; exposure weights from {RISK_TABLE_SOURCE}."
    )
}

const fn band_color(band: ExposureBand) -> Color {
    match band {
        ExposureBand::Low => Color::Green,
        ExposureBand::Moderate => Color::Yellow,
        ExposureBand::High => Color::Red,
    }
}

const fn level_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn bar(count: u64, largest: u64) -> String {
    if largest == 0 {
        return String::new();
    }
    let cells = count.saturating_mul(BAR_WIDTH).saturating_add(largest / 2) / largest;
    "#".repeat(usize::try_from(cells).unwrap_or(0))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use iceberg_core::{compute_score, TOTAL_WORKERS_KEY};

    use super::*;

    fn sample() -> Report {
        let table = RiskTable::new([("Office_Admin", 0.90), ("Computer_Math", 0.95)])
            .expect("valid table");
        let counts = SectorCounts::from_iter([
            (TOTAL_WORKERS_KEY, 1200),
            ("Computer_Math", 120),
            ("Office_Admin", 1080),
        ]);
        let result = compute_score(counts, &table).expect("score");
        Report::new("14604", result, &table)
    }

    fn render(report: &Report, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_report(report, format, false, &mut buf).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn text_report_shows_metrics_and_charts() {
        let text = render(&sample(), OutputFormat::Text);

        assert!(text.contains("Disruption Index Score   90.5/100"));
        assert!(text.contains("Dominant Sector          Office Admin"));
        assert!(text.contains("Total Workforce          1,200"));
        assert!(text.contains("Analysis: High Exposure (Admin/Information Heavy)"));
        assert!(text.contains("High Exposure (AI Ready)"));
        assert!(text.contains("  Total_Workers: 1200"));
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("Data sources: US Census ACS 5-year table S2401; exposure weights from Eloundou et al. (2023)"));

        let composition = composition_section(&text);
        let office = composition.find("Office Admin").expect("office row");
        let math = composition.find("Computer Math").expect("math row");
        assert!(office < math, "composition is sorted by count");
    }

    #[test]
    fn composition_excludes_total() {
        let text = render(&sample(), OutputFormat::Text);
        assert!(!composition_section(&text).contains("Total"));
    }

    fn composition_section(text: &str) -> &str {
        text.split("Job Composition")
            .nth(1)
            .and_then(|rest| rest.split("Workforce Exposure Breakdown").next())
            .expect("composition section")
    }

    #[test]
    fn json_report_carries_engine_output() {
        let value: serde_json::Value =
            serde_json::from_str(&render(&sample(), OutputFormat::Json)).expect("json");

        assert_eq!(value["zip"], "14604");
        assert_eq!(value["index_score"], 90.5);
        assert_eq!(value["band"], "high");
        assert_eq!(value["dominant_sector"], "Office_Admin");
        assert_eq!(value["buckets"]["high"], 1200);
        assert_eq!(value["raw_data"]["Total_Workers"], 1200);
    }

    #[test]
    fn bars_scale_to_the_largest_row() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(10, 10).len(), 30);
        assert_eq!(bar(5, 10).len(), 15);
        assert_eq!(bar(0, 10), "");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn missing_dominant_reads_none() {
        let mut report = sample();
        report.dominant_sector = None;
        assert_eq!(report.dominant_label(), "None");
    }
}
