//! Renderer seam: sinks consume finished pages.

use crate::charts::{ChartData, Page, PanelContent};
use std::io::{self, Write};

/// Consumes chart-ready pages. Implementations decide how to draw them.
pub trait ChartSink {
    type Error;

    fn render_page(&mut self, page: &Page) -> Result<(), Self::Error>;
}

/// Writes each page as one JSON document.
pub struct JsonSink<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: true }
    }

    pub fn compact(out: W) -> Self {
        Self { out, pretty: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for JsonSink<W> {
    type Error = serde_json::Error;

    fn render_page(&mut self, page: &Page) -> Result<(), Self::Error> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, page)?;
        } else {
            serde_json::to_writer(&mut self.out, page)?;
        }
        writeln!(self.out).map_err(serde_json::Error::io)
    }
}

/// Plain-text tables for the terminal.
pub struct TextSink<W: Write> {
    out: W,
    /// Scatter and map panels list at most this many points.
    max_points: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, max_points: 20 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn chart(&mut self, chart: &ChartData) -> io::Result<()> {
        match chart {
            ChartData::Pie { summary } => {
                writeln!(self.out, "  {:<40} {:>14} {:>8}", summary.group_column, summary.value_column, "%")?;
                for row in &summary.rows {
                    let share = summary
                        .share(&row.label)
                        .map(|s| format!("{s:.1}"))
                        .unwrap_or_else(|| "-".to_string());
                    writeln!(self.out, "  {:<40} {:>14.2} {:>8}", row.label, row.value, share)?;
                }
            }
            ChartData::Bar { summary } => {
                writeln!(self.out, "  {:<40} {:>14}", summary.group_column, summary.value_column)?;
                for row in &summary.rows {
                    writeln!(self.out, "  {:<40} {:>14.2}", row.label, row.value)?;
                }
            }
            ChartData::Line { x_label, y_label, series } => {
                for s in series {
                    writeln!(self.out, "  {} ({x_label} -> {y_label})", s.name)?;
                    for (x, y) in &s.points {
                        writeln!(self.out, "    {x:>8} {y:>14.2}")?;
                    }
                }
            }
            ChartData::Scatter(data) => {
                writeln!(self.out, "  {} points: {} vs {}", data.points.len(), data.x, data.y)?;
                for p in data.points.iter().take(self.max_points) {
                    writeln!(
                        self.out,
                        "    {:<40} {:>12.2} {:>12.2} {}",
                        p.label.as_deref().unwrap_or("-"),
                        p.x,
                        p.y,
                        p.color.as_deref().unwrap_or("")
                    )?;
                }
            }
            ChartData::Map(data) => {
                writeln!(
                    self.out,
                    "  {} locations around ({:.4}, {:.4})",
                    data.points.len(),
                    data.center.0,
                    data.center.1
                )?;
                for p in data.points.iter().take(self.max_points) {
                    writeln!(self.out, "    {:<40} {:>10.4} {:>10.4}", p.name, p.lat, p.lon)?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> ChartSink for TextSink<W> {
    type Error = io::Error;

    fn render_page(&mut self, page: &Page) -> io::Result<()> {
        writeln!(self.out, "== {} ==", page.title)?;
        for panel in &page.panels {
            writeln!(self.out)?;
            writeln!(self.out, "# {}", panel.title)?;
            match &panel.content {
                PanelContent::Chart(chart) => self.chart(chart)?,
                PanelContent::Notice(notice) => writeln!(self.out, "  ! {}", notice.message)?,
                PanelContent::Details(details) => {
                    for d in details {
                        writeln!(self.out, "  {}: {}", d.label, d.value)?;
                    }
                }
            }
        }
        Ok(())
    }
}
