//! Chart-ready data handed to the rendering collaborator.
//!
//! Nothing here knows how charts are drawn: a renderer receives labels and
//! values (or points) and is free to present them however it likes.

use crate::data::SummaryTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub x: String,
    pub y: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub group: Option<String>,
    /// (column, value) pairs shown on hover.
    pub hover: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapData {
    pub center: (f64, f64),
    pub zoom: u8,
    pub points: Vec<MapPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Pie { summary: SummaryTable },
    Bar { summary: SummaryTable },
    Line {
        x_label: String,
        y_label: String,
        series: Vec<LineSeries>,
    },
    Scatter(ScatterData),
    Map(MapData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Data loaded but nothing is left to show.
    NoData,
    /// A column the panel needs is absent.
    MissingColumn,
    Failed,
}

/// User-visible message shown in place of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::NoData,
            message: message.into(),
        }
    }

    pub fn missing_column(column: &str, panel: &str) -> Self {
        Self {
            kind: NoticeKind::MissingColumn,
            message: format!("Cannot create '{panel}' chart: column '{column}' not found"),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failed,
            message: message.into(),
        }
    }
}

/// A labeled value shown as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub label: String,
    pub value: String,
}

impl Detail {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelContent {
    Chart(ChartData),
    Notice(Notice),
    Details(Vec<Detail>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub content: PanelContent,
}

impl Panel {
    pub fn chart(title: impl Into<String>, chart: ChartData) -> Self {
        Self {
            title: title.into(),
            content: PanelContent::Chart(chart),
        }
    }

    pub fn notice(title: impl Into<String>, notice: Notice) -> Self {
        Self {
            title: title.into(),
            content: PanelContent::Notice(notice),
        }
    }

    pub fn details(title: impl Into<String>, details: Vec<Detail>) -> Self {
        Self {
            title: title.into(),
            content: PanelContent::Details(details),
        }
    }

    pub fn as_chart(&self) -> Option<&ChartData> {
        match &self.content {
            PanelContent::Chart(chart) => Some(chart),
            _ => None,
        }
    }

    pub fn as_notice(&self) -> Option<&Notice> {
        match &self.content {
            PanelContent::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Everything one dashboard view hands to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub panels: Vec<Panel>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    pub fn push(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }
}
