//! Charts module - Chart-ready output and renderer sinks

mod chart;
mod sink;

pub use chart::{
    ChartData, Detail, LineSeries, MapData, MapPoint, Notice, NoticeKind, Page, Panel,
    PanelContent, ScatterData, ScatterPoint,
};
pub use sink::{ChartSink, JsonSink, TextSink};
