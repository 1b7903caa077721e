//! Dashboard data contract and the declarative board model.
//!
//! The dashboard page embeds five `data-*` attributes on its container
//! element; [`ContainerAttrs`] is that raw attribute snapshot.
//! [`DashboardData::from_attrs`] parses it (counter attributes default to 0
//! on any parse failure, the events attribute is strict JSON), and
//! [`Board::from_data`] lays the result out as the options structure the
//! charting library consumes: a grid of cells grouped into rows, plus a
//! component bound to each cell.
//!
//! The whole pass is load → parse → configure → render-or-fail: any events
//! parse failure or serialisation failure aborts the render, and the caller
//! is expected to fall back to a static error notice.

use serde::{Deserialize, Serialize};

/// Raw attribute values read off the dashboard container element.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttrs {
    pub users: Option<String>,
    pub devices: Option<String>,
    pub success: Option<String>,
    pub failed: Option<String>,
    pub events: Option<String>,
}

impl ContainerAttrs {
    /// Build the attribute snapshot the dashboard page embeds, serialising
    /// the event records the way they travel in the `data-events` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Render`] when the records fail to
    /// serialise.
    pub fn from_counts(
        users: u64,
        devices: u64,
        success: u64,
        failed: u64,
        records: &[EventRecord],
    ) -> Result<Self, DashboardError> {
        let events = serde_json::to_string(records).map_err(DashboardError::Render)?;
        Ok(Self {
            users: Some(users.to_string()),
            devices: Some(devices.to_string()),
            success: Some(success.to_string()),
            failed: Some(failed.to_string()),
            events: Some(events),
        })
    }
}

/// Failures that abort a render pass.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The events attribute was present but not valid JSON.
    #[error("malformed events payload")]
    Events(#[source] serde_json::Error),

    /// The board options could not be serialised.
    #[error("failed to serialise board options")]
    Render(#[source] serde_json::Error),
}

/// One row of the event-history table, carried verbatim from the embedded
/// JSON. Missing fields default to empty strings and pass straight through
/// to the display layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub status: String,
}

impl EventRecord {
    /// Table row in display column order.
    #[must_use]
    pub fn row(&self) -> [String; 4] {
        [
            self.event_time.clone(),
            self.device_name.clone(),
            self.username.clone(),
            self.status.clone(),
        ]
    }
}

/// Parsed dashboard payload. Read once at page build; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    pub users: u64,
    pub devices: u64,
    pub success: u64,
    pub failed: u64,
    pub events: Vec<EventRecord>,
}

impl DashboardData {
    /// Parse the raw attribute snapshot.
    ///
    /// Counter attributes parse as integers and silently default to 0 when
    /// absent or non-numeric. An absent events attribute is an empty
    /// sequence; a present-but-malformed one aborts the pass.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Events`] when the events attribute is not
    /// valid JSON.
    pub fn from_attrs(attrs: &ContainerAttrs) -> Result<Self, DashboardError> {
        let events = match attrs.events.as_deref() {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(raw).map_err(DashboardError::Events)?,
        };

        Ok(Self {
            users: parse_count(attrs.users.as_deref()),
            devices: parse_count(attrs.devices.as_deref()),
            success: parse_count(attrs.success.as_deref()),
            failed: parse_count(attrs.failed.as_deref()),
            events,
        })
    }
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// The declarative options structure handed to the charting library.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub gui: Gui,
    pub components: Vec<Component>,
}

/// Grid description: layouts of rows of cells.
#[derive(Debug, Clone, Serialize)]
pub struct Gui {
    pub layouts: Vec<Layout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub rows: Vec<LayoutRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutRow {
    pub cells: Vec<Cell>,
}

/// A named layout slot a component binds to.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub id: &'static str,
}

/// A component bound to a cell.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    /// A single labeled numeric value.
    #[serde(rename = "KPI")]
    Kpi {
        cell: &'static str,
        title: &'static str,
        value: u64,
    },

    /// A chart or table rendered by the charting engine.
    #[serde(rename = "Highcharts")]
    Chart {
        cell: &'static str,
        #[serde(rename = "chartOptions")]
        chart_options: ChartOptions,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub chart: ChartSettings,
    pub title: ChartTitle,
    pub series: Vec<Series>,
    #[serde(rename = "xAxis", skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSettings {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub height: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartTitle {
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    /// Column-chart values.
    Counts(Vec<u64>),
    /// Table rows.
    Rows(Vec<[String; 4]>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub categories: Vec<&'static str>,
}

impl Board {
    /// Configure the five-cell board for a parsed payload: two KPI tiles,
    /// two single-bar column charts, and the event-history table. Event
    /// order is preserved from the payload.
    #[must_use]
    pub fn from_data(data: &DashboardData) -> Self {
        let gui = Gui {
            layouts: vec![Layout {
                rows: vec![
                    LayoutRow {
                        cells: vec![Cell { id: "kpi-users" }, Cell { id: "kpi-devices" }],
                    },
                    LayoutRow {
                        cells: vec![Cell { id: "success-chart" }, Cell { id: "failed-chart" }],
                    },
                    LayoutRow {
                        cells: vec![Cell { id: "events-table" }],
                    },
                ],
            }],
        };

        let components = vec![
            Component::Kpi {
                cell: "kpi-users",
                title: "Total Users",
                value: data.users,
            },
            Component::Kpi {
                cell: "kpi-devices",
                title: "Total Devices",
                value: data.devices,
            },
            Component::Chart {
                cell: "success-chart",
                chart_options: single_column("Success Events", "Success", data.success, "#28a745"),
            },
            Component::Chart {
                cell: "failed-chart",
                chart_options: single_column("Failed Events", "Failed", data.failed, "#dc3545"),
            },
            Component::Chart {
                cell: "events-table",
                chart_options: ChartOptions {
                    chart: ChartSettings {
                        kind: "table",
                        height: "250px",
                    },
                    title: ChartTitle {
                        text: "Event History",
                    },
                    series: vec![Series {
                        name: "Events",
                        data: SeriesData::Rows(
                            data.events.iter().map(EventRecord::row).collect(),
                        ),
                        color: None,
                    }],
                    x_axis: Some(Axis {
                        categories: vec!["Event Time", "Device", "User", "Status"],
                    }),
                },
            },
        ];

        Self { gui, components }
    }

    /// Serialise the board options to the JSON the charting library takes.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Render`] when serialisation fails.
    pub fn to_json(&self) -> Result<String, DashboardError> {
        serde_json::to_string(self).map_err(DashboardError::Render)
    }
}

fn single_column(
    title: &'static str,
    series_name: &'static str,
    value: u64,
    color: &'static str,
) -> ChartOptions {
    ChartOptions {
        chart: ChartSettings {
            kind: "column",
            height: "250px",
        },
        title: ChartTitle { text: title },
        series: vec![Series {
            name: series_name,
            data: SeriesData::Counts(vec![value]),
            color: Some(color),
        }],
        x_axis: None,
    }
}

/// One full render pass: parse the attribute snapshot, configure the board,
/// and serialise it.
///
/// # Errors
///
/// Returns [`DashboardError`] when the events attribute is malformed JSON
/// or the board fails to serialise. There is no partial output.
pub fn render(attrs: &ContainerAttrs) -> Result<String, DashboardError> {
    let data = DashboardData::from_attrs(attrs)?;
    Board::from_data(&data).to_json()
}
