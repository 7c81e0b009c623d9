// Time window domain model - Window specs, presets and the resolved filter
use super::error::PipelineError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    fn span(self, amount: i64) -> Option<TimeDelta> {
        match self {
            TimeUnit::Minute => TimeDelta::try_minutes(amount),
            TimeUnit::Hour => TimeDelta::try_hours(amount),
            TimeUnit::Day => TimeDelta::try_days(amount),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(TimeUnit::Minute),
            "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            other => Err(PipelineError::invalid_window(format!(
                "unknown time unit {:?}, expected minute, hour or day",
                other
            ))),
        }
    }
}

/// Caller-supplied description of the time range to chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WindowSpec {
    Relative {
        amount: i64,
        unit: TimeUnit,
    },
    Absolute {
        #[serde(default)]
        start: Option<DateTime<Utc>>,
        #[serde(default)]
        end: Option<DateTime<Utc>>,
    },
    All,
}

impl WindowSpec {
    pub fn relative(amount: i64, unit: TimeUnit) -> Self {
        WindowSpec::Relative { amount, unit }
    }

    /// Resolve against `now`, which becomes the end of a relative window.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<TimeWindow, PipelineError> {
        match *self {
            WindowSpec::Relative { amount, unit } => {
                if amount <= 0 {
                    return Err(PipelineError::invalid_window(format!(
                        "relative amount must be positive, got {}",
                        amount
                    )));
                }
                let start = unit
                    .span(amount)
                    .and_then(|span| now.checked_sub_signed(span))
                    .ok_or_else(|| {
                        PipelineError::invalid_window(format!(
                            "relative span of {} {:?} is out of range",
                            amount, unit
                        ))
                    })?;
                TimeWindow::bounded(Some(start), Some(now))
            }
            WindowSpec::Absolute { start, end } => TimeWindow::bounded(start, end),
            WindowSpec::All => Ok(TimeWindow::unbounded()),
        }
    }
}

/// Resolve a window spec against the current wall clock.
pub fn resolve(spec: &WindowSpec) -> Result<TimeWindow, PipelineError> {
    spec.resolve(Utc::now())
}

/// Concrete UTC filter. Bounds are half-open: `start <= t < end`, and a
/// missing bound does not constrain its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn bounded(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, PipelineError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(PipelineError::invalid_window(format!(
                    "start {} is after end {}",
                    start.to_rfc3339(),
                    end.to_rfc3339()
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| start <= timestamp)
            && self.end.is_none_or(|end| timestamp < end)
    }

    /// Human label for chart titles.
    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (None, None) => "All data".to_string(),
            (Some(start), None) => format!("Since {}", start.format(LABEL_FORMAT)),
            (None, Some(end)) => format!("Until {}", end.format(LABEL_FORMAT)),
            (Some(start), Some(end)) => format!(
                "{} to {}",
                start.format(LABEL_FORMAT),
                end.format(LABEL_FORMAT)
            ),
        }
    }
}

/// Quick ranges offered by the dashboard. Refresh re-runs `LastHour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowPreset {
    #[serde(rename = "15m")]
    Last15Minutes,
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "12h")]
    Last12Hours,
    #[serde(rename = "1d")]
    LastDay,
    #[serde(rename = "7d")]
    LastWeek,
    #[serde(rename = "all")]
    AllData,
}

impl WindowPreset {
    pub const ALL: [WindowPreset; 6] = [
        WindowPreset::Last15Minutes,
        WindowPreset::LastHour,
        WindowPreset::Last12Hours,
        WindowPreset::LastDay,
        WindowPreset::LastWeek,
        WindowPreset::AllData,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WindowPreset::Last15Minutes => "15m",
            WindowPreset::LastHour => "1h",
            WindowPreset::Last12Hours => "12h",
            WindowPreset::LastDay => "1d",
            WindowPreset::LastWeek => "7d",
            WindowPreset::AllData => "all",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WindowPreset::Last15Minutes => "Last 15 Minutes",
            WindowPreset::LastHour => "Last Hour",
            WindowPreset::Last12Hours => "Last 12 Hours",
            WindowPreset::LastDay => "Last Day",
            WindowPreset::LastWeek => "Last Week",
            WindowPreset::AllData => "All Data",
        }
    }

    pub fn spec(self) -> WindowSpec {
        match self {
            WindowPreset::Last15Minutes => WindowSpec::relative(15, TimeUnit::Minute),
            WindowPreset::LastHour => WindowSpec::relative(1, TimeUnit::Hour),
            WindowPreset::Last12Hours => WindowSpec::relative(12, TimeUnit::Hour),
            WindowPreset::LastDay => WindowSpec::relative(1, TimeUnit::Day),
            WindowPreset::LastWeek => WindowSpec::relative(7, TimeUnit::Day),
            WindowPreset::AllData => WindowSpec::All,
        }
    }
}

impl FromStr for WindowPreset {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowPreset::ALL
            .into_iter()
            .find(|preset| preset.key() == s)
            .ok_or_else(|| PipelineError::invalid_window(format!("unknown range preset {:?}", s)))
    }
}
