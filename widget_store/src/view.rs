// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serializable read model of a widget.

use chrono::{DateTime, Utc};
use serde::Serialize;
use widget_index::{Timestamp, Widget};

/// A widget as returned to callers, with API field names and a calendar
/// timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetView {
    /// Widget id.
    pub id: String,
    /// Left edge.
    pub x_coordinate: i32,
    /// Top edge.
    pub y_coordinate: i32,
    /// Stacking key.
    pub z_index: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Last modification time, RFC 3339 on the wire.
    pub updated_at: DateTime<Utc>,
}

impl From<&Widget> for WidgetView {
    fn from(w: &Widget) -> Self {
        Self {
            id: w.id().as_str().into(),
            x_coordinate: w.x,
            y_coordinate: w.y,
            z_index: w.z_index,
            width: w.width,
            height: w.height,
            updated_at: calendar_time(w.updated_at),
        }
    }
}

/// `stamp` as a UTC date, clamped to the range `chrono` can represent
/// (about 262,000 years either side of the epoch).
fn calendar_time(stamp: Timestamp) -> DateTime<Utc> {
    let millis = stamp.as_millis();
    DateTime::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

impl From<Widget> for WidgetView {
    fn from(w: Widget) -> Self {
        Self::from(&w)
    }
}
