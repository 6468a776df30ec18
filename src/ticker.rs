//! One-second refresh feed for a class countdown.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::Stream;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::join::ModalCountdown;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Yields a fresh [`ModalCountdown`] on every tick, evaluated against the
/// wall clock at that tick. The first item is produced immediately.
///
/// Ticks stop when the stream is dropped.
pub fn countdown_stream(
    start: DateTime<Utc>,
    period: Duration,
) -> impl Stream<Item = ModalCountdown> + Send + 'static {
    let mut timer: Interval = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    futures::stream::unfold(timer, move |mut timer| async move {
        timer.tick().await;
        Some((ModalCountdown::at(start, Utc::now()), timer))
    })
}
