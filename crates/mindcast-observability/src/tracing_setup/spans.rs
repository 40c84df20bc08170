//! Span definitions per operation: detection, forecast, maintenance, refresh.

/// Create a correlation detection span.
#[macro_export]
macro_rules! detection_span {
    ($episode_id:expr) => {
        tracing::info_span!("mindcast.detection", episode_id = $episode_id)
    };
}

/// Create a forecast build span.
#[macro_export]
macro_rules! forecast_span {
    ($user_id:expr, $window:expr) => {
        tracing::info_span!("mindcast.forecast", user_id = $user_id, window = %$window)
    };
}

/// Create a maintenance span.
#[macro_export]
macro_rules! maintenance_span {
    ($user_count:expr) => {
        tracing::info_span!("mindcast.maintenance", user_count = $user_count)
    };
}

/// Create a scheduled refresh span.
#[macro_export]
macro_rules! refresh_span {
    ($cadence:expr) => {
        tracing::info_span!("mindcast.refresh", cadence = %$cadence)
    };
}

