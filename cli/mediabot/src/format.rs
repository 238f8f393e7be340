//! Text helpers for terminal output

use std::time::Duration;

const KB: i64 = 1024;
const MB: i64 = KB * 1024;
const GB: i64 = MB * 1024;
const TB: i64 = GB * 1024;

/// Human readable byte size with two decimals, e.g. "1.50 GB"
pub fn format_bytes(bytes: i64) -> String {
    let scaled = |unit: i64| bytes as f64 / unit as f64;
    match bytes {
        b if b >= TB => format!("{:.2} TB", scaled(TB)),
        b if b >= GB => format!("{:.2} GB", scaled(GB)),
        b if b >= MB => format!("{:.2} MB", scaled(MB)),
        b if b >= KB => format!("{:.2} KB", scaled(KB)),
        b => format!("{} B", b),
    }
}

/// Compact duration, leading zero units omitted: "1d 2h 3m 4s", "5m 0s"
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = total / 3_600 % 24;
    let minutes = total / 60 % 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub fn media_type_icon(media_type: &str) -> &'static str {
    match media_type.to_lowercase().as_str() {
        "movie" | "movies" => "🎬",
        "series" | "episode" | "tvshows" => "📺",
        "music" | "audio" | "audiobook" | "book" => "🎧",
        "musicalbum" => "💿",
        "folder" => "📁",
        "photo" | "image" => "🖼️",
        "podcast" => "🎙️",
        "boxsets" => "📦",
        _ => "🎭",
    }
}

/// Local date and time of a millisecond timestamp
pub fn format_timestamp(millis: i64) -> Option<String> {
    let utc = chrono::DateTime::from_timestamp_millis(millis)?;
    Some(
        utc.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    )
}
