/// Utilities for rendering schedule metadata as text
///
/// A schedule is either a refresh interval in seconds or a 5-field cron
/// expression; the cron expression wins when both are present.

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Schedule cell text: cron description when a cron expression is set,
/// otherwise "Runs every <duration>" from the interval in seconds.
pub fn describe_run(refresh_interval_secs: u64, cron_interval: Option<&str>) -> String {
    match cron_interval {
        Some(expr) => describe_cron(expr),
        None => format!(
            "Runs every {}",
            humanize_duration_ms(refresh_interval_secs * SECOND_MS)
        ),
    }
}

/// Long-form humanization of a millisecond duration: the largest fitting
/// unit, rounded. `90_000` -> "2 minutes", `3_600_000` -> "1 hour".
pub fn humanize_duration_ms(ms: u64) -> String {
    let (value, unit) = if ms >= DAY_MS {
        (round_div(ms, DAY_MS), "day")
    } else if ms >= HOUR_MS {
        (round_div(ms, HOUR_MS), "hour")
    } else if ms >= MINUTE_MS {
        (round_div(ms, MINUTE_MS), "minute")
    } else if ms >= SECOND_MS {
        (round_div(ms, SECOND_MS), "second")
    } else {
        return format!("{ms} ms");
    };

    if value == 1 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

fn round_div(value: u64, unit: u64) -> u64 {
    (value + unit / 2) / unit
}

/// Human text for the common 5-field cron forms. Unrecognized expressions
/// come back verbatim, so the schedule cell always renders something.
pub fn describe_cron(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let [minute, hour, dom, month, dow] = match fields[..] {
        [a, b, c, d, e] => [a, b, c, d, e],
        _ => return expr.to_string(),
    };

    if month != "*" {
        return expr.to_string();
    }

    match (minute, hour, dom, dow) {
        ("*", "*", "*", "*") => "Every minute".to_string(),
        (m, "*", "*", "*") if m.starts_with("*/") => match m[2..].parse::<u32>() {
            Ok(1) => "Every minute".to_string(),
            Ok(n) if n > 1 => format!("Every {n} minutes"),
            _ => expr.to_string(),
        },
        ("0", "*", "*", "*") => "Every hour, on the hour".to_string(),
        (m, "*", "*", "*") => match m.parse::<u32>() {
            Ok(m) if m < 60 => format!("At {m} minutes past the hour"),
            _ => expr.to_string(),
        },
        (m, h, "*", "*") => match clock(m, h) {
            Some(at) => format!("At {at}"),
            None => expr.to_string(),
        },
        (m, h, "*", d) => match (clock(m, h), day_of_week(d)) {
            (Some(at), Some(day)) => format!("At {at}, only on {day}"),
            _ => expr.to_string(),
        },
        (m, h, d, "*") => match (clock(m, h), d.parse::<u32>()) {
            (Some(at), Ok(day)) if (1..=31).contains(&day) => {
                format!("At {at}, on day {day} of the month")
            }
            _ => expr.to_string(),
        },
        _ => expr.to_string(),
    }
}

fn clock(minute: &str, hour: &str) -> Option<String> {
    let m: u32 = minute.parse().ok().filter(|m| *m < 60)?;
    let h: u32 = hour.parse().ok().filter(|h| *h < 24)?;
    Some(format!("{h:02}:{m:02}"))
}

fn day_of_week(field: &str) -> Option<&'static str> {
    // Both 0 and 7 mean Sunday, per crontab convention.
    let name = match field.to_ascii_lowercase().as_str() {
        "0" | "7" | "sun" => "Sunday",
        "1" | "mon" => "Monday",
        "2" | "tue" => "Tuesday",
        "3" | "wed" => "Wednesday",
        "4" | "thu" => "Thursday",
        "5" | "fri" => "Friday",
        "6" | "sat" => "Saturday",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration_ms(500), "500 ms");
        assert_eq!(humanize_duration_ms(1_000), "1 second");
        assert_eq!(humanize_duration_ms(30_000), "30 seconds");
        assert_eq!(humanize_duration_ms(60_000), "1 minute");
        // Rounds to the nearest unit, like the display expects.
        assert_eq!(humanize_duration_ms(90_000), "2 minutes");
        assert_eq!(humanize_duration_ms(3_600_000), "1 hour");
        assert_eq!(humanize_duration_ms(86_400_000), "1 day");
        assert_eq!(humanize_duration_ms(7 * 86_400_000), "7 days");
    }

    #[test]
    fn test_describe_cron_common_forms() {
        assert_eq!(describe_cron("* * * * *"), "Every minute");
        assert_eq!(describe_cron("*/15 * * * *"), "Every 15 minutes");
        assert_eq!(describe_cron("*/1 * * * *"), "Every minute");
        assert_eq!(describe_cron("0 * * * *"), "Every hour, on the hour");
        assert_eq!(describe_cron("30 * * * *"), "At 30 minutes past the hour");
        assert_eq!(describe_cron("30 5 * * *"), "At 05:30");
        assert_eq!(describe_cron("0 9 * * 1"), "At 09:00, only on Monday");
        assert_eq!(describe_cron("0 9 * * mon"), "At 09:00, only on Monday");
        assert_eq!(describe_cron("15 0 1 * *"), "At 00:15, on day 1 of the month");
    }

    #[test]
    fn test_describe_cron_falls_back_to_raw() {
        assert_eq!(describe_cron("0 9 * 6 *"), "0 9 * 6 *");
        assert_eq!(describe_cron("not a cron"), "not a cron");
        assert_eq!(describe_cron("61 * * * *"), "61 * * * *");
        assert_eq!(describe_cron("0 9 * * 1-5"), "0 9 * * 1-5");
    }

    #[test]
    fn test_describe_run() {
        assert_eq!(describe_run(300, None), "Runs every 5 minutes");
        assert_eq!(describe_run(86_400, None), "Runs every 1 day");
        // Cron wins over the interval when both are present.
        assert_eq!(describe_run(300, Some("30 5 * * *")), "At 05:30");
    }
}
