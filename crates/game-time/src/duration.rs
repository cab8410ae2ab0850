//! Human-readable rendering of second counts

/// Render a duration in seconds as human text
///
/// The duration is decomposed into days, hours, minutes and seconds, and the
/// largest non-zero unit is rendered. When `short` is false the next-smaller
/// non-zero unit is appended after a `:` (e.g. `"1d:1h"`). Unit suffixes are
/// single letters unless `verbose` is set, in which case they are English
/// words, singular when the figure is exactly 1 (e.g. `"1 day"`,
/// `"59 seconds"`). A zero duration renders through the seconds unit.
pub fn format_timespan(total_secs: u64, short: bool, verbose: bool) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs / 3_600) % 24;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;

    if days > 0 {
        let mut out = format!("{}{}", days, suffix(days, "day", "d", verbose));
        if hours > 0 && !short {
            out.push_str(&format!(":{}{}", hours, suffix(hours, "hour", "h", verbose)));
        }
        out
    } else if hours > 0 {
        let mut out = format!("{}{}", hours, suffix(hours, "hour", "h", verbose));
        if minutes > 0 && !short {
            out.push_str(&format!(
                ":{}{}",
                minutes,
                suffix(minutes, "minute", "m", verbose)
            ));
        }
        out
    } else if minutes > 0 {
        let mut out = format!("{}{}", minutes, suffix(minutes, "minute", "m", verbose));
        if seconds > 0 && !short {
            out.push_str(&format!(
                ":{}{}",
                seconds,
                suffix(seconds, "second", "s", verbose)
            ));
        }
        out
    } else {
        format!("{}{}", seconds, suffix(seconds, "second", "s", verbose))
    }
}

fn suffix(figure: u64, word: &str, letter: &str, verbose: bool) -> String {
    if !verbose {
        return letter.to_string();
    }
    if figure == 1 {
        format!(" {}", word)
    } else {
        format!(" {}s", word)
    }
}
