use std::time::Duration;

/// Frames of the loading spinner.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Milliseconds each spinner frame stays on screen, the higher the slower.
const SPINNER_FRAME_MILLIS: u128 = 80;

/// Get the spinner frame for the time elapsed since loading started.
pub fn spinner_frame(elapsed: Duration) -> &'static str {
    let idx = (elapsed.as_millis() / SPINNER_FRAME_MILLIS) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Parse a number the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is used,
/// so `"12kg"` is `12.0`. Input without any numeric prefix yields `NaN`.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // exponent only counts if it has digits, "1e" parses as 1
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[inline]
fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Format a confidence percentage, e.g. `87%` or `87.5%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", confidence)
}

/// Filled part of the confidence bar for a track of `track_width` cells.
///
/// Width follows the confidence directly: above 100 the bar is longer than
/// the track (and gets clipped by the terminal), negative or `NaN` is empty.
pub fn confidence_bar(confidence: f64, track_width: u16) -> String {
    let filled = (confidence / 100.0 * f64::from(track_width)).round();
    let filled = if filled.is_nan() || filled <= 0.0 {
        0
    } else {
        // no terminal is wider than u16::MAX
        (filled as usize).min(u16::MAX as usize)
    };
    "█".repeat(filled)
}
