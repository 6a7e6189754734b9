// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typewriter-style text reveal and a blinking cursor.

use std::num::NonZeroU32;

/// Prefix of `text` visible after `elapsed_frames`, one character every
/// `frames_per_char` frames. Negative elapsed frames reveal nothing.
pub fn reveal(text: &str, elapsed_frames: i64, frames_per_char: NonZeroU32) -> &str {
    if elapsed_frames <= 0 {
        return "";
    }
    let count = elapsed_frames / i64::from(frames_per_char.get());
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    match text.char_indices().nth(count) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Whether the cursor is drawn at `frame`: on for the first half of each
/// cycle, off for the second.
pub fn cursor_visible(frame: i64, cycle_length: NonZeroU32) -> bool {
    let cycle = i64::from(cycle_length.get());
    2 * frame.rem_euclid(cycle) < cycle
}

/// Frames needed to reveal all of `text`
pub fn reveal_duration(text: &str, frames_per_char: NonZeroU32) -> u64 {
    text.chars().count() as u64 * u64::from(frames_per_char.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_reveal_floors() {
        assert_eq!(reveal("HELLO", 5, nz(2)), "HE");
        assert_eq!(reveal("HELLO", 1, nz(2)), "");
        assert_eq!(reveal("HELLO", 2, nz(2)), "H");
    }

    #[test]
    fn test_reveal_bounds() {
        assert_eq!(reveal("HELLO", -3, nz(2)), "");
        assert_eq!(reveal("HELLO", 0, nz(1)), "");
        assert_eq!(reveal("HELLO", 10, nz(2)), "HELLO");
        assert_eq!(reveal("HELLO", i64::MAX, nz(1)), "HELLO");
        assert_eq!(reveal("", 10, nz(1)), "");
    }

    #[test]
    fn test_reveal_multibyte() {
        assert_eq!(reveal("héllo wörld", 2, nz(1)), "hé");
        assert_eq!(reveal("日本語", 2, nz(1)), "日本");
    }

    #[test]
    fn test_cursor_square_wave() {
        let cycle = nz(30);
        assert!(cursor_visible(0, cycle));
        assert!(cursor_visible(14, cycle));
        assert!(!cursor_visible(15, cycle));
        assert!(!cursor_visible(29, cycle));
        assert!(cursor_visible(30, cycle));
        // Negative frames continue the same wave
        assert!(!cursor_visible(-1, cycle));
        assert!(cursor_visible(-16, cycle));
    }

    #[test]
    fn test_cursor_odd_cycle() {
        let cycle = nz(5);
        let pattern: Vec<bool> = (0..5).map(|f| cursor_visible(f, cycle)).collect();
        assert_eq!(pattern, [true, true, true, false, false]);
    }

    #[test]
    fn test_reveal_duration() {
        assert_eq!(reveal_duration("HELLO", nz(2)), 10);
        assert_eq!(reveal(
            "HELLO",
            reveal_duration("HELLO", nz(2)) as i64,
            nz(2)
        ), "HELLO");
    }
}
