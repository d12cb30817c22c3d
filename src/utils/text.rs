//! Small text helpers shared by several commands.

use std::time::Duration;

/// Longest nickname the platform accepts.
pub const MAX_NICKNAME: usize = 32;

pub const FALLBACK_NICKNAME: &str = "simp name";

/// One `charinfo` line: escaped code point, the character and a reference link.
pub fn char_line(c: char) -> String {
    let digit = format!("{:x}", c as u32);
    format!(
        "`\\U{digit:0>8}`: {c} - <http://www.fileformat.info/info/unicode/char/{digit}>"
    )
}

/// Whether a name contains anything but ASCII letters, digits and whitespace.
pub fn is_cancerous(text: &str) -> bool {
    text.split_whitespace()
        .flat_map(str::chars)
        .any(|c| !c.is_ascii_alphanumeric())
}

/// Rebuilds a display name from its plain ASCII parts, title cased.
/// Falls back to [`FALLBACK_NICKNAME`] if almost nothing survives.
pub fn nick_maker(old: &str) -> String {
    let kept: String = old
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '.' || *c == '\n')
        .collect();

    let nick = kept
        .split_whitespace()
        .map(|word| {
            let lower = word.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if nick.replace(' ', "").len() <= 1 || nick.len() > MAX_NICKNAME {
        FALLBACK_NICKNAME.to_string()
    } else {
        nick
    }
}

pub fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// "2 days, 3 hours and 1 second". Zero parts are skipped.
pub fn human_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let units = [
        (total / 86_400, "day"),
        ((total % 86_400) / 3_600, "hour"),
        ((total % 3_600) / 60, "minute"),
        (total % 60, "second"),
    ];

    let parts: Vec<String> = units
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| plural(count, unit))
        .collect();

    match parts.as_slice() {
        [] => plural(0, "second"),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Discord timestamp markup rendered client-side in the reader's locale.
pub fn discord_timestamp(unix: i64, style: char) -> String {
    format!("<t:{unix}:{style}>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_char_line() {
        assert_eq!(
            char_line('a'),
            "`\\U00000061`: a - <http://www.fileformat.info/info/unicode/char/61>"
        );
        assert!(char_line('🦀').starts_with("`\\U0001f980`"));
    }

    #[test_case("Metro", false ; "plain")]
    #[test_case("cool guy 2", false ; "spaces and digits")]
    #[test_case("x_x", true ; "underscore")]
    #[test_case("ᴍᴇᴛʀᴏ", true ; "small caps")]
    fn test_is_cancerous(name: &str, expected: bool) {
        assert_eq!(is_cancerous(name), expected);
    }

    #[test_case("!!cOoL  gUy!!", "Cool Guy" ; "symbols and case")]
    #[test_case("ᴍᴇᴛʀᴏ", "simp name" ; "nothing left")]
    #[test_case("a", "simp name" ; "single letter")]
    #[test_case("dr. who", "Dr. Who" ; "dots survive")]
    fn test_nick_maker(old: &str, expected: &str) {
        assert_eq!(nick_maker(old), expected);
    }

    #[test]
    fn test_nick_maker_too_long() {
        let long = "word ".repeat(10);
        assert_eq!(nick_maker(&long), FALLBACK_NICKNAME);
    }

    #[test_case(0, "0 seconds")]
    #[test_case(1, "1 second")]
    #[test_case(61, "1 minute and 1 second")]
    #[test_case(90_061, "1 day, 1 hour, 1 minute and 1 second")]
    #[test_case(7_200, "2 hours")]
    fn test_human_duration(secs: u64, expected: &str) {
        assert_eq!(human_duration(Duration::from_secs(secs)), expected);
    }
}
