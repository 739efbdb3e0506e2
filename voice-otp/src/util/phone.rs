//! Phone number redaction for logs.

/// Number of trailing digits left visible.
const VISIBLE_DIGITS: usize = 4;

/// Mask a phone number for logging.
///
/// Every digit followed by at least four more consecutive digits is
/// replaced with `*`, so `+14155551234` becomes `+*******1234`. Separators
/// break a digit run, which means `+1 415-555-1234` is left mostly intact
/// apart from runs longer than four digits.
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let followed_by_digits = chars.len() > i + VISIBLE_DIGITS
                && chars[i + 1..=i + VISIBLE_DIGITS]
                    .iter()
                    .all(|d| d.is_ascii_digit());

            if c.is_ascii_digit() && followed_by_digits {
                '*'
            } else {
                c
            }
        })
        .collect()
}
