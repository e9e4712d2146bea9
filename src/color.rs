/// Hex color validation and blending
///
/// The collective color for a day is the per-channel arithmetic mean of
/// every submitted color, rounded half-up. Blending is pure and
/// order-independent.

/// Collective color when a day has no selections
pub const DEFAULT_COLLECTIVE_COLOR: &str = "#000000";

/// Validate hex color format: exactly `#RRGGBB`, case-insensitive
pub fn is_valid_hex_color(color: &str) -> bool {
    let bytes = color.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(|b| b.is_ascii_hexdigit())
}

/// Validate and normalize a hex color to lowercase `#rrggbb`
pub fn normalize_hex_color(color: &str) -> Option<String> {
    if is_valid_hex_color(color) {
        Some(color.to_ascii_lowercase())
    } else {
        None
    }
}

/// Blend hex colors into a single collective color
///
/// Zero inputs yield the default color; one input is returned unchanged.
/// Callers are expected to have validated inputs with `is_valid_hex_color`.
pub fn blend_colors(colors: &[String]) -> String {
    if colors.is_empty() {
        return DEFAULT_COLLECTIVE_COLOR.to_string();
    }

    if colors.len() == 1 {
        return colors[0].clone();
    }

    let (mut total_r, mut total_g, mut total_b) = (0u32, 0u32, 0u32);
    for color in colors {
        let (r, g, b) = rgb_channels(color);
        total_r += r;
        total_g += g;
        total_b += b;
    }

    let count = colors.len() as u32;
    format!(
        "#{:02x}{:02x}{:02x}",
        mean_round_half_up(total_r, count),
        mean_round_half_up(total_g, count),
        mean_round_half_up(total_b, count)
    )
}

/// Parse the three channels of a `#RRGGBB` string.
/// Malformed input is a caller contract violation; channels that fail to
/// parse contribute zero rather than panicking.
fn rgb_channels(color: &str) -> (u32, u32, u32) {
    let hex = color.strip_prefix('#').unwrap_or(color);
    let channel = |range: std::ops::Range<usize>| -> u32 {
        hex.get(range)
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

/// Integer mean with round-half-up, clamped to a channel value
fn mean_round_half_up(total: u32, count: u32) -> u8 {
    ((2 * total + count) / (2 * count)).min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blend_of_empty_is_default() {
        assert_eq!(blend_colors(&[]), "#000000");
    }

    #[test]
    fn test_blend_of_one_is_unchanged() {
        assert_eq!(blend_colors(&colors(&["#112233"])), "#112233");
        // Single input passes through without re-encoding
        assert_eq!(blend_colors(&colors(&["#AABBCC"])), "#AABBCC");
    }

    #[test]
    fn test_blend_black_and_white() {
        // Mean of 0 and 255 is 127.5, which rounds up to 128 = 0x80
        assert_eq!(blend_colors(&colors(&["#000000", "#ffffff"])), "#808080");
    }

    #[test]
    fn test_blend_red_and_blue() {
        assert_eq!(blend_colors(&colors(&["#ff0000", "#0000ff"])), "#800080");
    }

    #[test]
    fn test_blend_rounds_half_up() {
        // Blue channel mean is 0.5, rounds to 1
        assert_eq!(blend_colors(&colors(&["#000000", "#000001"])), "#000001");
    }

    #[test]
    fn test_blend_is_order_independent() {
        let forward = colors(&["#12ab34", "#cd56ef", "#789078"]);
        let reversed: Vec<String> = forward.iter().rev().cloned().collect();
        let rotated = colors(&["#789078", "#12ab34", "#cd56ef"]);

        let expected = blend_colors(&forward);
        assert_eq!(blend_colors(&reversed), expected);
        assert_eq!(blend_colors(&rotated), expected);
    }

    #[test]
    fn test_blend_of_repeated_color_is_that_color() {
        let repeated = colors(&["#3c7f2a"; 5]);
        assert_eq!(blend_colors(&repeated), "#3c7f2a");
    }

    #[test]
    fn test_blend_is_deterministic() {
        let inputs = colors(&["#010203", "#fffefd", "#808080"]);
        assert_eq!(blend_colors(&inputs), blend_colors(&inputs));
    }

    #[test]
    fn test_is_valid_hex_color() {
        assert!(is_valid_hex_color("#112233"));
        assert!(is_valid_hex_color("#AABBCC"));
        assert!(is_valid_hex_color("#aAbBcC"));
        assert!(is_valid_hex_color("#000000"));

        assert!(!is_valid_hex_color("#fff"));
        assert!(!is_valid_hex_color("112233"));
        assert!(!is_valid_hex_color("#gggggg"));
        assert!(!is_valid_hex_color("#1122334"));
        assert!(!is_valid_hex_color(""));
        assert!(!is_valid_hex_color("#11223"));
    }

    #[test]
    fn test_normalize_hex_color() {
        assert_eq!(normalize_hex_color("#AABBCC"), Some("#aabbcc".to_string()));
        assert_eq!(normalize_hex_color("#aabbcc"), Some("#aabbcc".to_string()));
        assert_eq!(normalize_hex_color("aabbcc"), None);
        assert_eq!(normalize_hex_color("#xyzxyz"), None);
    }
}
