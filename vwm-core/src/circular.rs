//! Circular arithmetic on the 360° response scale.

/// Wraps any angle into `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Direction of the vector `(dx, dy)` in degrees, `[0, 360)`.
pub fn direction_deg(dx: f64, dy: f64) -> f64 {
    normalize_deg(dy.atan2(dx).to_degrees())
}

/// Shortest signed rotation from `b` to `a`, in `(-180, 180]`.
///
/// A difference of exactly half a turn is reported as `+180`.
pub fn signed_diff_360(a: f64, b: f64) -> f64 {
    let d = (a - b + 540.0).rem_euclid(360.0) - 180.0;
    if d <= -180.0 { 180.0 } else { d }
}

/// Hue of a CSS `hsl(...)` / `hsla(...)` colour string, wrapped to `[0, 360)`.
///
/// The string must open with `hsl(` or `hsla(`. Only the leading unsigned
/// numeric field is read; anything else (leading whitespace, named colours,
/// `rgb(...)`, empty input) yields `None`.
pub fn hue_from_hsl(css: Option<&str>) -> Option<f64> {
    let s = css?;
    let lower = s.get(..5).map(str::to_ascii_lowercase).unwrap_or_default();
    let rest = if lower.starts_with("hsla(") {
        &s[5..]
    } else if lower.starts_with("hsl(") {
        &s[4..]
    } else {
        return None;
    };

    let rest = rest.trim_start();
    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return None;
    }
    let mut end = int_len;
    let tail = &rest.as_bytes()[int_len..];
    if tail.first() == Some(&b'.') {
        let frac_len = tail[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }

    if !rest[end..].trim_start().starts_with(',') {
        return None;
    }
    let value: f64 = rest[..end].parse().ok()?;
    Some(normalize_deg(value))
}

/// CSS colour for a fully saturated response hue.
pub fn hsl_response_color(hue_deg: f64) -> String {
    format!("hsl({}, 80%, 50%)", hue_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hue_parses_hsl_and_hsla() {
        assert_eq!(hue_from_hsl(Some("hsl(200, 80%, 50%)")), Some(200.0));
        assert_eq!(hue_from_hsl(Some("HSLA( 12.5 ,80%,50%,0.4)")), Some(12.5));
        assert_eq!(hue_from_hsl(Some("hsl(420, 80%, 50%)")), Some(60.0));
        assert_eq!(hue_from_hsl(Some("hsl(360, 80%, 50%)")), Some(0.0));
    }

    #[test]
    fn hue_rejects_other_strings() {
        assert_eq!(hue_from_hsl(None), None);
        assert_eq!(hue_from_hsl(Some("")), None);
        assert_eq!(hue_from_hsl(Some("rgb(1,2,3)")), None);
        assert_eq!(hue_from_hsl(Some("transparent")), None);
        assert_eq!(hue_from_hsl(Some("hsl(-20, 80%, 50%)")), None);
        assert_eq!(hue_from_hsl(Some("hsl(20 80% 50%)")), None);
        assert_eq!(hue_from_hsl(Some(" hsl(200, 80%, 50%)")), None);
    }

    #[test]
    fn response_color_round_trips_through_parser() {
        let css = hsl_response_color(123.25);
        assert_eq!(css, "hsl(123.25, 80%, 50%)");
        assert_eq!(hue_from_hsl(Some(&css)), Some(123.25));
    }

    #[test]
    fn signed_diff_examples() {
        assert_eq!(signed_diff_360(10.0, 350.0), 20.0);
        assert_eq!(signed_diff_360(350.0, 10.0), -20.0);
        assert_eq!(signed_diff_360(90.0, 90.0), 0.0);
        assert_eq!(signed_diff_360(180.0, 0.0), 180.0);
        assert_eq!(signed_diff_360(0.0, 180.0), 180.0);
    }

    #[test]
    fn direction_covers_all_quadrants() {
        assert_eq!(direction_deg(1.0, 0.0), 0.0);
        assert!((direction_deg(0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((direction_deg(-1.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((direction_deg(0.0, -1.0) - 270.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn signed_diff_stays_in_half_open_range(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = signed_diff_360(a, b);
            prop_assert!(d > -180.0 && d <= 180.0);
        }

        #[test]
        fn signed_diff_is_antisymmetric_off_the_boundary(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = signed_diff_360(a, b);
            prop_assume!((d.abs() - 180.0).abs() > 1e-6);
            prop_assert!((d + signed_diff_360(b, a)).abs() < 1e-9);
        }

        #[test]
        fn normalize_lands_in_range(deg in -1.0e6f64..1.0e6) {
            let n = normalize_deg(deg);
            prop_assert!((0.0..360.0).contains(&n));
        }
    }
}
