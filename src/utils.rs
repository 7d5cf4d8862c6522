/// 带符号的角度格式，例如 `+5.7°` / `-0.25°`
pub fn format_signed_degrees(value: f64, precision: usize) -> String {
    // 避免出现 "-0.0°"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:+.*}°", precision, value)
}

/// 不带符号的角度格式
pub fn format_degrees(value: f64, precision: usize) -> String {
    format!("{:.*}°", precision, value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_degrees_always_carry_sign() {
        assert_eq!(format_signed_degrees(5.7106, 1), "+5.7°");
        assert_eq!(format_signed_degrees(-5.7106, 1), "-5.7°");
        assert_eq!(format_signed_degrees(-0.0, 2), "+0.00°");
    }

    #[test]
    fn plain_degrees_drop_sign() {
        assert_eq!(format_degrees(-5.7106, 2), "5.71°");
    }
}
