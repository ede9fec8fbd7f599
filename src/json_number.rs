//! Internal module for validating and formatting JSON numbers

/// Whether the string matches the JSON number grammar of RFC 8259, for example `-12.5e+3`
///
/// Leading `+`, leading zeros such as `01`, a trailing `.` and non-finite values such as
/// `NaN` are rejected.
pub(crate) fn is_valid_json_number(value: &str) -> bool {
    #[derive(PartialEq)]
    enum State {
        Start,
        Minus,
        IntZero,
        IntNonZero,
        DecimalPoint,
        DecimalDigit,
        ExpE,
        ExpSign,
        ExpDigit,
    }

    let mut state = State::Start;
    for byte in value.bytes() {
        state = match (state, byte) {
            (State::Start, b'-') => State::Minus,
            (State::ExpE, b'-' | b'+') => State::ExpSign,

            (State::Start | State::Minus, b'0') => State::IntZero,
            (State::Start | State::Minus | State::IntNonZero, b'0'..=b'9') => State::IntNonZero,
            (State::DecimalPoint | State::DecimalDigit, b'0'..=b'9') => State::DecimalDigit,
            (State::ExpE | State::ExpSign | State::ExpDigit, b'0'..=b'9') => State::ExpDigit,

            (State::IntZero | State::IntNonZero, b'.') => State::DecimalPoint,
            (State::IntZero | State::IntNonZero | State::DecimalDigit, b'e' | b'E') => State::ExpE,
            _ => return false,
        };
    }

    matches!(
        state,
        State::IntZero | State::IntNonZero | State::DecimalDigit | State::ExpDigit
    )
}

/// Whether the string is one of the non-finite number literals which lenient writers accept
pub(crate) fn is_non_finite_literal(value: &str) -> bool {
    matches!(value, "NaN" | "Infinity" | "-Infinity")
}

/// Formats a floating point number the way `java.lang.Double.toString` does
///
/// Values with magnitude in `[1e-3, 1e7)` (and zero) use plain decimal notation with at
/// least one fraction digit, for example `-1.0`; all other finite values use scientific
/// notation such as `1.0E7` or `1.5E-4`. Non-finite values are written as `NaN`, `Infinity`
/// and `-Infinity`.
pub(crate) fn format_java_fp(value: f64) -> String {
    format_java_fp_with(value, || value.to_string(), || format!("{value:e}"))
}

/// Same as [`format_java_fp`] but uses the shortest `f32` digits, the way
/// `java.lang.Float.toString` does
pub(crate) fn format_java_fp32(value: f32) -> String {
    format_java_fp_with(
        f64::from(value),
        || value.to_string(),
        || format!("{value:e}"),
    )
}

fn format_java_fp_with(
    value: f64,
    plain: impl FnOnce() -> String,
    scientific: impl FnOnce() -> String,
) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let mut s = plain();
        if !s.contains('.') {
            s.push_str(".0");
        }
        s
    } else {
        let s = scientific();
        // Rust always emits an exponent for `{:e}`
        let (mantissa, exponent) = s.split_once('e').unwrap_or((&s, "0"));
        if mantissa.contains('.') {
            format!("{mantissa}E{exponent}")
        } else {
            format!("{mantissa}.0E{exponent}")
        }
    }
}
