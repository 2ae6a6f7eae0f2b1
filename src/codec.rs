//! Wire codec for the bracketed text records exchanged with the control center.
//!
//! Messages are ASCII strings of the form `[a,b,c]`: literal brackets,
//! comma-separated decimal numbers, no whitespace. The format is not
//! versioned; field count and order are the compatibility contract with the
//! paired control-center federate.

/// Fixed three-field record published once to open the status channel before
/// meaningful data exists. Peers must ignore its content at time step 0.
pub const BOOTSTRAP_SENTINEL: &str = "[-1,-1,-1]";

/// Encodes an ordered field sequence as `[a,b,c]`.
///
/// Each field uses the natural decimal text of `f64` (`6.0` encodes as `"6"`,
/// `179.6` as `"179.6"`); no rounding or padding is applied.
///
/// # Examples
///
/// ```
/// use windfarm_federate::codec::encode_fields;
///
/// assert_eq!(encode_fields(&[0.0, 8.0, 240.0]), "[0,8,240]");
/// ```
pub fn encode_fields(fields: &[f64]) -> String {
    let mut out = String::from("[");
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&field.to_string());
    }
    out.push(']');
    out
}

/// Encodes one outbound status record.
///
/// Schema: `[time_step, wind_speed, wind_direction, power_0 .. power_{N-1}]`,
/// with the turbine powers appended in index order.
pub fn encode_status(
    time_step: u64,
    wind_speed: f64,
    wind_direction: f64,
    turbine_powers: &[f64],
) -> String {
    let mut out = format!("[{time_step},{wind_speed},{wind_direction}");
    for power in turbine_powers {
        out.push(',');
        out.push_str(&power.to_string());
    }
    out.push(']');
    out
}

/// Decodes a bracketed record into its numeric fields in **reverse wire
/// order**: the last field on the wire is first in the returned vector.
///
/// The paired control center sends `[time, wind_speed, wind_direction]`, so
/// consumers read `fields[0]` as direction and `fields[1]` as speed. The
/// reversal is part of the decode contract and callers depend on it.
///
/// A token that fails to parse decodes to `0.0`. This default-on-failure
/// policy mirrors the tolerance the control center relies on (the bootstrap
/// sentinel and trailing junk must not abort the exchange) and is pinned by
/// regression tests rather than left implicit.
///
/// # Examples
///
/// ```
/// use windfarm_federate::codec::decode_fields_reversed;
///
/// assert_eq!(decode_fields_reversed("[1,2,3]"), vec![3.0, 2.0, 1.0]);
/// ```
pub fn decode_fields_reversed(raw: &str) -> Vec<f64> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let mut fields: Vec<f64> = inner
        .split(',')
        .map(|token| token.trim().parse().unwrap_or(0.0))
        .collect();
    fields.reverse();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_record_has_exact_field_order_and_text() {
        let encoded = encode_status(3, 6.0, 290.0, &[316.0, 266.0, 179.6, 129.6]);
        assert_eq!(encoded, "[3,6,290,316,266,179.6,129.6]");
    }

    #[test]
    fn sentinel_matches_encoded_minus_ones() {
        assert_eq!(encode_fields(&[-1.0, -1.0, -1.0]), BOOTSTRAP_SENTINEL);
    }

    #[test]
    fn decode_returns_fields_in_reverse_wire_order() {
        assert_eq!(decode_fields_reversed("[1,2,3]"), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn decode_handles_the_bootstrap_sentinel() {
        assert_eq!(
            decode_fields_reversed(BOOTSTRAP_SENTINEL),
            vec![-1.0, -1.0, -1.0]
        );
    }

    #[test]
    fn non_numeric_token_decodes_to_zero() {
        // Pins the default-on-failure policy: the bad field becomes 0.0
        // instead of aborting the decode.
        assert_eq!(decode_fields_reversed("[1,abc,3]"), vec![3.0, 0.0, 1.0]);
    }

    #[test]
    fn unbracketed_input_decodes_the_same_fields() {
        // The parser scans for delimiters only; brackets are incidental.
        assert_eq!(decode_fields_reversed("4.5,250"), vec![250.0, 4.5]);
    }

    #[test]
    fn empty_record_yields_a_single_zero_field() {
        assert_eq!(decode_fields_reversed("[]"), vec![0.0]);
    }

    #[test]
    fn control_record_consumed_as_direction_then_speed() {
        let fields = decode_fields_reversed("[7,8.5,240]");
        assert_eq!(fields[0], 240.0); // direction is the last wire field
        assert_eq!(fields[1], 8.5); // speed precedes it
    }
}
