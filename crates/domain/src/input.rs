//! Keystroke masks for the address form fields.
//!
//! Each mask takes the field's raw value and produces the full replacement
//! value, so re-applying a mask to its own output is stable. Formatting and
//! validity are separate passes: [`mask_ip`] groups purely by digit count,
//! and [`validate_ip`] decides afterwards whether the grouped string is a
//! real dotted-quad address.

use crate::error::ValidationError;

/// Mask a MAC field value: keep hex digits (case preserved) and re-insert a
/// `:` after every two of them.
///
/// An odd trailing digit leaves a partial final group. No length bound is
/// enforced here; [`MacAddress`](crate::mac::MacAddress) parsing is where a
/// submitted value must resolve to six octets.
#[must_use]
pub fn mask_mac(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 2);
    for (i, c) in raw.chars().filter(char::is_ascii_hexdigit).enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(':');
        }
        out.push(c);
    }
    out
}

/// Mask an IP field value: keep decimal digits and insert a `.` before every
/// third one, as long as fewer than four groups exist.
///
/// Grouping is digit-count driven, not value driven, so the result can still
/// fail [`validate_ip`] (e.g. `"999999999999"` masks to `"999.999.999.999"`).
#[must_use]
pub fn mask_ip(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 3);
    let mut groups = 1;
    for (i, c) in raw.chars().filter(char::is_ascii_digit).enumerate() {
        if i > 0 && i % 3 == 0 && groups < 4 {
            out.push('.');
            groups += 1;
        }
        out.push(c);
    }
    out
}

/// Check a masked IP value: exactly four dot-separated groups, each at most
/// three characters and numerically within `0..=255`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIpAddress`] (the fixed user-facing
/// message) when any condition fails.
pub fn validate_ip(formatted: &str) -> Result<(), ValidationError> {
    let groups: Vec<&str> = formatted.split('.').collect();
    if groups.len() != 4 {
        return Err(ValidationError::InvalidIpAddress);
    }
    for group in groups {
        if group.len() > 3 {
            return Err(ValidationError::InvalidIpAddress);
        }
        match group.parse::<u16>() {
            Ok(value) if value <= 255 => {}
            _ => return Err(ValidationError::InvalidIpAddress),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_group_mac_digits_in_pairs() {
        assert_eq!(mask_mac("a1b2c3"), "a1:b2:c3");
    }

    #[test]
    fn should_leave_partial_final_group_without_trailing_colon() {
        assert_eq!(mask_mac("a1b"), "a1:b");
    }

    #[test]
    fn should_drop_invalid_hex_chars_before_grouping() {
        assert_eq!(mask_mac("ag1b"), "a1:b");
    }

    #[test]
    fn should_keep_empty_mac_input_empty() {
        assert_eq!(mask_mac(""), "");
    }

    #[test]
    fn should_preserve_case_of_mac_digits() {
        assert_eq!(mask_mac("A4c138"), "A4:c1:38");
    }

    #[test]
    fn should_be_stable_when_reapplied_to_own_output() {
        let once = mask_mac("a4c1385b0edf");
        assert_eq!(mask_mac(&once), once);
        let ip_once = mask_ip("192168001001");
        assert_eq!(mask_ip(&ip_once), ip_once);
    }

    #[test]
    fn should_keep_grouping_mac_beyond_six_octets() {
        assert_eq!(mask_mac("a1b2c3d4e5f60708"), "a1:b2:c3:d4:e5:f6:07:08");
    }

    #[test]
    fn should_group_ip_digits_in_threes() {
        assert_eq!(mask_ip("192168001001"), "192.168.001.001");
    }

    #[test]
    fn should_stop_inserting_dots_after_four_groups() {
        assert_eq!(mask_ip("192168001001234"), "192.168.001.001234");
    }

    #[test]
    fn should_drop_non_digits_from_ip_input() {
        assert_eq!(mask_ip("192.168.0.1"), "192.168.01");
    }

    #[test]
    fn should_keep_empty_ip_input_empty() {
        assert_eq!(mask_ip(""), "");
    }

    #[test]
    fn should_accept_full_dotted_quad() {
        assert!(validate_ip("192.168.001.001").is_ok());
    }

    #[test]
    fn should_reject_groups_above_255() {
        assert_eq!(
            validate_ip("999.999.999.999"),
            Err(ValidationError::InvalidIpAddress)
        );
    }

    #[test]
    fn should_reject_fewer_than_four_groups() {
        assert_eq!(
            validate_ip("192.168"),
            Err(ValidationError::InvalidIpAddress)
        );
    }

    #[test]
    fn should_reject_groups_longer_than_three_chars() {
        assert_eq!(
            validate_ip("192.168.001.0014"),
            Err(ValidationError::InvalidIpAddress)
        );
    }

    #[test]
    fn should_reject_empty_groups() {
        assert_eq!(validate_ip("1..2.3"), Err(ValidationError::InvalidIpAddress));
    }

    #[test]
    fn should_mask_then_fail_validation_for_short_input() {
        let masked = mask_ip("192168");
        assert_eq!(masked, "192.168");
        assert!(validate_ip(&masked).is_err());
    }
}
