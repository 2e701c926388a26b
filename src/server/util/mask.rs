//! Display masking for sensitive order fields.
//!
//! Masked values are derived on the fly for presentation and are never persisted.

const MASK: &str = "****";

const PHONE_MIN_MASKED_LEN: usize = 11;
const PHONE_VISIBLE_PREFIX: usize = 3;
const PHONE_VISIBLE_SUFFIX: usize = 4;

const COUPON_MIN_MASKED_LEN: usize = 9;
const COUPON_VISIBLE_PREFIX: usize = 5;

/// Masks a phone number as its first 3 characters, `****`, then its last 4 characters.
///
/// Phone numbers shorter than 11 characters are returned unchanged.
///
/// ```ignore
/// assert_eq!(mask_phone("13812345678"), "138****5678");
/// assert_eq!(mask_phone("12345"), "12345");
/// ```
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < PHONE_MIN_MASKED_LEN {
        return phone.to_string();
    }

    let prefix: String = chars[..PHONE_VISIBLE_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - PHONE_VISIBLE_SUFFIX..].iter().collect();

    format!("{}{}{}", prefix, MASK, suffix)
}

/// Masks a coupon code as its first 5 characters followed by `****`.
///
/// Codes shorter than 9 characters are returned unchanged.
pub fn mask_coupon_code(coupon_code: &str) -> String {
    if coupon_code.chars().count() < COUPON_MIN_MASKED_LEN {
        return coupon_code.to_string();
    }

    let prefix: String = coupon_code.chars().take(COUPON_VISIBLE_PREFIX).collect();

    format!("{}{}", prefix, MASK)
}
