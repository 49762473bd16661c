use crate::error::ApiError;

/// Normalizes a US phone number into E.164 form (`+1XXXXXXXXXX`).
///
/// Accepts common input shapes such as "(415) 123-1234", "415.123.1234",
/// "1-415-123-1234", and "+14151231234", and rejects anything that does not
/// reduce to ten national digits with a valid area code. Applied when a
/// phone is written (signup / patch); recovery reads the stored,
/// already-normalized value and never calls this.
pub fn normalize_phone(raw: &str) -> Result<String, ApiError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return Err(ApiError::InvalidPhone),
    };

    // NANP: area code cannot start with 0 or 1.
    let area_first = national.chars().next().ok_or(ApiError::InvalidPhone)?;
    if area_first < '2' {
        return Err(ApiError::InvalidPhone);
    }

    Ok(format!("+1{national}"))
}
