//! Pure check-digit computation for the credential schemes.
//!
//! Every function takes the exact payload covered by the check character and
//! returns the character the credential is expected to carry. Comparing the
//! result with the character actually present is the caller's job, so a
//! mismatch is never reported from here. What is reported is input that the
//! scheme cannot weigh at all ([`CheckDigitError`]).
//!
//! All functions are zero-allocation and operate on the byte slice of the
//! input.
//!
//! # References
//!
//! - GB 11643: resident identity number, also used by residence permits and
//!   the 18-character foreign permanent residence ID.
//! - GB 32100: unified social credit code.
//! - GB 11714: organization code (the 9-character segment of a credit code).
//! - ICAO Doc 9303 Part 3 §4.9: machine readable zone check digits.

use crate::error::CheckDigitError;

/// Weights applied to the first 17 digits of a resident identity number.
const RESIDENT_ID_WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Maps `sum mod 11` to the resident identity check character.
const RESIDENT_ID_CHECK_CHARS: [u8; 11] = *b"10X98765432";

/// Symbols of the credit code, in value order. `I`, `O`, `S`, `V` and `Z`
/// are not part of the alphabet.
const CREDIT_CODE_ALPHABET: &[u8; 31] = b"0123456789ABCDEFGHJKLMNPQRTUWXY";

const CREDIT_CODE_WEIGHTS: [u32; 17] = [
    1, 3, 9, 27, 19, 26, 16, 17, 20, 29, 25, 13, 8, 24, 10, 30, 28,
];

const ORGANIZATION_CODE_WEIGHTS: [u32; 8] = [3, 7, 9, 10, 5, 8, 4, 2];

const MRZ_WEIGHTS: [u32; 3] = [7, 3, 1];

/// Returns `Ok(())` if `payload` has exactly `expected` bytes.
fn require_len(payload: &str, expected: usize) -> Result<(), CheckDigitError> {
    if payload.len() == expected {
        Ok(())
    } else {
        Err(CheckDigitError::WrongLength {
            expected,
            actual: payload.len(),
        })
    }
}

/// Value of an ASCII digit or upper-case letter on the 0–35 scale, or `None`.
fn base36_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some(u32::from(byte - b'0')),
        b'A'..=b'Z' => Some(u32::from(byte - b'A') + 10),
        _ => None,
    }
}

fn invalid_char(byte: u8, position: usize) -> CheckDigitError {
    CheckDigitError::InvalidCharacter {
        ch: char::from(byte),
        position,
    }
}

/// Computes the check character of an 18-character resident identity number.
///
/// `body` is the first 17 characters, all ASCII digits. The weighted sum is
/// reduced modulo 11 and mapped through `1 0 X 9 8 7 6 5 4 3 2`.
///
/// # Errors
///
/// [`CheckDigitError::WrongLength`] unless `body` is 17 bytes long;
/// [`CheckDigitError::InvalidCharacter`] on the first non-digit.
///
/// # Examples
///
/// ```
/// use credkit_core::check_digits::resident_id_check_digit;
///
/// assert_eq!(resident_id_check_digit("33010519781027002"), Ok('5'));
/// ```
pub fn resident_id_check_digit(body: &str) -> Result<char, CheckDigitError> {
    require_len(body, RESIDENT_ID_WEIGHTS.len())?;
    let mut sum: u32 = 0;
    for (i, &byte) in body.as_bytes().iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(invalid_char(byte, i));
        }
        sum += u32::from(byte - b'0') * RESIDENT_ID_WEIGHTS[i];
    }
    Ok(char::from(RESIDENT_ID_CHECK_CHARS[(sum % 11) as usize]))
}

/// Computes the final check character of a unified social credit code.
///
/// `body` is the first 17 characters. Each is looked up in the 31-symbol
/// credit code alphabet, weighted, and the check value is
/// `(31 - sum mod 31) mod 31` mapped back through the same alphabet.
///
/// # Errors
///
/// [`CheckDigitError::WrongLength`] unless `body` is 17 bytes long;
/// [`CheckDigitError::InvalidCharacter`] for a symbol outside the alphabet
/// (for example `I` or `O` inside the organization code segment).
///
/// # Examples
///
/// ```
/// use credkit_core::check_digits::credit_code_check_digit;
///
/// assert_eq!(credit_code_check_digit("91330106MA27Y4U47"), Ok('R'));
/// ```
pub fn credit_code_check_digit(body: &str) -> Result<char, CheckDigitError> {
    require_len(body, CREDIT_CODE_WEIGHTS.len())?;
    let mut sum: u32 = 0;
    for (i, &byte) in body.as_bytes().iter().enumerate() {
        let value = CREDIT_CODE_ALPHABET
            .iter()
            .position(|&symbol| symbol == byte)
            .ok_or_else(|| invalid_char(byte, i))?;
        sum += value as u32 * CREDIT_CODE_WEIGHTS[i];
    }
    let check = (31 - sum % 31) % 31;
    Ok(char::from(CREDIT_CODE_ALPHABET[check as usize]))
}

/// Computes the check character of an 8-character organization code.
///
/// Digits weigh 0–9 and letters 10–35. With `c = 11 - sum mod 11`, the check
/// character is `X` for 10, `0` for 11 and the digit `c` otherwise.
///
/// # Errors
///
/// [`CheckDigitError::WrongLength`] unless `body` is 8 bytes long;
/// [`CheckDigitError::InvalidCharacter`] on the first byte that is neither an
/// ASCII digit nor an upper-case letter.
///
/// # Examples
///
/// ```
/// use credkit_core::check_digits::organization_code_check_digit;
///
/// assert_eq!(organization_code_check_digit("MA27Y4U4"), Ok('7'));
/// ```
pub fn organization_code_check_digit(body: &str) -> Result<char, CheckDigitError> {
    require_len(body, ORGANIZATION_CODE_WEIGHTS.len())?;
    let mut sum: u32 = 0;
    for (i, &byte) in body.as_bytes().iter().enumerate() {
        let value = base36_value(byte).ok_or_else(|| invalid_char(byte, i))?;
        sum += value * ORGANIZATION_CODE_WEIGHTS[i];
    }
    Ok(match 11 - sum % 11 {
        10 => 'X',
        11 => '0',
        c => char::from(b'0' + c as u8),
    })
}

/// Computes an ICAO 9303 check digit over one MRZ field.
///
/// Digits weigh 0–9, letters 10–35 and the filler `<` weighs 0. Weights cycle
/// through `7, 3, 1` from the first character; the result is `sum mod 10`.
/// The field may have any length, so the same function covers the passport
/// number, dates, personal number and the composite check.
///
/// # Errors
///
/// [`CheckDigitError::InvalidCharacter`] for any byte other than a digit, an
/// upper-case letter or `<`.
///
/// # Examples
///
/// ```
/// use credkit_core::check_digits::mrz_check_digit;
///
/// assert_eq!(mrz_check_digit("G48947646"), Ok('4'));
/// assert_eq!(mrz_check_digit("<<<<<<<<<<<<<<"), Ok('0'));
/// ```
pub fn mrz_check_digit(field: &str) -> Result<char, CheckDigitError> {
    let mut sum: u32 = 0;
    for (i, &byte) in field.as_bytes().iter().enumerate() {
        let value = match byte {
            b'<' => 0,
            _ => base36_value(byte).ok_or_else(|| invalid_char(byte, i))?,
        };
        sum += value * MRZ_WEIGHTS[i % MRZ_WEIGHTS.len()];
    }
    Ok(char::from(b'0' + (sum % 10) as u8))
}
