//! Estonian national identification code (isikukood) checksum.

const CODE_LEN: usize = 11;
const FIRST_PASS_WEIGHTS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
const SECOND_PASS_WEIGHTS: [u32; 10] = [3, 4, 5, 6, 7, 8, 9, 1, 2, 3];

/// Checks an 11-digit personal code against its trailing check digit.
///
/// The check digit is the weighted digit sum mod 11 using the first weight
/// set. A remainder of 10 is recomputed once with the second weight set; a
/// second remainder of 10 can never match a single digit, so such codes are
/// invalid.
pub fn is_valid_personal_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != CODE_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let digits: Vec<u32> = bytes.iter().map(|b| u32::from(b - b'0')).collect();
    let (body, check_digit) = (&digits[..CODE_LEN - 1], digits[CODE_LEN - 1]);

    let mut check = weighted_remainder(body, &FIRST_PASS_WEIGHTS);
    if check == 10 {
        check = weighted_remainder(body, &SECOND_PASS_WEIGHTS);
    }

    check == check_digit
}

fn weighted_remainder(digits: &[u32], weights: &[u32; 10]) -> u32 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum::<u32>() % 11
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_code() {
        assert!(is_valid_personal_code("37605030299"));
    }

    #[test]
    fn test_wrong_check_digit() {
        assert!(!is_valid_personal_code("37605030298"));
    }

    #[test]
    fn test_second_weight_pass() {
        // first pass remainder is 10, second pass gives 4
        assert!(is_valid_personal_code("37605030064"));
        assert!(!is_valid_personal_code("37605030060"));
    }

    #[test]
    fn test_remainder_ten_on_both_passes_is_never_valid() {
        for check_digit in 0..=9 {
            let code = format!("3760503092{check_digit}");
            assert!(!is_valid_personal_code(&code), "{code} should be invalid");
        }
    }

    #[test]
    fn test_wrong_length() {
        for code in ["", "3760503029", "376050302990", "3"] {
            assert!(!is_valid_personal_code(code), "{code:?} should be invalid");
        }
    }

    #[test]
    fn test_non_digit_characters() {
        for code in ["3760503029a", "37605 30299", "-3760503029", "376050302９"] {
            assert!(!is_valid_personal_code(code), "{code:?} should be invalid");
        }
    }

    #[test]
    fn test_is_deterministic() {
        for code in ["37605030299", "37605030298", "37605030064", "00000000000"] {
            assert_eq!(is_valid_personal_code(code), is_valid_personal_code(code));
        }
    }
}
