//! Permission mode codec: symbolic (`rwxr-xr--`) to octal (`754`) and back.

use std::fmt;

use thiserror::Error;

/// A permission mode in canonical three-digit octal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMode(String);

impl PermissionMode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nine-character symbolic rendering, or `None` when a digit is not octal.
    pub fn to_symbolic(&self) -> Option<String> {
        let mut out = String::with_capacity(9);
        for digit in self.0.chars() {
            let bits = digit.to_digit(8)?;
            out.push(if bits & 4 != 0 { 'r' } else { '-' });
            out.push(if bits & 2 != 0 { 'w' } else { '-' });
            out.push(if bits & 1 != 0 { 'x' } else { '-' });
        }
        Some(out)
    }
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejected permission mode input.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum ModeError {
    #[error("invalid mode '{input}': expected 3 octal digits or 9 symbolic characters")]
    #[diagnostic(code(zos_restfiles::mode::length))]
    Length { input: String },

    /// `position` is 1-based.
    #[error(
        "invalid mode '{input}': character '{character}' at position {position} \
         must be '{expected}' or '-'"
    )]
    #[diagnostic(code(zos_restfiles::mode::character))]
    Character {
        input: String,
        character: char,
        position: usize,
        expected: char,
    },
}

/// Convert a symbolic or octal mode to canonical octal.
///
/// Three ASCII digits pass through unchanged. Nine characters are read as
/// three `rwx` groups where each slot holds its letter or `-`.
pub fn to_octal(input: &str) -> Result<PermissionMode, ModeError> {
    if input.len() == 3 && input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(PermissionMode(input.to_string()));
    }

    let chars: Vec<char> = input.chars().collect();
    if chars.len() != 9 {
        return Err(ModeError::Length {
            input: input.to_string(),
        });
    }

    let mut octal = String::with_capacity(3);
    for (group, slots) in chars.chunks(3).enumerate() {
        let mut value = 0;
        for (slot, (&c, (letter, weight))) in slots
            .iter()
            .zip([('r', 4), ('w', 2), ('x', 1)])
            .enumerate()
        {
            if c == letter {
                value += weight;
            } else if c != '-' {
                return Err(ModeError::Character {
                    input: input.to_string(),
                    character: c,
                    position: group * 3 + slot + 1,
                    expected: letter,
                });
            }
        }
        octal.push(char::from(b'0' + value));
    }
    Ok(PermissionMode(octal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbolic_to_octal() {
        assert_eq!(to_octal("rwxr-xr-x").unwrap().as_str(), "755");
        assert_eq!(to_octal("rw-r--r--").unwrap().as_str(), "644");
        assert_eq!(to_octal("---------").unwrap().as_str(), "000");
        assert_eq!(to_octal("rwxrwxrwx").unwrap().as_str(), "777");
    }

    #[test]
    fn test_octal_passthrough_without_range_check() {
        assert_eq!(to_octal("644").unwrap().as_str(), "644");
        assert_eq!(to_octal("999").unwrap().as_str(), "999");
    }

    #[test]
    fn test_every_valid_symbolic_mode_sums_per_group() {
        let slot = |letter: char, on: bool| if on { letter } else { '-' };
        for bits in 0u32..512 {
            let input: String = (0..9)
                .map(|i| {
                    let on = bits & (1 << (8 - i)) != 0;
                    slot(['r', 'w', 'x'][i % 3], on)
                })
                .collect();
            let expected = format!("{:03o}", bits);
            assert_eq!(to_octal(&input).unwrap().as_str(), expected, "input {input}");
        }
    }

    #[test]
    fn test_every_three_digit_input_is_identity() {
        for n in 0..1000 {
            let input = format!("{n:03}");
            assert_eq!(to_octal(&input).unwrap().as_str(), input);
        }
    }

    #[test]
    fn test_wrong_letter_in_slot() {
        let err = to_octal("rwxr-xr-w").unwrap_err();
        assert_eq!(
            err,
            ModeError::Character {
                input: "rwxr-xr-w".to_string(),
                character: 'w',
                position: 9,
                expected: 'x',
            }
        );
        assert!(err.to_string().contains("position 9"));
    }

    #[test]
    fn test_bad_lengths() {
        for input in ["", "75", "7555", "rwx", "rwxr-xr-x-", "12a"] {
            assert!(
                matches!(to_octal(input), Err(ModeError::Length { .. })),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_to_symbolic() {
        assert_eq!(to_octal("750").unwrap().to_symbolic().as_deref(), Some("rwxr-x---"));
        assert_eq!(to_octal("999").unwrap().to_symbolic(), None);
    }
}
