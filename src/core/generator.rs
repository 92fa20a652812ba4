//! Random password generation.

use crate::constants;
use crate::error::{Result, VaultError};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

/// Which optional character classes join the lowercase base pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharsetOptions {
    pub digits: bool,
    pub uppercase: bool,
    pub special: bool,
}

/// Build the character pool for `options`. Built fresh on every call.
pub fn pool(options: CharsetOptions) -> Vec<char> {
    let mut pool: Vec<char> = constants::LOWERCASE.chars().collect();
    if options.digits {
        pool.extend(constants::DIGITS.chars());
    }
    if options.uppercase {
        pool.extend(constants::UPPERCASE.chars());
    }
    if options.special {
        pool.extend(constants::SPECIAL.chars());
    }
    pool
}

pub fn check_length(length: usize) -> Result<()> {
    if !(constants::MIN_GENERATED_LENGTH..=constants::MAX_GENERATED_LENGTH).contains(&length) {
        return Err(VaultError::LengthNotInRange {
            given: length,
            min: constants::MIN_GENERATED_LENGTH,
            max: constants::MAX_GENERATED_LENGTH,
        });
    }
    Ok(())
}

/// Draw `length` characters uniformly, with replacement, from the pool.
pub fn generate(length: usize, options: CharsetOptions) -> Result<String> {
    check_length(length)?;
    let pool = pool(options);
    let mut rng = OsRng;
    Ok((0..length)
        .filter_map(|_| pool.choose(&mut rng).copied())
        .collect())
}
