use crate::pool::{Options, build_pool};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::Zeroizing;

pub const KEY_LEN: usize = 32;

const WORD_LEN: usize = 8;
const WORD_SPAN: u128 = 1 << 64;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("character pool is empty, enable at least one character category")]
    EmptyPool,

    #[error("invalid length {0}, must be a positive integer")]
    InvalidLength(i64),

    #[error("failed to read from the system random source")]
    Entropy(#[source] rand::Error),
}

/// Generates a password from a fresh key drawn from the operating system CSPRNG.
pub fn generate(options: &Options) -> Result<Zeroizing<String>, GenerateError> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    OsRng
        .try_fill_bytes(&mut key[..])
        .map_err(GenerateError::Entropy)?;

    generate_with_key(options, &key)
}

/// Same as [`generate`], but samples from a ChaCha20 keystream under `key`.
pub fn generate_with_key(
    options: &Options,
    key: &[u8; KEY_LEN],
) -> Result<Zeroizing<String>, GenerateError> {
    let length = usize::try_from(options.length)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(GenerateError::InvalidLength(options.length))?;

    let pool = build_pool(options);
    log::debug!("sampling {} chars from a pool of {}", length, pool.len());

    sample(&pool, length, key)
}

/// Draws `length` characters from `pool`, each one independently and uniformly.
///
/// Indices come from 64-bit keystream words; words at or above the largest
/// multiple of the pool size are discarded so every index is equally likely.
pub fn sample(
    pool: &[char],
    length: usize,
    key: &[u8; KEY_LEN],
) -> Result<Zeroizing<String>, GenerateError> {
    if length == 0 {
        return Err(GenerateError::InvalidLength(0));
    }
    if pool.is_empty() {
        return Err(GenerateError::EmptyPool);
    }

    let pool_size = pool.len() as u128;
    let threshold = rejection_threshold(pool.len());

    let mut cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
    let mut password = Zeroizing::new(String::with_capacity(length));
    let mut drawn = 0;

    let mut buffer = Zeroizing::new(vec![0u8; 1024]);
    cipher.apply_keystream(&mut buffer);
    let mut pos = 0;

    while drawn < length {
        if pos + WORD_LEN > buffer.len() {
            buffer.fill(0);
            cipher.apply_keystream(&mut buffer);
            pos = 0;
        }

        let mut word = Zeroizing::new([0u8; WORD_LEN]);
        word.copy_from_slice(&buffer[pos..pos + WORD_LEN]);
        pos += WORD_LEN;

        let random = u64::from_le_bytes(*word) as u128;
        if random < threshold {
            let index = (random % pool_size) as usize;
            password.push(pool[index]);
            drawn += 1;
        }
    }

    Ok(password)
}

fn rejection_threshold(pool_size: usize) -> u128 {
    WORD_SPAN - (WORD_SPAN % pool_size as u128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::AMBIGUOUS;

    #[test]
    fn test_password_deterministic() {
        let key = [42u8; 32];
        let options = Options::default();
        let password1 = generate_with_key(&options, &key).unwrap();
        let password2 = generate_with_key(&options, &key).unwrap();
        assert_eq!(*password1, *password2);
    }

    #[test]
    fn test_different_keys_different_passwords() {
        let options = Options::default();
        let password1 = generate_with_key(&options, &[1u8; 32]).unwrap();
        let password2 = generate_with_key(&options, &[2u8; 32]).unwrap();
        assert_ne!(*password1, *password2);
    }

    #[test]
    fn test_password_length() {
        let key = [42u8; 32];
        for length in [1, 2, 20, 48, 500] {
            let options = Options {
                length,
                ..Options::default()
            };
            let password = generate_with_key(&options, &key).unwrap();
            assert_eq!(password.chars().count(), length as usize);
        }
    }

    #[test]
    fn test_password_charset() {
        let key = [42u8; 32];
        let options = Options {
            length: 256,
            ..Options::default()
        };
        let pool = build_pool(&options);
        let password = generate_with_key(&options, &key).unwrap();

        for ch in password.chars() {
            assert!(
                pool.contains(&ch),
                "Password contains invalid character: {:?}",
                ch
            );
        }
    }

    #[test]
    fn test_lowercase_only_output() {
        let options = Options {
            length: 128,
            no_upper: true,
            no_digits: true,
            no_special: true,
            ..Options::default()
        };

        let password = generate_with_key(&options, &[7u8; 32]).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_no_ambiguous_output() {
        let options = Options {
            length: 512,
            no_ambiguous: true,
            ..Options::default()
        };

        let password = generate_with_key(&options, &[9u8; 32]).unwrap();
        assert!(!password.chars().any(|c| AMBIGUOUS.contains(c)));
    }

    #[test]
    fn test_custom_special_output() {
        let options = Options {
            length: 512,
            special: "!@#".to_string(),
            ..Options::default()
        };

        let password = generate_with_key(&options, &[3u8; 32]).unwrap();
        for ch in password.chars().filter(|c| !c.is_ascii_alphanumeric()) {
            assert!("!@#".contains(ch), "Unexpected special character {:?}", ch);
        }
    }

    #[test]
    fn test_multibyte_special_counts_chars() {
        let options = Options {
            length: 64,
            no_upper: true,
            no_digits: true,
            special: "€£¥".to_string(),
            ..Options::default()
        };

        let password = generate_with_key(&options, &[5u8; 32]).unwrap();
        assert_eq!(password.chars().count(), 64);
        assert!(password.len() >= 64);
    }

    #[test]
    fn test_invalid_length() {
        let key = [42u8; 32];
        for length in [0, -1, -20, i64::MIN] {
            let options = Options {
                length,
                ..Options::default()
            };
            let err = generate_with_key(&options, &key).unwrap_err();
            assert!(
                matches!(err, GenerateError::InvalidLength(n) if n == length),
                "Unexpected error for length {}: {}",
                length,
                err
            );
        }
    }

    #[test]
    fn test_empty_pool() {
        let err = sample(&[], 20, &[42u8; 32]).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyPool));
        assert!(err.to_string().contains("pool is empty"));
    }

    #[test]
    fn test_sample_zero_length() {
        let err = sample(&['a'], 0, &[42u8; 32]).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidLength(0)));
    }

    #[test]
    fn test_single_char_pool() {
        let password = sample(&['x'], 16, &[42u8; 32]).unwrap();
        assert_eq!(*password, "x".repeat(16));
    }

    #[test]
    fn test_rejection_threshold() {
        for pool_size in [1, 2, 3, 26, 62, 88, 90, 1000] {
            let threshold = rejection_threshold(pool_size);
            assert_eq!(threshold % pool_size as u128, 0);
            assert!(WORD_SPAN - threshold < pool_size as u128);
        }
        assert_eq!(rejection_threshold(1), WORD_SPAN);
        assert_eq!(rejection_threshold(2), WORD_SPAN);
    }

    #[test]
    fn test_sampling_roughly_uniform() {
        let password = sample(&['a', 'b', 'c', 'd'], 40_000, &[11u8; 32]).unwrap();

        for ch in ['a', 'b', 'c', 'd'] {
            let count = password.chars().filter(|c| *c == ch).count();
            assert!(
                (9_000..11_000).contains(&count),
                "{:?} drawn {} times out of 40000",
                ch,
                count
            );
        }
    }

    #[test]
    fn test_generate_from_os_entropy() {
        let options = Options {
            length: 32,
            ..Options::default()
        };
        let pool = build_pool(&options);

        let password1 = generate(&options).unwrap();
        let password2 = generate(&options).unwrap();

        assert_eq!(password1.chars().count(), 32);
        assert!(password1.chars().all(|c| pool.contains(&c)));
        assert_ne!(*password1, *password2);
    }
}
