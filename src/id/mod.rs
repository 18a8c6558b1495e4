//! # Book Id Generation
//!
//! Short random identifiers drawn from the URL-safe alphabet.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::observability::{log_event_with_fields, Event};

/// Length of a generated id
pub const ID_LENGTH: usize = 8;

/// URL-safe alphabet, 64 symbols so a masked byte maps without bias
const ALPHABET: &[u8; 64] = b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a new book id using the operating system random source.
///
/// # Panics
///
/// Panics if the random source fails. That is an environment fault, not
/// something a single request can recover from.
pub fn generate() -> String {
    generate_with(&mut OsRng)
}

/// Generate an id from the given random source
pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; ID_LENGTH];

    if let Err(e) = rng.try_fill_bytes(&mut bytes) {
        let reason = e.to_string();
        log_event_with_fields(Event::IdSourceFailure, &[("reason", &reason)]);
        panic!("random source unavailable for id generation: {}", reason);
    }

    bytes
        .iter()
        .map(|b| ALPHABET[(*b & 63) as usize] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0)
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy exhausted",
            )))
        }
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_zero_bytes_map_to_first_symbol() {
        struct ZeroRng;
        impl RngCore for ZeroRng {
            fn next_u32(&mut self) -> u32 {
                0
            }
            fn next_u64(&mut self) -> u64 {
                0
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0)
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }

        assert_eq!(generate_with(&mut ZeroRng), "________");
    }

    #[test]
    #[should_panic(expected = "random source unavailable")]
    fn test_broken_source_is_fatal() {
        generate_with(&mut BrokenRng);
    }
}
