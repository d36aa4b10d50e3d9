use rand::Rng;

/// Alphabet for generated identifiers. Decimal digits match what deployed
/// clients already parse out of URLs and logs.
const ID_ALPHABET: &[u8] = b"0123456789";

/// Generate a random identifier of exactly `length` characters.
pub fn generate_random(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect()
}
