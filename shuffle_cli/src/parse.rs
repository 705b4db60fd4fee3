use shuffle_types::{seed_from_be_bytes, Seed, U256};

/// Parses a decimal integer into a `U256`.
pub fn parse_u256(value: &str) -> Result<U256, String> {
    let digits = value.trim();
    if digits.is_empty() {
        return Err("Empty integer".to_string());
    }
    U256::from_dec_str(digits).map_err(|e| format!("Invalid integer {:?}: {:?}", value, e))
}

/// Parses a seed given either as a decimal integer or as `0x`-prefixed big-endian hex.
///
/// Both forms are left-padded to 32 bytes.
pub fn parse_seed(value: &str) -> Result<Seed, String> {
    let value = value.trim();
    match value.strip_prefix("0x") {
        Some(hex) => {
            let padded = if hex.len() % 2 == 1 {
                format!("0{}", hex)
            } else {
                hex.to_string()
            };
            let bytes =
                hex::decode(&padded).map_err(|e| format!("Failed to parse hex seed: {:?}", e))?;
            seed_from_be_bytes(&bytes)
                .ok_or_else(|| format!("Seed is {} bytes, at most 32 allowed", bytes.len()))
        }
        None => {
            let int = parse_u256(value)?;
            let mut bytes = [0; 32];
            int.to_big_endian(&mut bytes);
            Ok(Seed::from(bytes))
        }
    }
}

/// Formats a permutation as `[a, b, c]`.
pub fn format_list(values: &[U256]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
