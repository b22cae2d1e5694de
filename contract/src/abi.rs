//! Minimal ABI encoding for the Incinerator's parameterless functions.
//!
//! Every call the console makes takes no arguments, so calldata is just the
//! 4-byte selector. Return values are single static words.

use sha3::{Digest, Keccak256};

use crate::ContractError;

/// One 32-byte ABI word.
pub type Word = [u8; 32];

pub const CAN_INCINERATE: &str = "canIncinerate()";
pub const TIME_UNTIL_NEXT_BURN: &str = "timeUntilNextBurn()";
pub const BURN_AMOUNT: &str = "burnAmount()";
pub const CALLER_REWARD: &str = "callerReward()";
pub const TOTAL_BURNED: &str = "totalBurned()";
pub const TOTAL_CALLS: &str = "totalCalls()";
pub const CONTRACT_BALANCE: &str = "clawdBalance()";
pub const COOLDOWN_SECONDS: &str = "cooldownSeconds()";
pub const INCINERATE: &str = "incinerate()";

/// `Incinerated(address caller, uint256 amountBurned, uint256 callerRewardPaid)`.
pub const INCINERATED_EVENT: &str = "Incinerated(address,uint256,uint256)";

/// Keccak-256 of an ABI signature.
pub fn keccak(signature: &str) -> Word {
    Keccak256::digest(signature.as_bytes()).into()
}

/// Function selector: the first four bytes of the signature hash.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak(signature);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// `0x`-prefixed calldata for a parameterless function.
pub fn call_data(signature: &str) -> String {
    format!("0x{}", hex::encode(selector(signature)))
}

/// `0x`-prefixed topic hash for an event signature.
pub fn event_topic(signature: &str) -> String {
    format!("0x{}", hex::encode(keccak(signature)))
}

/// Split `0x`-prefixed return data into 32-byte words.
pub fn decode_words(data: &str) -> Result<Vec<Word>, ContractError> {
    let digits = data
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::InvalidResponse(format!("missing 0x prefix: {data}")))?;
    let bytes = hex::decode(digits)
        .map_err(|e| ContractError::InvalidResponse(format!("hex decode: {e}")))?;
    if bytes.len() % 32 != 0 {
        return Err(ContractError::InvalidResponse(format!(
            "return data is {} bytes, not a whole number of words",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(32)
        .map(|chunk| {
            let mut word = [0u8; 32];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

/// Decode a single `0x`-prefixed word (event topics, single return values).
pub fn decode_word(data: &str) -> Result<Word, ContractError> {
    let words = decode_words(data)?;
    words
        .first()
        .copied()
        .ok_or_else(|| ContractError::InvalidResponse("empty return data".into()))
}

pub fn word_to_bool(word: &Word) -> Result<bool, ContractError> {
    if word[..31].iter().any(|b| *b != 0) || word[31] > 1 {
        return Err(ContractError::InvalidResponse(format!(
            "not a bool: 0x{}",
            hex::encode(word)
        )));
    }
    Ok(word[31] == 1)
}

/// Decode a `uint256` that must fit in 128 bits.
pub fn word_to_u128(word: &Word) -> Result<u128, ContractError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(ContractError::InvalidResponse(format!(
            "uint256 exceeds 128 bits: 0x{}",
            hex::encode(word)
        )));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

/// Decode a `uint256` that must fit in 64 bits.
pub fn word_to_u64(word: &Word) -> Result<u64, ContractError> {
    let value = word_to_u128(word)?;
    u64::try_from(value)
        .map_err(|_| ContractError::InvalidResponse(format!("uint256 exceeds 64 bits: {value}")))
}

/// Parse a `0x`-prefixed hex quantity (`eth_blockNumber`, `eth_chainId`, `logIndex`).
pub fn parse_quantity(s: &str) -> Result<u64, ContractError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::InvalidResponse(format!("missing 0x prefix: {s}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| ContractError::InvalidResponse(format!("bad quantity {s}: {e}")))
}

pub fn to_quantity(value: u64) -> String {
    format!("{:#x}", value)
}
