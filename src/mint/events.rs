//! Collection contract ABI surface and mint event extraction.

use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::Log;
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Mint entry point on the collection contract.
    function mintNFT(address recipient, string tokenURI) external returns (uint256);

    /// Ownable accessor probed by operational checks.
    function owner() external view returns (address);

    /// ERC-721 transfer. A mint is a transfer from the zero address.
    #[derive(Debug)]
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
}

/// ABI-encode the mint call for the given recipient and metadata URI.
pub fn mint_call_data(recipient: Address, token_uri: &str) -> Bytes {
    mintNFTCall {
        recipient,
        tokenURI: token_uri.to_string(),
    }
    .abi_encode()
    .into()
}

/// ABI-encode the `owner()` probe.
pub fn owner_call_data() -> Bytes {
    ownerCall {}.abi_encode().into()
}

/// Decode the `owner()` return value.
pub fn decode_owner(data: &[u8]) -> Option<Address> {
    ownerCall::abi_decode_returns(data).ok()
}

/// Extract the minted token id from a receipt's logs.
///
/// Scans for ERC-721 Transfer events whose `from` is the zero address and
/// returns the token id of the LAST match. When a single transaction emits
/// several mints (batch side effects), the last is treated as canonical; an
/// arbitrary tie-break preserved from the service's original behavior, not a
/// guarantee that holds for every contract design.
pub fn extract_minted_token_id(logs: &[Log]) -> Option<U256> {
    logs.iter()
        .filter_map(|log| {
            let decoded = log.log_decode::<Transfer>().ok()?;
            let transfer = decoded.inner.data;
            (transfer.from == Address::ZERO).then_some(transfer.tokenId)
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;
    use alloy::sol_types::SolEvent;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn transfer_log(from: Address, to: Address, token_id: u64) -> Log {
        Log {
            inner: alloy::primitives::Log::new_unchecked(
                addr(0xcc),
                vec![
                    Transfer::SIGNATURE_HASH,
                    from.into_word(),
                    to.into_word(),
                    B256::from(U256::from(token_id)),
                ],
                Bytes::new(),
            ),
            ..Default::default()
        }
    }

    fn unrelated_log() -> Log {
        Log {
            inner: alloy::primitives::Log::new_unchecked(
                addr(0xcc),
                vec![B256::repeat_byte(0x11)],
                Bytes::from(vec![0u8; 32]),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_mint_call_data_selector() {
        let data = mint_call_data(addr(0x01), "ipfs://QmExample");
        // 4-byte selector plus ABI-encoded arguments.
        assert_eq!(&data[..4], &mintNFTCall::SELECTOR);
        assert!(data.len() > 4);
    }

    #[test]
    fn test_extracts_token_id_from_mint_event() {
        let logs = vec![transfer_log(Address::ZERO, addr(0x02), 7)];
        assert_eq!(extract_minted_token_id(&logs), Some(U256::from(7)));
    }

    #[test]
    fn test_last_mint_event_wins() {
        let logs = vec![
            transfer_log(Address::ZERO, addr(0x02), 7),
            unrelated_log(),
            transfer_log(Address::ZERO, addr(0x03), 9),
        ];
        assert_eq!(extract_minted_token_id(&logs), Some(U256::from(9)));
    }

    #[test]
    fn test_ordinary_transfers_are_ignored() {
        // A transfer between two non-zero addresses is not a mint.
        let logs = vec![
            transfer_log(addr(0x01), addr(0x02), 7),
            transfer_log(Address::ZERO, addr(0x03), 5),
            transfer_log(addr(0x03), addr(0x04), 5),
        ];
        assert_eq!(extract_minted_token_id(&logs), Some(U256::from(5)));
    }

    #[test]
    fn test_no_mint_event_yields_none() {
        assert_eq!(extract_minted_token_id(&[]), None);
        assert_eq!(extract_minted_token_id(&[unrelated_log()]), None);
        let logs = vec![transfer_log(addr(0x01), addr(0x02), 7)];
        assert_eq!(extract_minted_token_id(&logs), None);
    }

    #[test]
    fn test_owner_roundtrip() {
        let owner = addr(0xaa);
        // ABI encoding of a single address return value: 32 bytes, left-padded.
        let encoded = owner.into_word();
        assert_eq!(decode_owner(encoded.as_slice()), Some(owner));
        assert_eq!(decode_owner(&[0x01, 0x02]), None);
    }
}
