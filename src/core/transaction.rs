//! Transaction hashing and validation
//!
//! The hash of a transaction is SHA-256 over its body fields in wire order:
//! `nonce | account | recipient | amount | payload | gasLimit | gasPrice |
//! type | chainIdHash | sign`. Integers are little-endian fixed width, byte
//! fields are written raw. The signing digest is the same stream without
//! `sign`.

use num_bigint::BigUint;
use ring::digest::{Context, SHA256};

use crate::core::address::{AERGO_ENTERPRISE, AERGO_NAME, AERGO_SYSTEM, ADDRESS_LENGTH};
use crate::core::governance::{self, SystemOp};
use crate::core::monetary::{amount_from_bytes, MAX_AER};
use crate::error::ValidationError;
use crate::proto::{State, Tx, TxBody, TxType};

type Validation = std::result::Result<(), ValidationError>;

impl TxBody {
    fn digest(&self, include_sign: bool) -> Vec<u8> {
        let mut context = Context::new(&SHA256);
        context.update(&self.nonce.to_le_bytes());
        context.update(&self.account);
        context.update(&self.recipient);
        context.update(&self.amount);
        context.update(&self.payload);
        context.update(&self.gas_limit.to_le_bytes());
        context.update(&self.gas_price);
        context.update(&self.r#type.to_le_bytes());
        context.update(&self.chain_id_hash);
        if include_sign {
            context.update(&self.sign);
        }
        context.finish().as_ref().to_vec()
    }

    /// Hash of the full body, signature included
    pub fn calculate_hash(&self) -> Vec<u8> {
        self.digest(true)
    }

    /// Digest that gets signed: the body hash without the `sign` field
    pub fn signing_digest(&self) -> Vec<u8> {
        self.digest(false)
    }

    pub fn amount_value(&self) -> BigUint {
        amount_from_bytes(&self.amount)
    }

    pub fn gas_price_value(&self) -> BigUint {
        amount_from_bytes(&self.gas_price)
    }

    /// Declared type, or `None` for a number outside the enum
    pub fn tx_type(&self) -> Option<TxType> {
        TxType::try_from(self.r#type).ok()
    }
}

impl Tx {
    /// Hash of the body; an absent body hashes like an empty one
    pub fn calculate_hash(&self) -> Vec<u8> {
        match &self.body {
            Some(body) => body.calculate_hash(),
            None => TxBody::default().calculate_hash(),
        }
    }

    /// Stateless checks a node applies before admitting a transaction.
    ///
    /// Enterprise governance transactions are accepted; use
    /// [`Tx::validate_for_chain`] to reject them on a public chain.
    pub fn validate(&self) -> Validation {
        self.validate_for_chain(false)
    }

    pub fn validate_for_chain(&self, is_public: bool) -> Validation {
        let body = match &self.body {
            Some(body) => body,
            None => return Err(ValidationError::InvalidAccount),
        };
        if self.hash != body.calculate_hash() {
            return Err(ValidationError::InvalidHash);
        }
        if body.amount_value() > *MAX_AER {
            return Err(ValidationError::InvalidAmount);
        }
        if body.gas_price_value() > *MAX_AER {
            return Err(ValidationError::InvalidPrice);
        }
        if body.account.is_empty() || body.account.len() > ADDRESS_LENGTH {
            return Err(ValidationError::InvalidAccount);
        }
        if body.recipient.len() > ADDRESS_LENGTH {
            return Err(ValidationError::InvalidRecipient);
        }

        match body.tx_type() {
            Some(TxType::Normal)
            | Some(TxType::Redeploy)
            | Some(TxType::Transfer)
            | Some(TxType::Call)
            | Some(TxType::Deploy) => {
                if body.recipient.is_empty() && body.payload.is_empty() {
                    return Err(ValidationError::InvalidRecipient);
                }
                Ok(())
            }
            Some(TxType::Feedelegation) => {
                if body.recipient.is_empty() {
                    return Err(ValidationError::InvalidRecipient);
                }
                Ok(())
            }
            Some(TxType::Governance) => {
                if body.payload.is_empty() {
                    return Err(ValidationError::InvalidPayload);
                }
                match body.recipient.as_slice() {
                    r if r == AERGO_SYSTEM.as_bytes() => governance::validate_system_tx(body),
                    r if r == AERGO_NAME.as_bytes() => governance::validate_name_tx(body),
                    r if r == AERGO_ENTERPRISE.as_bytes() => {
                        if is_public {
                            Err(ValidationError::OnlyInPrivateNet)
                        } else {
                            Ok(())
                        }
                    }
                    _ => Err(ValidationError::InvalidRecipient),
                }
            }
            None => Err(ValidationError::InvalidType),
        }
    }

    /// Checks that depend on the sender's current account state.
    ///
    /// `fee` is the maximum fee the sender pays for a normal transaction.
    pub fn validate_against(&self, sender: &State, fee: &BigUint) -> Validation {
        let body = match &self.body {
            Some(body) => body,
            None => return Err(ValidationError::InvalidAccount),
        };
        let expected = sender.nonce.saturating_add(1);
        if expected > body.nonce {
            return Err(ValidationError::NonceTooLow);
        }

        let amount = body.amount_value();
        let balance = amount_from_bytes(&sender.balance);
        match body.tx_type() {
            Some(TxType::Governance) => match body.recipient.as_slice() {
                r if r == AERGO_SYSTEM.as_bytes() => {
                    if governance::system_op(&body.payload) == Some(SystemOp::Stake)
                        && amount > balance
                    {
                        return Err(ValidationError::InsufficientBalance);
                    }
                }
                r if r == AERGO_NAME.as_bytes() => {
                    if amount > balance {
                        return Err(ValidationError::InsufficientBalance);
                    }
                }
                r if r == AERGO_ENTERPRISE.as_bytes() => {}
                _ => return Err(ValidationError::InvalidRecipient),
            },
            _ => {
                if amount + fee > balance {
                    return Err(ValidationError::InsufficientBalance);
                }
            }
        }

        if expected < body.nonce {
            return Err(ValidationError::NonceTooHigh);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::monetary::{amount_to_bytes, parse_amount};
    use crate::utils::sha256_digest;

    fn signed_normal() -> Tx {
        let body = TxBody {
            nonce: 1,
            account: vec![2u8; 33],
            recipient: vec![3u8; 33],
            amount: amount_to_bytes(&BigUint::from(100u32)),
            gas_limit: 0,
            sign: vec![1, 2, 3],
            ..Default::default()
        };
        let hash = body.calculate_hash();
        Tx {
            hash,
            body: Some(body),
        }
    }

    fn rehash(mut tx: Tx) -> Tx {
        tx.hash = tx.calculate_hash();
        tx
    }

    #[test]
    fn test_hash_field_order() {
        let body = TxBody {
            nonce: 7,
            account: vec![0xaa],
            recipient: vec![0xbb],
            amount: vec![0x01, 0x00],
            payload: b"p".to_vec(),
            gas_limit: 9,
            gas_price: vec![0x05],
            r#type: TxType::Governance as i32,
            chain_id_hash: vec![0xcc],
            sign: vec![0xdd],
        };
        let mut stream = Vec::new();
        stream.extend_from_slice(&7u64.to_le_bytes());
        stream.extend_from_slice(&[0xaa, 0xbb, 0x01, 0x00, b'p']);
        stream.extend_from_slice(&9u64.to_le_bytes());
        stream.push(0x05);
        stream.extend_from_slice(&1i32.to_le_bytes());
        stream.push(0xcc);
        let unsigned = sha256_digest(&stream);
        stream.push(0xdd);
        assert_eq!(body.calculate_hash(), sha256_digest(&stream));
        assert_eq!(body.signing_digest(), unsigned);
    }

    #[test]
    fn test_hash_changes_with_signature() {
        let tx = signed_normal();
        let body = tx.body.clone().unwrap();
        let mut resigned = body.clone();
        resigned.sign = vec![9];
        assert_ne!(body.calculate_hash(), resigned.calculate_hash());
        assert_eq!(body.signing_digest(), resigned.signing_digest());
    }

    #[test]
    fn test_validate_ok_and_invalid_hash() {
        let tx = signed_normal();
        assert_eq!(tx.validate(), Ok(()));

        let mut broken = tx.clone();
        broken.hash[0] ^= 1;
        assert_eq!(broken.validate(), Err(ValidationError::InvalidHash));
    }

    #[test]
    fn test_validate_amount_and_price_limits() {
        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.amount = amount_to_bytes(&(MAX_AER.clone() + 1u32));
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidAmount));

        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.gas_price = amount_to_bytes(&(MAX_AER.clone() + 1u32));
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_validate_account_and_recipient() {
        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.account = vec![];
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidAccount));

        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.recipient = vec![1u8; 34];
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidRecipient));

        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.recipient = vec![];
            body.payload = vec![];
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidRecipient));

        // contract deployment carries code instead of a recipient
        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.recipient = vec![];
            body.payload = b"code".to_vec();
        }
        assert_eq!(rehash(tx).validate(), Ok(()));
    }

    #[test]
    fn test_validate_type_and_governance_recipient() {
        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.r#type = 42;
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidType));

        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.r#type = TxType::Governance as i32;
            body.payload = vec![];
            body.recipient = AERGO_SYSTEM.as_bytes().to_vec();
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidPayload));

        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.r#type = TxType::Governance as i32;
            body.payload = b"{}".to_vec();
            body.recipient = b"someone".to_vec();
        }
        assert_eq!(rehash(tx).validate(), Err(ValidationError::InvalidRecipient));
    }

    #[test]
    fn test_enterprise_only_private() {
        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.r#type = TxType::Governance as i32;
            body.payload = br#"{"Name":"appendAdmin","Args":[]}"#.to_vec();
            body.recipient = AERGO_ENTERPRISE.as_bytes().to_vec();
        }
        let tx = rehash(tx);
        assert_eq!(tx.validate_for_chain(false), Ok(()));
        assert_eq!(
            tx.validate_for_chain(true),
            Err(ValidationError::OnlyInPrivateNet)
        );
    }

    #[test]
    fn test_validate_against_sender_state() {
        let tx = signed_normal();
        let fee = BigUint::from(10u32);
        let rich = State {
            nonce: 0,
            balance: amount_to_bytes(&BigUint::from(110u32)),
            ..Default::default()
        };
        assert_eq!(tx.validate_against(&rich, &fee), Ok(()));

        let poor = State {
            nonce: 0,
            balance: amount_to_bytes(&BigUint::from(109u32)),
            ..Default::default()
        };
        assert_eq!(
            tx.validate_against(&poor, &fee),
            Err(ValidationError::InsufficientBalance)
        );

        let ahead = State {
            nonce: 1,
            ..rich.clone()
        };
        assert_eq!(
            tx.validate_against(&ahead, &fee),
            Err(ValidationError::NonceTooLow)
        );

        let mut future = tx.clone();
        if let Some(body) = future.body.as_mut() {
            body.nonce = 3;
        }
        assert_eq!(
            future.validate_against(&rich, &fee),
            Err(ValidationError::NonceTooHigh)
        );
    }

    #[test]
    fn test_validate_against_stake_ignores_fee() {
        let mut tx = signed_normal();
        if let Some(body) = tx.body.as_mut() {
            body.r#type = TxType::Governance as i32;
            body.recipient = AERGO_SYSTEM.as_bytes().to_vec();
            body.payload = br#"{"Name":"v1stake"}"#.to_vec();
            body.amount = amount_to_bytes(&parse_amount("10000 aergo").unwrap());
        }
        let state = State {
            nonce: 0,
            balance: amount_to_bytes(&parse_amount("10000 aergo").unwrap()),
            ..Default::default()
        };
        let fee = parse_amount("1 aergo").unwrap();
        assert_eq!(tx.validate_against(&state, &fee), Ok(()));

        let mut unknown = tx.clone();
        if let Some(body) = unknown.body.as_mut() {
            body.recipient = b"nobody".to_vec();
        }
        assert_eq!(
            unknown.validate_against(&state, &fee),
            Err(ValidationError::InvalidRecipient)
        );
    }
}
