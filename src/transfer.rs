//! Query-parameter validation and unsigned transfer construction.

use serde::Deserialize;
use solana_sdk::{hash::Hash, pubkey::Pubkey, system_instruction, transaction::Transaction};
use std::str::FromStr;

use crate::config::ActionConfig;
use crate::error::ActionError;

/// Optional `to` / `amount` query parameters of the POST endpoint.
///
/// Kept as raw strings so a present-but-malformed value can be rejected
/// naming the offending parameter.
#[derive(Debug, Default, Deserialize)]
pub struct TransferQuery {
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// Validated transfer parameters with config defaults applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferParams {
    pub amount_sol: f64,
    pub to: Pubkey,
}

/// Resolve and validate the query parameters.
///
/// - `to` must parse as a base58 address; absent means the config fallback.
/// - `amount` must parse as a finite number strictly greater than zero;
///   absent means the config fallback.
pub fn validate_query(
    query: &TransferQuery,
    config: &ActionConfig,
) -> Result<TransferParams, ActionError> {
    let to = match query.to.as_deref() {
        Some(raw) => Pubkey::from_str(raw).map_err(|_| ActionError::invalid_param("to"))?,
        None => Pubkey::from_str(&config.default_to)
            .map_err(|_| ActionError::invalid_param("to"))?,
    };

    let amount_sol = match query.amount.as_deref() {
        Some(raw) => {
            let parsed: f64 = raw.parse().map_err(|_| ActionError::invalid_param("amount"))?;
            if !parsed.is_finite() || parsed <= 0.0 {
                return Err(ActionError::invalid_param("amount"));
            }
            parsed
        }
        None => config.default_amount_sol,
    };

    Ok(TransferParams { amount_sol, to })
}

/// One system transfer of `lamports` from `from` to `to`, fee payer `from`,
/// anchored to `recent_blockhash`. Returned unsigned; the caller signs.
pub fn build_transfer(
    from: &Pubkey,
    to: &Pubkey,
    lamports: u64,
    recent_blockhash: Hash,
) -> Transaction {
    let instruction = system_instruction::transfer(from, to, lamports);
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(from));
    transaction.message.recent_blockhash = recent_blockhash;
    transaction
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::native_token::sol_to_lamports;
    use solana_sdk::system_instruction::SystemInstruction;
    use solana_sdk::system_program;

    fn config() -> ActionConfig {
        ActionConfig::default()
    }

    #[test]
    fn test_valid_pair_passes_through_exactly() {
        let to = Pubkey::new_unique();
        let query = TransferQuery {
            to: Some(to.to_string()),
            amount: Some("1.25".to_string()),
        };
        let params = validate_query(&query, &config()).unwrap();
        assert_eq!(params.to, to);
        assert_eq!(params.amount_sol, 1.25);
    }

    #[test]
    fn test_omitted_parameters_yield_defaults() {
        let cfg = config();
        let params = validate_query(&TransferQuery::default(), &cfg).unwrap();
        assert_eq!(params.to, Pubkey::from_str(&cfg.default_to).unwrap());
        assert_eq!(params.amount_sol, cfg.default_amount_sol);
    }

    #[test]
    fn test_malformed_to_names_the_parameter() {
        let query = TransferQuery {
            to: Some("O0l1-not-base58".to_string()),
            amount: None,
        };
        let err = validate_query(&query, &config()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input query parameter: to");
    }

    #[test]
    fn test_bad_amounts_name_the_parameter() {
        for bad in ["0", "-3", "abc", "NaN", "inf", ""] {
            let query = TransferQuery {
                to: None,
                amount: Some(bad.to_string()),
            };
            let err = validate_query(&query, &config()).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid input query parameter: amount",
                "amount {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_built_transfer_moves_exact_lamports() {
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        let lamports = sol_to_lamports(0.5);
        let tx = build_transfer(&from, &to, lamports, Hash::default());

        // fee payer is the first account key
        assert_eq!(tx.message.account_keys[0], from);
        assert_eq!(tx.message.account_keys[1], to);

        let compiled = &tx.message.instructions[0];
        let program = tx.message.account_keys[compiled.program_id_index as usize];
        assert_eq!(program, system_program::id());

        match bincode::deserialize::<SystemInstruction>(&compiled.data).unwrap() {
            SystemInstruction::Transfer { lamports: moved } => assert_eq!(moved, lamports),
            other => panic!("expected a transfer instruction, got {:?}", other),
        }

        // unsigned: signature slots are present but empty
        assert!(tx.signatures.iter().all(|s| *s == Default::default()));
    }
}
