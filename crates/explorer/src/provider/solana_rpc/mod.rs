//! Live Solana JSON-RPC provider.
//!
//! Classifies identifiers by introspecting the account on chain:
//! - `getAccountInfo` (jsonParsed) tells whether the account exists and
//!   whether it is a mint owned by the SPL Token or Token-2022 program
//! - `getTokenLargestAccounts` gives the largest holders of a mint
//!
//! Public cluster endpoints are heavily rate limited; point the provider at
//! a dedicated RPC node for anything beyond light use.
//! API documentation: https://solana.com/docs/rpc

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::ExplorerError;
use crate::identifier::AccountIdentifier;
use crate::models::{HolderShare, ProviderLookup, TokenMetrics, MAX_SHARE_PERCENTAGE};
use crate::provider::MetricProvider;

use models::{
    AccountData, AccountInfo, MintInfo, RpcContextual, RpcRequest, RpcResponse,
    TokenAccountBalance,
};

const PROVIDER_ID: &str = "SOLANA_RPC";

/// SPL Token program
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// SPL Token-2022 program
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of holders kept from `getTokenLargestAccounts` (which returns up to 20)
const TOP_HOLDERS: usize = 5;

/// Largest scale a `Decimal` can carry
const MAX_DECIMAL_SCALE: u8 = 28;

/// Solana JSON-RPC metric provider.
///
/// # Example
///
/// ```ignore
/// use solantics_explorer::provider::SolanaRpcProvider;
///
/// let provider = SolanaRpcProvider::new("https://api.mainnet-beta.solana.com");
/// ```
pub struct SolanaRpcProvider {
    client: Client,
    rpc_url: String,
}

impl SolanaRpcProvider {
    /// Create a provider with its own HTTP client.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self::with_client(client, rpc_url)
    }

    /// Create a provider sharing an existing HTTP client.
    pub fn with_client(client: Client, rpc_url: impl Into<String>) -> Self {
        Self {
            client,
            rpc_url: rpc_url.into(),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Perform one JSON-RPC call and unwrap its `result`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ExplorerError> {
        debug!("Solana RPC request: {} -> {}", method, self.rpc_url);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&RpcRequest::new(method, params))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExplorerError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    ExplorerError::provider(PROVIDER_ID, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExplorerError::provider(PROVIDER_ID, format!("Failed to read response: {}", e)))?;

        parse_rpc_result(&body)
    }

    /// Largest holders of a mint as shares of `raw_supply`.
    async fn largest_holders(
        &self,
        identifier: &AccountIdentifier,
        raw_supply: u128,
    ) -> Result<Vec<HolderShare>, ExplorerError> {
        let accounts: RpcContextual<Vec<TokenAccountBalance>> = self
            .call("getTokenLargestAccounts", json!([identifier.as_str()]))
            .await?;

        Ok(holder_shares(&accounts.value, raw_supply))
    }
}

/// Map a non-success HTTP status to an error.
fn status_error(status: StatusCode, body: &str) -> ExplorerError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ExplorerError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        };
    }
    ExplorerError::provider(PROVIDER_ID, format!("HTTP {} - {}", status, body))
}

/// Token lookup for a mint, with holders when they could be fetched.
///
/// The mint classification stands on its own; a holder failure only drops
/// the holders.
fn mint_lookup(
    identifier: &AccountIdentifier,
    decimals: u8,
    raw_supply: u128,
    holders: Result<Vec<HolderShare>, ExplorerError>,
) -> ProviderLookup {
    let mut metrics = TokenMetrics::new().decimal_places(decimals);
    metrics.total_supply = scale_supply(raw_supply, decimals);
    let lookup = ProviderLookup::token(metrics);

    match holders {
        Ok(holders) if !holders.is_empty() => lookup.with_holders(holders),
        Ok(_) => lookup,
        Err(e) => {
            warn!("Largest accounts unavailable for {}: {}", identifier, e);
            lookup
        }
    }
}

/// Decode a JSON-RPC envelope.
fn parse_rpc_result<T: DeserializeOwned>(body: &str) -> Result<T, ExplorerError> {
    let envelope: RpcResponse<T> = serde_json::from_str(body)
        .map_err(|e| ExplorerError::provider(PROVIDER_ID, format!("Malformed response: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(ExplorerError::provider(
            PROVIDER_ID,
            format!("RPC error {}: {}", error.code, error.message),
        ));
    }

    envelope
        .result
        .ok_or_else(|| ExplorerError::provider(PROVIDER_ID, "Response has neither result nor error"))
}

/// What `getAccountInfo` says about an account.
#[derive(Debug, PartialEq)]
enum AccountClass {
    /// An initialized SPL mint
    Mint { decimals: u8, raw_supply: u128 },
    /// Exists, but is not a mint
    Other,
}

fn classify_account(info: &AccountInfo) -> AccountClass {
    let is_token_program = info.owner == TOKEN_PROGRAM_ID || info.owner == TOKEN_2022_PROGRAM_ID;
    if !is_token_program {
        return AccountClass::Other;
    }

    let AccountData::Parsed(parsed) = &info.data else {
        return AccountClass::Other;
    };
    if parsed.parsed.account_type != "mint" {
        return AccountClass::Other;
    }

    match serde_json::from_value::<MintInfo>(parsed.parsed.info.clone()) {
        Ok(mint) if mint.is_initialized => match mint.supply.parse::<u128>() {
            Ok(raw_supply) => AccountClass::Mint {
                decimals: mint.decimals,
                raw_supply,
            },
            Err(e) => {
                warn!("Unparseable mint supply '{}': {}", mint.supply, e);
                AccountClass::Other
            }
        },
        Ok(_) => AccountClass::Other,
        Err(e) => {
            warn!("Unexpected mint layout from {}: {}", parsed.program, e);
            AccountClass::Other
        }
    }
}

/// Supply in whole tokens, `None` when it does not fit a `Decimal`.
fn scale_supply(raw_supply: u128, decimals: u8) -> Option<Decimal> {
    if decimals > MAX_DECIMAL_SCALE {
        return None;
    }
    let raw = i128::try_from(raw_supply).ok()?;
    Decimal::try_from_i128_with_scale(raw, u32::from(decimals)).ok()
}

/// Convert raw balances into percentages of supply, largest first.
fn holder_shares(accounts: &[TokenAccountBalance], raw_supply: u128) -> Vec<HolderShare> {
    if raw_supply == 0 {
        return Vec::new();
    }

    let mut shares: Vec<HolderShare> = accounts
        .iter()
        .filter_map(|account| {
            let amount = account.amount.parse::<u128>().ok()?;
            let share = (amount as f64 / raw_supply as f64) * 100.0;
            Some(HolderShare::new(
                account.address.clone(),
                share.min(MAX_SHARE_PERCENTAGE),
            ))
        })
        .collect();

    shares.sort_by(|a, b| b.share_percentage.total_cmp(&a.share_percentage));
    shares.truncate(TOP_HOLDERS);
    shares
}

#[async_trait]
impl MetricProvider for SolanaRpcProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        5
    }

    async fn lookup(
        &self,
        identifier: &AccountIdentifier,
    ) -> Result<ProviderLookup, ExplorerError> {
        let account: RpcContextual<Option<AccountInfo>> = self
            .call(
                "getAccountInfo",
                json!([identifier.as_str(), { "encoding": "jsonParsed" }]),
            )
            .await?;

        let Some(info) = account.value else {
            return Err(ExplorerError::not_found(PROVIDER_ID));
        };

        let (decimals, raw_supply) = match classify_account(&info) {
            AccountClass::Mint {
                decimals,
                raw_supply,
            } => (decimals, raw_supply),
            AccountClass::Other => {
                debug!(
                    "{} is an account owned by {} (executable: {}, lamports: {})",
                    identifier, info.owner, info.executable, info.lamports
                );
                return Ok(ProviderLookup::account());
            }
        };

        let holders = self.largest_holders(identifier, raw_supply).await;
        Ok(mint_lookup(identifier, decimals, raw_supply, holders))
    }
}
