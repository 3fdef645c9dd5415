//! Solana JSON-RPC payloads used by the RPC provider.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// Error object returned instead of a result
#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Results wrapped with the slot they were read at
#[derive(Debug, Deserialize)]
pub struct RpcContextual<T> {
    pub value: T,
}

/// Response value of `getAccountInfo`
#[derive(Debug, Deserialize)]
pub struct AccountInfo {
    /// Program that owns the account
    pub owner: String,
    #[serde(default)]
    pub executable: bool,
    #[serde(default)]
    pub lamports: u64,
    pub data: AccountData,
}

/// Account data as returned with `jsonParsed` encoding.
///
/// Accounts the node has no parser for come back as `[base64, encoding]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AccountData {
    Parsed(ParsedData),
    Raw(Value),
}

#[derive(Debug, Deserialize)]
pub struct ParsedData {
    /// Parser name (e.g., "spl-token", "spl-token-2022")
    pub program: String,
    pub parsed: ParsedAccount,
}

#[derive(Debug, Deserialize)]
pub struct ParsedAccount {
    /// Account type within the program (e.g., "mint", "account")
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub info: Value,
}

/// `info` of a parsed SPL mint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintInfo {
    pub decimals: u8,
    /// Raw supply in base units, as a decimal string
    pub supply: String,
    #[serde(default)]
    pub is_initialized: bool,
}

/// Entry of `getTokenLargestAccounts`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountBalance {
    pub address: String,
    /// Raw balance in base units, as a decimal string
    pub amount: String,
    #[serde(default)]
    pub decimals: u8,
}
