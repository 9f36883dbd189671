//! Ledger access: token counter reads and confirmed mint submissions

mod abi;
mod rpc;
mod traits;
mod types;


pub use abi::{
    MINT_CERTIFICATE_SELECTOR, TOKEN_ID_COUNTER_SELECTOR, decode_uint_word, encode_mint_call,
    encode_token_counter_call, parse_quantity, to_quantity,
};
pub use rpc::JsonRpcLedger;
pub use traits::MintLedger;
#[cfg(test)]
pub use traits::MockMintLedger;
pub use types::{MintReceipt, RpcErrorObject, RpcResponse, TransactionReceipt};
