pub mod executor;
pub mod signer;

pub use executor::{ExecutionReceipt, SwapExecutor, SwapStatus};
pub use signer::{ChainSigner, Confirmation, EthersSigner};
