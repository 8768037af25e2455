/// The deposit transaction type
/// <https://specs.optimism.io/protocol/deposits.html#the-deposited-transaction-type>
mod deposit;
mod deposit_with_nonce;
mod eip1559;
mod eip2930;
mod legacy;

pub use self::{
    deposit::{Deposit, DepositArgs},
    deposit_with_nonce::{DepositExecution, DepositWithNonce, ExecutionError},
    eip1559::{Eip1559, Eip1559Args},
    eip2930::{Eip2930, Eip2930Args},
    legacy::{Legacy, LegacyArgs},
};
