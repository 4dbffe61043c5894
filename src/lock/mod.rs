//! Lock contract deployment.
//!
//! # Data Flow
//! ```text
//! wall clock + unlock delay → schedule.rs (unlock timestamp)
//! "0.001"                   → amount.rs (wei)
//! artifact + deployer       → script.rs (encode, deploy, confirm, print)
//! ```

pub mod amount;
pub mod schedule;
pub mod script;

pub use amount::{format_amount, parse_amount, AmountError};
pub use schedule::{unlock_timestamp, ScheduleError};
pub use script::{run, LockDeployment, LockError, LockParams};
