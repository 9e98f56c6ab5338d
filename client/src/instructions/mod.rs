pub mod rpc;
pub mod staking_instructions;
pub mod utils;
