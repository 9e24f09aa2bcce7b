//! MOLIT apartment rent transaction API (국토교통부 아파트 전월세 실거래가).
//!
//! Data is published per district (`LAWD_CD`) and contract month
//! (`DEAL_YMD`), paged, with amounts in units of 10,000 won.

pub mod client;
pub mod dto;
pub mod settings;
