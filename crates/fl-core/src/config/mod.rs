//! # Pure Data Module / 纯数据模块
//!
//! Configuration data structures only. Loading lives in the bootstrap crate;
//! path resolution and credential seeding live in the wiring code.
//!
//! > **This module contains data only, no policy, no validation.**
//! > **此模块只包含数据结构定义，不包含策略与验证逻辑。**

mod manager_config;

pub use manager_config::{AppSection, LoggingSection, ManagerConfig, StorageSection};
