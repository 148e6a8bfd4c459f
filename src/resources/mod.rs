//! ECS resources and the playback engine.
//!
//! Overview
//! - `agentsettings` – INI settings for the host
//! - `agenttimers` – one-shot timers on the agent's clock
//! - `animationconfig` – parsed and validated `config.json`
//! - `idlescheduler` – random idle trigger for a dormant agent
//! - `placement` – the agent's center on screen
//! - `playback` – the playback state machine
//! - `playbackqueue` – FIFO of deferred play requests
//! - `randomsource` – injectable random draws
//! - `soundbank` – preloaded sound clip names
//! - `spriteatlas` – sprite index to atlas rectangle
//! - `worldtime` – host time and delta
pub mod agentsettings;
pub mod agenttimers;
pub mod animationconfig;
pub mod idlescheduler;
pub mod placement;
pub mod playback;
pub mod playbackqueue;
pub mod randomsource;
pub mod soundbank;
pub mod spriteatlas;
pub mod worldtime;
