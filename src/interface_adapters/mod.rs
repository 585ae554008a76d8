// Interface adapters: HTTP client, wire protocol, local storage and clock.

pub mod clients;
pub mod clock;
pub mod protocol;
pub mod storage;
