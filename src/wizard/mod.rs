//! Kiosk-client core: the capture wizard's linear state machine, the
//! mirrored-frame capture contract, the fabricated loading timeline and the
//! message-severity mapping. Kept UI-toolkit-agnostic so the capture and
//! transition contracts are testable.

pub mod capture;
pub mod machine;
pub mod messages;
pub mod progress;
