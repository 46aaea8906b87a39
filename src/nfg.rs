//! Import of games written in the Gambit normal form (`.nfg`) format, as exported by GAMUT.
mod parser;
pub use parser::*;

mod nfg_error;
pub use nfg_error::NfgError;
